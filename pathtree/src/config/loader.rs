//! Configuration file discovery and loading.
//!
//! This module handles discovering and loading pathtree configuration files
//! from the user's home directory and from the project tree.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "pathtree.yaml";

/// Name of the user configuration directory below the home directory.
pub const USER_CONFIG_DIR: &str = ".pathtree";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
///
/// # Examples
///
/// ```
/// use pathtree::config::ConfigSource;
/// use std::path::PathBuf;
///
/// // User config has lowest precedence
/// let user_config = ConfigSource {
///     path: PathBuf::from("~/.pathtree/config.yaml"),
///     precedence: 1,
///     config: Default::default(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from various sources.
///
/// # Examples
///
/// ```no_run
/// use pathtree::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files.
    ///
    /// Searches for:
    /// 1. User config at `~/.pathtree/config.yaml` (precedence 1)
    /// 2. The nearest `pathtree.yaml` walking up from `working_dir` (precedence 2)
    ///
    /// `user_dir` overrides the directory holding the user config.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(working_dir: &Path, user_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(user_dir)? {
            sources.push(user_config);
        }

        sources.extend(Self::discover_project_configs(working_dir)?);

        // Highest precedence last
        sources.sort_by_key(|s| s.precedence);

        Ok(sources)
    }

    /// Load the user configuration file, if there is one.
    ///
    /// If `user_dir` is provided, loads from `{user_dir}/config.yaml`.
    /// Without a home directory there is no user configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load_user_config(user_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match user_dir {
            Some(dir) => dir.join("config.yaml"),
            None => match Self::user_config_path() {
                Some(path) => path,
                None => return Ok(None),
            },
        };

        if !config_path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Discover the project configuration by walking up directories.
    ///
    /// Stops at the first directory containing `pathtree.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                log::debug!("using project configuration {}", candidate.display());
                let config = Self::load_file(&candidate)?;
                return Ok(vec![ConfigSource {
                    path: candidate,
                    precedence: 2,
                    config,
                }]);
            }
            if !current.pop() {
                return Ok(Vec::new());
            }
        }
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::system("read_config", path.display().to_string(), e))?;

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })
    }

    /// Path of the user configuration file, `~/.pathtree/config.yaml`.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        home::home_dir().map(|home| home.join(USER_CONFIG_DIR).join("config.yaml"))
    }
}
