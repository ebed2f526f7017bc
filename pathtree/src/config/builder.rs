//! Layered configuration assembly.

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::{CompareConfig, Config, NormalizeConfig, OutputFormat};
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use crate::name::{Encoding, Interpretation};
use std::env;
use std::path::{Path, PathBuf};

/// Builds the effective configuration from every source.
///
/// Layers, lowest precedence first: built-in defaults, the user config,
/// the project `pathtree.yaml`, `PATHTREE_*` environment variables and
/// finally the programmatic overrides given to [`with_config`](Self::with_config).
/// The result has every field set.
///
/// # Examples
///
/// ```
/// use pathtree::config::{Config, ConfigBuilder};
/// use pathtree::Interpretation;
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         interpretation: Some(Interpretation::Unix),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.interpretation, Some(Interpretation::Unix));
/// assert!(config.normalize.is_some());
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    user_dir: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Creates a builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory where project config discovery starts (default: the
    /// process working directory).
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Directory holding the user `config.yaml` (default: `~/.pathtree`).
    #[must_use]
    pub fn with_user_dir(mut self, dir: &Path) -> Self {
        self.user_dir = Some(dir.to_path_buf());
        self
    }

    /// Programmatic overrides, applied last.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Ignore configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `PATHTREE_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// The built-in defaults, with every field set.
    #[must_use]
    pub fn defaults() -> Config {
        Config {
            interpretation: Some(Interpretation::Host),
            encoding: Some(Encoding::SystemDefault),
            normalize: Some(NormalizeConfig {
                resolve_symlinks: Some(false),
                lowercase: Some(false),
                normalize_case: Some(false),
                preserve_relative: Some(false),
                long_name: Some(false),
                short_name: Some(false),
            }),
            compare: Some(CompareConfig {
                case_insensitive: Some(false),
                final_first: Some(false),
            }),
            output_style: Some(Interpretation::Portable),
            output_format: Some(OutputFormat::Human),
        }
    }

    /// Assembles and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed,
    /// an environment variable holds an invalid value, or the merged
    /// configuration fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Self::defaults();

        if !self.skip_files {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.user_dir.as_deref())?;
            for source in &sources {
                ConfigValidator::validate(&source.config)?;
            }
            ConfigMerger::merge_into(&mut config, &ConfigMerger::merge(sources));
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
