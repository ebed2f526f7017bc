//! Configuration system for pathtree.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project `pathtree.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of option combinations
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PATHTREE_*`)
//! 3. Project config (`pathtree.yaml`, nearest ancestor of the working directory)
//! 4. User config (`~/.pathtree/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use pathtree::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//! println!("normalizing with {}", config.normalize_flags());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use pathtree::config::{CompareConfig, Config, ConfigBuilder};
//! use pathtree::CompareFlags;
//!
//! let custom = Config {
//!     compare: Some(CompareConfig {
//!         case_insensitive: Some(true),
//!         final_first: None,
//!     }),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.compare_flags(), CompareFlags::CASE_INSENSITIVE);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
#[cfg(all(test, feature = "property-tests"))]
mod proptests;
pub mod schema;
pub mod validator;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::{EnvironmentConfig, ENV_VARS};
pub use loader::{ConfigLoader, ConfigSource, PROJECT_CONFIG_FILE};
pub use merger::ConfigMerger;
pub use schema::{CompareConfig, Config, NormalizeConfig, OutputFormat};
pub use validator::ConfigValidator;
