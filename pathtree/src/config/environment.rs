//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `PATHTREE_*` environment variables that
//! override configuration file values.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::name::{Encoding, Interpretation};
use std::env;

/// Every environment variable read by [`EnvironmentConfig`].
pub const ENV_VARS: &[&str] = &[
    "PATHTREE_INTERPRETATION",
    "PATHTREE_ENCODING",
    "PATHTREE_RESOLVE_SYMLINKS",
    "PATHTREE_LOWERCASE",
    "PATHTREE_NORMALIZE_CASE",
    "PATHTREE_PRESERVE_RELATIVE",
    "PATHTREE_CASE_INSENSITIVE",
    "PATHTREE_OUTPUT_FORMAT",
];

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use pathtree::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads all `PATHTREE_*` environment variables and applies them to the
    /// configuration with higher precedence than file-based configs.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., unknown interpretation, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("PATHTREE_INTERPRETATION") {
            config.interpretation = Some(
                Interpretation::parse(&val).map_err(|message| Error::Validation {
                    field: "PATHTREE_INTERPRETATION".into(),
                    message,
                })?,
            );
        }

        if let Ok(val) = env::var("PATHTREE_ENCODING") {
            config.encoding = Some(Encoding::parse(&val).map_err(|message| Error::Validation {
                field: "PATHTREE_ENCODING".into(),
                message,
            })?);
        }

        if let Ok(val) = env::var("PATHTREE_OUTPUT_FORMAT") {
            config.output_format =
                Some(OutputFormat::parse(&val).map_err(|message| Error::Validation {
                    field: "PATHTREE_OUTPUT_FORMAT".into(),
                    message,
                })?);
        }

        Self::apply_normalize_overrides(config)?;

        if let Ok(val) = env::var("PATHTREE_CASE_INSENSITIVE") {
            let compare = config.compare.get_or_insert_with(Default::default);
            compare.case_insensitive = Some(Self::parse_bool("PATHTREE_CASE_INSENSITIVE", &val)?);
        }

        Ok(())
    }

    /// Apply normalization environment variable overrides.
    fn apply_normalize_overrides(config: &mut Config) -> Result<()> {
        let mut normalize = config.normalize.clone().unwrap_or_default();
        let mut modified = false;

        if let Ok(val) = env::var("PATHTREE_RESOLVE_SYMLINKS") {
            normalize.resolve_symlinks = Some(Self::parse_bool("PATHTREE_RESOLVE_SYMLINKS", &val)?);
            modified = true;
        }

        if let Ok(val) = env::var("PATHTREE_LOWERCASE") {
            normalize.lowercase = Some(Self::parse_bool("PATHTREE_LOWERCASE", &val)?);
            modified = true;
        }

        if let Ok(val) = env::var("PATHTREE_NORMALIZE_CASE") {
            normalize.normalize_case = Some(Self::parse_bool("PATHTREE_NORMALIZE_CASE", &val)?);
            modified = true;
        }

        if let Ok(val) = env::var("PATHTREE_PRESERVE_RELATIVE") {
            normalize.preserve_relative =
                Some(Self::parse_bool("PATHTREE_PRESERVE_RELATIVE", &val)?);
            modified = true;
        }

        if modified {
            config.normalize = Some(normalize);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    pub(crate) fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
