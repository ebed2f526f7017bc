//! Configuration validation.
//!
//! Serde already rejects unknown fields and unknown enum values; this
//! module checks the combinations that parse but make no sense.

use crate::config::schema::{Config, NormalizeConfig};
use crate::error::{Error, Result};

/// Validates configuration consistency.
///
/// # Examples
///
/// ```
/// use pathtree::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref normalize) = config.normalize {
            Self::validate_normalize(normalize)?;
        }

        // Host and magic only make sense when parsing
        if let Some(style) = config.output_style.filter(|s| s.resolve() != *s) {
            return Err(Error::Validation {
                field: "output_style".into(),
                message: format!(
                    "'{style}' is not a rendering style (expected unix, portable or windows)"
                ),
            });
        }

        Ok(())
    }

    /// Validate normalization options.
    ///
    /// Long and short name substitution pull in opposite directions and
    /// cannot both be requested.
    fn validate_normalize(normalize: &NormalizeConfig) -> Result<()> {
        if normalize.long_name == Some(true) && normalize.short_name == Some(true) {
            return Err(Error::Validation {
                field: "normalize".into(),
                message: "long_name and short_name are mutually exclusive".into(),
            });
        }
        Ok(())
    }
}
