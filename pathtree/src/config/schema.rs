//! Configuration schema definitions.
//!
//! This module defines the configuration structure for pathtree: default
//! interpretation and encoding, normalization and comparison options, and
//! output preferences.

use serde::{Deserialize, Serialize};

use crate::compare::CompareFlags;
use crate::name::{Encoding, Interpretation};
use crate::normalize::NormalizeFlags;

/// Complete configuration structure.
///
/// Every field is optional so that configurations from several sources can
/// be layered; absent fields fall through to the next source and finally to
/// the built-in defaults.
///
/// # Examples
///
/// ```
/// use pathtree::config::{Config, NormalizeConfig};
/// use pathtree::{Interpretation, NormalizeFlags};
///
/// let config = Config {
///     interpretation: Some(Interpretation::Unix),
///     normalize: Some(NormalizeConfig {
///         resolve_symlinks: Some(true),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.normalize_flags(), NormalizeFlags::RESOLVE_SYMLINKS);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How path strings are parsed by default.
    pub interpretation: Option<Interpretation>,

    /// Encoding tag given to parsed handles.
    pub encoding: Option<Encoding>,

    /// Normalization options.
    pub normalize: Option<NormalizeConfig>,

    /// Comparison options.
    pub compare: Option<CompareConfig>,

    /// Style used when rendering paths.
    pub output_style: Option<Interpretation>,

    /// Output format for reports.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Normalization flags selected by this configuration.
    #[must_use]
    pub fn normalize_flags(&self) -> NormalizeFlags {
        self.normalize
            .as_ref()
            .map_or_else(NormalizeFlags::empty, NormalizeConfig::flags)
    }

    /// Comparison flags selected by this configuration.
    #[must_use]
    pub fn compare_flags(&self) -> CompareFlags {
        self.compare
            .as_ref()
            .map_or_else(CompareFlags::empty, CompareConfig::flags)
    }

    /// The configured interpretation, or [`Interpretation::Host`].
    #[must_use]
    pub fn interpretation_or_default(&self) -> Interpretation {
        self.interpretation.unwrap_or(Interpretation::Host)
    }

    /// The configured output style, or [`Interpretation::Portable`].
    #[must_use]
    pub fn output_style_or_default(&self) -> Interpretation {
        self.output_style.unwrap_or(Interpretation::Portable)
    }
}

/// Normalization options.
///
/// `long_name` and `short_name` are mutually exclusive.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NormalizeConfig {
    /// Replace symlinks by their targets.
    pub resolve_symlinks: Option<bool>,

    /// Lowercase every component.
    pub lowercase: Option<bool>,

    /// Replace components by their on-disk case.
    pub normalize_case: Option<bool>,

    /// Keep relative paths relative.
    pub preserve_relative: Option<bool>,

    /// Expand 8.3 short names.
    pub long_name: Option<bool>,

    /// Abbreviate to 8.3 short names.
    pub short_name: Option<bool>,
}

impl NormalizeConfig {
    /// The flag set these options select.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::config::NormalizeConfig;
    /// use pathtree::NormalizeFlags;
    ///
    /// let options = NormalizeConfig {
    ///     lowercase: Some(true),
    ///     long_name: Some(true),
    ///     preserve_relative: Some(false),
    ///     ..Default::default()
    /// };
    /// assert_eq!(
    ///     options.flags(),
    ///     NormalizeFlags::LOWERCASE_ALWAYS | NormalizeFlags::LONG_NAME
    /// );
    /// ```
    #[must_use]
    pub fn flags(&self) -> NormalizeFlags {
        let mut flags = NormalizeFlags::empty();
        let pairs = [
            (self.resolve_symlinks, NormalizeFlags::RESOLVE_SYMLINKS),
            (self.lowercase, NormalizeFlags::LOWERCASE_ALWAYS),
            (self.normalize_case, NormalizeFlags::NORMALIZE_CASE),
            (self.preserve_relative, NormalizeFlags::PRESERVE_RELATIVE),
            (self.long_name, NormalizeFlags::LONG_NAME),
            (self.short_name, NormalizeFlags::SHORT_NAME),
        ];
        for (enabled, flag) in pairs {
            if enabled == Some(true) {
                flags |= flag;
            }
        }
        flags
    }
}

/// Comparison options.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CompareConfig {
    /// Fold ASCII case when comparing.
    pub case_insensitive: Option<bool>,

    /// Compare from the final component toward the root.
    pub final_first: Option<bool>,
}

impl CompareConfig {
    /// The flag set these options select.
    #[must_use]
    pub fn flags(&self) -> CompareFlags {
        let mut flags = CompareFlags::empty();
        if self.case_insensitive == Some(true) {
            flags |= CompareFlags::CASE_INSENSITIVE;
        }
        if self.final_first == Some(true) {
            flags |= CompareFlags::FINAL_FIRST;
        }
        flags
    }
}

/// Output format for reports.
///
/// # Examples
///
/// ```
/// use pathtree::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// JSON output format.
    Json,
}

impl OutputFormat {
    /// Parses a format name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.interpretation.is_none());
        assert!(config.normalize.is_none());
        assert_eq!(config.normalize_flags(), NormalizeFlags::empty());
        assert_eq!(config.compare_flags(), CompareFlags::empty());
        assert_eq!(config.interpretation_or_default(), Interpretation::Host);
        assert_eq!(config.output_style_or_default(), Interpretation::Portable);
    }

    #[test]
    fn test_config_deserialize_full() {
        let yaml = r"
interpretation: windows
encoding: utf8
normalize:
  resolve_symlinks: true
  lowercase: true
  normalize_case: false
  preserve_relative: false
  short_name: true
compare:
  case_insensitive: true
  final_first: false
output_style: unix
output_format: json
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.interpretation, Some(Interpretation::Windows));
        assert_eq!(config.encoding, Some(Encoding::Utf8));
        assert_eq!(
            config.normalize_flags(),
            NormalizeFlags::RESOLVE_SYMLINKS
                | NormalizeFlags::LOWERCASE_ALWAYS
                | NormalizeFlags::SHORT_NAME
        );
        assert_eq!(config.compare_flags(), CompareFlags::CASE_INSENSITIVE);
        assert_eq!(config.output_style, Some(Interpretation::Unix));
        assert_eq!(config.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: Config = serde_yaml::from_str("compare:\n  final_first: true\n").unwrap();
        assert_eq!(config.compare_flags(), CompareFlags::FINAL_FIRST);
        assert!(config.interpretation.is_none());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(serde_yaml::from_str::<Config>("colour: red\n").is_err());
        assert!(serde_yaml::from_str::<Config>("normalize:\n  follow: true\n").is_err());
    }

    #[test]
    fn test_invalid_enum_value_rejected() {
        assert!(serde_yaml::from_str::<Config>("interpretation: vms\n").is_err());
        assert!(serde_yaml::from_str::<Config>("output_format: csv\n").is_err());
    }

    #[test]
    fn test_output_format_parse_and_display() {
        assert_eq!(OutputFormat::parse("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("human").unwrap(), OutputFormat::Human);
        assert!(OutputFormat::parse("table").is_err());
        assert_eq!(OutputFormat::Human.to_string(), "human");
        assert_eq!(OutputFormat::default(), OutputFormat::Human);
    }

    #[test]
    fn test_config_serialize_roundtrip() {
        let config = Config {
            interpretation: Some(Interpretation::Portable),
            compare: Some(CompareConfig {
                case_insensitive: Some(true),
                final_first: None,
            }),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }
}
