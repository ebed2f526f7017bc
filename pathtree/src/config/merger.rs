//! Configuration merging and precedence handling.
//!
//! Later sources override earlier ones field by field; nested option
//! groups are merged per field rather than replaced wholesale.

use crate::config::loader::ConfigSource;
use crate::config::schema::{CompareConfig, Config, NormalizeConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use pathtree::config::{Config, ConfigMerger};
/// use pathtree::Interpretation;
///
/// let low = Config { interpretation: Some(Interpretation::Unix), ..Default::default() };
/// let high = Config { interpretation: Some(Interpretation::Windows), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.interpretation, Some(Interpretation::Windows));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Nested option groups: field-by-field merge
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.interpretation.is_some() {
            target.interpretation = source.interpretation;
        }

        if source.encoding.is_some() {
            target.encoding = source.encoding;
        }

        if source.output_style.is_some() {
            target.output_style = source.output_style;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_normalize) = source.normalize {
            target.normalize = Some(match &target.normalize {
                Some(target_normalize) => Self::merge_normalize(target_normalize, source_normalize),
                None => source_normalize.clone(),
            });
        }

        if let Some(ref source_compare) = source.compare {
            target.compare = Some(match &target.compare {
                Some(target_compare) => Self::merge_compare(target_compare, source_compare),
                None => source_compare.clone(),
            });
        }
    }

    fn merge_normalize(target: &NormalizeConfig, source: &NormalizeConfig) -> NormalizeConfig {
        NormalizeConfig {
            resolve_symlinks: source.resolve_symlinks.or(target.resolve_symlinks),
            lowercase: source.lowercase.or(target.lowercase),
            normalize_case: source.normalize_case.or(target.normalize_case),
            preserve_relative: source.preserve_relative.or(target.preserve_relative),
            long_name: source.long_name.or(target.long_name),
            short_name: source.short_name.or(target.short_name),
        }
    }

    fn merge_compare(target: &CompareConfig, source: &CompareConfig) -> CompareConfig {
        CompareConfig {
            case_insensitive: source.case_insensitive.or(target.case_insensitive),
            final_first: source.final_first.or(target.final_first),
        }
    }
}
