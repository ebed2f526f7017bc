//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{CompareConfig, Config, NormalizeConfig, OutputFormat};
use crate::name::{Encoding, Interpretation};
use proptest::prelude::*;

fn interpretation_strategy() -> impl Strategy<Value = Interpretation> {
    prop_oneof![
        Just(Interpretation::Unix),
        Just(Interpretation::Portable),
        Just(Interpretation::Windows),
        Just(Interpretation::Host),
        Just(Interpretation::Magic),
    ]
}

fn normalize_strategy() -> impl Strategy<Value = NormalizeConfig> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(
            |(resolve_symlinks, lowercase, normalize_case, preserve_relative, long_name, short_name)| {
                NormalizeConfig {
                    resolve_symlinks,
                    lowercase,
                    normalize_case,
                    preserve_relative,
                    long_name,
                    short_name,
                }
            },
        )
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(interpretation_strategy()),
        prop::option::of(prop_oneof![Just(Encoding::SystemDefault), Just(Encoding::Utf8)]),
        prop::option::of(normalize_strategy()),
        prop::option::of(
            (prop::option::of(any::<bool>()), prop::option::of(any::<bool>())).prop_map(
                |(case_insensitive, final_first)| CompareConfig {
                    case_insensitive,
                    final_first,
                },
            ),
        ),
        prop::option::of(prop_oneof![Just(OutputFormat::Human), Just(OutputFormat::Json)]),
    )
        .prop_map(
            |(interpretation, encoding, normalize, compare, output_format)| Config {
                interpretation,
                encoding,
                normalize,
                compare,
                output_style: None,
                output_format,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Non-None values from the higher-precedence side always win
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.interpretation, high.interpretation.or(low.interpretation));
        prop_assert_eq!(merged.encoding, high.encoding.or(low.encoding));
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));

        let low_lower = low.normalize.as_ref().and_then(|n| n.lowercase);
        let high_lower = high.normalize.as_ref().and_then(|n| n.lowercase);
        let merged_lower = merged.normalize.as_ref().and_then(|n| n.lowercase);
        prop_assert_eq!(merged_lower, high_lower.or(low_lower));
    }

    // Merging a config onto itself changes nothing
    #[test]
    fn config_merge_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Merging onto the empty config is the identity
    #[test]
    fn config_merge_empty_identity(config in config_strategy()) {
        let mut merged = Config::default();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(&merged, &config);

        let mut unchanged = config.clone();
        ConfigMerger::merge_into(&mut unchanged, &Config::default());
        prop_assert_eq!(unchanged, config);
    }

    // YAML serialization round-trips
    #[test]
    fn config_yaml_roundtrip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(back, config);
    }
}
