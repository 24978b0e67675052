//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat, StorageConfig, ValidationConfig};
use crate::store::StoreBackend;
use proptest::prelude::*;
use std::path::PathBuf;

fn backend_strategy() -> impl Strategy<Value = StoreBackend> {
    prop_oneof![
        Just(StoreBackend::Sqlite),
        Just(StoreBackend::Json),
        Just(StoreBackend::Memory),
    ]
}

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
        Just(OutputFormat::Tsv),
        Just(OutputFormat::Table),
    ]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of((
            prop::option::of(backend_strategy()),
            prop::option::of("/[a-z]{1,12}"),
        )),
        prop::option::of(1u64..600),
        prop::option::of(format_strategy()),
        prop::option::of(prop::option::of("\\^[0-9]{1,3}\\$")),
    )
        .prop_map(|(storage, wait, format, pattern)| Config {
            storage: storage.map(|(backend, path)| StorageConfig {
                backend,
                path: path.map(PathBuf::from),
            }),
            maximum_lock_wait_seconds: wait,
            output_format: format,
            validation: pattern.map(|phone_pattern| ValidationConfig { phone_pattern }),
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Every value set in the higher layer survives the merge
    #[test]
    fn higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        if high.maximum_lock_wait_seconds.is_some() {
            prop_assert_eq!(merged.maximum_lock_wait_seconds, high.maximum_lock_wait_seconds);
        } else {
            prop_assert_eq!(merged.maximum_lock_wait_seconds, low.maximum_lock_wait_seconds);
        }

        if high.output_format.is_some() {
            prop_assert_eq!(merged.output_format, high.output_format);
        } else {
            prop_assert_eq!(merged.output_format, low.output_format);
        }

        if let Some(backend) = high.storage.as_ref().and_then(|s| s.backend) {
            prop_assert_eq!(merged.backend(), backend);
        }
        if let Some(pattern) = high.validation.as_ref().and_then(|v| v.phone_pattern.as_deref()) {
            prop_assert_eq!(merged.phone_pattern(), pattern);
        }
    }

    // Merging an empty layer is the identity
    #[test]
    fn merge_with_default_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Merging a config into itself changes nothing
    #[test]
    fn merge_is_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Merged configs survive a YAML round trip through the strict schema
    #[test]
    fn merged_config_serializes(low in config_strategy(), high in config_strategy()) {
        let mut merged = low;
        ConfigMerger::merge_into(&mut merged, &high);
        let yaml = serde_yaml::to_string(&merged).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, merged);
    }
}
