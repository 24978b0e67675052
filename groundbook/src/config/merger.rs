//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, StorageConfig, ValidationConfig};

/// Merges configuration layers according to precedence rules.
///
/// # Examples
///
/// ```
/// use groundbook::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(9), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(9));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge file sources into one config.
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

    /// Merge `source` into `target`; set fields in `source` win.
    ///
    /// Nested sections merge field by field.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_storage) = source.storage {
            target.storage = Some(match &target.storage {
                Some(target_storage) => Self::merge_storage(target_storage, source_storage),
                None => source_storage.clone(),
            });
        }

        if let Some(ref source_validation) = source.validation {
            target.validation = Some(match &target.validation {
                Some(target_validation) => {
                    Self::merge_validation(target_validation, source_validation)
                }
                None => source_validation.clone(),
            });
        }
    }

    fn merge_storage(target: &StorageConfig, source: &StorageConfig) -> StorageConfig {
        StorageConfig {
            backend: source.backend.or(target.backend),
            path: source.path.clone().or_else(|| target.path.clone()),
        }
    }

    fn merge_validation(target: &ValidationConfig, source: &ValidationConfig) -> ValidationConfig {
        ValidationConfig {
            phone_pattern: source
                .phone_pattern
                .clone()
                .or_else(|| target.phone_pattern.clone()),
        }
    }
}
