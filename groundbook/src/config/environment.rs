//! Environment variable handling for configuration overrides.
//!
//! `GROUNDBOOK_*` variables override values from the configuration file.

use crate::config::schema::{Config, OutputFormat, StorageConfig, ValidationConfig};
use crate::error::{Error, Result};
use crate::store::StoreBackend;
use std::env;

/// Selects the store backend.
pub const STORE_BACKEND: &str = "GROUNDBOOK_STORE_BACKEND";
/// Sets `maximum_lock_wait_seconds`.
pub const MAXIMUM_LOCK_WAIT_SECONDS: &str = "GROUNDBOOK_MAXIMUM_LOCK_WAIT_SECONDS";
/// Sets `output_format`.
pub const OUTPUT_FORMAT: &str = "GROUNDBOOK_OUTPUT_FORMAT";
/// Sets `validation.phone_pattern`.
pub const PHONE_PATTERN: &str = "GROUNDBOOK_PHONE_PATTERN";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use groundbook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] naming the variable if a value
    /// cannot be parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(value) = env::var(STORE_BACKEND) {
            let backend: StoreBackend = value.parse().map_err(|message| Error::InvalidSetting {
                field: STORE_BACKEND.into(),
                message,
            })?;
            config
                .storage
                .get_or_insert_with(StorageConfig::default)
                .backend = Some(backend);
        }

        if let Ok(seconds) = env::var(MAXIMUM_LOCK_WAIT_SECONDS) {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::InvalidSetting {
                    field: MAXIMUM_LOCK_WAIT_SECONDS.into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        if let Ok(value) = env::var(OUTPUT_FORMAT) {
            let format: OutputFormat = value.parse().map_err(|message| Error::InvalidSetting {
                field: OUTPUT_FORMAT.into(),
                message,
            })?;
            config.output_format = Some(format);
        }

        if let Ok(pattern) = env::var(PHONE_PATTERN) {
            config
                .validation
                .get_or_insert_with(ValidationConfig::default)
                .phone_pattern = Some(pattern);
        }

        Ok(())
    }
}
