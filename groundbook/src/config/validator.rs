//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use groundbook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] for the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::InvalidSetting {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        if let Some(ref storage) = config.storage {
            if let Some(ref path) = storage.path {
                if path.as_os_str().is_empty() {
                    return Err(Error::InvalidSetting {
                        field: "storage.path".into(),
                        message: "Cannot be empty".into(),
                    });
                }
            }
        }

        if let Some(pattern) = config
            .validation
            .as_ref()
            .and_then(|v| v.phone_pattern.as_deref())
        {
            Self::validate_pattern("validation.phone_pattern", pattern)?;
        }

        Ok(())
    }

    fn validate_pattern(field: &str, pattern: &str) -> Result<()> {
        if pattern.trim().is_empty() {
            return Err(Error::InvalidSetting {
                field: field.into(),
                message: "Cannot be empty".into(),
            });
        }
        Regex::new(pattern).map_err(|e| Error::InvalidSetting {
            field: field.into(),
            message: format!("Invalid regular expression: {e}"),
        })?;
        Ok(())
    }
}
