//! Configuration schema definitions.
//!
//! Every field is optional so that layers can be merged; the accessor
//! methods on [`Config`] fill in built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::booking::{BookingRules, DEFAULT_PHONE_PATTERN};
use crate::error::Result;
use crate::store::{StoreBackend, StoreConfig};

/// Lock wait used when no layer sets `maximum_lock_wait_seconds`.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use groundbook::config::{Config, OutputFormat};
///
/// let config: Config = serde_yaml::from_str("output_format: json\n").unwrap();
/// assert_eq!(config.output_format(), OutputFormat::Json);
/// assert_eq!(config.lock_wait().as_secs(), 5);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where and how records are stored.
    pub storage: Option<StorageConfig>,

    /// Maximum time to wait for the store lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Default output format for list commands.
    pub output_format: Option<OutputFormat>,

    /// Booking input rules.
    pub validation: Option<ValidationConfig>,
}

/// Storage settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Backend holding the collections.
    pub backend: Option<StoreBackend>,

    /// Directory for the store's files, if not the data directory.
    pub path: Option<PathBuf>,
}

/// Booking validation settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Regular expression customer phone numbers must match.
    pub phone_pattern: Option<String>,
}

impl Config {
    /// The configured backend, `sqlite` by default.
    #[must_use]
    pub fn backend(&self) -> StoreBackend {
        self.storage
            .as_ref()
            .and_then(|s| s.backend)
            .unwrap_or_default()
    }

    /// The configured lock wait.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// The configured output format, `table` by default.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    /// The configured phone pattern.
    #[must_use]
    pub fn phone_pattern(&self) -> &str {
        self.validation
            .as_ref()
            .and_then(|v| v.phone_pattern.as_deref())
            .unwrap_or(DEFAULT_PHONE_PATTERN)
    }

    /// Store parameters, using `data_dir` unless `storage.path` is set.
    #[must_use]
    pub fn store_config(&self, data_dir: &Path) -> StoreConfig {
        let dir = self
            .storage
            .as_ref()
            .and_then(|s| s.path.clone())
            .unwrap_or_else(|| data_dir.to_path_buf());
        StoreConfig::new(self.backend(), dir).with_busy_timeout(self.lock_wait())
    }

    /// Compiles the booking rules this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidSetting`] if the phone pattern does
    /// not compile.
    pub fn booking_rules(&self) -> Result<BookingRules> {
        BookingRules::new(self.phone_pattern())
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use groundbook::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    #[default]
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "table" => Ok(Self::Table),
            _ => Err(format!("unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.storage.is_none());
        assert_eq!(config.backend(), StoreBackend::Sqlite);
        assert_eq!(config.output_format(), OutputFormat::Table);
        assert_eq!(config.phone_pattern(), DEFAULT_PHONE_PATTERN);
        assert_eq!(config.lock_wait(), Duration::from_secs(5));
    }

    #[test]
    fn test_full_config() {
        let yaml = r"
storage:
  backend: json
  path: /srv/groundbook
maximum_lock_wait_seconds: 12
output_format: csv
validation:
  phone_pattern: '^[0-9]+$'
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.backend(), StoreBackend::Json);
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert_eq!(config.phone_pattern(), "^[0-9]+$");

        let store = config.store_config(Path::new("/ignored"));
        assert_eq!(store.data_dir, PathBuf::from("/srv/groundbook"));
        assert_eq!(store.busy_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_store_config_uses_data_dir_by_default() {
        let store = Config::default().store_config(Path::new("/data"));
        assert_eq!(store.data_dir, PathBuf::from("/data"));
        assert_eq!(store.backend, StoreBackend::Sqlite);
    }

    #[test]
    fn test_output_format_serde() {
        let format: OutputFormat = serde_yaml::from_str("tsv").unwrap();
        assert_eq!(format, OutputFormat::Tsv);
        assert!(serde_yaml::to_string(&format).unwrap().contains("tsv"));
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_config_deny_unknown_fields() {
        let yaml = "output_format: json\nunknown_field: value\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());

        let yaml = "storage:\n  engine: sqlite\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_booking_rules_from_config() {
        let config = Config {
            validation: Some(ValidationConfig {
                phone_pattern: Some("^[0-9]{4}$".into()),
            }),
            ..Config::default()
        };
        let rules = config.booking_rules().unwrap();
        assert!(rules.is_valid_phone("1234"));
        assert!(!rules.is_valid_phone("03001234567"));
    }
}
