//! Store selection and connection parameters.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name of the `SQLite` database inside the data directory.
pub(crate) const DATABASE_FILE: &str = "groundbook.db";

/// Which backend holds the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// A single `SQLite` database file.
    #[default]
    Sqlite,
    /// One JSON file per collection.
    Json,
    /// Process memory only.
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Json => write!(f, "json"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "json" => Ok(Self::Json),
            "memory" => Ok(Self::Memory),
            _ => Err(format!("unknown store backend: {s}")),
        }
    }
}

/// Parameters for opening a store.
///
/// # Examples
///
/// ```
/// use groundbook::store::{StoreBackend, StoreConfig};
/// use std::time::Duration;
///
/// let config = StoreConfig::new(StoreBackend::Sqlite, "/tmp/groundbook")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert!(config.database_path().ends_with("groundbook.db"));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// The backend to open.
    pub backend: StoreBackend,
    /// Directory holding the store's files.
    pub data_dir: PathBuf,
    /// How long to wait for another writer before giving up.
    pub busy_timeout: Duration,
    /// Whether to create the data directory if missing.
    pub auto_create: bool,
}

impl StoreConfig {
    /// Creates a config with a 5 second busy timeout and auto-creation on.
    #[must_use]
    pub fn new(backend: StoreBackend, data_dir: impl AsRef<Path>) -> Self {
        Self {
            backend,
            data_dir: data_dir.as_ref().to_path_buf(),
            busy_timeout: Duration::from_secs(5),
            auto_create: true,
        }
    }

    /// Sets the busy timeout.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Disables creation of a missing data directory.
    #[must_use]
    pub const fn without_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }

    /// Path of the `SQLite` database file.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub(crate) fn prepare_data_dir(&self) -> Result<()> {
        if self.data_dir.is_dir() {
            return Ok(());
        }
        if self.auto_create {
            std::fs::create_dir_all(&self.data_dir)?;
            Ok(())
        } else {
            Err(Error::NotFound {
                resource: format!("data directory {}", self.data_dir.display()),
            })
        }
    }
}

/// Returns `~/.groundbook`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".groundbook"))
        .ok_or_else(|| Error::InvalidSetting {
            field: "data_dir".into(),
            message: "cannot determine home directory".into(),
        })
}

/// Resolves the data directory: `$GROUNDBOOK_DATA_DIR` if set, otherwise
/// [`default_data_dir`].
///
/// # Errors
///
/// Returns an error if neither source yields a directory.
pub fn resolve_data_dir() -> Result<PathBuf> {
    match std::env::var("GROUNDBOOK_DATA_DIR") {
        Ok(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}
