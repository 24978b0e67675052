//! Error types for the groundbook library.
//!
//! Every fallible operation in the crate returns [`Result`], whose error
//! type is the [`Error`] enum below. Callers that only care about the broad
//! category of a failure can use [`Error::kind`].

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for operations that may fail with a groundbook error.
///
/// # Examples
///
/// ```
/// use groundbook::{Error, Result};
///
/// fn example_operation() -> Result<u8> {
///     Ok(9)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// A single broken rule, reported against the input field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleViolation {
    /// The input field the rule applies to.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl RuleViolation {
    /// Creates a new violation for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn summarize(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Broad failure categories exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced venue or booking does not exist.
    NotFound,
    /// A venue configuration breaks an invariant.
    InvalidConfig,
    /// A booking request breaks one or more input rules.
    Validation,
    /// The requested range overlaps a confirmed booking.
    SlotConflict,
    /// The underlying record store could not be read or written.
    StoreFailure,
    /// The configuration file or environment is unusable.
    Configuration,
}

/// The main error type for the groundbook library.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A venue configuration violates its invariants.
    #[error("invalid venue configuration: {}", summarize(.violations))]
    InvalidConfig {
        /// Every rule the configuration breaks.
        violations: Vec<RuleViolation>,
    },

    /// A booking request failed input validation.
    #[error("invalid booking request: {}", summarize(.violations))]
    Validation {
        /// Every rule the request breaks.
        violations: Vec<RuleViolation>,
    },

    /// The requested hours are no longer free.
    #[error("slot conflict: venue {venue_id} on {date} is not free for {start}:00-{end}:00")]
    SlotConflict {
        /// The venue the booking was requested for.
        venue_id: String,
        /// The requested date.
        date: NaiveDate,
        /// First requested hour.
        start: u8,
        /// End of the requested range (exclusive).
        end: u8,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A record could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored collection could not be decoded.
    #[error("corrupt {collection} collection: {source}")]
    CorruptCollection {
        /// Name of the collection.
        collection: String,
        /// The decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration setting is invalid.
    #[error("invalid setting '{field}': {message}")]
    InvalidSetting {
        /// The setting that failed validation.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// The store stayed locked for longer than the configured wait.
    #[error("store lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The schema version this build understands.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl Error {
    /// Returns the broad category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use groundbook::{Error, ErrorKind};
    ///
    /// let err = Error::NotFound { resource: "venue abc".into() };
    /// assert_eq!(err.kind(), ErrorKind::NotFound);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::SlotConflict { .. } => ErrorKind::SlotConflict,
            Self::Configuration(_) | Self::InvalidSetting { .. } => ErrorKind::Configuration,
            Self::Database(_)
            | Self::Serialization(_)
            | Self::CorruptCollection { .. }
            | Self::Io(_)
            | Self::LockTimeout { .. }
            | Self::UnsupportedSchemaVersion { .. } => ErrorKind::StoreFailure,
        }
    }

    /// Returns the rule violations carried by validation failures.
    ///
    /// Empty for every other error.
    #[must_use]
    pub fn violations(&self) -> &[RuleViolation] {
        match self {
            Self::InvalidConfig { violations } | Self::Validation { violations } => violations,
            _ => &[],
        }
    }

    pub(crate) fn venue_not_found(id: &str) -> Self {
        Self::NotFound {
            resource: format!("venue {id}"),
        }
    }

    pub(crate) fn booking_not_found(id: &str) -> Self {
        Self::NotFound {
            resource: format!("booking {id}"),
        }
    }
}
