//! Record store: durable storage for the venue and booking collections.
//!
//! Each collection is stored as one JSON document holding an ordered array
//! of records. Backends only move raw documents around; the typed helpers
//! [`load`], [`save`] and [`modify`] handle (de)serialization so every
//! backend shares one encoding.
//!
//! # Examples
//!
//! ```
//! use groundbook::store::{self, Collection, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let empty: Vec<String> = store::load(&store, Collection::Venues).unwrap();
//! assert!(empty.is_empty());
//!
//! store::save(&store, Collection::Venues, &["a".to_string()]).unwrap();
//! let loaded: Vec<String> = store::load(&store, Collection::Venues).unwrap();
//! assert_eq!(loaded, vec!["a".to_string()]);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

mod config;
mod json;
mod memory;
pub mod migrations;
mod schema;
mod sqlite;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{default_data_dir, resolve_data_dir, StoreBackend, StoreConfig};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// The two named collections the system persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Registered venues.
    Venues,
    /// Every booking ever made, cancelled ones included.
    Bookings,
}

impl Collection {
    /// The storage name of the collection.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Venues => "venues",
            Self::Bookings => "bookings",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exclusive hold on one collection, taken by [`RecordStore::lock`].
///
/// Dropping the hold without committing releases it and leaves the stored
/// document unchanged.
pub trait CollectionLock {
    /// The document as it was when the lock was taken.
    fn current(&self) -> Option<&str>;

    /// Replaces the document and releases the lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn commit(self: Box<Self>, document: &str) -> Result<()>;
}

/// A backend able to hold the two collections.
///
/// Implementations must make `write` and a committed [`CollectionLock`]
/// atomic from the caller's point of view: readers see either the old
/// document or the new one.
pub trait RecordStore: Send + Sync {
    /// Reads the raw document for `collection`, or `None` if never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, collection: Collection) -> Result<Option<String>>;

    /// Replaces the document for `collection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn write(&self, collection: Collection, document: &str) -> Result<()>;

    /// Takes the backend's write lock on `collection` and reads its current
    /// document. No other writer can interleave until the returned hold is
    /// committed or dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the lock is not granted within the
    /// configured wait, or a backend failure.
    fn lock(&self, collection: Collection) -> Result<Box<dyn CollectionLock + '_>>;
}

/// Opens the backend selected by `config`.
///
/// # Errors
///
/// Returns an error if the backend cannot be opened or initialized.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn RecordStore>> {
    log::debug!(
        "Opening {} store in {}",
        config.backend,
        config.data_dir.display()
    );
    Ok(match config.backend {
        StoreBackend::Sqlite => Arc::new(SqliteStore::open(config)?),
        StoreBackend::Json => Arc::new(JsonFileStore::open(config)?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    })
}

fn decode<T: DeserializeOwned>(collection: Collection, document: Option<&str>) -> Result<Vec<T>> {
    match document {
        None => Ok(Vec::new()),
        Some(text) if text.trim().is_empty() => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text).map_err(|source| Error::CorruptCollection {
            collection: collection.name().to_string(),
            source,
        }),
    }
}

/// Loads every record of `collection`. A never-written collection is empty.
///
/// # Errors
///
/// Returns an error if the backend fails or the stored document is corrupt.
pub fn load<T: DeserializeOwned>(store: &dyn RecordStore, collection: Collection) -> Result<Vec<T>> {
    decode(collection, store.read(collection)?.as_deref())
}

/// Replaces every record of `collection`.
///
/// # Errors
///
/// Returns an error if serialization or the backend write fails.
pub fn save<T: Serialize>(store: &dyn RecordStore, collection: Collection, records: &[T]) -> Result<()> {
    let document = serde_json::to_string(records)?;
    store.write(collection, &document)
}

/// Loads `collection`, lets `f` change it, and saves the result atomically.
///
/// Nothing is written if `f` returns an error.
///
/// # Errors
///
/// Returns the error from `f`, a decoding failure, or a backend failure.
pub fn modify<T, R, F>(store: &dyn RecordStore, collection: Collection, f: F) -> Result<R>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce(&mut Vec<T>) -> Result<R>,
{
    let lock = store.lock(collection)?;
    let mut records = decode::<T>(collection, lock.current())?;
    let outcome = f(&mut records)?;
    lock.commit(&serde_json::to_string(&records)?)?;
    Ok(outcome)
}
