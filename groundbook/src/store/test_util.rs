//! Shared helpers for store-backed unit tests.

use std::sync::Arc;

use tempfile::tempdir;

use crate::store::{RecordStore, SqliteStore, StoreBackend, StoreConfig};

/// Opens a `SQLite` store in a temporary directory that outlives the test.
///
/// # Panics
///
/// Panics if the directory or database cannot be created.
#[must_use]
pub fn create_test_store() -> Arc<dyn RecordStore> {
    let dir = tempdir().unwrap();
    let config = StoreConfig::new(StoreBackend::Sqlite, dir.path());
    let store = SqliteStore::open(&config).unwrap();

    // Keep the directory alive for the rest of the test process.
    std::mem::forget(dir);

    Arc::new(store)
}
