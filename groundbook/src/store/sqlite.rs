//! `SQLite`-backed record store.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, OpenFlags, OptionalExtension, TransactionBehavior};

use crate::error::{Error, Result};

use super::config::StoreConfig;
use super::migrations::check_schema_compatibility;
use super::schema::{SELECT_DOCUMENT, UPSERT_DOCUMENT};
use super::{Collection, CollectionLock, RecordStore};

/// Stores each collection as one row of a `SQLite` database.
///
/// The connection runs in WAL mode with a busy timeout, and every write
/// happens inside an `IMMEDIATE` transaction, so concurrent writers from
/// other processes are serialized by the database lock.
///
/// # Examples
///
/// ```no_run
/// use groundbook::store::{SqliteStore, StoreBackend, StoreConfig};
///
/// let config = StoreConfig::new(StoreBackend::Sqlite, "/tmp/groundbook");
/// let store = SqliteStore::open(&config).unwrap();
/// ```
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
    busy_timeout: Duration,
}

impl SqliteStore {
    /// Opens (creating if allowed) the database in `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The data directory is missing and auto-creation is off
    /// - The database cannot be opened or configured
    /// - The stored schema version is not supported
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.prepare_data_dir()?;

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let mut conn = Connection::open_with_flags(config.database_path(), flags)?;

        conn.busy_timeout(config.busy_timeout)?;
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| lock_error(e, config.busy_timeout))?;
        check_schema_compatibility(&tx)?;
        tx.commit()?;

        Ok(Self {
            conn: Mutex::new(conn),
            busy_timeout: config.busy_timeout,
        })
    }

    fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn lock_error(err: rusqlite::Error, timeout: Duration) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if matches!(
                failure.code,
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
            ) =>
        {
            Error::LockTimeout {
                seconds: timeout.as_secs(),
            }
        }
        other => Error::Database(other),
    }
}

impl RecordStore for SqliteStore {
    fn read(&self, collection: Collection) -> Result<Option<String>> {
        let conn = self.connection();
        conn.query_row(SELECT_DOCUMENT, [collection.name()], |row| row.get(0))
            .optional()
            .map_err(|e| lock_error(e, self.busy_timeout))
    }

    fn write(&self, collection: Collection, document: &str) -> Result<()> {
        self.lock(collection)?.commit(document)
    }

    fn lock(&self, collection: Collection) -> Result<Box<dyn CollectionLock + '_>> {
        let conn = self.connection();
        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| lock_error(e, self.busy_timeout))?;

        let mut lock = SqliteLock {
            conn,
            collection,
            current: None,
            busy_timeout: self.busy_timeout,
        };
        // Dropping `lock` on error rolls the transaction back.
        lock.current = lock
            .conn
            .query_row(SELECT_DOCUMENT, [collection.name()], |row| row.get(0))
            .optional()?;
        Ok(Box::new(lock))
    }
}

/// An open `IMMEDIATE` transaction on the store's connection.
struct SqliteLock<'a> {
    conn: MutexGuard<'a, Connection>,
    collection: Collection,
    current: Option<String>,
    busy_timeout: Duration,
}

impl CollectionLock for SqliteLock<'_> {
    fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    fn commit(self: Box<Self>, document: &str) -> Result<()> {
        self.conn.execute(
            UPSERT_DOCUMENT,
            params![self.collection.name(), document, Utc::now().to_rfc3339()],
        )?;
        self.conn
            .execute_batch("COMMIT")
            .map_err(|e| lock_error(e, self.busy_timeout))
    }
}

impl Drop for SqliteLock<'_> {
    fn drop(&mut self) {
        if self.conn.is_autocommit() {
            return;
        }
        if let Err(e) = self.conn.execute_batch("ROLLBACK") {
            log::warn!("Failed to roll back {} update: {e}", self.collection);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreBackend;
    use tempfile::tempdir;

    fn config(dir: &std::path::Path) -> StoreConfig {
        StoreConfig::new(StoreBackend::Sqlite, dir)
    }

    #[test]
    fn test_open_creates_database_in_wal_mode() {
        let dir = tempdir().unwrap();
        let cfg = config(&dir.path().join("nested"));
        let store = SqliteStore::open(&cfg).unwrap();
        assert!(cfg.database_path().exists());

        let mode: String = store
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_read_missing_collection() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(&config(dir.path())).unwrap();
        assert!(store.read(Collection::Bookings).unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(&config(dir.path())).unwrap();
        store.write(Collection::Venues, "[1,2]").unwrap();
        store.write(Collection::Venues, "[3]").unwrap();
        assert_eq!(store.read(Collection::Venues).unwrap().as_deref(), Some("[3]"));
        assert!(store.read(Collection::Bookings).unwrap().is_none());
    }

    #[test]
    fn test_dropped_lock_rolls_back() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(&config(dir.path())).unwrap();
        store.write(Collection::Bookings, "[]").unwrap();

        {
            let lock = store.lock(Collection::Bookings).unwrap();
            assert_eq!(lock.current(), Some("[]"));
        }
        assert_eq!(store.read(Collection::Bookings).unwrap().as_deref(), Some("[]"));

        // The connection is usable again after the rollback.
        store.write(Collection::Bookings, "[1]").unwrap();
        assert_eq!(store.read(Collection::Bookings).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = SqliteStore::open(&config(dir.path())).unwrap();
            store.write(Collection::Venues, "[\"kept\"]").unwrap();
        }
        let store = SqliteStore::open(&config(dir.path())).unwrap();
        assert_eq!(
            store.read(Collection::Venues).unwrap().as_deref(),
            Some("[\"kept\"]")
        );
    }

    #[test]
    fn test_lock_error_mapping() {
        let busy = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        match lock_error(busy, Duration::from_secs(3)) {
            Error::LockTimeout { seconds } => assert_eq!(seconds, 3),
            other => panic!("expected lock timeout, got {other:?}"),
        }
    }
}
