//! JSON-file record store: one `<collection>.json` per collection.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use fs4::fs_std::FileExt;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

use super::config::StoreConfig;
use super::{Collection, CollectionLock, RecordStore};

/// Advisory lock file in the data directory.
const LOCK_FILE_NAME: &str = ".groundbook.lock";

const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Keeps each collection in its own JSON file under a directory.
///
/// Writes land in a temporary file next to the target which is then
/// renamed over it, so a reader never sees a half-written document.
/// Writers hold an exclusive advisory lock on `.groundbook.lock` for the
/// whole read-modify-write, which serializes stores opened by other
/// threads and other processes on the same directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    busy_timeout: Duration,
}

impl JsonFileStore {
    /// Opens the store rooted at `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing and cannot be created.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.prepare_data_dir()?;
        Ok(Self {
            dir: config.data_dir.clone(),
            busy_timeout: config.busy_timeout,
        })
    }

    /// Path of the file holding `collection`.
    #[must_use]
    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.name()))
    }

    fn read_file(&self, collection: Collection) -> Result<Option<String>> {
        match fs::read_to_string(self.collection_path(collection)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_file(&self, collection: Collection, document: &str) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(document.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.collection_path(collection))
            .map_err(|e| e.error)?;
        Ok(())
    }

    /// Takes the directory's exclusive lock, retrying until the busy
    /// timeout runs out. The lock is released when the file is closed.
    fn acquire(&self) -> Result<File> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.dir.join(LOCK_FILE_NAME))?;

        let deadline = Instant::now() + self.busy_timeout;
        loop {
            if FileExt::try_lock_exclusive(&file)? {
                return Ok(file);
            }
            if Instant::now() >= deadline {
                log::debug!("Timed out waiting for {}", LOCK_FILE_NAME);
                return Err(Error::LockTimeout {
                    seconds: self.busy_timeout.as_secs(),
                });
            }
            thread::sleep(LOCK_RETRY_INTERVAL);
        }
    }
}

impl RecordStore for JsonFileStore {
    fn read(&self, collection: Collection) -> Result<Option<String>> {
        self.read_file(collection)
    }

    fn write(&self, collection: Collection, document: &str) -> Result<()> {
        let _held = self.acquire()?;
        self.write_file(collection, document)
    }

    fn lock(&self, collection: Collection) -> Result<Box<dyn CollectionLock + '_>> {
        let held = self.acquire()?;
        let current = self.read_file(collection)?;
        Ok(Box::new(JsonLock {
            store: self,
            collection,
            current,
            _held: held,
        }))
    }
}

/// A read-modify-write in progress; `_held` keeps the lock file locked.
struct JsonLock<'a> {
    store: &'a JsonFileStore,
    collection: Collection,
    current: Option<String>,
    _held: File,
}

impl CollectionLock for JsonLock<'_> {
    fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    fn commit(self: Box<Self>, document: &str) -> Result<()> {
        self.store.write_file(self.collection, document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreBackend;
    use crate::ErrorKind;
    use tempfile::tempdir;

    fn open(dir: &std::path::Path) -> JsonFileStore {
        JsonFileStore::open(&StoreConfig::new(StoreBackend::Json, dir)).unwrap()
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let store = open(dir.path());
        assert!(store.read(Collection::Venues).unwrap().is_none());
    }

    #[test]
    fn test_write_creates_named_file() {
        let dir = tempdir().unwrap();
        let store = open(dir.path());
        store.write(Collection::Bookings, "[]").unwrap();

        let path = dir.path().join("bookings.json");
        assert_eq!(fs::read_to_string(path).unwrap(), "[]");

        // Only the collection file and the lock file remain; the temporary
        // file was renamed.
        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec![LOCK_FILE_NAME.to_string(), "bookings.json".to_string()]);
    }

    #[test]
    fn test_lock_sees_current_document() {
        let dir = tempdir().unwrap();
        let store = open(dir.path());
        store.write(Collection::Venues, "[1]").unwrap();

        let lock = store.lock(Collection::Venues).unwrap();
        assert_eq!(lock.current(), Some("[1]"));
        lock.commit("[1,2]").unwrap();

        assert_eq!(store.read(Collection::Venues).unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_held_lock_times_out_other_store() {
        let dir = tempdir().unwrap();
        let first = open(dir.path());
        let mut config = StoreConfig::new(StoreBackend::Json, dir.path());
        config.busy_timeout = Duration::from_millis(50);
        let second = JsonFileStore::open(&config).unwrap();

        let held = first.lock(Collection::Bookings).unwrap();
        let err = second.write(Collection::Bookings, "[]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreFailure);
        assert!(matches!(err, Error::LockTimeout { .. }));
        assert!(second.lock(Collection::Venues).is_err());

        drop(held);
        second.write(Collection::Bookings, "[]").unwrap();
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let dir = tempdir().unwrap();
        let store = open(dir.path());
        // A directory where the file should be cannot be read as text.
        fs::create_dir(store.collection_path(Collection::Venues)).unwrap();
        assert!(store.read(Collection::Venues).is_err());
    }
}
