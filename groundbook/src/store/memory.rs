//! In-memory record store for tests and embedding.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::Result;

use super::{Collection, CollectionLock, RecordStore};

type Documents = HashMap<Collection, String>;

/// Keeps documents in a mutex-guarded map. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<Documents>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn documents(&self) -> MutexGuard<'_, Documents> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordStore for MemoryStore {
    fn read(&self, collection: Collection) -> Result<Option<String>> {
        Ok(self.documents().get(&collection).cloned())
    }

    fn write(&self, collection: Collection, document: &str) -> Result<()> {
        self.documents().insert(collection, document.to_string());
        Ok(())
    }

    fn lock(&self, collection: Collection) -> Result<Box<dyn CollectionLock + '_>> {
        Ok(Box::new(MemoryLock {
            documents: self.documents(),
            collection,
        }))
    }
}

/// Holds the map's mutex for the whole read-modify-write.
struct MemoryLock<'a> {
    documents: MutexGuard<'a, Documents>,
    collection: Collection,
}

impl CollectionLock for MemoryLock<'_> {
    fn current(&self) -> Option<&str> {
        self.documents.get(&self.collection).map(String::as_str)
    }

    fn commit(mut self: Box<Self>, document: &str) -> Result<()> {
        let collection = self.collection;
        self.documents.insert(collection, document.to_string());
        Ok(())
    }
}
