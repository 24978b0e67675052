//! Common test utilities for integration tests.
//!
//! Fixture builders for booking requests plus helpers that open each store
//! backend in a temporary directory.

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use groundbook::store::{JsonFileStore, RecordStore, SqliteStore, StoreBackend, StoreConfig};
use groundbook::{BookingAllocator, BookingRequest, Venue, VenueConfig, VenueRegistry};

/// The date most scenarios book on.
#[allow(dead_code)]
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// Opens a `SQLite` store in a fresh temporary directory.
///
/// The directory lives as long as the returned `TempDir`.
#[allow(dead_code)]
pub fn sqlite_store() -> (TempDir, Arc<dyn RecordStore>) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(&StoreConfig::new(StoreBackend::Sqlite, dir.path())).unwrap();
    (dir, Arc::new(store))
}

/// Opens a JSON file store in a fresh temporary directory.
#[allow(dead_code)]
pub fn json_store() -> (TempDir, Arc<dyn RecordStore>) {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(&StoreConfig::new(StoreBackend::Json, dir.path())).unwrap();
    (dir, Arc::new(store))
}

/// Registry, allocator and one venue open 09:00-22:00 at 2000/hour.
#[allow(dead_code)]
pub struct Ground {
    pub store: Arc<dyn RecordStore>,
    pub registry: VenueRegistry,
    pub allocator: BookingAllocator,
    pub venue: Venue,
}

impl Ground {
    /// Registers the standard venue in `store`.
    #[allow(dead_code)]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let registry = VenueRegistry::new(Arc::clone(&store));
        let venue = registry
            .create(
                VenueConfig::new("City Arena", "Ali Khan")
                    .hours(9, 22)
                    .price_per_hour(2000.0),
            )
            .unwrap();
        let allocator = BookingAllocator::with_standard_rules(Arc::clone(&store)).unwrap();
        Self {
            store,
            registry,
            allocator,
            venue,
        }
    }
}

/// Builder for booking requests with valid defaults.
///
/// Defaults: "Sara Ahmed", "0300-1234567", "sara@example.com", on
/// [`test_date`], 10:00-12:00.
#[allow(dead_code)]
pub struct RequestFixture {
    request: BookingRequest,
}

#[allow(dead_code)]
impl RequestFixture {
    pub fn new() -> Self {
        Self {
            request: BookingRequest {
                customer_name: "Sara Ahmed".into(),
                customer_phone: "0300-1234567".into(),
                customer_email: "sara@example.com".into(),
                date: test_date(),
                start_time: 10,
                end_time: 12,
            },
        }
    }

    pub fn hours(mut self, start: u8, end: u8) -> Self {
        self.request.start_time = start;
        self.request.end_time = end;
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.request.date = date;
        self
    }

    pub fn customer(mut self, name: &str) -> Self {
        self.request.customer_name = name.into();
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.request.customer_phone = phone.into();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.request.customer_email = email.into();
        self
    }

    pub fn build(self) -> BookingRequest {
        self.request
    }
}

impl Default for RequestFixture {
    fn default() -> Self {
        Self::new()
    }
}
