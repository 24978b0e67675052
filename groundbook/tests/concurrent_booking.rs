//! Races between concurrent `create` calls.
//!
//! Whatever the interleaving, overlapping requests must never both commit.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use common::{json_store, sqlite_store, test_date, Ground, RequestFixture};
use groundbook::store::{JsonFileStore, RecordStore, SqliteStore, StoreBackend, StoreConfig};
use groundbook::{BookingAllocator, ErrorKind, SlotEngine};

const RACERS: usize = 8;

/// Runs `RACERS` threads that all try to book 10:00-12:00 at once and
/// returns how many succeeded.
fn race_same_range(allocators: Vec<BookingAllocator>, venue_id: &str) -> usize {
    let barrier = Arc::new(Barrier::new(allocators.len()));
    let handles: Vec<_> = allocators
        .into_iter()
        .enumerate()
        .map(|(i, allocator)| {
            let barrier = Arc::clone(&barrier);
            let venue_id = venue_id.to_string();
            thread::spawn(move || {
                let request = RequestFixture::new()
                    .customer(&format!("Customer {i}"))
                    .hours(10, 12)
                    .build();
                barrier.wait();
                allocator.create(request, &venue_id)
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(_) => successes += 1,
            Err(err) => assert_eq!(err.kind(), ErrorKind::SlotConflict, "{err}"),
        }
    }
    successes
}

fn assert_single_winner(store: &Arc<dyn RecordStore>, ground: &Ground, successes: usize) {
    assert_eq!(successes, 1);
    assert_eq!(ground.allocator.query(None).unwrap().len(), 1);
    let slots = SlotEngine::new(Arc::clone(store))
        .availability(ground.venue.id(), test_date())
        .unwrap();
    assert_eq!(slots.iter().filter(|s| s.booked).count(), 2);
}

#[test]
fn test_shared_sqlite_store_single_winner() {
    let (_dir, store) = sqlite_store();
    let ground = Ground::new(Arc::clone(&store));
    let allocators = vec![ground.allocator.clone(); RACERS];

    let successes = race_same_range(allocators, ground.venue.id());
    assert_single_winner(&store, &ground, successes);
}

#[test]
fn test_shared_json_store_single_winner() {
    let (_dir, store) = json_store();
    let ground = Ground::new(Arc::clone(&store));
    let allocators = vec![ground.allocator.clone(); RACERS];

    let successes = race_same_range(allocators, ground.venue.id());
    assert_single_winner(&store, &ground, successes);
}

#[test]
fn test_separate_sqlite_connections_single_winner() {
    let (dir, store) = sqlite_store();
    let ground = Ground::new(Arc::clone(&store));

    // One connection per racer, as separate processes would have.
    let allocators: Vec<BookingAllocator> = (0..RACERS)
        .map(|_| {
            let own: Arc<dyn RecordStore> = Arc::new(
                SqliteStore::open(&StoreConfig::new(StoreBackend::Sqlite, dir.path())).unwrap(),
            );
            BookingAllocator::with_standard_rules(own).unwrap()
        })
        .collect();

    let successes = race_same_range(allocators, ground.venue.id());
    assert_single_winner(&store, &ground, successes);
}

#[test]
fn test_separate_json_stores_single_winner() {
    let (dir, store) = json_store();
    let ground = Ground::new(Arc::clone(&store));

    // Independent stores on one directory share only the lock file.
    let allocators: Vec<BookingAllocator> = (0..RACERS)
        .map(|_| {
            let own: Arc<dyn RecordStore> = Arc::new(
                JsonFileStore::open(&StoreConfig::new(StoreBackend::Json, dir.path())).unwrap(),
            );
            BookingAllocator::with_standard_rules(own).unwrap()
        })
        .collect();

    let successes = race_same_range(allocators, ground.venue.id());
    assert_single_winner(&store, &ground, successes);
}

#[test]
fn test_separate_json_stores_lose_no_updates() {
    let (dir, store) = json_store();
    let ground = Ground::new(Arc::clone(&store));
    let barrier = Arc::new(Barrier::new(13));

    let handles: Vec<_> = (9u8..22)
        .map(|hour| {
            let own: Arc<dyn RecordStore> = Arc::new(
                JsonFileStore::open(&StoreConfig::new(StoreBackend::Json, dir.path())).unwrap(),
            );
            let allocator = BookingAllocator::with_standard_rules(own).unwrap();
            let barrier = Arc::clone(&barrier);
            let venue_id = ground.venue.id().to_string();
            thread::spawn(move || {
                let request = RequestFixture::new().hours(hour, hour + 1).build();
                barrier.wait();
                allocator.create(request, &venue_id)
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert_eq!(ground.allocator.query(None).unwrap().len(), 13);
}

#[test]
fn test_disjoint_ranges_all_commit() {
    let (_dir, store) = sqlite_store();
    let ground = Ground::new(Arc::clone(&store));
    let barrier = Arc::new(Barrier::new(13));

    let handles: Vec<_> = (9u8..22)
        .map(|hour| {
            let allocator = ground.allocator.clone();
            let barrier = Arc::clone(&barrier);
            let venue_id = ground.venue.id().to_string();
            thread::spawn(move || {
                let request = RequestFixture::new().hours(hour, hour + 1).build();
                barrier.wait();
                allocator.create(request, &venue_id)
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    // No lost updates: all 13 bookings are stored and the day is full.
    assert_eq!(ground.allocator.query(None).unwrap().len(), 13);
    let slots = SlotEngine::new(store)
        .availability(ground.venue.id(), test_date())
        .unwrap();
    assert!(slots.iter().all(|s| s.booked));
}

#[test]
fn test_cancel_racing_create_loses_nothing() {
    let (_dir, store) = sqlite_store();
    let ground = Ground::new(Arc::clone(&store));
    let existing = ground
        .allocator
        .create(RequestFixture::new().hours(9, 10).build(), ground.venue.id())
        .unwrap();

    let barrier = Arc::new(Barrier::new(2));
    let cancel = {
        let allocator = ground.allocator.clone();
        let barrier = Arc::clone(&barrier);
        let id = existing.id().to_string();
        thread::spawn(move || {
            barrier.wait();
            allocator.cancel(&id)
        })
    };
    let create = {
        let allocator = ground.allocator.clone();
        let barrier = Arc::clone(&barrier);
        let venue_id = ground.venue.id().to_string();
        thread::spawn(move || {
            barrier.wait();
            allocator.create(RequestFixture::new().hours(15, 16).build(), &venue_id)
        })
    };

    cancel.join().unwrap().unwrap();
    let created = create.join().unwrap().unwrap();

    let all = ground.allocator.query_all(None).unwrap();
    assert_eq!(all.len(), 2);
    let confirmed = ground.allocator.query(None).unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].id(), created.id());
}
