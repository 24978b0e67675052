#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # groundbook
//!
//! A library for managing bookable sports venues and hourly bookings.
//!
//! Venue owners register grounds with operating hours and an hourly price;
//! customers book contiguous whole-hour ranges on a date. The library keeps
//! confirmed bookings from overlapping, even when several writers race.
//!
//! ## Core Types
//!
//! - [`VenueRegistry`] and [`Venue`]: venue records and their CRUD
//! - [`SlotEngine`] and [`Slot`]: per-hour availability
//! - [`BookingAllocator`] and [`Booking`]: validated, conflict-free bookings
//! - [`Reporting`]: derived statistics
//! - [`store::RecordStore`]: the persistence seam (`SQLite`, JSON files, memory)
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use groundbook::store::MemoryStore;
//! use groundbook::{BookingAllocator, BookingRequest, SlotEngine, VenueConfig, VenueRegistry};
//!
//! let store = Arc::new(MemoryStore::new());
//! let venue = VenueRegistry::new(store.clone())
//!     .create(VenueConfig::new("Model Town Ground", "Ahmed").hours(16, 23))
//!     .unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! BookingAllocator::with_standard_rules(store.clone())
//!     .unwrap()
//!     .create(
//!         BookingRequest {
//!             customer_name: "Sara Ahmed".into(),
//!             customer_phone: "03001234567".into(),
//!             customer_email: "sara@example.com".into(),
//!             date,
//!             start_time: 18,
//!             end_time: 20,
//!         },
//!         venue.id(),
//!     )
//!     .unwrap();
//!
//! let engine = SlotEngine::new(store);
//! assert!(!engine.is_range_available(venue.id(), date, 19, 21).unwrap());
//! assert!(engine.is_range_available(venue.id(), date, 20, 22).unwrap());
//! ```

pub mod allocator;
pub mod booking;
pub mod config;
pub mod error;
pub mod hours;
pub mod logging;
pub mod operations;
pub mod registry;
pub mod reporting;
pub mod slots;
pub mod store;
pub mod venue;

// Re-export key types at crate root for convenience
pub use allocator::BookingAllocator;
pub use booking::{Booking, BookingRequest, BookingRules, BookingStatus};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, ErrorKind, Result, RuleViolation};
pub use hours::OperatingHours;
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    BookOptions, BookPlan, CancelPlan, ExecutionResult, OperationPlan, PlanAction, PlanExecutor,
};
pub use registry::VenueRegistry;
pub use reporting::Reporting;
pub use slots::{Slot, SlotEngine};
pub use venue::{Venue, VenueConfig, VenuePatch, VenueType};
