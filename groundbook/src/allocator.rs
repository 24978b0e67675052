//! Booking allocator: create, cancel and query bookings.
//!
//! [`BookingAllocator`] is the entry point UI layers call. Each mutating
//! call builds a plan and executes it immediately; callers that want to
//! preview a change can drive [`crate::operations`] directly.

use std::sync::Arc;

use crate::booking::{Booking, BookingRequest, BookingRules};
use crate::error::{Error, Result};
use crate::operations::{BookOptions, BookPlan, CancelPlan, PlanExecutor};
use crate::store::{self, Collection, RecordStore};

/// Commits and cancels bookings against a record store.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use groundbook::store::MemoryStore;
/// use groundbook::{BookingAllocator, BookingRequest, VenueConfig, VenueRegistry};
///
/// let store = Arc::new(MemoryStore::new());
/// let venue = VenueRegistry::new(store.clone())
///     .create(VenueConfig::new("Arena", "Ali").hours(9, 22).price_per_hour(2000.0))
///     .unwrap();
///
/// let allocator = BookingAllocator::with_standard_rules(store).unwrap();
/// let booking = allocator
///     .create(
///         BookingRequest {
///             customer_name: "Sara Ahmed".into(),
///             customer_phone: "0300-1234567".into(),
///             customer_email: "sara@example.com".into(),
///             date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
///             start_time: 10,
///             end_time: 12,
///         },
///         venue.id(),
///     )
///     .unwrap();
///
/// assert_eq!(booking.total_price(), 4000.0);
/// assert_eq!(allocator.query(Some(venue.id())).unwrap().len(), 1);
/// ```
#[derive(Clone)]
pub struct BookingAllocator {
    store: Arc<dyn RecordStore>,
    rules: BookingRules,
}

impl BookingAllocator {
    /// Creates an allocator that validates requests with `rules`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, rules: BookingRules) -> Self {
        Self { store, rules }
    }

    /// Creates an allocator with the built-in validation rules.
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in patterns fail to compile.
    pub fn with_standard_rules(store: Arc<dyn RecordStore>) -> Result<Self> {
        Ok(Self::new(store, BookingRules::standard()?))
    }

    /// Validates `request` and commits it as a confirmed booking at `venue_id`.
    ///
    /// The total price uses the venue's hourly rate at commit time.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the venue does not exist
    /// - [`Error::Validation`] listing every broken input rule, including a
    ///   range outside the venue's operating hours
    /// - [`Error::SlotConflict`] if any requested hour is taken, checked
    ///   again atomically at commit time
    /// - a store error
    pub fn create(&self, request: BookingRequest, venue_id: &str) -> Result<Booking> {
        let booking = BookPlan::new(BookOptions::new(venue_id, request), &self.rules)
            .build_booking(self.store.as_ref())?;
        PlanExecutor::new(self.store.as_ref()).commit(&booking)
    }

    /// Cancels a booking and returns it as stored.
    ///
    /// Cancelling an already-cancelled booking is a successful no-op that
    /// returns the existing record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, or a store error.
    pub fn cancel(&self, booking_id: &str) -> Result<Booking> {
        let plan = CancelPlan::new(booking_id).build_plan(self.store.as_ref())?;
        if plan.is_empty() {
            for warning in &plan.warnings {
                log::warn!("{warning}");
            }
            return self.get(booking_id);
        }
        let result = PlanExecutor::new(self.store.as_ref()).execute(&plan)?;
        result
            .booking
            .ok_or_else(|| Error::booking_not_found(booking_id))
    }

    /// Returns the booking with `booking_id`, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, or a store error.
    pub fn get(&self, booking_id: &str) -> Result<Booking> {
        self.query_all(None)?
            .into_iter()
            .find(|b| b.id() == booking_id)
            .ok_or_else(|| Error::booking_not_found(booking_id))
    }

    /// Returns confirmed bookings, optionally only those for `venue_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn query(&self, venue_id: Option<&str>) -> Result<Vec<Booking>> {
        Ok(self
            .query_all(venue_id)?
            .into_iter()
            .filter(Booking::is_confirmed)
            .collect())
    }

    /// Returns every booking, cancelled ones included, optionally only those
    /// for `venue_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn query_all(&self, venue_id: Option<&str>) -> Result<Vec<Booking>> {
        let bookings: Vec<Booking> = store::load(self.store.as_ref(), Collection::Bookings)?;
        Ok(match venue_id {
            Some(id) => bookings.into_iter().filter(|b| b.venue_id() == id).collect(),
            None => bookings,
        })
    }
}
