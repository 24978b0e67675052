//! Booking operation planning.
//!
//! Planning resolves the venue, validates the request and pre-checks the
//! requested hours. It never writes; the executor repeats the availability
//! check atomically when it commits.

use chrono::NaiveDate;

use crate::booking::{Booking, BookingRequest, BookingRules};
use crate::error::{Error, Result};
use crate::registry::find_venue;
use crate::slots::{compute_slots, range_is_free};
use crate::store::{self, Collection, RecordStore};
use crate::venue::Venue;

use super::plan::{OperationPlan, PlanAction};

/// Parameters of a booking operation.
#[derive(Debug, Clone)]
pub struct BookOptions {
    /// The venue to book.
    pub venue_id: String,

    /// What the customer asked for.
    pub request: BookingRequest,
}

impl BookOptions {
    /// Creates booking options.
    #[must_use]
    pub fn new(venue_id: impl Into<String>, request: BookingRequest) -> Self {
        Self {
            venue_id: venue_id.into(),
            request,
        }
    }
}

/// A booking plan generator.
pub struct BookPlan<'a> {
    options: BookOptions,
    rules: &'a BookingRules,
}

impl<'a> BookPlan<'a> {
    /// Creates a planner that validates requests with `rules`.
    #[must_use]
    pub const fn new(options: BookOptions, rules: &'a BookingRules) -> Self {
        Self { options, rules }
    }

    /// Builds the plan for this booking request.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The venue does not exist ([`Error::NotFound`])
    /// - The request breaks any input rule or falls outside the venue's
    ///   operating hours ([`Error::Validation`], listing every problem)
    /// - Any requested hour is already booked ([`Error::SlotConflict`])
    /// - The store cannot be read
    pub fn build_plan(&self, store: &dyn RecordStore) -> Result<OperationPlan> {
        let (venue, booking) = self.prepare(store)?;
        let plan = OperationPlan::new(format!(
            "Book {} on {} {}",
            venue.name(),
            booking.date(),
            booking.time_range()
        ))
        .add_action(PlanAction::CreateBooking(booking));

        Ok(plan)
    }

    /// Runs the same checks as [`build_plan`](Self::build_plan) and returns
    /// the booking the plan would commit.
    ///
    /// # Errors
    ///
    /// Same as [`build_plan`](Self::build_plan).
    pub fn build_booking(&self, store: &dyn RecordStore) -> Result<Booking> {
        self.prepare(store).map(|(_, booking)| booking)
    }

    fn prepare(&self, store: &dyn RecordStore) -> Result<(Venue, Booking)> {
        let BookOptions { venue_id, request } = &self.options;

        let venue = find_venue(store, venue_id)?.ok_or_else(|| Error::venue_not_found(venue_id))?;

        let violations = self.rules.validate_for(&venue, request);
        if !violations.is_empty() {
            log::debug!(
                "Booking request for {venue_id} rejected with {} violation(s)",
                violations.len()
            );
            return Err(Error::Validation { violations });
        }

        let bookings: Vec<Booking> = store::load(store, Collection::Bookings)?;
        let slots = compute_slots(&venue, request.date, &bookings);
        if !range_is_free(&slots, request.start_time, request.end_time) {
            return Err(conflict(venue_id, request.date, request.start_time, request.end_time));
        }

        let booking = Booking::confirmed(&venue, request.clone());
        Ok((venue, booking))
    }
}

pub(crate) fn conflict(venue_id: &str, date: NaiveDate, start: u8, end: u8) -> Error {
    log::warn!("Hours {start}-{end} on {date} at venue {venue_id} are not free");
    Error::SlotConflict {
        venue_id: venue_id.to_string(),
        date,
        start,
        end,
    }
}
