//! Plan execution.
//!
//! Every write goes through [`store::modify`] on the bookings collection,
//! so the availability re-check and the commit happen under one lock.

use crate::booking::Booking;
use crate::error::{Error, Result};
use crate::registry::find_venue;
use crate::slots::{compute_slots, range_is_free};
use crate::store::{self, Collection, RecordStore};

use super::book::conflict;
use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The booking created or cancelled, as stored after execution.
    ///
    /// In dry-run mode this is the booking a create would commit.
    pub booking: Option<Booking>,
}

impl ExecutionResult {
    fn new(plan: &OperationPlan, dry_run: bool, booking: Option<Booking>) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            booking,
        }
    }
}

/// Executes operation plans against a record store.
///
/// # Examples
///
/// ```
/// use groundbook::operations::{OperationPlan, PlanExecutor};
/// use groundbook::store::MemoryStore;
///
/// let store = MemoryStore::new();
/// let plan = OperationPlan::new("Nothing to do");
///
/// let result = PlanExecutor::new(&store).dry_run().execute(&plan).unwrap();
/// assert!(result.dry_run);
/// assert!(result.actions_taken.is_empty());
/// ```
pub struct PlanExecutor<'a> {
    store: &'a dyn RecordStore,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub const fn new(store: &'a dyn RecordStore) -> Self {
        Self {
            store,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode: nothing is written.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails. A create whose hours were
    /// taken after planning fails with [`Error::SlotConflict`] and writes
    /// nothing.
    pub fn execute(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            let booking = plan.actions.iter().find_map(|action| match action {
                PlanAction::CreateBooking(b) => Some(b.clone()),
                PlanAction::CancelBooking { .. } => None,
            });
            return Ok(ExecutionResult::new(plan, true, booking));
        }

        let mut booking = None;
        for action in &plan.actions {
            booking = Some(self.execute_action(action)?);
        }
        Ok(ExecutionResult::new(plan, false, booking))
    }

    fn execute_action(&self, action: &PlanAction) -> Result<Booking> {
        match action {
            PlanAction::CreateBooking(booking) => self.commit(booking),
            PlanAction::CancelBooking { booking_id } => self.cancel_booking(booking_id),
        }
    }

    /// Commits one planned booking and returns it as stored.
    ///
    /// The venue is resolved again and the price recomputed from its
    /// current hourly rate. In dry-run mode the planned booking is returned
    /// unchanged and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the venue was deleted since planning,
    /// [`Error::SlotConflict`] if the hours were taken, or a store error.
    pub fn commit(&self, planned: &Booking) -> Result<Booking> {
        if self.dry_run {
            return Ok(planned.clone());
        }

        // The venue may have been deleted, re-timed or re-priced since planning.
        let venue_id = planned.venue_id();
        let venue = find_venue(self.store, venue_id)?
            .ok_or_else(|| Error::venue_not_found(venue_id))?;
        let booking = planned.priced_for(&venue);

        store::modify(self.store, Collection::Bookings, |bookings: &mut Vec<Booking>| {
            let slots = compute_slots(&venue, booking.date(), bookings);
            if !range_is_free(&slots, booking.start_time(), booking.end_time()) {
                return Err(conflict(
                    venue_id,
                    booking.date(),
                    booking.start_time(),
                    booking.end_time(),
                ));
            }
            bookings.push(booking.clone());
            Ok(())
        })?;

        log::info!(
            "Booked {} at venue {venue_id} on {} {}",
            booking.id(),
            booking.date(),
            booking.time_range()
        );
        Ok(booking)
    }

    fn cancel_booking(&self, booking_id: &str) -> Result<Booking> {
        let cancelled = store::modify(
            self.store,
            Collection::Bookings,
            |bookings: &mut Vec<Booking>| {
                let booking = bookings
                    .iter_mut()
                    .find(|b| b.id() == booking_id)
                    .ok_or_else(|| Error::booking_not_found(booking_id))?;
                booking.mark_cancelled();
                Ok(booking.clone())
            },
        )?;
        log::info!("Cancelled booking {booking_id}");
        Ok(cancelled)
    }
}
