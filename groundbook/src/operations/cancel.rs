//! Cancellation planning.
//!
//! Cancelling is idempotent: an already-cancelled booking yields an empty
//! plan with a warning instead of an error.

use crate::booking::Booking;
use crate::error::{Error, Result};
use crate::store::{self, Collection, RecordStore};

use super::plan::{OperationPlan, PlanAction};

/// A cancellation plan generator.
pub struct CancelPlan {
    booking_id: String,
}

impl CancelPlan {
    /// Creates a planner for cancelling `booking_id`.
    #[must_use]
    pub fn new(booking_id: impl Into<String>) -> Self {
        Self {
            booking_id: booking_id.into(),
        }
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown booking, or a store error.
    pub fn build_plan(&self, store: &dyn RecordStore) -> Result<OperationPlan> {
        let id = self.booking_id.as_str();
        let bookings: Vec<Booking> = store::load(store, Collection::Bookings)?;
        let booking = bookings
            .iter()
            .find(|b| b.id() == id)
            .ok_or_else(|| Error::booking_not_found(id))?;

        let plan = OperationPlan::new(format!("Cancel booking {id}"));
        if booking.is_confirmed() {
            Ok(plan.add_action(PlanAction::CancelBooking {
                booking_id: id.to_string(),
            }))
        } else {
            Ok(plan.add_warning(format!("Booking {id} is already cancelled")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingRequest;
    use crate::store::MemoryStore;
    use crate::venue::{Venue, VenueConfig};
    use chrono::NaiveDate;

    fn stored_booking(store: &MemoryStore, cancelled: bool) -> Booking {
        let venue = Venue::new(VenueConfig::new("Arena", "Ali")).unwrap();
        let mut booking = Booking::confirmed(
            &venue,
            BookingRequest {
                customer_name: "Sara".into(),
                customer_phone: "03001234567".into(),
                customer_email: "s@example.com".into(),
                date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                start_time: 10,
                end_time: 11,
            },
        );
        if cancelled {
            booking.mark_cancelled();
        }
        store::save(store, Collection::Bookings, std::slice::from_ref(&booking)).unwrap();
        booking
    }

    #[test]
    fn test_confirmed_booking_gets_cancel_action() {
        let store = MemoryStore::new();
        let booking = stored_booking(&store, false);
        let plan = CancelPlan::new(booking.id()).build_plan(&store).unwrap();
        assert_eq!(
            plan.actions,
            vec![PlanAction::CancelBooking {
                booking_id: booking.id().to_string()
            }]
        );
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_cancelled_booking_is_a_warning() {
        let store = MemoryStore::new();
        let booking = stored_booking(&store, true);
        let plan = CancelPlan::new(booking.id()).build_plan(&store).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.warnings.len(), 1);
    }

    #[test]
    fn test_unknown_booking() {
        let store = MemoryStore::new();
        let err = CancelPlan::new("missing").build_plan(&store).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::NotFound);
    }
}
