//! Per-hour availability of a venue on a date.
//!
//! The pure functions here ([`compute_slots`], [`range_is_free`],
//! [`free_blocks`]) work on in-memory records. [`SlotEngine`] wraps them
//! with store access so callers only need a venue id and a date.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::booking::Booking;
use crate::error::Result;
use crate::registry::VenueRegistry;
use crate::store::{self, Collection, RecordStore};
use crate::venue::Venue;

#[cfg(test)]
mod proptests;

/// One bookable hour of a venue on one date.
///
/// `booked` and `available` are always opposite; `booking_id` is set
/// exactly when the hour is booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Start of the hour on a 24-hour clock.
    pub hour: u8,
    /// Whether the hour can still be booked.
    pub available: bool,
    /// Whether a confirmed booking holds the hour.
    pub booked: bool,
    /// The first confirmed booking found holding the hour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
}

impl Slot {
    fn free(hour: u8) -> Self {
        Self {
            hour,
            available: true,
            booked: false,
            booking_id: None,
        }
    }

    fn taken(hour: u8, booking_id: &str) -> Self {
        Self {
            hour,
            available: false,
            booked: true,
            booking_id: Some(booking_id.to_string()),
        }
    }
}

/// Computes one slot per operating hour of `venue` on `date`.
///
/// Only confirmed bookings for this venue and date are considered; any
/// others in `bookings` are ignored.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use groundbook::slots::compute_slots;
/// use groundbook::{Venue, VenueConfig};
///
/// let venue = Venue::new(VenueConfig::new("Arena", "Ali").hours(9, 12)).unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let slots = compute_slots(&venue, date, &[]);
///
/// assert_eq!(slots.iter().map(|s| s.hour).collect::<Vec<_>>(), vec![9, 10, 11]);
/// assert!(slots.iter().all(|s| s.available));
/// ```
#[must_use]
pub fn compute_slots(venue: &Venue, date: NaiveDate, bookings: &[Booking]) -> Vec<Slot> {
    let day: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.is_confirmed() && b.venue_id() == venue.id() && b.date() == date)
        .collect();

    venue
        .operating_hours()
        .hours()
        .map(|hour| match day.iter().find(|b| b.occupies(hour)) {
            Some(booking) => Slot::taken(hour, booking.id()),
            None => Slot::free(hour),
        })
        .collect()
}

/// Returns `true` if every hour in `[start, end)` has an available slot.
///
/// An hour with no slot at all (outside operating hours) counts as
/// unavailable. An empty range is trivially free; callers reject those
/// before asking.
#[must_use]
pub fn range_is_free(slots: &[Slot], start: u8, end: u8) -> bool {
    (start..end).all(|hour| {
        slots
            .iter()
            .find(|slot| slot.hour == hour)
            .is_some_and(|slot| slot.available)
    })
}

/// Groups available slots into maximal contiguous `[start, end)` blocks.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use groundbook::slots::{compute_slots, free_blocks};
/// use groundbook::{Venue, VenueConfig};
///
/// let venue = Venue::new(VenueConfig::new("Arena", "Ali").hours(9, 22)).unwrap();
/// let slots = compute_slots(&venue, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), &[]);
/// assert_eq!(free_blocks(&slots), vec![(9, 22)]);
/// ```
#[must_use]
pub fn free_blocks(slots: &[Slot]) -> Vec<(u8, u8)> {
    let mut blocks: Vec<(u8, u8)> = Vec::new();
    for slot in slots.iter().filter(|slot| slot.available) {
        match blocks.last_mut() {
            Some((_, end)) if *end == slot.hour => *end = slot.hour + 1,
            _ => blocks.push((slot.hour, slot.hour + 1)),
        }
    }
    blocks
}

/// Store-backed availability queries.
#[derive(Clone)]
pub struct SlotEngine {
    store: Arc<dyn RecordStore>,
    venues: VenueRegistry,
}

impl SlotEngine {
    /// Creates an engine reading from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            venues: VenueRegistry::new(Arc::clone(&store)),
            store,
        }
    }

    /// Returns the slots of `venue_id` on `date`.
    ///
    /// An unknown venue yields an empty list rather than an error, so
    /// callers must not read "no slots" as "fully booked".
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn availability(&self, venue_id: &str, date: NaiveDate) -> Result<Vec<Slot>> {
        let Some(venue) = self.venues.find(venue_id)? else {
            log::debug!("No venue {venue_id}; returning no slots");
            return Ok(Vec::new());
        };
        let bookings: Vec<Booking> = store::load(self.store.as_ref(), Collection::Bookings)?;
        Ok(compute_slots(&venue, date, &bookings))
    }

    /// Returns `true` if every hour of `[start, end)` is free on `date`.
    ///
    /// Fails closed: hours outside operating hours, or an unknown venue,
    /// make the range unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn is_range_available(
        &self,
        venue_id: &str,
        date: NaiveDate,
        start: u8,
        end: u8,
    ) -> Result<bool> {
        let slots = self.availability(venue_id, date)?;
        Ok(range_is_free(&slots, start, end))
    }
}
