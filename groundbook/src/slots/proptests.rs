//! Property-based tests for slot computation.

use chrono::NaiveDate;
use proptest::prelude::*;

use super::{compute_slots, free_blocks, range_is_free};
use crate::booking::{Booking, BookingRequest};
use crate::venue::{Venue, VenueConfig};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn venue(start: u8, end: u8) -> Venue {
    Venue::new(VenueConfig::new("Arena", "Owner").hours(start, end)).unwrap()
}

fn booking(venue: &Venue, start: u8, end: u8) -> Booking {
    Booking::confirmed(
        venue,
        BookingRequest {
            customer_name: "Customer".into(),
            customer_phone: "03001234567".into(),
            customer_email: "c@example.com".into(),
            date: date(),
            start_time: start,
            end_time: end,
        },
    )
}

/// A valid operating window `(start, end)` with `start < end < 24`.
fn window() -> impl Strategy<Value = (u8, u8)> {
    (0u8..23).prop_flat_map(|start| (Just(start), (start + 1)..24))
}

/// Lays non-overlapping bookings over the window from `(length, booked)`
/// segments, clipped at closing time.
fn lay_bookings(venue: &Venue, segments: &[(u8, bool)]) -> Vec<Booking> {
    let hours = venue.operating_hours();
    let mut cursor = hours.start();
    let mut bookings = Vec::new();
    for &(len, booked) in segments {
        if cursor >= hours.end() {
            break;
        }
        let end = (cursor + len).min(hours.end());
        if booked {
            bookings.push(booking(venue, cursor, end));
        }
        cursor = end;
    }
    bookings
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        .. ProptestConfig::default()
    })]

    // One slot per operating hour, ascending.
    #[test]
    fn slot_count_matches_window((start, end) in window()) {
        let v = venue(start, end);
        let slots = compute_slots(&v, date(), &[]);
        prop_assert_eq!(slots.len(), usize::from(end - start));
        let hours: Vec<u8> = slots.iter().map(|s| s.hour).collect();
        prop_assert_eq!(hours, (start..end).collect::<Vec<_>>());
    }

    // Every booked hour points at its booking; every other hour is free.
    #[test]
    fn bookings_mark_exactly_their_hours(
        (start, end) in window(),
        segments in prop::collection::vec((1u8..5, any::<bool>()), 0..12),
    ) {
        let v = venue(start, end);
        let bookings = lay_bookings(&v, &segments);
        let slots = compute_slots(&v, date(), &bookings);

        for slot in &slots {
            prop_assert_eq!(slot.booked, !slot.available);
            match bookings.iter().find(|b| b.occupies(slot.hour)) {
                Some(b) => {
                    prop_assert!(slot.booked);
                    prop_assert_eq!(slot.booking_id.as_deref(), Some(b.id()));
                }
                None => {
                    prop_assert!(slot.available);
                    prop_assert!(slot.booking_id.is_none());
                }
            }
        }
    }

    // A range overlapping any booking is never free; a range fully inside a
    // free block always is.
    #[test]
    fn range_checks_agree_with_bookings(
        (start, end) in window(),
        segments in prop::collection::vec((1u8..5, any::<bool>()), 0..12),
        (a, b) in (0u8..24).prop_flat_map(|a| (Just(a), (a + 1)..=24)),
    ) {
        let v = venue(start, end);
        let bookings = lay_bookings(&v, &segments);
        let slots = compute_slots(&v, date(), &bookings);

        let overlaps = bookings.iter().any(|bk| a < bk.end_time() && bk.start_time() < b);
        let inside = a >= start && b <= end;
        prop_assert_eq!(range_is_free(&slots, a, b), inside && !overlaps);
    }

    // Free blocks partition exactly the available hours.
    #[test]
    fn free_blocks_cover_available_hours(
        (start, end) in window(),
        segments in prop::collection::vec((1u8..5, any::<bool>()), 0..12),
    ) {
        let v = venue(start, end);
        let slots = compute_slots(&v, date(), &lay_bookings(&v, &segments));
        let blocks = free_blocks(&slots);

        let from_blocks: Vec<u8> = blocks.iter().flat_map(|&(s, e)| s..e).collect();
        let available: Vec<u8> = slots.iter().filter(|s| s.available).map(|s| s.hour).collect();
        prop_assert_eq!(from_blocks, available);
        for pair in blocks.windows(2) {
            prop_assert!(pair[0].1 < pair[1].0);
        }
        for &(s, e) in &blocks {
            prop_assert!(range_is_free(&slots, s, e));
        }
    }
}
