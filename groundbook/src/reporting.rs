//! Derived statistics over the booking collection.
//!
//! Everything here is recomputed from the store on every call. Only
//! confirmed bookings are counted. Functions that depend on the current
//! date take `today` explicitly; the `Reporting` methods without an `_at`
//! suffix use the local calendar date.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use serde::Serialize;

use crate::booking::Booking;
use crate::error::Result;
use crate::store::{self, Collection, RecordStore};
use crate::venue::Venue;

/// Label used for bookings whose venue has been deleted.
pub const UNKNOWN_VENUE: &str = "Unknown venue";

/// How far back "recent" bookings reach.
pub const RECENT_DAYS: u64 = 7;

/// Headline numbers across all venues.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    /// Venues currently registered.
    pub total_venues: usize,
    /// Confirmed bookings.
    pub total_bookings: usize,
    /// Sum of confirmed booking prices.
    pub total_revenue: f64,
    /// Sum of booked hours.
    pub total_hours: u32,
    /// Mean booking price, `0` with no bookings.
    pub average_booking_value: f64,
    /// Confirmed bookings dated today.
    pub today_bookings: usize,
    /// Distinct venues with at least one confirmed booking.
    pub active_venues: usize,
}

/// Bookings and revenue of one venue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueSummary {
    /// The venue id the bookings refer to.
    pub venue_id: String,
    /// The venue's name, or [`UNKNOWN_VENUE`] if it no longer exists.
    pub venue_name: String,
    /// Confirmed bookings.
    pub bookings: usize,
    /// Sum of confirmed booking prices.
    pub revenue: f64,
    /// Sum of booked hours.
    pub hours: u32,
}

/// How often one exact `[start, end)` range was booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeCount {
    /// First hour.
    pub start: u8,
    /// Exclusive end hour.
    pub end: u8,
    /// Number of confirmed bookings with this range.
    pub count: usize,
}

/// Bookings falling on one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayCount {
    /// The day.
    pub weekday: Weekday,
    /// Number of confirmed bookings on that day.
    pub count: usize,
}

fn confirmed(bookings: &[Booking]) -> impl Iterator<Item = &Booking> {
    bookings.iter().filter(|b| b.is_confirmed())
}

/// Computes [`OverallStats`].
#[must_use]
pub fn overall(venues: &[Venue], bookings: &[Booking], today: NaiveDate) -> OverallStats {
    let mut total_bookings = 0;
    let mut total_revenue = 0.0;
    let mut total_hours = 0u32;
    let mut today_bookings = 0;
    let mut active: Vec<&str> = Vec::new();

    for booking in confirmed(bookings) {
        total_bookings += 1;
        total_revenue += booking.total_price();
        total_hours += u32::from(booking.hours());
        if booking.date() == today {
            today_bookings += 1;
        }
        if !active.contains(&booking.venue_id()) {
            active.push(booking.venue_id());
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let average_booking_value = if total_bookings == 0 {
        0.0
    } else {
        total_revenue / total_bookings as f64
    };

    OverallStats {
        total_venues: venues.len(),
        total_bookings,
        total_revenue,
        total_hours,
        average_booking_value,
        today_bookings,
        active_venues: active.len(),
    }
}

/// Groups confirmed bookings by venue.
///
/// Registered venues come first in registry order, including those with no
/// bookings. Bookings for deleted venues follow, labelled [`UNKNOWN_VENUE`].
#[must_use]
pub fn per_venue(venues: &[Venue], bookings: &[Booking]) -> Vec<VenueSummary> {
    let mut summaries: Vec<VenueSummary> = venues
        .iter()
        .map(|venue| VenueSummary {
            venue_id: venue.id().to_string(),
            venue_name: venue.name().to_string(),
            bookings: 0,
            revenue: 0.0,
            hours: 0,
        })
        .collect();

    for booking in confirmed(bookings) {
        let index = match summaries.iter().position(|s| s.venue_id == booking.venue_id()) {
            Some(index) => index,
            None => {
                summaries.push(VenueSummary {
                    venue_id: booking.venue_id().to_string(),
                    venue_name: UNKNOWN_VENUE.to_string(),
                    bookings: 0,
                    revenue: 0.0,
                    hours: 0,
                });
                summaries.len() - 1
            }
        };
        let summary = &mut summaries[index];
        summary.bookings += 1;
        summary.revenue += booking.total_price();
        summary.hours += u32::from(booking.hours());
    }

    summaries
}

/// Returns the `limit` most booked ranges, most popular first.
///
/// Ties go to the earlier range.
#[must_use]
pub fn popular_ranges(bookings: &[Booking], limit: usize) -> Vec<RangeCount> {
    let mut counts: HashMap<(u8, u8), usize> = HashMap::new();
    for booking in confirmed(bookings) {
        *counts
            .entry((booking.start_time(), booking.end_time()))
            .or_default() += 1;
    }

    let mut ranges: Vec<RangeCount> = counts
        .into_iter()
        .map(|((start, end), count)| RangeCount { start, end, count })
        .collect();
    ranges.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.start.cmp(&b.start))
            .then(a.end.cmp(&b.end))
    });
    ranges.truncate(limit);
    ranges
}

/// Counts confirmed bookings per weekday, Monday first.
#[must_use]
pub fn by_weekday(bookings: &[Booking]) -> Vec<WeekdayCount> {
    let mut counts = [0usize; 7];
    for booking in confirmed(bookings) {
        counts[booking.date().weekday().num_days_from_monday() as usize] += 1;
    }

    let mut weekday = Weekday::Mon;
    counts
        .into_iter()
        .map(|count| {
            let entry = WeekdayCount { weekday, count };
            weekday = weekday.succ();
            entry
        })
        .collect()
}

/// Confirmed bookings dated after `today`, soonest first.
#[must_use]
pub fn upcoming(bookings: &[Booking], today: NaiveDate) -> Vec<Booking> {
    let mut found: Vec<Booking> = confirmed(bookings)
        .filter(|b| b.date() > today)
        .cloned()
        .collect();
    found.sort_by_key(|b| (b.date(), b.start_time()));
    found
}

/// Confirmed bookings dated no earlier than [`RECENT_DAYS`] before `today`,
/// newest first.
#[must_use]
pub fn recent(bookings: &[Booking], today: NaiveDate) -> Vec<Booking> {
    let cutoff = today
        .checked_sub_days(Days::new(RECENT_DAYS))
        .unwrap_or(NaiveDate::MIN);
    let mut found: Vec<Booking> = confirmed(bookings)
        .filter(|b| b.date() >= cutoff)
        .cloned()
        .collect();
    found.sort_by_key(|b| std::cmp::Reverse((b.date(), b.start_time())));
    found
}

/// Every statistic at once, for dashboards and exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// The date the report was computed for.
    pub today: NaiveDate,
    /// Headline numbers.
    pub overall: OverallStats,
    /// Per-venue breakdown.
    pub venues: Vec<VenueSummary>,
    /// Most booked ranges.
    pub popular_ranges: Vec<RangeCount>,
    /// Bookings per weekday.
    pub weekdays: Vec<WeekdayCount>,
    /// Number of bookings after today.
    pub upcoming: usize,
    /// Number of recent bookings.
    pub recent: usize,
}

/// Store-backed reporting.
#[derive(Clone)]
pub struct Reporting {
    store: Arc<dyn RecordStore>,
}

impl Reporting {
    /// Number of ranges listed by [`Reporting::report_at`].
    pub const POPULAR_LIMIT: usize = 5;

    /// Creates a reporter over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<(Vec<Venue>, Vec<Booking>)> {
        let venues = store::load(self.store.as_ref(), Collection::Venues)?;
        let bookings = store::load(self.store.as_ref(), Collection::Bookings)?;
        Ok((venues, bookings))
    }

    /// Headline numbers for `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn overall_at(&self, today: NaiveDate) -> Result<OverallStats> {
        let (venues, bookings) = self.load()?;
        Ok(overall(&venues, &bookings, today))
    }

    /// Headline numbers for the local date.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn overall(&self) -> Result<OverallStats> {
        self.overall_at(Local::now().date_naive())
    }

    /// Per-venue breakdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn per_venue(&self) -> Result<Vec<VenueSummary>> {
        let (venues, bookings) = self.load()?;
        Ok(per_venue(&venues, &bookings))
    }

    /// Confirmed bookings after the local date.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn upcoming(&self) -> Result<Vec<Booking>> {
        let (_, bookings) = self.load()?;
        Ok(upcoming(&bookings, Local::now().date_naive()))
    }

    /// Full report for `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn report_at(&self, today: NaiveDate) -> Result<Report> {
        let (venues, bookings) = self.load()?;
        Ok(Report {
            today,
            overall: overall(&venues, &bookings, today),
            venues: per_venue(&venues, &bookings),
            popular_ranges: popular_ranges(&bookings, Self::POPULAR_LIMIT),
            weekdays: by_weekday(&bookings),
            upcoming: upcoming(&bookings, today).len(),
            recent: recent(&bookings, today).len(),
        })
    }

    /// Full report for the local date.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn report(&self) -> Result<Report> {
        self.report_at(Local::now().date_naive())
    }
}
