//! Booking records, booking requests and the rules a request must satisfy.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result, RuleViolation};
use crate::hours::{format_hour, DAY_END};
use crate::venue::Venue;

/// Phone numbers accepted out of the box: `+92XXXXXXXXXX`, `03XXXXXXXXX`
/// or `03XX-XXXXXXX`, checked after whitespace is removed.
pub const DEFAULT_PHONE_PATTERN: &str = r"^(\+92|0)[0-9]{2,3}[-\s]?[0-9]{7}$";

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Occupies its hours and counts toward revenue.
    Confirmed,
    /// Kept for audit only.
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => write!(f, "confirmed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A customer's request for a contiguous block of hours on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Customer's full name.
    pub customer_name: String,
    /// Customer's phone number.
    pub customer_phone: String,
    /// Customer's email address.
    pub customer_email: String,
    /// The calendar date to book.
    pub date: NaiveDate,
    /// First hour of the booking.
    pub start_time: u8,
    /// End of the booking (exclusive), at most 24.
    pub end_time: u8,
}

/// A reservation of `[start_time, end_time)` at one venue on one date.
///
/// The price is fixed when the booking is made; later changes to the
/// venue's hourly rate do not touch existing bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    id: String,
    #[serde(rename = "groundId")]
    venue_id: String,
    customer_name: String,
    customer_phone: String,
    customer_email: String,
    date: NaiveDate,
    start_time: u8,
    end_time: u8,
    hours: u8,
    total_price: f64,
    status: BookingStatus,
    created_at: DateTime<Utc>,
}

impl Booking {
    /// Builds a confirmed booking for `request` at `venue`'s current price.
    ///
    /// No validation or availability check happens here; callers go through
    /// the allocator for that.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use groundbook::{Booking, BookingRequest, Venue, VenueConfig};
    ///
    /// let venue = Venue::new(VenueConfig::new("Arena", "Ali").price_per_hour(2000.0)).unwrap();
    /// let request = BookingRequest {
    ///     customer_name: "Sara".into(),
    ///     customer_phone: "03001234567".into(),
    ///     customer_email: "sara@example.com".into(),
    ///     date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    ///     start_time: 10,
    ///     end_time: 12,
    /// };
    /// let booking = Booking::confirmed(&venue, request);
    /// assert_eq!(booking.hours(), 2);
    /// assert_eq!(booking.total_price(), 4000.0);
    /// ```
    #[must_use]
    pub fn confirmed(venue: &Venue, request: BookingRequest) -> Self {
        let hours = request.end_time.saturating_sub(request.start_time);
        Self {
            id: Uuid::new_v4().to_string(),
            venue_id: venue.id().to_string(),
            customer_name: request.customer_name.trim().to_string(),
            customer_phone: request.customer_phone.trim().to_string(),
            customer_email: request.customer_email.trim().to_string(),
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
            hours,
            total_price: f64::from(hours) * venue.price_per_hour(),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    pub(crate) fn mark_cancelled(&mut self) {
        self.status = BookingStatus::Cancelled;
    }

    /// The same booking priced at `venue`'s current hourly rate.
    pub(crate) fn priced_for(&self, venue: &Venue) -> Self {
        Self {
            total_price: f64::from(self.hours) * venue.price_per_hour(),
            ..self.clone()
        }
    }

    /// Returns the booking id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the id of the venue this booking was made for.
    ///
    /// The venue may since have been deleted.
    #[must_use]
    pub fn venue_id(&self) -> &str {
        &self.venue_id
    }

    /// Returns the customer's name.
    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Returns the customer's phone number.
    #[must_use]
    pub fn customer_phone(&self) -> &str {
        &self.customer_phone
    }

    /// Returns the customer's email address.
    #[must_use]
    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    /// Returns the booked date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the first booked hour.
    #[must_use]
    pub const fn start_time(&self) -> u8 {
        self.start_time
    }

    /// Returns the exclusive end hour.
    #[must_use]
    pub const fn end_time(&self) -> u8 {
        self.end_time
    }

    /// Returns the number of booked hours.
    #[must_use]
    pub const fn hours(&self) -> u8 {
        self.hours
    }

    /// Returns the price captured at creation.
    #[must_use]
    pub const fn total_price(&self) -> f64 {
        self.total_price
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns when the booking was made.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` unless the booking was cancelled.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Returns `true` if `hour` falls in `[start_time, end_time)`.
    #[must_use]
    pub const fn occupies(&self, hour: u8) -> bool {
        hour >= self.start_time && hour < self.end_time
    }

    /// Returns the `HH:00-HH:00` label of the booked range.
    #[must_use]
    pub fn time_range(&self) -> String {
        format!("{}-{}", format_hour(self.start_time), format_hour(self.end_time))
    }
}

/// Input rules applied to every booking request.
///
/// # Examples
///
/// ```
/// use groundbook::BookingRules;
///
/// let rules = BookingRules::new(groundbook::booking::DEFAULT_PHONE_PATTERN).unwrap();
/// assert!(rules.is_valid_phone("0300 1234567"));
/// assert!(!rules.is_valid_phone("12345"));
///
/// assert!(BookingRules::new("(unclosed").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct BookingRules {
    phone: Regex,
    email: Regex,
}

impl BookingRules {
    /// Compiles the rules with a custom phone pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] if either pattern does not compile.
    pub fn new(phone_pattern: &str) -> Result<Self> {
        let compile = |field: &str, pattern: &str| {
            Regex::new(pattern).map_err(|e| Error::InvalidSetting {
                field: field.to_string(),
                message: e.to_string(),
            })
        };
        Ok(Self {
            phone: compile("phone_pattern", phone_pattern)?,
            email: compile("email_pattern", EMAIL_PATTERN)?,
        })
    }

    /// Compiles the rules with [`DEFAULT_PHONE_PATTERN`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in patterns fail to compile.
    pub fn standard() -> Result<Self> {
        Self::new(DEFAULT_PHONE_PATTERN)
    }

    /// Checks a phone number after removing all whitespace.
    #[must_use]
    pub fn is_valid_phone(&self, phone: &str) -> bool {
        let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
        self.phone.is_match(&compact)
    }

    /// Checks an email address.
    #[must_use]
    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email.is_match(email)
    }

    /// Lists every rule `request` breaks on its own, without looking at a venue.
    #[must_use]
    pub fn validate(&self, request: &BookingRequest) -> Vec<RuleViolation> {
        let mut violations = Vec::new();

        let name_len = request.customer_name.trim().chars().count();
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_len) {
            violations.push(RuleViolation::new(
                "customerName",
                "Name must be between 2 and 50 characters",
            ));
        }
        if !self.is_valid_phone(&request.customer_phone) {
            violations.push(RuleViolation::new(
                "customerPhone",
                "Please enter a valid phone number (e.g., 03XX-XXXXXXX or +92XXXXXXXXXX)",
            ));
        }
        if !self.is_valid_email(&request.customer_email) {
            violations.push(RuleViolation::new(
                "customerEmail",
                "Please enter a valid email address",
            ));
        }
        if !is_valid_time_range(request.start_time, request.end_time) {
            violations.push(RuleViolation::new("timeRange", "Invalid time range selected"));
        }

        violations
    }

    /// Like [`validate`](Self::validate), plus the venue's operating window.
    ///
    /// The window is only checked once the range itself is well formed.
    #[must_use]
    pub fn validate_for(&self, venue: &Venue, request: &BookingRequest) -> Vec<RuleViolation> {
        let mut violations = self.validate(request);
        let hours = venue.operating_hours();
        if is_valid_time_range(request.start_time, request.end_time)
            && !hours.covers(request.start_time, request.end_time)
        {
            violations.push(RuleViolation::new(
                "timeRange",
                format!("Selected hours are outside the venue's operating hours ({hours})"),
            ));
        }
        violations
    }
}

/// Returns `true` for a non-empty range ending no later than midnight.
#[must_use]
pub const fn is_valid_time_range(start: u8, end: u8) -> bool {
    start < end && end <= DAY_END
}
