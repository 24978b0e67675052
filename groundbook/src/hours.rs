//! Wall-clock hour types used by venues and bookings.
//!
//! Hours are plain integers on a local 24-hour clock. A venue opens for
//! bookings at `start` and closes at `end`, both in `[0, 24)`, and every
//! booking covers a half-open range `[start, end)` whose end may be `24`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, RuleViolation};

/// The exclusive upper bound of a day, and the latest allowed booking end.
pub const DAY_END: u8 = 24;

/// The daily window in which a venue can be booked.
///
/// # Examples
///
/// ```
/// use groundbook::OperatingHours;
///
/// let hours = OperatingHours::new(9, 22).unwrap();
/// assert_eq!(hours.hour_count(), 13);
/// assert!(hours.covers(10, 12));
/// assert!(!hours.covers(8, 10));
///
/// assert!(OperatingHours::new(22, 9).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawOperatingHours")]
pub struct OperatingHours {
    start: u8,
    end: u8,
}

#[derive(Deserialize)]
struct RawOperatingHours {
    start: u8,
    end: u8,
}

impl TryFrom<RawOperatingHours> for OperatingHours {
    type Error = Error;

    fn try_from(raw: RawOperatingHours) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl OperatingHours {
    /// Creates a validated operating window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if either bound is outside `[0, 24)`
    /// or `start >= end`.
    pub fn new(start: u8, end: u8) -> Result<Self> {
        let violations = Self::check(start, end);
        if violations.is_empty() {
            Ok(Self { start, end })
        } else {
            Err(Error::InvalidConfig { violations })
        }
    }

    /// Lists every rule the given bounds break, without constructing a value.
    #[must_use]
    pub fn check(start: u8, end: u8) -> Vec<RuleViolation> {
        let mut violations = Vec::new();
        if start >= DAY_END {
            violations.push(RuleViolation::new(
                "operatingHours.start",
                format!("Opening hour must be between 0 and 23, got {start}"),
            ));
        }
        if end >= DAY_END {
            violations.push(RuleViolation::new(
                "operatingHours.end",
                format!("Closing hour must be between 0 and 23, got {end}"),
            ));
        }
        if start >= end {
            violations.push(RuleViolation::new(
                "operatingHours",
                "Opening hour must be before closing hour",
            ));
        }
        violations
    }

    /// The first bookable hour.
    #[must_use]
    pub const fn start(self) -> u8 {
        self.start
    }

    /// The closing hour; no slot starts at or after it.
    #[must_use]
    pub const fn end(self) -> u8 {
        self.end
    }

    /// Number of bookable hours in the window.
    #[must_use]
    pub fn hour_count(self) -> usize {
        usize::from(self.end - self.start)
    }

    /// Iterates the bookable hours in ascending order.
    pub fn hours(self) -> impl Iterator<Item = u8> {
        self.start..self.end
    }

    /// Returns `true` if `[start, end)` lies entirely inside the window.
    #[must_use]
    pub const fn covers(self, start: u8, end: u8) -> bool {
        start >= self.start && end <= self.end
    }
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self { start: 9, end: 22 }
    }
}

impl fmt::Display for OperatingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_hour(self.start), format_hour(self.end))
    }
}

/// Formats an hour as `HH:00`.
///
/// # Examples
///
/// ```
/// use groundbook::hours::format_hour;
///
/// assert_eq!(format_hour(9), "09:00");
/// assert_eq!(format_hour(24), "24:00");
/// ```
#[must_use]
pub fn format_hour(hour: u8) -> String {
    format!("{hour:02}:00")
}
