//! Venue types: the bookable grounds and courts managed by the registry.
//!
//! A [`Venue`] is built from a [`VenueConfig`] and later changed through a
//! [`VenuePatch`]. Both paths re-check the same rules so a stored venue
//! always has a non-empty name and owner, a valid operating window and a
//! finite non-negative price.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result, RuleViolation};
use crate::hours::OperatingHours;

/// Default hourly price for a new venue.
pub const DEFAULT_PRICE_PER_HOUR: f64 = 2000.0;

/// The sport or category a venue is set up for. Informational only.
///
/// # Examples
///
/// ```
/// use groundbook::VenueType;
///
/// let padel: VenueType = "padel".parse().unwrap();
/// assert_eq!(padel.label(), "Padel Court");
/// assert!("curling".parse::<VenueType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    /// Cricket ground.
    Cricket,
    /// Padel court.
    Padel,
    /// Football pitch.
    Football,
    /// Tennis court.
    Tennis,
    /// Basketball court.
    Basketball,
    /// Badminton court.
    Badminton,
    /// Anything else.
    #[default]
    Other,
}

impl VenueType {
    /// Every venue type, in display order.
    pub const ALL: [Self; 7] = [
        Self::Cricket,
        Self::Padel,
        Self::Football,
        Self::Tennis,
        Self::Basketball,
        Self::Badminton,
        Self::Other,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cricket => "Cricket",
            Self::Padel => "Padel Court",
            Self::Football => "Football",
            Self::Tennis => "Tennis",
            Self::Basketball => "Basketball",
            Self::Badminton => "Badminton",
            Self::Other => "Other",
        }
    }

    /// The lowercase identifier used in stored records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cricket => "cricket",
            Self::Padel => "padel",
            Self::Football => "football",
            Self::Tennis => "tennis",
            Self::Basketball => "basketball",
            Self::Badminton => "badminton",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for VenueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VenueType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown venue type: {s}"))
    }
}

// Stored records may carry categories this build does not know about.
impl<'de> Deserialize<'de> for VenueType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// A bookable venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    id: String,
    name: String,
    owner_name: String,
    #[serde(rename = "type", default)]
    venue_type: VenueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    operating_hours: OperatingHours,
    price_per_hour: f64,
    created_at: DateTime<Utc>,
}

impl Venue {
    /// Creates a venue from `config`, assigning a fresh id and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] listing every rule the config breaks.
    ///
    /// # Examples
    ///
    /// ```
    /// use groundbook::{Venue, VenueConfig};
    ///
    /// let venue = Venue::new(VenueConfig::new("City Arena", "Ali").hours(9, 22)).unwrap();
    /// assert_eq!(venue.operating_hours().start(), 9);
    ///
    /// assert!(Venue::new(VenueConfig::new("City Arena", "Ali").hours(22, 9)).is_err());
    /// ```
    pub fn new(config: VenueConfig) -> Result<Self> {
        let violations = config.validate();
        if !violations.is_empty() {
            return Err(Error::InvalidConfig { violations });
        }
        let operating_hours = OperatingHours::new(config.start_hour, config.end_hour)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: config.name.trim().to_string(),
            owner_name: config.owner_name.trim().to_string(),
            venue_type: config.venue_type,
            description: normalize_description(config.description),
            operating_hours,
            price_per_hour: config.price_per_hour,
            created_at: Utc::now(),
        })
    }

    /// Returns a copy of this venue with `patch` merged in.
    ///
    /// Identity and creation time are preserved. The merged result is
    /// validated as a whole, so a patch that only moves `start` past the
    /// existing `end` is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the merged venue breaks a rule.
    pub fn apply(&self, patch: &VenuePatch) -> Result<Self> {
        let merged = VenueConfig {
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            owner_name: patch
                .owner_name
                .clone()
                .unwrap_or_else(|| self.owner_name.clone()),
            venue_type: patch.venue_type.unwrap_or(self.venue_type),
            description: match &patch.description {
                Some(description) => Some(description.clone()),
                None => self.description.clone(),
            },
            start_hour: patch.start_hour.unwrap_or(self.operating_hours.start()),
            end_hour: patch.end_hour.unwrap_or(self.operating_hours.end()),
            price_per_hour: patch.price_per_hour.unwrap_or(self.price_per_hour),
        };

        let violations = merged.validate();
        if !violations.is_empty() {
            return Err(Error::InvalidConfig { violations });
        }

        Ok(Self {
            id: self.id.clone(),
            name: merged.name.trim().to_string(),
            owner_name: merged.owner_name.trim().to_string(),
            venue_type: merged.venue_type,
            description: normalize_description(merged.description),
            operating_hours: OperatingHours::new(merged.start_hour, merged.end_hour)?,
            price_per_hour: merged.price_per_hour,
            created_at: self.created_at,
        })
    }

    /// Returns the venue id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owner's name.
    #[must_use]
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// Returns the venue category.
    #[must_use]
    pub const fn venue_type(&self) -> VenueType {
        self.venue_type
    }

    /// Returns the optional free-form description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the daily bookable window.
    #[must_use]
    pub const fn operating_hours(&self) -> OperatingHours {
        self.operating_hours
    }

    /// Returns the current hourly price.
    #[must_use]
    pub const fn price_per_hour(&self) -> f64 {
        self.price_per_hour
    }

    /// Returns when the venue was registered.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Input for registering a new venue.
///
/// Starts from the usual defaults (open 09:00 to 22:00 at
/// [`DEFAULT_PRICE_PER_HOUR`]) and is adjusted with the chained setters.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueConfig {
    name: String,
    owner_name: String,
    venue_type: VenueType,
    description: Option<String>,
    start_hour: u8,
    end_hour: u8,
    price_per_hour: f64,
}

impl VenueConfig {
    /// Creates a config with default hours, price and category.
    #[must_use]
    pub fn new(name: impl Into<String>, owner_name: impl Into<String>) -> Self {
        let hours = OperatingHours::default();
        Self {
            name: name.into(),
            owner_name: owner_name.into(),
            venue_type: VenueType::default(),
            description: None,
            start_hour: hours.start(),
            end_hour: hours.end(),
            price_per_hour: DEFAULT_PRICE_PER_HOUR,
        }
    }

    /// Sets the venue category.
    #[must_use]
    pub const fn venue_type(mut self, venue_type: VenueType) -> Self {
        self.venue_type = venue_type;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the operating window.
    #[must_use]
    pub const fn hours(mut self, start: u8, end: u8) -> Self {
        self.start_hour = start;
        self.end_hour = end;
        self
    }

    /// Sets the hourly price.
    #[must_use]
    pub const fn price_per_hour(mut self, price: f64) -> Self {
        self.price_per_hour = price;
        self
    }

    /// Lists every rule this config breaks.
    #[must_use]
    pub fn validate(&self) -> Vec<RuleViolation> {
        let mut violations = Vec::new();
        if self.name.trim().is_empty() {
            violations.push(RuleViolation::new("name", "Venue name is required"));
        }
        if self.owner_name.trim().is_empty() {
            violations.push(RuleViolation::new("ownerName", "Owner name is required"));
        }
        violations.extend(OperatingHours::check(self.start_hour, self.end_hour));
        if !self.price_per_hour.is_finite() || self.price_per_hour < 0.0 {
            violations.push(RuleViolation::new(
                "pricePerHour",
                "Price per hour must be a non-negative number",
            ));
        }
        violations
    }
}

/// A partial update to a venue. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenuePatch {
    /// New display name.
    pub name: Option<String>,
    /// New owner name.
    pub owner_name: Option<String>,
    /// New category.
    pub venue_type: Option<VenueType>,
    /// New description; an empty string clears it.
    pub description: Option<String>,
    /// New opening hour.
    pub start_hour: Option<u8>,
    /// New closing hour.
    pub end_hour: Option<u8>,
    /// New hourly price. Existing bookings keep the price they were made at.
    pub price_per_hour: Option<f64>,
}

impl VenuePatch {
    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
