use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiType {
    Attraction,
    Restaurant,
    Shop,
    EventVenue,
}

impl PoiType {
    /// Parses a raw type hint, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything outside the four known kinds.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "attraction" => Some(Self::Attraction),
            "restaurant" => Some(Self::Restaurant),
            "shop" => Some(Self::Shop),
            "event_venue" => Some(Self::EventVenue),
            _ => None,
        }
    }
}

impl std::fmt::Display for PoiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoiType::Attraction => write!(f, "attraction"),
            PoiType::Restaurant => write!(f, "restaurant"),
            PoiType::Shop => write!(f, "shop"),
            PoiType::EventVenue => write!(f, "event_venue"),
        }
    }
}

/// Halal status as a three-valued string on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Halal {
    True,
    False,
    #[default]
    Unknown,
}

impl std::fmt::Display for Halal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Halal::True => write!(f, "true"),
            Halal::False => write!(f, "false"),
            Halal::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeOfDay::Morning => write!(f, "morning"),
            TimeOfDay::Afternoon => write!(f, "afternoon"),
            TimeOfDay::Evening => write!(f, "evening"),
            TimeOfDay::Night => write!(f, "night"),
        }
    }
}

/// A latitude/longitude pair that is either fully known or fully unknown.
///
/// The fields are private so a one-sided pair cannot be built; deserializing
/// a one-sided pair collapses it to unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CoordinatesRepr")]
pub struct Coordinates {
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Deserialize)]
struct CoordinatesRepr {
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl From<CoordinatesRepr> for Coordinates {
    fn from(repr: CoordinatesRepr) -> Self {
        match (repr.lat, repr.lon) {
            (Some(lat), Some(lon)) => Self::new(lat, lon),
            _ => Self::unknown(),
        }
    }
}

impl Coordinates {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat),
            lon: Some(lon),
        }
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self {
            lat: None,
            lon: None,
        }
    }

    #[must_use]
    pub fn lat(&self) -> Option<f64> {
        self.lat
    }

    #[must_use]
    pub fn lon(&self) -> Option<f64> {
        self.lon
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }
}

/// A normalized point of interest, ready for export.
///
/// Field declaration order is the canonical export order; positional CSV
/// consumers depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
    /// First 12 hex characters of the SHA-256 digest of `source_url`.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub poi_type: PoiType,
    pub category_tags: BTreeSet<String>,
    pub neighborhood: String,
    /// 1 = under ¥1,000 … 4 = ¥10,000 and up.
    pub price_range: Option<u8>,
    pub halal: Halal,
    /// Only ever `Some` for restaurants.
    pub cuisine: Option<BTreeSet<String>>,
    /// `category_tags` plus situational tags such as `"Nightlife"`.
    pub interest_tags: BTreeSet<String>,
    pub coordinates: Coordinates,
    pub typical_duration_minutes: u32,
    pub best_time_of_day: Option<TimeOfDay>,
    pub short_description: String,
    /// Absolute URL of the page the record came from; empty when none resolved.
    pub source_url: String,
    pub last_updated_ts: DateTime<Utc>,
}
