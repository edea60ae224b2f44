use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Map center used before the user picks a location (New Delhi).
pub const DEFAULT_LOCATION: LatLng = LatLng {
    lat: 28.6139,
    lng: 77.209,
};

/// Search radius shown around the default location, in meters.
pub const DEFAULT_RADIUS_M: f64 = 5000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Inclusive calendar window. Either bound may still be missing while the
/// user is editing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// A validated submission from the location form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl LocationQuery {
    pub fn location(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// One deforestation alert as returned by the alert service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub lat: f64,
    pub lng: f64,
    pub intensity: f64,
    #[serde(alias = "observedDate", deserialize_with = "deserialize_observed_date")]
    pub date: NaiveDate,
}

impl AlertRecord {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, keeping only the date.
fn deserialize_observed_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid observed date: {raw:?}"))
    })
}

/// Parse a whole `YYYY-MM-DD` or RFC 3339 string into its calendar date.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|d| d.date_naive())
        })
}
