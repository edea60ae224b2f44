use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DateRange, LatLng};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("incomplete query: start and end dates are required")]
    Incomplete,
}

/// Canonical request sent to the alert service. Field names match the
/// service's query-string parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlertQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Build the alert service request. Values pass through untouched; only a
/// missing date bound is rejected.
pub fn build_query(
    location: LatLng,
    radius_m: f64,
    range: &DateRange,
) -> Result<AlertQuery, QueryError> {
    let (Some(start), Some(end)) = (range.start, range.end) else {
        return Err(QueryError::Incomplete);
    };
    Ok(AlertQuery {
        lat: location.lat,
        lng: location.lng,
        radius: radius_m,
        start,
        end,
    })
}
