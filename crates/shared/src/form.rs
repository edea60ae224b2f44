use crate::models::{parse_calendar_date, LocationQuery};

/// Shown to the user when a submission is rejected.
pub const INVALID_INPUT_MESSAGE: &str =
    "Please enter valid latitude, longitude, radius, and dates!";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("radius must be greater than zero")]
    NonPositiveRadius,
    #[error("{field} is not a valid date: {value:?}")]
    InvalidDate { field: &'static str, value: String },
    #[error("end date is before start date")]
    EndBeforeStart,
}

/// Raw text of the location form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryForm {
    pub latitude: String,
    pub longitude: String,
    pub radius: String,
    pub start_date: String,
    pub end_date: String,
}

impl QueryForm {
    /// Validate the fields into a query. Clears the form on success and
    /// leaves it untouched on failure.
    pub fn submit(&mut self) -> Result<LocationQuery, FormError> {
        let query = self.validate()?;
        *self = Self::default();
        Ok(query)
    }

    pub fn validate(&self) -> Result<LocationQuery, FormError> {
        let latitude = parse_number("latitude", &self.latitude)?;
        let longitude = parse_number("longitude", &self.longitude)?;
        let radius_m = parse_number("radius", &self.radius)?;
        let start_date = parse_date("start date", &self.start_date)?;
        let end_date = parse_date("end date", &self.end_date)?;

        if radius_m <= 0.0 {
            return Err(FormError::NonPositiveRadius);
        }
        if end_date < start_date {
            return Err(FormError::EndBeforeStart);
        }

        Ok(LocationQuery {
            latitude,
            longitude,
            radius_m,
            start_date,
            end_date,
        })
    }
}

fn require<'a>(field: &'static str, raw: &'a str) -> Result<&'a str, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, FormError> {
    let value = require(field, raw)?;
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FormError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_date(field: &'static str, raw: &str) -> Result<chrono::NaiveDate, FormError> {
    let value = require(field, raw)?;
    parse_calendar_date(value).ok_or_else(|| FormError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
