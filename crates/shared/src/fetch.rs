//! Response interpretation for the alert service.
//!
//! The network round trip lives in the frontend; everything that decides
//! what a response *means* lives here so it can be tested without a server.

use crate::models::AlertRecord;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Network failure or a non-2xx status.
    #[error("Error fetching data: {0}")]
    Transport(String),
    /// 2xx response whose body is not a list of alert records.
    #[error("Invalid data format: {0}")]
    Shape(String),
}

/// Result of one alert fetch. An empty `Ok` vec is a valid "no data" answer.
pub type FetchOutcome = Result<Vec<AlertRecord>, FetchError>;

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Interpret a completed HTTP response.
pub fn interpret_response(status: u16, body: &str) -> FetchOutcome {
    if !is_success_status(status) {
        return Err(FetchError::Transport(format!(
            "alert service responded with HTTP {status}"
        )));
    }
    parse_alerts(body)
}

/// Parse a response body that must be a JSON array of alert records.
fn parse_alerts(body: &str) -> FetchOutcome {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FetchError::Shape(e.to_string()))?;
    if !value.is_array() {
        return Err(FetchError::Shape(format!(
            "expected an array of alerts, got {}",
            json_kind(&value)
        )));
    }
    let records: Vec<AlertRecord> =
        serde_json::from_value(value).map_err(|e| FetchError::Shape(e.to_string()))?;

    if let Some((i, bad)) = records
        .iter()
        .enumerate()
        .find(|(_, r)| r.intensity < 0.0 || !r.lat.is_finite() || !r.lng.is_finite())
    {
        return Err(FetchError::Shape(format!(
            "alert {i} has out-of-range values (intensity {})",
            bad.intensity
        )));
    }
    Ok(records)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
