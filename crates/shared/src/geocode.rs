//! Reverse geocoding is best effort: any failure degrades to a fixed label.

use serde::Deserialize;

pub const NOT_FOUND_LABEL: &str = "Location not found";
pub const ERROR_LABEL: &str = "Error fetching location";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeocodeError {
    #[error("reverse geocoding failed: {0}")]
    Failed(String),
    #[error("no place name for this location")]
    NotFound,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

pub fn parse_reverse_response(body: &str) -> Result<String, GeocodeError> {
    let resp: ReverseResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::Failed(e.to_string()))?;
    resp.display_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or(GeocodeError::NotFound)
}

/// Label to display for a lookup result.
pub fn display_label(result: &Result<String, GeocodeError>) -> &str {
    match result {
        Ok(name) => name,
        Err(GeocodeError::NotFound) => NOT_FOUND_LABEL,
        Err(GeocodeError::Failed(_)) => ERROR_LABEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_name() {
        let body = r#"{"place_id":1,"display_name":"New Delhi, Delhi, India"}"#;
        assert_eq!(
            parse_reverse_response(body).unwrap(),
            "New Delhi, Delhi, India"
        );
    }

    #[test]
    fn test_missing_name_is_not_found() {
        let result = parse_reverse_response(r#"{"error":"Unable to geocode"}"#);
        assert_eq!(result, Err(GeocodeError::NotFound));
        assert_eq!(display_label(&result), NOT_FOUND_LABEL);
    }

    #[test]
    fn test_blank_name_is_not_found() {
        let result = parse_reverse_response(r#"{"display_name":"  "}"#);
        assert_eq!(result, Err(GeocodeError::NotFound));
    }

    #[test]
    fn test_garbage_body_is_error_label() {
        let result = parse_reverse_response("not json");
        assert!(matches!(result, Err(GeocodeError::Failed(_))));
        assert_eq!(display_label(&result), ERROR_LABEL);
    }

    #[test]
    fn test_ok_label_is_name() {
        let result = Ok("Manaus, Brazil".to_string());
        assert_eq!(display_label(&result), "Manaus, Brazil");
    }
}
