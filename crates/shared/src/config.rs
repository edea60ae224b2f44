use serde::{Deserialize, Serialize};

pub const DEFAULT_ALERT_SERVICE_URL: &str = "https://your-api.com/deforestation";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Runtime settings the server hands to the web client at `/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub alert_service_url: String,
    pub geocoder_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            alert_service_url: DEFAULT_ALERT_SERVICE_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
        }
    }
}
