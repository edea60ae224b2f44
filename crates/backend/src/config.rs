use std::path::PathBuf;

use deforest_shared::config::ClientConfig;

/// Server settings, read from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub assets_dir: PathBuf,
    pub dist_dir: PathBuf,
    pub client: ClientConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ClientConfig::default();
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "ignoring invalid PORT, using 3000");
                3000
            }),
            None => 3000,
        };
        Self {
            port,
            assets_dir: PathBuf::from(lookup("ASSETS_DIR").unwrap_or_else(|| "assets".to_string())),
            dist_dir: PathBuf::from(lookup("DIST_DIR").unwrap_or_else(|| "dist".to_string())),
            client: ClientConfig {
                alert_service_url: lookup("ALERT_SERVICE_URL")
                    .unwrap_or(defaults.alert_service_url),
                geocoder_url: lookup("GEOCODER_URL").unwrap_or(defaults.geocoder_url),
            },
        }
    }
}
