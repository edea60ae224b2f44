use deforest_shared::config::ClientConfig;

/// Path the server publishes runtime settings at.
pub const CONFIG_PATH: &str = "/config.json";

pub fn config_url(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), CONFIG_PATH)
}

/// Load runtime settings from the hosting server. Any failure falls back to
/// the built-in defaults so the map stays usable.
pub async fn load_client_config() -> ClientConfig {
    match fetch_client_config().await {
        Ok(cfg) => {
            tracing::info!(alert_service = %cfg.alert_service_url, "loaded client config");
            cfg
        }
        Err(e) => {
            tracing::warn!("using default client config: {e}");
            ClientConfig::default()
        }
    }
}

async fn fetch_client_config() -> Result<ClientConfig, String> {
    let origin = web_sys::window()
        .ok_or("no window")?
        .location()
        .origin()
        .map_err(|_| "no origin".to_string())?;

    let resp = reqwest::Client::new()
        .get(config_url(&origin))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.status().is_success() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.json::<ClientConfig>().await.map_err(|e| e.to_string())
}
