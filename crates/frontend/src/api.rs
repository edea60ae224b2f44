use deforest_shared::config::ClientConfig;
use deforest_shared::fetch::{self, FetchError, FetchOutcome};
use deforest_shared::geocode::{self, GeocodeError};
use deforest_shared::models::LatLng;
use deforest_shared::query::AlertQuery;

fn alert_request(
    client: &reqwest::Client,
    config: &ClientConfig,
    query: &AlertQuery,
) -> reqwest::Result<reqwest::Request> {
    client.get(&config.alert_service_url).query(query).build()
}

fn place_request(
    client: &reqwest::Client,
    config: &ClientConfig,
    at: LatLng,
) -> reqwest::Result<reqwest::Request> {
    client
        .get(&config.geocoder_url)
        .query(&[("format", "json")])
        .query(&[("lat", at.lat), ("lon", at.lng)])
        .build()
}

/// One round trip to the alert service. No retries; the caller decides
/// whether the result is still wanted.
pub async fn fetch_alerts(config: &ClientConfig, query: &AlertQuery) -> FetchOutcome {
    let client = reqwest::Client::new();
    let request = alert_request(&client, config, query)
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    tracing::debug!(url = %request.url(), "requesting alerts");

    let resp = client
        .execute(request)
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    let status = resp.status().as_u16();
    let body = resp
        .text()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    fetch::interpret_response(status, &body)
}

/// Reverse-geocode a coordinate to a display name. Failures are logged and
/// returned for the caller to turn into a fallback label.
pub async fn reverse_geocode(config: &ClientConfig, at: LatLng) -> Result<String, GeocodeError> {
    let result = request_place_name(config, at).await;
    if let Err(e) = &result {
        tracing::warn!(%at, "{e}");
    }
    result
}

async fn request_place_name(config: &ClientConfig, at: LatLng) -> Result<String, GeocodeError> {
    let client = reqwest::Client::new();
    let request =
        place_request(&client, config, at).map_err(|e| GeocodeError::Failed(e.to_string()))?;

    let resp = client
        .execute(request)
        .await
        .map_err(|e| GeocodeError::Failed(e.to_string()))?;

    if !resp.status().is_success() {
        return Err(GeocodeError::Failed(format!("HTTP {}", resp.status())));
    }
    let body = resp
        .text()
        .await
        .map_err(|e| GeocodeError::Failed(e.to_string()))?;

    geocode::parse_reverse_response(&body)
}
