mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::response::IntoResponse;
use axum::{extract::State, response::Html, routing::get, Json, Router};
use deforest_shared::config::ClientConfig;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;

#[derive(Clone)]
struct AppState {
    client: Arc<ClientConfig>,
    index_path: Arc<PathBuf>,
}

/// Runtime settings for the web client. Never cached so a redeploy with new
/// service URLs takes effect on the next page load.
async fn client_config(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-cache")],
        Json(state.client.as_ref().clone()),
    )
}

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(config: &ServerConfig) -> Router {
    let static_files = Router::new()
        .nest(
            "/static",
            cached_static_router(&config.assets_dir, CACHE_1DAY),
        )
        .nest(
            "/dist",
            cached_static_router(&config.dist_dir, CACHE_IMMUTABLE),
        )
        .nest(
            "/assets",
            cached_static_router(&config.dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    let state = AppState {
        client: Arc::new(config.client.clone()),
        index_path: Arc::new(config.dist_dir.join("index.html")),
    };

    Router::new()
        .route("/config.json", get(client_config))
        .route("/", get(serve_index))
        .with_state(state)
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let app = build_app(&config);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(
        port = config.port,
        alert_service = %config.client.alert_service_url,
        geocoder = %config.client.geocoder_url,
        "Server running at http://localhost:{}",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {addr}: {e}"));
    axum::serve(listener, app).await.expect("server error");
}

async fn serve_index(State(state): State<AppState>) -> Html<String> {
    // Serve the built frontend, fall back to a simple message
    match tokio::fs::read_to_string(state.index_path.as_path()).await {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::warn!(path = %state.index_path.display(), "index.html unavailable: {e}");
            Html(
                r#"<!DOCTYPE html>
<html>
<head><title>Real-Time Deforestation Map</title></head>
<body>
<h1>Real-Time Deforestation Map</h1>
<p>Frontend not built yet. Run <code>dx build</code> in crates/frontend and copy the output to the dist directory.</p>
</body>
</html>"#
                    .to_string(),
            )
        }
    }
}
