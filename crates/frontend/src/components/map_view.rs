use dioxus::prelude::*;
use serde::Serialize;

use deforest_shared::controller::{CameraMove, Phase, ViewController, ViewState, INITIAL_ZOOM};
use deforest_shared::models::{AlertRecord, LatLng};
use deforest_shared::severity::{self, SeverityTier};

const MAP_CONTAINER_ID: &str = "deforestation-map-container";

const TILE_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors & Map Providers";

/// Alert circle radius in meters per unit of intensity.
const METERS_PER_INTENSITY: f64 = 1000.0;

const ALERT_FILL_OPACITY: f64 = 0.5;
const SEARCH_FILL_OPACITY: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleStyle {
    pub color: &'static str,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MapOverlay {
    Marker {
        at: LatLng,
        tooltip: String,
    },
    Circle {
        center: LatLng,
        radius_m: f64,
        style: CircleStyle,
        tooltip: String,
    },
}

pub fn alert_radius_m(alert: &AlertRecord) -> f64 {
    alert.intensity * METERS_PER_INTENSITY
}

fn alert_tooltip(alert: &AlertRecord) -> String {
    format!(
        "<b>Deforestation Alert!</b><br/>Intensity: {}<br/>Date: {}",
        alert.intensity,
        alert.date.format("%Y-%m-%d")
    )
}

fn alert_overlay(alert: &AlertRecord) -> MapOverlay {
    let color = severity::classify(alert.intensity).color();
    MapOverlay::Circle {
        center: alert.position(),
        radius_m: alert_radius_m(alert),
        style: CircleStyle {
            color,
            fill_color: color,
            fill_opacity: ALERT_FILL_OPACITY,
        },
        tooltip: alert_tooltip(alert),
    }
}

/// Everything drawn on top of the tiles for a given view state: the selection
/// marker, the search radius, then one circle per alert.
pub fn build_overlays(state: &ViewState) -> Vec<MapOverlay> {
    let mut overlays = Vec::with_capacity(state.alerts.len() + 2);
    overlays.push(MapOverlay::Marker {
        at: state.location,
        tooltip: "Selected Location".to_string(),
    });
    overlays.push(MapOverlay::Circle {
        center: state.location,
        radius_m: state.radius_m,
        style: CircleStyle {
            color: "blue",
            fill_color: "lightblue",
            fill_opacity: SEARCH_FILL_OPACITY,
        },
        tooltip: format!("<b>Search Radius:</b> {} meters", state.radius_m),
    });
    // Only a finished fetch puts alerts on the map; loading and error states
    // never show stale circles.
    if state.phase == Phase::Ready {
        overlays.extend(state.alerts.iter().map(alert_overlay));
    }
    overlays
}

/// Alert counts per tier, most severe first, for the legend.
pub fn tier_counts(alerts: &[AlertRecord]) -> [(SeverityTier, usize); 3] {
    let mut counts = [
        (SeverityTier::High, 0),
        (SeverityTier::Medium, 0),
        (SeverityTier::Low, 0),
    ];
    for alert in alerts {
        let tier = severity::classify(alert.intensity);
        if let Some(entry) = counts.iter_mut().find(|(t, _)| *t == tier) {
            entry.1 += 1;
        }
    }
    counts
}

fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn init_script(center: LatLng) -> String {
    format!(
        "window.alertMap.init({}, {}, {}, {}, {}, {});",
        js_string(MAP_CONTAINER_ID),
        center.lat,
        center.lng,
        INITIAL_ZOOM,
        js_string(TILE_URL),
        js_string(TILE_ATTRIBUTION),
    )
}

fn fly_to_script(mv: &CameraMove) -> String {
    format!(
        "window.alertMap.flyTo({}, {}, {}, {});",
        mv.target.lat, mv.target.lng, mv.zoom, mv.duration_secs
    )
}

fn render_script(overlays: &[MapOverlay]) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(overlays)?;
    Ok(format!("window.alertMap.render({json});"))
}

#[component]
pub fn MapView(controller: Signal<ViewController>, camera: Signal<Option<CameraMove>>) -> Element {
    let mut map_ready = use_signal(|| false);

    // Re-issue the overlay list whenever the view state changes
    use_effect(move || {
        if !*map_ready.read() {
            return;
        }
        let overlays = build_overlays(controller.read().state());
        match render_script(&overlays) {
            Ok(js) => {
                let _ = document::eval(&js);
            }
            Err(e) => tracing::error!("failed to serialize overlays: {e}"),
        }
    });

    use_effect(move || {
        if !*map_ready.read() {
            return;
        }
        if let Some(mv) = *camera.read() {
            let _ = document::eval(&fly_to_script(&mv));
        }
    });

    let guard = controller.read();
    let state = guard.state();
    let legend: Vec<(&'static str, String)> = tier_counts(&state.alerts)
        .iter()
        .map(|(tier, count)| (tier.color(), format!("{tier}: {count}")))
        .collect();
    let show_legend = state.phase == Phase::Ready && !state.alerts.is_empty();

    rsx! {
        div { class: "map-panel",
            div {
                id: MAP_CONTAINER_ID,
                class: "map-container",
                onmounted: move |_| {
                    let center = controller.peek().state().location;
                    let _ = document::eval(&init_script(center));
                    map_ready.set(true);
                },
            }
            if show_legend {
                div { class: "legend",
                    for (color, label) in legend {
                        span { class: "legend-item",
                            span { class: "swatch", style: "background: {color};" }
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}
