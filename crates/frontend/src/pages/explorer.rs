use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use deforest_shared::controller::{CameraMove, Effect, ViewController};
use deforest_shared::geocode;
use deforest_shared::models::LocationQuery;

use crate::api;
use crate::components::location_input::LocationInput;
use crate::components::map_view::MapView;
use crate::components::status_bar::{status_for, StatusBar};
use crate::config;

/// Forest-loss computation is not implemented; the action only acknowledges.
const FOREST_LOSS_NOTICE: &str = "NDVI Calculation initiated for the selected area!";
const NOTICE_DISMISS_MS: u32 = 4000;

#[component]
pub fn Explorer() -> Element {
    let client_config = use_resource(config::load_client_config);

    // The controller is the only writer of view state; children read it.
    let mut controller = use_signal(ViewController::new);
    let mut camera = use_signal(|| None::<CameraMove>);
    let mut notice = use_signal(|| None::<(u64, &'static str)>);

    let location = use_memo(move || controller.read().state().location);

    // Reverse geocode whenever the selected location changes. Restarting the
    // resource drops the previous lookup.
    let place = use_resource(move || {
        let at = location();
        let cfg = client_config.read().clone();
        async move {
            match cfg {
                Some(cfg) => Some(api::reverse_geocode(&cfg, at).await),
                None => None,
            }
        }
    });

    let mut run_effects = move |effects: Vec<Effect>| {
        for effect in effects {
            match effect {
                Effect::MoveCamera(mv) => camera.set(Some(mv)),
                Effect::Fetch { ticket, query } => {
                    let cfg = client_config.read().clone().unwrap_or_default();
                    spawn(async move {
                        let outcome = api::fetch_alerts(&cfg, &query).await;
                        controller.write().complete(ticket, outcome);
                    });
                }
            }
        }
    };

    let config_ready = client_config.read().is_some();
    let state = controller.read().state().clone();
    let status = status_for(&state);
    let place_name = match &*place.read() {
        Some(Some(result)) => geocode::display_label(result).to_string(),
        _ => "Locating...".to_string(),
    };
    let notice_text = (*notice.read()).map(|(_, text)| text.to_string());

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Real-Time Deforestation Map" }
            }

            div { class: "sidebar",
                LocationInput {
                    disabled: !config_ready,
                    on_submit: move |query: LocationQuery| {
                        let effects = controller.write().submit(query);
                        run_effects(effects);
                    },
                    on_forest_loss: move |_| {
                        let seq = (*notice.peek()).map(|(n, _)| n + 1).unwrap_or(0);
                        notice.set(Some((seq, FOREST_LOSS_NOTICE)));
                        spawn(async move {
                            TimeoutFuture::new(NOTICE_DISMISS_MS).await;
                            // a newer notice owns its own dismissal
                            if (*notice.peek()).map(|(n, _)| n) == Some(seq) {
                                notice.set(None);
                            }
                        });
                    },
                }
            }

            div { class: "main",
                StatusBar {
                    place_name: place_name,
                    coordinates: state.location.to_string(),
                    status: status,
                    notice: notice_text,
                    on_retry: move |_| {
                        let effects = controller.write().retry();
                        run_effects(effects);
                    },
                }
                MapView { controller: controller, camera: camera }
            }
        }
    }
}
