mod api;
mod components;
mod config;
mod pages;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::explorer::Explorer {}
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");
const LEAFLET_BRIDGE: Asset = asset!("/assets/leaflet_bridge.js");

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: LEAFLET_CSS }
        document::Stylesheet { href: CSS }
        document::Script { src: LEAFLET_JS }
        document::Script { src: LEAFLET_BRIDGE }
        Router::<Route> {}
    }
}

fn main() {
    dioxus::logger::initialize_default();
    launch(App);
}
