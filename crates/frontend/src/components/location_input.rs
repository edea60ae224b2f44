use dioxus::prelude::*;

use deforest_shared::form::{QueryForm, INVALID_INPUT_MESSAGE};
use deforest_shared::models::LocationQuery;

fn alert_user(message: &str) {
    if let Some(window) = web_sys::window() {
        window.alert_with_message(message).ok();
    }
}

#[component]
pub fn LocationInput(
    on_submit: EventHandler<LocationQuery>,
    on_forest_loss: EventHandler<()>,
    disabled: bool,
) -> Element {
    let mut form = use_signal(QueryForm::default);

    let f = form.read().clone();

    rsx! {
        div { class: "panel",
            h2 { "Choose Your Location & Date" }

            div { class: "field-row",
                div { class: "field",
                    label { "Latitude" }
                    input {
                        r#type: "number",
                        step: "any",
                        placeholder: "Enter latitude",
                        value: "{f.latitude}",
                        oninput: move |evt: Event<FormData>| form.write().latitude = evt.value(),
                    }
                }
                div { class: "field",
                    label { "Longitude" }
                    input {
                        r#type: "number",
                        step: "any",
                        placeholder: "Enter longitude",
                        value: "{f.longitude}",
                        oninput: move |evt: Event<FormData>| form.write().longitude = evt.value(),
                    }
                }
            }

            div { class: "field",
                label { "Radius (meters)" }
                input {
                    r#type: "number",
                    step: "any",
                    placeholder: "Enter radius in meters",
                    value: "{f.radius}",
                    oninput: move |evt: Event<FormData>| form.write().radius = evt.value(),
                }
            }

            div { class: "field-row",
                div { class: "field",
                    label { "Start Date" }
                    input {
                        r#type: "date",
                        value: "{f.start_date}",
                        oninput: move |evt: Event<FormData>| form.write().start_date = evt.value(),
                    }
                }
                div { class: "field",
                    label { "End Date" }
                    input {
                        r#type: "date",
                        value: "{f.end_date}",
                        oninput: move |evt: Event<FormData>| form.write().end_date = evt.value(),
                    }
                }
            }

            button {
                class: "primary",
                disabled: disabled,
                onclick: move |_| {
                    let result = form.write().submit();
                    match result {
                        Ok(query) => on_submit.call(query),
                        Err(e) => {
                            tracing::debug!("rejected location form: {e}");
                            alert_user(&format!("{INVALID_INPUT_MESSAGE}\n{e}"));
                        }
                    }
                },
                "Locate Area"
            }

            button {
                class: "secondary",
                onclick: move |_| on_forest_loss.call(()),
                "Calculate Forest Loss"
            }
        }
    }
}
