use dioxus::prelude::*;

use deforest_shared::controller::ViewState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn class(self) -> &'static str {
        match self {
            StatusKind::Info => "status",
            StatusKind::Error => "status error",
        }
    }
}

/// Status line for the current view state, if any.
pub fn status_for(state: &ViewState) -> Option<(StatusKind, String)> {
    let message = state.status_message()?.to_string();
    let kind = if state.error().is_some() {
        StatusKind::Error
    } else {
        StatusKind::Info
    };
    Some((kind, message))
}

#[component]
pub fn StatusBar(
    place_name: String,
    coordinates: String,
    status: Option<(StatusKind, String)>,
    notice: Option<String>,
    on_retry: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "status-bar",
            div { class: "place",
                span { class: "place-name", "{place_name}" }
                span { class: "coords", "{coordinates}" }
            }
            if let Some((kind, message)) = status {
                div { class: kind.class(),
                    "{message}"
                    if kind == StatusKind::Error {
                        button {
                            class: "secondary",
                            onclick: move |_| on_retry.call(()),
                            "Retry"
                        }
                    }
                }
            }
            if let Some(text) = notice {
                div { class: "notice", "{text}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deforest_shared::controller::{Phase, LOADING_MESSAGE, NO_DATA_MESSAGE};

    #[test]
    fn test_idle_has_no_status() {
        assert_eq!(status_for(&ViewState::default()), None);
    }

    #[test]
    fn test_loading_is_info() {
        let state = ViewState {
            phase: Phase::Loading,
            ..ViewState::default()
        };
        assert_eq!(
            status_for(&state),
            Some((StatusKind::Info, LOADING_MESSAGE.to_string()))
        );
    }

    #[test]
    fn test_empty_ready_shows_no_data_not_error() {
        let state = ViewState {
            phase: Phase::Ready,
            ..ViewState::default()
        };
        assert_eq!(
            status_for(&state),
            Some((StatusKind::Info, NO_DATA_MESSAGE.to_string()))
        );
    }

    #[test]
    fn test_errored_is_error() {
        let state = ViewState {
            phase: Phase::Errored("Error fetching data: HTTP 500".into()),
            ..ViewState::default()
        };
        let (kind, msg) = status_for(&state).unwrap();
        assert_eq!(kind, StatusKind::Error);
        assert!(msg.contains("500"));
    }
}
