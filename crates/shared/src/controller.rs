//! View state and the controller that owns it.
//!
//! The controller is a plain state machine: every input returns the side
//! effects the caller must run (camera moves, fetches). Fetch results come
//! back through [`ViewController::complete`] tagged with the ticket they were
//! issued under; results for anything but the latest ticket are dropped.

use crate::fetch::FetchOutcome;
use crate::models::{
    AlertRecord, DateRange, LatLng, LocationQuery, DEFAULT_LOCATION, DEFAULT_RADIUS_M,
};
use crate::query::{self, AlertQuery, QueryError};

pub const INITIAL_ZOOM: f64 = 6.0;
pub const FLY_TO_ZOOM: f64 = 12.0;
pub const FLY_TO_DURATION_SECS: f64 = 2.0;

pub const LOADING_MESSAGE: &str = "Loading data...";
pub const NO_DATA_MESSAGE: &str = "No deforestation data found for this area and period.";

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No complete date range yet.
    Idle,
    Loading,
    Ready,
    Errored(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub location: LatLng,
    pub radius_m: f64,
    pub date_range: DateRange,
    pub alerts: Vec<AlertRecord>,
    pub phase: Phase,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION,
            radius_m: DEFAULT_RADIUS_M,
            date_range: DateRange::default(),
            alerts: Vec::new(),
            phase: Phase::Idle,
        }
    }
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Errored(msg) => Some(msg),
            _ => None,
        }
    }

    /// User-visible status line, if any.
    pub fn status_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Loading => Some(LOADING_MESSAGE),
            Phase::Errored(msg) => Some(msg),
            Phase::Ready if self.alerts.is_empty() => Some(NO_DATA_MESSAGE),
            Phase::Ready => None,
        }
    }
}

/// Animated camera transition for the map engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMove {
    pub target: LatLng,
    pub zoom: f64,
    pub duration_secs: f64,
}

impl CameraMove {
    pub fn fly_to(target: LatLng) -> Self {
        Self {
            target,
            zoom: FLY_TO_ZOOM,
            duration_secs: FLY_TO_DURATION_SECS,
        }
    }
}

/// Tag identifying one issued fetch. Strictly increasing per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    MoveCamera(CameraMove),
    Fetch { ticket: FetchTicket, query: AlertQuery },
}

#[derive(Debug, Clone, Default)]
pub struct ViewController {
    state: ViewState,
    generation: u64,
    in_flight: Option<FetchTicket>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Apply a validated form submission: move, resize, and fetch.
    pub fn submit(&mut self, query: LocationQuery) -> Vec<Effect> {
        let mut effects = self.set_location(query.location());
        self.set_radius(query.radius_m);
        effects.extend(self.set_date_range(query.date_range()));
        effects
    }

    /// Update the selected location. Never fetches.
    pub fn set_location(&mut self, location: LatLng) -> Vec<Effect> {
        if self.state.location == location {
            return Vec::new();
        }
        self.state.location = location;
        vec![Effect::MoveCamera(CameraMove::fly_to(location))]
    }

    /// Update the search radius. Never fetches or moves the camera.
    pub fn set_radius(&mut self, radius_m: f64) {
        self.state.radius_m = radius_m;
    }

    /// Update the date window. A complete window starts a fetch; an
    /// incomplete one returns the view to idle and orphans any fetch in flight.
    pub fn set_date_range(&mut self, range: DateRange) -> Vec<Effect> {
        self.state.date_range = range;
        if range.is_complete() {
            return self.start_fetch().into_iter().collect();
        }
        self.in_flight = None;
        self.state.alerts.clear();
        self.state.phase = Phase::Idle;
        Vec::new()
    }

    /// Re-issue the fetch for the current location, radius, and dates.
    pub fn retry(&mut self) -> Vec<Effect> {
        self.start_fetch().into_iter().collect()
    }

    fn start_fetch(&mut self) -> Option<Effect> {
        let query = match query::build_query(
            self.state.location,
            self.state.radius_m,
            &self.state.date_range,
        ) {
            Ok(q) => q,
            Err(QueryError::Incomplete) => {
                tracing::debug!("skipping fetch: date range incomplete");
                return None;
            }
        };

        self.generation += 1;
        let ticket = FetchTicket(self.generation);
        self.in_flight = Some(ticket);
        self.state.alerts.clear();
        self.state.phase = Phase::Loading;
        tracing::info!(
            generation = ticket.0,
            lat = query.lat,
            lng = query.lng,
            radius = query.radius,
            start = %query.start,
            end = %query.end,
            "issuing alert fetch"
        );
        Some(Effect::Fetch { ticket, query })
    }

    /// Apply a fetch result. Returns `false` when the ticket was superseded
    /// and the outcome was discarded.
    pub fn complete(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> bool {
        if self.in_flight != Some(ticket) {
            tracing::debug!(
                generation = ticket.0,
                latest = self.generation,
                "discarding stale alert fetch"
            );
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(alerts) => {
                tracing::info!(generation = ticket.0, count = alerts.len(), "alerts loaded");
                self.state.alerts = alerts;
                self.state.phase = Phase::Ready;
            }
            Err(e) => {
                tracing::warn!(generation = ticket.0, "alert fetch failed: {e}");
                self.state.alerts.clear();
                self.state.phase = Phase::Errored(e.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{interpret_response, FetchError};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn delhi_query() -> LocationQuery {
        LocationQuery {
            latitude: 28.6139,
            longitude: 77.209,
            radius_m: 5000.0,
            start_date: date("2024-01-01"),
            end_date: date("2024-01-31"),
        }
    }

    fn alert(intensity: f64) -> AlertRecord {
        AlertRecord {
            lat: 28.6,
            lng: 77.2,
            intensity,
            date: date("2024-01-05"),
        }
    }

    fn fetches(effects: &[Effect]) -> Vec<(FetchTicket, AlertQuery)> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Fetch { ticket, query } => Some((*ticket, *query)),
                _ => None,
            })
            .collect()
    }

    fn camera_moves(effects: &[Effect]) -> Vec<CameraMove> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::MoveCamera(m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_initial_state_is_idle_at_default_location() {
        let c = ViewController::new();
        assert_eq!(c.state().phase, Phase::Idle);
        assert_eq!(c.state().location, DEFAULT_LOCATION);
        assert_eq!(c.state().radius_m, DEFAULT_RADIUS_M);
        assert!(c.state().alerts.is_empty());
        assert!(c.state().status_message().is_none());
    }

    #[test]
    fn test_submit_issues_exactly_one_fetch_with_unmodified_values() {
        let mut c = ViewController::new();
        let effects = c.submit(delhi_query());
        let issued = fetches(&effects);
        assert_eq!(issued.len(), 1);
        let q = issued[0].1;
        assert_eq!(q.lat, 28.6139);
        assert_eq!(q.lng, 77.209);
        assert_eq!(q.radius, 5000.0);
        assert_eq!(q.start, date("2024-01-01"));
        assert_eq!(q.end, date("2024-01-31"));
        assert!(c.state().is_loading());
        assert_eq!(c.state().status_message(), Some(LOADING_MESSAGE));
    }

    #[test]
    fn test_submit_new_location_flies_camera() {
        let mut c = ViewController::new();
        let mut q = delhi_query();
        q.latitude = -3.4653;
        q.longitude = -62.2159;
        let moves = camera_moves(&c.submit(q));
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].target, LatLng::new(-3.4653, -62.2159));
        assert_eq!(moves[0].zoom, FLY_TO_ZOOM);
        assert_eq!(moves[0].duration_secs, FLY_TO_DURATION_SECS);
    }

    #[test]
    fn test_empty_result_is_ready_with_no_data_message() {
        let mut c = ViewController::new();
        let (ticket, _) = fetches(&c.submit(delhi_query()))[0];
        assert!(c.complete(ticket, interpret_response(200, "[]")));
        assert_eq!(c.state().phase, Phase::Ready);
        assert!(c.state().alerts.is_empty());
        assert!(c.state().error().is_none());
        assert_eq!(c.state().status_message(), Some(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_http_500_is_errored_with_message_and_no_alerts() {
        let mut c = ViewController::new();
        let (ticket, _) = fetches(&c.submit(delhi_query()))[0];
        assert!(c.complete(ticket, interpret_response(500, "")));
        assert!(matches!(c.state().phase, Phase::Errored(_)));
        assert!(c.state().alerts.is_empty());
        assert!(c.state().error().unwrap().contains("500"));
    }

    #[test]
    fn test_success_replaces_previous_alerts() {
        let mut c = ViewController::new();
        let (t1, _) = fetches(&c.submit(delhi_query()))[0];
        c.complete(t1, Ok(vec![alert(1.0), alert(2.0)]));
        assert_eq!(c.state().alerts.len(), 2);

        let (t2, _) = fetches(&c.retry())[0];
        assert!(c.state().alerts.is_empty(), "loading must not show stale overlays");
        c.complete(t2, Ok(vec![alert(9.0)]));
        assert_eq!(c.state().alerts, vec![alert(9.0)]);
        assert!(c.state().status_message().is_none());
    }

    #[test]
    fn test_stale_fetch_arriving_late_is_discarded() {
        let mut c = ViewController::new();
        let (t1, _) = fetches(&c.submit(delhi_query()))[0];

        let mut q2 = delhi_query();
        q2.latitude = 10.0;
        let (t2, q2_issued) = fetches(&c.submit(q2))[0];
        assert!(t2 > t1);
        assert_eq!(q2_issued.lat, 10.0);

        assert!(c.complete(t2, Ok(vec![alert(5.0)])));
        assert!(!c.complete(t1, Ok(vec![alert(1.0), alert(2.0), alert(3.0)])));

        assert_eq!(c.state().phase, Phase::Ready);
        assert_eq!(c.state().alerts, vec![alert(5.0)]);
        assert_eq!(c.state().location, LatLng::new(10.0, 77.209));
    }

    #[test]
    fn test_stale_error_does_not_clobber_newer_loading() {
        let mut c = ViewController::new();
        let (t1, _) = fetches(&c.submit(delhi_query()))[0];
        let _ = c.retry();
        assert!(!c.complete(t1, Err(FetchError::Transport("boom".into()))));
        assert!(c.state().is_loading());
        assert!(c.state().error().is_none());
    }

    #[test]
    fn test_duplicate_completion_is_ignored() {
        let mut c = ViewController::new();
        let (t1, _) = fetches(&c.submit(delhi_query()))[0];
        assert!(c.complete(t1, Ok(vec![alert(5.0)])));
        assert!(!c.complete(t1, Err(FetchError::Shape("late".into()))));
        assert_eq!(c.state().phase, Phase::Ready);
    }

    #[test]
    fn test_radius_change_does_not_fetch_or_move_camera() {
        let mut c = ViewController::new();
        let (t1, _) = fetches(&c.submit(delhi_query()))[0];
        c.complete(t1, Ok(vec![alert(5.0)]));

        c.set_radius(12_000.0);
        assert_eq!(c.state().radius_m, 12_000.0);
        assert_eq!(c.state().phase, Phase::Ready);
        assert_eq!(c.state().alerts.len(), 1);
        assert!(c.in_flight.is_none());
    }

    #[test]
    fn test_location_change_moves_camera_without_fetching() {
        let mut c = ViewController::new();
        let (t1, _) = fetches(&c.submit(delhi_query()))[0];

        let effects = c.set_location(LatLng::new(1.0, 2.0));
        assert!(fetches(&effects).is_empty());
        assert_eq!(camera_moves(&effects).len(), 1);
        // the outstanding fetch is still the one that applies
        assert!(c.state().is_loading());
        assert!(c.complete(t1, Ok(vec![])));
    }

    #[test]
    fn test_same_location_does_not_move_camera() {
        let mut c = ViewController::new();
        assert!(c.set_location(DEFAULT_LOCATION).is_empty());
    }

    #[test]
    fn test_completing_dates_by_field_edits_starts_fetch() {
        let mut c = ViewController::new();
        let half = DateRange {
            start: Some(date("2024-02-01")),
            end: None,
        };
        assert!(c.set_date_range(half).is_empty());
        assert_eq!(c.state().phase, Phase::Idle);

        let effects = c.set_date_range(DateRange::new(date("2024-02-01"), date("2024-02-10")));
        assert_eq!(fetches(&effects).len(), 1);
        assert!(c.state().is_loading());
    }

    #[test]
    fn test_clearing_dates_orphans_in_flight_fetch() {
        let mut c = ViewController::new();
        let (t1, _) = fetches(&c.submit(delhi_query()))[0];
        c.set_date_range(DateRange::default());
        assert_eq!(c.state().phase, Phase::Idle);
        assert!(!c.complete(t1, Ok(vec![alert(5.0)])));
        assert!(c.state().alerts.is_empty());
    }

    #[test]
    fn test_retry_without_dates_is_a_no_op() {
        let mut c = ViewController::new();
        assert!(c.retry().is_empty());
        assert_eq!(c.state().phase, Phase::Idle);
    }

    #[test]
    fn test_errored_then_resubmit_recovers() {
        let mut c = ViewController::new();
        let (t1, _) = fetches(&c.submit(delhi_query()))[0];
        c.complete(t1, interpret_response(200, "{}"));
        assert!(c.state().error().unwrap().starts_with("Invalid data format"));

        let (t2, _) = fetches(&c.submit(delhi_query()))[0];
        assert!(c.state().error().is_none());
        c.complete(t2, Ok(vec![alert(8.0)]));
        assert_eq!(c.state().phase, Phase::Ready);
    }
}
