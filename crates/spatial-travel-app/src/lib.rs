//! spatial-travel-app: headless travel globe session
//!
//! Wires the interaction core together without a renderer:
//! - Loads destinations and lays out globe markers
//! - Runs pinch detection over a scripted hand stream
//! - Replays host gestures (gaze, drag, tap) through the input arbiter
//! - Reports marker state, flight paths and the final selection

mod handlers;
mod script;
mod state;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use spatial_travel_oui::{
    config::InteractionConfig,
    destination::{AppModel, DestinationSelector, LoadingState},
    globe::FlightPath,
    input::{InputMethod, PinchDetector, StartOutcome},
};

pub use handlers::{handle_event, SessionEvent};
pub use script::{gesture_tour, ScriptedHands};
pub use state::{MarkerState, SessionState};

/// Knobs for one demo run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: InteractionConfig,
    /// Highlight frames to run while dwelling on the picked destination
    pub ticks: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: InteractionConfig::default(),
            ticks: 30,
        }
    }
}

/// What a session ended with
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub markers: Vec<MarkerState>,
    pub flights: Vec<FlightPath>,
    pub pinch_events: usize,
    pub active_method: InputMethod,
    pub globe_yaw: f32,
    pub selected: Option<String>,
}

/// Run the scripted demo session
pub async fn run_demo(options: RunOptions) -> Result<SessionReport> {
    let mut model = AppModel::default();
    model.load_destinations().await;
    if let LoadingState::Failed(reason) = model.loading_state() {
        anyhow::bail!("failed to load destinations: {reason}");
    }

    let mut state = SessionState::new(&options.config, model);
    info!(markers = state.markers.len(), "Globe laid out");

    let detector =
        PinchDetector::new(ScriptedHands::pinch_and_release(), options.config.pinch.clone());
    let mut pinches = detector.subscribe();
    let outcome = detector
        .start()
        .await
        .context("hand tracking session failed")?;
    if outcome == StartOutcome::Unsupported {
        warn!("Continuing without hand tracking");
    }
    detector.stop();

    let mut pinch_events = 0;
    while let Ok(event) = pinches.try_recv() {
        pinch_events += 1;
        handle_event(SessionEvent::Pinch(event), &mut state);
    }

    for event in gesture_tour(&["Lisbon", "Marrakech"], "Kyoto", options.ticks) {
        handle_event(event, &mut state);
    }

    let flights = flight_paths(&state)?;
    let selected = state.model.selected().map(|d| d.name.clone());
    info!(selected = ?selected, method = %state.active_method(), "Session finished");

    Ok(SessionReport {
        markers: state.marker_states(),
        flights,
        pinch_events,
        active_method: state.active_method(),
        globe_yaw: state.globe_transform.rotation.angle(),
        selected,
    })
}

/// Arcs from the first destination to every other one
fn flight_paths(state: &SessionState) -> Result<Vec<FlightPath>> {
    let destinations = state.model.destinations();
    let Some((origin, rest)) = destinations.split_first() else {
        return Ok(Vec::new());
    };
    rest.iter()
        .map(|to| {
            state
                .layout
                .flight_path(origin, to)
                .with_context(|| format!("no flight path from {} to {}", origin.name, to.name))
        })
        .collect()
}
