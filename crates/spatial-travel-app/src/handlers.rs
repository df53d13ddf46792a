//! Session event handling

use spatial_travel_oui::{
    input::{PinchEvent, SelectionOutcome, SpatialInputHandler},
    spatial::Vector3D,
};
use tracing::{debug, info};

use crate::state::SessionState;

/// Something the host reported during a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Gaze landed on the marker of the named destination
    GazeAt(String),
    /// Gaze left every marker
    GazeAway,
    Tap,
    Drag(Vector3D),
    Pinch(PinchEvent),
    /// Advance the highlight animation by this many frames
    Tick(u32),
}

/// Apply one event. Returns the selection outcome for taps.
pub fn handle_event<H: SpatialInputHandler>(
    event: SessionEvent,
    state: &mut SessionState<H>,
) -> Option<SelectionOutcome> {
    match event {
        SessionEvent::GazeAt(name) => {
            let entity = state.marker_for(&name).map(|m| m.entity);
            if entity.is_none() {
                debug!(destination = %name, "Gaze target has no marker");
            }
            state.set_gaze(entity);
            None
        }
        SessionEvent::GazeAway => {
            state.set_gaze(None);
            None
        }
        SessionEvent::Tap => {
            let outcome = state.tap();
            info!(?outcome, "Tap handled");
            Some(outcome)
        }
        SessionEvent::Drag(translation) => {
            state.drag(translation);
            None
        }
        SessionEvent::Pinch(pinch) => {
            state.handler.observe_pinch(&pinch);
            None
        }
        SessionEvent::Tick(frames) => {
            for _ in 0..frames {
                state.tick();
            }
            None
        }
    }
}
