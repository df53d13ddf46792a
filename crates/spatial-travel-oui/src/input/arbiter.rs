//! Input method arbitration
//!
//! Tracks which input modality the user last interacted with and turns taps
//! on highlighted markers into selections. Drag gestures spin the globe
//! about +Y.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

use super::PinchEvent;
use crate::animation::GazeHighlight;
use crate::config::DragConfig;
use crate::destination::DestinationSelector;
use crate::spatial::{Quaternion, Transform, Vector3D};

/// Modality of the most recent interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    /// Look and pinch from a distance
    #[default]
    Indirect,
    /// Hand reaching the target
    Direct,
    /// Tap or drag recognised by the host
    Gesture,
}

impl fmt::Display for InputMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputMethod::Indirect => "indirect",
            InputMethod::Direct => "direct",
            InputMethod::Gesture => "gesture",
        };
        f.write_str(name)
    }
}

/// A request to select the destination behind a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionIntent {
    pub destination_id: String,
    pub method: InputMethod,
    pub at: DateTime<Utc>,
}

/// Result of a tap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The destination was handed to the selector
    Selected(Uuid),
    /// The tapped marker names a destination the selector does not know
    Unresolved { destination_id: String },
    /// Nothing was under the tap
    NoTarget,
}

impl SelectionOutcome {
    pub fn selected(&self) -> Option<Uuid> {
        match self {
            SelectionOutcome::Selected(id) => Some(*id),
            _ => None,
        }
    }
}

/// Entry points for host gestures. Pinch observation is optional.
pub trait SpatialInputHandler {
    fn handle_tap(
        &mut self,
        highlight: Option<&GazeHighlight>,
        selector: &mut dyn DestinationSelector,
    ) -> SelectionOutcome;

    fn handle_drag(&mut self, translation: Vector3D, transform: &mut Transform);

    fn observe_pinch(&mut self, _event: &PinchEvent) {}
}

#[derive(Debug, Clone, Default)]
pub struct InputArbiter {
    config: DragConfig,
    active_method: InputMethod,
    last_interaction: Option<DateTime<Utc>>,
    last_intent: Option<SelectionIntent>,
}

impl InputArbiter {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn active_method(&self) -> InputMethod {
        self.active_method
    }

    pub fn last_interaction(&self) -> Option<DateTime<Utc>> {
        self.last_interaction
    }

    pub fn last_intent(&self) -> Option<&SelectionIntent> {
        self.last_intent.as_ref()
    }

    fn interact(&mut self, method: InputMethod) -> DateTime<Utc> {
        let now = Utc::now();
        self.active_method = method;
        self.last_interaction = Some(now);
        now
    }

    fn resolve(
        intent: &SelectionIntent,
        selector: &mut dyn DestinationSelector,
    ) -> SelectionOutcome {
        let found = Uuid::parse_str(&intent.destination_id)
            .ok()
            .and_then(|id| selector.destinations().iter().find(|d| d.id == id).cloned());

        match found {
            Some(destination) => {
                let id = destination.id;
                selector.select_destination(destination);
                SelectionOutcome::Selected(id)
            }
            None => {
                warn!(
                    destination_id = %intent.destination_id,
                    method = %intent.method,
                    "Selection intent does not match any destination"
                );
                SelectionOutcome::Unresolved {
                    destination_id: intent.destination_id.clone(),
                }
            }
        }
    }
}

impl SpatialInputHandler for InputArbiter {
    fn handle_tap(
        &mut self,
        highlight: Option<&GazeHighlight>,
        selector: &mut dyn DestinationSelector,
    ) -> SelectionOutcome {
        let at = self.interact(InputMethod::Gesture);

        let Some(highlight) = highlight else {
            return SelectionOutcome::NoTarget;
        };

        let intent = SelectionIntent {
            destination_id: highlight.destination_id.clone(),
            method: InputMethod::Gesture,
            at,
        };
        let outcome = Self::resolve(&intent, selector);
        self.last_intent = Some(intent);
        outcome
    }

    fn handle_drag(&mut self, translation: Vector3D, transform: &mut Transform) {
        let yaw = translation.x * self.config.sensitivity;
        transform.rotate(Quaternion::from_yaw(yaw));
        self.interact(InputMethod::Gesture);
    }

    /// A pinch starting means the hand is on the target
    fn observe_pinch(&mut self, event: &PinchEvent) {
        if let PinchEvent::Started { chirality, .. } = event {
            debug!(%chirality, "Pinch started, switching to direct input");
            self.interact(InputMethod::Direct);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::Destination;
    use crate::input::Chirality;
    use crate::spatial::Point3D;

    #[derive(Default)]
    struct RecordingSelector {
        destinations: Vec<Destination>,
        selected: Vec<Destination>,
    }

    impl RecordingSelector {
        fn with_samples() -> Self {
            Self {
                destinations: Destination::samples().to_vec(),
                selected: Vec::new(),
            }
        }
    }

    impl DestinationSelector for RecordingSelector {
        fn destinations(&self) -> &[Destination] {
            &self.destinations
        }

        fn select_destination(&mut self, destination: Destination) {
            self.selected.push(destination);
        }
    }

    fn quat_close(a: Quaternion, b: Quaternion) -> bool {
        let dot = a.x * b.x + a.y * b.y + a.z * b.z + a.w * b.w;
        (dot.abs() - 1.0).abs() < 1e-5
    }

    #[test]
    fn defaults_to_indirect() {
        let arbiter = InputArbiter::default();
        assert_eq!(arbiter.active_method(), InputMethod::Indirect);
        assert!(arbiter.last_interaction().is_none());
    }

    #[test]
    fn tap_on_known_marker_selects() {
        let mut arbiter = InputArbiter::default();
        let mut selector = RecordingSelector::with_samples();
        let target = Destination::samples()[1].clone();
        let highlight = GazeHighlight::new(target.id.to_string());

        let outcome = arbiter.handle_tap(Some(&highlight), &mut selector);

        assert_eq!(outcome, SelectionOutcome::Selected(target.id));
        assert_eq!(selector.selected, vec![target]);
        assert_eq!(arbiter.active_method(), InputMethod::Gesture);
        assert!(arbiter.last_interaction().is_some());
        assert_eq!(arbiter.last_intent().map(|i| i.method), Some(InputMethod::Gesture));
    }

    #[test]
    fn tap_matches_uppercase_id() {
        let mut arbiter = InputArbiter::default();
        let mut selector = RecordingSelector::with_samples();
        let target = &Destination::samples()[0];
        let highlight = GazeHighlight::new(target.id.to_string().to_uppercase());

        let outcome = arbiter.handle_tap(Some(&highlight), &mut selector);
        assert_eq!(outcome.selected(), Some(target.id));
    }

    #[test]
    fn tap_without_target_only_updates_method() {
        let mut arbiter = InputArbiter::default();
        let mut selector = RecordingSelector::with_samples();

        let outcome = arbiter.handle_tap(None, &mut selector);

        assert_eq!(outcome, SelectionOutcome::NoTarget);
        assert!(selector.selected.is_empty());
        assert_eq!(arbiter.active_method(), InputMethod::Gesture);
        assert!(arbiter.last_interaction().is_some());
        assert!(arbiter.last_intent().is_none());
    }

    #[test]
    fn tap_with_unknown_id_is_unresolved() {
        let mut arbiter = InputArbiter::default();
        let mut selector = RecordingSelector::with_samples();

        for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
            let highlight = GazeHighlight::new(id.clone());
            let outcome = arbiter.handle_tap(Some(&highlight), &mut selector);
            assert_eq!(outcome, SelectionOutcome::Unresolved { destination_id: id });
        }
        assert!(selector.selected.is_empty());
        assert_eq!(arbiter.active_method(), InputMethod::Gesture);
    }

    #[test]
    fn drag_yaws_globe() {
        let mut arbiter = InputArbiter::default();
        let mut transform = Transform::identity();

        arbiter.handle_drag(Vector3D::new(100.0, 0.0, 0.0), &mut transform);

        assert!(quat_close(transform.rotation, Quaternion::from_yaw(0.5)));
        assert!((transform.rotation.angle() - 0.5).abs() < 1e-4);
        assert_eq!(arbiter.active_method(), InputMethod::Gesture);
    }

    #[test]
    fn drag_composes_before_existing_rotation() {
        let mut arbiter = InputArbiter::default();
        let tilt = Quaternion::from_axis_angle(Vector3D::RIGHT, 0.3);
        let mut transform = Transform::from_position_rotation(Point3D::ORIGIN, tilt);

        arbiter.handle_drag(Vector3D::new(100.0, 0.0, 0.0), &mut transform);

        assert!(quat_close(transform.rotation, Quaternion::from_yaw(0.5) * tilt));
        assert!(!quat_close(transform.rotation, tilt * Quaternion::from_yaw(0.5)));
    }

    #[test]
    fn drag_ignores_vertical_translation() {
        let mut arbiter = InputArbiter::default();
        let mut transform = Transform::identity();
        arbiter.handle_drag(Vector3D::new(0.0, 250.0, 0.0), &mut transform);
        assert!(quat_close(transform.rotation, Quaternion::IDENTITY));
    }

    #[test]
    fn pinch_start_switches_to_direct() {
        let mut arbiter = InputArbiter::default();
        arbiter.handle_drag(Vector3D::new(1.0, 0.0, 0.0), &mut Transform::identity());

        arbiter.observe_pinch(&PinchEvent::Started {
            chirality: Chirality::Right,
            position: Point3D::ORIGIN,
        });
        assert_eq!(arbiter.active_method(), InputMethod::Direct);

        arbiter.observe_pinch(&PinchEvent::Ended {
            chirality: Chirality::Right,
        });
        assert_eq!(arbiter.active_method(), InputMethod::Direct);
    }
}
