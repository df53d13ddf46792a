//! State of a running globe session

use serde::Serialize;
use spatial_travel_oui::{
    animation::{EntityId, HighlightAnimator},
    config::InteractionConfig,
    destination::{AppModel, DestinationSelector},
    globe::{GlobeLayout, Marker},
    input::{InputArbiter, InputMethod, SelectionOutcome, SpatialInputHandler},
    spatial::{Transform, Vector3D},
};

/// Everything one session mutates. `H` is the input handler, swapped out in
/// tests.
pub struct SessionState<H: SpatialInputHandler = InputArbiter> {
    pub model: AppModel,
    pub layout: GlobeLayout,
    pub markers: Vec<Marker>,
    pub animator: HighlightAnimator,
    pub handler: H,
    pub globe_transform: Transform,
    pub gaze_target: Option<EntityId>,
    pub ticks: u64,
}

impl SessionState<InputArbiter> {
    pub fn new(config: &InteractionConfig, model: AppModel) -> Self {
        Self::with_handler(config, model, InputArbiter::new(config.drag.clone()))
    }

    pub fn active_method(&self) -> InputMethod {
        self.handler.active_method()
    }
}

impl<H: SpatialInputHandler> SessionState<H> {
    /// Lay out markers for the model's destinations and start tracking them
    pub fn with_handler(config: &InteractionConfig, model: AppModel, handler: H) -> Self {
        let layout = GlobeLayout::from_config(config);
        let markers = layout.markers(model.destinations());
        let mut animator = HighlightAnimator::new(config.highlight.clone());
        layout.register_markers(&markers, &mut animator);

        Self {
            model,
            layout,
            markers,
            animator,
            handler,
            globe_transform: Transform::identity(),
            gaze_target: None,
            ticks: 0,
        }
    }

    pub fn marker_for(&self, destination_name: &str) -> Option<&Marker> {
        self.markers
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(destination_name))
    }

    /// Move gaze onto `entity`, or off every marker with `None`
    pub fn set_gaze(&mut self, entity: Option<EntityId>) {
        if self.gaze_target == entity {
            return;
        }
        if let Some(previous) = self.gaze_target.take() {
            self.animator.set_highlighted(previous, false);
        }
        if let Some(next) = entity {
            if self.animator.set_highlighted(next, true) {
                self.gaze_target = Some(next);
            }
        }
    }

    pub fn tap(&mut self) -> SelectionOutcome {
        let highlight = self
            .gaze_target
            .and_then(|entity| self.animator.highlight(entity))
            .cloned();
        self.handler.handle_tap(highlight.as_ref(), &mut self.model)
    }

    pub fn drag(&mut self, translation: Vector3D) {
        self.handler.handle_drag(translation, &mut self.globe_transform);
    }

    pub fn tick(&mut self) {
        self.animator.tick();
        self.ticks = self.ticks.wrapping_add(1);
    }

    /// Snapshot for reporting
    pub fn marker_states(&self) -> Vec<MarkerState> {
        self.markers
            .iter()
            .map(|marker| MarkerState {
                name: marker.name.clone(),
                position: [marker.position.x, marker.position.y, marker.position.z],
                scale: self.animator.scale(marker.entity).unwrap_or(1.0),
                highlighted: self
                    .animator
                    .highlight(marker.entity)
                    .is_some_and(|h| h.is_highlighted),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerState {
    pub name: String,
    pub position: [f32; 3],
    pub scale: f32,
    pub highlighted: bool,
}
