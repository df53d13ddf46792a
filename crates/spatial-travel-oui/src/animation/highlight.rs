//! Gaze highlight easing for destination markers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::config::HighlightConfig;

/// Identifier of a renderer entity. The animator never owns entity lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Highlight metadata attached to a gaze-interactive marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazeHighlight {
    pub destination_id: String,
    pub default_radius: f32,
    pub highlighted_radius: f32,
    pub is_highlighted: bool,
}

impl GazeHighlight {
    pub fn new(destination_id: impl Into<String>) -> Self {
        Self {
            destination_id: destination_id.into(),
            default_radius: 0.012,
            highlighted_radius: 0.018,
            is_highlighted: false,
        }
    }

    pub fn with_radii(mut self, default_radius: f32, highlighted_radius: f32) -> Self {
        self.default_radius = default_radius;
        self.highlighted_radius = highlighted_radius;
        self
    }
}

/// Easing state of one tracked entity
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightState {
    pub highlight: GazeHighlight,
    pub target_scale: f32,
    pub current_scale: f32,
}

impl HighlightState {
    /// Marker radius implied by the current scale, between the resting and
    /// highlighted radii.
    pub fn radius(&self, config: &HighlightConfig) -> f32 {
        let span = config.highlighted_scale - config.resting_scale;
        let t = if span.abs() > f32::EPSILON {
            ((self.current_scale - config.resting_scale) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let h = &self.highlight;
        h.default_radius + (h.highlighted_radius - h.default_radius) * t
    }

    fn step(&mut self, smoothing: f32) {
        self.current_scale += (self.target_scale - self.current_scale) * smoothing;
    }
}

/// Registry of highlight-tracked entities, eased once per render tick
#[derive(Debug, Clone, Default)]
pub struct HighlightAnimator {
    config: HighlightConfig,
    entities: HashMap<EntityId, HighlightState>,
}

impl HighlightAnimator {
    pub fn new(config: HighlightConfig) -> Self {
        Self {
            config,
            entities: HashMap::new(),
        }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    fn target_for(&self, highlighted: bool) -> f32 {
        if highlighted {
            self.config.highlighted_scale
        } else {
            self.config.resting_scale
        }
    }

    /// Start tracking an entity at the resting scale. Re-tracking replaces
    /// the metadata but keeps the current scale.
    pub fn track(&mut self, entity: EntityId, highlight: GazeHighlight) {
        let target_scale = self.target_for(highlight.is_highlighted);
        let current_scale = self
            .entities
            .get(&entity)
            .map_or(self.config.resting_scale, |s| s.current_scale);
        self.entities.insert(
            entity,
            HighlightState {
                highlight,
                target_scale,
                current_scale,
            },
        );
    }

    pub fn untrack(&mut self, entity: EntityId) -> Option<HighlightState> {
        self.entities.remove(&entity)
    }

    /// Set an entity's highlight flag. Returns false for untracked entities.
    pub fn set_highlighted(&mut self, entity: EntityId, highlighted: bool) -> bool {
        let target = self.target_for(highlighted);
        match self.entities.get_mut(&entity) {
            Some(state) => {
                state.highlight.is_highlighted = highlighted;
                state.target_scale = target;
                true
            }
            None => false,
        }
    }

    /// Ease every tracked entity one step toward its target
    pub fn tick(&mut self) {
        let smoothing = self.config.smoothing;
        for state in self.entities.values_mut() {
            state.step(smoothing);
        }
    }

    /// Ease only the listed entities; everything else is left untouched.
    /// Unknown ids are ignored.
    pub fn tick_entities(&mut self, entities: impl IntoIterator<Item = EntityId>) {
        let smoothing = self.config.smoothing;
        for entity in entities {
            if let Some(state) = self.entities.get_mut(&entity) {
                state.step(smoothing);
            }
        }
    }

    pub fn scale(&self, entity: EntityId) -> Option<f32> {
        self.entities.get(&entity).map(|s| s.current_scale)
    }

    pub fn state(&self, entity: EntityId) -> Option<&HighlightState> {
        self.entities.get(&entity)
    }

    pub fn highlight(&self, entity: EntityId) -> Option<&GazeHighlight> {
        self.entities.get(&entity).map(|s| &s.highlight)
    }

    /// Current scale of every tracked entity, for the renderer
    pub fn scales(&self) -> impl Iterator<Item = (EntityId, f32)> + '_ {
        self.entities.iter().map(|(id, s)| (*id, s.current_scale))
    }

    pub fn find_by_destination(&self, destination_id: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, s)| s.highlight.destination_id == destination_id)
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
