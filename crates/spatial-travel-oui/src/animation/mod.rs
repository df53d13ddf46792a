//! Per-frame animation state

mod highlight;

pub use highlight::{EntityId, GazeHighlight, HighlightAnimator, HighlightState};
