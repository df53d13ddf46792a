//! spatial-travel-oui: interaction core for a spatial travel globe
//!
//! This crate provides:
//! - Geographic projection onto a sphere and haversine distances
//! - Raised great-circle flight-path arcs
//! - Pinch detection from hand skeleton samples
//! - Gaze highlight easing for destination markers
//! - Input method arbitration turning taps and drags into selections
//! - The destination catalogue and selection model

pub mod animation;
pub mod config;
pub mod destination;
pub mod error;
pub mod globe;
pub mod input;
pub mod spatial;

// Re-export commonly used types
pub use animation::{EntityId, GazeHighlight, HighlightAnimator};
pub use config::InteractionConfig;
pub use destination::{AppModel, Destination, DestinationSelector, DestinationService};
pub use error::{OuiError, Result};
pub use globe::{FlightPath, GlobeLayout, Marker};
pub use input::{
    Chirality, HandSample, HandTrackingProvider, InputArbiter, InputMethod, PinchDetector,
    PinchEvent, SelectionOutcome, SpatialInputHandler,
};
pub use spatial::{
    arc_points, geographic_to_cartesian, haversine_distance, GeoCoordinate, Point3D, Transform,
    Vector3D,
};
