//! Placement of destination markers and flight paths on the globe

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::animation::{EntityId, GazeHighlight, HighlightAnimator};
use crate::config::{GlobeConfig, InteractionConfig};
use crate::destination::Destination;
use crate::error::ArcError;
use crate::spatial::{arc_points, ArcOptions, ArcPath, SpherePoint};

/// A destination pinned to the globe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub entity: EntityId,
    pub destination_id: Uuid,
    pub name: String,
    pub position: SpherePoint,
}

/// Arc between two destinations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightPath {
    pub from: Uuid,
    pub to: Uuid,
    pub distance_km: f64,
    pub path: ArcPath,
}

/// Globe geometry plus arc shape
#[derive(Debug, Clone, Default)]
pub struct GlobeLayout {
    globe: GlobeConfig,
    arc: ArcOptions,
}

impl GlobeLayout {
    pub fn new(globe: GlobeConfig, arc: ArcOptions) -> Self {
        Self { globe, arc }
    }

    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(config.globe.clone(), config.arc)
    }

    pub fn globe(&self) -> &GlobeConfig {
        &self.globe
    }

    pub fn arc_options(&self) -> ArcOptions {
        self.arc
    }

    /// Marker position just above the surface
    pub fn marker_position(&self, destination: &Destination) -> SpherePoint {
        destination.coordinate.to_sphere_point(self.globe.marker_radius())
    }

    /// One marker per destination. Entity ids follow list order starting at 1.
    pub fn markers(&self, destinations: &[Destination]) -> Vec<Marker> {
        destinations
            .iter()
            .enumerate()
            .map(|(i, destination)| Marker {
                entity: EntityId(i as u64 + 1),
                destination_id: destination.id,
                name: destination.name.clone(),
                position: self.marker_position(destination),
            })
            .collect()
    }

    /// Track every marker in `animator` so gaze can highlight it
    pub fn register_markers(&self, markers: &[Marker], animator: &mut HighlightAnimator) {
        for marker in markers {
            animator.track(marker.entity, GazeHighlight::new(marker.destination_id.to_string()));
        }
        debug!(count = markers.len(), "Registered globe markers");
    }

    /// Raised arc between two destinations, starting and ending on the
    /// globe surface
    pub fn flight_path(
        &self,
        from: &Destination,
        to: &Destination,
    ) -> Result<FlightPath, ArcError> {
        let start = from.coordinate.to_sphere_point(self.globe.radius);
        let end = to.coordinate.to_sphere_point(self.globe.radius);
        let path = arc_points(start, end, self.arc)?;

        Ok(FlightPath {
            from: from.id,
            to: to.id,
            distance_km: from.coordinate.distance_km(&to.coordinate),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GlobeLayout {
        GlobeLayout::from_config(&InteractionConfig::default())
    }

    #[test]
    fn markers_sit_above_the_surface() {
        let layout = layout();
        let markers = layout.markers(Destination::samples());
        assert_eq!(markers.len(), Destination::samples().len());
        for marker in &markers {
            assert!((marker.position.magnitude() - 0.41).abs() < 1e-4, "{}", marker.name);
        }
    }

    #[test]
    fn marker_entities_are_distinct() {
        let markers = layout().markers(Destination::samples());
        let ids: Vec<EntityId> = markers.iter().map(|m| m.entity).collect();
        assert_eq!(ids, (1..=markers.len() as u64).map(EntityId).collect::<Vec<_>>());
    }

    #[test]
    fn register_tracks_each_marker() {
        let layout = layout();
        let markers = layout.markers(Destination::samples());
        let mut animator = HighlightAnimator::default();
        layout.register_markers(&markers, &mut animator);

        assert_eq!(animator.len(), markers.len());
        let kyoto = &markers[0];
        assert_eq!(
            animator.find_by_destination(&kyoto.destination_id.to_string()),
            Some(kyoto.entity)
        );
    }

    #[test]
    fn flight_path_spans_destinations() {
        let layout = layout();
        let lisbon = &Destination::samples()[4];
        let kyoto = &Destination::samples()[0];

        let flight = layout.flight_path(lisbon, kyoto).unwrap();
        assert_eq!(flight.path.len(), 33);
        assert!(flight.distance_km > 10_000.0 && flight.distance_km < 12_000.0);

        let start = flight.path.start().unwrap();
        let expected = lisbon.coordinate.to_sphere_point(0.4);
        assert!(start.distance(&expected) < 1e-4);
        assert!((flight.path.apex_radius() - 0.55).abs() < 1e-3);
    }

    #[test]
    fn flight_path_honours_segment_override() {
        let layout =
            GlobeLayout::new(GlobeConfig::default(), ArcOptions::default().with_segments(8));
        let samples = Destination::samples();
        let flight = layout.flight_path(&samples[1], &samples[2]).unwrap();
        assert_eq!(flight.path.segments(), 8);
    }
}
