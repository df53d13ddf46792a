//! Raised great-circle arcs for flight-path visualisation

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::{Point3D, SpherePoint};
use crate::error::ArcError;

/// Shape parameters of a flight-path arc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcOptions {
    /// Number of segments; the path has `segments + 1` points
    pub segments: usize,
    /// Extra radial height at the midpoint, in sphere units
    pub arc_height: f32,
}

impl Default for ArcOptions {
    fn default() -> Self {
        Self {
            segments: 32,
            arc_height: 0.15,
        }
    }
}

impl ArcOptions {
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    pub fn with_arc_height(mut self, arc_height: f32) -> Self {
        self.arc_height = arc_height;
        self
    }
}

/// Ordered points of an arc, parameterised by `t = i / segments`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcPath {
    points: Vec<SpherePoint>,
}

impl ArcPath {
    pub fn points(&self) -> &[SpherePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<SpherePoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<&SpherePoint> {
        self.points.first()
    }

    pub fn end(&self) -> Option<&SpherePoint> {
        self.points.last()
    }

    /// Highest radial distance along the path
    pub fn apex_radius(&self) -> f32 {
        self.points.iter().map(Point3D::magnitude).fold(0.0, f32::max)
    }
}

impl IntoIterator for ArcPath {
    type Item = SpherePoint;
    type IntoIter = std::vec::IntoIter<SpherePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

/// Build an arc from `start` to `end` lifted above the sphere surface.
///
/// Each sample is slerped between the endpoints and pushed outward by
/// `sin(t·π) · arc_height`, so the lift vanishes at both ends.
pub fn arc_points(
    start: SpherePoint,
    end: SpherePoint,
    options: ArcOptions,
) -> Result<ArcPath, ArcError> {
    if options.segments == 0 {
        return Err(ArcError::NoSegments);
    }

    let a = start.to_vector();
    let b = end.to_vector();
    if a.is_zero() {
        return Err(ArcError::DegenerateEndpoint { endpoint: "start" });
    }
    if b.is_zero() {
        return Err(ArcError::DegenerateEndpoint { endpoint: "end" });
    }

    let points = (0..=options.segments)
        .map(|i| {
            let t = i as f32 / options.segments as f32;
            let base = a.slerp(&b, t);
            let lift = (t * PI).sin() * options.arc_height;
            (base.normalize() * (base.magnitude() + lift)).to_point()
        })
        .collect();

    Ok(ArcPath { points })
}
