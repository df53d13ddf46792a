//! Transform representing position, rotation, and scale in 3D space
//!
//! Transforms are named after the frames they map between, e.g.
//! `origin_from_anchor` maps anchor-local coordinates into the world origin
//! frame. Composition reads right to left: `origin_from_anchor.compose(&anchor_from_joint)`
//! yields `origin_from_joint`, applying `anchor_from_joint` first.

use serde::{Deserialize, Serialize};

use super::{Point3D, Quaternion, Vector3D};

/// A complete 3D transform (position + rotation + scale)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Point3D,
    pub rotation: Quaternion,
    pub scale: Vector3D,
}

impl Transform {
    /// Identity transform (origin, no rotation, unit scale)
    pub fn identity() -> Self {
        Self {
            position: Point3D::ORIGIN,
            rotation: Quaternion::IDENTITY,
            scale: Vector3D::new(1.0, 1.0, 1.0),
        }
    }

    /// Create a transform with just position
    pub fn from_position(position: Point3D) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Point3D, rotation: Quaternion) -> Self {
        Self {
            position,
            rotation,
            ..Self::identity()
        }
    }

    /// Transform a point from local space to the parent frame
    pub fn transform_point(&self, local: Point3D) -> Point3D {
        let scaled = Vector3D::new(
            local.x * self.scale.x,
            local.y * self.scale.y,
            local.z * self.scale.z,
        );
        let rotated = self.rotation.rotate_vector(scaled);
        self.position + rotated
    }

    /// `self ∘ child`: the transform that applies `child` and then `self`.
    ///
    /// Exact for uniform scale, which is all the hand skeleton and globe
    /// hierarchies use.
    pub fn compose(&self, child: &Transform) -> Transform {
        Transform {
            position: self.transform_point(child.position),
            rotation: self.rotation * child.rotation,
            scale: Vector3D::new(
                self.scale.x * child.scale.x,
                self.scale.y * child.scale.y,
                self.scale.z * child.scale.z,
            ),
        }
    }

    /// Pre-rotate: the new rotation is applied after the existing one,
    /// i.e. `rotation = delta * rotation`.
    pub fn rotate(&mut self, delta: Quaternion) {
        self.rotation = delta * self.rotation;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        assert_eq!(t.position, Point3D::ORIGIN);
        assert_eq!(t.rotation, Quaternion::IDENTITY);
    }

    #[test]
    fn test_transform_point() {
        let t = Transform::from_position(Point3D::new(10.0, 0.0, 0.0));
        let world = t.transform_point(Point3D::new(1.0, 0.0, 0.0));
        assert_eq!(world, Point3D::new(11.0, 0.0, 0.0));
    }

    #[test]
    fn test_compose_matches_sequential_application() {
        let origin_from_anchor = Transform::from_position_rotation(
            Point3D::new(0.0, 1.2, -0.5),
            Quaternion::from_yaw(PI / 2.0),
        );
        let anchor_from_joint = Transform::from_position(Point3D::new(0.05, 0.0, 0.0));

        let origin_from_joint = origin_from_anchor.compose(&anchor_from_joint);
        let expected =
            origin_from_anchor.transform_point(anchor_from_joint.transform_point(Point3D::ORIGIN));

        assert!(origin_from_joint.position.distance(&expected) < 1e-5);
        // +X in the anchor frame ends up along -Z after the yaw
        assert!((origin_from_joint.position.z - (-0.55)).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_left_multiplies() {
        let mut t = Transform::from_position_rotation(
            Point3D::ORIGIN,
            Quaternion::from_axis_angle(Vector3D::RIGHT, 0.3),
        );
        let delta = Quaternion::from_yaw(0.2);
        let expected = delta * t.rotation;
        t.rotate(delta);
        assert_eq!(t.rotation, expected);
    }
}
