//! 3D point representation

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use super::Vector3D;

/// A point in 3D space (world, anchor or globe-local, depending on context)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3D {
    /// Origin point (0, 0, 0)
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new 3D point
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point3D) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance, for threshold comparisons
    pub fn distance_squared(&self, other: &Point3D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(&self, other: &Point3D) -> Self {
        self.lerp(other, 0.5)
    }

    /// Linear interpolation between two points
    pub fn lerp(&self, other: &Point3D, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Distance from the origin. For globe points this is the radius.
    pub fn magnitude(&self) -> f32 {
        self.to_vector().magnitude()
    }

    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Convert to a Vector3D (from origin)
    pub fn to_vector(&self) -> Vector3D {
        Vector3D::new(self.x, self.y, self.z)
    }
}

impl Add<Vector3D> for Point3D {
    type Output = Point3D;

    fn add(self, rhs: Vector3D) -> Self::Output {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3D {
    type Output = Vector3D;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Point3D {
    type Output = Point3D;

    fn mul(self, rhs: f32) -> Self::Output {
        Point3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point3D::ORIGIN;
        let b = Point3D::new(3.0, 4.0, 0.0);
        assert!((a.distance(&b) - 5.0).abs() < 0.0001);
        assert!((a.distance_squared(&b) - 25.0).abs() < 0.0001);
    }

    #[test]
    fn test_midpoint() {
        let thumb = Point3D::new(0.1, 1.0, -0.3);
        let index = Point3D::new(0.11, 1.0, -0.3);
        let mid = thumb.midpoint(&index);
        assert!((mid.x - 0.105).abs() < 1e-6);
        assert_eq!(mid.y, 1.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point3D::new(1.0, 2.0, 3.0).is_finite());
        assert!(!Point3D::new(f32::NAN, 0.0, 0.0).is_finite());
        assert!(!Point3D::new(0.0, f32::INFINITY, 0.0).is_finite());
    }
}
