//! 3D vector representation for directions, translations and sphere offsets

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::ops::{Add, Mul, Neg, Sub};

use super::{Point3D, Quaternion};

/// Below this angular separation (radians) slerp degrades to a plain lerp,
/// since `sin(omega)` approaches zero.
pub const SLERP_LINEAR_THRESHOLD: f32 = 0.001;

/// Squared cross-product length below which two unit vectors count as
/// exactly opposite
const ANTIPODAL_AXIS_EPSILON: f32 = 1e-12;

/// A vector in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3D {
    /// Zero vector
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit vector pointing right (+X)
    pub const RIGHT: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit vector pointing up (+Y), the globe's spin axis
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    /// Create a new 3D vector
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Calculate the magnitude (length) of the vector
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Calculate the squared magnitude (faster, avoids sqrt)
    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Normalize the vector (make it unit length). The zero vector stays zero.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
                z: self.z / mag,
            }
        } else {
            Self::ZERO
        }
    }

    /// True for vectors too short to carry a direction
    pub fn is_zero(&self) -> bool {
        self.magnitude_squared() <= f32::EPSILON * f32::EPSILON
    }

    /// Calculate the dot product with another vector
    pub fn dot(&self, other: &Vector3D) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Calculate the cross product with another vector
    pub fn cross(&self, other: &Vector3D) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Linear interpolation between two vectors
    pub fn lerp(&self, other: &Vector3D, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Angle between the directions of two vectors, in radians
    pub fn angle(&self, other: &Vector3D) -> f32 {
        let a = self.normalize();
        let b = other.normalize();
        a.cross(&b).magnitude().atan2(a.dot(&b))
    }

    /// Some unit vector perpendicular to `self`. Deterministic: prefers the
    /// axis obtained by crossing with +Y, falling back to +X near the poles.
    pub fn any_perpendicular(&self) -> Self {
        let candidate = self.cross(&Self::UP);
        if candidate.magnitude_squared() > 1e-6 {
            candidate.normalize()
        } else {
            self.cross(&Self::RIGHT).normalize()
        }
    }

    /// Spherical linear interpolation.
    ///
    /// The angle is measured between the normalised directions while the
    /// weights are applied to the input vectors, so inputs of equal length
    /// stay on their sphere. Nearly parallel inputs fall back to [`lerp`].
    /// Nearly opposite inputs rotate `self` toward `other` about their cross
    /// product, or about [`any_perpendicular`] when they are exactly opposite.
    ///
    /// [`lerp`]: Vector3D::lerp
    /// [`any_perpendicular`]: Vector3D::any_perpendicular
    pub fn slerp(&self, other: &Vector3D, t: f32) -> Self {
        let omega = self.angle(other);

        if omega < SLERP_LINEAR_THRESHOLD {
            return self.lerp(other, t);
        }

        if omega > PI - SLERP_LINEAR_THRESHOLD {
            let start_len = self.magnitude();
            let end_len = other.magnitude();
            let cross = self.normalize().cross(&other.normalize());
            let axis = if cross.magnitude_squared() > ANTIPODAL_AXIS_EPSILON {
                cross
            } else {
                self.any_perpendicular()
            };
            let rotation = Quaternion::from_axis_angle(axis, omega * t);
            let length = start_len + (end_len - start_len) * t;
            return rotation.rotate_vector(self.normalize()) * length;
        }

        let sin_omega = omega.sin();
        let factor_a = ((1.0 - t) * omega).sin() / sin_omega;
        let factor_b = (t * omega).sin() / sin_omega;
        *self * factor_a + *other * factor_b
    }

    /// Convert to a Point3D
    pub fn to_point(&self) -> Point3D {
        Point3D::new(self.x, self.y, self.z)
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    fn add(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3D {
    type Output = Vector3D;

    fn mul(self, rhs: f32) -> Self::Output {
        Vector3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Self::Output {
        Vector3D::new(-self.x, -self.y, -self.z)
    }
}
