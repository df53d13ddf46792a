//! Geographic coordinates projected onto a sphere
//!
//! The sphere uses the crate's right-handed frame: +Y points at the north
//! pole, +X at (0°, 0°) and -Z at (0°, 90°E).

use serde::{Deserialize, Serialize};

use super::Point3D;
use crate::error::GeoError;

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on a sphere produced by projection
pub type SpherePoint = Point3D;

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check that the coordinate is geographically meaningful.
    ///
    /// Projection never rejects input, so records should be validated
    /// here before they reach the globe.
    pub fn validate(self) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GeoError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GeoError::LongitudeOutOfRange(self.longitude));
        }
        Ok(self)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Project onto a sphere of the given radius
    pub fn to_sphere_point(&self, radius: f32) -> SpherePoint {
        geographic_to_cartesian(self.latitude, self.longitude, radius)
    }

    /// Great-circle distance in kilometers
    pub fn distance_km(&self, other: &GeoCoordinate) -> f64 {
        haversine_distance(*self, *other)
    }
}

/// Convert latitude/longitude in degrees to a point on a sphere.
///
/// Total over all real inputs; out-of-range values wrap around the sphere
/// rather than failing.
pub fn geographic_to_cartesian(latitude: f64, longitude: f64, radius: f32) -> SpherePoint {
    let lat = latitude.to_radians() as f32;
    let lon = longitude.to_radians() as f32;
    Point3D::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.sin(),
        -radius * lat.cos() * lon.sin(),
    )
}

/// Great-circle distance between two coordinates in kilometers (haversine).
pub fn haversine_distance(from: GeoCoordinate, to: GeoCoordinate) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    // rounding can push `a` a hair past 1 for antipodes
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: GeoCoordinate = GeoCoordinate { latitude: 48.8566, longitude: 2.3522 };
    const LONDON: GeoCoordinate = GeoCoordinate { latitude: 51.5074, longitude: -0.1278 };

    fn close(p: Point3D, x: f32, y: f32, z: f32) -> bool {
        (p.x - x).abs() < 1e-3 && (p.y - y).abs() < 1e-3 && (p.z - z).abs() < 1e-3
    }

    #[test]
    fn equator_prime_meridian_is_plus_x() {
        for r in [1.0, 0.41, 7.5] {
            assert!(close(geographic_to_cartesian(0.0, 0.0, r), r, 0.0, 0.0));
        }
    }

    #[test]
    fn north_pole_is_plus_y() {
        for r in [1.0, 0.41, 7.5] {
            assert!(close(geographic_to_cartesian(90.0, 0.0, r), 0.0, r, 0.0));
        }
    }

    #[test]
    fn east_longitude_maps_to_negative_z() {
        assert!(close(geographic_to_cartesian(0.0, 90.0, 1.0), 0.0, 0.0, -1.0));
    }

    #[test]
    fn projection_lands_on_sphere() {
        let p = GeoCoordinate::new(35.0116, 135.7681).to_sphere_point(0.41);
        assert!((p.magnitude() - 0.41).abs() < 1e-5);
    }

    #[test]
    fn paris_to_london() {
        let d = haversine_distance(PARIS, LONDON);
        assert!((d - 344.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn distance_to_self_is_zero() {
        for c in [PARIS, LONDON, GeoCoordinate::new(-90.0, 180.0)] {
            assert_eq!(haversine_distance(c, c), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let kyoto = GeoCoordinate::new(35.0116, 135.7681);
        assert_eq!(haversine_distance(PARIS, kyoto), haversine_distance(kyoto, PARIS));
        assert_eq!(PARIS.distance_km(&LONDON), LONDON.distance_km(&PARIS));
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let d = haversine_distance(GeoCoordinate::new(0.0, 0.0), GeoCoordinate::new(0.0, 180.0));
        assert!((d - 20015.0).abs() < 1.0, "got {d}");
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert_eq!(
            GeoCoordinate::new(91.0, 0.0).validate(),
            Err(GeoError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            GeoCoordinate::new(0.0, -180.5).validate(),
            Err(GeoError::LongitudeOutOfRange(-180.5))
        );
        assert!(!GeoCoordinate::new(f64::NAN, 0.0).is_valid());
        assert!(PARIS.is_valid());
    }
}
