//! Spatial primitives, geographic projection and flight-path arcs
//!
//! Uses a right-handed coordinate system:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Toward the viewer (+) / Away (-)

mod arc;
mod geo;
mod point3d;
mod quaternion;
mod transform;
mod vector3d;

pub use arc::{arc_points, ArcOptions, ArcPath};
pub use geo::{
    geographic_to_cartesian, haversine_distance, GeoCoordinate, SpherePoint, EARTH_RADIUS_KM,
};
pub use point3d::Point3D;
pub use quaternion::Quaternion;
pub use transform::Transform;
pub use vector3d::{Vector3D, SLERP_LINEAR_THRESHOLD};
