//! Error types for the spatial interaction core.
//!
//! Nothing here is fatal to a live session: callers degrade the affected
//! feature and keep running.

use std::path::PathBuf;

/// Invalid geographic input, reported by [`GeoCoordinate::validate`].
///
/// [`GeoCoordinate::validate`]: crate::spatial::GeoCoordinate::validate
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("Latitude out of range [-90, 90]: {0}")]
    LatitudeOutOfRange(f64),

    #[error("Longitude out of range [-180, 180]: {0}")]
    LongitudeOutOfRange(f64),
}

/// Precondition violations when building a flight-path arc.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArcError {
    #[error("Arc {endpoint} point is the zero vector")]
    DegenerateEndpoint { endpoint: &'static str },

    #[error("Arc needs at least one segment")]
    NoSegments,
}

/// Hand tracking session failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackingError {
    #[error("Hand tracking is not supported on this host")]
    Unsupported,

    #[error("Hand tracking session failed: {0}")]
    SessionFailed(String),
}

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Umbrella error for the crate.
#[derive(Debug, thiserror::Error)]
pub enum OuiError {
    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error(transparent)]
    Arc(#[from] ArcError),

    #[error(transparent)]
    Tracking(#[from] TrackingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Destination service error: {0}")]
    Service(String),
}

pub type Result<T> = std::result::Result<T, OuiError>;
