//! Tunables for projection, arcs, pinch detection, highlighting and drag.
//!
//! Loaded from TOML. Every section and field is optional and falls back to
//! the defaults below:
//!
//! ```toml
//! [globe]
//! radius = 0.4
//! marker_offset = 0.01
//!
//! [arc]
//! segments = 32
//! arc_height = 0.15
//!
//! [pinch]
//! threshold = 0.02
//!
//! [highlight]
//! smoothing = 0.12
//! highlighted_scale = 1.5
//! resting_scale = 1.0
//!
//! [drag]
//! sensitivity = 0.005
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::spatial::ArcOptions;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "SPATIAL_TRAVEL_CONFIG";

/// Globe geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Radius of the globe sphere in scene units
    pub radius: f32,
    /// How far markers sit above the surface
    pub marker_offset: f32,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: 0.4,
            marker_offset: 0.01,
        }
    }
}

impl GlobeConfig {
    pub fn marker_radius(&self) -> f32 {
        self.radius + self.marker_offset
    }
}

/// Pinch classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    /// Maximum thumb-to-index distance that counts as a pinch
    pub threshold: f32,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self { threshold: 0.02 }
    }
}

/// Gaze highlight easing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Fraction of the remaining distance covered each tick
    pub smoothing: f32,
    pub highlighted_scale: f32,
    pub resting_scale: f32,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.12,
            highlighted_scale: 1.5,
            resting_scale: 1.0,
        }
    }
}

/// Drag-to-rotate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Radians of yaw per unit of horizontal translation
    pub sensitivity: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self { sensitivity: 0.005 }
    }
}

/// Complete configuration of the interaction core
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub globe: GlobeConfig,
    pub arc: ArcOptions,
    pub pinch: PinchConfig,
    pub highlight: HighlightConfig,
    pub drag: DragConfig,
}

impl InteractionConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "Loaded interaction config");
        Ok(config)
    }

    /// Load from `explicit`, then `$SPATIAL_TRAVEL_CONFIG`, then the per-user
    /// config file if it exists. Falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `<config dir>/spatial-travel/config.toml` for the current user
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "spatial-travel", "spatial-travel")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
            }
        };

        positive("globe.radius", self.globe.radius)?;
        positive("pinch.threshold", self.pinch.threshold)?;
        positive("highlight.resting_scale", self.highlight.resting_scale)?;
        positive("highlight.highlighted_scale", self.highlight.highlighted_scale)?;

        if self.arc.segments == 0 {
            return Err(ConfigError::Invalid("arc.segments must be at least 1".to_string()));
        }
        if !self.arc.arc_height.is_finite() {
            return Err(ConfigError::Invalid("arc.arc_height must be finite".to_string()));
        }
        let smoothing = self.highlight.smoothing;
        if !(smoothing > 0.0 && smoothing <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "highlight.smoothing must be in (0, 1], got {smoothing}"
            )));
        }
        if !self.drag.sensitivity.is_finite() {
            return Err(ConfigError::Invalid("drag.sensitivity must be finite".to_string()));
        }
        Ok(())
    }
}
