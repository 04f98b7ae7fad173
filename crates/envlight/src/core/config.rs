//! # Rig Configuration
//!
//! All tunables of the light rig in one serializable tree. Every section has
//! defaults matching the reference demo, and every field is optional in a
//! config file (`#[serde(default)]`), so a file only needs to name what it
//! changes.
//!
//! ## Configuration Categories
//!
//! - **Engine**: logging
//! - **Light**: color and intensity of the point light
//! - **Orientation**: slider defaults used when the UI supplies no value
//! - **Capture**: cube target resolution, viewpoint and environment scene look
//! - **Scene**: the visible sun marker in the main scene

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::math::{Point3, Rgb};
use crate::lighting::orientation::Orientation;

/// Core logging and diagnostics settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Point light appearance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Light color
    pub color: Rgb,
    /// Light intensity multiplier (must be >= 0)
    pub intensity: f64,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            intensity: 2.0,
        }
    }
}

/// # Reflection Capture Configuration
///
/// The capture viewpoint is a fixed world reference point. It deliberately
/// does not follow the light, so the marker is seen from outside instead of
/// sitting at the center of every face.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Edge length of each cube face in texels
    pub resolution: u32,
    /// Where the cube camera sits
    pub viewpoint: Point3,
    /// Background of the environment-only scene
    pub sky_color: Rgb,
    /// Radius of the light marker inside the environment scene
    pub marker_radius: f64,
    /// Color of the light marker inside the environment scene
    pub marker_color: Rgb,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            resolution: 512,
            viewpoint: Point3::new(0.0, 1.0, 0.0),
            sky_color: Rgb::new(0.5, 0.7, 1.0),
            marker_radius: 3.0,
            marker_color: Rgb::from_hex(0xffff00),
        }
    }
}

/// Main scene settings owned by the rig
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Background color of the main scene
    pub background: Rgb,
    /// Radius of the visible sun sphere
    pub sun_marker_radius: f64,
    /// Color of the visible sun sphere
    pub sun_marker_color: Rgb,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: Rgb::new(0.5, 0.7, 1.0),
            sun_marker_radius: 0.5,
            sun_marker_color: Rgb::from_hex(0xffff00),
        }
    }
}

/// # Complete Rig Configuration
///
/// Top-level configuration applications load and hand to
/// [`LightRig::from_config`](crate::rig::LightRig::from_config).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Logging settings
    pub engine: EngineConfig,
    /// Point light settings
    pub light: LightConfig,
    /// Orientation defaults
    pub orientation: Orientation,
    /// Reflection capture settings
    pub capture: CaptureConfig,
    /// Main scene settings
    pub scene: SceneConfig,
}

impl RigConfig {
    /// Validate the entire configuration
    ///
    /// Orientation values are not checked: any angle is valid and a
    /// degenerate distance only produces degenerate geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capture.resolution == 0 {
            return Err(invalid("capture.resolution", "must be at least 1 texel"));
        }
        if !(self.light.intensity >= 0.0 && self.light.intensity.is_finite()) {
            return Err(invalid(
                "light.intensity",
                format!("must be finite and >= 0, got {}", self.light.intensity),
            ));
        }
        if !self.light.color.is_finite() {
            return Err(invalid("light.color", "channels must be finite"));
        }
        if !self.capture.viewpoint.iter().all(|c| c.is_finite()) {
            return Err(invalid("capture.viewpoint", "coordinates must be finite"));
        }
        for (field, radius) in [
            ("capture.marker_radius", self.capture.marker_radius),
            ("scene.sun_marker_radius", self.scene.sun_marker_radius),
        ] {
            if !(radius >= 0.0 && radius.is_finite()) {
                return Err(invalid(field, format!("must be finite and >= 0, got {radius}")));
            }
        }
        Ok(())
    }
}

impl Config for RigConfig {}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
