//! Math utilities and types
//!
//! Provides the fundamental math types used by the lighting and capture code.
//! Everything is `f64`: light placement and shading must match the reference
//! numbers exactly, and the scene is small enough that precision is free.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix3, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f64>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f64>;

/// Linear RGB color with components nominally in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
}

impl Rgb {
    /// Pure white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Pure black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a color from its channels
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| f64::from((hex >> shift) & 0xff) / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Quantize to 8-bit channels, clamping out-of-range values
    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    /// Channels as a vector, for arithmetic
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Whether every channel is a finite number
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f64 = std::f64::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f64 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees * constants::DEG_TO_RAD
    }

    /// Reflect `incident` about `normal` (`normal` must be unit length)
    pub fn reflect(incident: &Vec3, normal: &Vec3) -> Vec3 {
        incident - normal * (2.0 * incident.dot(normal))
    }

    /// Normalize `v`, or return `None` when it has no usable direction
    pub fn try_normalize(v: &Vec3) -> Option<Vec3> {
        v.try_normalize(f64::EPSILON).filter(is_finite)
    }

    /// Whether every component is a finite number
    pub fn is_finite(v: &Vec3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}

/// Extension trait for Mat3 with single-axis rotation constructors
///
/// The matrices are written out element by element so the results match the
/// usual right-handed rotation matrices bit for bit.
pub trait Mat3Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f64) -> Mat3;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f64) -> Mat3;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f64) -> Mat3;
}

impl Mat3Ext for Mat3 {
    fn rotation_x(angle: f64) -> Mat3 {
        let (s, c) = angle.sin_cos();
        Mat3::new(
            1.0, 0.0, 0.0,
            0.0, c, -s,
            0.0, s, c,
        )
    }

    fn rotation_y(angle: f64) -> Mat3 {
        let (s, c) = angle.sin_cos();
        Mat3::new(
            c, 0.0, s,
            0.0, 1.0, 0.0,
            -s, 0.0, c,
        )
    }

    fn rotation_z(angle: f64) -> Mat3 {
        let (s, c) = angle.sin_cos();
        Mat3::new(
            c, -s, 0.0,
            s, c, 0.0,
            0.0, 0.0, 1.0,
        )
    }
}
