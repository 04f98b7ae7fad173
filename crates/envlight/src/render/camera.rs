//! Viewer camera
//!
//! Only the eye position feeds the lighting model (it fixes the view
//! direction of every surface sample); the projection parameters are carried
//! for backends that rasterize.

use crate::foundation::math::{utils, Vec3};

/// Perspective camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f64,

    /// Aspect ratio (width / height)
    pub aspect: f64,

    /// Distance to near clipping plane
    pub near: f64,

    /// Distance to far clipping plane
    pub far: f64,
}

impl Camera {
    /// Create a perspective camera looking at the origin
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Viewport width / height
    /// * `near` - Near clipping distance (must be > 0)
    /// * `far` - Far clipping distance (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::y(),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Point the camera at `target`
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
    }

    /// Unit direction the camera looks along
    pub fn forward(&self) -> Vec3 {
        utils::try_normalize(&(self.target - self.position)).unwrap_or_else(|| -Vec3::z())
    }
}

impl Default for Camera {
    /// Slightly raised, five units back, 75 degree field of view
    fn default() -> Self {
        Self::perspective(Vec3::new(0.0, 2.0, 5.0), 75.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}
