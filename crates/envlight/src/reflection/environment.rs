//! Environment-only scene rendered into the reflection target
//!
//! Kept to a sky color and the light marker. Reflective objects never appear
//! in it, so captures cannot recursively contain earlier captures.

use crate::core::config::CaptureConfig;
use crate::foundation::math::{Rgb, Vec3};

/// Sphere standing in for the light
#[derive(Debug, Clone, PartialEq)]
pub struct LightMarker {
    /// Sphere center, kept equal to the light position
    pub position: Vec3,
    /// Sphere radius
    pub radius: f64,
    /// Flat (unlit) color
    pub color: Rgb,
}

impl LightMarker {
    /// Create a marker at the origin
    pub fn new(radius: f64, color: Rgb) -> Self {
        Self {
            position: Vec3::zeros(),
            radius,
            color,
        }
    }

    /// Distance along a ray to the nearest visible point of the sphere
    ///
    /// `direction` must be unit length. An origin inside the sphere hits at
    /// distance zero.
    pub fn intersect(&self, origin: &Vec3, direction: &Vec3) -> Option<f64> {
        let oc = origin - self.position;
        let c = oc.norm_squared() - self.radius * self.radius;
        if c <= 0.0 {
            return Some(0.0);
        }
        let b = oc.dot(direction);
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let t = -b - discriminant.sqrt();
        (t >= 0.0).then_some(t)
    }
}

/// What a reflection capture sees
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentScene {
    /// Sky color behind everything
    pub background: Rgb,
    /// Light marker
    pub marker: LightMarker,
}

impl EnvironmentScene {
    /// Build the environment scene described by the capture settings
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self {
            background: config.sky_color,
            marker: LightMarker::new(config.marker_radius, config.marker_color),
        }
    }

    /// Color seen along a ray
    pub fn trace(&self, origin: &Vec3, direction: &Vec3) -> Rgb {
        match self.marker.intersect(origin, direction) {
            Some(_) => self.marker.color,
            None => self.background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_at(position: Vec3, radius: f64) -> LightMarker {
        LightMarker {
            position,
            radius,
            color: Rgb::WHITE,
        }
    }

    #[test]
    fn test_ray_hits_marker_ahead() {
        let marker = marker_at(Vec3::new(0.0, 0.0, 10.0), 1.0);
        let t = marker.intersect(&Vec3::zeros(), &Vec3::z()).expect("hit");
        assert!((t - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_ray_misses_marker_behind_or_aside() {
        let marker = marker_at(Vec3::new(0.0, 0.0, 10.0), 1.0);
        assert!(marker.intersect(&Vec3::zeros(), &-Vec3::z()).is_none());
        assert!(marker.intersect(&Vec3::zeros(), &Vec3::x()).is_none());
    }

    #[test]
    fn test_origin_inside_marker() {
        let marker = marker_at(Vec3::new(0.0, 1.0, 0.0), 3.0);
        assert_eq!(marker.intersect(&Vec3::zeros(), &Vec3::x()), Some(0.0));
    }

    #[test]
    fn test_trace_picks_marker_or_sky() {
        let scene = EnvironmentScene {
            background: Rgb::new(0.5, 0.7, 1.0),
            marker: LightMarker {
                position: Vec3::new(0.0, 5.0, 0.0),
                radius: 1.0,
                color: Rgb::from_hex(0xffff00),
            },
        };
        assert_eq!(scene.trace(&Vec3::zeros(), &Vec3::y()), Rgb::from_hex(0xffff00));
        assert_eq!(scene.trace(&Vec3::zeros(), &-Vec3::y()), Rgb::new(0.5, 0.7, 1.0));
    }
}
