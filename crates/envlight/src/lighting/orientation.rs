//! Light placement from three rotation angles and a distance
//!
//! The light starts on the +Z axis at `distance` and is rotated about X, then
//! Y, then Z. Rotations do not commute, so that order is part of the contract:
//! the same three slider values must always land the light in the same spot.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Mat3, Mat3Ext, Vec3};

/// Angles in degrees plus a radial distance, as supplied by the UI sliders
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orientation {
    /// Rotation about the X axis in degrees, applied first
    pub angle_x: f64,
    /// Rotation about the Y axis in degrees, applied second
    pub angle_y: f64,
    /// Rotation about the Z axis in degrees, applied last
    pub angle_z: f64,
    /// Distance from the origin in world units
    pub distance: f64,
}

impl Orientation {
    /// Create an orientation from explicit values
    pub const fn new(angle_x: f64, angle_y: f64, angle_z: f64, distance: f64) -> Self {
        Self {
            angle_x,
            angle_y,
            angle_z,
            distance,
        }
    }

    /// World position this orientation places the light at
    pub fn position(&self) -> Vec3 {
        OrientationResolver::resolve(self.angle_x, self.angle_y, self.angle_z, self.distance)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::new(30.0, 45.0, 0.0, 8.0)
    }
}

/// One slider change event; absent controls fall back to defaults
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationInput {
    /// X angle in degrees, if the control supplied one
    pub angle_x: Option<f64>,
    /// Y angle in degrees, if the control supplied one
    pub angle_y: Option<f64>,
    /// Z angle in degrees, if the control supplied one
    pub angle_z: Option<f64>,
    /// Distance, if the control supplied one
    pub distance: Option<f64>,
}

impl OrientationInput {
    /// Fill missing controls from `defaults`
    pub fn or_defaults(self, defaults: &Orientation) -> Orientation {
        Orientation {
            angle_x: self.angle_x.unwrap_or(defaults.angle_x),
            angle_y: self.angle_y.unwrap_or(defaults.angle_y),
            angle_z: self.angle_z.unwrap_or(defaults.angle_z),
            distance: self.distance.unwrap_or(defaults.distance),
        }
    }
}

/// Maps UI angle/distance controls to a world position
pub struct OrientationResolver;

impl OrientationResolver {
    /// Resolve degrees and distance into a Cartesian position
    ///
    /// Zero angles are skipped rather than multiplied through an identity
    /// matrix, which keeps `(0, 0, distance)` exact for the all-zero case.
    /// Inputs are not clamped: negative and >360 degree angles wrap through
    /// the trigonometry, and a zero distance yields the origin.
    pub fn resolve(angle_x: f64, angle_y: f64, angle_z: f64, distance: f64) -> Vec3 {
        let mut position = Vec3::new(0.0, 0.0, distance);

        if angle_x != 0.0 {
            position = Mat3::rotation_x(utils::deg_to_rad(angle_x)) * position;
        }
        if angle_y != 0.0 {
            position = Mat3::rotation_y(utils::deg_to_rad(angle_y)) * position;
        }
        if angle_z != 0.0 {
            position = Mat3::rotation_z(utils::deg_to_rad(angle_z)) * position;
        }

        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_zero_distance_is_origin() {
        for (x, y, z) in [(0.0, 0.0, 0.0), (30.0, 45.0, 0.0), (-720.0, 13.5, 999.0), (90.0, 90.0, 90.0)] {
            let p = OrientationResolver::resolve(x, y, z, 0.0);
            assert_abs_diff_eq!(p, Vec3::zeros());
        }
    }

    #[test]
    fn test_zero_angles_are_exact() {
        for distance in [0.5, 1.0, 8.0, 1234.5678] {
            assert_eq!(
                OrientationResolver::resolve(0.0, 0.0, 0.0, distance),
                Vec3::new(0.0, 0.0, distance)
            );
        }
    }

    #[test]
    fn test_rotation_order_matters() {
        let xy = OrientationResolver::resolve(90.0, 90.0, 0.0, 1.0);
        let xz = OrientationResolver::resolve(90.0, 0.0, 90.0, 1.0);

        // X then Y: +Z -> -Y -> -Y (Y rotation keeps the Y axis)
        assert_relative_eq!(xy, Vec3::new(0.0, -1.0, 0.0), epsilon = EPSILON);
        // X then Z: +Z -> -Y -> +X
        assert_relative_eq!(xz, Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert!((xy - xz).norm() > 1.0);
    }

    #[test]
    fn test_single_axis_rotations() {
        assert_relative_eq!(
            OrientationResolver::resolve(0.0, 90.0, 0.0, 2.0),
            Vec3::new(2.0, 0.0, 0.0),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            OrientationResolver::resolve(-90.0, 0.0, 0.0, 2.0),
            Vec3::new(0.0, 2.0, 0.0),
            epsilon = EPSILON
        );
        // Z rotation of a point on the Z axis leaves it alone
        assert_relative_eq!(
            OrientationResolver::resolve(0.0, 0.0, 37.0, 3.0),
            Vec3::new(0.0, 0.0, 3.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_angles_wrap() {
        let base = OrientationResolver::resolve(30.0, 45.0, 10.0, 8.0);
        let wrapped = OrientationResolver::resolve(390.0, -315.0, 370.0, 8.0);
        assert_relative_eq!(base, wrapped, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_is_preserved() {
        let p = OrientationResolver::resolve(30.0, 45.0, 0.0, 8.0);
        assert_relative_eq!(p.norm(), 8.0, epsilon = EPSILON);
    }

    #[test]
    fn test_default_orientation_position() {
        // X by 30: (0, -4, 4*sqrt(3)); Y by 45 spreads z over x and z
        let p = Orientation::default().position();
        let z = 4.0 * 3.0_f64.sqrt();
        let half_sqrt2 = std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(p, Vec3::new(z * half_sqrt2, -4.0, z * half_sqrt2), epsilon = 1e-9);
    }

    #[test]
    fn test_input_falls_back_to_defaults() {
        let input = OrientationInput {
            angle_y: Some(120.0),
            distance: Some(4.0),
            ..OrientationInput::default()
        };
        assert_eq!(
            input.or_defaults(&Orientation::default()),
            Orientation::new(30.0, 120.0, 0.0, 4.0)
        );
    }
}
