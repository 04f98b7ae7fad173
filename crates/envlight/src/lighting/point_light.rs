//! Analytic point light
//!
//! Replaces a renderer's built-in lights with a fixed Phong model: Lambert
//! diffuse plus a hard mirror-direction highlight, scaled by a quadratic
//! distance falloff whose denominator never drops below one.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{utils, Rgb, Vec3};

/// Constant term of the attenuation polynomial
pub const ATTENUATION_CONSTANT: f64 = 1.0;
/// Linear term of the attenuation polynomial
pub const ATTENUATION_LINEAR: f64 = 0.1;
/// Quadratic term of the attenuation polynomial
pub const ATTENUATION_QUADRATIC: f64 = 0.01;
/// Specular exponent
pub const SHININESS: i32 = 32;

/// The rig's single point light
#[derive(Debug, Clone, PartialEq)]
pub struct LightSource {
    /// World position
    pub position: Vec3,
    /// Light color
    pub color: Rgb,
    /// Intensity multiplier, >= 0
    pub intensity: f64,
}

impl LightSource {
    /// Create a light at the origin
    pub fn new(color: Rgb, intensity: f64) -> Self {
        Self {
            position: Vec3::zeros(),
            color,
            intensity,
        }
    }

    /// Set the position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }
}

/// A point on a surface being shaded
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSample {
    /// World position of the sample
    pub world_position: Vec3,
    /// Unit surface normal
    pub normal: Vec3,
    /// Unit direction from the surface toward the viewer
    pub view_direction: Vec3,
}

impl SurfaceSample {
    /// Create a sample, normalizing `normal` and `view_direction`
    ///
    /// A zero-length (or non-finite) direction becomes the zero vector, which
    /// shades to zero instead of spreading NaN into the frame.
    pub fn new(world_position: Vec3, normal: Vec3, view_direction: Vec3) -> Self {
        Self {
            world_position,
            normal: utils::try_normalize(&normal).unwrap_or_else(Vec3::zeros),
            view_direction: utils::try_normalize(&view_direction).unwrap_or_else(Vec3::zeros),
        }
    }

    /// Create a sample from directions the caller guarantees are unit length
    pub const fn from_unit(world_position: Vec3, normal: Vec3, view_direction: Vec3) -> Self {
        Self {
            world_position,
            normal,
            view_direction,
        }
    }
}

/// Output of [`PointLightModel::shade`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingResult {
    /// Diffuse term, >= 0
    pub diffuse: f64,
    /// Specular term, >= 0
    pub specular: f64,
    /// Distance falloff in (0, 1]
    pub attenuation: f64,
}

impl ShadingResult {
    /// Combine the terms with an albedo into a lit color
    pub fn lit_color(&self, light_color: Rgb, albedo: Rgb) -> Rgb {
        let light = light_color.to_vec3();
        let color = albedo.to_vec3().component_mul(&light) * self.diffuse + light * self.specular;
        Rgb::new(color.x, color.y, color.z)
    }
}

/// Point light shading
pub struct PointLightModel;

impl PointLightModel {
    /// Distance falloff `1 / (1 + 0.1 d + 0.01 d^2)`
    ///
    /// Never reaches zero: once the denominator overflows the result stays
    /// at the smallest positive normal `f64`.
    pub fn attenuation(distance: f64) -> f64 {
        let falloff = 1.0
            / (ATTENUATION_CONSTANT
                + ATTENUATION_LINEAR * distance
                + ATTENUATION_QUADRATIC * distance * distance);
        falloff.max(f64::MIN_POSITIVE)
    }

    /// Shade one surface sample
    ///
    /// Assumes the sample's normal and view direction are unit length (see
    /// [`SurfaceSample::new`]). When the sample sits exactly on the light the
    /// light direction is the zero vector, so diffuse and specular vanish and
    /// attenuation is exactly 1.
    pub fn shade(light: &LightSource, sample: &SurfaceSample) -> ShadingResult {
        let to_light = light.position - sample.world_position;
        let distance = to_light.norm();
        let light_dir = utils::try_normalize(&to_light).unwrap_or_else(Vec3::zeros);

        let attenuation = Self::attenuation(distance);

        let diffuse_strength = sample.normal.dot(&light_dir).max(0.0);
        let diffuse = diffuse_strength * light.intensity * attenuation;

        let reflect_dir = utils::reflect(&-light_dir, &sample.normal);
        let specular_strength = sample.view_direction.dot(&reflect_dir).max(0.0).powi(SHININESS);
        let specular = specular_strength * light.intensity * attenuation;

        ShadingResult {
            diffuse,
            specular,
            attenuation,
        }
    }
}

/// Point light data for a GPU uniform buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointLightUniform {
    /// Light position and intensity [x, y, z, intensity]
    pub position: [f32; 4],
    /// Light color and shininess [r, g, b, shininess]
    pub color: [f32; 4],
    /// Attenuation factors [constant, linear, quadratic, padding]
    pub attenuation: [f32; 4],
}

impl From<&LightSource> for PointLightUniform {
    fn from(light: &LightSource) -> Self {
        Self {
            position: [
                light.position.x as f32,
                light.position.y as f32,
                light.position.z as f32,
                light.intensity as f32,
            ],
            color: [
                light.color.r as f32,
                light.color.g as f32,
                light.color.b as f32,
                SHININESS as f32,
            ],
            attenuation: [
                ATTENUATION_CONSTANT as f32,
                ATTENUATION_LINEAR as f32,
                ATTENUATION_QUADRATIC as f32,
                0.0,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::lighting::OrientationResolver;

    fn light_at(position: Vec3, intensity: f64) -> LightSource {
        LightSource::new(Rgb::WHITE, intensity).with_position(position)
    }

    #[test]
    fn test_attenuation_range() {
        assert_eq!(PointLightModel::attenuation(0.0), 1.0);
        let mut previous = 1.0;
        for step in 1..200 {
            let a = PointLightModel::attenuation(f64::from(step) * 0.5);
            assert!(a > 0.0 && a <= 1.0);
            assert!(a < previous, "falloff must decrease with distance");
            previous = a;
        }
        // 1 + 1 + 1 at d = 10
        assert_relative_eq!(PointLightModel::attenuation(10.0), 1.0 / 3.0);
    }

    #[test]
    fn test_attenuation_stays_positive_far_away() {
        assert!(PointLightModel::attenuation(1e160) > 0.0);
        assert!(PointLightModel::attenuation(f64::MAX) > 0.0);

        let position = OrientationResolver::resolve(30.0, 45.0, 0.0, 1e160);
        let light = light_at(position, 2.0);
        let sample = SurfaceSample::new(Vec3::zeros(), Vec3::z(), Vec3::z());
        let result = PointLightModel::shade(&light, &sample);
        assert!(result.attenuation > 0.0 && result.attenuation <= 1.0);
    }

    #[test]
    fn test_sample_on_light() {
        let light = light_at(Vec3::new(1.0, 2.0, 3.0), 2.0);
        let sample = SurfaceSample::new(light.position, Vec3::y(), Vec3::z());
        let result = PointLightModel::shade(&light, &sample);
        assert_eq!(result.attenuation, 1.0);
        assert_eq!(result.diffuse, 0.0);
        assert_eq!(result.specular, 0.0);
    }

    #[test]
    fn test_head_on_light() {
        // Light straight above, viewer straight above: full diffuse and specular
        let light = light_at(Vec3::new(0.0, 10.0, 0.0), 2.0);
        let sample = SurfaceSample::new(Vec3::zeros(), Vec3::y(), Vec3::y());
        let result = PointLightModel::shade(&light, &sample);

        let attenuation = 1.0 / 3.0;
        assert_relative_eq!(result.attenuation, attenuation);
        assert_relative_eq!(result.diffuse, 2.0 * attenuation);
        assert_relative_eq!(result.specular, 2.0 * attenuation);
    }

    #[test]
    fn test_grazing_light_has_no_diffuse() {
        // Light along +X, normal +Y: orthogonal
        let light = light_at(Vec3::new(5.0, 0.0, 0.0), 1.0);
        let sample = SurfaceSample::new(Vec3::zeros(), Vec3::y(), Vec3::y());
        let result = PointLightModel::shade(&light, &sample);
        assert_eq!(result.diffuse, 0.0);
    }

    #[test]
    fn test_view_orthogonal_to_reflection_has_no_specular() {
        // Light above, so the reflection points straight up; view along +X
        let light = light_at(Vec3::new(0.0, 4.0, 0.0), 1.0);
        let sample = SurfaceSample::new(Vec3::zeros(), Vec3::y(), Vec3::x());
        let result = PointLightModel::shade(&light, &sample);
        assert_eq!(result.specular, 0.0);
        assert!(result.diffuse > 0.0);
    }

    #[test]
    fn test_light_behind_surface_is_dark() {
        let light = light_at(Vec3::new(0.0, -3.0, 0.0), 1.0);
        let sample = SurfaceSample::new(Vec3::zeros(), Vec3::y(), Vec3::y());
        let result = PointLightModel::shade(&light, &sample);
        assert_eq!(result.diffuse, 0.0);
        assert_eq!(result.specular, 0.0);
        assert!(result.attenuation > 0.0);
    }

    #[test]
    fn test_zero_intensity_is_dark() {
        let light = light_at(Vec3::new(1.0, 1.0, 1.0), 0.0);
        for normal in [Vec3::x(), Vec3::y(), Vec3::new(1.0, 1.0, 1.0)] {
            let sample = SurfaceSample::new(Vec3::zeros(), normal, normal);
            let result = PointLightModel::shade(&light, &sample);
            assert_eq!(result.diffuse, 0.0);
            assert_eq!(result.specular, 0.0);
        }
    }

    #[test]
    fn test_highlight_is_narrow() {
        // 30 degrees off the mirror direction: cos^32 is about 0.01
        let light = light_at(Vec3::new(0.0, 10.0, 0.0), 1.0);
        let angle = 30.0_f64.to_radians();
        let view = Vec3::new(angle.sin(), angle.cos(), 0.0);
        let sample = SurfaceSample::new(Vec3::zeros(), Vec3::y(), view);
        let result = PointLightModel::shade(&light, &sample);
        assert_relative_eq!(result.specular, angle.cos().powi(32) / 3.0, epsilon = 1e-12);
        assert!(result.specular < 0.2 * result.diffuse);
    }

    #[test]
    fn test_sample_normalizes_defensively() {
        let sample = SurfaceSample::new(Vec3::zeros(), Vec3::new(0.0, 5.0, 0.0), Vec3::zeros());
        assert_relative_eq!(sample.normal, Vec3::y());
        assert_eq!(sample.view_direction, Vec3::zeros());

        let light = light_at(Vec3::new(0.0, 1.0, 0.0), 1.0);
        let result = PointLightModel::shade(&light, &sample);
        assert!(result.diffuse > 0.0);
        assert_eq!(result.specular, 0.0);
    }

    #[test]
    fn test_uniform_layout() {
        let light = LightSource::new(Rgb::new(1.0, 0.5, 0.25), 2.0).with_position(Vec3::new(1.0, 2.0, 3.0));
        let uniform = PointLightUniform::from(&light);
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 48);
        assert_eq!(uniform.position, [1.0, 2.0, 3.0, 2.0]);
        assert_eq!(uniform.color, [1.0, 0.5, 0.25, 32.0]);
        assert_eq!(uniform.attenuation, [1.0, 0.1, 0.01, 0.0]);
    }
}
