//! CPU reference backend
//!
//! Captures by ray casting the environment scene once per texel and "renders"
//! frames by evaluating the lighting model at the camera-facing point of
//! every sphere. It is slow and exact, which makes it the backend of choice
//! for tests and headless runs.

use image::Rgb as Rgb8;

use crate::foundation::math::{utils, Point3, Rgb};
use crate::lighting::{PointLightModel, SurfaceSample};
use crate::reflection::{CubeFace, CubeRenderTarget, CubeTextureHandle, EnvironmentScene};

use super::{Camera, FrameOutput, ObjectShading, RenderBackend, RenderError, RenderResult, Scene};

/// Largest face edge the backend agrees to allocate
pub const MAX_CUBE_RESOLUTION: u32 = 4096;

/// CPU rendering backend
#[derive(Debug, Default)]
pub struct SoftwareBackend {
    next_texture: u64,
    captures: u64,
    frames: u64,
}

impl SoftwareBackend {
    /// Create a backend with no resources
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed cube captures
    pub const fn capture_count(&self) -> u64 {
        self.captures
    }

    /// Number of rendered frames
    pub const fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl RenderBackend for SoftwareBackend {
    fn create_cube_target(&mut self, resolution: u32) -> RenderResult<CubeRenderTarget> {
        if resolution == 0 || resolution > MAX_CUBE_RESOLUTION {
            return Err(RenderError::ResourceCreationFailed(format!(
                "cube face resolution {resolution} outside 1..={MAX_CUBE_RESOLUTION}"
            )));
        }
        self.next_texture += 1;
        Ok(CubeRenderTarget::new(CubeTextureHandle(self.next_texture), resolution))
    }

    fn capture_cube(
        &mut self,
        viewpoint: &Point3,
        scene: &EnvironmentScene,
        target: &mut CubeRenderTarget,
    ) -> RenderResult<()> {
        if target.face(CubeFace::PositiveX).width() != target.resolution() {
            return Err(RenderError::InvalidTarget(format!(
                "{:?} faces do not match its resolution",
                target.handle()
            )));
        }

        let origin = viewpoint.coords;
        for face in CubeFace::ALL {
            // Texel centers first, then write; the face buffer is reused as is.
            let size = target.resolution();
            let colors: Vec<[u8; 3]> = (0..size * size)
                .map(|i| {
                    let (u, v) = target.texel_uv(i % size, i / size);
                    let direction = face.direction(u, v).normalize();
                    scene.trace(&origin, &direction).to_rgb8()
                })
                .collect();

            for (pixel, color) in target.face_mut(face).pixels_mut().zip(colors) {
                *pixel = Rgb8(color);
            }
        }

        self.captures += 1;
        log::trace!("Software capture #{} into {:?}", self.captures, target.handle());
        Ok(())
    }

    fn render(&mut self, scene: &Scene<'_>, camera: &Camera) -> RenderResult<FrameOutput> {
        let mut objects = Vec::with_capacity(scene.objects.len());

        for object in scene.objects {
            let material = scene.materials.get(object.material).ok_or_else(|| {
                RenderError::RenderingFailed(format!("object '{}' has no material", object.name))
            })?;

            // Sample the point of the sphere nearest the camera
            let toward_camera = utils::try_normalize(&(camera.position - object.position))
                .unwrap_or_else(|| -camera.forward());
            let sample = SurfaceSample::from_unit(
                object.position + toward_camera * object.radius,
                toward_camera,
                toward_camera,
            );
            let shading = PointLightModel::shade(scene.light, &sample);

            let reflection = material
                .env_map()
                .and_then(|handle| scene.environment_for(handle))
                .and_then(|target| {
                    let mirror = utils::reflect(&-sample.view_direction, &sample.normal);
                    target.sample(&mirror)
                })
                .map(|color| {
                    let scaled = color.to_vec3() * material.env_map_intensity;
                    Rgb::new(scaled.x, scaled.y, scaled.z)
                });

            objects.push(ObjectShading {
                name: object.name.clone(),
                shading,
                lit_color: shading.lit_color(scene.light.color, material.base_color()),
                env_map: material.env_map(),
                env_map_intensity: material.env_map_intensity,
                reflection,
            });
        }

        let output = FrameOutput {
            frame_index: self.frames,
            sun_marker: scene.sun_marker.position,
            objects,
        };
        self.frames += 1;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::lighting::LightSource;
    use crate::materials::{presets, MaterialStore};
    use crate::reflection::LightMarker;
    use crate::render::SceneObject;

    #[test]
    fn test_rejects_bad_resolution() {
        let mut backend = SoftwareBackend::new();
        assert!(backend.create_cube_target(0).is_err());
        assert!(backend.create_cube_target(MAX_CUBE_RESOLUTION + 1).is_err());
    }

    #[test]
    fn test_targets_get_distinct_handles() {
        let mut backend = SoftwareBackend::new();
        let a = backend.create_cube_target(2).expect("target");
        let b = backend.create_cube_target(2).expect("target");
        assert_ne!(a.handle(), b.handle());
    }

    #[test]
    fn test_render_without_capture_has_no_reflection() {
        let mut backend = SoftwareBackend::new();
        let mut materials = MaterialStore::new();
        let silver = materials.insert(presets::silver());
        let objects = [SceneObject::sphere("Silver", Vec3::new(0.0, 1.0, 0.0), 0.7, silver)];
        let light = LightSource::new(Rgb::WHITE, 2.0).with_position(Vec3::new(0.0, 1.0, 8.0));
        let marker = LightMarker::new(0.5, Rgb::WHITE);
        let scene = Scene {
            background: Rgb::BLACK,
            light: &light,
            sun_marker: &marker,
            objects: &objects,
            materials: &materials,
            environment: None,
        };
        let camera = Camera::perspective(Vec3::new(0.0, 1.0, 5.0), 75.0, 1.0, 0.1, 100.0);

        let frame = backend.render(&scene, &camera).expect("frame");

        let silver = frame.object("Silver").expect("shaded");
        assert_eq!(silver.env_map, None);
        assert_eq!(silver.reflection, None);
        // Light, camera and sphere are lined up on +Z: head-on diffuse
        assert!(silver.shading.diffuse > 0.0);
        assert!(silver.shading.specular > 0.0);
        assert_eq!(backend.frame_count(), 1);
    }

    #[test]
    fn test_missing_material_is_an_error() {
        let mut backend = SoftwareBackend::new();
        let mut materials = MaterialStore::new();
        let key = materials.insert(presets::matte());
        materials.remove(key);
        let objects = [SceneObject::sphere("Orphan", Vec3::zeros(), 1.0, key)];
        let light = LightSource::new(Rgb::WHITE, 1.0);
        let marker = LightMarker::new(0.5, Rgb::WHITE);
        let scene = Scene {
            background: Rgb::BLACK,
            light: &light,
            sun_marker: &marker,
            objects: &objects,
            materials: &materials,
            environment: None,
        };

        assert!(matches!(
            backend.render(&scene, &Camera::default()),
            Err(RenderError::RenderingFailed(_))
        ));
    }
}
