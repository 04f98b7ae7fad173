//! Light-synchronized reflection capture
//!
//! Owns the cube target and re-renders the environment scene into it from a
//! fixed viewpoint whenever the light moves. The capture is synchronous: when
//! [`ReflectionCapture::update`] returns `Ok(true)` every face holds the view
//! for the light's current position.

use crate::core::config::CaptureConfig;
use crate::foundation::math::{Point3, Vec3};
use crate::lighting::LightSource;
use crate::render::{RenderBackend, RenderResult};

use super::{CubeRenderTarget, EnvironmentScene};

/// Cube target, capture viewpoint and the scene captured into it
#[derive(Debug)]
pub struct ReflectionCapture {
    target: CubeRenderTarget,
    viewpoint: Option<Point3>,
    environment: Option<EnvironmentScene>,
    captured_for: Option<Vec3>,
}

impl ReflectionCapture {
    /// Allocate the cube target
    ///
    /// Viewpoint and environment scene start out unset; until both are
    /// installed, [`update`](Self::update) does nothing.
    pub fn init(backend: &mut dyn RenderBackend, resolution: u32) -> RenderResult<Self> {
        let target = backend.create_cube_target(resolution)?;
        log::debug!(
            "Allocated cube target {:?} ({}x{} per face)",
            target.handle(),
            resolution,
            resolution
        );
        Ok(Self {
            target,
            viewpoint: None,
            environment: None,
            captured_for: None,
        })
    }

    /// Allocate the target and install viewpoint and environment from config
    pub fn from_config(backend: &mut dyn RenderBackend, config: &CaptureConfig) -> RenderResult<Self> {
        let mut capture = Self::init(backend, config.resolution)?;
        capture.set_viewpoint(config.viewpoint);
        capture.set_environment(EnvironmentScene::from_config(config));
        Ok(capture)
    }

    /// Place the capture camera
    pub fn set_viewpoint(&mut self, viewpoint: Point3) {
        self.viewpoint = Some(viewpoint);
    }

    /// Install the scene to capture
    pub fn set_environment(&mut self, environment: EnvironmentScene) {
        self.environment = Some(environment);
    }

    /// Whether both viewpoint and environment scene are present
    pub const fn is_ready(&self) -> bool {
        self.viewpoint.is_some() && self.environment.is_some()
    }

    /// Move the marker to the light and re-capture all six faces
    ///
    /// Returns `Ok(false)` without touching the target when the capture is
    /// not ready yet. On a backend error the previous content stays in place
    /// but is no longer current for the light.
    pub fn update(&mut self, light: &LightSource, backend: &mut dyn RenderBackend) -> RenderResult<bool> {
        let (Some(viewpoint), Some(environment)) = (self.viewpoint.as_ref(), self.environment.as_mut()) else {
            log::debug!("Reflection capture not ready; skipping update");
            return Ok(false);
        };

        environment.marker.position = light.position;
        self.captured_for = None;

        backend.capture_cube(viewpoint, environment, &mut self.target)?;

        self.target.mark_captured();
        self.captured_for = Some(light.position);
        log::trace!(
            "Captured {:?} generation {} for light at {:?}",
            self.target.handle(),
            self.target.generation(),
            light.position
        );
        Ok(true)
    }

    /// The cube target
    pub const fn target(&self) -> &CubeRenderTarget {
        &self.target
    }

    /// Capture viewpoint, if set
    pub const fn viewpoint(&self) -> Option<&Point3> {
        self.viewpoint.as_ref()
    }

    /// Environment scene, if set
    pub const fn environment(&self) -> Option<&EnvironmentScene> {
        self.environment.as_ref()
    }

    /// Whether the target content was captured for `light`'s current position
    pub fn is_current(&self, light: &LightSource) -> bool {
        self.captured_for == Some(light.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Rgb;
    use crate::reflection::CubeFace;
    use crate::render::SoftwareBackend;

    fn small_config() -> CaptureConfig {
        CaptureConfig {
            resolution: 16,
            ..CaptureConfig::default()
        }
    }

    fn light_at(position: Vec3) -> LightSource {
        LightSource::new(Rgb::WHITE, 2.0).with_position(position)
    }

    #[test]
    fn test_update_without_environment_is_noop() {
        let mut backend = SoftwareBackend::new();
        let mut capture = ReflectionCapture::init(&mut backend, 8).expect("init");
        capture.set_viewpoint(Point3::new(0.0, 1.0, 0.0));

        let captured = capture.update(&light_at(Vec3::new(0.0, 8.0, 0.0)), &mut backend).expect("update");

        assert!(!captured);
        assert_eq!(backend.capture_count(), 0);
        assert!(!capture.target().has_content());
    }

    #[test]
    fn test_update_without_viewpoint_is_noop() {
        let mut backend = SoftwareBackend::new();
        let mut capture = ReflectionCapture::init(&mut backend, 8).expect("init");
        capture.set_environment(EnvironmentScene::from_config(&small_config()));

        assert!(!capture.update(&light_at(Vec3::zeros()), &mut backend).expect("update"));
        assert_eq!(backend.capture_count(), 0);
    }

    #[test]
    fn test_ready_once_viewpoint_and_environment_are_set() {
        let mut backend = SoftwareBackend::new();
        let mut capture = ReflectionCapture::init(&mut backend, 8).expect("init");
        assert!(!capture.is_ready());
        assert_eq!(capture.viewpoint(), None);

        capture.set_viewpoint(Point3::new(0.0, 1.0, 0.0));
        assert!(!capture.is_ready());
        capture.set_environment(EnvironmentScene::from_config(&small_config()));
        assert!(capture.is_ready());

        let from_config = ReflectionCapture::from_config(&mut backend, &small_config()).expect("init");
        assert!(from_config.is_ready());
        assert_eq!(from_config.viewpoint(), Some(&small_config().viewpoint));
    }

    #[test]
    fn test_update_tracks_light() {
        let mut backend = SoftwareBackend::new();
        let mut capture = ReflectionCapture::from_config(&mut backend, &small_config()).expect("init");
        let light = light_at(Vec3::new(0.0, 9.0, 0.0));

        assert!(capture.update(&light, &mut backend).expect("update"));

        let environment = capture.environment().expect("installed");
        assert_eq!(environment.marker.position, light.position);
        assert!(capture.is_current(&light));
        assert_eq!(capture.target().generation(), 1);

        let moved = light_at(Vec3::new(9.0, 0.0, 0.0));
        assert!(!capture.is_current(&moved));
    }

    #[test]
    fn test_capture_sees_marker_from_viewpoint() {
        let mut backend = SoftwareBackend::new();
        let config = small_config();
        let mut capture = ReflectionCapture::from_config(&mut backend, &config).expect("init");

        // Straight above the viewpoint at (0, 1, 0)
        capture.update(&light_at(Vec3::new(0.0, 9.0, 0.0)), &mut backend).expect("update");
        let target = capture.target();
        assert_eq!(target.sample(&Vec3::y()), Some(quantized(config.marker_color)));
        assert_eq!(target.sample(&-Vec3::y()), Some(quantized(config.sky_color)));

        // Same target, overwritten in place after the light moves below
        let handle = target.handle();
        capture.update(&light_at(Vec3::new(0.0, -9.0, 0.0)), &mut backend).expect("update");
        let target = capture.target();
        assert_eq!(target.handle(), handle);
        assert_eq!(target.generation(), 2);
        assert_eq!(target.sample(&Vec3::y()), Some(quantized(config.sky_color)));
        assert_eq!(target.sample(&-Vec3::y()), Some(quantized(config.marker_color)));
        assert_eq!(target.face(CubeFace::PositiveX).dimensions(), (16, 16));
    }

    fn quantized(color: Rgb) -> Rgb {
        let [r, g, b] = color.to_rgb8();
        Rgb::new(f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0)
    }
}
