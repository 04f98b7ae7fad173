//! Light rig
//!
//! Owns the point light, its visible marker, the reflection capture and the
//! material subscription, and drives them through the one sequence that keeps
//! reflections correct:
//!
//! 1. resolve the UI orientation into a position
//! 2. move the light and its marker
//! 3. capture the environment into the cube target (synchronously)
//! 4. push the refreshed target into every subscribed material
//!
//! Notifying before the capture finishes would hand materials a stale view,
//! so step 4 only runs after step 3 succeeded.

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::config::RigConfig;
use crate::foundation::math::{Rgb, Vec3};
use crate::lighting::{LightSource, Orientation, OrientationInput};
use crate::materials::{MaterialRef, MaterialStore, MaterialSubscription};
use crate::reflection::{CubeRenderTarget, LightMarker, ReflectionCapture};
use crate::render::{Camera, FrameOutput, RenderBackend, RenderError, RenderResult, Scene, SceneObject};


/// Rig errors
#[derive(Error, Debug)]
pub enum RigError {
    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Backend failure while setting up
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Lifecycle of a rig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigState {
    /// No capture target or environment scene yet
    Uninitialized,
    /// Capturing and notifying on every orientation change
    Active,
}

/// Outcome of one orientation change
#[derive(Debug, Clone, PartialEq)]
pub struct RigUpdate {
    /// New light position
    pub position: Vec3,
    /// Whether the cube target was re-captured
    pub captured: bool,
    /// Number of materials that received the new capture
    pub notified: usize,
}

/// Point light with a light-synchronized reflection capture
#[derive(Debug)]
pub struct LightRig {
    config: RigConfig,
    light: LightSource,
    sun_marker: LightMarker,
    orientation: Orientation,
    capture: Option<ReflectionCapture>,
    subscription: MaterialSubscription,
}

impl LightRig {
    /// Create an uninitialized rig from a validated configuration
    ///
    /// The light starts at the configured default orientation but nothing is
    /// captured until [`activate`](Self::activate).
    pub fn from_config(config: RigConfig) -> Result<Self, RigError> {
        config.validate()?;

        let orientation = config.orientation;
        let position = orientation.position();
        let light = LightSource::new(config.light.color, config.light.intensity).with_position(position);
        let mut sun_marker = LightMarker::new(config.scene.sun_marker_radius, config.scene.sun_marker_color);
        sun_marker.position = position;

        Ok(Self {
            config,
            light,
            sun_marker,
            orientation,
            capture: None,
            subscription: MaterialSubscription::new(),
        })
    }

    /// Build the capture target and environment scene
    ///
    /// One-way: calling it on an active rig does nothing.
    pub fn activate(&mut self, backend: &mut dyn RenderBackend) -> Result<(), RigError> {
        if self.capture.is_some() {
            log::debug!("Light rig already active");
            return Ok(());
        }

        let capture = ReflectionCapture::from_config(backend, &self.config.capture)?;
        log::info!(
            "Light rig active: {}x{} cube target at viewpoint {:?}",
            self.config.capture.resolution,
            self.config.capture.resolution,
            self.config.capture.viewpoint
        );
        self.capture = Some(capture);
        Ok(())
    }

    /// Current lifecycle state
    pub const fn state(&self) -> RigState {
        if self.capture.is_some() {
            RigState::Active
        } else {
            RigState::Uninitialized
        }
    }

    /// Subscribe a material to capture updates
    pub fn register_material(&mut self, material: MaterialRef) -> bool {
        self.subscription.register(material)
    }

    /// Subscribe a material with a fixed env map intensity
    pub fn register_material_with_intensity(&mut self, material: MaterialRef, intensity: f64) -> bool {
        self.subscription.register_with_intensity(material, intensity)
    }

    /// Handle one UI change event, filling absent controls from config
    pub fn apply_input(
        &mut self,
        input: OrientationInput,
        backend: &mut dyn RenderBackend,
        materials: &mut MaterialStore,
    ) -> RigUpdate {
        let orientation = input.or_defaults(&self.config.orientation);
        self.set_orientation(orientation, backend, materials)
    }

    /// Move the light and refresh every reflection that depends on it
    pub fn set_orientation(
        &mut self,
        orientation: Orientation,
        backend: &mut dyn RenderBackend,
        materials: &mut MaterialStore,
    ) -> RigUpdate {
        let position = orientation.position();
        self.orientation = orientation;
        self.light.position = position;
        self.sun_marker.position = position;

        log::debug!(
            "Angles (deg) - X: {} Y: {} Z: {}",
            orientation.angle_x,
            orientation.angle_y,
            orientation.angle_z
        );
        log::info!("Sun position: {:.2} {:.2} {:.2}", position.x, position.y, position.z);

        self.refresh(backend, materials)
    }

    /// Re-capture for the current light position and notify materials
    ///
    /// Useful after subscribing materials to an already placed light.
    pub fn refresh(&mut self, backend: &mut dyn RenderBackend, materials: &mut MaterialStore) -> RigUpdate {
        let mut update = RigUpdate {
            position: self.light.position,
            captured: false,
            notified: 0,
        };

        let Some(capture) = self.capture.as_mut() else {
            log::warn!("Reflection update requested before the light rig is active; skipping");
            return update;
        };

        match capture.update(&self.light, backend) {
            Ok(true) => update.captured = true,
            Ok(false) => return update,
            Err(e) => {
                log::error!("Reflection capture failed, skipping this frame's update: {e}");
                return update;
            }
        }

        update.notified = self.subscription.notify(capture.target(), materials);
        update
    }

    /// Borrow everything a backend needs to draw the main scene
    pub fn scene<'a>(&'a self, objects: &'a [SceneObject], materials: &'a MaterialStore) -> Scene<'a> {
        Scene {
            background: self.background(),
            light: &self.light,
            sun_marker: &self.sun_marker,
            objects,
            materials,
            environment: self.environment_map(),
        }
    }

    /// Draw one frame of the main scene
    pub fn render_frame(
        &self,
        backend: &mut dyn RenderBackend,
        camera: &Camera,
        objects: &[SceneObject],
        materials: &MaterialStore,
    ) -> RenderResult<FrameOutput> {
        backend.render(&self.scene(objects, materials), camera)
    }

    /// The point light
    pub const fn light(&self) -> &LightSource {
        &self.light
    }

    /// The visible sun sphere in the main scene
    pub const fn sun_marker(&self) -> &LightMarker {
        &self.sun_marker
    }

    /// Last applied orientation
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Reflection capture, once active
    pub const fn capture(&self) -> Option<&ReflectionCapture> {
        self.capture.as_ref()
    }

    /// Cube target with the latest capture, once active
    pub fn environment_map(&self) -> Option<&CubeRenderTarget> {
        self.capture.as_ref().map(ReflectionCapture::target)
    }

    /// Material subscription registry
    pub const fn subscription(&self) -> &MaterialSubscription {
        &self.subscription
    }

    /// Configuration the rig was built from
    pub const fn config(&self) -> &RigConfig {
        &self.config
    }

    fn background(&self) -> Rgb {
        self.config.scene.background
    }
}
