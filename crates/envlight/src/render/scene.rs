//! Frame inputs and outputs
//!
//! [`Scene`] borrows everything a backend needs for one frame; nothing in it
//! is owned, so building one per frame is free.

use crate::foundation::math::{Rgb, Vec3};
use crate::lighting::{LightSource, ShadingResult};
use crate::materials::{MaterialRef, MaterialStore};
use crate::reflection::{CubeRenderTarget, CubeTextureHandle, LightMarker};

/// A sphere in the main scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Display name
    pub name: String,
    /// Sphere center
    pub position: Vec3,
    /// Sphere radius
    pub radius: f64,
    /// Material the sphere is drawn with
    pub material: MaterialRef,
}

impl SceneObject {
    /// Create a sphere
    pub fn sphere(name: impl Into<String>, position: Vec3, radius: f64, material: MaterialRef) -> Self {
        Self {
            name: name.into(),
            position,
            radius,
            material,
        }
    }
}

/// Complete frame rendering data
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// Background color
    pub background: Rgb,
    /// The point light
    pub light: &'a LightSource,
    /// Visible sphere at the light position
    pub sun_marker: &'a LightMarker,
    /// Objects to draw
    pub objects: &'a [SceneObject],
    /// Materials referenced by `objects`
    pub materials: &'a MaterialStore,
    /// Latest reflection capture, if the rig is active
    pub environment: Option<&'a CubeRenderTarget>,
}

impl Scene<'_> {
    /// Cube target behind `handle`, if it is the one in this frame
    pub fn environment_for(&self, handle: CubeTextureHandle) -> Option<&CubeRenderTarget> {
        self.environment.filter(|target| target.handle() == handle)
    }
}

/// Shading of one object in a frame
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectShading {
    /// Object name
    pub name: String,
    /// Point light terms at the sample
    pub shading: ShadingResult,
    /// Albedo lit by the point light
    pub lit_color: Rgb,
    /// Reflection input the material carried this frame
    pub env_map: Option<CubeTextureHandle>,
    /// Reflection intensity multiplier the material carried this frame
    pub env_map_intensity: f64,
    /// Environment color along the mirror direction, already scaled
    pub reflection: Option<Rgb>,
}

/// What a backend reports back for a frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Frames rendered by this backend before this one
    pub frame_index: u64,
    /// Where the sun marker was drawn
    pub sun_marker: Vec3,
    /// Per-object shading, in scene order
    pub objects: Vec<ObjectShading>,
}

impl FrameOutput {
    /// Shading reported for the object called `name`
    pub fn object(&self, name: &str) -> Option<&ObjectShading> {
        self.objects.iter().find(|object| object.name == name)
    }
}
