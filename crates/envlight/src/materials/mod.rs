//! Material system
//!
//! Metalness/roughness materials with an environment-map input. Materials
//! live in a [`MaterialStore`] and are referenced by [`MaterialRef`] keys;
//! a key whose material was removed simply stops resolving, which is what
//! lets the reflection subscription hold references without owning anything.
//!
//! # Material Parameters
//!
//! - **Standard**: base color, roughness, metalness, env map intensity
//! - **Physical**: optional transmission/opacity/clearcoat block for
//!   glass-like and lacquered surfaces

pub mod presets;
pub mod subscription;

pub use subscription::MaterialSubscription;

use bitflags::bitflags;
use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::Rgb;
use crate::reflection::CubeTextureHandle;

new_key_type! {
    /// Handle to a material in a [`MaterialStore`]
    pub struct MaterialRef;
}

bitflags! {
    /// What changed on a material since the backend last uploaded it
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MaterialDirty: u8 {
        /// Environment map or its intensity changed
        const ENV_MAP = 1 << 0;
        /// Any other parameter changed
        const PARAMS = 1 << 1;
    }
}

/// Extra parameters for glass-like and clearcoated materials
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalParams {
    /// Fraction of light transmitted through the surface (0-1)
    pub transmission: f64,
    /// Alpha (0 = invisible, 1 = opaque)
    pub opacity: f64,
    /// Specular reflectivity of dielectrics (0-1)
    pub reflectivity: f64,
    /// Index of refraction
    pub ior: f64,
    /// Clearcoat layer strength (0-1)
    pub clearcoat: f64,
    /// Clearcoat layer roughness (0-1)
    pub clearcoat_roughness: f64,
    /// Volume thickness for transmission
    pub thickness: f64,
}

impl Default for PhysicalParams {
    fn default() -> Self {
        Self {
            transmission: 0.0,
            opacity: 1.0,
            reflectivity: 0.5,
            ior: 1.5,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            thickness: 0.0,
        }
    }
}

/// Metalness/roughness material with an environment map input
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Name for logs and debugging
    pub name: String,
    /// Environment map multiplier (>= 0)
    pub env_map_intensity: f64,
    base_color: Rgb,
    roughness: f64,
    metalness: f64,
    physical: Option<PhysicalParams>,
    env_map: Option<CubeTextureHandle>,
    env_map_generation: u64,
    dirty: MaterialDirty,
}

impl Material {
    /// Create a material with default properties
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_color: Rgb::WHITE,
            roughness: 1.0,
            metalness: 0.0,
            env_map_intensity: 1.0,
            physical: None,
            env_map: None,
            env_map_generation: 0,
            dirty: MaterialDirty::all(),
        }
    }

    /// Set the base color
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.base_color = color;
        self
    }

    /// Set the roughness factor
    pub fn with_roughness(mut self, roughness: f64) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Set the metalness factor
    pub fn with_metalness(mut self, metalness: f64) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    /// Set the environment map multiplier
    pub fn with_env_map_intensity(mut self, intensity: f64) -> Self {
        self.env_map_intensity = intensity.max(0.0);
        self
    }

    /// Attach physical-material parameters
    pub fn with_physical(mut self, physical: PhysicalParams) -> Self {
        self.physical = Some(physical);
        self
    }

    /// Base color (albedo)
    pub const fn base_color(&self) -> Rgb {
        self.base_color
    }

    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub const fn roughness(&self) -> f64 {
        self.roughness
    }

    /// Metalness factor (0.0 = dielectric, 1.0 = metallic)
    pub const fn metalness(&self) -> f64 {
        self.metalness
    }

    /// Physical-material block, if any
    pub const fn physical(&self) -> Option<&PhysicalParams> {
        self.physical.as_ref()
    }

    /// Change the base color and flag it for upload
    pub fn set_base_color(&mut self, color: Rgb) {
        self.base_color = color;
        self.dirty |= MaterialDirty::PARAMS;
    }

    /// Change the roughness and flag it for upload
    pub fn set_roughness(&mut self, roughness: f64) {
        self.roughness = roughness.clamp(0.0, 1.0);
        self.dirty |= MaterialDirty::PARAMS;
    }

    /// Change the metalness and flag it for upload
    pub fn set_metalness(&mut self, metalness: f64) {
        self.metalness = metalness.clamp(0.0, 1.0);
        self.dirty |= MaterialDirty::PARAMS;
    }

    /// Replace the physical-material block and flag it for upload
    pub fn set_physical(&mut self, physical: Option<PhysicalParams>) {
        self.physical = physical;
        self.dirty |= MaterialDirty::PARAMS;
    }

    /// Current environment map, `None` until the first capture is pushed
    pub const fn env_map(&self) -> Option<CubeTextureHandle> {
        self.env_map
    }

    /// Capture generation of the current environment map
    pub const fn env_map_generation(&self) -> u64 {
        self.env_map_generation
    }

    /// Write the reflection input and flag it for upload
    pub fn set_env_map(&mut self, handle: CubeTextureHandle, intensity: f64, generation: u64) {
        self.env_map = Some(handle);
        self.env_map_intensity = intensity.max(0.0);
        self.env_map_generation = generation;
        self.dirty |= MaterialDirty::ENV_MAP;
    }

    /// Whether the backend has to refresh its copy
    pub const fn needs_update(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Pending changes
    pub const fn dirty(&self) -> MaterialDirty {
        self.dirty
    }

    /// Called by backends after uploading the material
    pub fn clear_dirty(&mut self) {
        self.dirty = MaterialDirty::empty();
    }
}

/// Owner of all materials
#[derive(Debug, Default)]
pub struct MaterialStore {
    materials: SlotMap<MaterialRef, Material>,
}

impl MaterialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material and return its handle
    pub fn insert(&mut self, material: Material) -> MaterialRef {
        log::debug!("Registered material '{}'", material.name);
        self.materials.insert(material)
    }

    /// Remove a material; outstanding handles stop resolving
    pub fn remove(&mut self, material: MaterialRef) -> Option<Material> {
        self.materials.remove(material)
    }

    /// Look up a material
    pub fn get(&self, material: MaterialRef) -> Option<&Material> {
        self.materials.get(material)
    }

    /// Look up a material for modification
    pub fn get_mut(&mut self, material: MaterialRef) -> Option<&mut Material> {
        self.materials.get_mut(material)
    }

    /// Whether `material` still resolves
    pub fn contains(&self, material: MaterialRef) -> bool {
        self.materials.contains_key(material)
    }

    /// Iterate over all materials
    pub fn iter(&self) -> impl Iterator<Item = (MaterialRef, &Material)> {
        self.materials.iter()
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
