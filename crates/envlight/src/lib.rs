//! # envlight
//!
//! Analytic point lighting with a light-synchronized cube-map reflection.
//!
//! ## Features
//!
//! - **Point Light Model**: distance-attenuated diffuse plus a fixed-exponent
//!   specular lobe
//! - **Slider Orientation**: three rotation angles and a distance mapped to a
//!   light position in a fixed X, Y, Z order
//! - **Reflection Capture**: a six-face cube target re-rendered from a fixed
//!   viewpoint every time the light moves
//! - **Material Subscription**: reflective materials receive the fresh
//!   capture right after it completes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use envlight::prelude::*;
//!
//! fn main() -> Result<(), RigError> {
//!     let mut backend = SoftwareBackend::new();
//!     let mut materials = MaterialStore::new();
//!     let silver = materials.insert(presets::silver());
//!
//!     let mut rig = LightRig::from_config(RigConfig::default())?;
//!     rig.activate(&mut backend)?;
//!     rig.register_material(silver);
//!
//!     let update = rig.set_orientation(Orientation::new(45.0, 45.0, 0.0, 10.0), &mut backend, &mut materials);
//!     assert!(update.captured);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod lighting;
pub mod materials;
pub mod reflection;
pub mod render;
pub mod rig;

pub use rig::{LightRig, RigError, RigState, RigUpdate};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::{CaptureConfig, EngineConfig, LightConfig, RigConfig, SceneConfig},
        foundation::math::{Point3, Rgb, Vec3},
        lighting::{LightSource, Orientation, OrientationInput, OrientationResolver, PointLightModel, SurfaceSample},
        materials::{presets, Material, MaterialRef, MaterialStore, MaterialSubscription},
        reflection::{CubeFace, CubeRenderTarget, CubeTextureHandle, ReflectionCapture},
        render::{Camera, FrameOutput, RenderBackend, RenderError, Scene, SceneObject, SoftwareBackend},
        LightRig, RigError, RigState, RigUpdate,
    };
}
