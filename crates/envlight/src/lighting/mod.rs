//! Lighting
//!
//! Light placement from UI angles and the analytic point-light shading model.
//! Both halves are pure: no rendering backend, no global state.

pub mod orientation;
pub mod point_light;

pub use orientation::{Orientation, OrientationInput, OrientationResolver};
pub use point_light::{LightSource, PointLightModel, PointLightUniform, ShadingResult, SurfaceSample};
