//! Environment reflections
//!
//! A cube render target that follows the light: every time the light moves,
//! the environment-only scene (sky plus light marker) is captured from a
//! fixed viewpoint into the same six faces, and materials sample it through
//! a stable [`CubeTextureHandle`].

pub mod capture;
pub mod cube;
pub mod environment;

pub use capture::ReflectionCapture;
pub use cube::{CubeFace, CubeRenderTarget, CubeTextureHandle};
pub use environment::{EnvironmentScene, LightMarker};
