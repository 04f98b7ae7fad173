//! Rendering interface
//!
//! The crate does not rasterize. It talks to a render backend through the
//! [`RenderBackend`] trait, which exposes exactly what the lighting rig
//! needs: allocating a cube target, capturing a scene into it, and drawing a
//! frame of the main scene.

pub mod backend;
pub mod camera;
pub mod scene;
pub mod software;

pub use backend::RenderBackend;
pub use camera::Camera;
pub use scene::{FrameOutput, ObjectShading, Scene, SceneObject};
pub use software::SoftwareBackend;

use thiserror::Error;

/// High-level rendering error types
///
/// Backend-specific failures are flattened into messages so callers never
/// depend on a particular graphics API.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A cube capture could not be completed
    ///
    /// The target keeps whatever it held before; it is not current for the
    /// light anymore.
    #[error("Cube capture failed: {0}")]
    CaptureFailed(String),

    /// A frame could not be drawn
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// Resource creation or management failed
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// A cube target does not match what the backend expects
    #[error("Invalid cube target: {0}")]
    InvalidTarget(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
