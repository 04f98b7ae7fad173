//! Backend abstraction trait for the rendering system

use crate::foundation::math::Point3;
use crate::reflection::{CubeRenderTarget, EnvironmentScene};

use super::{Camera, FrameOutput, RenderResult, Scene};

/// Rendering backend
///
/// Every call is synchronous: when it returns, its output is complete. The
/// rig relies on this to finish a capture before any material reads it.
///
/// GPU backends upload [`Scene::light`] as a
/// [`PointLightUniform`](crate::lighting::PointLightUniform), whose layout
/// matches a std140 block of three `vec4`s.
pub trait RenderBackend {
    /// Allocate a cube target with square faces of `resolution` texels
    fn create_cube_target(&mut self, resolution: u32) -> RenderResult<CubeRenderTarget>;

    /// Render `scene` from `viewpoint` into all six faces of `target`
    ///
    /// Faces are overwritten in place; the target's handle stays the same.
    fn capture_cube(
        &mut self,
        viewpoint: &Point3,
        scene: &EnvironmentScene,
        target: &mut CubeRenderTarget,
    ) -> RenderResult<()>;

    /// Draw one frame of the main scene
    fn render(&mut self, scene: &Scene<'_>, camera: &Camera) -> RenderResult<FrameOutput>;
}
