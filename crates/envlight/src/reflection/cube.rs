//! Cube render target
//!
//! Six square faces addressed with the usual cube-map convention (+X, -X,
//! +Y, -Y, +Z, -Z). The target is allocated once and every capture
//! overwrites the faces in place; the texture handle never changes, so
//! materials holding it always see the latest capture.

use image::{Rgb as Rgb8, RgbImage};

use crate::foundation::math::{Rgb, Vec3};

/// Handle to a cube texture owned by a render backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeTextureHandle(pub u64);

/// One face of a cube map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    /// Looking down +X
    PositiveX,
    /// Looking down -X
    NegativeX,
    /// Looking down +Y
    PositiveY,
    /// Looking down -Y
    NegativeY,
    /// Looking down +Z
    PositiveZ,
    /// Looking down -Z
    NegativeZ,
}

impl CubeFace {
    /// All faces in storage order
    pub const ALL: [Self; 6] = [
        Self::PositiveX,
        Self::NegativeX,
        Self::PositiveY,
        Self::NegativeY,
        Self::PositiveZ,
        Self::NegativeZ,
    ];

    /// Storage index of this face
    pub const fn index(self) -> usize {
        match self {
            Self::PositiveX => 0,
            Self::NegativeX => 1,
            Self::PositiveY => 2,
            Self::NegativeY => 3,
            Self::PositiveZ => 4,
            Self::NegativeZ => 5,
        }
    }

    /// Short name used for file names and logs
    pub const fn label(self) -> &'static str {
        match self {
            Self::PositiveX => "px",
            Self::NegativeX => "nx",
            Self::PositiveY => "py",
            Self::NegativeY => "ny",
            Self::PositiveZ => "pz",
            Self::NegativeZ => "nz",
        }
    }

    /// Unnormalized world direction through face coordinates `(u, v)`
    ///
    /// `u` runs left to right and `v` top to bottom, both in `[-1, 1]`.
    pub fn direction(self, u: f64, v: f64) -> Vec3 {
        match self {
            Self::PositiveX => Vec3::new(1.0, -v, -u),
            Self::NegativeX => Vec3::new(-1.0, -v, u),
            Self::PositiveY => Vec3::new(u, 1.0, v),
            Self::NegativeY => Vec3::new(u, -1.0, -v),
            Self::PositiveZ => Vec3::new(u, -v, 1.0),
            Self::NegativeZ => Vec3::new(-u, -v, -1.0),
        }
    }

    /// Face and `(u, v)` coordinates a direction passes through
    ///
    /// Returns `None` for the zero vector and non-finite directions.
    pub fn locate(direction: &Vec3) -> Option<(Self, f64, f64)> {
        let (x, y, z) = (direction.x, direction.y, direction.z);
        let (ax, ay, az) = (x.abs(), y.abs(), z.abs());
        if !(ax.is_finite() && ay.is_finite() && az.is_finite()) {
            return None;
        }

        let (face, major, sc, tc) = if ax >= ay && ax >= az {
            if x > 0.0 {
                (Self::PositiveX, ax, -z, -y)
            } else {
                (Self::NegativeX, ax, z, -y)
            }
        } else if ay >= az {
            if y > 0.0 {
                (Self::PositiveY, ay, x, z)
            } else {
                (Self::NegativeY, ay, x, -z)
            }
        } else if z > 0.0 {
            (Self::PositiveZ, az, x, -y)
        } else {
            (Self::NegativeZ, az, -x, -y)
        };

        if major == 0.0 {
            return None;
        }
        Some((face, sc / major, tc / major))
    }
}

/// Six-face color buffer plus the handle materials use to reference it
#[derive(Debug, Clone)]
pub struct CubeRenderTarget {
    handle: CubeTextureHandle,
    resolution: u32,
    faces: [RgbImage; 6],
    generation: u64,
}

impl CubeRenderTarget {
    /// Allocate a target with black faces
    pub fn new(handle: CubeTextureHandle, resolution: u32) -> Self {
        Self {
            handle,
            resolution,
            faces: std::array::from_fn(|_| RgbImage::new(resolution, resolution)),
            generation: 0,
        }
    }

    /// Texture handle shared with subscribed materials
    pub const fn handle(&self) -> CubeTextureHandle {
        self.handle
    }

    /// Edge length of every face in texels
    pub const fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Number of completed captures
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the faces hold a completed capture
    pub const fn has_content(&self) -> bool {
        self.generation > 0
    }

    /// Record that a capture finished writing every face
    pub(crate) fn mark_captured(&mut self) {
        self.generation += 1;
    }

    /// Read access to one face
    pub fn face(&self, face: CubeFace) -> &RgbImage {
        &self.faces[face.index()]
    }

    /// Write access to one face, for backends
    pub fn face_mut(&mut self, face: CubeFace) -> &mut RgbImage {
        &mut self.faces[face.index()]
    }

    /// Face coordinates of the center of texel `(x, y)`
    pub fn texel_uv(&self, x: u32, y: u32) -> (f64, f64) {
        let size = f64::from(self.resolution);
        (
            2.0 * (f64::from(x) + 0.5) / size - 1.0,
            2.0 * (f64::from(y) + 0.5) / size - 1.0,
        )
    }

    /// Nearest-texel lookup along a world direction
    ///
    /// Returns `None` before the first capture, when there is nothing valid
    /// to sample, and for directions without a face.
    pub fn sample(&self, direction: &Vec3) -> Option<Rgb> {
        if !self.has_content() {
            return None;
        }
        let (face, u, v) = CubeFace::locate(direction)?;
        let x = self.texel_index(u);
        let y = self.texel_index(v);
        let Rgb8([r, g, b]) = *self.face(face).get_pixel(x, y);
        Some(Rgb::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        ))
    }

    fn texel_index(&self, coord: f64) -> u32 {
        let size = f64::from(self.resolution);
        let texel = ((coord + 1.0) * 0.5 * size).floor();
        texel.clamp(0.0, size - 1.0) as u32
    }
}
