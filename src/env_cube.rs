//! Environment Cube Images
//!
//! Environment maps arrive on disk as a horizontal strip: six square faces
//! side by side, so `width == 6 × height` with a power-of-two height.
//! [`CubeImage`] is the validated, face-major form the backend uploads.
//!
//! The sentinel path [`FLAT_CUBE_PATH`] skips disk entirely and synthesizes
//! a 1×1-per-face colored debug cube.

use std::path::Path;

use crate::backend::RenderBackend;
use crate::errors::{GfxError, Result};

/// Faces of a cube map, in strip order `+X −X +Y −Y +Z −Z`.
pub const CUBE_FACES: usize = 6;

/// Sentinel path selecting the built-in flat debug cube.
pub const FLAT_CUBE_PATH: &str = "/";

/// Six square RGB8 faces, face-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeImage {
    size: u32,
    data: Vec<u8>,
}

impl CubeImage {
    /// Edge length of each face, in pixels.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The pixels of one face, tightly packed RGB8 rows.
    ///
    /// # Panics
    ///
    /// Panics if `face >= CUBE_FACES`.
    #[must_use]
    pub fn face(&self, face: usize) -> &[u8] {
        assert!(face < CUBE_FACES, "cube face index {face} out of range");
        let face_bytes = (self.size * self.size * 3) as usize;
        &self.data[face * face_bytes..(face + 1) * face_bytes]
    }

    /// The built-in 1×1-per-face debug cube: each face a flat tint keyed to
    /// its axis.
    #[must_use]
    pub fn flat_debug() -> Self {
        #[rustfmt::skip]
        let data = vec![
            0xff, 0x7f, 0x7f, // +X
            0x00, 0x7f, 0x7f, // -X
            0x7f, 0xff, 0x7f, // +Y
            0x7f, 0x00, 0x7f, // -Y
            0x7f, 0x7f, 0xff, // +Z
            0x7f, 0x7f, 0x00, // -Z
        ];
        Self { size: 1, data }
    }

    /// Validates and reorganizes a horizontal strip image into face-major
    /// cube layout.
    pub fn from_strip(strip: &image::RgbImage) -> Result<Self> {
        let (width, height) = strip.dimensions();
        if width != height * 6 {
            return Err(GfxError::CubeMap(format!(
                "environment map has incorrect dimensions: {width}x{height}"
            )));
        }
        if !height.is_power_of_two() {
            return Err(GfxError::CubeMap(format!(
                "environment map dimensions not a power of 2: {height}"
            )));
        }

        let size = height;
        let mut data = Vec::with_capacity((6 * size * size * 3) as usize);
        for face in 0..CUBE_FACES as u32 {
            for y in 0..size {
                for x in 0..size {
                    let px = strip.get_pixel(face * size + x, y);
                    data.extend_from_slice(&px.0);
                }
            }
        }
        Ok(Self { size, data })
    }
}

/// The currently loaded environment cube: its path plus the backend-resident
/// texture it was uploaded to.
#[derive(Debug, Default)]
pub struct EnvironmentCubeState {
    path: String,
}

impl EnvironmentCubeState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The path of the currently loaded cube; empty before the first `set`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Loads and uploads the cube at `path`, or the built-in debug cube for
    /// [`FLAT_CUBE_PATH`].
    ///
    /// Paths start with `/` and resolve against `resource_root`. Setting the
    /// already-loaded path is a no-op. The backend reuses its existing cube
    /// texture slot, so references held by in-flight materials stay valid.
    pub fn set<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        resource_root: &Path,
        path: &str,
    ) -> Result<()> {
        if path == self.path {
            return Ok(());
        }
        if !path.starts_with('/') {
            return Err(GfxError::Configuration(format!(
                "environment map path must start with '/': {path}"
            )));
        }

        let cube = if path == FLAT_CUBE_PATH {
            CubeImage::flat_debug()
        } else {
            let disk = image::open(resource_root.join(&path[1..]))?.into_rgb8();
            CubeImage::from_strip(&disk)?
        };

        backend.upload_env_cube(&cube)?;
        self.path = path.to_owned();
        Ok(())
    }
}
