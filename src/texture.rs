use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::TextureError;

/// How texture coordinates outside `[0, 1]` are resolved to texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Clamp to the edge texel.
    #[default]
    Clamp,
    /// Tile the texture by taking the fractional part of each coordinate.
    Repeat,
}

impl std::fmt::Display for WrapMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WrapMode::Clamp => write!(f, "clamp"),
            WrapMode::Repeat => write!(f, "repeat"),
        }
    }
}

/// An immutable image of packed RGBA2222 texels, one byte per texel,
/// stored row by row from the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Wraps raw texel bytes. Extra trailing bytes are dropped.
    pub fn from_bytes(mut data: Vec<u8>, width: u32, height: u32) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() < expected {
            return Err(TextureError::ShortRead {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        data.truncate(expected);
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Loads a headerless texture file. The format carries no dimensions, so
    /// the caller supplies them; the file must hold at least `width * height`
    /// bytes.
    pub fn from_file<P: AsRef<Path>>(path: P, width: u32, height: u32) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let io_err = |source| TextureError::Io {
            path: path.to_path_buf(),
            source,
        };

        let expected = width as usize * height as usize;
        let mut data = Vec::with_capacity(expected);
        File::open(path)
            .map_err(io_err)?
            .take(expected as u64)
            .read_to_end(&mut data)
            .map_err(io_err)?;

        let texture = Self::from_bytes(data, width, height)?;
        log::info!("Loaded {}x{} texture from {}", width, height, path.display());
        Ok(texture)
    }

    /// A texture where every texel has the same packed value.
    pub fn solid(width: u32, height: u32, texel: u8) -> Result<Self, TextureError> {
        Self::from_bytes(vec![texel; width as usize * height as usize], width, height)
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// `(0, 0)` addresses the first texel of the first row. Coordinates are
    /// scaled by the texture size and resolved to an in-range texel according
    /// to `wrap`; sampling never fails.
    #[inline]
    pub fn sample(&self, u: f32, v: f32, wrap: WrapMode) -> u8 {
        let (u, v) = match wrap {
            WrapMode::Clamp => (u, v),
            // rem_euclid keeps negative coordinates in [0, 1)
            WrapMode::Repeat => (u.rem_euclid(1.0), v.rem_euclid(1.0)),
        };
        let x = Self::texel_index(u, self.width);
        let y = Self::texel_index(v, self.height);
        self.data[y * self.width as usize + x]
    }

    #[inline]
    fn texel_index(t: f32, size: u32) -> usize {
        let max = (size - 1) as f32;
        // NaN clamps to 0 via the saturating float-to-int cast
        (t * size as f32).clamp(0.0, max) as usize
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
