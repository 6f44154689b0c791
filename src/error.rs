//! Error types for asset loading and rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a packed-pixel texture.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("cannot read texture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("texture data too short: expected {expected} bytes for {width}x{height}, got {actual}")]
    ShortRead {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
}

/// Failure to build or load mesh geometry.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("OBJ load error: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error(
        "mesh '{mesh}' has {triangles} position triangles but {uv_triangles} texture-coordinate triangles"
    )]
    TriangleCountMismatch {
        mesh: String,
        triangles: usize,
        uv_triangles: usize,
    },
    #[error("mesh '{mesh}' has {len} indices, which is not a multiple of 3")]
    IncompleteTriangle { mesh: String, len: usize },
    #[error(transparent)]
    Bounds(#[from] RenderError),
}

/// Failure during a render pass.
///
/// Off-screen, occluded and degenerate triangles are normal control flow and
/// never produce an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("mesh '{mesh}' has no triangle {triangle} ({count} triangles)")]
    TriangleOutOfBounds {
        mesh: String,
        triangle: usize,
        count: usize,
    },
    #[error(
        "mesh '{mesh}' triangle {triangle}: position index {index} out of bounds ({len} positions)"
    )]
    PositionIndexOutOfBounds {
        mesh: String,
        triangle: usize,
        index: u32,
        len: usize,
    },
    #[error(
        "mesh '{mesh}' triangle {triangle}: texture-coordinate index {index} out of bounds ({len} coordinates)"
    )]
    UvIndexOutOfBounds {
        mesh: String,
        triangle: usize,
        index: u32,
        len: usize,
    },
}
