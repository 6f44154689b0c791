//! A CPU pinhole-camera rasterizer.
//!
//! Meshes are transformed into camera space, projected through a pinhole
//! camera onto a screen window, and scan-converted with edge functions into a
//! framebuffer holding a depth plane and a packed 8-bit color plane. Texture
//! coordinates are interpolated perspective-correctly and sampled nearest
//! neighbor.
//!
//! # Quick Start
//!
//! ```ignore
//! use pinhole_raster::prelude::*;
//!
//! let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), 60.0, 0.1, 100.0, 4.0 / 3.0);
//! let mut context = RenderContext::new(&camera, 640, 480);
//! let meshes = Mesh::load_all_from_obj("model.obj")?;
//! let stats = context.render(&meshes)?;
//! let rgba = context.framebuffer().to_rgba8();
//! ```

pub mod camera;
pub mod colors;
pub mod context;
pub mod error;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod texture;
pub mod wireframe;
#[cfg(feature = "window")]
pub mod window;

pub use camera::{Camera, ScreenWindow};
pub use context::{FrameStats, RenderContext};
pub use error::{MeshError, RenderError, TextureError};
pub use mesh::Mesh;
pub use render::{CullMode, Extent, FrameBuffer, RenderOptions};
pub use texture::{Texture, WrapMode};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use pinhole_raster::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, ScreenWindow};

    // Pipeline
    pub use crate::context::{FrameStats, RenderContext};
    pub use crate::mesh::Mesh;
    pub use crate::render::{CullMode, Extent, FrameBuffer, RenderOptions};
    pub use crate::texture::{Texture, WrapMode};

    // Errors
    pub use crate::error::{MeshError, RenderError, TextureError};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;

    // Window
    #[cfg(feature = "window")]
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}
