//! Triangle scan conversion.
//!
//! Triangles arrive in raster space (x/y in pixels, z the positive camera
//! distance). Each one is scan-converted over its clamped bounding box with
//! edge functions, depth-tested with perspective-correct depth, and shaded by
//! nearest-neighbor texture lookup at perspective-correct coordinates.
//!
//! The pass is stateless per triangle; all state lives in the [`FrameBuffer`].

pub mod edgefunction;
pub mod shader;

pub use edgefunction::{barycentric, edge_function, interpolate_depth, is_covered, signed_area};
pub use shader::TextureShader;

use super::framebuffer::FrameBuffer;
use super::RenderOptions;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

/// Which triangles are rejected by winding before scan conversion.
///
/// Winding is judged by the sign of [`signed_area`] in raster space: positive
/// is front-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    /// Draw both windings.
    #[default]
    None,
    /// Reject triangles with negative signed area.
    Back,
}

impl std::fmt::Display for CullMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CullMode::None => write!(f, "none"),
            CullMode::Back => write!(f, "back"),
        }
    }
}

/// A triangle ready for rasterization in raster space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterTriangle {
    /// x/y in pixels, z the positive camera-space distance.
    pub points: [Vec3; 3],
    pub uvs: [Vec2; 3],
}

impl RasterTriangle {
    pub fn new(points: [Vec3; 3], uvs: [Vec2; 3]) -> Self {
        Self { points, uvs }
    }

    fn depths(&self) -> [f32; 3] {
        [self.points[0].z, self.points[1].z, self.points[2].z]
    }

    /// `[min_x, min_y, max_x, max_y]`
    fn bounding_box(&self) -> [f32; 4] {
        let [p0, p1, p2] = self.points;
        [
            p0.x.min(p1.x).min(p2.x),
            p0.y.min(p1.y).min(p2.y),
            p0.x.max(p1.x).max(p2.x),
            p0.y.max(p1.y).max(p2.y),
        ]
    }
}

/// What happened to one triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleOutcome {
    /// Bounding box does not touch the render target.
    OffScreen,
    /// Zero signed area.
    Degenerate,
    /// Rejected by the cull mode.
    Culled,
    /// Scan-converted; `pixels` passed the depth test.
    Rasterized { pixels: usize },
}

/// Scan-converts one triangle into `buffer`.
///
/// Covered pixels that pass the depth test update the depth plane and, when a
/// texture is supplied, the color plane. Without a texture only depth is
/// written and the color keeps its previous value.
pub fn rasterize_triangle(
    triangle: &RasterTriangle,
    buffer: &mut FrameBuffer,
    texture: Option<&Texture>,
    options: &RenderOptions,
) -> TriangleOutcome {
    let width = buffer.width() as i32;
    let height = buffer.height() as i32;

    // ─────────────────────────────────────────────────────────────────────
    // Step 1: Bounding box, rejected or clamped against the target
    // ─────────────────────────────────────────────────────────────────────
    let [min_x, min_y, max_x, max_y] = triangle.bounding_box();
    let off_screen = min_x > (width - 1) as f32
        || max_x < 0.0
        || min_y > (height - 1) as f32
        || max_y < 0.0;
    if off_screen {
        return TriangleOutcome::OffScreen;
    }

    let x0 = (min_x.floor() as i32).max(0);
    let y0 = (min_y.floor() as i32).max(0);
    let x1 = (max_x.floor() as i32).min(width - 1);
    let y1 = (max_y.floor() as i32).min(height - 1);

    // ─────────────────────────────────────────────────────────────────────
    // Step 2: Signed area, winding
    // ─────────────────────────────────────────────────────────────────────
    let points = &triangle.points;
    let area = signed_area(points);
    if area.abs() < f32::EPSILON || !area.is_finite() {
        return TriangleOutcome::Degenerate;
    }
    if options.cull_mode == CullMode::Back && area < 0.0 {
        return TriangleOutcome::Culled;
    }

    let depths = triangle.depths();
    let shader =
        texture.map(|tex| TextureShader::new(tex, &triangle.uvs, &depths, options.wrap_mode));

    // ─────────────────────────────────────────────────────────────────────
    // Step 3: Scan the box at pixel centers
    // ─────────────────────────────────────────────────────────────────────
    let mut pixels = 0;
    for y in y0..=y1 {
        let row = y as usize * width as usize;
        for x in x0..=x1 {
            let sample = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);
            let lambda = barycentric(points, area, sample);
            if !is_covered(&lambda) {
                continue;
            }

            let z = interpolate_depth(&lambda, &depths);
            let index = row + x as usize;
            if !buffer.test_and_set_depth(index, z) {
                continue;
            }
            pixels += 1;

            if let Some(shader) = &shader {
                buffer.set_color(index, shader.shade(&lambda, z));
            }
        }
    }

    TriangleOutcome::Rasterized { pixels }
}
