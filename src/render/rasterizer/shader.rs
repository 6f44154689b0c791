//! Perspective-correct texture shading.
//!
//! Texture coordinates do not vary linearly in raster space once a triangle is
//! foreshortened. They are divided by each vertex's camera distance before
//! interpolation, interpolated with the barycentric weights, then multiplied
//! back by the perspective-correct depth of the sample.

use crate::math::vec2::Vec2;
use crate::texture::{Texture, WrapMode};

#[inline]
fn pre_divide(uvs: &[Vec2; 3], depths: &[f32; 3]) -> [Vec2; 3] {
    [
        uvs[0] * (1.0 / depths[0]),
        uvs[1] * (1.0 / depths[1]),
        uvs[2] * (1.0 / depths[2]),
    ]
}

#[inline]
fn interpolate(lambda: &[f32; 3], values: &[Vec2; 3]) -> Vec2 {
    values[0] * lambda[0] + values[1] * lambda[1] + values[2] * lambda[2]
}

/// Samples one texture at perspective-correct coordinates for a triangle.
///
/// Built once per triangle so the per-vertex division happens outside the
/// pixel loop.
pub struct TextureShader<'a> {
    texture: &'a Texture,
    /// Vertex texture coordinates already divided by vertex depth.
    uv_over_z: [Vec2; 3],
    wrap: WrapMode,
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: &'a Texture, uvs: &[Vec2; 3], depths: &[f32; 3], wrap: WrapMode) -> Self {
        Self {
            texture,
            uv_over_z: pre_divide(uvs, depths),
            wrap,
        }
    }

    /// Texture coordinates at a sample with weights `lambda` and
    /// perspective-correct depth `z`.
    #[inline]
    pub fn uv(&self, lambda: &[f32; 3], z: f32) -> Vec2 {
        interpolate(lambda, &self.uv_over_z) * z
    }

    /// Packed texel for a sample.
    #[inline]
    pub fn shade(&self, lambda: &[f32; 3], z: f32) -> u8 {
        let uv = self.uv(lambda, z);
        self.texture.sample(uv.x, uv.y, self.wrap)
    }
}
