//! Depth and color planes for one render target.
//!
//! The depth plane stores the positive camera-space distance of the nearest
//! surface seen so far at each pixel; smaller is closer. It is cleared to the
//! far clip distance, so anything beyond the far plane never wins the depth
//! test. The color plane stores one packed RGBA2222 byte per pixel.

use super::Extent;
use crate::colors;

/// Owned depth + color planes sized to an [`Extent`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    depth: Vec<f32>,
    color: Vec<u8>,
    extent: Extent,
    far: f32,
}

impl FrameBuffer {
    /// Allocates both planes in their cleared state.
    pub fn new(extent: Extent, far: f32) -> Self {
        Self {
            depth: vec![far; extent.area()],
            color: vec![colors::TRANSPARENT; extent.area()],
            extent,
            far,
        }
    }

    /// Reset both planes for a new frame.
    pub fn clear(&mut self) {
        self.depth.fill(self.far);
        self.color.fill(colors::TRANSPARENT);
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn width(&self) -> u32 {
        self.extent.width
    }

    pub fn height(&self) -> u32 {
        self.extent.height
    }

    /// Depth value the planes are cleared to.
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Linear index of pixel (x, y), or None if out of bounds.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.extent.width as i32 && y >= 0 && y < self.extent.height as i32 {
            Some(y as usize * self.extent.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the depth at (x, y), or None if out of bounds.
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// Get the packed color at (x, y), or None if out of bounds.
    pub fn color_at(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|i| self.color[i])
    }

    /// Depth test at a linear index.
    ///
    /// If `depth` is strictly nearer than the stored value it replaces it and
    /// the call returns true; otherwise the plane is untouched.
    #[inline]
    pub(crate) fn test_and_set_depth(&mut self, index: usize, depth: f32) -> bool {
        if depth < self.depth[index] {
            self.depth[index] = depth;
            true
        } else {
            false
        }
    }

    #[inline]
    pub(crate) fn set_color(&mut self, index: usize, texel: u8) {
        self.color[index] = texel;
    }

    pub fn depth_plane(&self) -> &[f32] {
        &self.depth
    }

    pub fn color_plane(&self) -> &[u8] {
        &self.color
    }

    /// Decodes the color plane to tightly packed RGBA8, row by row.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.color.iter().flat_map(|&p| colors::decode(p)).collect()
    }

    /// Decodes the color plane into `out` as native-endian `0xAARRGGBB`
    /// words, the layout of an ARGB8888 display texture. `out` is cleared
    /// first so one buffer can be reused across frames.
    pub fn write_argb8888_bytes(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.color.len() * 4);
        out.extend(
            self.color
                .iter()
                .flat_map(|&p| colors::to_argb8888(p).to_ne_bytes()),
        );
    }
}
