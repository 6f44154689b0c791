//! Render context and the per-frame pipeline.
//!
//! The [`RenderContext`] is the single piece of mutable render state. It is
//! created once from a [`Camera`], owns the [`FrameBuffer`], and is passed
//! explicitly to every render call.

use crate::camera::{Camera, ScreenWindow};
use crate::error::RenderError;
use crate::math::mat4::Mat4;
use crate::mesh::Mesh;
use crate::projection::project_vertex;
use crate::render::{
    rasterize_triangle, Extent, FrameBuffer, RasterTriangle, RenderOptions, TriangleOutcome,
};

/// Counters for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub meshes: usize,
    pub triangles: usize,
    pub off_screen: usize,
    pub degenerate: usize,
    pub culled: usize,
    /// Meshes drawn without a texture (depth only).
    pub untextured: usize,
    /// Pixels that passed the depth test, summed over all triangles.
    pub pixels_written: usize,
}

impl FrameStats {
    fn record(&mut self, outcome: TriangleOutcome) {
        match outcome {
            TriangleOutcome::OffScreen => self.off_screen += 1,
            TriangleOutcome::Degenerate => self.degenerate += 1,
            TriangleOutcome::Culled => self.culled += 1,
            TriangleOutcome::Rasterized { pixels } => self.pixels_written += pixels,
        }
    }
}

/// Camera-derived projection state plus the framebuffer it renders into.
#[derive(Debug, Clone)]
pub struct RenderContext {
    camera: Camera,
    extent: Extent,
    near: f32,
    far: f32,
    screen_window: ScreenWindow,
    world_to_camera: Mat4,
    options: RenderOptions,
    framebuffer: FrameBuffer,
}

impl RenderContext {
    pub fn new(camera: &Camera, width: u32, height: u32) -> Self {
        let extent = Extent::new(width, height);
        let context = Self {
            camera: *camera,
            extent,
            near: camera.near_clip(),
            far: camera.far_clip(),
            screen_window: camera.screen_window(),
            world_to_camera: camera.world_to_camera(),
            options: RenderOptions::default(),
            framebuffer: FrameBuffer::new(extent, camera.far_clip()),
        };
        log::info!(
            "Render context {} (near {}, far {}, window l={:.4} r={:.4} b={:.4} t={:.4})",
            extent,
            context.near,
            context.far,
            context.screen_window.left,
            context.screen_window.right,
            context.screen_window.bottom,
            context.screen_window.top,
        );
        context
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// Resize the render target, keeping the camera pose and lens.
    ///
    /// The aspect ratio follows the new extent.
    pub fn resize(&mut self, width: u32, height: u32) {
        let extent = Extent::new(width, height);
        self.camera = self.camera.with_aspect_ratio(extent.aspect_ratio());
        self.extent = extent;
        self.screen_window = self.camera.screen_window();
        self.framebuffer = FrameBuffer::new(extent, self.far);
        log::debug!("Render context resized to {}", extent);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn near_clip(&self) -> f32 {
        self.near
    }

    pub fn far_clip(&self) -> f32 {
        self.far
    }

    pub fn screen_window(&self) -> ScreenWindow {
        self.screen_window
    }

    pub fn world_to_camera(&self) -> Mat4 {
        self.world_to_camera
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// The result of the last render pass.
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Render one frame.
    ///
    /// Clears the framebuffer, then for every mesh and triangle: transforms
    /// the corners to camera space, projects them to raster space and
    /// scan-converts the triangle. A triangle that indexes outside its mesh
    /// aborts the pass with an error naming the mesh and triangle; the
    /// framebuffer then holds a partial frame.
    pub fn render(&mut self, meshes: &[Mesh]) -> Result<FrameStats, RenderError> {
        self.framebuffer.clear();

        let mut stats = FrameStats {
            meshes: meshes.len(),
            ..Default::default()
        };

        for mesh in meshes {
            let texture = mesh.texture();
            if texture.is_none() {
                stats.untextured += 1;
                log::debug!("Mesh '{}' has no texture, shading skipped", mesh.name());
            }

            for i in 0..mesh.triangle_count() {
                let positions = mesh.triangle_positions(i)?;
                let uvs = mesh.triangle_uvs(i)?;

                let points = positions.map(|p| {
                    project_vertex(
                        p,
                        &self.world_to_camera,
                        self.near,
                        &self.screen_window,
                        self.extent,
                    )
                });
                let triangle = RasterTriangle::new(points, uvs);

                let outcome =
                    rasterize_triangle(&triangle, &mut self.framebuffer, texture, &self.options);
                stats.record(outcome);
                stats.triangles += 1;
            }
        }

        log::debug!("Frame rendered: {:?}", stats);
        Ok(stats)
    }
}
