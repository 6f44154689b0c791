//! Vertex projection: mesh space → camera space → screen space → raster space.
//!
//! Each stage is a pure function over a single [`Vec3`], so the render loop
//! can chain them per vertex:
//!
//! ```ignore
//! let p = to_camera_space(vertex, &world_to_camera);
//! let p = perspective_divide(p, near);
//! let p = to_raster(p, &screen_window, extent);
//! ```

use crate::camera::ScreenWindow;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::render::Extent;

/// Smallest camera distance a vertex is allowed to have before the divide.
///
/// Vertices on or behind the camera plane are pushed to this distance so the
/// divide never produces NaN, infinity or a sign flip.
pub const Z_EPSILON: f32 = 1e-6;

/// Applies the world-to-camera transform to a mesh-space position.
///
/// Points in front of the camera come out with negative z.
#[inline]
pub fn to_camera_space(p: Vec3, world_to_camera: &Mat4) -> Vec3 {
    world_to_camera.transform_point(p)
}

/// Projects a camera-space point onto the image plane at distance `near`.
///
/// x and y become screen-space coordinates; z becomes the positive camera
/// distance, which the rasterizer uses for depth testing and perspective-
/// correct interpolation.
#[inline]
pub fn perspective_divide(mut p: Vec3, near: f32) -> Vec3 {
    // Negated so that a NaN depth is clamped as well.
    if !(p.z <= -Z_EPSILON) {
        p.z = -Z_EPSILON;
    }
    let inv_z = 1.0 / -p.z;
    Vec3::new(p.x * inv_z * near, p.y * inv_z * near, -p.z)
}

/// Maps a screen-space point to pixel coordinates, origin top-left, y down.
///
/// z passes through unchanged.
#[inline]
pub fn to_raster(p: Vec3, window: &ScreenWindow, extent: Extent) -> Vec3 {
    let ndc_x = (2.0 * p.x - (window.right + window.left)) / window.width();
    let ndc_y = (2.0 * p.y - (window.top + window.bottom)) / window.height();
    Vec3::new(
        (ndc_x + 1.0) * 0.5 * extent.width as f32,
        (1.0 - ndc_y) * 0.5 * extent.height as f32,
        p.z,
    )
}

/// Runs a mesh-space vertex through all three stages.
#[inline]
pub fn project_vertex(
    p: Vec3,
    world_to_camera: &Mat4,
    near: f32,
    window: &ScreenWindow,
    extent: Extent,
) -> Vec3 {
    let camera = to_camera_space(p, world_to_camera);
    to_raster(perspective_divide(camera, near), window, extent)
}

/// Like [`project_vertex`], also reporting whether the projected point lies
/// inside the screen window (edges included).
///
/// A point on or behind the camera plane is clamped before the test, so it
/// lands far outside the window and reports as not visible.
pub fn project_vertex_visible(
    p: Vec3,
    world_to_camera: &Mat4,
    near: f32,
    window: &ScreenWindow,
    extent: Extent,
) -> (Vec3, bool) {
    let screen = perspective_divide(to_camera_space(p, world_to_camera), near);
    let visible = window.contains(screen.x, screen.y);
    (to_raster(screen, window, extent), visible)
}
