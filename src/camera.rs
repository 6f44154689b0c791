//! Pinhole camera.
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer; the camera looks down **-Z**
//!
//! Points in front of the camera therefore have negative camera-space z.
//!
//! # Orientation
//!
//! Orientation is stored as yaw/pitch angles and composed into the
//! camera-to-world matrix when needed. A camera with zero yaw and pitch is
//! axis-aligned.
//!
//! - **Yaw**: Rotation around Y-axis (positive = turn left)
//! - **Pitch**: Rotation around X-axis (positive = look up)

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// The visible rectangle on the image plane at the near clip distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenWindow {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl ScreenWindow {
    /// Symmetric window for a vertical field of view (radians), aspect ratio
    /// and near clip distance.
    pub fn from_fov(fov_y: f32, aspect_ratio: f32, near: f32) -> Self {
        let top = near * (fov_y / 2.0).tan();
        let right = top * aspect_ratio;
        Self {
            left: -right,
            right,
            top,
            bottom: -top,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Whether a screen-space point lies inside the window (edges included).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.bottom && y <= self.top
    }
}

/// Pinhole camera: pose plus lens parameters.
///
/// Immutable once built; the builder-style `with_*` methods return a new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,   // Rotation around Y-axis (radians)
    pitch: f32, // Rotation around X-axis (radians)
    /// Vertical field of view in degrees.
    fov: f32,
    near: f32,
    far: f32,
    aspect_ratio: f32,
}

impl Camera {
    /// Creates an axis-aligned camera.
    ///
    /// # Arguments
    /// * `position` - World-space position
    /// * `fov` - Vertical field of view in degrees
    /// * `near` - Near clip distance (> 0)
    /// * `far` - Far clip distance (> near), also the depth plane's clear value
    /// * `aspect_ratio` - Width divided by height
    pub fn new(position: Vec3, fov: f32, near: f32, far: f32, aspect_ratio: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            fov,
            near,
            far,
            aspect_ratio,
        }
    }

    /// Returns a copy with the given yaw and pitch (radians).
    pub fn with_orientation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Returns a copy with a new aspect ratio (typically on resize).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn near_clip(&self) -> f32 {
        self.near
    }

    pub fn far_clip(&self) -> f32 {
        self.far
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Camera-to-world transform: `T(position) * Ry(yaw) * Rx(pitch)`.
    pub fn camera_to_world(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_y(self.yaw)
            * Mat4::rotation_x(self.pitch)
    }

    /// World-to-camera transform, the inverse of [`Camera::camera_to_world`].
    pub fn world_to_camera(&self) -> Mat4 {
        // A rotation followed by a translation is always invertible.
        self.camera_to_world()
            .inverse()
            .unwrap_or(Mat4::identity())
    }

    /// The screen window derived from field of view, aspect ratio and near clip.
    pub fn screen_window(&self) -> ScreenWindow {
        ScreenWindow::from_fov(self.fov.to_radians(), self.aspect_ratio, self.near)
    }
}
