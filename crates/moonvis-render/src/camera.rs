//! Fixed perspective projection for the viewer.

use glam::Mat4;

/// Perspective projection built once at startup. Only the aspect ratio
/// changes afterwards, on window resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveProjection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width over height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveProjection {
    fn default() -> Self {
        Self {
            fov_y: 45f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl PerspectiveProjection {
    pub fn new(fov_y_degrees: f32, width: u32, height: u32, near: f32, far: f32) -> Self {
        let mut projection = Self {
            fov_y: fov_y_degrees.to_radians(),
            aspect: 1.0,
            near,
            far,
        };
        projection.set_viewport(width, height);
        projection
    }

    /// Updates the aspect ratio. Zero dimensions count as 1.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Reverse-Z matrix: the near plane lands at depth 1, the far plane at 0.
    pub fn matrix(&self) -> Mat4 {
        // Swapping near and far is what flips the depth range.
        Mat4::perspective_rh(self.fov_y, self.aspect, self.far, self.near)
    }
}
