//! Accumulated rotation of the viewed body.

use glam::{Mat4, Quat};

/// Rotation applied to the mesh as its object-to-world transform.
///
/// Increments are composed on the left, so every new drag rotates about the
/// fixed world axes no matter how the body is currently turned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    rotation: Quat,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
        }
    }
}

impl Orientation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotates by `yaw` radians about world +Y and `pitch` radians about
    /// world +X, yaw outermost.
    pub fn apply_world_rotation(&mut self, yaw: f32, pitch: f32) {
        let increment = Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch);
        // Renormalize so drift from long drags never skews the model matrix.
        self.rotation = (increment * self.rotation).normalize();
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation)
    }
}
