//! Camera with a fixed viewing basis. Only the position moves.

use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    position: Vec3,
    forward: Vec3,
    up: Vec3,
}

impl CameraRig {
    /// `forward` and `up` are normalized and then never change.
    pub fn new(position: Vec3, forward: Vec3, up: Vec3) -> Self {
        Self {
            position,
            forward: forward.normalize_or(Vec3::NEG_Z),
            up: up.normalize_or(Vec3::Y),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Strafe direction, `normalize(forward × up)`.
    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize()
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn distance_from_origin(&self) -> f32 {
        self.position.length()
    }

    /// Right-handed look-at toward `position + forward`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }
}
