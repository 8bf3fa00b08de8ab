//! Interleaved sphere vertex format.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// A sphere vertex: object-space position, unit normal, and equirectangular UV.
///
/// Laid out as `position (f32×3) | normal (f32×3) | uv (f32×2)` for direct
/// upload to a GPU vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

static_assertions::assert_eq_size!(SphereVertex, [u8; 32]);

impl SphereVertex {
    /// Position as a glam vector.
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Normal as a glam vector.
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    /// Texture coordinate as a glam vector.
    pub fn uv(&self) -> Vec2 {
        Vec2::from_array(self.uv)
    }
}
