//! Procedural UV-sphere mesh generation for the textured planetary body.

mod error;
mod sphere;
mod vertex;

pub use error::MeshError;
pub use sphere::{
    MIN_SECTORS, MIN_STACKS, SPHERE_FRONT_FACE_CLOCKWISE, SphereMesh, expected_triangle_count,
    generate_sphere,
};
pub use vertex::SphereVertex;
