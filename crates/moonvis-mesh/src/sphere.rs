//! UV-sphere mesh generation for planetary body rendering.

use std::f64::consts::{PI, TAU};

use glam::Vec3;
use tracing::debug;

use crate::error::MeshError;
use crate::vertex::SphereVertex;

/// Fewest longitude slices that still enclose a volume.
pub const MIN_SECTORS: u32 = 3;

/// Fewest latitude bands: one polar fan per hemisphere.
pub const MIN_STACKS: u32 = 2;

/// Triangles produced by [`generate_sphere`] wind clockwise when viewed from
/// outside the sphere. The rasterizer's front face must be configured to match.
pub const SPHERE_FRONT_FACE_CLOCKWISE: bool = true;

/// A triangulated UV sphere. Immutable once generated.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    vertices: Vec<SphereVertex>,
    indices: Vec<u32>,
    radius: f32,
    sectors: u32,
    stacks: u32,
}

/// Number of triangles [`generate_sphere`] emits for the given grid.
///
/// Each polar row is a fan of `sectors` triangles and every interior row is
/// `sectors` quads split in two, which totals `2 · sectors · (stacks − 1)`.
pub fn expected_triangle_count(sectors: u32, stacks: u32) -> usize {
    2 * sectors as usize * (stacks as usize).saturating_sub(1)
}

/// Generate a UV sphere of the given radius.
///
/// Vertices are emitted stack-major: vertex `(i, j)` lives at index
/// `i · (sectors + 1) + j`, with `i = 0` at the north pole (+Y) and
/// `i = stacks` at the south pole. The seam column (`j = 0` and `j = sectors`)
/// and the pole rows are duplicated so every triangle owns distinct texture
/// coordinates. Normals equal the unit-sphere point regardless of radius.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when `radius` is not a finite
/// positive number, when `sectors < 3` or `stacks < 2`, or when the vertex
/// grid would not be addressable with `u32` indices.
pub fn generate_sphere(radius: f32, sectors: u32, stacks: u32) -> Result<SphereMesh, MeshError> {
    validate(radius, sectors, stacks)?;

    let row = sectors as usize + 1;
    let mut vertices = Vec::with_capacity(row * (stacks as usize + 1));

    for i in 0..=stacks {
        let v = i as f32 / stacks as f32;
        let phi = PI * i as f64 / stacks as f64;
        let (sin_phi, cos_phi) = phi.sin_cos();

        for j in 0..=sectors {
            let u = j as f32 / sectors as f32;
            let theta = TAU * j as f64 / sectors as f64;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let point = Vec3::new(
                (cos_theta * sin_phi) as f32,
                cos_phi as f32,
                (sin_theta * sin_phi) as f32,
            );

            vertices.push(SphereVertex {
                position: (point * radius).to_array(),
                normal: point.to_array(),
                uv: [u, v],
            });
        }
    }

    let mut indices = Vec::with_capacity(expected_triangle_count(sectors, stacks) * 3);
    let row = sectors + 1;

    for i in 0..stacks {
        for j in 0..sectors {
            let k1 = i * row + j;
            let k2 = k1 + row;

            // The first triangle of the north row and the second of the south
            // row collapse onto the pole.
            if i != 0 {
                indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            if i != stacks - 1 {
                indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
        }
    }

    debug!(
        radius,
        sectors,
        stacks,
        vertices = vertices.len(),
        triangles = indices.len() / 3,
        "Generated sphere mesh"
    );

    Ok(SphereMesh {
        vertices,
        indices,
        radius,
        sectors,
        stacks,
    })
}

fn validate(radius: f32, sectors: u32, stacks: u32) -> Result<(), MeshError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(MeshError::InvalidParameter {
            name: "radius",
            reason: format!("must be a finite value > 0, got {radius}"),
        });
    }
    if sectors < MIN_SECTORS {
        return Err(MeshError::InvalidParameter {
            name: "sectors",
            reason: format!("must be at least {MIN_SECTORS}, got {sectors}"),
        });
    }
    if stacks < MIN_STACKS {
        return Err(MeshError::InvalidParameter {
            name: "stacks",
            reason: format!("must be at least {MIN_STACKS}, got {stacks}"),
        });
    }

    let vertex_count = (u64::from(sectors) + 1) * (u64::from(stacks) + 1);
    if vertex_count > u64::from(u32::MAX) {
        return Err(MeshError::InvalidParameter {
            name: "sectors",
            reason: format!(
                "{sectors}x{stacks} grid needs {vertex_count} vertices, more than u32 indices can address"
            ),
        });
    }

    let index_count = 6 * u64::from(sectors) * (u64::from(stacks) - 1);
    if index_count > u64::from(u32::MAX) {
        return Err(MeshError::InvalidParameter {
            name: "sectors",
            reason: format!(
                "{sectors}x{stacks} grid needs {index_count} indices, more than a u32 draw count can hold"
            ),
        });
    }

    Ok(())
}

impl SphereMesh {
    /// Interleaved vertex data in stack-major order.
    pub fn vertices(&self) -> &[SphereVertex] {
        &self.vertices
    }

    /// Triangle list indices; every consecutive triple is one triangle.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Radius the sphere was generated with.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Number of longitude slices.
    pub fn sectors(&self) -> u32 {
        self.sectors
    }

    /// Number of latitude bands.
    pub fn stacks(&self) -> u32 {
        self.stacks
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Index of the vertex at stack `i`, sector `j`.
    #[cfg(test)]
    fn vertex_index(&self, stack: u32, sector: u32) -> u32 {
        stack * (self.sectors + 1) + sector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_vertex_count_matches_grid() {
        for &(sectors, stacks) in &[(3, 2), (4, 3), (16, 8), (36, 18)] {
            let mesh = generate_sphere(1.0, sectors, stacks).unwrap();
            assert_eq!(
                mesh.vertex_count(),
                ((sectors + 1) * (stacks + 1)) as usize,
                "sectors={sectors} stacks={stacks}"
            );
        }
    }

    #[test]
    fn test_small_grid_exact_counts() {
        // 4 sectors, 3 stacks: the two polar rows are fans of 4 triangles each
        // and the single interior row holds 4 quads.
        let mesh = generate_sphere(1.0, 4, 3).unwrap();
        assert_eq!(mesh.vertex_count(), 20);
        assert_eq!(mesh.triangle_count(), 4 + 8 + 4);
        assert_eq!(mesh.index_count(), 48);
    }

    #[test]
    fn test_minimum_grid_is_two_fans() {
        let mesh = generate_sphere(1.0, 3, 2).unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 6);
    }

    #[test]
    fn test_triangle_count_matches_formula() {
        for &(sectors, stacks) in &[(3, 2), (4, 3), (5, 7), (32, 16), (360, 180)] {
            let mesh = generate_sphere(1.0, sectors, stacks).unwrap();
            assert_eq!(
                mesh.triangle_count(),
                expected_triangle_count(sectors, stacks)
            );
            assert_eq!(
                mesh.index_count(),
                6 * sectors as usize * (stacks as usize - 1)
            );
        }
    }

    #[test]
    fn test_positions_lie_on_radius() {
        let radius = 2.5;
        let mesh = generate_sphere(radius, 24, 12).unwrap();
        for v in mesh.vertices() {
            let len = v.position().length();
            assert!(
                (len - radius).abs() < EPS * radius,
                "vertex not on sphere: length = {len}"
            );
        }
    }

    #[test]
    fn test_normals_are_unit_and_radius_independent() {
        let small = generate_sphere(0.5, 12, 6).unwrap();
        let large = generate_sphere(40.0, 12, 6).unwrap();
        for (a, b) in small.vertices().iter().zip(large.vertices()) {
            assert!((a.normal().length() - 1.0).abs() < EPS);
            assert_eq!(a.normal, b.normal);
        }
    }

    #[test]
    fn test_normal_equals_normalized_position() {
        let mesh = generate_sphere(3.0, 10, 5).unwrap();
        for v in mesh.vertices() {
            let diff = (v.position().normalize() - v.normal()).length();
            assert!(diff < EPS);
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        let mesh = generate_sphere(1.0, 36, 18).unwrap();
        let n = mesh.vertex_count() as u32;
        for &idx in mesh.indices() {
            assert!(idx < n, "index {idx} out of bounds (vertex count = {n})");
        }
    }

    #[test]
    fn test_every_triangle_has_distinct_indices() {
        let mesh = generate_sphere(1.0, 7, 5).unwrap();
        for [a, b, c] in mesh.triangles() {
            assert!(a != b && b != c && a != c, "degenerate triangle {a},{b},{c}");
        }
    }

    #[test]
    fn test_no_zero_area_triangles() {
        let mesh = generate_sphere(1.0, 8, 4).unwrap();
        let verts = mesh.vertices();
        for [a, b, c] in mesh.triangles() {
            let pa = verts[a as usize].position();
            let pb = verts[b as usize].position();
            let pc = verts[c as usize].position();
            let area = (pb - pa).cross(pc - pa).length() * 0.5;
            assert!(area > 1e-6, "zero-area triangle {a},{b},{c}");
        }
    }

    #[test]
    fn test_winding_is_clockwise_from_outside() {
        assert!(SPHERE_FRONT_FACE_CLOCKWISE);
        let mesh = generate_sphere(1.0, 12, 6).unwrap();
        let verts = mesh.vertices();
        for [a, b, c] in mesh.triangles() {
            let pa = verts[a as usize].position();
            let pb = verts[b as usize].position();
            let pc = verts[c as usize].position();
            let ccw_normal = (pb - pa).cross(pc - pa);
            let centroid = (pa + pb + pc) / 3.0;
            assert!(
                ccw_normal.dot(centroid) < 0.0,
                "triangle {a},{b},{c} does not wind clockwise from outside"
            );
        }
    }

    #[test]
    fn test_uvs_follow_grid() {
        let mesh = generate_sphere(1.0, 8, 4).unwrap();
        for i in 0..=4 {
            for j in 0..=8 {
                let v = mesh.vertices()[mesh.vertex_index(i, j) as usize];
                assert!((v.uv[0] - j as f32 / 8.0).abs() < f32::EPSILON);
                assert!((v.uv[1] - i as f32 / 4.0).abs() < f32::EPSILON);
            }
        }
    }

    #[test]
    fn test_poles_and_seam() {
        let mesh = generate_sphere(2.0, 6, 3).unwrap();
        let verts = mesh.vertices();

        let north = verts[mesh.vertex_index(0, 0) as usize].position();
        let south = verts[mesh.vertex_index(3, 0) as usize].position();
        assert!((north - Vec3::new(0.0, 2.0, 0.0)).length() < EPS);
        assert!((south - Vec3::new(0.0, -2.0, 0.0)).length() < EPS);

        for i in 0..=3 {
            let first = verts[mesh.vertex_index(i, 0) as usize];
            let last = verts[mesh.vertex_index(i, 6) as usize];
            assert!((first.position() - last.position()).length() < EPS);
            assert_eq!(first.uv[0], 0.0);
            assert_eq!(last.uv[0], 1.0);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_sphere(1.0, 20, 10).unwrap();
        let b = generate_sphere(1.0, 20, 10).unwrap();
        assert_eq!(a.vertices(), b.vertices());
        assert_eq!(a.indices(), b.indices());
    }

    #[test]
    fn test_rejects_too_few_sectors() {
        let err = generate_sphere(1.0, 2, 8).unwrap_err();
        assert!(matches!(
            err,
            MeshError::InvalidParameter {
                name: "sectors",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_too_few_stacks() {
        let err = generate_sphere(1.0, 8, 1).unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { name: "stacks", .. }));
    }

    #[test]
    fn test_rejects_bad_radius() {
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = generate_sphere(radius, 8, 4).unwrap_err();
            assert!(matches!(err, MeshError::InvalidParameter { name: "radius", .. }));
        }
    }

    #[test]
    fn test_rejects_unaddressable_grid() {
        let err = generate_sphere(1.0, u32::MAX - 1, 4).unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { .. }));
    }

    #[test]
    fn test_rejects_grid_with_too_many_indices() {
        // 900 060 001 vertices fit u32, 5 399 820 000 indices do not.
        let err = generate_sphere(1.0, 30_000, 30_000).unwrap_err();
        assert!(err.to_string().contains("indices"));
    }

    #[test]
    fn test_error_message_names_parameter() {
        let err = generate_sphere(1.0, 1, 8).unwrap_err();
        assert!(err.to_string().contains("sectors"));
    }
}
