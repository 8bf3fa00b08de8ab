//! Geographic helpers for placing points on the body and finding them on
//! screen.

use glam::{Mat4, Vec2, Vec3};

/// Unit vector for a latitude/longitude in degrees, in the same frame as the
/// sphere mesh: +Y is the north pole, longitude 0 lies on +X and longitude
/// 90° on +Z.
pub fn lat_lon_to_unit(lat_deg: f32, lon_deg: f32) -> Vec3 {
    let (sin_lat, cos_lat) = lat_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = lon_deg.to_radians().sin_cos();
    Vec3::new(cos_lat * cos_lon, sin_lat, cos_lat * sin_lon)
}

/// Projects a world-space point to pixel coordinates with the origin at the
/// top-left corner and y growing downward.
///
/// Returns `None` when the clip-space `w` is zero, i.e. the point lies in the
/// camera plane and has no screen position.
pub fn project_to_screen(world: Vec3, view: Mat4, projection: Mat4, viewport: Vec2) -> Option<Vec2> {
    let clip = projection * view * world.extend(1.0);
    if clip.w == 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec2::new(
        (ndc.x + 1.0) * viewport.x * 0.5,
        (1.0 - ndc.y) * viewport.y * 0.5,
    ))
}
