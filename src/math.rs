//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec3` inputs, making them straightforward to unit-test.

use bevy::prelude::Vec3;

/// Computes the face normal of a triangle defined by three vertices.
///
/// Uses the cross product of edges `(v1 - v0)` and `(v2 - v0)`.
/// Returns `Vec3::ZERO` if the triangle is degenerate (collinear points).
pub fn compute_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    edge1.cross(edge2).normalize_or_zero()
}

/// Staircase path between two points that are `steps` elevation levels apart.
///
/// Returns `2 * steps + 2` points. Each step first rises by `1 / (steps + 1)` of
/// the height difference (with a small lateral lean), then runs laterally by
/// `1 / (steps + 1)` of the horizontal distance. The last point is always `end`.
///
/// With `steps == 0` the path is just `[start, end]`.
///
/// # Examples
/// ```
/// # use bevy::prelude::Vec3;
/// # use hex_landscape::math::bevel_path;
/// let path = bevel_path(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0), 2);
/// assert_eq!(path.len(), 6);
/// assert_eq!(path[0], Vec3::ZERO);
/// assert_eq!(path[5], Vec3::new(1.0, 0.0, 1.0));
/// ```
pub fn bevel_path(start: Vec3, end: Vec3, steps: u32) -> Vec<Vec3> {
    if steps == 0 {
        return vec![start, end];
    }

    let path = end - start;
    let segments = (steps + 1) as f32;
    let lateral = Vec3::new(path.x, path.y, 0.0) / segments;
    let rise = Vec3::new(path.x / segments, path.y / segments, path.z) / segments;

    let mut points = Vec::with_capacity(2 * steps as usize + 2);
    let mut cursor = start;
    points.push(cursor);
    for _ in 0..steps {
        cursor += rise;
        points.push(cursor);
        cursor += lateral;
        points.push(cursor);
    }
    points.push(end);
    points
}

/// Maps a Z-up terrain coordinate into Bevy's Y-up world.
///
/// `(x, y, z) -> (x, z, -y)` is a rotation about X, so triangle winding and
/// handedness survive the conversion.
pub fn to_render_space(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, -v.y)
}

/// Inverse of [`to_render_space`].
pub fn from_render_space(v: Vec3) -> Vec3 {
    Vec3::new(v.x, -v.z, v.y)
}

/// Intersects a render-space ray with the ground plane `y = 0`.
///
/// Returns `None` when the ray is parallel to the plane or points away from it.
pub fn intersect_ground(origin: Vec3, direction: Vec3) -> Option<Vec3> {
    if direction.y.abs() < f32::EPSILON {
        return None;
    }
    let t = -origin.y / direction.y;
    (t >= 0.0).then(|| origin + direction * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── compute_normal ──────────────────────────────────────────────

    #[test]
    fn normal_of_xy_plane_triangle() {
        let n = compute_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
        // Cross of X × Y = Z
        assert!((n - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn normal_of_xz_plane_triangle() {
        let n = compute_normal(Vec3::ZERO, Vec3::X, Vec3::Z);
        assert!((n - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn degenerate_triangle_returns_zero() {
        let n = compute_normal(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert_eq!(n, Vec3::ZERO);
    }

    // ── bevel_path ──────────────────────────────────────────────────

    #[test]
    fn flat_bevel_is_the_bare_segment() {
        let end = Vec3::new(1.0, 2.0, 0.0);
        assert_eq!(bevel_path(Vec3::ZERO, end, 0), vec![Vec3::ZERO, end]);
    }

    #[test]
    fn bevel_length_tracks_steps() {
        for steps in 1..6 {
            let path = bevel_path(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.5), steps);
            assert_eq!(path.len(), 2 * steps as usize + 2);
        }
    }

    #[test]
    fn bevel_alternates_rise_and_run() {
        let end = Vec3::new(3.0, 0.0, 3.0);
        let path = bevel_path(Vec3::ZERO, end, 2);
        // seg = 3: rise = (1/3, 0, 1), run = (1, 0, 0)
        assert!((path[1] - Vec3::new(1.0 / 3.0, 0.0, 1.0)).length() < 1e-5);
        assert!((path[2] - Vec3::new(4.0 / 3.0, 0.0, 1.0)).length() < 1e-5);
        assert!((path[3] - Vec3::new(5.0 / 3.0, 0.0, 2.0)).length() < 1e-5);
        assert!((path[4] - Vec3::new(8.0 / 3.0, 0.0, 2.0)).length() < 1e-5);
        assert_eq!(path[5], end);
    }

    #[test]
    fn bevel_height_never_decreases_when_climbing() {
        let path = bevel_path(Vec3::ZERO, Vec3::new(0.5, -0.3, 0.7), 4);
        for w in path.windows(2) {
            assert!(w[1].z >= w[0].z - 1e-6, "bevel must climb monotonically");
        }
    }

    // ── render space ────────────────────────────────────────────────

    #[test]
    fn up_maps_to_bevy_up() {
        assert_eq!(to_render_space(Vec3::Z), Vec3::Y);
        assert_eq!(to_render_space(Vec3::Y), Vec3::NEG_Z);
    }

    #[test]
    fn render_space_roundtrip() {
        let v = Vec3::new(1.5, -2.0, 0.25);
        assert_eq!(from_render_space(to_render_space(v)), v);
    }

    #[test]
    fn conversion_preserves_winding() {
        let (a, b, c) = (Vec3::ZERO, Vec3::X, Vec3::Y);
        let n = compute_normal(to_render_space(a), to_render_space(b), to_render_space(c));
        assert!((n - to_render_space(Vec3::Z)).length() < 1e-6);
    }

    // ── intersect_ground ────────────────────────────────────────────

    #[test]
    fn downward_ray_hits_ground() {
        let hit = intersect_ground(Vec3::new(1.0, 4.0, 2.0), Vec3::new(0.0, -1.0, 1.0)).unwrap();
        assert!((hit - Vec3::new(1.0, 0.0, 6.0)).length() < 1e-6);
    }

    #[test]
    fn parallel_ray_misses_ground() {
        assert!(intersect_ground(Vec3::new(0.0, 3.0, 0.0), Vec3::X).is_none());
    }

    #[test]
    fn upward_ray_misses_ground() {
        assert!(intersect_ground(Vec3::new(0.0, 3.0, 0.0), Vec3::Y).is_none());
    }
}
