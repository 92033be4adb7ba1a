//! Signed-distance primitives and the polynomial smooth-minimum used to merge
//! them. Distances are negative inside a shape, zero on its boundary.

use glam::Vec2;

/// Distance from `point` (relative to the circle center) to a circle boundary.
pub fn sd_circle(point: Vec2, radius: f32) -> f32 {
    point.length() - radius
}

/// Distance from `point` (relative to the rectangle center) to a rounded
/// rectangle with the given half extents and corner radius.
pub fn sd_rounded_rect(point: Vec2, half_extents: Vec2, corner_radius: f32) -> f32 {
    let q = point.abs() - half_extents + Vec2::splat(corner_radius);
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - corner_radius
}

/// Polynomial smooth minimum with blend radius `k`.
///
/// Returns a value no greater than `min(a, b)`; as `k` approaches zero the
/// blend degenerates to a hard union.
pub fn smin(a: f32, b: f32, k: f32) -> f32 {
    if k <= 0.0 {
        return a.min(b);
    }
    let h = (k - (a - b).abs()).max(0.0) / k;
    a.min(b) - h * h * k * 0.25
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_distance_signs() {
        assert!(sd_circle(Vec2::ZERO, 10.0) < 0.0);
        assert!((sd_circle(Vec2::new(10.0, 0.0), 10.0)).abs() < 1e-6);
        assert!(sd_circle(Vec2::new(20.0, 0.0), 10.0) > 0.0);
    }

    #[test]
    fn rounded_rect_boundary_and_interior() {
        let half = Vec2::new(50.0, 20.0);
        assert!(sd_rounded_rect(Vec2::ZERO, half, 8.0) < 0.0);
        // Edge midpoints sit exactly on the boundary regardless of rounding.
        assert!(sd_rounded_rect(Vec2::new(50.0, 0.0), half, 8.0).abs() < 1e-5);
        assert!(sd_rounded_rect(Vec2::new(0.0, 20.0), half, 8.0).abs() < 1e-5);
        assert!(sd_rounded_rect(Vec2::new(80.0, 0.0), half, 8.0) > 0.0);
    }

    #[test]
    fn smin_never_exceeds_hard_minimum() {
        let samples = [(-12.0, 4.0), (3.0, 3.0), (0.5, -0.5), (40.0, 39.0)];
        for (a, b) in samples {
            assert!(smin(a, b, 10.0) <= a.min(b) + 1e-6);
        }
    }

    #[test]
    fn smin_converges_to_min_as_k_shrinks() {
        let (a, b) = (4.0_f32, 7.5_f32);
        let mut k = 8.0;
        let mut last_gap = (a.min(b) - smin(a, b, k)).abs();
        while k > 1e-3 {
            k *= 0.5;
            let gap = (a.min(b) - smin(a, b, k)).abs();
            assert!(gap <= last_gap + 1e-6);
            last_gap = gap;
        }
        assert!(last_gap < 1e-3);
        assert_eq!(smin(a, b, 0.0), a.min(b));
    }

    #[test]
    fn smin_blends_only_near_the_crossover() {
        // Far apart fields are untouched by the blend radius.
        assert_eq!(smin(-30.0, 30.0, 10.0), -30.0);
    }
}
