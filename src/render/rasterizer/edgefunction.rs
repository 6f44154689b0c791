//! Edge functions and barycentric weights.
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! `E(p0, p1, p2)` is twice the signed area of the triangle. Dividing each of
//! the three edge values at a sample by that *signed* area yields barycentric
//! weights that are all non-negative inside the triangle regardless of
//! winding, and that sum to one.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)

use crate::math::vec3::Vec3;

/// Signed area of the parallelogram spanned by (B - A) and (P - A).
#[inline]
pub fn edge_function(a: Vec3, b: Vec3, p: Vec3) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Twice the signed raster-space area of a triangle.
#[inline]
pub fn signed_area(points: &[Vec3; 3]) -> f32 {
    edge_function(points[0], points[1], points[2])
}

/// Barycentric weights `[w0, w1, w2]` of `p`, where `wi` weights vertex i.
///
/// `area` must be the non-zero [`signed_area`] of `points`.
#[inline]
pub fn barycentric(points: &[Vec3; 3], area: f32, p: Vec3) -> [f32; 3] {
    let [p0, p1, p2] = *points;
    [
        edge_function(p1, p2, p) / area,
        edge_function(p2, p0, p) / area,
        edge_function(p0, p1, p) / area,
    ]
}

/// A sample is covered when no weight is negative. Samples exactly on an
/// edge count as covered.
#[inline]
pub fn is_covered(lambda: &[f32; 3]) -> bool {
    lambda[0] >= 0.0 && lambda[1] >= 0.0 && lambda[2] >= 0.0
}

/// Perspective-correct depth: the reciprocal of the interpolated 1/z.
#[inline]
pub fn interpolate_depth(lambda: &[f32; 3], depths: &[f32; 3]) -> f32 {
    let inv_z = lambda[0] / depths[0] + lambda[1] / depths[1] + lambda[2] / depths[2];
    1.0 / inv_z
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ccw() -> [Vec3; 3] {
        [
            Vec3::new(10.0, 10.0, 1.0),
            Vec3::new(10.0, 50.0, 1.0),
            Vec3::new(50.0, 10.0, 1.0),
        ]
    }

    #[test]
    fn area_sign_follows_winding() {
        let tri = ccw();
        assert_relative_eq!(signed_area(&tri), 1600.0);
        let flipped = [tri[0], tri[2], tri[1]];
        assert_relative_eq!(signed_area(&flipped), -1600.0);
    }

    #[test]
    fn weights_are_one_at_their_vertex() {
        let tri = ccw();
        let area = signed_area(&tri);
        for (i, &v) in tri.iter().enumerate() {
            let lambda = barycentric(&tri, area, v);
            for (j, &w) in lambda.iter().enumerate() {
                assert_relative_eq!(w, if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn covered_weights_sum_to_one_for_both_windings() {
        let tri = ccw();
        for points in [tri, [tri[0], tri[2], tri[1]]] {
            let area = signed_area(&points);
            let mut covered = 0;
            for y in 0..64 {
                for x in 0..64 {
                    let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);
                    let lambda = barycentric(&points, area, p);
                    if is_covered(&lambda) {
                        covered += 1;
                        assert_relative_eq!(lambda.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
                    }
                }
            }
            assert!(covered > 0);
        }
    }

    #[test]
    fn outside_point_has_a_negative_weight() {
        let tri = ccw();
        let lambda = barycentric(&tri, signed_area(&tri), Vec3::new(60.0, 60.0, 0.0));
        assert!(!is_covered(&lambda));
    }

    #[test]
    fn depth_is_harmonic_mean_under_equal_weights() {
        let third = 1.0 / 3.0;
        let z = interpolate_depth(&[third, third, third], &[1.0, 2.0, 4.0]);
        assert_relative_eq!(z, 3.0 / (1.0 + 0.5 + 0.25), epsilon = 1e-6);
        assert_relative_eq!(interpolate_depth(&[0.2, 0.3, 0.5], &[7.0; 3]), 7.0, epsilon = 1e-5);
    }
}
