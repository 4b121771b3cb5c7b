//! Test support library
//! Provides shared point clouds & helpers for the integration tests.

#![allow(dead_code)]

use nalgebra::Point3;
use symmesh::float_types::Real;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Component-wise point comparison with tolerance.
pub fn points_approx_eq(a: &Point3<Real>, b: &Point3<Real>, eps: Real) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

/// `n` exactly mirrored pairs across the YZ plane: pair `k` (1-based) sits at
/// `x = ±k` with a distinct y so pairs cannot cross-match. Negative-side
/// vertex first, so indices alternate negative/positive.
pub fn mirrored_pairs(n: usize) -> Vec<Point3<Real>> {
    let mut points = Vec::with_capacity(2 * n);
    for k in 1..=n {
        let y = 0.1 * k as Real;
        points.push(Point3::new(-(k as Real), y, 0.0));
        points.push(Point3::new(k as Real, y, 0.0));
    }
    points
}

/// A small symmetric mesh: two mirrored pairs plus two plane vertices.
/// Index layout: 0/1 pair at x = ±1, 2/3 pair at x = ±2, 4/5 on the plane.
pub fn symmetric_mesh() -> Vec<Point3<Real>> {
    vec![
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(-2.0, 0.5, 0.25),
        Point3::new(2.0, 0.5, 0.25),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ]
}

/// Deterministic low-discrepancy scatter in [-1, 1]^3 for brute-force
/// comparisons, no RNG dependency needed.
pub fn scattered_points(n: usize) -> Vec<Point3<Real>> {
    scattered_points_seeded(n, 0x2545_f491_4f6c_dd1d)
}

/// Like [`scattered_points`], but from a chosen xorshift seed so two clouds
/// don't coincide.
pub fn scattered_points_seeded(n: usize, seed: u64) -> Vec<Point3<Real>> {
    let mut points = Vec::with_capacity(n);
    let mut state: u64 = seed;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as Real / (1u64 << 53) as Real * 2.0 - 1.0
    };
    for _ in 0..n {
        points.push(Point3::new(next(), next(), next()));
    }
    points
}

/// Linear-scan nearest neighbor, the oracle the octree must agree with.
pub fn brute_nearest(points: &[Point3<Real>], query: &Point3<Real>) -> Option<(u32, Real)> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as u32, nalgebra::distance(query, p)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).expect("finite distances"))
}
