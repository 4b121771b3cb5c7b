mod support;

use nalgebra::Point3;
use symmesh::axis::Axis;
use symmesh::classify::classify;
use symmesh::float_types::Real;

use crate::support::{mirrored_pairs, scattered_points};

#[test]
fn every_index_lands_in_exactly_one_set() {
    let points = scattered_points(200);
    let partition = classify(&points, Axis::X, 0.05);

    let mut seen = vec![0usize; points.len()];
    for &i in partition
        .negative
        .iter()
        .chain(&partition.positive)
        .chain(&partition.center)
    {
        seen[i as usize] += 1;
    }
    assert!(seen.iter().all(|&count| count == 1));
    assert_eq!(partition.len(), points.len());
}

#[test]
fn zero_tolerance_still_centers_exact_zero() {
    let points = vec![
        Point3::new(0.0, 1.0, 2.0),
        Point3::new(-0.5, 0.0, 0.0),
        Point3::new(0.5, 0.0, 0.0),
    ];
    let partition = classify(&points, Axis::X, 0.0);
    assert_eq!(partition.center, vec![0]);
    assert_eq!(partition.negative, vec![1]);
    assert_eq!(partition.positive, vec![2]);
}

#[test]
fn boundary_coordinate_is_center() {
    // |coord| == tolerance counts as center, not side.
    let tolerance: Real = 0.25;
    let points = vec![
        Point3::new(tolerance, 0.0, 0.0),
        Point3::new(-tolerance, 0.0, 0.0),
        Point3::new(tolerance + 1e-6, 0.0, 0.0),
    ];
    let partition = classify(&points, Axis::X, tolerance);
    assert_eq!(partition.center, vec![0, 1]);
    assert_eq!(partition.positive, vec![2]);
}

#[test]
fn works_on_any_axis() {
    let points = vec![
        Point3::new(5.0, -1.0, 0.0),
        Point3::new(5.0, 1.0, 0.0),
        Point3::new(5.0, 0.0, 0.0),
    ];
    let partition = classify(&points, Axis::Y, 1e-4);
    assert_eq!(partition.negative, vec![0]);
    assert_eq!(partition.positive, vec![1]);
    assert_eq!(partition.center, vec![2]);
}

#[test]
fn oversized_tolerance_is_degenerate() {
    let points = mirrored_pairs(3);
    let partition = classify(&points, Axis::X, 100.0);
    assert!(partition.is_degenerate());
    assert_eq!(partition.center.len(), points.len());
}
