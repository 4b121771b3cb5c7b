//! Partition a point set into negative-side, positive-side and center vertices
//! relative to a mirror axis.

use crate::axis::Axis;
use crate::float_types::Real;
use nalgebra::Point3;

/// A geometric side of the symmetry plane. `Left` is the negative half-space
/// along the mirror axis, `Right` the positive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The other side.
    #[inline]
    pub const fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Three disjoint index sets covering the full point set exactly once.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Indices with coordinate < -center_tolerance along the axis.
    pub negative: Vec<u32>,
    /// Indices with coordinate > center_tolerance along the axis.
    pub positive: Vec<u32>,
    /// Indices with |coordinate| <= center_tolerance along the axis.
    pub center: Vec<u32>,
}

impl Partition {
    /// Total number of classified vertices.
    pub fn len(&self) -> usize {
        self.negative.len() + self.positive.len() + self.center.len()
    }

    /// True when nothing was classified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when every vertex landed on the symmetry plane, so no left/right
    /// matching is possible (e.g. the center tolerance swallowed the mesh).
    pub fn is_degenerate(&self) -> bool {
        self.negative.is_empty() && self.positive.is_empty() && !self.center.is_empty()
    }

    /// The index set belonging to one geometric side.
    pub fn side(&self, side: Side) -> &[u32] {
        match side {
            Side::Left => &self.negative,
            Side::Right => &self.positive,
        }
    }
}

/// Classify `points` against the plane at coordinate 0 along `axis`.
///
/// Pure and O(n). A `center_tolerance` of 0 still classifies exact-zero
/// coordinates as center.
pub fn classify(points: &[Point3<Real>], axis: Axis, center_tolerance: Real) -> Partition {
    let mut partition = Partition::default();
    for (i, p) in points.iter().enumerate() {
        let coord = axis.component(p);
        let i = i as u32;
        if coord.abs() <= center_tolerance {
            partition.center.push(i);
        } else if coord < 0.0 {
            partition.negative.push(i);
        } else {
            partition.positive.push(i);
        }
    }
    partition
}
