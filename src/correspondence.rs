//! Nearest-neighbor correspondence between the two sides of a symmetry plane.
//!
//! Every source vertex is reflected across the mirror axis and matched to the
//! nearest indexed target vertex within a distance tolerance. The mapping is
//! partial and injective: when two sources would claim the same target, the
//! first claimant (in iteration order) wins and the later one is recorded as
//! unmatched. No claim is ever silently overwritten.
//!
//! The builder only reads geometry. Writes happen in the caller's apply phase,
//! after every source position has been read, so source and target may alias
//! the same underlying buffer.

use crate::axis::Axis;
use crate::float_types::Real;
use crate::octree::Octree;
use nalgebra::Point3;
use std::collections::{HashMap, HashSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A partial injective mapping from source vertex indices to target vertex
/// indices, plus the sources that found no counterpart.
///
/// Built fresh per operation and discarded with it; the underlying geometry
/// may be mutated by the very operation that built this.
#[derive(Debug, Clone, Default)]
pub struct Correspondence {
    /// Matched (source, target) pairs in query order.
    pairs: Vec<(u32, u32)>,
    by_source: HashMap<u32, u32>,
    /// Sources with no target within tolerance, in query order.
    unmatched: Vec<u32>,
}

impl Correspondence {
    /// Match every index in `sources` against `target_index` by reflecting its
    /// position across `axis` and accepting the nearest target within
    /// `match_tolerance` (inclusive).
    pub fn build(
        sources: &[u32],
        positions: &[Point3<Real>],
        target_index: &Octree,
        axis: Axis,
        match_tolerance: Real,
    ) -> Self {
        let hits = query_all(sources, positions, target_index, axis, match_tolerance);

        // Claim pass stays sequential so the first-claim-wins policy is
        // deterministic regardless of the parallel feature.
        let mut correspondence = Self::default();
        let mut claimed: HashSet<u32> = HashSet::new();
        for (&src, hit) in sources.iter().zip(hits) {
            match hit {
                Some((tgt, _distance)) if claimed.insert(tgt) => {
                    correspondence.pairs.push((src, tgt));
                    correspondence.by_source.insert(src, tgt);
                },
                _ => correspondence.unmatched.push(src),
            }
        }
        correspondence
    }

    /// The matched pairs in query order.
    pub fn pairs(&self) -> &[(u32, u32)] {
        &self.pairs
    }

    /// Sources that found no counterpart within tolerance.
    pub fn unmatched(&self) -> &[u32] {
        &self.unmatched
    }

    /// The target claimed by `source`, if it matched.
    pub fn target_of(&self, source: u32) -> Option<u32> {
        self.by_source.get(&source).copied()
    }

    /// Number of matched pairs.
    pub fn matched_len(&self) -> usize {
        self.pairs.len()
    }

    /// True when every source found a counterpart.
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }

    /// Target-to-source lookup, for selection-scoped operations.
    pub fn reverse(&self) -> HashMap<u32, u32> {
        self.pairs.iter().map(|&(src, tgt)| (tgt, src)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn query_all(
    sources: &[u32],
    positions: &[Point3<Real>],
    target_index: &Octree,
    axis: Axis,
    match_tolerance: Real,
) -> Vec<Option<(u32, Real)>> {
    sources
        .iter()
        .map(|&src| {
            let reflected = axis.reflect_point(&positions[src as usize]);
            target_index.nearest_within(&reflected, match_tolerance)
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn query_all(
    sources: &[u32],
    positions: &[Point3<Real>],
    target_index: &Octree,
    axis: Axis,
    match_tolerance: Real,
) -> Vec<Option<(u32, Real)>> {
    sources
        .par_iter()
        .map(|&src| {
            let reflected = axis.reflect_point(&positions[src as usize]);
            target_index.nearest_within(&reflected, match_tolerance)
        })
        .collect()
}
