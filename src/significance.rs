//! Aggregate displacement measurement for deformation targets, used to pick a
//! mirror direction for ambiguously-named targets and to drop transferred
//! targets with no visible effect.

use crate::float_types::Real;
use crate::shape::MorphTarget;
use nalgebra::Vector3;

/// Aggregate per-point displacement magnitudes between two offset sets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplacementStats {
    /// Largest single per-point displacement.
    pub max: Real,
    /// Sum of all per-point displacements.
    pub total: Real,
    /// Mean per-point displacement.
    pub mean: Real,
}

/// Measure how far `candidate` deviates from `reference`, per point.
///
/// Mismatched lengths measure as zero, mirroring the original tool's refusal
/// to compare unaligned poses.
pub fn measure(candidate: &[Vector3<Real>], reference: &[Vector3<Real>]) -> DisplacementStats {
    if candidate.is_empty() || candidate.len() != reference.len() {
        return DisplacementStats::default();
    }
    let mut max: Real = 0.0;
    let mut total: Real = 0.0;
    for (c, r) in candidate.iter().zip(reference) {
        let d = (c - r).norm();
        max = max.max(d);
        total += d;
    }
    DisplacementStats {
        max,
        total,
        mean: total / candidate.len() as Real,
    }
}

/// Measure `offsets` against the basis pose itself (a zero reference).
pub fn measure_offsets(offsets: &[Vector3<Real>]) -> DisplacementStats {
    if offsets.is_empty() {
        return DisplacementStats::default();
    }
    let mut max: Real = 0.0;
    let mut total: Real = 0.0;
    for o in offsets {
        let d = o.norm();
        max = max.max(d);
        total += d;
    }
    DisplacementStats {
        max,
        total,
        mean: total / offsets.len() as Real,
    }
}

/// Split transferred candidates into targets worth keeping and the names of
/// those whose maximum displacement falls below `threshold`.
pub fn filter_significant(
    candidates: Vec<MorphTarget>,
    threshold: Real,
) -> (Vec<MorphTarget>, Vec<String>) {
    let mut kept = Vec::with_capacity(candidates.len());
    let mut discarded = Vec::new();
    for target in candidates {
        if measure_offsets(&target.offsets).max < threshold {
            discarded.push(target.name);
        } else {
            kept.push(target);
        }
    }
    (kept, discarded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn measure_mismatched_lengths_is_zero() {
        let a = vec![Vector3::new(1.0, 0.0, 0.0)];
        let b = vec![Vector3::zeros(), Vector3::zeros()];
        assert_eq!(measure(&a, &b), DisplacementStats::default());
    }

    #[test]
    fn measure_reports_max_total_mean() {
        let a = vec![Vector3::new(3.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)];
        let b = vec![Vector3::zeros(), Vector3::zeros()];
        let stats = measure(&a, &b);
        assert_relative_eq!(stats.max, 3.0);
        assert_relative_eq!(stats.total, 4.0);
        assert_relative_eq!(stats.mean, 2.0);
    }

    #[test]
    fn filter_drops_invisible_targets() {
        let strong = MorphTarget {
            name: "Strong".into(),
            offsets: vec![Vector3::new(0.5, 0.0, 0.0)],
            weight: 0.0,
        };
        let faint = MorphTarget {
            name: "Faint".into(),
            offsets: vec![Vector3::new(1e-6, 0.0, 0.0)],
            weight: 0.0,
        };
        let (kept, discarded) = filter_significant(vec![strong, faint], 1e-3);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Strong");
        assert_eq!(discarded, vec!["Faint".to_string()]);
    }
}
