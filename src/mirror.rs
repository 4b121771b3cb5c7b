//! Mirror execution: reflect a deformation target onto its opposite-side
//! sibling, batch-mirror every target missing one, or force a mesh's own
//! geometry into bilateral symmetry.
//!
//! Every entry point runs to completion synchronously and validates before it
//! mutates; octrees and correspondences are built per invocation and
//! discarded with it.

use crate::axis::Axis;
use crate::classify::{Partition, Side, classify};
use crate::correspondence::Correspondence;
use crate::errors::{MirrorError, MirrorResult};
use crate::float_types::{self, CENTER_TOLERANCE, MIN_DISPLACEMENT, Real};
use crate::naming::{detect_side, mirror_name, unique_name};
use crate::octree::Octree;
use crate::shape::{MorphTarget, TargetBank, VertexGroup};
use crate::significance::measure_offsets;
use nalgebra::{Point3, Vector3};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Name of the membership group recording vertices that found no counterpart.
pub const FAILED_GROUP_NAME: &str = "Mirror_Failed_Vertices";

/// Options shared by the deformation-target mirroring entry points.
#[derive(Debug, Clone, Copy)]
pub struct MirrorOptions {
    pub axis: Axis,
    /// Maximum reflected-position distance for a match (inclusive).
    pub match_tolerance: Real,
    /// Maximum |coordinate| along the axis for a vertex to count as center.
    pub center_tolerance: Real,
    /// When a name has no decidable side, evaluate both directions and keep
    /// the one with the larger aggregate effect. Disabling this makes such
    /// names a [`MirrorError::AmbiguousName`] error instead.
    pub allow_direction_fallback: bool,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            axis: Axis::X,
            match_tolerance: float_types::match_tolerance(),
            center_tolerance: CENTER_TOLERANCE,
            allow_direction_fallback: true,
        }
    }
}

/// Outcome of mirroring one deformation target.
#[derive(Debug, Clone)]
pub struct MirrorReport {
    /// Name of the target that was created.
    pub created: String,
    /// Side the offsets were read from.
    pub from_side: Side,
    /// Source vertices considered.
    pub processed: usize,
    /// Source vertices matched to a counterpart.
    pub matched: usize,
    /// Source vertices with no counterpart within tolerance.
    pub unmatched: usize,
    /// Matched vertices whose offset was too small to carry over.
    pub skipped_small: usize,
}

/// Outcome of [`mirror_all_missing`].
#[derive(Debug, Default)]
pub struct MirrorAllReport {
    /// `(source name, created name)` per mirrored target.
    pub created: Vec<(String, String)>,
    /// Targets whose opposite-side sibling already existed.
    pub skipped: Vec<String>,
    /// Targets that could not be mirrored, with the reason.
    pub failed: Vec<(String, MirrorError)>,
}

/// Options for [`force_mirror`].
#[derive(Debug, Clone, Copy)]
pub struct ForceMirrorOptions {
    pub axis: Axis,
    /// Maximum reflected-position distance for a match (inclusive).
    pub match_tolerance: Real,
    /// Maximum |coordinate| along the axis for a vertex to count as center.
    pub center_tolerance: Real,
    /// Side whose positions are read; the other side is overwritten.
    pub from_side: Side,
    /// Keep going when some vertices find no counterpart. When false, any
    /// unmatched vertex aborts before a single position is written.
    pub fault_tolerant: bool,
    /// Record unmatched vertices into a [`VertexGroup`] named
    /// [`FAILED_GROUP_NAME`] on the report.
    pub create_failed_group: bool,
    /// Snap center vertices' axis coordinate to exactly 0.
    pub snap_center_to_axis: bool,
}

impl Default for ForceMirrorOptions {
    fn default() -> Self {
        Self {
            axis: Axis::X,
            match_tolerance: float_types::match_tolerance(),
            center_tolerance: CENTER_TOLERANCE,
            from_side: Side::Left,
            fault_tolerant: true,
            create_failed_group: true,
            snap_center_to_axis: true,
        }
    }
}

/// Outcome of [`force_mirror`].
#[derive(Debug, Clone)]
pub struct ForceMirrorReport {
    /// Source vertices considered.
    pub processed: usize,
    /// Source vertices matched to a counterpart.
    pub matched: usize,
    /// Source vertices with no counterpart within tolerance.
    pub unmatched: usize,
    /// Target positions actually written.
    pub modified: usize,
    /// Center vertices snapped onto the symmetry plane.
    pub centered: usize,
    /// Unmatched vertices packaged for user follow-up, when requested.
    pub failed_group: Option<VertexGroup>,
}

/// Build the side-to-side correspondence for one direction: index the
/// stationary side, query from the moving side.
fn correspondence_for(
    positions: &[Point3<Real>],
    partition: &Partition,
    from: Side,
    axis: Axis,
    match_tolerance: Real,
) -> Correspondence {
    let index = Octree::build_indexed(positions, partition.side(from.opposite()));
    Correspondence::build(partition.side(from), positions, &index, axis, match_tolerance)
}

/// Carry matched offsets across the plane, negating the axis component.
/// Unmatched targets keep a zero offset. Returns the offsets and how many
/// matches were dropped for being below the minimum displacement.
fn mirrored_offsets(
    source: &MorphTarget,
    correspondence: &Correspondence,
    axis: Axis,
    point_count: usize,
) -> (Vec<Vector3<Real>>, usize) {
    let mut offsets = vec![Vector3::zeros(); point_count];
    let mut skipped_small = 0;
    for &(src, tgt) in correspondence.pairs() {
        let offset = source.offsets[src as usize];
        if offset.norm() < MIN_DISPLACEMENT {
            skipped_small += 1;
            continue;
        }
        offsets[tgt as usize] = axis.reflect_vector(&offset);
    }
    (offsets, skipped_small)
}

/// Mirror the named deformation target onto its opposite-side sibling,
/// adding the new target to the bank.
///
/// A name with a decidable side fixes the direction and the sibling name
/// (`BrowL` → `BrowR`). Otherwise both directions are evaluated and the one
/// producing the larger total mirrored displacement wins, with an exact tie
/// preferring left-to-right; the created target is named
/// `{name}_Mirror_{L|R}`. Either way the name is disambiguated against the
/// bank before insertion.
pub fn mirror_target(
    bank: &mut TargetBank,
    name: &str,
    options: &MirrorOptions,
) -> MirrorResult<MirrorReport> {
    if bank.point_count() == 0 {
        return Err(MirrorError::EmptyInput);
    }
    let source = bank
        .get(name)
        .cloned()
        .ok_or_else(|| MirrorError::UnknownTarget(name.to_string()))?;

    let partition = classify(&bank.basis, options.axis, options.center_tolerance);
    if partition.is_degenerate() {
        warn!(
            target_name = name,
            "every vertex sits on the symmetry plane; correspondence is empty"
        );
    }

    let point_count = bank.point_count();
    let (from_side, correspondence, offsets, skipped_small, new_name) = match detect_side(name)
        .side()
    {
        Some(side) => {
            let correspondence = correspondence_for(
                &bank.basis,
                &partition,
                side,
                options.axis,
                options.match_tolerance,
            );
            let (offsets, skipped_small) =
                mirrored_offsets(&source, &correspondence, options.axis, point_count);
            let new_name = unique_name(&mirror_name(name), |n| bank.contains(n));
            (side, correspondence, offsets, skipped_small, new_name)
        },
        None => {
            if !options.allow_direction_fallback {
                return Err(MirrorError::AmbiguousName(name.to_string()));
            }
            let corr_left = correspondence_for(
                &bank.basis,
                &partition,
                Side::Left,
                options.axis,
                options.match_tolerance,
            );
            let corr_right = correspondence_for(
                &bank.basis,
                &partition,
                Side::Right,
                options.axis,
                options.match_tolerance,
            );
            let (off_left, skip_left) =
                mirrored_offsets(&source, &corr_left, options.axis, point_count);
            let (off_right, skip_right) =
                mirrored_offsets(&source, &corr_right, options.axis, point_count);
            let total_left = measure_offsets(&off_left).total;
            let total_right = measure_offsets(&off_right).total;
            // Exact tie prefers left-to-right.
            let pick_left = total_left >= total_right;
            debug!(
                target_name = name,
                total_left, total_right, pick_left, "picked mirror direction by aggregate effect"
            );
            let to_token = if pick_left { "R" } else { "L" };
            let new_name =
                unique_name(&format!("{name}_Mirror_{to_token}"), |n| bank.contains(n));
            if pick_left {
                (Side::Left, corr_left, off_left, skip_left, new_name)
            } else {
                (Side::Right, corr_right, off_right, skip_right, new_name)
            }
        },
    };

    let report = MirrorReport {
        created: new_name.clone(),
        from_side,
        processed: partition.side(from_side).len(),
        matched: correspondence.matched_len(),
        unmatched: correspondence.unmatched().len(),
        skipped_small,
    };
    bank.add(MorphTarget {
        name: new_name,
        offsets,
        weight: 0.0,
    })?;
    debug!(
        source = name,
        created = %report.created,
        matched = report.matched,
        unmatched = report.unmatched,
        "mirrored deformation target"
    );
    Ok(report)
}

/// Mirror every deformation target that lacks an opposite-side sibling.
///
/// Targets whose sibling name already exists are skipped (their mirror was
/// already made); targets without a decidable side go through the
/// dual-direction pick of [`mirror_target`]. Failures are collected, never
/// fatal to the batch.
pub fn mirror_all_missing(
    bank: &mut TargetBank,
    options: &MirrorOptions,
) -> MirrorResult<MirrorAllReport> {
    if bank.point_count() == 0 {
        return Err(MirrorError::EmptyInput);
    }
    if bank.is_empty() {
        return Err(MirrorError::NoTargets);
    }

    let mut report = MirrorAllReport::default();
    // Snapshot up front so targets created below are not re-processed.
    for name in bank.names() {
        if detect_side(&name).side().is_some() && bank.contains(&mirror_name(&name)) {
            report.skipped.push(name);
            continue;
        }
        match mirror_target(bank, &name, options) {
            Ok(one) => report.created.push((name, one.created)),
            Err(err) => report.failed.push((name, err)),
        }
    }
    debug!(
        created = report.created.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "mirror-all-missing pass finished"
    );
    Ok(report)
}

/// Force a mesh into bilateral symmetry by writing each matched vertex on the
/// stationary side to the axis-reflected position of its source.
///
/// With a `selection`, only pairs whose **source** vertex is selected have
/// their correspondents written; the selected side itself is never moved.
/// Every source position is read before any target position is written, so
/// the operation is safe when both sides share the same buffer.
pub fn force_mirror(
    points: &mut [Point3<Real>],
    selection: Option<&[u32]>,
    options: &ForceMirrorOptions,
) -> MirrorResult<ForceMirrorReport> {
    if points.is_empty() {
        return Err(MirrorError::EmptyInput);
    }

    let partition = classify(points, options.axis, options.center_tolerance);
    if partition.is_degenerate() {
        warn!("every vertex sits on the symmetry plane; nothing to mirror");
    }

    let correspondence = correspondence_for(
        points,
        &partition,
        options.from_side,
        options.axis,
        options.match_tolerance,
    );

    if !options.fault_tolerant && !correspondence.is_complete() {
        return Err(MirrorError::UnmatchedPoints {
            count: correspondence.unmatched().len(),
        });
    }

    let selected: Option<HashSet<u32>> = selection.map(|s| s.iter().copied().collect());

    // Read phase: every write target and its new position is computed before
    // the first write lands, since source and target share `points`.
    let writes: Vec<(u32, Point3<Real>)> = correspondence
        .pairs()
        .iter()
        .copied()
        .filter(|(src, _)| selected.as_ref().is_none_or(|sel| sel.contains(src)))
        .map(|(src, tgt)| (tgt, options.axis.reflect_point(&points[src as usize])))
        .collect();
    for &(tgt, position) in &writes {
        points[tgt as usize] = position;
    }

    let mut centered = 0;
    if options.snap_center_to_axis {
        for &i in &partition.center {
            options.axis.set_component(&mut points[i as usize], 0.0);
        }
        centered = partition.center.len();
    }

    let failed_group = (options.create_failed_group && !correspondence.is_complete())
        .then(|| VertexGroup::with_full_weights(FAILED_GROUP_NAME, correspondence.unmatched()));

    let report = ForceMirrorReport {
        processed: partition.side(options.from_side).len(),
        matched: correspondence.matched_len(),
        unmatched: correspondence.unmatched().len(),
        modified: writes.len(),
        centered,
        failed_group,
    };
    debug!(
        processed = report.processed,
        matched = report.matched,
        unmatched = report.unmatched,
        modified = report.modified,
        centered = report.centered,
        "force-mirrored mesh"
    );
    Ok(report)
}
