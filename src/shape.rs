//! Minimal scene model the engine operates on: a basis pose, named deformation
//! targets carrying per-vertex offsets, and named vertex membership groups.
//!
//! Hosts with their own document model adapt at this boundary; the engine
//! never creates or destroys points.

use crate::errors::{MirrorError, MirrorResult};
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A named deformation target: one offset vector per basis point, applied on
/// top of the reference pose scaled by an activation weight in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphTarget {
    pub name: String,
    /// Per-point deviation from the basis pose, aligned to point indices.
    pub offsets: Vec<Vector3<Real>>,
    /// Activation weight in `[0, 1]`.
    pub weight: Real,
}

impl MorphTarget {
    /// A target with all-zero offsets for `point_count` points.
    pub fn zeroed(name: impl Into<String>, point_count: usize) -> Self {
        Self {
            name: name.into(),
            offsets: vec![Vector3::zeros(); point_count],
            weight: 0.0,
        }
    }

    /// Build a target from absolute deformed positions against a basis pose.
    pub fn from_positions(
        name: impl Into<String>,
        basis: &[Point3<Real>],
        deformed: &[Point3<Real>],
    ) -> MirrorResult<Self> {
        let name = name.into();
        if deformed.len() != basis.len() {
            return Err(MirrorError::OffsetCountMismatch {
                name,
                expected: basis.len(),
                got: deformed.len(),
            });
        }
        let offsets = basis
            .iter()
            .zip(deformed)
            .map(|(b, d)| d - b)
            .collect();
        Ok(Self {
            name,
            offsets,
            weight: 0.0,
        })
    }

    /// The pose this target produces at its current weight.
    pub fn resolved(&self, basis: &[Point3<Real>]) -> Vec<Point3<Real>> {
        basis
            .iter()
            .zip(&self.offsets)
            .map(|(b, o)| b + o * self.weight)
            .collect()
    }
}

/// The basis pose plus every deformation target defined against it.
#[derive(Debug, Clone, Default)]
pub struct TargetBank {
    /// The undeformed reference positions all targets are offsets from.
    /// Read-only to the engine.
    pub basis: Vec<Point3<Real>>,
    targets: Vec<MorphTarget>,
}

impl TargetBank {
    /// An empty bank over a basis pose.
    pub const fn new(basis: Vec<Point3<Real>>) -> Self {
        Self {
            basis,
            targets: Vec::new(),
        }
    }

    /// Number of points in the base geometry.
    pub fn point_count(&self) -> usize {
        self.basis.len()
    }

    /// Number of deformation targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True when the bank holds no targets.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// All targets, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MorphTarget> {
        self.targets.iter()
    }

    /// Mutable access to all targets, in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MorphTarget> {
        self.targets.iter_mut()
    }

    /// Target names, in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.targets.iter().map(|t| t.name.clone()).collect()
    }

    /// True when a target with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.targets.iter().any(|t| t.name == name)
    }

    /// The target with this name, if present.
    pub fn get(&self, name: &str) -> Option<&MorphTarget> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Mutable lookup by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut MorphTarget> {
        self.targets.iter_mut().find(|t| t.name == name)
    }

    /// Add a target. Rejects name collisions and offset arrays not aligned to
    /// the basis point count.
    pub fn add(&mut self, target: MorphTarget) -> MirrorResult<()> {
        if self.contains(&target.name) {
            return Err(MirrorError::NameCollision(target.name));
        }
        if target.offsets.len() != self.basis.len() {
            return Err(MirrorError::OffsetCountMismatch {
                name: target.name,
                expected: self.basis.len(),
                got: target.offsets.len(),
            });
        }
        self.targets.push(target);
        Ok(())
    }

    /// Remove a target by name, returning it.
    pub fn remove(&mut self, name: &str) -> Option<MorphTarget> {
        let at = self.targets.iter().position(|t| t.name == name)?;
        Some(self.targets.remove(at))
    }
}

/// A named membership set of `(vertex index, weight)` pairs, used to hand
/// "failed to mirror" vertices back to the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexGroup {
    pub name: String,
    pub members: Vec<(u32, Real)>,
}

impl VertexGroup {
    /// A group assigning full weight to every index.
    pub fn with_full_weights(name: impl Into<String>, indices: &[u32]) -> Self {
        Self {
            name: name.into(),
            members: indices.iter().map(|&i| (i, 1.0)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_positions_captures_offsets_and_resolved_restores_them() {
        let basis = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let deformed = vec![Point3::new(0.0, 0.5, 0.0), Point3::new(1.0, 0.0, 0.25)];

        let mut target = MorphTarget::from_positions("Smile", &basis, &deformed).unwrap();
        assert_eq!(target.offsets[0], Vector3::new(0.0, 0.5, 0.0));
        assert_eq!(target.offsets[1], Vector3::new(0.0, 0.0, 0.25));

        target.weight = 1.0;
        assert_eq!(target.resolved(&basis), deformed);

        target.weight = 0.0;
        assert_eq!(target.resolved(&basis), basis);
    }

    #[test]
    fn from_positions_rejects_unaligned_poses() {
        let basis = vec![Point3::origin()];
        let deformed = vec![Point3::origin(), Point3::origin()];
        assert!(matches!(
            MorphTarget::from_positions("Smile", &basis, &deformed),
            Err(MirrorError::OffsetCountMismatch { expected: 1, got: 2, .. })
        ));
    }

    #[test]
    fn bank_enforces_unique_names_and_alignment() {
        let mut bank = TargetBank::new(vec![Point3::origin(); 2]);
        bank.add(MorphTarget::zeroed("Smile", 2)).unwrap();

        assert!(matches!(
            bank.add(MorphTarget::zeroed("Smile", 2)),
            Err(MirrorError::NameCollision(_))
        ));
        assert!(matches!(
            bank.add(MorphTarget::zeroed("Frown", 3)),
            Err(MirrorError::OffsetCountMismatch { .. })
        ));

        assert!(bank.contains("Smile"));
        assert_eq!(bank.names(), vec!["Smile".to_string()]);
        assert!(bank.remove("Smile").is_some());
        assert!(bank.is_empty());
    }
}
