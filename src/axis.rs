//! Mirror axis selection and reflection across the symmetry plane.
//!
//! The symmetry plane always sits at coordinate 0 along the chosen axis;
//! reflecting a point or an offset negates that one component.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// The coordinate axis defining the symmetry plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Mirror across the YZ plane (the usual left/right axis).
    #[default]
    X,
    /// Mirror across the XZ plane.
    Y,
    /// Mirror across the XY plane.
    Z,
}

impl Axis {
    /// The signed coordinate of `p` along this axis.
    #[inline]
    pub fn component(&self, p: &Point3<Real>) -> Real {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
            Axis::Z => p.z,
        }
    }

    /// `p` with its coordinate along this axis negated.
    #[inline]
    pub fn reflect_point(&self, p: &Point3<Real>) -> Point3<Real> {
        let mut r = *p;
        match self {
            Axis::X => r.x = -r.x,
            Axis::Y => r.y = -r.y,
            Axis::Z => r.z = -r.z,
        }
        r
    }

    /// `v` with its component along this axis negated. Mirrors a displacement,
    /// not merely relocates it.
    #[inline]
    pub fn reflect_vector(&self, v: &Vector3<Real>) -> Vector3<Real> {
        let mut r = *v;
        match self {
            Axis::X => r.x = -r.x,
            Axis::Y => r.y = -r.y,
            Axis::Z => r.z = -r.z,
        }
        r
    }

    /// Writes `value` into `p`'s coordinate along this axis.
    #[inline]
    pub fn set_component(&self, p: &mut Point3<Real>, value: Real) {
        match self {
            Axis::X => p.x = value,
            Axis::Y => p.y = value,
            Axis::Z => p.z = value,
        }
    }
}
