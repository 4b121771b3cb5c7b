// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized match tolerance used when callers do not supply one.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `SYMMESH_TOLERANCE` (e.g. `SYMMESH_TOLERANCE=1e-2 cargo build`)
///  2) **Runtime**: call [`set_match_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_match_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-3
    }
    #[cfg(feature = "f64")]
    {
        1e-3
    }
}

/// Returns the current default match tolerance.
/// If not set yet, it tries `SYMMESH_TOLERANCE` (parsed as the active `Real`)
/// and falls back to a sensible default.
pub fn match_tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("SYMMESH_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_match_tolerance()
    })
}

/// Set the default match tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `symmesh::float_types::set_match_tolerance(1e-3);`
pub fn set_match_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Maximum |coordinate| along the mirror axis for a vertex to count as lying
/// on the symmetry plane.
pub const CENTER_TOLERANCE: Real = 1e-4;

/// Per-vertex offsets shorter than this are treated as "no deformation" when
/// mirroring a blend shape.
pub const MIN_DISPLACEMENT: Real = 1e-4;
