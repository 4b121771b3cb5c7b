//! Bilateral **symmetry mapping** for meshes and blend shapes: classify vertices
//! against a mirror plane, build octree-accelerated nearest-neighbor
//! correspondences between the two sides, and use them to mirror per-vertex
//! deformation offsets or force a mesh into perfect symmetry.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to fan out nearest-neighbor queries

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod axis;
pub mod classify;
pub mod octree;
pub mod correspondence;
pub mod naming;
pub mod shape;
pub mod significance;
pub mod mirror;
pub mod session;
pub mod persist;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use axis::Axis;
pub use classify::{Partition, Side, classify};
pub use correspondence::Correspondence;
pub use errors::{MirrorError, MirrorResult};
pub use mirror::{
    ForceMirrorOptions, ForceMirrorReport, MirrorAllReport, MirrorOptions, MirrorReport,
    force_mirror, mirror_all_missing, mirror_target,
};
pub use naming::NameSide;
pub use octree::Octree;
pub use shape::{MorphTarget, TargetBank, VertexGroup};
