//! Operation errors

use thiserror::Error;

/// Everything that can stop a mirroring operation at its boundary.
///
/// All variants are recoverable by the caller; the engine never aborts the
/// process. Out-of-range vertex indices inside the engine are programming
/// errors and panic instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MirrorError {
    /// The point set has no vertices.
    #[error("point set is empty")]
    EmptyInput,

    /// The target bank holds no deformation targets to operate on.
    #[error("no deformation targets to operate on")]
    NoTargets,

    /// A named deformation target does not exist.
    #[error("unknown deformation target '{0}'")]
    UnknownTarget(String),

    /// A deformation target with this name already exists.
    #[error("deformation target '{0}' already exists")]
    NameCollision(String),

    /// A target's offset array is not aligned with the base point count.
    #[error("target '{name}' carries {got} offsets for {expected} points")]
    OffsetCountMismatch {
        /// Target name.
        name: String,
        /// Point count of the base geometry.
        expected: usize,
        /// Offset count actually carried by the target.
        got: usize,
    },

    /// Strict mode only: some source vertices found no counterpart within
    /// tolerance. Fault-tolerant mode records these in the report instead.
    #[error("{count} vertices found no counterpart within tolerance")]
    UnmatchedPoints {
        /// Number of unmatched source vertices.
        count: usize,
    },

    /// An identifier has no decidable side and no fallback was permitted.
    #[error("cannot decide a mirror side for '{0}'")]
    AmbiguousName(String),

    /// Reading or writing a weight file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A weight file did not parse as a flat name-to-weight JSON mapping.
    #[error("weight file is not a valid name/weight mapping: {0}")]
    Persist(#[from] serde_json::Error),
}

/// Result type for mirroring operations.
pub type MirrorResult<T> = Result<T, MirrorError>;
