//! Error types for the safe batch API
//!
//! The kernels themselves are total functions; these errors only come from
//! validating views, ranges and settings before a kernel runs.

use crate::kernels::SimdLevel;
use thiserror::Error;

/// Batch validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Range does not fit inside the batch
    #[error("range {begin}..{end} out of bounds for batch of {len}")]
    RangeOutOfBounds {
        /// Range start
        begin: usize,
        /// Range end (exclusive)
        end: usize,
        /// Batch length
        len: usize,
    },

    /// Parallel arrays or the output buffer disagree on length
    #[error("length mismatch: expected {expected}, got {actual} ({what})")]
    LengthMismatch {
        /// Which array mismatched
        what: &'static str,
        /// Batch length
        expected: usize,
        /// Offending array length
        actual: usize,
    },

    /// Entity indices are written as `i32`
    #[error("batch of {0} entities exceeds i32 index range")]
    TooManyEntities(usize),

    /// Requested instruction set is not available on this CPU
    #[error("{0:?} kernels are not supported on this CPU")]
    UnsupportedLevel(SimdLevel),

    /// Parallel batch size of zero
    #[error("batch size must be non-zero")]
    InvalidBatchSize,

    /// Settings that would make the scoring divide by zero or invert
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result alias for batch operations
pub type KernelResult<T> = Result<T, KernelError>;

/// Check that `begin..end` lies inside a batch of `len` entries
#[inline]
pub(crate) fn check_range(begin: usize, end: usize, len: usize) -> KernelResult<()> {
    if begin > end || end > len {
        return Err(KernelError::RangeOutOfBounds { begin, end, len });
    }
    Ok(())
}
