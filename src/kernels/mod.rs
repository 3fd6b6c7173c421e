//! Batch kernels with runtime CPU dispatch
//!
//! Each kernel comes in three variants selected by [`SimdLevel`]:
//!
//! | Level   | Culling                        | Nametag       |
//! |---------|--------------------------------|---------------|
//! | Generic | scalar                         | scalar        |
//! | Sse41   | scalar, compiled for SSE4.1    | scalar, SSE4.1|
//! | Avx2    | 8 lanes per iteration + tail   | scalar, AVX2  |
//!
//! All variants produce bit-identical output for the same input.
//!
//! [`Dispatcher`] probes the CPU once and stores resolved function
//! pointers, so a batch call is one indirect call with no per-entity
//! branching on the level.

pub(crate) mod culling;
pub(crate) mod nametag;
#[cfg(target_arch = "x86_64")]
pub(crate) mod x86;

use crate::batch::{CullingJob, NametagJob};
use crate::error::{check_range, KernelError, KernelResult};
use crate::types::{DistanceCullingResult, NametagResult};
use std::ops::Range;

/// Entities processed per wide iteration
pub const LANES: usize = 8;

/// Instruction set level a kernel was compiled for
///
/// The discriminants are the values reported across the C ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum SimdLevel {
    /// Portable scalar code
    Generic = 0,
    /// x86_64 SSE4.1
    Sse41 = 1,
    /// x86_64 AVX2
    Avx2 = 2,
}

impl SimdLevel {
    /// All levels, lowest first
    pub const ALL: [SimdLevel; 3] = [SimdLevel::Generic, SimdLevel::Sse41, SimdLevel::Avx2];

    /// Integer code (0 = generic, 1 = SSE4.1, 2 = AVX2)
    #[inline]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Parse an integer code
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(SimdLevel::Generic),
            1 => Some(SimdLevel::Sse41),
            2 => Some(SimdLevel::Avx2),
            _ => None,
        }
    }

    /// Check if the running CPU can execute this level
    pub fn is_supported(self) -> bool {
        match self {
            SimdLevel::Generic => true,
            SimdLevel::Sse41 => has_sse41(),
            SimdLevel::Avx2 => has_avx2(),
        }
    }
}

/// Check for AVX2 support
#[inline]
pub fn has_avx2() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        is_x86_feature_detected!("avx2")
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}

/// Check for SSE4.1 support
#[inline]
pub fn has_sse41() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        is_x86_feature_detected!("sse4.1")
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}

/// Highest level the running CPU supports
pub fn detect_level() -> SimdLevel {
    if has_avx2() {
        SimdLevel::Avx2
    } else if has_sse41() {
        SimdLevel::Sse41
    } else {
        SimdLevel::Generic
    }
}

/// Culling kernel signature: `(job, first_index, out)`
///
/// # Safety
/// The variant's instruction set must be available and
/// `first_index + out.len() <= job.len()`.
pub(crate) type CullingFn = unsafe fn(&CullingJob<'_>, usize, &mut [DistanceCullingResult]);

/// Nametag kernel signature: `(job, first_index, out)`
///
/// # Safety
/// Same contract as [`CullingFn`].
pub(crate) type NametagFn = unsafe fn(&NametagJob<'_>, usize, &mut [NametagResult]);

/// Resolved kernel table for one [`SimdLevel`]
#[derive(Clone, Copy)]
pub struct Dispatcher {
    level: SimdLevel,
    culling_fn: CullingFn,
    nametag_fn: NametagFn,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("level", &self.level)
            .finish()
    }
}

impl Dispatcher {
    /// Probe the CPU and bind the best kernels
    pub fn new() -> Self {
        let level = detect_level();
        log::info!("everest-native: selected {:?} kernels", level);
        Self::bind(level)
    }

    /// Portable kernels, valid on any CPU
    pub fn generic() -> Self {
        Self::bind(SimdLevel::Generic)
    }

    /// Force a specific level
    ///
    /// # Errors
    /// [`KernelError::UnsupportedLevel`] if the CPU lacks the instruction set
    pub fn with_level(level: SimdLevel) -> KernelResult<Self> {
        if !level.is_supported() {
            return Err(KernelError::UnsupportedLevel(level));
        }
        log::debug!("everest-native: forcing {:?} kernels", level);
        Ok(Self::bind(level))
    }

    fn bind(level: SimdLevel) -> Self {
        Dispatcher {
            level,
            culling_fn: resolve_culling_fn(level),
            nametag_fn: resolve_nametag_fn(level),
        }
    }

    /// Bound level
    #[inline]
    pub fn level(&self) -> SimdLevel {
        self.level
    }

    /// Run distance culling over `range`, writing `results[range]`
    ///
    /// `results` must be the full-length output buffer for the batch;
    /// entries outside `range` are not touched.
    ///
    /// # Errors
    /// - [`KernelError::LengthMismatch`] if `results.len() != job.len()`
    /// - [`KernelError::RangeOutOfBounds`] if `range` does not fit the batch
    pub fn execute_culling(
        &self,
        job: &CullingJob<'_>,
        results: &mut [DistanceCullingResult],
        range: Range<usize>,
    ) -> KernelResult<()> {
        if results.len() != job.len() {
            return Err(KernelError::LengthMismatch {
                what: "results",
                expected: job.len(),
                actual: results.len(),
            });
        }
        check_range(range.start, range.end, job.len())?;
        let first = range.start;
        self.execute_culling_range(job, first, &mut results[range])
    }

    /// Run distance culling for entities `first..first + out.len()`
    ///
    /// `out[k]` receives entity `first + k`. Used when the caller has
    /// already split the output buffer (e.g. per worker thread).
    ///
    /// # Errors
    /// [`KernelError::RangeOutOfBounds`] if the range does not fit the batch
    pub fn execute_culling_range(
        &self,
        job: &CullingJob<'_>,
        first: usize,
        out: &mut [DistanceCullingResult],
    ) -> KernelResult<()> {
        check_range(first, first.saturating_add(out.len()), job.len())?;
        // SAFETY: the level was checked when binding and the range was
        // checked above
        unsafe { (self.culling_fn)(job, first, out) };
        Ok(())
    }

    /// Run nametag projection over `range`, writing `results[range]`
    ///
    /// # Errors
    /// - [`KernelError::LengthMismatch`] if `results.len() != job.len()`
    /// - [`KernelError::RangeOutOfBounds`] if `range` does not fit the batch
    pub fn execute_nametags(
        &self,
        job: &NametagJob<'_>,
        results: &mut [NametagResult],
        range: Range<usize>,
    ) -> KernelResult<()> {
        if results.len() != job.len() {
            return Err(KernelError::LengthMismatch {
                what: "results",
                expected: job.len(),
                actual: results.len(),
            });
        }
        check_range(range.start, range.end, job.len())?;
        let first = range.start;
        self.execute_nametags_range(job, first, &mut results[range])
    }

    /// Run nametag projection for entities `first..first + out.len()`
    ///
    /// # Errors
    /// [`KernelError::RangeOutOfBounds`] if the range does not fit the batch
    pub fn execute_nametags_range(
        &self,
        job: &NametagJob<'_>,
        first: usize,
        out: &mut [NametagResult],
    ) -> KernelResult<()> {
        check_range(first, first.saturating_add(out.len()), job.len())?;
        // SAFETY: the level was checked when binding and the range was
        // checked above
        unsafe { (self.nametag_fn)(job, first, out) };
        Ok(())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_culling_fn(level: SimdLevel) -> CullingFn {
    match level {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => x86::cull_avx2 as CullingFn,
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Sse41 => x86::cull_sse41 as CullingFn,
        _ => culling::cull_generic as CullingFn,
    }
}

fn resolve_nametag_fn(level: SimdLevel) -> NametagFn {
    match level {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => x86::project_avx2 as NametagFn,
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Sse41 => x86::project_sse41 as NametagFn,
        _ => nametag::project_generic as NametagFn,
    }
}
