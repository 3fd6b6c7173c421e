//! C ABI entry points
//!
//! The host calls `InitializeNativePlugin` once, then `ExecuteCullingJob`
//! and `ExecuteNametagJob` per frame, possibly from several worker threads
//! at once on disjoint `[begin, end)` ranges of the same job.
//!
//! # Thread Safety
//!
//! - The selected kernels live in a process-wide `OnceLock`; batch calls
//!   before initialization run the generic kernels
//! - Each call builds its mutable output slice over `[begin, end)` only, so
//!   concurrent calls on disjoint ranges never alias
//!
//! # Malformed Calls
//!
//! There is no error channel back to the host. A negative `begin`,
//! `end < begin`, a null job pointer or a null array pointer makes the call
//! return without writing anything; the rejection is logged at `warn`.

use super::types::{CullingJobData, NametagJobData};
use crate::batch::{CullingJob, NametagJob};
use crate::kernels::{Dispatcher, SimdLevel};
use std::ffi::c_void;
use std::slice;
use std::sync::OnceLock;

static ACTIVE: OnceLock<Dispatcher> = OnceLock::new();

/// Dispatcher for batch calls, generic until initialized
#[inline]
fn active() -> Dispatcher {
    ACTIVE.get().copied().unwrap_or_else(Dispatcher::generic)
}

/// Validate a host range, returning it as `usize` bounds
fn host_range(entry: &str, begin: i32, end: i32) -> Option<(usize, usize)> {
    if begin < 0 || end < begin {
        log::warn!("{entry}: rejected range {begin}..{end}");
        return None;
    }
    Some((begin as usize, end as usize))
}

/// Probe the CPU and select kernels
///
/// Returns the selected level: 0 = generic, 1 = SSE4.1, 2 = AVX2.
/// Later calls return the level chosen by the first one.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn InitializeNativePlugin() -> i32 {
    let dispatcher = ACTIVE.get_or_init(|| {
        let dispatcher = Dispatcher::new();
        log::info!(
            "everest-native {} initialized with {:?} kernels",
            crate::VERSION,
            dispatcher.level()
        );
        dispatcher
    });
    dispatcher.level().as_i32()
}

/// Currently active level without probing (0 before initialization)
#[no_mangle]
pub extern "C" fn everest_native_capability_level() -> i32 {
    ACTIVE
        .get()
        .map_or(SimdLevel::Generic.as_i32(), |d| d.level().as_i32())
}

/// Cull skeletons `begin..end` of a culling job
///
/// # Safety
/// If non-null, `data` must point to a valid `CullingJobData` whose three
/// coordinate arrays are readable for at least `end` elements and whose
/// `results` array is writable for at least `end` elements. No other call
/// may write `results[begin..end]` concurrently.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn ExecuteCullingJob(data: *mut c_void, begin: i32, end: i32) {
    let (begin, end) = match host_range("ExecuteCullingJob", begin, end) {
        Some(range) => range,
        None => return,
    };
    let data = data.cast::<CullingJobData>();
    if data.is_null() {
        log::warn!("ExecuteCullingJob: null job pointer");
        return;
    }
    if begin == end {
        return;
    }

    let data = &*data;
    if data.has_null_arrays() {
        log::warn!("ExecuteCullingJob: null array pointer");
        return;
    }

    let x = slice::from_raw_parts(data.skeletons_x, end);
    let y = slice::from_raw_parts(data.skeletons_y, end);
    let z = slice::from_raw_parts(data.skeletons_z, end);
    let out = slice::from_raw_parts_mut(data.results.add(begin), end - begin);

    let job = match CullingJob::new(data.camera(), data.squared_draw_distance, x, y, z) {
        Ok(job) => job,
        Err(e) => {
            log::warn!("ExecuteCullingJob: {e}");
            return;
        }
    };
    if let Err(e) = active().execute_culling_range(&job, begin, out) {
        log::warn!("ExecuteCullingJob: {e}");
    }
}

/// Project nametags for skeletons `begin..end` of a nametag job
///
/// # Safety
/// If non-null, `data` must point to a valid `NametagJobData` whose
/// `skeletons` array is readable for at least `end` elements and whose
/// `results` array is writable for at least `end` elements. No other call
/// may write `results[begin..end]` concurrently.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn ExecuteNametagJob(data: *mut c_void, begin: i32, end: i32) {
    let (begin, end) = match host_range("ExecuteNametagJob", begin, end) {
        Some(range) => range,
        None => return,
    };
    let data = data.cast::<NametagJobData>();
    if data.is_null() {
        log::warn!("ExecuteNametagJob: null job pointer");
        return;
    }
    if begin == end {
        return;
    }

    let data = &*data;
    if data.has_null_arrays() {
        log::warn!("ExecuteNametagJob: null array pointer");
        return;
    }

    let positions = slice::from_raw_parts(data.skeletons, end);
    let out = slice::from_raw_parts_mut(data.results.add(begin), end - begin);

    let job = match NametagJob::new(data.params(), positions) {
        Ok(job) => job,
        Err(e) => {
            log::warn!("ExecuteNametagJob: {e}");
            return;
        }
    };
    if let Err(e) = active().execute_nametags_range(&job, begin, out) {
        log::warn!("ExecuteNametagJob: {e}");
    }
}
