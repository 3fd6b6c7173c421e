//! Scalar distance culling body
//!
//! Shared by the generic and SSE4.1 variants and by the AVX2 tail. Every
//! variant must sum `dx*dx + dy*dy + dz*dz` left to right so the results
//! stay bit-identical.

use crate::batch::CullingJob;
use crate::types::{DistanceCullingResult, CULLED_DISTANCE};

/// Cull `out.len()` entities starting at `first`
///
/// `out[k]` receives entity `first + k`. The caller guarantees
/// `first + out.len() <= job.len()`.
#[inline(always)]
pub(crate) fn cull_range(job: &CullingJob<'_>, first: usize, out: &mut [DistanceCullingResult]) {
    let end = first + out.len();
    let (x, y, z) = job.as_slices();
    let (x, y, z) = (&x[first..end], &y[first..end], &z[first..end]);

    let camera = job.camera;
    let threshold = job.squared_draw_distance;

    for (k, slot) in out.iter_mut().enumerate() {
        let dx = camera.x - x[k];
        let dy = camera.y - y[k];
        let dz = camera.z - z[k];

        let squared = (dx * dx) + (dy * dy) + (dz * dz);
        let distance = if squared > threshold { CULLED_DISTANCE } else { squared };

        *slot = DistanceCullingResult::new((first + k) as i32, distance);
    }
}

/// Reference implementation, always available
pub(crate) fn cull_generic(
    job: &CullingJob<'_>,
    first: usize,
    out: &mut [DistanceCullingResult],
) {
    cull_range(job, first, out);
}
