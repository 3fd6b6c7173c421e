//! x86_64 kernel variants
//!
//! Only the AVX2 culling kernel has a wide loop. The other variants compile
//! the shared scalar body under their `target_feature` so the compiler may
//! use the wider encodings, without changing the arithmetic.

use std::arch::x86_64::*;

use super::culling::cull_range;
use super::nametag::project_range;
use super::LANES;
use crate::batch::{CullingJob, NametagJob};
use crate::types::{DistanceCullingResult, NametagResult, CULLED_DISTANCE};

/// # Safety
/// SSE4.1 must be available and `first + out.len() <= job.len()`.
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn cull_sse41(
    job: &CullingJob<'_>,
    first: usize,
    out: &mut [DistanceCullingResult],
) {
    cull_range(job, first, out);
}

/// 8 entities per iteration, scalar tail
///
/// Each iteration produces eight `(index, distance)` pairs and stores them
/// as two 256-bit writes. The index vector is carried as `i32` lanes and
/// reinterpreted as floats only for the interleave, so the bit pattern of
/// `index` reaches memory unchanged.
///
/// # Safety
/// AVX2 must be available and `first + out.len() <= job.len()`.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn cull_avx2(
    job: &CullingJob<'_>,
    first: usize,
    out: &mut [DistanceCullingResult],
) {
    let n = out.len();
    let (x, y, z) = job.as_slices();
    let (x, y, z) = (&x[first..first + n], &y[first..first + n], &z[first..first + n]);

    let cam_x = _mm256_set1_ps(job.camera.x);
    let cam_y = _mm256_set1_ps(job.camera.y);
    let cam_z = _mm256_set1_ps(job.camera.z);
    let threshold = _mm256_set1_ps(job.squared_draw_distance);
    let culled = _mm256_set1_ps(CULLED_DISTANCE);

    let base = first as i32;
    let mut indices = _mm256_setr_epi32(
        base,
        base.wrapping_add(1),
        base.wrapping_add(2),
        base.wrapping_add(3),
        base.wrapping_add(4),
        base.wrapping_add(5),
        base.wrapping_add(6),
        base.wrapping_add(7),
    );
    let step = _mm256_set1_epi32(LANES as i32);

    // DistanceCullingResult is two 4-byte fields, so the output is a flat
    // run of 2 * n floats
    let out_ptr = out.as_mut_ptr().cast::<f32>();

    let mut k = 0;
    while k + LANES <= n {
        let px = _mm256_loadu_ps(x.as_ptr().add(k));
        let py = _mm256_loadu_ps(y.as_ptr().add(k));
        let pz = _mm256_loadu_ps(z.as_ptr().add(k));

        let dx = _mm256_sub_ps(cam_x, px);
        let dy = _mm256_sub_ps(cam_y, py);
        let dz = _mm256_sub_ps(cam_z, pz);

        let squared = _mm256_add_ps(
            _mm256_add_ps(_mm256_mul_ps(dx, dx), _mm256_mul_ps(dy, dy)),
            _mm256_mul_ps(dz, dz),
        );

        let over = _mm256_cmp_ps::<_CMP_GT_OQ>(squared, threshold);
        let distance = _mm256_blendv_ps(squared, culled, over);

        // lo = i0 d0 i1 d1 | i4 d4 i5 d5
        // hi = i2 d2 i3 d3 | i6 d6 i7 d7
        let index_bits = _mm256_castsi256_ps(indices);
        let lo = _mm256_unpacklo_ps(index_bits, distance);
        let hi = _mm256_unpackhi_ps(index_bits, distance);

        let pairs_0_3 = _mm256_permute2f128_ps::<0x20>(lo, hi);
        let pairs_4_7 = _mm256_permute2f128_ps::<0x31>(lo, hi);

        _mm256_storeu_ps(out_ptr.add(k * 2), pairs_0_3);
        _mm256_storeu_ps(out_ptr.add(k * 2 + LANES), pairs_4_7);

        indices = _mm256_add_epi32(indices, step);
        k += LANES;
    }

    if k < n {
        cull_range(job, first + k, &mut out[k..]);
    }
}

/// # Safety
/// SSE4.1 must be available and `first + out.len() <= job.len()`.
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn project_sse41(
    job: &NametagJob<'_>,
    first: usize,
    out: &mut [NametagResult],
) {
    project_range(job, first, out);
}

/// # Safety
/// AVX2 must be available and `first + out.len() <= job.len()`.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn project_avx2(
    job: &NametagJob<'_>,
    first: usize,
    out: &mut [NametagResult],
) {
    project_range(job, first, out);
}
