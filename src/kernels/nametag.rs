//! Scalar nametag projection body
//!
//! Per entity, stopping at the first failing stage:
//!
//! 1. distance cull (squared distance from the unlifted position)
//! 2. view-cone cull (dot of the camera forward with the direction to the entity)
//! 3. clip-space `w <= 0` cull (behind the camera)
//! 4. perspective divide and viewport mapping
//! 5. alpha from distance and angle scores, scale from the curve
//!
//! A failing stage writes `is_visible = 0` and leaves the other fields alone.
//!
//! There is no wide version of this pipeline; all three dispatch slots run
//! this body.

use crate::batch::NametagJob;
use crate::scale_curve::clamp;
use crate::types::NametagResult;

/// Project `out.len()` nametags starting at entity `first`
///
/// The caller guarantees `first + out.len() <= job.len()`.
#[inline(always)]
pub(crate) fn project_range(job: &NametagJob<'_>, first: usize, out: &mut [NametagResult]) {
    let p = &job.params;
    let positions = &job.positions()[first..first + out.len()];

    let (cx, cy, cz) = (p.camera_position.x, p.camera_position.y, p.camera_position.z);
    let (fx, fy, fz) = (p.camera_forward.x, p.camera_forward.y, p.camera_forward.z);

    let distance_band = p.max_distance_squared - p.min_distance_squared;
    let angle_band = 1.0 - p.max_view_angle_cos;

    for (position, result) in positions.iter().zip(out.iter_mut()) {
        let x = position.x;
        let head_y = position.y + p.text_vertical_offset;
        let z = position.z;

        // Distance uses the unlifted y
        let dx = x - cx;
        let dy = position.y - cy;
        let dz = z - cz;
        let distance_squared = (dx * dx) + (dy * dy) + (dz * dz);

        if distance_squared > p.max_distance_squared {
            result.is_visible = 0;
            continue;
        }

        let inverse_distance = 1.0 / distance_squared.sqrt();
        let dir_x = dx * inverse_distance;
        let dir_y = dy * inverse_distance;
        let dir_z = dz * inverse_distance;
        let dot = (fx * dir_x) + (fy * dir_y) + (fz * dir_z);

        if dot < p.max_view_angle_cos {
            result.is_visible = 0;
            continue;
        }

        let (clip_x, clip_y, clip_w) = p.view_projection.transform_clip(x, head_y, z);

        if clip_w <= 0.0 {
            result.is_visible = 0;
            continue;
        }

        let inverse_w = 1.0 / clip_w;
        let ndc_x = clip_x * inverse_w;
        let ndc_y = clip_y * inverse_w;

        let screen_x = (ndc_x + 1.0) * 0.5 * p.screen_width;
        let screen_y = (ndc_y + 1.0) * 0.5 * p.screen_height;

        let distance_ratio = (distance_squared - p.min_distance_squared) / distance_band;
        let distance_score = 1.0 - clamp(distance_ratio, 0.0, 1.0);
        let angle_score = clamp((dot - p.max_view_angle_cos) / angle_band, 0.0, 1.0);

        let scale = clamp(
            p.scale_curve.evaluate(distance_ratio),
            p.min_text_scale,
            p.max_text_scale,
        );

        *result = NametagResult {
            screen_x,
            screen_y,
            alpha: distance_score * angle_score,
            scale,
            is_visible: 1,
        };
    }
}

/// Reference implementation, always available
pub(crate) fn project_generic(job: &NametagJob<'_>, first: usize, out: &mut [NametagResult]) {
    project_range(job, first, out);
}
