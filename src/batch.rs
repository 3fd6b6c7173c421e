//! Bounds-checked batch views
//!
//! A job is a read-only view over host-owned input arrays plus the
//! per-frame parameters. Output buffers are passed separately as `&mut`
//! slices so disjoint sub-ranges can be handed to different threads.
//!
//! Views never copy or allocate; they only check lengths once at
//! construction so the kernels can index without further checks.

use crate::error::{KernelError, KernelResult};
use crate::scale_curve::ScaleCurve;
use crate::types::{Float3, Matrix4x4};
use glam::Vec3;

/// Largest batch whose indices fit the `i32` result field
pub const MAX_BATCH_LEN: usize = i32::MAX as usize;

/// Input view for the distance culling kernel (SoA layout)
#[derive(Debug, Clone, Copy)]
pub struct CullingJob<'a> {
    /// Camera world position
    pub camera: Vec3,
    /// Squared draw distance; anything further is culled
    pub squared_draw_distance: f32,
    x: &'a [f32],
    y: &'a [f32],
    z: &'a [f32],
}

impl<'a> CullingJob<'a> {
    /// Create a culling view over three parallel coordinate arrays
    ///
    /// # Errors
    /// - [`KernelError::LengthMismatch`] if the arrays differ in length
    /// - [`KernelError::TooManyEntities`] if indices would overflow `i32`
    pub fn new(
        camera: Vec3,
        squared_draw_distance: f32,
        x: &'a [f32],
        y: &'a [f32],
        z: &'a [f32],
    ) -> KernelResult<Self> {
        let len = x.len();
        if y.len() != len {
            return Err(KernelError::LengthMismatch {
                what: "skeletons_y",
                expected: len,
                actual: y.len(),
            });
        }
        if z.len() != len {
            return Err(KernelError::LengthMismatch {
                what: "skeletons_z",
                expected: len,
                actual: z.len(),
            });
        }
        if len > MAX_BATCH_LEN {
            return Err(KernelError::TooManyEntities(len));
        }
        Ok(Self {
            camera,
            squared_draw_distance,
            x,
            y,
            z,
        })
    }

    /// Number of entities in the batch
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if the batch is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Coordinate arrays
    #[inline]
    pub fn as_slices(&self) -> (&'a [f32], &'a [f32], &'a [f32]) {
        (self.x, self.y, self.z)
    }
}

/// Per-frame parameters for the nametag projection kernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NametagParams {
    /// Combined view-projection matrix (column-major)
    pub view_projection: Matrix4x4,
    /// Camera world position
    pub camera_position: Vec3,
    /// Camera forward direction (unit length)
    pub camera_forward: Vec3,
    /// Viewport width in pixels
    pub screen_width: f32,
    /// Viewport height in pixels
    pub screen_height: f32,
    /// Squared distance beyond which nametags are hidden
    pub max_distance_squared: f32,
    /// Squared distance at which nametags are fully opaque
    pub min_distance_squared: f32,
    /// Cosine of the half-angle of the visibility cone
    pub max_view_angle_cos: f32,
    /// Added to `y` before projecting, to lift the tag above the head
    pub text_vertical_offset: f32,
    /// Lower bound for the text scale
    pub min_text_scale: f32,
    /// Upper bound for the text scale
    pub max_text_scale: f32,
    /// Distance-to-scale curve
    pub scale_curve: ScaleCurve,
}

impl Default for NametagParams {
    fn default() -> Self {
        Self {
            view_projection: Matrix4x4::IDENTITY,
            camera_position: Vec3::ZERO,
            camera_forward: Vec3::Z,
            screen_width: 1920.0,
            screen_height: 1080.0,
            max_distance_squared: 50.0 * 50.0,
            min_distance_squared: 5.0 * 5.0,
            max_view_angle_cos: 0.5,
            text_vertical_offset: 0.6,
            min_text_scale: 0.8,
            max_text_scale: 2.0,
            scale_curve: ScaleCurve::STANDARD,
        }
    }
}

/// Input view for the nametag projection kernel (AoS layout)
#[derive(Debug, Clone, Copy)]
pub struct NametagJob<'a> {
    /// Frame parameters
    pub params: NametagParams,
    positions: &'a [Float3],
}

impl<'a> NametagJob<'a> {
    /// Create a nametag view over entity head positions
    ///
    /// # Errors
    /// [`KernelError::TooManyEntities`] if the batch exceeds [`MAX_BATCH_LEN`]
    pub fn new(params: NametagParams, positions: &'a [Float3]) -> KernelResult<Self> {
        if positions.len() > MAX_BATCH_LEN {
            return Err(KernelError::TooManyEntities(positions.len()));
        }
        Ok(Self { params, positions })
    }

    /// Number of entities in the batch
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the batch is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Entity positions
    #[inline]
    pub fn positions(&self) -> &'a [Float3] {
        self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_culling_job_lengths() {
        let x = [0.0f32; 4];
        let y = [0.0f32; 4];
        let z = [0.0f32; 3];

        let job = CullingJob::new(Vec3::ZERO, 1.0, &x, &y, &y).unwrap();
        assert_eq!(job.len(), 4);
        assert!(!job.is_empty());

        let err = CullingJob::new(Vec3::ZERO, 1.0, &x, &y, &z).unwrap_err();
        assert_eq!(
            err,
            KernelError::LengthMismatch {
                what: "skeletons_z",
                expected: 4,
                actual: 3
            }
        );

        let err = CullingJob::new(Vec3::ZERO, 1.0, &x, &z, &y).unwrap_err();
        assert!(matches!(err, KernelError::LengthMismatch { what: "skeletons_y", .. }));
    }

    #[test]
    fn test_empty_jobs() {
        let job = CullingJob::new(Vec3::ZERO, 1.0, &[], &[], &[]).unwrap();
        assert!(job.is_empty());

        let job = NametagJob::new(NametagParams::default(), &[]).unwrap();
        assert!(job.is_empty());
    }

    #[test]
    fn test_nametag_job_positions() {
        let positions = [Float3::new(1.0, 2.0, 3.0), Float3::new(4.0, 5.0, 6.0)];
        let job = NametagJob::new(NametagParams::default(), &positions).unwrap();
        assert_eq!(job.len(), 2);
        assert_eq!(job.positions()[1], Float3::new(4.0, 5.0, 6.0));
    }
}
