//! # everest-native
//!
//! Per-frame batch kernels for large crowds of world entities ("skeletons"):
//!
//! - **Distance culling**: squared distance to the camera per entity, with
//!   anything past the draw distance replaced by the `f32::MAX` sentinel
//! - **Nametag projection**: screen position, fade alpha and text scale for
//!   entities inside a distance band and view cone
//!
//! Each kernel has generic, SSE4.1 and AVX2 variants that produce
//! bit-identical results. A [`Dispatcher`] probes the CPU once and binds the
//! best variant; the `ffi` feature exports the same kernels to a host
//! engine over a C ABI.
//!
//! ## Example
//!
//! ```rust
//! use everest_native::prelude::*;
//!
//! let positions = SkeletonPositions::from_vec3_slice(&[
//!     Vec3::new(3.0, 4.0, 0.0),
//!     Vec3::new(300.0, 0.0, 0.0),
//! ]);
//! let settings = CullingSettings::default();
//! let job = positions
//!     .culling_job(Vec3::ZERO, settings.squared_draw_distance())
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::new();
//! let mut results = vec![DistanceCullingResult::default(); job.len()];
//! dispatcher.execute_culling(&job, &mut results, 0..job.len()).unwrap();
//!
//! assert_eq!(results[0].distance, 25.0);
//! assert!(results[1].is_culled());
//! assert_eq!(nearest_visible(&results, settings.max_visible), vec![0]);
//! ```

#![warn(missing_docs)]

pub mod batch;
pub mod error;
pub mod kernels;
pub mod parallel;
pub mod scale_curve;
pub mod select;
pub mod settings;
pub mod soa;
pub mod types;

#[cfg(feature = "ffi")]
pub mod ffi;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::batch::{CullingJob, NametagJob, NametagParams};
    pub use crate::error::{KernelError, KernelResult};
    pub use crate::kernels::{detect_level, has_avx2, has_sse41, Dispatcher, SimdLevel};
    pub use crate::parallel::{
        cull_batch_parallel, cull_parallel, project_nametags_parallel, DEFAULT_BATCH_SIZE,
    };
    pub use crate::scale_curve::ScaleCurve;
    pub use crate::select::nearest_visible;
    pub use crate::settings::{CameraFrame, CullingSettings, NametagSettings};
    pub use crate::soa::SkeletonPositions;
    pub use crate::types::{
        DistanceCullingResult, Float3, Matrix4x4, NametagResult, CULLED_DISTANCE,
    };
    pub use glam::{Mat4, Vec3};
}

// Re-exports for convenience
pub use error::{KernelError, KernelResult};
pub use kernels::{Dispatcher, SimdLevel};
pub use types::{DistanceCullingResult, NametagResult};

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_cull_then_select_workflow() {
        let positions: SkeletonPositions = (0..20)
            .map(|i| Vec3::new(i as f32 * 10.0, 0.0, 0.0))
            .collect();
        let settings = CullingSettings {
            draw_distance: 95.0,
            max_visible: 3,
        };
        let job = positions
            .culling_job(Vec3::new(25.0, 0.0, 0.0), settings.squared_draw_distance())
            .unwrap();

        let results = cull_batch_parallel(&Dispatcher::new(), &job).unwrap();
        assert_eq!(results.len(), 20);
        assert_eq!(results.iter().filter(|r| !r.is_culled()).count(), 13);

        // 20 and 30 are both 5 away; the lower index wins the tie
        assert_eq!(nearest_visible(&results, settings.max_visible), vec![2, 3, 1]);
    }

    #[test]
    fn test_settings_to_projection_workflow() {
        let frame = CameraFrame::look_at(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, -10.0),
            60.0,
            1280.0,
            720.0,
        );
        let settings = NametagSettings {
            text_vertical_offset: 0.0,
            ..Default::default()
        };
        settings.validate().unwrap();

        let positions = [
            Float3::new(0.0, 1.0, -10.0),
            Float3::new(0.0, 1.0, 10.0),
            Float3::new(0.0, 1.0, -80.0),
        ];
        let job = NametagJob::new(settings.params(&frame), &positions).unwrap();
        let mut results = vec![NametagResult::default(); positions.len()];
        Dispatcher::new()
            .execute_nametags(&job, &mut results, 0..positions.len())
            .unwrap();

        assert!(results[0].visible());
        assert!((results[0].screen_x - 640.0).abs() < 1e-2);
        assert!((results[0].screen_y - 360.0).abs() < 1e-2);
        assert!(!results[1].visible(), "behind the camera");
        assert!(!results[2].visible(), "past max distance");
    }
}
