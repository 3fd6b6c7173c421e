//! C-compatible job descriptors
//!
//! Field order and widths match the host's structs exactly; the host passes
//! a pointer to one of these per batch call.

use crate::batch::NametagParams;
use crate::scale_curve::ScaleCurve;
use crate::types::{DistanceCullingResult, Float3, Matrix4x4, NametagResult};
use glam::Vec3;

/// Distance culling job (SoA positions)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CullingJobData {
    /// Camera world position
    pub camera_position: Float3,
    /// Squared draw distance
    pub squared_draw_distance: f32,
    /// X coordinates
    pub skeletons_x: *const f32,
    /// Y coordinates
    pub skeletons_y: *const f32,
    /// Z coordinates
    pub skeletons_z: *const f32,
    /// One result per skeleton
    pub results: *mut DistanceCullingResult,
}

impl CullingJobData {
    /// Camera position as a glam vector
    #[inline]
    pub fn camera(&self) -> Vec3 {
        self.camera_position.into()
    }

    /// Check if any array pointer is null
    #[inline]
    pub fn has_null_arrays(&self) -> bool {
        self.skeletons_x.is_null()
            || self.skeletons_y.is_null()
            || self.skeletons_z.is_null()
            || self.results.is_null()
    }
}

/// Nametag projection job (AoS positions)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct NametagJobData {
    /// Skeleton positions
    pub skeletons: *const Float3,
    /// One result per skeleton
    pub results: *mut NametagResult,
    /// Combined view-projection matrix
    pub view_projection: Matrix4x4,
    /// Camera world position
    pub camera_position: Float3,
    /// Camera forward direction
    pub camera_forward: Float3,
    /// Viewport width in pixels
    pub screen_width: f32,
    /// Viewport height in pixels
    pub screen_height: f32,
    /// Squared hide distance
    pub max_distance_squared: f32,
    /// Squared full-opacity distance
    pub min_distance_squared: f32,
    /// Cosine of the view cone half-angle
    pub max_view_angle_cos: f32,
    /// Height added above the skeleton before projecting
    pub text_vertical_offset: f32,
    /// Lower text scale bound
    pub min_text_scale: f32,
    /// Upper text scale bound
    pub max_text_scale: f32,
}

impl NametagJobData {
    /// Kernel parameters; the host has no curve field so the default curve
    /// is used
    pub fn params(&self) -> NametagParams {
        NametagParams {
            view_projection: self.view_projection,
            camera_position: self.camera_position.into(),
            camera_forward: self.camera_forward.into(),
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            max_distance_squared: self.max_distance_squared,
            min_distance_squared: self.min_distance_squared,
            max_view_angle_cos: self.max_view_angle_cos,
            text_vertical_offset: self.text_vertical_offset,
            min_text_scale: self.min_text_scale,
            max_text_scale: self.max_text_scale,
            scale_curve: ScaleCurve::default(),
        }
    }

    /// Check if either array pointer is null
    #[inline]
    pub fn has_null_arrays(&self) -> bool {
        self.skeletons.is_null() || self.results.is_null()
    }
}
