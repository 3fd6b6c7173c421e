//! Host-facing settings in human units
//!
//! Distances are in world units and the view cone in degrees. The kernels
//! want squared distances and a cosine; [`NametagSettings::params`] does
//! that conversion once per frame.

use crate::batch::NametagParams;
use crate::error::{KernelError, KernelResult};
use crate::scale_curve::ScaleCurve;
use crate::types::Matrix4x4;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Distance culling settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingSettings {
    /// Skeletons further than this are culled
    pub draw_distance: f32,
    /// Cap on the number of skeletons kept after culling
    pub max_visible: usize,
}

impl Default for CullingSettings {
    fn default() -> Self {
        CullingSettings {
            draw_distance: 150.0,
            max_visible: 100,
        }
    }
}

impl CullingSettings {
    /// Threshold passed to the culling kernel
    #[inline]
    pub fn squared_draw_distance(&self) -> f32 {
        self.draw_distance * self.draw_distance
    }

    /// Reject a negative or non-finite draw distance
    ///
    /// # Errors
    /// [`KernelError::InvalidSettings`]
    pub fn validate(&self) -> KernelResult<()> {
        if !self.draw_distance.is_finite() || self.draw_distance < 0.0 {
            return Err(KernelError::InvalidSettings(format!(
                "draw_distance must be finite and non-negative, got {}",
                self.draw_distance
            )));
        }
        Ok(())
    }
}

/// Nametag visibility and sizing settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NametagSettings {
    /// Nametags beyond this distance are hidden
    pub max_distance: f32,
    /// Nametags closer than this are fully opaque
    pub min_distance: f32,
    /// Half-angle of the visibility cone around the camera forward
    pub max_view_angle_degrees: f32,
    /// Height added above the skeleton position
    pub text_vertical_offset: f32,
    /// Lower bound for the text scale
    pub min_text_scale: f32,
    /// Upper bound for the text scale
    pub max_text_scale: f32,
    /// Curve value at the far end of the distance band
    pub far_scale_target: f32,
}

impl Default for NametagSettings {
    fn default() -> Self {
        NametagSettings {
            max_distance: 50.0,
            min_distance: 5.0,
            max_view_angle_degrees: 60.0,
            text_vertical_offset: 0.6,
            min_text_scale: 0.8,
            max_text_scale: 2.0,
            far_scale_target: ScaleCurve::STANDARD.far_scale_target,
        }
    }
}

impl NametagSettings {
    /// Build the kernel parameters for one frame
    pub fn params(&self, frame: &CameraFrame) -> NametagParams {
        NametagParams {
            view_projection: Matrix4x4::from(frame.view_projection),
            camera_position: frame.position,
            camera_forward: frame.forward.normalize_or_zero(),
            screen_width: frame.screen_width,
            screen_height: frame.screen_height,
            max_distance_squared: self.max_distance * self.max_distance,
            min_distance_squared: self.min_distance * self.min_distance,
            max_view_angle_cos: self.max_view_angle_degrees.to_radians().cos(),
            text_vertical_offset: self.text_vertical_offset,
            min_text_scale: self.min_text_scale,
            max_text_scale: self.max_text_scale,
            scale_curve: ScaleCurve::with_far_target(self.far_scale_target),
        }
    }

    /// Reject settings that would divide by zero or invert a range in the
    /// scoring step
    ///
    /// # Errors
    /// [`KernelError::InvalidSettings`] describing the first bad field
    pub fn validate(&self) -> KernelResult<()> {
        let fields = [
            ("max_distance", self.max_distance),
            ("min_distance", self.min_distance),
            ("max_view_angle_degrees", self.max_view_angle_degrees),
            ("text_vertical_offset", self.text_vertical_offset),
            ("min_text_scale", self.min_text_scale),
            ("max_text_scale", self.max_text_scale),
            ("far_scale_target", self.far_scale_target),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(KernelError::InvalidSettings(format!(
                "{name} must be finite, got {value}"
            )));
        }

        if self.min_distance < 0.0 || self.max_distance <= self.min_distance {
            return Err(KernelError::InvalidSettings(format!(
                "distance band {}..{} is empty",
                self.min_distance, self.max_distance
            )));
        }
        if self.max_view_angle_degrees <= 0.0 || self.max_view_angle_degrees > 180.0 {
            return Err(KernelError::InvalidSettings(format!(
                "max_view_angle_degrees must be in (0, 180], got {}",
                self.max_view_angle_degrees
            )));
        }
        if self.min_text_scale > self.max_text_scale {
            return Err(KernelError::InvalidSettings(format!(
                "text scale bounds {}..{} are inverted",
                self.min_text_scale, self.max_text_scale
            )));
        }
        Ok(())
    }
}

/// Camera state for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// World position
    pub position: Vec3,
    /// Forward direction, normalized when building params
    pub forward: Vec3,
    /// Combined projection * view matrix
    pub view_projection: Mat4,
    /// Viewport width in pixels
    pub screen_width: f32,
    /// Viewport height in pixels
    pub screen_height: f32,
}

impl Default for CameraFrame {
    fn default() -> Self {
        CameraFrame {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            view_projection: Mat4::IDENTITY,
            screen_width: 1920.0,
            screen_height: 1080.0,
        }
    }
}

impl CameraFrame {
    /// Right-handed perspective camera looking from `eye` toward `target`
    pub fn look_at(
        eye: Vec3,
        target: Vec3,
        fov_y_degrees: f32,
        screen_width: f32,
        screen_height: f32,
    ) -> Self {
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let aspect = screen_width / screen_height;
        let projection = Mat4::perspective_rh(fov_y_degrees.to_radians(), aspect, 0.1, 1000.0);
        CameraFrame {
            position: eye,
            forward: (target - eye).normalize_or_zero(),
            view_projection: projection * view,
            screen_width,
            screen_height,
        }
    }
}
