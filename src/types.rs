//! Boundary data types shared with the host
//!
//! Every type here is `#[repr(C)]` and `Pod`, so the host can hand over its
//! own buffers and the kernels read and write them in place.
//!
//! Field order matches the host structs exactly; do not reorder.

use bytemuck::{Pod, Zeroable};
use std::cmp::Ordering;

/// Distance written for entities beyond the draw distance.
///
/// Sorting by distance sends culled entities to the back without a
/// separate flag.
pub const CULLED_DISTANCE: f32 = f32::MAX;

/// 3D position (C-compatible layout)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Float3 {
    /// X coordinate
    pub x: f32,
    /// Y coordinate (up)
    pub y: f32,
    /// Z coordinate
    pub z: f32,
}

impl Float3 {
    /// Create a new position
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<glam::Vec3> for Float3 {
    fn from(v: glam::Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Float3> for glam::Vec3 {
    fn from(v: Float3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

/// Column-major 4x4 view-projection matrix
///
/// Element `m[col * 4 + row]`, the same layout as `glam::Mat4::to_cols_array`
/// and the host engine's matrix type.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Matrix4x4 {
    /// Elements, column-major
    pub m: [f32; 16],
}

impl Matrix4x4 {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Transform the point `(x, y, z, 1)` and return clip-space `(x, y, w)`.
    ///
    /// Clip-space `z` is never needed by the nametag pipeline and is skipped.
    /// Terms are summed left to right.
    #[inline(always)]
    pub fn transform_clip(&self, x: f32, y: f32, z: f32) -> (f32, f32, f32) {
        let m = &self.m;
        let clip_x = (x * m[0]) + (y * m[4]) + (z * m[8]) + m[12];
        let clip_y = (x * m[1]) + (y * m[5]) + (z * m[9]) + m[13];
        let clip_w = (x * m[3]) + (y * m[7]) + (z * m[11]) + m[15];
        (clip_x, clip_y, clip_w)
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<glam::Mat4> for Matrix4x4 {
    fn from(m: glam::Mat4) -> Self {
        Self {
            m: m.to_cols_array(),
        }
    }
}

impl From<Matrix4x4> for glam::Mat4 {
    fn from(m: Matrix4x4) -> Self {
        glam::Mat4::from_cols_array(&m.m)
    }
}

/// Per-entity output of the distance culling kernel
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DistanceCullingResult {
    /// Entity index this result belongs to
    pub index: i32,
    /// Squared distance to the camera, or [`CULLED_DISTANCE`]
    pub distance: f32,
}

impl DistanceCullingResult {
    /// Create a result
    #[inline]
    pub const fn new(index: i32, distance: f32) -> Self {
        Self { index, distance }
    }

    /// `true` when the entity was beyond the draw distance
    #[inline]
    pub fn is_culled(&self) -> bool {
        self.distance == CULLED_DISTANCE
    }

    /// Order by distance (closest first), then by index
    pub fn cmp_distance(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.index.cmp(&other.index))
    }
}

/// Per-entity output of the nametag projection kernel
///
/// When `is_visible == 0` the remaining fields are left as they were;
/// check [`NametagResult::visible`] before reading them.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct NametagResult {
    /// Horizontal pixel coordinate
    pub screen_x: f32,
    /// Vertical pixel coordinate
    pub screen_y: f32,
    /// Fade in `[0, 1]`
    pub alpha: f32,
    /// Text scale
    pub scale: f32,
    /// 1 when the nametag should be drawn, 0 otherwise
    pub is_visible: i32,
}

impl NametagResult {
    /// Whether the kernel marked this entity visible
    #[inline]
    pub fn visible(&self) -> bool {
        self.is_visible != 0
    }
}
