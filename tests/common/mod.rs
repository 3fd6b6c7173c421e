//! Common test helpers for everest-native integration tests

#![allow(dead_code)]

use everest_native::prelude::*;

// ============================================================================
// Standard test crowds
// ============================================================================

/// Deterministic scattered crowd of `n` skeletons around the origin
///
/// Mixes entities inside and outside a 150-unit draw distance.
pub fn scattered_positions(n: usize) -> SkeletonPositions {
    (0..n)
        .map(|i| {
            let t = i as f32;
            Vec3::new(
                (t * 1.37).sin() * 220.0,
                (t * 0.41).cos() * 12.0,
                (t * 0.73).cos() * 220.0,
            )
        })
        .collect()
}

/// Crowd laid out along +X at `spacing` intervals starting at the origin
pub fn line_positions(n: usize, spacing: f32) -> SkeletonPositions {
    (0..n).map(|i| Vec3::new(i as f32 * spacing, 0.0, 0.0)).collect()
}

/// AoS nametag positions in front of a camera looking down -Z
pub fn crowd_ahead(n: usize) -> Vec<Float3> {
    (0..n)
        .map(|i| {
            let t = i as f32;
            Float3::new((t * 0.9).sin() * 30.0, (t * 0.3).cos() * 2.0, -1.0 - t * 0.5)
        })
        .collect()
}

/// Batch sizes around the 8-lane boundary plus larger batches
pub const AWKWARD_SIZES: [usize; 10] = [0, 1, 7, 8, 9, 15, 16, 17, 100, 1000];

// ============================================================================
// Cameras
// ============================================================================

/// 1920x1080 perspective camera at head height looking down -Z
pub fn standard_frame() -> CameraFrame {
    CameraFrame::look_at(
        Vec3::new(0.0, 1.7, 0.0),
        Vec3::new(0.0, 1.7, -10.0),
        60.0,
        1920.0,
        1080.0,
    )
}

/// Nametag params for [`standard_frame`] with default settings
pub fn standard_params() -> NametagParams {
    NametagSettings::default().params(&standard_frame())
}

// ============================================================================
// Dispatchers
// ============================================================================

/// Every dispatcher the running CPU supports
pub fn supported_dispatchers() -> Vec<Dispatcher> {
    SimdLevel::ALL
        .iter()
        .filter_map(|&level| Dispatcher::with_level(level).ok())
        .collect()
}

// ============================================================================
// Comparison helpers
// ============================================================================

/// Bitwise equality of culling outputs
pub fn assert_culling_bits_eq(
    a: &[DistanceCullingResult],
    b: &[DistanceCullingResult],
    context: &str,
) {
    assert_eq!(a.len(), b.len(), "{context}: length");
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert_eq!(x.index, y.index, "{context}: index at {i}");
        assert_eq!(
            x.distance.to_bits(),
            y.distance.to_bits(),
            "{context}: distance at {i}"
        );
    }
}

/// Bitwise equality of nametag outputs
pub fn assert_nametag_bits_eq(a: &[NametagResult], b: &[NametagResult], context: &str) {
    assert_eq!(a.len(), b.len(), "{context}: length");
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert_eq!(x.is_visible, y.is_visible, "{context}: visibility at {i}");
        assert_eq!(x.screen_x.to_bits(), y.screen_x.to_bits(), "{context}: screen_x at {i}");
        assert_eq!(x.screen_y.to_bits(), y.screen_y.to_bits(), "{context}: screen_y at {i}");
        assert_eq!(x.alpha.to_bits(), y.alpha.to_bits(), "{context}: alpha at {i}");
        assert_eq!(x.scale.to_bits(), y.scale.to_bits(), "{context}: scale at {i}");
    }
}
