//! Piecewise-linear nametag scale curve
//!
//! Maps the normalized distance ratio `t` (0 = at `min_distance`,
//! 1 = at `max_distance`) to a text scale:
//!
//! ```text
//! scale
//!   far ┤                      ╱
//!       │                 ╱
//!  knee ┤ ─────── ╱
//!  near ┤ ╱
//!       └──┬───────────────────┬── t
//!          0.2                 1.0
//! ```
//!
//! Two far-end targets are in circulation (2.0 and 2.5), so the far target
//! is a parameter rather than a constant. [`ScaleCurve::STANDARD`] is the
//! default.

use serde::{Deserialize, Serialize};

/// Linear interpolation `a + (b - a) * t`
#[inline(always)]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp `v` into `[lo, hi]` without panicking on inverted bounds
///
/// Matches the usual C++ `clamp` semantics: `lo` wins when `v < lo`, `hi`
/// wins when `v > hi`, and NaN passes through.
#[inline(always)]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    if v < lo {
        lo
    } else if hi < v {
        hi
    } else {
        v
    }
}

/// Two-segment scale curve over the distance ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleCurve {
    /// Scale at `t = 0`
    pub near_scale: f32,
    /// Scale at `t = knee`
    pub knee_scale: f32,
    /// Scale at `t = 1`
    pub far_scale_target: f32,
    /// Ratio where the first segment ends
    pub knee: f32,
}

impl ScaleCurve {
    /// 0.8 → 1.2 → 2.0
    pub const STANDARD: Self = Self {
        near_scale: 0.8,
        knee_scale: 1.2,
        far_scale_target: 2.0,
        knee: 0.2,
    };

    /// 0.8 → 1.2 → 2.5
    pub const EXTENDED: Self = Self {
        near_scale: 0.8,
        knee_scale: 1.2,
        far_scale_target: 2.5,
        knee: 0.2,
    };

    /// Standard curve with a different far-end target
    pub const fn with_far_target(far_scale_target: f32) -> Self {
        Self {
            far_scale_target,
            ..Self::STANDARD
        }
    }

    /// Evaluate the curve at `t` (clamped to `[0, 1]` first)
    #[inline(always)]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = clamp(t, 0.0, 1.0);
        if t < self.knee {
            let local_t = t / self.knee;
            lerp(self.near_scale, self.knee_scale, local_t)
        } else {
            let local_t = (t - self.knee) / (1.0 - self.knee);
            lerp(self.knee_scale, self.far_scale_target, local_t)
        }
    }
}

impl Default for ScaleCurve {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.8, 1.2, 0.0), 0.8);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
    }

    #[test]
    fn test_clamp_tolerates_inverted_bounds() {
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
        // lo > hi must not panic
        assert_eq!(clamp(0.5, 2.0, 1.0), 2.0);
        assert!(clamp(f32::NAN, 0.0, 1.0).is_nan());
    }

    #[test]
    fn test_standard_curve_anchor_points() {
        let c = ScaleCurve::STANDARD;
        assert!(close(c.evaluate(0.0), 0.8));
        assert!(close(c.evaluate(0.1), 1.0));
        assert!(close(c.evaluate(0.2), 1.2));
        assert!(close(c.evaluate(0.6), 1.6));
        assert!(close(c.evaluate(1.0), 2.0));
    }

    #[test]
    fn test_extended_curve_far_end() {
        let c = ScaleCurve::EXTENDED;
        assert!(close(c.evaluate(0.0), 0.8));
        assert!(close(c.evaluate(0.2), 1.2));
        assert!(close(c.evaluate(0.6), 1.85));
        assert!(close(c.evaluate(1.0), 2.5));
    }

    #[test]
    fn test_curve_clamps_input() {
        let c = ScaleCurve::STANDARD;
        assert_eq!(c.evaluate(-3.0), c.evaluate(0.0));
        assert_eq!(c.evaluate(7.0), c.evaluate(1.0));
    }

    #[test]
    fn test_curve_is_monotonic() {
        for curve in [ScaleCurve::STANDARD, ScaleCurve::EXTENDED] {
            let mut prev = curve.evaluate(0.0);
            for i in 1..=100 {
                let s = curve.evaluate(i as f32 / 100.0);
                assert!(s >= prev, "curve decreased at step {}", i);
                prev = s;
            }
        }
    }

    #[test]
    fn test_with_far_target() {
        let c = ScaleCurve::with_far_target(3.0);
        assert_eq!(c.near_scale, 0.8);
        assert!(close(c.evaluate(1.0), 3.0));
        assert_eq!(ScaleCurve::default(), ScaleCurve::STANDARD);
    }
}
