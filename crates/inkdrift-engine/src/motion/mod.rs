//! Pointer-driven motion: smoothing state and the per-frame animation step.
//!
//! Everything here is pure CPU logic. The runtime feeds it pointer samples and
//! the viewport; it hands back a [`FramePlan`] describing what to draw.

mod animation;
mod state;

pub use animation::{AnimationLoop, FramePlan, LayerPlan, RingPlan};
pub use state::MotionState;

use crate::coords::Viewport;

/// Smoothing rate for the trailing position.
pub const POSITION_RATE: f32 = 0.1;

/// Smoothing rate for the frame-to-frame velocity.
pub const VELOCITY_RATE: f32 = 0.1;

/// Smoothing rate for the edge proximity scale.
pub const PROXIMITY_RATE: f32 = 0.5;

/// Distance from a viewport edge, in logical pixels, inside which the pointer
/// counts as "at the edge".
pub const EDGE_MARGIN: f32 = 10.0;

/// Pointer ring radius at full proximity scale.
pub const RING_RADIUS: f32 = 10.0;

/// Glyph square side as a fraction of the viewport's shorter side.
pub const GLYPH_EXTENT_RATIO: f32 = 0.75;

/// Glyph texture rotation speed in radians per second.
pub const GLYPH_SPIN_RATE: f32 = 0.5;

/// Linear interpolation: `a + (b - a) * t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Side of the square the glyph is rasterized into for `viewport`.
#[inline]
pub fn glyph_extent(viewport: Viewport) -> f32 {
    viewport.min_side() * GLYPH_EXTENT_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── lerp ──────────────────────────────────────────────────────────────

    #[test]
    fn lerp_endpoints() {
        for (a, b) in [(0.0, 1.0), (-5.0, 12.5), (300.0, -42.0), (7.0, 7.0)] {
            assert_eq!(lerp(a, b, 0.0), a);
            assert_eq!(lerp(a, b, 1.0), b);
        }
    }

    #[test]
    fn lerp_is_monotonic_between_endpoints() {
        for (a, b) in [(0.0f32, 100.0f32), (50.0, -50.0)] {
            let mut prev = a;
            for i in 1..=100 {
                let v = lerp(a, b, i as f32 / 100.0);
                if b >= a {
                    assert!(v >= prev && v <= b);
                } else {
                    assert!(v <= prev && v >= b);
                }
                prev = v;
            }
        }
    }

    // ── glyph sizing ──────────────────────────────────────────────────────

    #[test]
    fn glyph_extent_uses_shorter_side() {
        assert_eq!(glyph_extent(Viewport::new(800.0, 600.0)), 450.0);
        assert_eq!(glyph_extent(Viewport::new(400.0, 1000.0)), 300.0);
    }

    #[test]
    fn glyph_extent_survives_resize_round_trip() {
        let initial = Viewport::new(1280.0, 720.0);
        let before = glyph_extent(initial);
        let _resized = glyph_extent(Viewport::new(333.0, 999.0));
        assert_eq!(glyph_extent(initial), before);
    }
}
