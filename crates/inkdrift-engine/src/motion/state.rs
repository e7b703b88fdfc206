use crate::coords::{Vec2, Viewport};

use super::{lerp, EDGE_MARGIN, POSITION_RATE, PROXIMITY_RATE, VELOCITY_RATE};

/// Smoothed pointer state.
///
/// Fields are only ever moved toward the latest raw sample through [`lerp`];
/// the one exception is [`MotionState::seeded`], which places everything at the
/// seed point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MotionState {
    /// Trailing pointer position.
    pub position: Vec2,

    /// Smoothed displacement, previous frame minus current frame.
    pub velocity: Vec2,

    /// 0 near a viewport edge, 1 elsewhere, smoothed.
    pub proximity_scale: f32,

    last_pointer: Vec2,
}

impl MotionState {
    /// State resting at `at`: no velocity, proximity faded out.
    pub fn seeded(at: Vec2) -> Self {
        Self {
            position: at,
            velocity: Vec2::zero(),
            proximity_scale: 0.0,
            last_pointer: at,
        }
    }

    /// Builds a state from explicit values, treating `last_pointer` as the
    /// previous frame's raw sample.
    #[cfg(test)]
    pub fn from_parts(position: Vec2, velocity: Vec2, proximity_scale: f32, last_pointer: Vec2) -> Self {
        Self {
            position,
            velocity,
            proximity_scale,
            last_pointer,
        }
    }

    #[cfg(test)]
    pub fn last_pointer(&self) -> Vec2 {
        self.last_pointer
    }

    /// Advances one frame toward `raw`.
    ///
    /// Velocity compares against the raw sample of the previous frame, so it
    /// trails the pointer by one frame.
    pub fn update(&mut self, raw: Vec2, viewport: Viewport) {
        let proximity_target = if viewport.near_edge(raw, EDGE_MARGIN) { 0.0 } else { 1.0 };

        self.velocity = self.velocity.lerp(self.last_pointer - raw, VELOCITY_RATE);
        self.proximity_scale = lerp(self.proximity_scale, proximity_target, PROXIMITY_RATE);
        self.position = self.position.lerp(raw, POSITION_RATE);

        self.last_pointer = raw;
    }
}
