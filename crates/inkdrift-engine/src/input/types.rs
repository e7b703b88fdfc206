use crate::coords::Vec2;

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by the runtime.
///
/// Runtime translates window system events into these.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved over the window surface. Entering the window reports its
    /// position through the first move; leaving reports nothing.
    PointerMoved(PointerMoveEvent),
}

/// A raw pointer position tagged with the order in which it arrived.
///
/// `seq` increases by one for every pointer event applied to an
/// [`InputState`](super::InputState); a larger `seq` is always the newer sample.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub seq: u64,
}

/// Pull-style access to the most recent pointer sample.
///
/// The animation loop asks for the latest sample once per frame; individual
/// events in between are never replayed.
pub trait PointerSource {
    fn latest(&self) -> Option<PointerSample>;
}

impl PointerSource for Option<PointerSample> {
    fn latest(&self) -> Option<PointerSample> {
        *self
    }
}
