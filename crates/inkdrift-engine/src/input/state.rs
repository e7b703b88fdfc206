use crate::coords::Vec2;

use super::types::{InputEvent, PointerMoveEvent, PointerSample, PointerSource};

/// Current input state for a single window.
///
/// Only the latest pointer sample is kept. Leaving the window does not clear it:
/// the last known position stays valid until the pointer moves again.
#[derive(Debug, Default)]
pub struct InputState {
    pointer: Option<PointerSample>,
    seq: u64,
}

impl InputState {
    /// Applies a platform-agnostic input event.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.seq = self.seq.wrapping_add(1);
                self.pointer = Some(PointerSample {
                    position: Vec2::new(x, y),
                    seq: self.seq,
                });
            }
        }
    }
}

impl PointerSource for InputState {
    fn latest(&self) -> Option<PointerSample> {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    #[test]
    fn no_sample_before_first_move() {
        let s = InputState::default();
        assert!(s.latest().is_none());
    }

    #[test]
    fn most_recent_move_wins() {
        let mut s = InputState::default();
        s.apply_event(moved(1.0, 2.0));
        s.apply_event(moved(3.0, 4.0));
        let sample = s.latest().unwrap();
        assert_eq!(sample.position, Vec2::new(3.0, 4.0));
        assert_eq!(sample.seq, 2);
    }

    #[test]
    fn reading_does_not_consume_the_sample() {
        let mut s = InputState::default();
        s.apply_event(moved(10.0, 20.0));
        let first = s.latest();
        assert_eq!(s.latest(), first);
        assert_eq!(first.map(|p| p.position), Some(Vec2::new(10.0, 20.0)));
    }
}
