//! Frame timing and event debouncing.
//!
//! - one [`FrameClock`] per render loop, ticked once per redraw
//! - [`Debounce`] for work that should wait until a burst of events settles

mod debounce;
mod frame_clock;

pub use debounce::Debounce;
pub use frame_clock::{FrameClock, FrameTime};
