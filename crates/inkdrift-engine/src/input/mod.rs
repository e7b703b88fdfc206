//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code is responsible for translating platform events into `InputEvent`s.
//! Consumers pull the latest pointer sample through [`PointerSource`].

mod state;
mod types;

pub use state::InputState;
pub use types::{InputEvent, PointerMoveEvent, PointerSample, PointerSource};
