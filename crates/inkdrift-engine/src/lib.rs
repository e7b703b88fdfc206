//! Inkdrift engine crate.
//!
//! Window runtime and GPU plumbing, plus the pointer-trailing motion model and
//! the layer renderer the studio binary is built on.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod raster;
pub mod text;
pub mod render;
pub mod motion;
