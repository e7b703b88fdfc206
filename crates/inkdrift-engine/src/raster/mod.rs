//! Off-screen 2D drawing: an RGBA8 surface and coverage masks.
//!
//! Used to paint the glyph before it is uploaded as a texture.

mod coverage;
mod stroke;
mod surface;

pub use coverage::Coverage;
pub use stroke::stroke;
pub use surface::Surface;
