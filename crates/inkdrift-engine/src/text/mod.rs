//! Font loading and glyph painting for the glyph layer.

mod font;
mod glyph;

pub use font::{Font, FontLoadError};
pub use glyph::{rasterize_glyph, GlyphStyle, GLYPH_COLOR, GLYPH_LINE_WIDTH};
