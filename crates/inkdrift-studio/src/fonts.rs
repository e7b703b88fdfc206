use std::path::Path;

use anyhow::{bail, Context, Result};
use inkdrift_engine::text::Font;

/// Common locations of a sans-serif system font.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Loads the font for `glyph`: the explicit path when given, otherwise the
/// first system font that parses and contains the glyph.
pub fn load_font(explicit: Option<&Path>, glyph: char) -> Result<Font> {
    if let Some(path) = explicit {
        let font = Font::from_path(path)
            .with_context(|| format!("failed to load font {}", path.display()))?;
        if !font.has_glyph(glyph) {
            log::warn!("font {} has no glyph for {glyph:?}", path.display());
        }
        log::info!("using font {}", path.display());
        return Ok(font);
    }

    let candidates: Vec<&Path> = SYSTEM_FONTS.iter().map(Path::new).collect();
    probe(&candidates, glyph)
}

fn probe(candidates: &[&Path], glyph: char) -> Result<Font> {
    for path in candidates {
        match Font::from_path(path) {
            Ok(font) if font.has_glyph(glyph) => {
                log::info!("using system font {}", path.display());
                return Ok(font);
            }
            Ok(_) => log::debug!("{} lacks {glyph:?}, skipping", path.display()),
            Err(err) => log::trace!("{err}"),
        }
    }

    bail!("no usable font found for {glyph:?}; pass --font or set INKDRIFT_FONT")
}
