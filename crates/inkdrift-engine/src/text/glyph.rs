use crate::paint::Color;
use crate::raster::{stroke, Coverage, Surface};

use super::Font;

/// Glyph stroke width in pixels.
pub const GLYPH_LINE_WIDTH: f32 = 4.0;

/// Glyph stroke colour, `#3434ff`.
pub const GLYPH_COLOR: [u8; 4] = [0x34, 0x34, 0xff, 0xff];

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlyphStyle {
    pub ch: char,
    pub color: Color,
    pub line_width: f32,
}

impl GlyphStyle {
    pub fn stroked(ch: char) -> Self {
        let [r, g, b, a] = GLYPH_COLOR;
        Self {
            ch,
            color: Color::from_srgb_u8(r, g, b, a),
            line_width: GLYPH_LINE_WIDTH,
        }
    }
}

/// A transparent `side` x `side` surface with the glyph stroked at font size
/// `side`.
pub fn rasterize_glyph(font: &Font, style: &GlyphStyle, side: u32) -> Surface {
    let mut surface = Surface::new(side, side);
    paint_glyph(&mut surface, font, style, side as f32);
    surface
}

/// Strokes `style.ch` at `px` onto `surface`.
///
/// The glyph's advance is centred horizontally and the middle of its em box
/// sits on the vertical centre of the surface.
fn paint_glyph(surface: &mut Surface, font: &Font, style: &GlyphStyle, px: f32) {
    if px <= 0.0 || surface.width() == 0 || surface.height() == 0 {
        return;
    }

    let raw = font.raw();
    let (metrics, bitmap) = raw.rasterize(style.ch, px);
    let line = raw
        .horizontal_line_metrics(px)
        .map(|l| (l.ascent, l.descent));

    let (pen_x, baseline) = glyph_origin(
        surface.width() as f32,
        surface.height() as f32,
        metrics.advance_width,
        line,
        px,
    );

    let left = (pen_x + metrics.xmin as f32).round() as i64;
    let top = (baseline - (metrics.ymin as f32 + metrics.height as f32)).round() as i64;

    let mut shape = Coverage::new(surface.width(), surface.height());
    shape.blit_alpha(&bitmap, metrics.width, metrics.height, left, top);

    surface.fill_coverage(&stroke(&shape, style.line_width), style.color);

    log::debug!(
        "glyph {:?} painted at {px}px into {}x{}",
        style.ch,
        surface.width(),
        surface.height()
    );
}

/// Pen position and baseline (y down) for a centred, middle-aligned glyph.
///
/// `line` is `(ascent, descent)` with descent negative; without it the em box
/// is assumed to span `0.8 px` above and `0.2 px` below the baseline.
fn glyph_origin(width: f32, height: f32, advance: f32, line: Option<(f32, f32)>, px: f32) -> (f32, f32) {
    let (ascent, descent) = line.unwrap_or((px * 0.8, -px * 0.2));
    let pen_x = width / 2.0 - advance / 2.0;
    let baseline = height / 2.0 + (ascent + descent) / 2.0;
    (pen_x, baseline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_is_centred() {
        let (pen_x, _) = glyph_origin(200.0, 200.0, 120.0, Some((160.0, -40.0)), 200.0);
        assert_eq!(pen_x, 40.0);
    }

    #[test]
    fn em_middle_sits_on_centre() {
        let (_, baseline) = glyph_origin(200.0, 200.0, 0.0, Some((160.0, -40.0)), 200.0);
        // em box spans baseline-160 .. baseline+40, middle at baseline-60
        assert_eq!(baseline - 60.0, 100.0);
    }

    #[test]
    fn missing_line_metrics_fall_back() {
        let with = glyph_origin(100.0, 100.0, 0.0, Some((80.0, -20.0)), 100.0);
        let without = glyph_origin(100.0, 100.0, 0.0, None, 100.0);
        assert_eq!(with, without);
    }

    #[test]
    fn default_style_is_blue_four_px_stroke() {
        let s = GlyphStyle::stroked('K');
        assert_eq!(s.ch, 'K');
        assert_eq!(s.line_width, 4.0);
        assert_eq!(s.color.to_rgba8(), [0x34, 0x34, 0xff, 0xff]);
    }
}
