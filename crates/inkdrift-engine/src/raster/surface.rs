use crate::paint::Color;

use super::Coverage;

/// RGBA8 pixel surface, straight alpha, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// A transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    #[cfg(test)]
    pub fn clear(&mut self, color: Color) {
        let px = color.to_rgba8();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Composites `color` over the surface, weighted per pixel by `mask`.
    ///
    /// The mask is aligned to the surface's top-left corner; the overlap of the
    /// two is painted.
    pub fn fill_coverage(&mut self, mask: &Coverage, color: Color) {
        let (sr, sg, sb, sa) = color.to_straight();
        let w = self.width.min(mask.width());
        let h = self.height.min(mask.height());

        for y in 0..h {
            for x in 0..w {
                let a = sa * mask.get(x as i64, y as i64);
                if a <= 0.0 {
                    continue;
                }

                let i = (y as usize * self.width as usize + x as usize) * 4;
                let dst = &mut self.pixels[i..i + 4];
                let da = dst[3] as f32 / 255.0;
                let out_a = a + da * (1.0 - a);

                let mix = |s: f32, d: u8| -> u8 {
                    let d = d as f32 / 255.0;
                    let v = (s * a + d * da * (1.0 - a)) / out_a;
                    (v.clamp(0.0, 1.0) * 255.0).round() as u8
                };

                dst[0] = mix(sr, dst[0]);
                dst[1] = mix(sg, dst[1]);
                dst[2] = mix(sb, dst[2]);
                dst[3] = (out_a.clamp(0.0, 1.0) * 255.0).round() as u8;
            }
        }
    }
}
