/// Per-pixel coverage in `[0, 1]`, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Coverage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage at `(x, y)`; zero outside the mask.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> f32 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0.0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            self.data[y as usize * self.width as usize + x as usize] = value.clamp(0.0, 1.0);
        }
    }

    /// Copies an 8-bit alpha bitmap of `w` x `h` with its top-left at `(left, top)`.
    /// Parts falling outside the mask are dropped.
    pub fn blit_alpha(&mut self, bitmap: &[u8], w: usize, h: usize, left: i64, top: i64) {
        for row in 0..h {
            for col in 0..w {
                let (x, y) = (left + col as i64, top + row as i64);
                if x < 0 || y < 0 {
                    continue;
                }
                if let Some(a) = bitmap.get(row * w + col) {
                    self.set(x as u32, y as u32, *a as f32 / 255.0);
                }
            }
        }
    }

    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Inclusive `(x0, y0, x1, y1)` box around every non-zero pixel.
    pub fn bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let w = self.width as usize;
        let mut found: Option<(u32, u32, u32, u32)> = None;
        for (i, _) in self.data.iter().enumerate().filter(|(_, v)| **v > 0.0) {
            let (x, y) = ((i % w) as u32, (i / w) as u32);
            found = Some(match found {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_reads_zero() {
        let c = Coverage::new(2, 2);
        assert_eq!(c.get(-1, 0), 0.0);
        assert_eq!(c.get(2, 0), 0.0);
    }

    #[test]
    fn bounds_wrap_nonzero_pixels() {
        let mut c = Coverage::new(6, 5);
        assert_eq!(c.bounds(), None);
        c.set(4, 1, 0.5);
        c.set(1, 3, 1.0);
        assert_eq!(c.bounds(), Some((1, 1, 4, 3)));
    }

    #[test]
    fn blit_clips_to_bounds() {
        let mut c = Coverage::new(3, 3);
        c.blit_alpha(&[255, 255, 255, 255], 2, 2, 2, -1);
        assert_eq!(c.get(2, 0), 1.0);
        assert_eq!(c.values().iter().filter(|v| **v > 0.0).count(), 1);
    }
}
