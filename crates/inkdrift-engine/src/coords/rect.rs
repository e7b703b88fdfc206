use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
///
/// Negative sizes are carried through unchanged; quads built from them simply
/// come out mirrored.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rectangle of `size` whose center sits on `center`.
    #[inline]
    pub fn centered_on(center: Vec2, size: Vec2) -> Self {
        Self::from_origin_size(center - size / 2.0, size)
    }

    /// The unit square at the origin.
    #[inline]
    pub const fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_on_offsets_by_half_size() {
        let r = Rect::centered_on(Vec2::new(100.0, 50.0), Vec2::new(40.0, 20.0));
        assert_eq!(r, Rect::new(80.0, 40.0, 40.0, 20.0));
    }

    #[test]
    fn max_adds_size() {
        assert_eq!(Rect::new(1.0, 2.0, 10.0, 20.0).max(), Vec2::new(11.0, 22.0));
    }

    #[test]
    fn negative_size_is_preserved() {
        let r = Rect::new(10.0, 10.0, -4.0, 5.0);
        assert_eq!(r.max(), Vec2::new(6.0, 15.0));
    }
}
