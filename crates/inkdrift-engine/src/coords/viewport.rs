use super::Vec2;

/// Viewport size in logical pixels.
///
/// Renderers should treat this as the coordinate basis for converting logical px
/// positions to clip space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Length of the shorter side.
    #[inline]
    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }

    /// Returns true when `p` lies strictly within `margin` of any of the four edges.
    ///
    /// Points exactly `margin` away from an edge are not considered near it.
    #[inline]
    pub fn near_edge(self, p: Vec2, margin: f32) -> bool {
        p.x < margin
            || p.y < margin
            || p.x > self.width - margin
            || p.y > self.height - margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn near_edge_each_side() {
        assert!(VP.near_edge(Vec2::new(5.0, 300.0), 10.0));
        assert!(VP.near_edge(Vec2::new(400.0, 9.0), 10.0));
        assert!(VP.near_edge(Vec2::new(795.0, 300.0), 10.0));
        assert!(VP.near_edge(Vec2::new(400.0, 591.0), 10.0));
    }

    #[test]
    fn near_edge_boundary_is_exclusive() {
        assert!(!VP.near_edge(Vec2::new(10.0, 10.0), 10.0));
        assert!(!VP.near_edge(Vec2::new(790.0, 590.0), 10.0));
    }

    #[test]
    fn interior_point_is_not_near_edge() {
        assert!(!VP.near_edge(VP.center(), 10.0));
    }

    #[test]
    fn min_side_picks_shorter_axis() {
        assert_eq!(VP.min_side(), 600.0);
        assert_eq!(Viewport::new(300.0, 900.0).min_side(), 300.0);
    }
}
