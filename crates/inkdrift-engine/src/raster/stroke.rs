use super::Coverage;

/// Outline of `shape` as a stroke of `line_width` centred on its edge.
///
/// Computed as grayscale dilation minus erosion over a disc of radius
/// `line_width / 2`. Pixels outside the mask count as empty, so only the
/// shape's bounding box grown by the disc radius can be non-zero.
pub fn stroke(shape: &Coverage, line_width: f32) -> Coverage {
    let (w, h) = (shape.width(), shape.height());
    let mut out = Coverage::new(w, h);

    let radius = line_width / 2.0;
    if radius.is_nan() || radius <= 0.0 {
        return out;
    }

    let Some((bx0, by0, bx1, by1)) = shape.bounds() else {
        return out;
    };

    let reach = radius.ceil() as i64;
    let disc: Vec<(i64, i64)> = (-reach..=reach)
        .flat_map(|dy| (-reach..=reach).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy)| ((dx * dx + dy * dy) as f32) <= radius * radius)
        .collect();

    let xs = (bx0 as i64 - reach).max(0)..=(bx1 as i64 + reach).min(w as i64 - 1);
    let ys = (by0 as i64 - reach).max(0)..=(by1 as i64 + reach).min(h as i64 - 1);

    for y in ys {
        for x in xs.clone() {
            let (mut hi, mut lo) = (0.0f32, 1.0f32);
            for &(dx, dy) in &disc {
                let v = shape.get(x + dx, y + dy);
                hi = hi.max(v);
                lo = lo.min(v);
                if hi >= 1.0 && lo <= 0.0 {
                    break;
                }
            }
            out.set(x as u32, y as u32, hi - lo);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: u32, from: u32, to: u32) -> Coverage {
        let mut c = Coverage::new(size, size);
        for y in from..to {
            for x in from..to {
                c.set(x, y, 1.0);
            }
        }
        c
    }

    #[test]
    fn interior_and_far_exterior_are_empty() {
        let s = stroke(&square(20, 5, 15), 4.0);
        assert_eq!(s.get(10, 10), 0.0);
        assert_eq!(s.get(0, 0), 0.0);
    }

    #[test]
    fn band_straddles_the_edge() {
        let s = stroke(&square(20, 5, 15), 4.0);
        // two pixels either side of the left edge at x = 5
        assert_eq!(s.get(3, 10), 1.0);
        assert_eq!(s.get(6, 10), 1.0);
        assert_eq!(s.get(2, 10), 0.0);
        assert_eq!(s.get(8, 10), 0.0);
    }

    #[test]
    fn zero_width_draws_nothing() {
        let s = stroke(&square(8, 2, 6), 0.0);
        assert!(s.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn shape_in_a_large_canvas_matches_full_scan() {
        let mut shape = Coverage::new(64, 48);
        for (x, y, v) in [(30, 20, 1.0), (31, 20, 0.6), (30, 21, 1.0), (33, 24, 0.3), (0, 47, 1.0)] {
            shape.set(x, y, v);
        }

        let fast = stroke(&shape, 3.0);

        let radius = 1.5f32;
        let mut full = Coverage::new(64, 48);
        for y in 0..48i64 {
            for x in 0..64i64 {
                let (mut hi, mut lo) = (0.0f32, 1.0f32);
                for dy in -2..=2i64 {
                    for dx in -2..=2i64 {
                        if ((dx * dx + dy * dy) as f32) <= radius * radius {
                            let v = shape.get(x + dx, y + dy);
                            hi = hi.max(v);
                            lo = lo.min(v);
                        }
                    }
                }
                full.set(x as u32, y as u32, hi - lo);
            }
        }

        assert_eq!(fast, full);
    }

    #[test]
    fn empty_shape_strokes_to_nothing() {
        let s = stroke(&Coverage::new(32, 32), 4.0);
        assert!(s.values().iter().all(|v| *v == 0.0));
    }
}
