//! Anti-aliased rasterization of thick line segments.
//!
//! Coverage of a pixel is derived from the distance between its centre and the nearest
//! point of the segment, so a stroke of width `w` is fully opaque within `w / 2 - 0.5`
//! pixels of the segment and fades out over the following pixel.

use egui::{Pos2, pos2};

/// A pixel touched by a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coverage {
    pub x: usize,
    pub y: usize,
    /// Fraction of the pixel covered, in `(0, 1]`.
    pub alpha: f32,
    /// Parameter in `[0, 1]` of the segment point nearest the pixel centre; `None` for a
    /// zero length segment.
    pub t: Option<f32>,
}

/// Calls `plot` once for every pixel of a `columns` x `rows` raster the stroke covers.
pub fn stroke_segment(
    from: Pos2,
    to: Pos2,
    width: f32,
    columns: usize,
    rows: usize,
    mut plot: impl FnMut(Coverage),
) {
    if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
        return;
    }
    let half = width / 2.0;
    let reach = half + 1.0;
    let clip = |lo: f32, hi: f32, limit: usize| {
        let lo = (lo - reach).floor().max(0.0) as usize;
        let hi = ((hi + reach).ceil().max(0.0) as usize).min(limit);
        lo..hi
    };
    let xs = clip(from.x.min(to.x), from.x.max(to.x), columns);
    let ys = clip(from.y.min(to.y), from.y.max(to.y), rows);

    let d = to - from;
    let len2 = d.length_sq();
    for y in ys {
        for x in xs.clone() {
            let centre = pos2(x as f32 + 0.5, y as f32 + 0.5);
            let (t, nearest) = if len2 > 0.0 {
                let t = ((centre - from).dot(d) / len2).clamp(0.0, 1.0);
                (Some(t), from + d * t)
            } else {
                (None, from)
            };
            let alpha = (half + 0.5 - (centre - nearest).length()).clamp(0.0, 1.0);
            if alpha > 0.0 {
                plot(Coverage { x, y, alpha, t });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(from: Pos2, to: Pos2, width: f32, size: usize) -> Vec<Coverage> {
        let mut covered = Vec::new();
        stroke_segment(from, to, width, size, size, |c| covered.push(c));
        covered
    }

    #[test]
    fn horizontal_unit_stroke_covers_one_row() {
        let covered = collect(pos2(2.5, 4.5), pos2(7.5, 4.5), 1.0, 10);
        assert!(covered.iter().all(|c| c.y == 4));
        let xs: Vec<usize> = covered.iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![2, 3, 4, 5, 6, 7]);
        assert!(covered.iter().all(|c| c.alpha == 1.0));
        assert_eq!(covered.first().and_then(|c| c.t), Some(0.0));
        assert_eq!(covered.last().and_then(|c| c.t), Some(1.0));
    }

    #[test]
    fn wide_stroke_feathers_its_edges() {
        let covered = collect(pos2(2.5, 4.5), pos2(7.5, 4.5), 2.0, 10);
        let edge = covered.iter().find(|c| c.x == 4 && c.y == 3);
        assert_eq!(edge.map(|c| c.alpha), Some(0.5));
        let centre = covered.iter().find(|c| c.x == 4 && c.y == 4);
        assert_eq!(centre.map(|c| c.alpha), Some(1.0));
    }

    #[test]
    fn strokes_are_clipped_to_the_raster() {
        let covered = collect(pos2(-20.0, -20.0), pos2(30.0, 30.0), 1.5, 10);
        assert!(!covered.is_empty());
        assert!(covered.iter().all(|c| c.x < 10 && c.y < 10));
        assert!(collect(pos2(-20.0, 5.0), pos2(-10.0, 5.0), 1.5, 10).is_empty());
    }

    #[test]
    fn degenerate_segment_is_a_dot() {
        let covered = collect(pos2(5.5, 5.5), pos2(5.5, 5.5), 1.0, 10);
        assert_eq!(covered.len(), 1);
        assert_eq!(covered[0].t, None);
    }

    #[test]
    fn non_finite_endpoints_draw_nothing() {
        assert!(collect(pos2(f32::NAN, 1.0), pos2(3.0, 3.0), 1.0, 10).is_empty());
    }
}
