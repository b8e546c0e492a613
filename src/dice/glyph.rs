//! Seven-segment numeral outlines.
//!
//! Each lit segment is a separate hexagonal bar with pointed ends, so a digit
//! is a set of disjoint convex outlines that can each be cut as one pocket.

use crate::error::{OperationError, Result};
use crate::math::{Point2, Vector2};

/// Segment width as a fraction of the glyph height.
const WIDTH_RATIO: f64 = 0.5;
const STROKE_RATIO: f64 = 0.1;
/// Clearance left at each end of a bar so neighbouring bars never touch.
const GAP_RATIO: f64 = 0.03;
const SPACING_RATIO: f64 = 0.15;
/// Vertical position of the underline that tells 6 from 9.
const UNDERLINE_RATIO: f64 = -0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

fn segments(digit: u32) -> &'static [Segment] {
    use Segment::{A, B, C, D, E, F, G};
    match digit {
        0 => &[A, B, C, D, E, F],
        1 => &[B, C],
        2 => &[A, B, G, E, D],
        3 => &[A, B, G, C, D],
        4 => &[F, G, B, C],
        5 => &[A, F, G, C, D],
        6 => &[A, F, G, E, D, C],
        7 => &[A, B, C],
        8 => &[A, B, C, D, E, F, G],
        _ => &[A, B, C, D, F, G],
    }
}

/// Outlines for `text` drawn `height` tall, centred on the origin.
///
/// Outlines are counter-clockwise and pairwise disjoint. A lone `6` or `9`
/// gets an underline bar below it.
///
/// # Errors
///
/// Returns [`OperationError::InvalidInput`] when `text` is empty or holds
/// anything but ASCII digits, and [`OperationError::InvalidParameter`] for a
/// non-positive height.
pub fn glyph_outlines(text: &str, height: f64) -> Result<Vec<Vec<Point2>>> {
    if !(height.is_finite() && height > 0.0) {
        return Err(OperationError::InvalidParameter {
            name: "height",
            value: height,
        }
        .into());
    }
    let digits = text
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| OperationError::InvalidInput(format!("cannot draw numeral {text:?}")))?;

    let glyph = Glyph::new(height);
    let spacing = SPACING_RATIO * height;
    #[allow(clippy::cast_precision_loss)]
    let count = digits.len() as f64;
    let total = count * glyph.width + (count - 1.0) * spacing;

    let mut outlines = Vec::new();
    for (k, &digit) in digits.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let center_x = -total / 2.0 + glyph.width / 2.0 + k as f64 * (glyph.width + spacing);
        for &segment in segments(digit) {
            let (start, end) = glyph.centerline(segment);
            outlines.push(glyph.bar(start, end, center_x));
        }
    }

    if matches!(digits.as_slice(), [6 | 9]) {
        let y = UNDERLINE_RATIO * height;
        outlines.push(glyph.bar(
            Point2::new(glyph.left, y),
            Point2::new(glyph.right, y),
            0.0,
        ));
    }

    Ok(outlines)
}

struct Glyph {
    width: f64,
    half_stroke: f64,
    gap: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Glyph {
    fn new(height: f64) -> Self {
        let width = WIDTH_RATIO * height;
        let stroke = STROKE_RATIO * height;
        Self {
            width,
            half_stroke: stroke / 2.0,
            gap: GAP_RATIO * height,
            left: -(width - stroke) / 2.0,
            right: (width - stroke) / 2.0,
            top: (height - stroke) / 2.0,
            bottom: -(height - stroke) / 2.0,
        }
    }

    fn centerline(&self, segment: Segment) -> (Point2, Point2) {
        let (l, r, t, b) = (self.left, self.right, self.top, self.bottom);
        let (start, end) = match segment {
            Segment::A => ((l, t), (r, t)),
            Segment::B => ((r, t), (r, 0.0)),
            Segment::C => ((r, 0.0), (r, b)),
            Segment::D => ((r, b), (l, b)),
            Segment::E => ((l, b), (l, 0.0)),
            Segment::F => ((l, 0.0), (l, t)),
            Segment::G => ((l, 0.0), (r, 0.0)),
        };
        (Point2::new(start.0, start.1), Point2::new(end.0, end.1))
    }

    /// Hexagonal bar along `start → end`, shifted by `offset_x`.
    fn bar(&self, start: Point2, end: Point2, offset_x: f64) -> Vec<Point2> {
        let shift = Vector2::new(offset_x, 0.0);
        let along = (end - start).normalize();
        let across = Vector2::new(-along.y, along.x);
        let h = self.half_stroke;

        let p = start + along * self.gap + shift;
        let q = end - along * self.gap + shift;
        vec![
            p,
            p + along * h - across * h,
            q - along * h - across * h,
            q,
            q - along * h + across * h,
            p + along * h + across * h,
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PolydiceError;
    use crate::math::polygon_2d::{polygons_overlap, signed_area_2d};

    #[test]
    fn digit_segment_counts() {
        let counts: Vec<_> = (0..=9)
            .map(|d| glyph_outlines(&d.to_string(), 1.0).unwrap().len())
            .collect();
        // 6 and 9 carry an underline when drawn alone.
        assert_eq!(counts, vec![6, 2, 5, 5, 4, 5, 7, 3, 7, 7]);
    }

    #[test]
    fn outlines_are_ccw_and_disjoint() {
        for text in ["8", "20", "6", "18"] {
            let outlines = glyph_outlines(text, 0.6).unwrap();
            for (i, a) in outlines.iter().enumerate() {
                assert!(signed_area_2d(a) > 0.0, "{text}: bar {i} is clockwise");
                for b in &outlines[i + 1..] {
                    assert!(!polygons_overlap(a, b), "{text}: bars touch");
                }
            }
        }
    }

    #[test]
    fn glyph_fits_its_box() {
        let height = 0.6;
        let outlines = glyph_outlines("8", height).unwrap();
        for pt in outlines.iter().flatten() {
            assert!(pt.x.abs() <= WIDTH_RATIO * height / 2.0 + 1e-12);
            assert!(pt.y.abs() <= height / 2.0 + 1e-12);
        }
    }

    #[test]
    fn two_digits_are_centred() {
        let outlines = glyph_outlines("88", 1.0).unwrap();
        let xs: Vec<f64> = outlines.iter().flatten().map(|pt| pt.x).collect();
        let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!((min + max).abs() < 1e-12);
    }

    #[test]
    fn sixteen_has_no_underline() {
        assert_eq!(glyph_outlines("16", 1.0).unwrap().len(), 2 + 6);
    }

    #[test]
    fn bad_text_is_rejected() {
        for text in ["", "1a", "-3", " 2"] {
            assert!(matches!(
                glyph_outlines(text, 1.0),
                Err(PolydiceError::Operation(OperationError::InvalidInput(_)))
            ));
        }
        assert!(glyph_outlines("4", 0.0).is_err());
    }
}
