use super::{Point2, Vector2, TOLERANCE};

/// Computes the signed area of a 2D polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Winding number of `point` with respect to the polygon `verts`.
///
/// Non-zero => inside, zero => outside.
#[must_use]
pub fn winding_number_2d(point: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];
        let side = cross_2d(&(b - a), &(point - a));

        if a.y <= point.y {
            if b.y > point.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Returns `true` if `point` lies inside the polygon.
///
/// Points on the boundary may report either side; callers that need a strict
/// answer combine this with [`distance_to_boundary`].
#[must_use]
pub fn point_in_polygon_2d(point: &Point2, polygon: &[Point2]) -> bool {
    polygon.len() >= 3 && winding_number_2d(point, polygon) != 0
}

/// Shortest distance from `point` to the closed polygon boundary.
#[must_use]
pub fn distance_to_boundary(point: &Point2, polygon: &[Point2]) -> f64 {
    let n = polygon.len();
    (0..n)
        .map(|i| point_to_segment_dist(point, &polygon[i], &polygon[(i + 1) % n]))
        .fold(f64::INFINITY, f64::min)
}

/// Distance from `point` to the segment `a`–`b`.
#[must_use]
pub fn point_to_segment_dist(point: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return (point - a).norm();
    }
    let t = ((point - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (point - (a + ab * t)).norm()
}

/// Returns `true` if the closed segments `a0`–`a1` and `b0`–`b1` touch or cross.
#[must_use]
pub fn segments_intersect_2d(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = cross_2d(&da, &db);
    let diff = b0 - a0;

    if denom.abs() < TOLERANCE {
        // Parallel: only touching if collinear and overlapping.
        if cross_2d(&diff, &da).abs() > TOLERANCE {
            return false;
        }
        let len_sq = da.norm_squared();
        if len_sq < TOLERANCE * TOLERANCE {
            return (b0 - a0).norm() < TOLERANCE;
        }
        let t0 = diff.dot(&da) / len_sq;
        let t1 = (b1 - a0).dot(&da) / len_sq;
        let (lo, hi) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
        return hi >= -TOLERANCE && lo <= 1.0 + TOLERANCE;
    }

    let t = cross_2d(&diff, &db) / denom;
    let u = cross_2d(&diff, &da) / denom;
    let eps = TOLERANCE;
    t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps
}

/// Returns `true` if two simple polygons share any point (boundary contact,
/// crossing edges, or one containing the other).
#[must_use]
pub fn polygons_overlap(a: &[Point2], b: &[Point2]) -> bool {
    let (na, nb) = (a.len(), b.len());
    for i in 0..na {
        for j in 0..nb {
            if segments_intersect_2d(&a[i], &a[(i + 1) % na], &b[j], &b[(j + 1) % nb]) {
                return true;
            }
        }
    }
    a.first().is_some_and(|p| point_in_polygon_2d(p, b))
        || b.first().is_some_and(|p| point_in_polygon_2d(p, a))
}

/// Vertices of a regular polygon centred on the origin.
///
/// The first vertex sits at `phase` radians from the +x axis; the result is
/// counter-clockwise.
#[must_use]
pub fn regular_polygon(circumradius: f64, sides: usize, phase: f64) -> Vec<Point2> {
    #[allow(clippy::cast_precision_loss)]
    let step = std::f64::consts::TAU / sides as f64;
    (0..sides)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let angle = phase + step * k as f64;
            Point2::new(circumradius * angle.cos(), circumradius * angle.sin())
        })
        .collect()
}

/// Rotates a point about the origin by `angle` radians.
#[must_use]
pub fn rotate_2d(point: &Point2, angle: f64) -> Point2 {
    let (s, c) = angle.sin_cos();
    Point2::new(c * point.x - s * point.y, s * point.x + c * point.y)
}

/// 2D cross product: `(a.x * b.y - a.y * b.x)`.
#[inline]
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
