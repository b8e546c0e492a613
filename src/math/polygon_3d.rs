use crate::geometry::surface::Plane;

use super::polygon_2d::{distance_to_boundary, point_in_polygon_2d};
use super::{Point2, Point3, Vector3};

/// Where a coplanar point lies relative to a planar region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionClassification {
    Inside,
    Outside,
    /// Within `tolerance` of a boundary loop.
    OnBoundary,
}

/// Projects a loop of coplanar points into the plane's `(u, v)` coordinates.
#[must_use]
pub fn project_loop(points: &[Point3], plane: &Plane) -> Vec<Point2> {
    points.iter().map(|p| plane.project(p)).collect()
}

/// Point-in-polygon test for a 3D point coplanar with the polygon.
///
/// Projects to the plane's UV coordinate space and uses the winding number.
#[must_use]
pub fn point_in_polygon_3d(point: &Point3, polygon: &[Point3], plane: &Plane) -> bool {
    point_in_polygon_2d(&plane.project(point), &project_loop(polygon, plane))
}

/// Classifies a coplanar point against a region bounded by `outer` with
/// `holes` removed.
#[must_use]
pub fn classify_in_region(
    point: &Point3,
    outer: &[Point3],
    holes: &[Vec<Point3>],
    plane: &Plane,
    tolerance: f64,
) -> RegionClassification {
    let uv = plane.project(point);
    let outer_2d = project_loop(outer, plane);
    if distance_to_boundary(&uv, &outer_2d) < tolerance {
        return RegionClassification::OnBoundary;
    }
    if !point_in_polygon_2d(&uv, &outer_2d) {
        return RegionClassification::Outside;
    }
    for hole in holes {
        let hole_2d = project_loop(hole, plane);
        if distance_to_boundary(&uv, &hole_2d) < tolerance {
            return RegionClassification::OnBoundary;
        }
        if point_in_polygon_2d(&uv, &hole_2d) {
            return RegionClassification::Outside;
        }
    }
    RegionClassification::Inside
}

/// Vector area of a closed loop: half the sum of `p_i × p_{i+1}`.
///
/// Its direction follows the loop's winding and its length is the enclosed
/// area.
#[must_use]
pub fn vector_area(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut sum = Vector3::zeros();
    for i in 0..n {
        sum += points[i].coords.cross(&points[(i + 1) % n].coords);
    }
    sum * 0.5
}
