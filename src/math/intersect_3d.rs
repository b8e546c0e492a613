use crate::geometry::surface::Plane;

use super::{Point3, Vector3, TOLERANCE};

/// Relationship of a ray with a plane.
#[derive(Debug)]
pub enum LinePlaneRelation {
    /// The line crosses the plane at `point = origin + t * dir`.
    Point { point: Point3, t: f64 },
    /// Line is parallel to the plane (does not intersect).
    Parallel,
    /// Line lies entirely on the plane.
    OnPlane,
}

/// Computes the intersection of the line `origin + t * dir` with a plane.
#[must_use]
pub fn line_plane_intersect(origin: &Point3, dir: &Vector3, plane: &Plane) -> LinePlaneRelation {
    let normal = plane.plane_normal();
    let denom = normal.dot(dir);
    let numer = normal.dot(&(plane.origin() - origin));

    if denom.abs() < TOLERANCE {
        if numer.abs() < TOLERANCE {
            LinePlaneRelation::OnPlane
        } else {
            LinePlaneRelation::Parallel
        }
    } else {
        let t = numer / denom;
        LinePlaneRelation::Point {
            point: origin + dir * t,
            t,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn crossing_line_hits_plane() {
        let plane = Plane::from_normal(Point3::new(0.0, 0.0, 2.0), Vector3::z()).unwrap();
        let relation = line_plane_intersect(&Point3::origin(), &Vector3::new(0.0, 1.0, 1.0), &plane);
        let LinePlaneRelation::Point { point, t } = relation else {
            panic!("expected an intersection point, got {relation:?}");
        };
        assert_relative_eq!(t, 2.0);
        assert_relative_eq!(point, Point3::new(0.0, 2.0, 2.0));
    }

    #[test]
    fn parallel_and_coplanar_lines() {
        let plane = Plane::from_normal(Point3::origin(), Vector3::z()).unwrap();
        assert!(matches!(
            line_plane_intersect(&Point3::new(0.0, 0.0, 1.0), &Vector3::x(), &plane),
            LinePlaneRelation::Parallel
        ));
        assert!(matches!(
            line_plane_intersect(&Point3::origin(), &Vector3::y(), &plane),
            LinePlaneRelation::OnPlane
        ));
    }
}
