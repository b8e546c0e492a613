use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

use super::Surface;

/// An infinite plane in 3D space.
///
/// Defined by an origin point, and two orthogonal unit direction vectors
/// (`u_dir`, `v_dir`). The normal is `u_dir × v_dir`.
///
/// Parametric form: `P(u, v) = origin + u * u_dir + v * v_dir`.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from an origin, a normal, and an in-plane reference
    /// direction for `u`.
    ///
    /// The reference is projected into the plane before normalizing, so it
    /// only has to be non-parallel to the normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length or the reference is
    /// parallel to it.
    pub fn new(origin: Point3, normal: Vector3, u_reference: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / len;

        let projected = u_reference - normal * normal.dot(&u_reference);
        let u_len = projected.norm();
        if u_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let u_dir = projected / u_len;
        let v_dir = normal.cross(&u_dir);

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// Creates a plane from an origin and a normal vector.
    ///
    /// The U and V directions are computed automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let reference = crate::math::perpendicular_dir(&(normal / len));
        Self::new(origin, normal, reference)
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the unit normal vector of the plane.
    #[must_use]
    pub fn plane_normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Signed distance from `point` to the plane, positive on the normal side.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        self.normal.dot(&(point - self.origin))
    }

    /// Projects a point onto the plane's `(u, v)` coordinates.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point2 {
        let diff = point - self.origin;
        Point2::new(diff.dot(&self.u_dir), diff.dot(&self.v_dir))
    }

    /// Maps plane coordinates back to 3D.
    #[must_use]
    pub fn point_at(&self, uv: &Point2) -> Point3 {
        self.origin + self.u_dir * uv.x + self.v_dir * uv.y
    }

    /// Returns a copy of the plane moved to `origin`, keeping its directions.
    #[must_use]
    pub fn with_origin(&self, origin: Point3) -> Self {
        Self {
            origin,
            ..self.clone()
        }
    }
}

impl Surface for Plane {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.point_at(&Point2::new(u, v)))
    }

    fn normal(&self, _u: f64, _v: f64) -> Result<Vector3> {
        Ok(self.normal)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn frame_is_right_handed() {
        let plane = Plane::new(
            Point3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, 2.0),
            Vector3::new(1.0, 0.0, 0.3),
        )
        .unwrap();
        assert_relative_eq!(*plane.u_dir(), Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(*plane.v_dir(), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(plane.u_dir().cross(plane.v_dir()), *plane.plane_normal());
    }

    #[test]
    fn project_round_trips_in_plane_points() {
        let plane = Plane::from_normal(Point3::new(1.0, 2.0, 3.0), Vector3::new(1.0, 1.0, 1.0))
            .unwrap();
        let uv = Point2::new(0.25, -1.5);
        let p = plane.point_at(&uv);
        assert!(plane.signed_distance(&p).abs() < 1e-12);
        assert_relative_eq!(plane.project(&p), uv, epsilon = 1e-12);
    }

    #[test]
    fn parallel_reference_fails() {
        let result = Plane::new(Point3::origin(), Vector3::z(), Vector3::new(0.0, 0.0, 5.0));
        assert!(result.is_err());
    }
}
