use crate::error::{GeometryError, Result};
use crate::math::{centroid, Point2, Point3, Vector3, TOLERANCE};

use super::solid::Solid;

/// Right-handed orthonormal frame on a numbered face.
///
/// `origin` is the centroid of the face's corners, `normal` points out of the
/// solid, `x_axis` runs along the face's first boundary edge and
/// `y_axis = normal × x_axis`.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceFrame {
    pub face_number: u32,
    pub origin: Point3,
    pub x_axis: Vector3,
    pub y_axis: Vector3,
    pub normal: Vector3,
}

impl FaceFrame {
    /// Maps face-local coordinates to a point on the face plane.
    #[must_use]
    pub fn to_world(&self, local: &Point2) -> Point3 {
        self.origin + self.x_axis * local.x + self.y_axis * local.y
    }

    /// Maps face-local polar coordinates (`angle` in degrees from the x-axis).
    #[must_use]
    pub fn polar_to_world(&self, radius: f64, angle: f64) -> Point3 {
        let (sin, cos) = angle.to_radians().sin_cos();
        self.to_world(&Point2::new(radius * cos, radius * sin))
    }
}

/// Computes the frame of face `face_number`.
///
/// The frame is read from the face's outer boundary, which pocket cuts do
/// not change, so it is the same before and after marking.
///
/// # Errors
///
/// Returns [`crate::error::OperationError::InvalidFaceNumber`] for an unknown
/// face and [`GeometryError::DegenerateFace`] if its first corners are
/// collinear.
pub fn frame_for(solid: &Solid, face_number: u32) -> Result<FaceFrame> {
    let face_id = solid.face(face_number)?;
    let store = solid.store();
    let corners = store.wire_points(store.face(face_id)?.outer_wire)?;
    if corners.len() < 3 {
        return Err(GeometryError::DegenerateFace(format!(
            "face {face_number} has {} corners",
            corners.len()
        ))
        .into());
    }

    let origin = centroid(&corners);
    let first_edge = corners[1] - corners[0];
    let normal = first_edge.cross(&(corners[2] - corners[1]));
    let len = normal.norm();
    if len < TOLERANCE {
        return Err(GeometryError::DegenerateFace(format!(
            "face {face_number} starts with collinear corners"
        ))
        .into());
    }
    let mut normal = normal / len;
    if normal.dot(&(origin - solid.center())) < 0.0 {
        normal = -normal;
    }

    let x_axis = (first_edge - normal * normal.dot(&first_edge)).normalize();
    let y_axis = normal.cross(&x_axis);

    Ok(FaceFrame {
        face_number,
        origin,
        x_axis,
        y_axis,
        normal,
    })
}

/// Frames of every numbered face, in face-number order.
///
/// # Errors
///
/// Returns an error if any frame cannot be computed.
pub fn frames(solid: &Solid) -> Result<Vec<FaceFrame>> {
    (1..=solid.face_count())
        .map(|n| frame_for(solid, n))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dice::assemble::assemble;
    use crate::dice::polyhedron::Polyhedron;
    use crate::error::{OperationError, PolydiceError};
    use approx::assert_relative_eq;

    fn build(polyhedron: Polyhedron) -> Solid {
        assemble(&polyhedron.vertices(), &polyhedron.table()).unwrap()
    }

    #[test]
    fn frames_are_orthonormal_and_outward() {
        for polyhedron in [Polyhedron::Icosahedron, Polyhedron::Cube] {
            let solid = build(polyhedron);
            for frame in frames(&solid).unwrap() {
                assert!((frame.x_axis.norm() - 1.0).abs() < 1e-9);
                assert!((frame.y_axis.norm() - 1.0).abs() < 1e-9);
                assert!((frame.normal.norm() - 1.0).abs() < 1e-9);
                assert!(frame.x_axis.dot(&frame.y_axis).abs() < 1e-9);
                assert!(frame.x_axis.dot(&frame.normal).abs() < 1e-9);
                assert!(frame.y_axis.dot(&frame.normal).abs() < 1e-9);
                assert!((frame.x_axis.cross(&frame.y_axis) - frame.normal).norm() < 1e-9);
                assert!(frame.normal.dot(&frame.origin.coords) > 0.0);
            }
        }
    }

    #[test]
    fn icosahedron_frame_points_y_at_the_apex() {
        let solid = build(Polyhedron::Icosahedron);
        let frame = frame_for(&solid, 1).unwrap();
        let apex = Polyhedron::Icosahedron.vertices()[2];
        let to_apex = (apex - frame.origin).normalize();
        assert_relative_eq!(to_apex, frame.y_axis, epsilon = 1e-12);
        assert_relative_eq!(frame.polar_to_world((apex - frame.origin).norm(), 90.0), apex, epsilon = 1e-12);
    }

    #[test]
    fn cube_top_frame_is_axis_aligned() {
        let solid = build(Polyhedron::Cube);
        let frame = frame_for(&solid, 1).unwrap();
        assert_relative_eq!(frame.origin, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(frame.x_axis, Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(frame.y_axis, Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(frame.normal, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn unknown_face_number_is_rejected() {
        let solid = build(Polyhedron::Cube);
        for n in [0, 7] {
            assert!(matches!(
                frame_for(&solid, n),
                Err(PolydiceError::Operation(OperationError::InvalidFaceNumber {
                    face_count: 6,
                    ..
                }))
            ));
        }
    }
}
