use crate::error::{GeometryError, Result, TopologyError};
use crate::geometry::surface::Plane;
use crate::math::{centroid, newell_normal, Point3, LINEAR_TOLERANCE};
use crate::topology::{FaceData, FaceId, FaceSurface, TopologyStore, WireId};

/// Creates a planar face from a closed outer wire and optional holes.
///
/// The plane is derived from the outer wire: its normal follows the wire's
/// winding (Newell's method), its origin is the wire's vertex centroid and
/// its `u` direction is the first edge's tangent.
pub struct MakeFace {
    outer_wire: WireId,
    inner_wires: Vec<WireId>,
}

impl MakeFace {
    /// Creates a new `MakeFace` operation.
    #[must_use]
    pub fn new(outer_wire: WireId, inner_wires: Vec<WireId>) -> Self {
        Self {
            outer_wire,
            inner_wires,
        }
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WireNotClosed`] if any wire is open and
    /// [`GeometryError::DegenerateFace`] if the outer wire has fewer than
    /// three vertices, encloses no area, or any wire vertex lies off the
    /// plane.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        let outer = closed_wire_points(store, self.outer_wire)?;
        if outer.len() < 3 {
            return Err(GeometryError::DegenerateFace(format!(
                "outer wire has {} vertices",
                outer.len()
            ))
            .into());
        }

        let normal = newell_normal(&outer)?;
        let origin = centroid(&outer);
        let plane = Plane::new(origin, normal, outer[1] - outer[0])?;

        let mut all_points = outer;
        for &wire in &self.inner_wires {
            all_points.extend(closed_wire_points(store, wire)?);
        }
        check_coplanar(&plane, &all_points)?;

        Ok(store.add_face(FaceData {
            surface: FaceSurface::Plane(plane),
            outer_wire: self.outer_wire,
            inner_wires: self.inner_wires.clone(),
            same_sense: true,
        }))
    }
}

fn closed_wire_points(store: &TopologyStore, wire: WireId) -> Result<Vec<Point3>> {
    if !store.wire(wire)?.is_closed {
        return Err(TopologyError::WireNotClosed.into());
    }
    Ok(store.wire_points(wire)?)
}

/// Checks every point against the plane, with a tolerance relative to the
/// size of the point set.
fn check_coplanar(plane: &Plane, points: &[Point3]) -> Result<()> {
    let extent = points
        .iter()
        .map(|p| (p - plane.origin()).norm())
        .fold(1.0_f64, f64::max);
    let tolerance = LINEAR_TOLERANCE * extent;

    for p in points {
        let distance = plane.signed_distance(p);
        if distance.abs() > tolerance {
            return Err(GeometryError::DegenerateFace(format!(
                "vertex ({:.6}, {:.6}, {:.6}) is {distance:.3e} off the face plane",
                p.x, p.y, p.z
            ))
            .into());
        }
    }
    Ok(())
}
