use crate::error::{OperationError, Result};
use crate::math::{newell_normal, Point3, Vector3, TOLERANCE};
use crate::topology::{
    EdgeId, FaceId, OrientedEdge, SolidId, TopologyStore, VertexData, VertexId,
};

use super::{MakeEdge, MakeFace, MakeShell, MakeSolid, MakeWire};

/// Extrudes a planar polygon along a direction vector into a closed solid.
///
/// The shell lists the base cap, then the top cap, then one side quad per
/// polygon edge. Caps and sides share their edges, so the result is
/// watertight.
pub struct MakePrism {
    points: Vec<Point3>,
    direction: Vector3,
}

impl MakePrism {
    /// Creates a new `MakePrism` operation.
    ///
    /// `points` may be wound either way; it is reoriented to wind
    /// counter-clockwise about `direction`.
    #[must_use]
    pub fn new(points: Vec<Point3>, direction: Vector3) -> Self {
        Self { points, direction }
    }

    /// Executes the extrusion, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the direction is zero-length,
    /// fewer than three points are given, or the direction lies in the
    /// polygon's plane; geometry errors propagate from face construction.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.direction.norm() < TOLERANCE {
            return Err(
                OperationError::InvalidInput("extrude direction must be non-zero".into()).into(),
            );
        }
        if self.points.len() < 3 {
            return Err(
                OperationError::InvalidInput("a prism base needs at least 3 points".into()).into(),
            );
        }

        // Wind the base counter-clockwise about the direction so the top cap
        // keeps the base order and every side quad faces outward.
        let normal = newell_normal(&self.points)?;
        let alignment = normal.dot(&self.direction);
        if alignment.abs() < TOLERANCE {
            return Err(OperationError::InvalidInput(
                "extrude direction lies in the base plane".into(),
            )
            .into());
        }
        let base_points: Vec<Point3> = if alignment > 0.0 {
            self.points.clone()
        } else {
            self.points.iter().rev().copied().collect()
        };

        let n = base_points.len();
        let base: Vec<_> = base_points
            .iter()
            .map(|&p| store.add_vertex(VertexData::new(p)))
            .collect();
        let top: Vec<_> = base_points
            .iter()
            .map(|&p| store.add_vertex(VertexData::new(p + self.direction)))
            .collect();

        let base_edges = ring_edges(store, &base)?;
        let top_edges = ring_edges(store, &top)?;
        let mut rails = Vec::with_capacity(n);
        for i in 0..n {
            rails.push(MakeEdge::new(base[i], top[i]).execute(store)?);
        }

        let mut faces = Vec::with_capacity(n + 2);

        let bottom: Vec<_> = base_edges
            .iter()
            .rev()
            .map(|&e| OrientedEdge::new(e, false))
            .collect();
        faces.push(face_from_edges(store, bottom)?);

        let cap: Vec<_> = top_edges.iter().map(|&e| OrientedEdge::new(e, true)).collect();
        faces.push(face_from_edges(store, cap)?);

        for i in 0..n {
            let j = (i + 1) % n;
            let side = vec![
                OrientedEdge::new(base_edges[i], true),
                OrientedEdge::new(rails[j], true),
                OrientedEdge::new(top_edges[i], false),
                OrientedEdge::new(rails[i], false),
            ];
            faces.push(face_from_edges(store, side)?);
        }

        let shell = MakeShell::new(faces).execute(store)?;
        MakeSolid::new(shell).execute(store)
    }
}

/// Creates the edges `v[i] -> v[i + 1]` of a closed vertex ring.
fn ring_edges(store: &mut TopologyStore, ring: &[VertexId]) -> Result<Vec<EdgeId>> {
    let n = ring.len();
    (0..n)
        .map(|i| MakeEdge::new(ring[i], ring[(i + 1) % n]).execute(store))
        .collect()
}

fn face_from_edges(store: &mut TopologyStore, edges: Vec<OrientedEdge>) -> Result<FaceId> {
    let wire = MakeWire::from_edges(edges).execute(store)?;
    MakeFace::new(wire, vec![]).execute(store)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::{IsValid, Volume};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_square() -> Vec<Point3> {
        vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)]
    }

    #[test]
    fn unit_cube_has_6_faces() {
        let mut store = TopologyStore::new();
        let solid = MakePrism::new(unit_square(), Vector3::z())
            .execute(&mut store)
            .unwrap();

        let faces = store.solid_faces(solid).unwrap();
        assert_eq!(faces.len(), 6);
        assert_eq!(store.solid_edges(solid).unwrap().len(), 12);
        assert_eq!(store.solid_vertices(solid).unwrap().len(), 8);
        assert!(IsValid::new(solid).execute(&store));
    }

    #[test]
    fn reversed_base_gives_the_same_solid() {
        let mut store = TopologyStore::new();
        let mut pts = unit_square();
        pts.reverse();
        let solid = MakePrism::new(pts, Vector3::new(0.0, 0.0, 2.0))
            .execute(&mut store)
            .unwrap();

        assert_relative_eq!(Volume::new(solid).execute(&store).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn downward_extrusion_keeps_outward_caps() {
        let mut store = TopologyStore::new();
        let solid = MakePrism::new(unit_square(), Vector3::new(0.0, 0.0, -0.5))
            .execute(&mut store)
            .unwrap();

        let faces = store.solid_faces(solid).unwrap();
        let base_normal = *store.face(faces[0]).unwrap().plane().plane_normal();
        let top_normal = *store.face(faces[1]).unwrap().plane().plane_normal();
        assert_relative_eq!(base_normal, Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(top_normal, -Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(Volume::new(solid).execute(&store).unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn in_plane_direction_is_rejected() {
        let mut store = TopologyStore::new();
        assert!(MakePrism::new(unit_square(), Vector3::x())
            .execute(&mut store)
            .is_err());
    }
}
