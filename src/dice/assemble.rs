use std::collections::HashMap;

use tracing::{info, instrument};

use crate::error::{OperationError, Result};
use crate::math::{centroid, Point3};
use crate::operations::creation::{MakeEdge, MakeFace, MakeShell, MakeSolid, MakeWire};
use crate::topology::{EdgeId, OrientedEdge, TopologyStore, VertexData};

use super::polyhedron::TopologyTable;
use super::solid::Solid;

/// Builds a watertight solid from a vertex list and a face table.
///
/// The table is validated first. Each undirected vertex pair gets one edge,
/// traversed forward by one face and backward by its neighbour. Shell face
/// order follows the table, so face number `n` is shell face `n - 1`.
///
/// # Errors
///
/// Returns a topology error for a malformed table or a wire that does not
/// close, [`crate::error::GeometryError::DegenerateFace`] for a face that is
/// not planar or has no area, and [`crate::error::TopologyError::NonManifold`]
/// if the faces do not bound a positive volume.
#[instrument(skip(vertices, table), fields(vertices = vertices.len(), faces = table.face_count()))]
pub fn assemble(vertices: &[Point3], table: &TopologyTable) -> Result<Solid> {
    table.validate(vertices.len())?;
    let face_count = u32::try_from(table.face_count())
        .map_err(|_| OperationError::InvalidInput("too many faces".into()))?;

    let mut store = TopologyStore::new();
    let vertex_ids: Vec<_> = vertices
        .iter()
        .map(|&p| store.add_vertex(VertexData::new(p)))
        .collect();

    let mut edges: HashMap<(usize, usize), EdgeId> = HashMap::new();
    let mut faces = Vec::with_capacity(table.face_count());
    for face in table.faces() {
        let mut loop_edges = Vec::with_capacity(face.len());
        for i in 0..face.len() {
            let (a, b) = (face[i], face[(i + 1) % face.len()]);
            let key = (a.min(b), a.max(b));
            let edge = match edges.get(&key) {
                Some(&edge) => edge,
                None => {
                    let edge = MakeEdge::new(vertex_ids[key.0], vertex_ids[key.1]).execute(&mut store)?;
                    edges.insert(key, edge);
                    edge
                }
            };
            loop_edges.push(OrientedEdge::new(edge, a < b));
        }

        let wire = MakeWire::from_edges(loop_edges).execute(&mut store)?;
        faces.push(MakeFace::new(wire, vec![]).execute(&mut store)?);
    }

    let shell = MakeShell::new(faces).execute(&mut store)?;
    let id = MakeSolid::new(shell).execute(&mut store)?;

    let center = centroid(vertices);
    let circumradius = vertices
        .iter()
        .map(|p| (p - center).norm())
        .fold(0.0_f64, f64::max);

    info!(edges = edges.len(), circumradius, "assembled polyhedron");
    Ok(Solid::new(store, id, face_count, center, circumradius))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dice::polyhedron::{cube_vertices, icosahedron_vertices, Polyhedron};
    use crate::error::{GeometryError, PolydiceError, TopologyError};
    use approx::assert_relative_eq;

    #[test]
    fn icosahedron_is_closed_and_valid() {
        let solid = assemble(&icosahedron_vertices(), &TopologyTable::icosahedron()).unwrap();

        assert!(solid.is_valid());
        assert_eq!(solid.faces().unwrap().len(), 20);
        assert_eq!(solid.store().solid_edges(solid.id()).unwrap().len(), 30);
        assert_eq!(solid.vertices().unwrap().len(), 12);
        assert_relative_eq!(
            solid.circumradius(),
            Polyhedron::Icosahedron.nominal_radius(),
            epsilon = 1e-12
        );
        // Regular icosahedron with edge a = 2: V = 5/12 (3 + √5) a³.
        let expected = 5.0 / 12.0 * (3.0 + 5.0_f64.sqrt()) * 8.0;
        assert_relative_eq!(solid.volume().unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn cube_is_closed_and_valid() {
        let solid = assemble(&cube_vertices(), &TopologyTable::cube()).unwrap();
        assert!(solid.is_valid());
        assert_eq!(solid.faces().unwrap().len(), 6);
        assert_relative_eq!(solid.volume().unwrap(), 8.0, epsilon = 1e-12);
        assert_relative_eq!(solid.center(), Point3::origin(), epsilon = 1e-12);
    }

    #[test]
    fn inward_winding_encloses_no_volume() {
        let faces = TopologyTable::cube()
            .faces()
            .iter()
            .map(|f| f.iter().rev().copied().collect())
            .collect();
        let table = TopologyTable::new(faces, 7);

        let result = assemble(&cube_vertices(), &table);
        assert!(matches!(
            result,
            Err(PolydiceError::Topology(TopologyError::NonManifold(_)))
        ));
    }

    #[test]
    fn warped_corner_is_degenerate() {
        let mut vertices = cube_vertices();
        vertices[6].z += 0.25;
        let result = assemble(&vertices, &TopologyTable::cube());
        assert!(matches!(
            result,
            Err(PolydiceError::Geometry(GeometryError::DegenerateFace(_)))
        ));
    }

    #[test]
    fn short_vertex_list_is_invalid_topology() {
        let vertices = icosahedron_vertices();
        let result = assemble(&vertices[..11], &TopologyTable::icosahedron());
        assert!(matches!(
            result,
            Err(PolydiceError::Topology(TopologyError::InvalidTopology(_)))
        ));
    }
}
