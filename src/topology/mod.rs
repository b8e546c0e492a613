pub mod edge;
pub mod face;
pub mod shell;
pub mod solid;
pub mod vertex;
pub mod wire;

pub use edge::{EdgeCurve, EdgeData, EdgeId};
pub use face::{FaceData, FaceId, FaceSurface};
pub use shell::{ShellData, ShellId};
pub use solid::{SolidData, SolidId};
pub use vertex::{VertexData, VertexId};
pub use wire::{OrientedEdge, WireData, WireId};

use std::collections::HashSet;

use crate::error::TopologyError;
use crate::math::Point3;
use slotmap::SlotMap;

/// Central arena that owns all topological entities.
///
/// Entities reference each other via typed IDs (generational indices),
/// avoiding self-referential structures. Operations that derive a new solid
/// add entities and leave the ones they replaced in place, so older IDs stay
/// readable until the store is dropped.
#[derive(Debug, Default, Clone)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    wires: SlotMap<WireId, WireData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
    solids: SlotMap<SolidId, SolidData>,
}

fn not_found(kind: &str) -> TopologyError {
    TopologyError::EntityNotFound(kind.into())
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices.get(id).ok_or_else(|| not_found("vertex"))
    }

    /// Returns a mutable reference to the vertex data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexData, TopologyError> {
        self.vertices.get_mut(id).ok_or_else(|| not_found("vertex"))
    }

    // --- Edge operations ---

    /// Inserts an edge and returns its ID.
    pub fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        self.edges.insert(data)
    }

    /// Returns a reference to the edge data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges.get(id).ok_or_else(|| not_found("edge"))
    }

    /// Returns a mutable reference to the edge data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut EdgeData, TopologyError> {
        self.edges.get_mut(id).ok_or_else(|| not_found("edge"))
    }

    // --- Wire operations ---

    /// Inserts a wire and returns its ID.
    pub fn add_wire(&mut self, data: WireData) -> WireId {
        self.wires.insert(data)
    }

    /// Returns a reference to the wire data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn wire(&self, id: WireId) -> Result<&WireData, TopologyError> {
        self.wires.get(id).ok_or_else(|| not_found("wire"))
    }

    // --- Face operations ---

    /// Inserts a face and returns its ID.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    /// Returns a reference to the face data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces.get(id).ok_or_else(|| not_found("face"))
    }

    /// Returns a mutable reference to the face data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face_mut(&mut self, id: FaceId) -> Result<&mut FaceData, TopologyError> {
        self.faces.get_mut(id).ok_or_else(|| not_found("face"))
    }

    // --- Shell operations ---

    /// Inserts a shell and returns its ID.
    pub fn add_shell(&mut self, data: ShellData) -> ShellId {
        self.shells.insert(data)
    }

    /// Returns a reference to the shell data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn shell(&self, id: ShellId) -> Result<&ShellData, TopologyError> {
        self.shells.get(id).ok_or_else(|| not_found("shell"))
    }

    // --- Solid operations ---

    /// Inserts a solid and returns its ID.
    pub fn add_solid(&mut self, data: SolidData) -> SolidId {
        self.solids.insert(data)
    }

    /// Returns a reference to the solid data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, TopologyError> {
        self.solids.get(id).ok_or_else(|| not_found("solid"))
    }

    /// Number of solids in the store, live or superseded.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    /// Number of faces in the store, live or superseded.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Drops every entity the given solid does not reach.
    ///
    /// IDs of the kept entities stay valid. Cutter prisms and the solids a
    /// subtraction superseded are released this way.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or any entity it references is missing.
    pub fn retain_solid(&mut self, id: SolidId) -> Result<(), TopologyError> {
        let shell = self.solid(id)?.shell;
        let faces: HashSet<FaceId> = self.solid_faces(id)?.iter().copied().collect();
        let wires: HashSet<WireId> = self.solid_wires(id)?.into_iter().collect();
        let edges: HashSet<EdgeId> = self.solid_edges(id)?.into_iter().collect();
        let vertices: HashSet<VertexId> = self.solid_vertices(id)?.into_iter().collect();

        self.solids.retain(|k, _| k == id);
        self.shells.retain(|k, _| k == shell);
        self.faces.retain(|k, _| faces.contains(&k));
        self.wires.retain(|k, _| wires.contains(&k));
        self.edges.retain(|k, _| edges.contains(&k));
        self.vertices.retain(|k, _| vertices.contains(&k));
        Ok(())
    }

    // --- Traversal helpers ---

    /// Returns the vertex a wire edge starts from, honouring its orientation.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found.
    pub fn oriented_start(&self, oe: OrientedEdge) -> Result<VertexId, TopologyError> {
        let edge = self.edge(oe.edge)?;
        Ok(if oe.forward { edge.start } else { edge.end })
    }

    /// Returns the vertex a wire edge ends at, honouring its orientation.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found.
    pub fn oriented_end(&self, oe: OrientedEdge) -> Result<VertexId, TopologyError> {
        let edge = self.edge(oe.edge)?;
        Ok(if oe.forward { edge.end } else { edge.start })
    }

    /// Collects vertex positions of a wire in traversal order.
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced entity is missing.
    pub fn wire_points(&self, id: WireId) -> Result<Vec<Point3>, TopologyError> {
        let wire = self.wire(id)?;
        let mut points = Vec::with_capacity(wire.edges.len());
        for &oe in &wire.edges {
            points.push(self.vertex(self.oriented_start(oe)?)?.point);
        }
        Ok(points)
    }

    /// Returns the boundary loops of a face: the outer loop, then the holes.
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced entity is missing.
    pub fn face_loops(&self, id: FaceId) -> Result<(Vec<Point3>, Vec<Vec<Point3>>), TopologyError> {
        let face = self.face(id)?;
        let outer = self.wire_points(face.outer_wire)?;
        let holes = face
            .inner_wires
            .iter()
            .map(|&w| self.wire_points(w))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((outer, holes))
    }

    /// Returns the faces of a solid's outer shell in shell order.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or its shell is missing.
    pub fn solid_faces(&self, id: SolidId) -> Result<&[FaceId], TopologyError> {
        let solid = self.solid(id)?;
        Ok(&self.shell(solid.shell)?.faces)
    }

    /// Returns every wire bounding the faces of a solid.
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced entity is missing.
    pub fn solid_wires(&self, id: SolidId) -> Result<Vec<WireId>, TopologyError> {
        let mut wires = Vec::new();
        for &face_id in self.solid_faces(id)? {
            let face = self.face(face_id)?;
            wires.push(face.outer_wire);
            wires.extend_from_slice(&face.inner_wires);
        }
        Ok(wires)
    }

    /// Returns the distinct edges of a solid, in first-use order.
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced entity is missing.
    pub fn solid_edges(&self, id: SolidId) -> Result<Vec<EdgeId>, TopologyError> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for wire_id in self.solid_wires(id)? {
            for oe in &self.wire(wire_id)?.edges {
                if seen.insert(oe.edge) {
                    edges.push(oe.edge);
                }
            }
        }
        Ok(edges)
    }

    /// Returns the distinct vertices of a solid, in first-use order.
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced entity is missing.
    pub fn solid_vertices(&self, id: SolidId) -> Result<Vec<VertexId>, TopologyError> {
        let mut seen = HashSet::new();
        let mut vertices = Vec::new();
        for edge_id in self.solid_edges(id)? {
            let edge = self.edge(edge_id)?;
            for v in [edge.start, edge.end] {
                if seen.insert(v) {
                    vertices.push(v);
                }
            }
        }
        Ok(vertices)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::operations::boolean::Subtract;
    use crate::operations::creation::MakePrism;
    use crate::operations::query::IsValid;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn square(min: f64, max: f64, z: f64) -> Vec<Point3> {
        vec![p(min, min, z), p(max, min, z), p(max, max, z), p(min, max, z)]
    }

    #[test]
    fn retain_solid_drops_cutter_and_superseded_solid() {
        let mut store = TopologyStore::new();
        let block = MakePrism::new(square(0.0, 4.0, 0.0), Vector3::z() * 4.0)
            .execute(&mut store)
            .unwrap();
        let cutter = MakePrism::new(square(1.0, 3.0, 4.5), Vector3::z() * -1.5)
            .execute(&mut store)
            .unwrap();
        let pocketed = Subtract::new(block, cutter).execute(&mut store).unwrap();
        assert_eq!(store.solid_count(), 3);

        store.retain_solid(pocketed).unwrap();
        assert_eq!(store.solid_count(), 1);
        assert_eq!(store.face_count(), store.solid_faces(pocketed).unwrap().len());
        assert!(store.solid(block).is_err());
        assert!(store.solid(cutter).is_err());
        assert!(IsValid::new(pocketed).execute(&store));
    }
}
