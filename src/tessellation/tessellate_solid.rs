use crate::error::Result;
use crate::topology::{SolidId, TopologyStore};

use super::{TessellateFace, TriangleMesh};

/// Tessellates all faces of a solid into a combined triangle mesh.
pub struct TessellateSolid {
    solid: SolidId,
}

impl TessellateSolid {
    /// Creates a new `TessellateSolid` operation.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the tessellation, returning a combined triangle mesh.
    ///
    /// Faces are emitted in shell order and do not share mesh vertices, so
    /// each face keeps its own flat normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or any of its faces cannot be tessellated.
    pub fn execute(&self, store: &TopologyStore) -> Result<TriangleMesh> {
        let mut combined = TriangleMesh::default();
        for &face_id in store.solid_faces(self.solid)? {
            let face_mesh = TessellateFace::new(face_id).execute(store)?;
            combined.merge(&face_mesh);
        }
        Ok(combined)
    }
}
