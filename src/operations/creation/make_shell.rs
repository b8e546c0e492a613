use std::collections::HashMap;

use crate::error::{Result, TopologyError};
use crate::topology::{EdgeId, FaceId, ShellData, ShellId, TopologyStore};

/// Collects faces into a shell.
///
/// The shell is closed when every edge is used exactly twice, once in each
/// direction. Face order is preserved.
pub struct MakeShell {
    faces: Vec<FaceId>,
}

impl MakeShell {
    /// Creates a new `MakeShell` operation.
    #[must_use]
    pub fn new(faces: Vec<FaceId>) -> Self {
        Self { faces }
    }

    /// Executes the operation, creating the shell in the topology store.
    ///
    /// An open shell (boundary edges used once) is accepted and recorded as
    /// not closed.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NonManifold`] if an edge is traversed twice in
    /// the same direction or used by more than two face boundaries.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<ShellId> {
        let uses = edge_uses(store, &self.faces)?;

        let mut is_closed = true;
        for &(forward, backward) in uses.values() {
            if forward > 1 || backward > 1 {
                return Err(TopologyError::NonManifold(format!(
                    "edge used {forward} times forward and {backward} times backward"
                ))
                .into());
            }
            if forward != 1 || backward != 1 {
                is_closed = false;
            }
        }

        Ok(store.add_shell(ShellData {
            faces: self.faces.clone(),
            is_closed,
        }))
    }
}

/// Counts forward and backward traversals of every edge bounding `faces`.
pub(crate) fn edge_uses(
    store: &TopologyStore,
    faces: &[FaceId],
) -> Result<HashMap<EdgeId, (u32, u32)>> {
    let mut uses: HashMap<EdgeId, (u32, u32)> = HashMap::new();
    for &face_id in faces {
        let face = store.face(face_id)?;
        for wire_id in std::iter::once(face.outer_wire).chain(face.inner_wires.iter().copied()) {
            for oe in &store.wire(wire_id)?.edges {
                let entry = uses.entry(oe.edge).or_default();
                if oe.forward {
                    entry.0 += 1;
                } else {
                    entry.1 += 1;
                }
            }
        }
    }
    Ok(uses)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PolydiceError;
    use crate::math::Point3;
    use crate::operations::creation::{MakeFace, MakeWire};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn lone_face_is_open() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)], true)
            .execute(&mut store)
            .unwrap();
        let face = MakeFace::new(wire, vec![]).execute(&mut store).unwrap();

        let shell = MakeShell::new(vec![face]).execute(&mut store).unwrap();
        assert!(!store.shell(shell).unwrap().is_closed);
    }

    #[test]
    fn same_face_twice_is_non_manifold() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)], true)
            .execute(&mut store)
            .unwrap();
        let face = MakeFace::new(wire, vec![]).execute(&mut store).unwrap();

        let result = MakeShell::new(vec![face, face]).execute(&mut store);
        assert!(matches!(
            result,
            Err(PolydiceError::Topology(TopologyError::NonManifold(_)))
        ));
    }
}
