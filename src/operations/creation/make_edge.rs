use crate::error::Result;
use crate::geometry::curve::Line;
use crate::topology::{EdgeCurve, EdgeData, EdgeId, TopologyStore, VertexId};

/// Creates a straight edge between two existing vertices.
pub struct MakeEdge {
    start: VertexId,
    end: VertexId,
}

impl MakeEdge {
    /// Creates a new `MakeEdge` operation.
    #[must_use]
    pub fn new(start: VertexId, end: VertexId) -> Self {
        Self { start, end }
    }

    /// Executes the operation, creating the edge in the topology store.
    ///
    /// The line is parameterized by arc length from `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if either vertex is missing or the two vertices
    /// coincide.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<EdgeId> {
        let start_point = store.vertex(self.start)?.point;
        let end_point = store.vertex(self.end)?.point;
        let (line, t_end) = Line::through(start_point, end_point)?;

        Ok(store.add_edge(EdgeData {
            start: self.start,
            end: self.end,
            curve: EdgeCurve::Line(line),
            t_start: 0.0,
            t_end,
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::topology::VertexData;
    use approx::assert_relative_eq;

    #[test]
    fn edge_spans_its_vertices() {
        let mut store = TopologyStore::new();
        let a = store.add_vertex(VertexData::new(Point3::new(0.0, 0.0, 0.0)));
        let b = store.add_vertex(VertexData::new(Point3::new(0.0, 3.0, 4.0)));

        let edge = MakeEdge::new(a, b).execute(&mut store).unwrap();
        let data = store.edge(edge).unwrap();
        assert_eq!(data.start, a);
        assert_eq!(data.end, b);
        assert_relative_eq!(data.t_end, 5.0);
    }

    #[test]
    fn coincident_vertices_fail() {
        let mut store = TopologyStore::new();
        let a = store.add_vertex(VertexData::new(Point3::new(1.0, 1.0, 1.0)));
        let b = store.add_vertex(VertexData::new(Point3::new(1.0, 1.0, 1.0)));
        assert!(MakeEdge::new(a, b).execute(&mut store).is_err());
    }
}
