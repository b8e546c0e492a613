use crate::geometry::curve::Line;

use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the topology store.
    pub struct EdgeId;
}

/// Curve under an edge. Polyhedron and pocket edges are all straight.
#[derive(Debug, Clone)]
pub enum EdgeCurve {
    Line(Line),
}

/// A straight segment between two vertices.
///
/// The line is parameterized by arc length from `start`, so `t_start` is 0
/// and `t_end` is the segment length. Two adjacent faces share one edge and
/// traverse it in opposite directions.
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub start: VertexId,
    pub end: VertexId,
    pub curve: EdgeCurve,
    pub t_start: f64,
    pub t_end: f64,
}
