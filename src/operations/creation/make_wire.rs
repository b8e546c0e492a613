use crate::error::{OperationError, Result, TopologyError};
#[cfg(test)]
use crate::math::Point3;
#[cfg(test)]
use crate::topology::VertexData;
use crate::topology::{OrientedEdge, TopologyStore, WireData, WireId};

#[cfg(test)]
use super::MakeEdge;

enum Source {
    #[cfg(test)]
    Points { points: Vec<Point3>, close: bool },
    Edges(Vec<OrientedEdge>),
}

/// Creates a face boundary wire from edges shared with neighbouring faces.
pub struct MakeWire {
    source: Source,
}

impl MakeWire {
    /// Creates a wire through `points`, building fresh vertices and edges.
    ///
    /// If `close` is set, a final edge returns to the first point. Test
    /// fixtures build standalone faces with it.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn new(points: Vec<Point3>, close: bool) -> Self {
        Self {
            source: Source::Points { points, close },
        }
    }

    /// Creates a closed wire from existing oriented edges.
    ///
    /// Used when neighbouring faces must share their edges.
    #[must_use]
    pub fn from_edges(edges: Vec<OrientedEdge>) -> Self {
        Self {
            source: Source::Edges(edges),
        }
    }

    /// Executes the operation, creating the wire in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for an empty edge list,
    /// [`TopologyError::InvalidTopology`] if consecutive edges do not meet and
    /// [`TopologyError::WireNotClosed`] if the loop does not return to its
    /// start.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<WireId> {
        match &self.source {
            #[cfg(test)]
            Source::Points { points, close } => build_from_points(store, points, *close),
            Source::Edges(edges) => build_from_edges(store, edges),
        }
    }
}

#[cfg(test)]
fn build_from_points(store: &mut TopologyStore, points: &[Point3], close: bool) -> Result<WireId> {
    if points.len() < 2 {
        return Err(OperationError::InvalidInput("a wire needs at least two points".into()).into());
    }

    let vertices: Vec<_> = points
        .iter()
        .map(|&p| store.add_vertex(VertexData::new(p)))
        .collect();

    let segment_count = if close { vertices.len() } else { vertices.len() - 1 };
    let mut edges = Vec::with_capacity(segment_count);
    for i in 0..segment_count {
        let next = (i + 1) % vertices.len();
        let edge = MakeEdge::new(vertices[i], vertices[next]).execute(store)?;
        edges.push(OrientedEdge::new(edge, true));
    }

    Ok(store.add_wire(WireData {
        edges,
        is_closed: close,
    }))
}

fn build_from_edges(store: &mut TopologyStore, edges: &[OrientedEdge]) -> Result<WireId> {
    let (Some(&first), Some(&last)) = (edges.first(), edges.last()) else {
        return Err(OperationError::InvalidInput("a wire needs at least one edge".into()).into());
    };

    for pair in edges.windows(2) {
        if store.oriented_end(pair[0])? != store.oriented_start(pair[1])? {
            return Err(
                TopologyError::InvalidTopology("consecutive wire edges do not meet".into()).into(),
            );
        }
    }
    if store.oriented_end(last)? != store.oriented_start(first)? {
        return Err(TopologyError::WireNotClosed.into());
    }

    Ok(store.add_wire(WireData {
        edges: edges.to_vec(),
        is_closed: true,
    }))
}
