use crate::error::{GeometryError, Result, TopologyError};
use crate::math::{LINEAR_TOLERANCE, TOLERANCE};
use crate::operations::creation::edge_uses;
use crate::geometry::Curve;
use crate::topology::{EdgeCurve, EdgeId, SolidId, TopologyStore, WireId};

use super::shell_volume;

/// Validates the topological and geometric consistency of a solid.
///
/// A valid solid has closed, connected boundary wires whose edge curves
/// pass through their vertices; every edge is used exactly once in each
/// direction; every boundary vertex lies on its face plane; the
/// Euler-Poincaré relation `V - E + F - H = 2` holds for its single
/// genus-zero shell (`H` counts face holes); and the enclosed volume is
/// positive.
pub struct IsValid {
    solid: SolidId,
}

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the validation, returning `true` if the solid is valid.
    #[must_use]
    pub fn execute(&self, store: &TopologyStore) -> bool {
        self.check(store).is_ok()
    }

    /// Runs the validation and reports the first violation found.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidTopology`] for broken wires or a failed
    /// Euler check, [`TopologyError::NonManifold`] for unpaired edges or a
    /// non-positive volume, and [`GeometryError::DegenerateFace`] for
    /// vertices off their face plane.
    pub fn check(&self, store: &TopologyStore) -> Result<()> {
        let faces = store.solid_faces(self.solid)?;

        let mut hole_count = 0usize;
        for &face_id in faces {
            let face = store.face(face_id)?;
            hole_count += face.inner_wires.len();
            let plane = face.plane();

            for wire_id in std::iter::once(face.outer_wire).chain(face.inner_wires.iter().copied()) {
                check_wire(store, wire_id)?;
                for p in store.wire_points(wire_id)? {
                    let distance = plane.signed_distance(&p);
                    let tolerance = LINEAR_TOLERANCE * (p - plane.origin()).norm().max(1.0);
                    if distance.abs() > tolerance {
                        return Err(GeometryError::DegenerateFace(format!(
                            "vertex is {distance:.3e} off its face plane"
                        ))
                        .into());
                    }
                }
            }
        }

        for (forward, backward) in edge_uses(store, faces)?.into_values() {
            if forward != 1 || backward != 1 {
                return Err(TopologyError::NonManifold(format!(
                    "edge used {forward} times forward and {backward} times backward"
                ))
                .into());
            }
        }

        let v = store.solid_vertices(self.solid)?.len();
        let e = store.solid_edges(self.solid)?.len();
        let f = faces.len();
        if v + f != e + hole_count + 2 {
            return Err(TopologyError::InvalidTopology(format!(
                "Euler characteristic check failed: V={v} E={e} F={f} H={hole_count}"
            ))
            .into());
        }

        let solid = store.solid(self.solid)?;
        let volume = shell_volume(store, solid.shell)?;
        if volume <= TOLERANCE {
            return Err(
                TopologyError::NonManifold(format!("enclosed volume is {volume:.3e}")).into(),
            );
        }

        Ok(())
    }
}

fn check_wire(store: &TopologyStore, wire_id: WireId) -> Result<()> {
    let wire = store.wire(wire_id)?;
    if !wire.is_closed || wire.edges.is_empty() {
        return Err(TopologyError::WireNotClosed.into());
    }
    let n = wire.edges.len();
    for i in 0..n {
        let next = wire.edges[(i + 1) % n];
        if store.oriented_end(wire.edges[i])? != store.oriented_start(next)? {
            return Err(
                TopologyError::InvalidTopology("consecutive wire edges do not meet".into()).into(),
            );
        }
        check_edge_curve(store, wire.edges[i].edge)?;
    }
    Ok(())
}

/// The edge's line must pass through its vertices at its end parameters.
fn check_edge_curve(store: &TopologyStore, edge_id: EdgeId) -> Result<()> {
    let edge = store.edge(edge_id)?;
    let EdgeCurve::Line(line) = &edge.curve;
    for (t, vertex) in [(edge.t_start, edge.start), (edge.t_end, edge.end)] {
        let expected = store.vertex(vertex)?.point;
        let gap = (line.evaluate(t)? - expected).norm();
        if gap > LINEAR_TOLERANCE * expected.coords.norm().max(1.0) {
            return Err(TopologyError::InvalidTopology(format!(
                "edge curve misses its vertex by {gap:.3e}"
            ))
            .into());
        }
    }
    Ok(())
}
