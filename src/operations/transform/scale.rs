use crate::error::{OperationError, Result};
use crate::geometry::curve::Line;
use crate::math::Point3;
use crate::topology::{EdgeCurve, FaceSurface, SolidId, TopologyStore};

/// Scales a solid uniformly from a center point.
pub struct Scale {
    solid: SolidId,
    center: Point3,
    factor: f64,
}

impl Scale {
    /// Creates a new `Scale` operation.
    #[must_use]
    pub fn new(solid: SolidId, center: Point3, factor: f64) -> Self {
        Self {
            solid,
            center,
            factor,
        }
    }

    /// Executes the scaling, modifying the solid in-place.
    ///
    /// Moves every vertex, then rebuilds each edge line from its moved
    /// vertices and moves each face plane's origin. Plane directions are
    /// unchanged by a positive uniform scale. Entities of other solids that
    /// share these vertices see the move but keep their old curves.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidParameter`] if the factor is not a
    /// positive finite number, or an error if any topology entity is missing.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        if !(self.factor.is_finite() && self.factor > 0.0) {
            return Err(OperationError::InvalidParameter {
                name: "factor",
                value: self.factor,
            }
            .into());
        }

        for vid in store.solid_vertices(self.solid)? {
            let vertex = store.vertex_mut(vid)?;
            vertex.point = self.apply(&vertex.point);
        }

        for edge_id in store.solid_edges(self.solid)? {
            let edge = store.edge(edge_id)?;
            let start = store.vertex(edge.start)?.point;
            let end = store.vertex(edge.end)?.point;
            let (line, t_end) = Line::through(start, end)?;

            let edge = store.edge_mut(edge_id)?;
            edge.curve = EdgeCurve::Line(line);
            edge.t_start = 0.0;
            edge.t_end = t_end;
        }

        for face_id in store.solid_faces(self.solid)?.to_vec() {
            let face = store.face_mut(face_id)?;
            let FaceSurface::Plane(plane) = &face.surface;
            let scaled = plane.with_origin(self.apply(plane.origin()));
            face.surface = FaceSurface::Plane(scaled);
        }

        Ok(())
    }

    fn apply(&self, point: &Point3) -> Point3 {
        self.center + (point - self.center) * self.factor
    }
}
