use crate::geometry::surface::Plane;

use super::wire::WireId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// The geometric surface associated with a face.
#[derive(Debug, Clone)]
pub enum FaceSurface {
    /// A planar surface.
    Plane(Plane),
}

/// Data associated with a topological face.
///
/// A face is a bounded region on a surface, defined by an outer wire and
/// optionally inner wires (holes). The outer wire winds counter-clockwise
/// about the outward normal, inner wires clockwise.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The geometric surface on which this face lies.
    pub surface: FaceSurface,
    /// The outer boundary wire.
    pub outer_wire: WireId,
    /// Inner boundary wires (holes, e.g. the mouths of marking pockets).
    pub inner_wires: Vec<WireId>,
    /// If `true`, the outward face normal agrees with the surface normal.
    pub same_sense: bool,
}

impl FaceData {
    /// Returns the supporting plane.
    #[must_use]
    pub fn plane(&self) -> &Plane {
        let FaceSurface::Plane(plane) = &self.surface;
        plane
    }
}
