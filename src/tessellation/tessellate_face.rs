use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TessellationError};
use crate::geometry::Surface;
use crate::math::{Point2, Point3};
use crate::topology::{FaceId, TopologyStore};

use super::TriangleMesh;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Tessellates a planar face, holes included, into a triangle mesh.
pub struct TessellateFace {
    face: FaceId,
}

impl TessellateFace {
    /// Creates a new `TessellateFace` operation.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the tessellation, returning a triangle mesh.
    ///
    /// The boundary loops are inserted as constraints of a Delaunay
    /// triangulation in the face's plane coordinates; triangles enclosed by
    /// an odd number of loops are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the face cannot be read or a loop has fewer than
    /// three points.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self, store: &TopologyStore) -> Result<TriangleMesh> {
        let face = store.face(self.face)?;
        let plane = face.plane();
        let normal = plane.normal(0.0, 0.0)?;
        let normal = if face.same_sense { normal } else { -normal };
        let (outer, holes) = store.face_loops(self.face)?;

        let project = |p: &Point3| -> SpadePoint2<f64> {
            let uv = plane.project(p);
            SpadePoint2::new(uv.x, uv.y)
        };

        let mut cdt = Cdt::new();
        insert_constraint_loop(&mut cdt, &outer.iter().map(project).collect::<Vec<_>>())?;
        for hole in &holes {
            insert_constraint_loop(&mut cdt, &hole.iter().map(project).collect::<Vec<_>>())?;
        }

        let interior = classify_interior_faces(&cdt);

        let mut mesh = TriangleMesh::default();
        let mut vertex_map: HashMap<usize, u32> = HashMap::new();

        for face_handle in cdt.inner_faces() {
            if !interior.contains(&face_handle.fix().index()) {
                continue;
            }

            let mut tri = [0u32; 3];
            for (slot, vh) in tri.iter_mut().zip(face_handle.vertices().iter()) {
                let key = vh.fix().index();
                *slot = match vertex_map.get(&key) {
                    Some(&index) => index,
                    None => {
                        let pos = vh.position();
                        mesh.vertices.push(plane.evaluate(pos.x, pos.y)?);
                        mesh.normals.push(normal);
                        mesh.uvs.push(Point2::new(pos.x, pos.y));
                        let index = (mesh.vertices.len() - 1) as u32;
                        vertex_map.insert(key, index);
                        index
                    }
                };
            }

            // spade faces are counter-clockwise in (u, v), which is
            // counter-clockwise about the plane normal.
            if !face.same_sense {
                tri.swap(1, 2);
            }
            mesh.indices.push(tri);
        }

        if mesh.indices.is_empty() {
            return Err(TessellationError::Failed("face produced no triangles".into()).into());
        }

        Ok(mesh)
    }
}

fn insert_constraint_loop(cdt: &mut Cdt, points: &[SpadePoint2<f64>]) -> Result<()> {
    if points.len() < 3 {
        return Err(
            TessellationError::Failed("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles = Vec::with_capacity(points.len());
    for &pt in points {
        let h = cdt
            .insert(pt)
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for (i, &from) in handles.iter().enumerate() {
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }

    Ok(())
}

/// Marks the triangles lying inside the constrained region.
///
/// Flood-fills from the convex hull; crossing a constraint edge increments
/// the depth and odd depths are interior.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let idx = inner.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, depth);
            if depth % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((inner.fix(), depth));
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        for edge in cdt.face(face_fix).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let idx = neighbor.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let next = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, next);
            if next % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((neighbor.fix(), next));
        }
    }

    interior
}
