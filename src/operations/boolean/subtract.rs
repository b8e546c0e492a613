use tracing::{debug, instrument};

use crate::error::{OperationError, Result};
use crate::geometry::surface::Plane;
use crate::math::polygon_2d::{
    distance_to_boundary, point_in_polygon_2d, polygons_overlap, segments_intersect_2d,
};
use crate::math::polygon_3d::{point_in_polygon_3d, project_loop};
use crate::math::{centroid, Point2, Point3, Vector3, LINEAR_TOLERANCE};
use crate::operations::creation::{MakeEdge, MakeFace, MakeShell, MakeSolid, MakeWire};
use crate::topology::{FaceData, FaceId, OrientedEdge, SolidId, TopologyStore, VertexData};

use super::{classify_point_in_solid, PointClassification};

/// Cosine tolerance for parallel and perpendicular face normals.
const ANGULAR_TOLERANCE: f64 = 1e-9;

/// Subtracts a right-prism cutter from a solid, leaving a pocket.
///
/// The cutter `B` must have exactly two caps parallel to one planar face `F`
/// of `A`, one above and one below `F`'s plane, with every other face
/// perpendicular to it. Its cross-section must lie strictly inside `F`'s
/// outer boundary, clear of `F`'s existing holes, and its floor must lie
/// inside `A`.
///
/// The result is a new solid in the same store. `F` is replaced, at the same
/// shell position, by a copy carrying a new hole; the pocket walls and floor
/// are appended after the original faces. `A` and `B` are left untouched.
pub struct Subtract {
    solid_a: SolidId,
    solid_b: SolidId,
}

/// A face of `A` crossed by the cutter, with the cutter floor wound
/// counter-clockwise about the face's outward normal.
struct PocketSite {
    shell_index: usize,
    face: FaceId,
    plane: Plane,
    normal: Vector3,
    floor: Vec<Point3>,
}

impl Subtract {
    /// Creates a new `Subtract` operation (A - B).
    #[must_use]
    pub fn new(solid_a: SolidId, solid_b: SolidId) -> Self {
        Self { solid_a, solid_b }
    }

    /// Executes the subtraction, creating the result solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Failed`] if the cutter is not a right prism
    /// crossing exactly one face of `A`, its section touches the face boundary
    /// or an existing hole, or its floor leaves `A`.
    #[instrument(skip(self, store), fields(a = ?self.solid_a, b = ?self.solid_b))]
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        let site = find_pocket_site(store, self.solid_a, self.solid_b)?;
        check_section(store, &site)?;

        for p in &site.floor {
            if classify_point_in_solid(p, self.solid_a, store)? != PointClassification::Inside {
                return Err(OperationError::Failed("pocket floor leaves the solid".into()).into());
            }
        }

        let result = build_pocket(store, self.solid_a, &site)?;
        debug!(
            face = site.shell_index + 1,
            sides = site.floor.len(),
            depth = -site.plane.signed_distance(&site.floor[0]),
            "cut pocket"
        );
        Ok(result)
    }
}

fn outward_normal(face: &FaceData) -> Vector3 {
    let normal = *face.plane().plane_normal();
    if face.same_sense {
        normal
    } else {
        -normal
    }
}

fn find_pocket_site(store: &TopologyStore, a: SolidId, b: SolidId) -> Result<PocketSite> {
    let mut cutter = Vec::new();
    for &face_id in store.solid_faces(b)? {
        let face = store.face(face_id)?;
        if !face.inner_wires.is_empty() {
            return Err(OperationError::Failed("cutter faces must not have holes".into()).into());
        }
        cutter.push((outward_normal(face), store.wire_points(face.outer_wire)?));
    }

    let mut sites = Vec::new();
    for (shell_index, &face_id) in store.solid_faces(a)?.iter().enumerate() {
        let face = store.face(face_id)?;
        let normal = outward_normal(face);
        let plane = face.plane();

        let mut top = None;
        let mut floor = None;
        let mut prismatic = true;
        for (m, points) in &cutter {
            let alignment = normal.dot(m);
            if alignment > 1.0 - ANGULAR_TOLERANCE && top.is_none() {
                top = Some(points);
            } else if alignment < -1.0 + ANGULAR_TOLERANCE && floor.is_none() {
                floor = Some(points);
            } else if alignment.abs() > ANGULAR_TOLERANCE {
                prismatic = false;
                break;
            }
        }

        let (Some(top), Some(floor), true) = (top, floor, prismatic) else {
            continue;
        };
        let above = plane.signed_distance(&top[0]) > LINEAR_TOLERANCE;
        let below = plane.signed_distance(&floor[0]) < -LINEAR_TOLERANCE;
        // Parallel walls of earlier pockets can also slice the cutter; only
        // the face the cutter sits over counts.
        let over_face = above
            && below
            && point_in_polygon_3d(&centroid(floor), &store.wire_points(face.outer_wire)?, plane);
        if over_face {
            sites.push(PocketSite {
                shell_index,
                face: face_id,
                plane: plane.clone(),
                normal,
                // The cutter's floor cap winds about -normal.
                floor: floor.iter().rev().copied().collect(),
            });
        }
    }

    if sites.len() != 1 {
        return Err(OperationError::Failed(format!(
            "cutter must cross exactly one planar face, found {}",
            sites.len()
        ))
        .into());
    }
    Ok(sites.swap_remove(0))
}

/// Checks that the cutter's section sits strictly inside the face and clear
/// of its holes.
fn check_section(store: &TopologyStore, site: &PocketSite) -> Result<()> {
    let (outer, holes) = store.face_loops(site.face)?;
    let outer_2d = project_loop(&outer, &site.plane);
    let section = project_loop(&site.floor, &site.plane);

    let inside = section.iter().all(|p| {
        point_in_polygon_2d(p, &outer_2d) && distance_to_boundary(p, &outer_2d) > LINEAR_TOLERANCE
    });
    if !inside || loops_cross(&section, &outer_2d) {
        return Err(
            OperationError::Failed("cutter section is not inside the face".into()).into(),
        );
    }

    for hole in &holes {
        if polygons_overlap(&section, &project_loop(hole, &site.plane)) {
            return Err(
                OperationError::Failed("cutter overlaps an existing pocket".into()).into(),
            );
        }
    }
    Ok(())
}

fn loops_cross(a: &[Point2], b: &[Point2]) -> bool {
    let (na, nb) = (a.len(), b.len());
    (0..na).any(|i| {
        (0..nb).any(|j| segments_intersect_2d(&a[i], &a[(i + 1) % na], &b[j], &b[(j + 1) % nb]))
    })
}

/// Builds the pocket: hole ring `s` on the face plane, floor ring `b` below,
/// wall quads `[s_i, s_i+1, b_i+1, b_i]` facing into the pocket.
fn build_pocket(store: &mut TopologyStore, a: SolidId, site: &PocketSite) -> Result<SolidId> {
    let n = site.floor.len();
    let rim: Vec<_> = site
        .floor
        .iter()
        .map(|p| {
            let lifted = p - site.normal * site.plane.signed_distance(p);
            store.add_vertex(VertexData::new(lifted))
        })
        .collect();
    let bottom: Vec<_> = site
        .floor
        .iter()
        .map(|&p| store.add_vertex(VertexData::new(p)))
        .collect();

    let mut rim_edges = Vec::with_capacity(n);
    let mut floor_edges = Vec::with_capacity(n);
    let mut rails = Vec::with_capacity(n);
    for i in 0..n {
        let j = (i + 1) % n;
        rim_edges.push(MakeEdge::new(rim[i], rim[j]).execute(store)?);
        floor_edges.push(MakeEdge::new(bottom[i], bottom[j]).execute(store)?);
        rails.push(MakeEdge::new(rim[i], bottom[i]).execute(store)?);
    }

    // The hole runs clockwise about the outward normal.
    let hole = MakeWire::from_edges(
        rim_edges
            .iter()
            .rev()
            .map(|&e| OrientedEdge::new(e, false))
            .collect(),
    )
    .execute(store)?;

    let mut cut_face = store.face(site.face)?.clone();
    cut_face.inner_wires.push(hole);
    let cut_face = store.add_face(cut_face);

    let mut faces = store.solid_faces(a)?.to_vec();
    faces[site.shell_index] = cut_face;

    for i in 0..n {
        let j = (i + 1) % n;
        let wall = MakeWire::from_edges(vec![
            OrientedEdge::new(rim_edges[i], true),
            OrientedEdge::new(rails[j], true),
            OrientedEdge::new(floor_edges[i], false),
            OrientedEdge::new(rails[i], false),
        ])
        .execute(store)?;
        faces.push(MakeFace::new(wall, vec![]).execute(store)?);
    }

    let floor = MakeWire::from_edges(
        floor_edges
            .iter()
            .map(|&e| OrientedEdge::new(e, true))
            .collect(),
    )
    .execute(store)?;
    faces.push(MakeFace::new(floor, vec![]).execute(store)?);

    let shell = MakeShell::new(faces).execute(store)?;
    MakeSolid::new(shell).execute(store)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PolydiceError;
    use crate::math::polygon_2d::regular_polygon;
    use crate::operations::creation::MakePrism;
    use crate::operations::query::{IsValid, Volume};
    use crate::tessellation::TessellateSolid;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn make_box(store: &mut TopologyStore) -> SolidId {
        MakePrism::new(
            vec![p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(4.0, 4.0, 0.0), p(0.0, 4.0, 0.0)],
            Vector3::new(0.0, 0.0, 4.0),
        )
        .execute(store)
        .unwrap()
    }

    /// A square cutter of side `2 * half` centred at `(cx, cy)`, spanning
    /// `z_top` down to `z_bottom`.
    fn square_cutter(
        store: &mut TopologyStore,
        (cx, cy): (f64, f64),
        half: f64,
        z_top: f64,
        z_bottom: f64,
    ) -> SolidId {
        let base = vec![
            p(cx - half, cy - half, z_top),
            p(cx + half, cy - half, z_top),
            p(cx + half, cy + half, z_top),
            p(cx - half, cy + half, z_top),
        ];
        MakePrism::new(base, Vector3::new(0.0, 0.0, z_bottom - z_top))
            .execute(store)
            .unwrap()
    }

    #[test]
    fn square_pocket_in_top_face() {
        let mut store = TopologyStore::new();
        let block = make_box(&mut store);
        let cutter = square_cutter(&mut store, (2.0, 2.0), 0.5, 4.5, 3.0);

        let result = Subtract::new(block, cutter).execute(&mut store).unwrap();

        assert!(IsValid::new(result).execute(&store));
        assert_relative_eq!(Volume::new(result).execute(&store).unwrap(), 63.0, epsilon = 1e-9);
        let faces = store.solid_faces(result).unwrap();
        assert_eq!(faces.len(), 6 + 4 + 1);
        // Face order survives: the top cap keeps its index and gains a hole.
        let top = store.face(faces[1]).unwrap();
        assert_eq!(top.inner_wires.len(), 1);
        // The operands are untouched.
        assert_relative_eq!(Volume::new(block).execute(&store).unwrap(), 64.0, epsilon = 1e-9);
    }

    #[test]
    fn pocket_walls_face_the_pocket_axis() {
        let mut store = TopologyStore::new();
        let block = make_box(&mut store);
        let cutter = square_cutter(&mut store, (2.0, 2.0), 0.5, 4.5, 3.0);
        let result = Subtract::new(block, cutter).execute(&mut store).unwrap();

        let faces = store.solid_faces(result).unwrap().to_vec();
        for &wall in &faces[6..10] {
            let face = store.face(wall).unwrap();
            let to_axis = p(2.0, 2.0, face.plane().origin().z) - face.plane().origin();
            assert!(face.plane().plane_normal().dot(&to_axis) > 0.0);
        }
        let floor = store.face(faces[10]).unwrap();
        assert_relative_eq!(*floor.plane().plane_normal(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn successive_pockets_share_a_face() {
        let mut store = TopologyStore::new();
        let block = make_box(&mut store);
        let c1 = square_cutter(&mut store, (1.0, 1.0), 0.4, 4.5, 3.5);
        let c2 = square_cutter(&mut store, (3.0, 3.0), 0.4, 4.5, 3.5);

        let once = Subtract::new(block, c1).execute(&mut store).unwrap();
        let twice = Subtract::new(once, c2).execute(&mut store).unwrap();

        assert!(IsValid::new(twice).execute(&store));
        let top = store.face(store.solid_faces(twice).unwrap()[1]).unwrap();
        assert_eq!(top.inner_wires.len(), 2);
        let expected = 64.0 - 2.0 * 0.8 * 0.8 * 0.5;
        let exact = Volume::new(twice).execute(&store).unwrap();
        assert_relative_eq!(exact, expected, epsilon = 1e-9);
        let mesh = TessellateSolid::new(twice).execute(&store).unwrap();
        assert_relative_eq!(mesh.signed_volume(), exact, epsilon = 1e-9);
    }

    #[test]
    fn hexagonal_pocket_in_side_face() {
        let mut store = TopologyStore::new();
        let block = make_box(&mut store);
        // A hexagon in the x = 4 face, cut 0.5 deep along -x.
        let base: Vec<_> = regular_polygon(0.6, 6, 0.0)
            .iter()
            .map(|q| p(4.2, 2.0 + q.x, 2.0 + q.y))
            .collect();
        let cutter = MakePrism::new(base, Vector3::new(-0.7, 0.0, 0.0))
            .execute(&mut store)
            .unwrap();

        let result = Subtract::new(block, cutter).execute(&mut store).unwrap();
        assert!(IsValid::new(result).execute(&store));
        let hex_area = 1.5 * 3.0_f64.sqrt() * 0.36;
        assert_relative_eq!(
            Volume::new(result).execute(&store).unwrap(),
            64.0 - hex_area * 0.5,
            epsilon = 1e-9
        );
    }

    #[test]
    fn overlapping_pockets_are_rejected() {
        let mut store = TopologyStore::new();
        let block = make_box(&mut store);
        let c1 = square_cutter(&mut store, (2.0, 2.0), 0.5, 4.5, 3.0);
        let c2 = square_cutter(&mut store, (2.5, 2.0), 0.5, 4.5, 3.0);

        let once = Subtract::new(block, c1).execute(&mut store).unwrap();
        let result = Subtract::new(once, c2).execute(&mut store);
        assert!(matches!(
            result,
            Err(PolydiceError::Operation(OperationError::Failed(_)))
        ));
    }

    #[test]
    fn cutter_reaching_the_edge_is_rejected() {
        let mut store = TopologyStore::new();
        let block = make_box(&mut store);
        let cutter = square_cutter(&mut store, (3.8, 2.0), 0.5, 4.5, 3.0);
        assert!(Subtract::new(block, cutter).execute(&mut store).is_err());
    }

    #[test]
    fn cutter_not_crossing_a_face_is_rejected() {
        let mut store = TopologyStore::new();
        let block = make_box(&mut store);
        let floating = square_cutter(&mut store, (2.0, 2.0), 0.5, 6.0, 5.0);
        assert!(Subtract::new(block, floating).execute(&mut store).is_err());
    }

    #[test]
    fn cutter_through_the_solid_is_rejected() {
        let mut store = TopologyStore::new();
        let block = make_box(&mut store);
        let through = square_cutter(&mut store, (2.0, 2.0), 0.5, 4.5, -1.0);
        assert!(Subtract::new(block, through).execute(&mut store).is_err());
    }
}
