use crate::error::Result;
use crate::geometry::surface::Plane;
use crate::math::intersect_3d::{line_plane_intersect, LinePlaneRelation};
use crate::math::polygon_3d::{classify_in_region, RegionClassification};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::{SolidId, TopologyStore};

/// Classification of a point relative to a solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
    OnBoundary,
}

/// Ray directions tried in turn. Off-axis so that rays from symmetric
/// points rarely graze edges of axis-aligned or icosahedral solids.
const RAY_DIRECTIONS: [[f64; 3]; 4] = [
    [0.577_215_66, 0.618_033_99, 0.533_589_24],
    [-0.267_949_19, 0.707_106_78, 0.654_653_67],
    [0.809_016_99, -0.190_983_01, 0.555_570_23],
    [0.0, 0.0, 1.0],
];

/// Classifies a point as inside, outside, or on the boundary of a solid.
///
/// Uses ray casting: shoots a ray from the point and counts face crossings,
/// where a crossing through a face hole does not count. Odd crossings mean
/// inside. If a ray grazes a boundary loop, the next direction is tried.
///
/// # Errors
///
/// Returns an error if the solid or its topology cannot be read.
pub fn classify_point_in_solid(
    point: &Point3,
    solid_id: SolidId,
    store: &TopologyStore,
) -> Result<PointClassification> {
    let faces = collect_face_data(store, solid_id)?;

    for dir in &RAY_DIRECTIONS {
        let dir = Vector3::from(*dir);
        if let RayCastResult::Clear(classification) = ray_cast_classify(point, &dir, &faces) {
            return Ok(classification);
        }
    }

    // Every direction grazed a boundary; treat as outside.
    Ok(PointClassification::Outside)
}

struct FaceInfo {
    outer: Vec<Point3>,
    holes: Vec<Vec<Point3>>,
    plane: Plane,
}

fn collect_face_data(store: &TopologyStore, solid_id: SolidId) -> Result<Vec<FaceInfo>> {
    let face_ids = store.solid_faces(solid_id)?;
    let mut faces = Vec::with_capacity(face_ids.len());
    for &face_id in face_ids {
        let (outer, holes) = store.face_loops(face_id)?;
        faces.push(FaceInfo {
            outer,
            holes,
            plane: store.face(face_id)?.plane().clone(),
        });
    }
    Ok(faces)
}

enum RayCastResult {
    Clear(PointClassification),
    Degenerate,
}

fn ray_cast_classify(point: &Point3, dir: &Vector3, faces: &[FaceInfo]) -> RayCastResult {
    let boundary_tol = TOLERANCE * 10.0;
    let edge_tol = TOLERANCE * 100.0;
    let mut crossings = 0u32;

    for face in faces {
        let region = |p: &Point3, tol: f64| {
            classify_in_region(p, &face.outer, &face.holes, &face.plane, tol)
        };

        match line_plane_intersect(point, dir, &face.plane) {
            LinePlaneRelation::Point { point: hit, t } => {
                if t < boundary_tol {
                    if t > -boundary_tol && region(point, edge_tol) != RegionClassification::Outside
                    {
                        return RayCastResult::Clear(PointClassification::OnBoundary);
                    }
                    continue;
                }

                match region(&hit, edge_tol) {
                    RegionClassification::Inside => crossings += 1,
                    RegionClassification::OnBoundary => return RayCastResult::Degenerate,
                    RegionClassification::Outside => {}
                }
            }
            LinePlaneRelation::OnPlane => {
                if region(point, edge_tol) != RegionClassification::Outside {
                    return RayCastResult::Clear(PointClassification::OnBoundary);
                }
                return RayCastResult::Degenerate;
            }
            LinePlaneRelation::Parallel => {}
        }
    }

    if crossings % 2 == 1 {
        RayCastResult::Clear(PointClassification::Inside)
    } else {
        RayCastResult::Clear(PointClassification::Outside)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakePrism;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn make_box(store: &mut TopologyStore) -> SolidId {
        MakePrism::new(
            vec![p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 2.0, 0.0), p(0.0, 2.0, 0.0)],
            Vector3::new(0.0, 0.0, 2.0),
        )
        .execute(store)
        .unwrap()
    }

    #[test]
    fn center_is_inside() {
        let mut store = TopologyStore::new();
        let solid = make_box(&mut store);
        let result = classify_point_in_solid(&p(1.0, 1.0, 1.0), solid, &store).unwrap();
        assert_eq!(result, PointClassification::Inside);
    }

    #[test]
    fn far_point_is_outside() {
        let mut store = TopologyStore::new();
        let solid = make_box(&mut store);
        for pt in [p(5.0, 5.0, 5.0), p(-1.0, 1.0, 1.0), p(1.0, 1.0, 2.5)] {
            let result = classify_point_in_solid(&pt, solid, &store).unwrap();
            assert_eq!(result, PointClassification::Outside, "{pt:?}");
        }
    }

    #[test]
    fn face_point_is_on_boundary() {
        let mut store = TopologyStore::new();
        let solid = make_box(&mut store);
        let result = classify_point_in_solid(&p(1.0, 1.0, 2.0), solid, &store).unwrap();
        assert_eq!(result, PointClassification::OnBoundary);
    }
}
