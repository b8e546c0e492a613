use crate::error::Result;
use crate::math::polygon_3d::vector_area;
use crate::topology::{ShellId, SolidId, TopologyStore};

/// Computes the volume of a solid.
///
/// Exact for planar faces: by the divergence theorem the volume is a third of
/// the sum, over every boundary loop, of `p0 · A` where `p0` is any point of
/// the loop and `A` its vector area. Outer loops wind counter-clockwise about
/// the outward normal and holes clockwise, so holes subtract.
pub struct Volume {
    solid: SolidId,
}

impl Volume {
    /// Creates a new `Volume` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the enclosed volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid's topology cannot be read.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        shell_volume(store, store.solid(self.solid)?.shell)
    }
}

/// Signed volume enclosed by a shell; positive when faces wind outward.
pub(crate) fn shell_volume(store: &TopologyStore, shell: ShellId) -> Result<f64> {
    let mut six_volume = 0.0;
    for &face_id in &store.shell(shell)?.faces {
        let (outer, holes) = store.face_loops(face_id)?;
        for points in std::iter::once(&outer).chain(holes.iter()) {
            if let Some(p0) = points.first() {
                six_volume += 2.0 * p0.coords.dot(&vector_area(points));
            }
        }
    }
    Ok(six_volume / 6.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakePrism;
    use crate::tessellation::TessellateSolid;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn box_volume() {
        let mut store = TopologyStore::new();
        let solid = MakePrism::new(
            vec![p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 3.0, 0.0), p(0.0, 3.0, 0.0)],
            Vector3::new(0.0, 0.0, 4.0),
        )
        .execute(&mut store)
        .unwrap();

        assert_relative_eq!(Volume::new(solid).execute(&store).unwrap(), 24.0, epsilon = 1e-12);
    }

    #[test]
    fn offset_box_volume() {
        let mut store = TopologyStore::new();
        let solid = MakePrism::new(
            vec![p(1.0, 2.0, 3.0), p(3.0, 2.0, 3.0), p(3.0, 5.0, 3.0), p(1.0, 5.0, 3.0)],
            Vector3::new(0.0, 0.0, 4.0),
        )
        .execute(&mut store)
        .unwrap();

        assert_relative_eq!(Volume::new(solid).execute(&store).unwrap(), 24.0, epsilon = 1e-12);
    }

    #[test]
    fn oblique_prism_matches_mesh_volume() {
        let mut store = TopologyStore::new();
        let solid = MakePrism::new(
            vec![p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(1.0, 3.0, 0.0)],
            Vector3::new(1.0, 1.0, 2.0),
        )
        .execute(&mut store)
        .unwrap();

        let exact = Volume::new(solid).execute(&store).unwrap();
        // base area 6, height 2
        assert_relative_eq!(exact, 12.0, epsilon = 1e-12);
        let mesh = TessellateSolid::new(solid).execute(&store).unwrap();
        assert_relative_eq!(mesh.signed_volume(), exact, epsilon = 1e-9);
    }
}
