use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3};
use crate::operations::boolean::Subtract;
use crate::operations::creation::MakePrism;
use crate::operations::query::{Aabb, BoundingBox, IsValid, Volume};
use crate::tessellation::{TessellateSolid, TriangleMesh};
use crate::topology::{FaceId, SolidId, TopologyStore};

/// A die body: a watertight solid together with the store that owns it.
///
/// Face number `n` is shell face `n - 1`. Pocket cuts append their walls and
/// floors after the numbered faces, so numbering survives marking.
///
/// Each cut leaves its cutter and the previous solid in the store until
/// [`Solid::compact`] runs; dice built through [`crate::dice::D20`] and
/// [`crate::dice::D6`] are compacted.
#[derive(Debug, Clone)]
pub struct Solid {
    store: TopologyStore,
    id: SolidId,
    face_count: u32,
    center: Point3,
    circumradius: f64,
}

impl Solid {
    pub(crate) fn new(
        store: TopologyStore,
        id: SolidId,
        face_count: u32,
        center: Point3,
        circumradius: f64,
    ) -> Self {
        Self {
            store,
            id,
            face_count,
            center,
            circumradius,
        }
    }

    /// The solid's ID in its store.
    #[must_use]
    pub fn id(&self) -> SolidId {
        self.id
    }

    /// The store owning every entity of the solid.
    #[must_use]
    pub fn store(&self) -> &TopologyStore {
        &self.store
    }

    /// Number of numbered faces.
    #[must_use]
    pub fn face_count(&self) -> u32 {
        self.face_count
    }

    /// The polyhedron's centre: the centroid of its corners.
    #[must_use]
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Distance from the centre to the farthest corner.
    #[must_use]
    pub fn circumradius(&self) -> f64 {
        self.circumradius
    }

    /// The face carrying number `face_number`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidFaceNumber`] outside `1..=face_count`.
    pub fn face(&self, face_number: u32) -> Result<FaceId> {
        if face_number == 0 || face_number > self.face_count {
            return Err(OperationError::InvalidFaceNumber {
                face_number,
                face_count: self.face_count,
            }
            .into());
        }
        let faces = self.store.solid_faces(self.id)?;
        let index = usize::try_from(face_number - 1)
            .map_err(|_| OperationError::InvalidInput("face index overflow".into()))?;
        faces.get(index).copied().ok_or_else(|| {
            OperationError::InvalidFaceNumber {
                face_number,
                face_count: self.face_count,
            }
            .into()
        })
    }

    /// Every face of the shell, numbered faces first.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid's topology cannot be read.
    pub fn faces(&self) -> Result<&[FaceId]> {
        Ok(self.store.solid_faces(self.id)?)
    }

    /// Positions of all vertices, pocket vertices included.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid's topology cannot be read.
    pub fn vertices(&self) -> Result<Vec<Point3>> {
        self.store
            .solid_vertices(self.id)?
            .into_iter()
            .map(|v| Ok(self.store.vertex(v)?.point))
            .collect()
    }

    /// Enclosed volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid's topology cannot be read.
    pub fn volume(&self) -> Result<f64> {
        Volume::new(self.id).execute(&self.store)
    }

    /// Whether the solid is closed, manifold and consistently oriented.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        IsValid::new(self.id).execute(&self.store)
    }

    /// Axis-aligned bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid's topology cannot be read.
    pub fn bounding_box(&self) -> Result<Aabb> {
        BoundingBox::new(self.id).execute(&self.store)
    }

    /// Triangulates every face for export or display.
    ///
    /// # Errors
    ///
    /// Returns an error if a face cannot be tessellated.
    pub fn tessellate(&self) -> Result<TriangleMesh> {
        TessellateSolid::new(self.id).execute(&self.store)
    }

    /// Releases store entities the solid no longer reaches: cutter prisms
    /// and the solids each cut superseded.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid's topology cannot be read.
    pub fn compact(&mut self) -> Result<()> {
        self.store.retain_solid(self.id)?;
        Ok(())
    }

    /// Hands over the store and the solid's ID.
    #[must_use]
    pub fn into_parts(self) -> (TopologyStore, SolidId) {
        (self.store, self.id)
    }

    /// Extrudes `outline` along `direction` and subtracts the prism.
    pub(crate) fn cut(mut self, outline: Vec<Point3>, direction: Vector3) -> Result<Self> {
        let cutter = MakePrism::new(outline, direction).execute(&mut self.store)?;
        self.id = Subtract::new(self.id, cutter).execute(&mut self.store)?;
        Ok(self)
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut TopologyStore, SolidId) {
        (&mut self.store, self.id)
    }

    pub(crate) fn set_circumradius(&mut self, circumradius: f64) {
        self.circumradius = circumradius;
    }
}
