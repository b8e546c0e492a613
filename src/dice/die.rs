use tracing::{info, instrument};

use crate::error::{OperationError, Result};

use super::assemble::assemble;
use super::frame::{frames, FaceFrame};
use super::layout::{MarkingDimensions, MarkingLayout, MarkingStyle};
use super::marking::{apply, Cutter};
use super::polyhedron::Polyhedron;
use super::scale::scale_to_diameter;
use super::solid::Solid;

/// A finished die: the marked, scaled solid with its face frames and the
/// record of every marking cut into it.
#[derive(Debug, Clone)]
pub struct Die {
    solid: Solid,
    frames: Vec<FaceFrame>,
    markings: Vec<Cutter>,
    polyhedron: Polyhedron,
    style: MarkingStyle,
}

impl Die {
    /// The marked solid.
    #[must_use]
    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    /// Frames of the numbered faces at final scale, in face-number order.
    #[must_use]
    pub fn frames(&self) -> &[FaceFrame] {
        &self.frames
    }

    /// Every cutter, grouped by face in face-number order.
    #[must_use]
    pub fn markings(&self) -> &[Cutter] {
        &self.markings
    }

    /// The cutters on one face.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidFaceNumber`] for an unknown face.
    pub fn markings_on(&self, face_number: u32) -> Result<Vec<&Cutter>> {
        self.solid.face(face_number)?;
        Ok(self
            .markings
            .iter()
            .filter(|c| c.face_number == face_number)
            .collect())
    }

    /// The face opposite `face_number`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidFaceNumber`] for an unknown face.
    pub fn opposite_face(&self, face_number: u32) -> Result<u32> {
        self.polyhedron
            .table()
            .opposite_face(face_number)
            .ok_or_else(|| {
                OperationError::InvalidFaceNumber {
                    face_number,
                    face_count: self.polyhedron.face_count(),
                }
                .into()
            })
    }

    #[must_use]
    pub fn polyhedron(&self) -> Polyhedron {
        self.polyhedron
    }

    #[must_use]
    pub fn style(&self) -> MarkingStyle {
        self.style
    }

    /// Hands over the solid.
    #[must_use]
    pub fn into_solid(self) -> Solid {
        self.solid
    }
}

/// Builder for a twenty-sided die.
///
/// ```
/// use polydice::dice::{MarkingStyle, D20};
///
/// let die = D20::new(120.0).with_style(MarkingStyle::Pips).build().unwrap();
/// assert_eq!(die.markings_on(10).unwrap().len(), 10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct D20 {
    diameter: f64,
    style: MarkingStyle,
    dimensions: MarkingDimensions,
}

impl D20 {
    /// A D20 whose circumscribed sphere has the given diameter.
    #[must_use]
    pub fn new(diameter: f64) -> Self {
        Self {
            diameter,
            style: MarkingStyle::default(),
            dimensions: MarkingDimensions::for_polyhedron(Polyhedron::Icosahedron),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: MarkingStyle) -> Self {
        self.style = style;
        self
    }

    /// Marking sizes in nominal units, before scaling.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: MarkingDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Builds and marks the die.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidParameter`] for a non-positive
    /// diameter or marking size, or any error raised while assembling or
    /// cutting the solid.
    pub fn build(&self) -> Result<Die> {
        check_positive("diameter", self.diameter)?;
        build_die(
            Polyhedron::Icosahedron,
            self.diameter,
            self.style,
            self.dimensions,
        )
    }
}

/// Builder for a six-sided die.
#[derive(Debug, Clone, Copy)]
pub struct D6 {
    edge_length: f64,
    style: MarkingStyle,
    dimensions: MarkingDimensions,
}

impl D6 {
    /// A D6 with the given edge length.
    #[must_use]
    pub fn new(edge_length: f64) -> Self {
        Self {
            edge_length,
            style: MarkingStyle::default(),
            dimensions: MarkingDimensions::for_polyhedron(Polyhedron::Cube),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: MarkingStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, dimensions: MarkingDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Builds and marks the die. Its diameter is the cube diagonal.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidParameter`] for a non-positive edge
    /// length or marking size, or any error raised while assembling or
    /// cutting the solid.
    pub fn build(&self) -> Result<Die> {
        check_positive("edge_length", self.edge_length)?;
        build_die(
            Polyhedron::Cube,
            self.edge_length * 3.0_f64.sqrt(),
            self.style,
            self.dimensions,
        )
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OperationError::InvalidParameter { name, value }.into())
    }
}

#[instrument(skip(dimensions))]
fn build_die(
    polyhedron: Polyhedron,
    diameter: f64,
    style: MarkingStyle,
    dimensions: MarkingDimensions,
) -> Result<Die> {
    dimensions.validate()?;
    let layout = MarkingLayout::new(polyhedron, style).with_dimensions(dimensions);

    let mut solid = assemble(&polyhedron.vertices(), &polyhedron.table())?;
    let mut markings = Vec::new();
    for frame in frames(&solid)? {
        let specs = layout.layout_face(frame.face_number)?;
        let (cut, cutters) = apply(solid, &frame, &specs)?;
        solid = cut;
        markings.extend(cutters);
    }
    solid.compact()?;

    let factor = diameter / (2.0 * polyhedron.nominal_radius());
    let solid = scale_to_diameter(solid, polyhedron.nominal_radius(), diameter)?;
    let center = solid.center();
    for cutter in &mut markings {
        cutter.scale_about(&center, factor);
    }
    let frames = frames(&solid)?;

    info!(
        faces = solid.faces()?.len(),
        cutters = markings.len(),
        circumradius = solid.circumradius(),
        "built die"
    );
    Ok(Die {
        solid,
        frames,
        markings,
        polyhedron,
        style,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PolydiceError;
    use approx::assert_relative_eq;

    #[test]
    fn d6_pips_match_face_numbers() {
        let die = D6::new(6.0).build().unwrap();
        assert!(die.solid().is_valid());
        for face in 1..=6 {
            assert_eq!(die.markings_on(face).unwrap().len(), face as usize);
            assert_eq!(face + die.opposite_face(face).unwrap(), 7);
        }
        assert_eq!(die.markings().len(), 21);
    }

    #[test]
    fn finished_store_holds_only_the_die() {
        let die = D6::new(6.0).build().unwrap();
        let solid = die.solid();
        assert_eq!(solid.store().solid_count(), 1);
        assert_eq!(solid.store().face_count(), solid.faces().unwrap().len());
        assert!(solid.is_valid());
    }

    #[test]
    fn d6_is_scaled_to_its_edge_length() {
        let die = D6::new(6.0).with_style(MarkingStyle::Numerals).build().unwrap();
        let size = die.solid().bounding_box().unwrap().size();
        assert_relative_eq!(size.x, 6.0, epsilon = 1e-9);
        assert_relative_eq!(size.y, 6.0, epsilon = 1e-9);
        assert!(die.solid().volume().unwrap() < 216.0);
    }

    #[test]
    fn cutters_follow_the_scale() {
        let die = D6::new(6.0).build().unwrap();
        let cutter = die.markings_on(1).unwrap()[0];
        let frame = &die.frames()[0];
        assert_relative_eq!(cutter.depth, 0.6, epsilon = 1e-12);
        for pt in &cutter.outlines[0] {
            assert!(frame.normal.dot(&(pt - frame.origin)).abs() < 1e-9);
            assert!((pt - frame.origin).norm() < 0.375 + 1e-9);
        }
    }

    #[test]
    fn bad_sizes_are_rejected() {
        assert!(matches!(
            D20::new(-1.0).build(),
            Err(PolydiceError::Operation(OperationError::InvalidParameter {
                name: "diameter",
                ..
            }))
        ));
        assert!(matches!(
            D6::new(0.0).build(),
            Err(PolydiceError::Operation(OperationError::InvalidParameter {
                name: "edge_length",
                ..
            }))
        ));
        let dims = MarkingDimensions::for_polyhedron(Polyhedron::Cube).with_numeral_height(0.0);
        assert!(D6::new(1.0).with_dimensions(dims).build().is_err());
    }

    #[test]
    fn unknown_face_is_rejected() {
        let die = D6::new(2.0).with_style(MarkingStyle::Numerals).build().unwrap();
        assert!(matches!(
            die.markings_on(7),
            Err(PolydiceError::Operation(OperationError::InvalidFaceNumber { .. }))
        ));
        assert!(die.opposite_face(0).is_err());
    }
}
