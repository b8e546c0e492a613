use crate::error::{OperationError, Result};

use super::polyhedron::Polyhedron;

/// How faces are marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkingStyle {
    /// Recessed dots, one per unit of the face value.
    #[default]
    Pips,
    /// A recessed numeral showing the face value.
    Numerals,
}

/// The outline a marking cuts.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkingShape {
    /// A regular polygon standing in for a round pip.
    Pip {
        circumradius: f64,
        sides: usize,
        depth: f64,
    },
    /// A stroked numeral.
    Numeral {
        text: String,
        height: f64,
        depth: f64,
    },
}

impl MarkingShape {
    /// Cut depth below the face.
    #[must_use]
    pub fn depth(&self) -> f64 {
        match self {
            Self::Pip { depth, .. } | Self::Numeral { depth, .. } => *depth,
        }
    }
}

/// Placement of one marking in face-local polar coordinates.
///
/// The marking centre sits at `radius` from the face origin, `angle` degrees
/// counter-clockwise from the frame's x-axis; the outline itself is turned by
/// `rotation` degrees about that centre.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkingSpec {
    pub radius: f64,
    pub angle: f64,
    pub rotation: f64,
    pub shape: MarkingShape,
}

/// Marking sizes in nominal units (polyhedron edge length 2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkingDimensions {
    /// Pip circumradius.
    pub pip_radius: f64,
    /// Pip depth.
    pub pip_depth: f64,
    /// Numeral height.
    pub numeral_height: f64,
    /// Numeral depth.
    pub numeral_depth: f64,
    /// D20 ring spacing constant `k`: rings sit at `k·√6/9` and `2k·√6/9`.
    pub ring_constant: f64,
    /// D6 pip grid spacing.
    pub grid_spacing: f64,
}

impl MarkingDimensions {
    /// Standard sizes for a polyhedron.
    #[must_use]
    pub fn for_polyhedron(polyhedron: Polyhedron) -> Self {
        match polyhedron {
            Polyhedron::Icosahedron => Self {
                pip_radius: 0.175,
                pip_depth: 0.14,
                numeral_height: 0.6,
                numeral_depth: 0.14,
                ring_constant: 1.35,
                grid_spacing: 0.5,
            },
            Polyhedron::Cube => Self {
                pip_radius: 0.125,
                pip_depth: 0.2,
                numeral_height: 1.0,
                numeral_depth: 0.2,
                ring_constant: 1.35,
                grid_spacing: 0.5,
            },
        }
    }

    /// Sets the pip circumradius.
    #[must_use]
    pub fn with_pip_radius(mut self, pip_radius: f64) -> Self {
        self.pip_radius = pip_radius;
        self
    }

    /// Sets the pip depth.
    #[must_use]
    pub fn with_pip_depth(mut self, pip_depth: f64) -> Self {
        self.pip_depth = pip_depth;
        self
    }

    /// Sets the numeral height.
    #[must_use]
    pub fn with_numeral_height(mut self, numeral_height: f64) -> Self {
        self.numeral_height = numeral_height;
        self
    }

    /// Sets the numeral depth.
    #[must_use]
    pub fn with_numeral_depth(mut self, numeral_depth: f64) -> Self {
        self.numeral_depth = numeral_depth;
        self
    }

    /// Checks that every size is a positive finite number.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidParameter`] naming the first bad size.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("pip_radius", self.pip_radius),
            ("pip_depth", self.pip_depth),
            ("numeral_height", self.numeral_height),
            ("numeral_depth", self.numeral_depth),
            ("ring_constant", self.ring_constant),
            ("grid_spacing", self.grid_spacing),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(OperationError::InvalidParameter { name, value }.into());
            }
        }
        Ok(())
    }
}

/// 3×3 grid cells, numbered row-major from the top-left, used by each D6
/// face value.
const CUBE_PIP_CELLS: [&[usize]; 6] = [
    &[5],
    &[1, 9],
    &[1, 5, 9],
    &[1, 3, 7, 9],
    &[1, 3, 5, 7, 9],
    &[1, 3, 4, 6, 7, 9],
];

const CUBE_PIP_SIDES: usize = 24;

/// Places markings on the faces of a polyhedron.
///
/// Pure: the same face number, index and style always give the same placement.
#[derive(Debug, Clone, Copy)]
pub struct MarkingLayout {
    polyhedron: Polyhedron,
    style: MarkingStyle,
    dimensions: MarkingDimensions,
}

impl MarkingLayout {
    /// Creates a layout with the polyhedron's standard dimensions.
    #[must_use]
    pub fn new(polyhedron: Polyhedron, style: MarkingStyle) -> Self {
        Self {
            polyhedron,
            style,
            dimensions: MarkingDimensions::for_polyhedron(polyhedron),
        }
    }

    /// Overrides the marking sizes.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: MarkingDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Number of markings on a face.
    ///
    /// D20 pips: `face_number mod 10`, or 10 on multiples of ten. D6 pips:
    /// the face number. Numerals: one.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidFaceNumber`] for an unknown face.
    pub fn count(&self, face_number: u32) -> Result<usize> {
        self.check_face(face_number)?;
        let count = match (self.style, self.polyhedron) {
            (MarkingStyle::Numerals, _) => 1,
            (MarkingStyle::Pips, Polyhedron::Icosahedron) => match face_number % 10 {
                0 => 10,
                n => n,
            },
            (MarkingStyle::Pips, Polyhedron::Cube) => face_number,
        };
        Ok(count as usize)
    }

    /// Placement of marking `marking_index` on face `face_number`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidFaceNumber`] for an unknown face and
    /// [`OperationError::InvalidInput`] for an index past the face's count.
    pub fn layout(&self, face_number: u32, marking_index: usize) -> Result<MarkingSpec> {
        let count = self.count(face_number)?;
        if marking_index >= count {
            return Err(OperationError::InvalidInput(format!(
                "marking {marking_index} on face {face_number}, which has {count}"
            ))
            .into());
        }

        Ok(match (self.style, self.polyhedron) {
            (MarkingStyle::Numerals, _) => self.numeral(face_number),
            (MarkingStyle::Pips, Polyhedron::Icosahedron) => {
                self.icosahedron_pip(face_number, marking_index)
            }
            (MarkingStyle::Pips, Polyhedron::Cube) => self.cube_pip(face_number, marking_index),
        })
    }

    /// Every marking on a face, in index order.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidFaceNumber`] for an unknown face.
    pub fn layout_face(&self, face_number: u32) -> Result<Vec<MarkingSpec>> {
        (0..self.count(face_number)?)
            .map(|index| self.layout(face_number, index))
            .collect()
    }

    fn check_face(&self, face_number: u32) -> Result<()> {
        let face_count = self.polyhedron.face_count();
        if face_number == 0 || face_number > face_count {
            return Err(OperationError::InvalidFaceNumber {
                face_number,
                face_count,
            }
            .into());
        }
        Ok(())
    }

    fn numeral(&self, face_number: u32) -> MarkingSpec {
        MarkingSpec {
            radius: 0.0,
            angle: 0.0,
            rotation: 0.0,
            shape: MarkingShape::Numeral {
                text: face_number.to_string(),
                height: self.dimensions.numeral_height,
                depth: self.dimensions.numeral_depth,
            },
        }
    }

    /// Fans pips out from the centre in rings of three: ordinal 0 at the
    /// centre, 1-3 and 7-9 on the inner ring, 4-6 on the outer ring toward
    /// the corners. Ordinals 7-9 sit between 1-3.
    fn icosahedron_pip(&self, face_number: u32, ordinal: usize) -> MarkingSpec {
        let step = self.dimensions.ring_constant * 6.0_f64.sqrt() / 9.0;
        let ring_radii = [0.0, step, 2.0 * step, step];
        let radius = ring_radii[(ordinal + 2) / 3];

        #[allow(clippy::cast_precision_loss)]
        let j = ordinal as f64;
        #[allow(clippy::cast_precision_loss)]
        let half_turns = (ordinal / 7) as f64;
        let angle = (90.0 + (j - 1.0) * 120.0 + 60.0 * half_turns).rem_euclid(360.0);

        let mut rotation = if face_number < 10 { -30.0 } else { 0.0 };
        if face_number % 10 >= 7 {
            rotation += 60.0;
        }

        MarkingSpec {
            radius,
            angle,
            rotation,
            shape: MarkingShape::Pip {
                circumradius: self.dimensions.pip_radius,
                sides: 3 * face_number.div_ceil(10) as usize,
                depth: self.dimensions.pip_depth,
            },
        }
    }

    fn cube_pip(&self, face_number: u32, index: usize) -> MarkingSpec {
        let cell = CUBE_PIP_CELLS[face_number as usize - 1][index] - 1;
        #[allow(clippy::cast_precision_loss)]
        let (row, col) = ((cell / 3) as f64, (cell % 3) as f64);
        let spacing = self.dimensions.grid_spacing;
        let (x, y) = ((col - 1.0) * spacing, (1.0 - row) * spacing);

        MarkingSpec {
            radius: x.hypot(y),
            angle: y.atan2(x).to_degrees().rem_euclid(360.0),
            rotation: 0.0,
            shape: MarkingShape::Pip {
                circumradius: self.dimensions.pip_radius,
                sides: CUBE_PIP_SIDES,
                depth: self.dimensions.pip_depth,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PolydiceError;
    use approx::assert_relative_eq;

    fn d20() -> MarkingLayout {
        MarkingLayout::new(Polyhedron::Icosahedron, MarkingStyle::Pips)
    }

    #[test]
    fn pip_counts_wrap_at_ten() {
        let layout = d20();
        let counts: Vec<_> = [1, 6, 7, 10, 11, 20]
            .iter()
            .map(|&n| layout.count(n).unwrap())
            .collect();
        assert_eq!(counts, vec![1, 6, 7, 10, 1, 10]);
    }

    #[test]
    fn ordinal_angles_are_pinned() {
        let layout = d20();
        let expected = [330.0, 90.0, 210.0, 330.0, 90.0, 210.0, 330.0, 150.0, 270.0, 30.0];
        for (j, angle) in expected.iter().enumerate() {
            let spec = layout.layout(10, j).unwrap();
            assert_relative_eq!(spec.angle, *angle, epsilon = 1e-9);
        }
    }

    #[test]
    fn ordinal_rings_are_pinned() {
        let layout = d20();
        let step = 1.35 * 6.0_f64.sqrt() / 9.0;
        let expected = [0.0, step, step, step, 2.0 * step, 2.0 * step, 2.0 * step, step, step, step];
        for (j, radius) in expected.iter().enumerate() {
            assert_relative_eq!(layout.layout(20, j).unwrap().radius, *radius, epsilon = 1e-12);
        }
    }

    #[test]
    fn face_rotations_are_pinned() {
        let layout = d20();
        for (face, rotation) in [
            (1, -30.0),
            (6, -30.0),
            (7, 30.0),
            (9, 30.0),
            (10, 0.0),
            (11, 0.0),
            (16, 0.0),
            (17, 60.0),
            (19, 60.0),
            (20, 0.0),
        ] {
            assert_relative_eq!(layout.layout(face, 0).unwrap().rotation, rotation);
        }
    }

    #[test]
    fn triangles_below_eleven_hexagons_above() {
        let layout = d20();
        for face in 1..=20 {
            let MarkingShape::Pip { sides, .. } = layout.layout(face, 0).unwrap().shape else {
                panic!("expected a pip");
            };
            assert_eq!(sides, if face <= 10 { 3 } else { 6 });
        }
    }

    #[test]
    fn cube_pips_follow_the_grid() {
        let layout = MarkingLayout::new(Polyhedron::Cube, MarkingStyle::Pips);
        let spec = layout.layout(1, 0).unwrap();
        assert_relative_eq!(spec.radius, 0.0);

        let corners: Vec<_> = layout
            .layout_face(2)
            .unwrap()
            .iter()
            .map(|s| s.angle)
            .collect();
        assert_eq!(corners.len(), 2);
        assert_relative_eq!(corners[0], 135.0, epsilon = 1e-9);
        assert_relative_eq!(corners[1], 315.0, epsilon = 1e-9);

        let six = layout.layout_face(6).unwrap();
        assert_relative_eq!(six[2].radius, 0.5, epsilon = 1e-12);
        assert_relative_eq!(six[2].angle, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn numerals_show_the_face_number() {
        let layout = MarkingLayout::new(Polyhedron::Cube, MarkingStyle::Numerals);
        for face in 1..=6 {
            let specs = layout.layout_face(face).unwrap();
            assert_eq!(specs.len(), 1);
            let MarkingShape::Numeral { text, height, .. } = &specs[0].shape else {
                panic!("expected a numeral");
            };
            assert_eq!(text, &face.to_string());
            assert_relative_eq!(*height, 1.0);
            assert_relative_eq!(specs[0].radius, 0.0);
        }
    }

    #[test]
    fn out_of_range_requests_fail() {
        let layout = d20();
        assert!(matches!(
            layout.layout(21, 0),
            Err(PolydiceError::Operation(OperationError::InvalidFaceNumber {
                face_number: 21,
                face_count: 20
            }))
        ));
        assert!(matches!(
            layout.count(0),
            Err(PolydiceError::Operation(OperationError::InvalidFaceNumber { .. }))
        ));
        assert!(matches!(
            layout.layout(3, 3),
            Err(PolydiceError::Operation(OperationError::InvalidInput(_)))
        ));
    }

    #[test]
    fn cube_sizes_scale_with_the_edge() {
        let edge = 2.0;
        let dims = MarkingDimensions::for_polyhedron(Polyhedron::Cube);
        assert_relative_eq!(dims.grid_spacing, edge / 4.0);
        assert_relative_eq!(dims.pip_radius, edge / 16.0);
        assert_relative_eq!(dims.pip_depth, edge / 10.0);
    }

    #[test]
    fn dimensions_must_be_positive() {
        let dims = MarkingDimensions::for_polyhedron(Polyhedron::Cube).with_pip_depth(-0.1);
        assert!(matches!(
            dims.validate(),
            Err(PolydiceError::Operation(OperationError::InvalidParameter {
                name: "pip_depth",
                ..
            }))
        ));
    }
}
