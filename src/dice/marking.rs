use tracing::{debug, instrument};

use crate::error::Result;
use crate::math::polygon_2d::{regular_polygon, rotate_2d};
use crate::math::{Point2, Point3, Vector2};

use super::frame::FaceFrame;
use super::glyph::glyph_outlines;
use super::layout::{MarkingShape, MarkingSpec};
use super::solid::Solid;

/// What a cutter carved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CutterKind {
    Pip,
    /// A numeral, with the text it spells.
    Numeral(String),
}

/// Record of one marking subtracted from a face.
///
/// `outlines` are the cut sections on the face plane in world coordinates,
/// one per pocket: a single polygon for a pip, one bar per lit segment for a
/// numeral.
#[derive(Debug, Clone, PartialEq)]
pub struct Cutter {
    pub face_number: u32,
    pub kind: CutterKind,
    pub outlines: Vec<Vec<Point3>>,
    pub depth: f64,
}

impl Cutter {
    pub(crate) fn scale_about(&mut self, center: &Point3, factor: f64) {
        for pt in self.outlines.iter_mut().flatten() {
            *pt = center + (*pt - center) * factor;
        }
        self.depth *= factor;
    }
}

/// Cuts every marking in `specs` into the face described by `frame`.
///
/// Each outline is turned by the marking's rotation, moved to its polar offset,
/// mapped onto the face and extruded from one depth above the face to one
/// depth below it along `-normal`. The solid is consumed and the cut result
/// returned together with one [`Cutter`] per marking.
///
/// # Errors
///
/// Returns an error if a glyph cannot be drawn or a pocket cannot be cut,
/// e.g. because it overlaps an earlier pocket or leaves the face.
#[instrument(skip_all, fields(face = frame.face_number, markings = specs.len()))]
pub fn apply(
    mut solid: Solid,
    frame: &FaceFrame,
    specs: &[MarkingSpec],
) -> Result<(Solid, Vec<Cutter>)> {
    let mut cutters = Vec::with_capacity(specs.len());
    for spec in specs {
        let (kind, local_outlines) = match &spec.shape {
            MarkingShape::Pip {
                circumradius,
                sides,
                ..
            } => (
                CutterKind::Pip,
                vec![regular_polygon(*circumradius, *sides, spec.rotation.to_radians())],
            ),
            MarkingShape::Numeral { text, height, .. } => {
                let rotation = spec.rotation.to_radians();
                let outlines: Vec<Vec<Point2>> = glyph_outlines(text, *height)?
                    .into_iter()
                    .map(|outline| outline.iter().map(|pt| rotate_2d(pt, rotation)).collect())
                    .collect();
                (CutterKind::Numeral(text.clone()), outlines)
            }
        };

        let depth = spec.shape.depth();
        let (sin, cos) = spec.angle.to_radians().sin_cos();
        let offset = Vector2::new(spec.radius * cos, spec.radius * sin);
        let clearance = frame.normal * depth;

        let mut outlines = Vec::with_capacity(local_outlines.len());
        for local in local_outlines {
            let placed: Vec<Point3> = local
                .iter()
                .map(|pt| frame.to_world(&(pt + offset)))
                .collect();
            let lifted = placed.iter().map(|pt| pt + clearance).collect();
            solid = solid.cut(lifted, -frame.normal * (2.0 * depth))?;
            outlines.push(placed);
        }

        debug!(kind = ?kind, pockets = outlines.len(), depth, "applied marking");
        cutters.push(Cutter {
            face_number: frame.face_number,
            kind,
            outlines,
            depth,
        });
    }
    Ok((solid, cutters))
}
