pub mod assemble;
pub mod die;
pub mod frame;
pub mod glyph;
pub mod layout;
pub mod marking;
pub mod polyhedron;
pub mod scale;
pub mod solid;

pub use assemble::assemble;
pub use die::{Die, D20, D6};
pub use frame::{frame_for, frames, FaceFrame};
pub use glyph::glyph_outlines;
pub use layout::{MarkingDimensions, MarkingLayout, MarkingShape, MarkingSpec, MarkingStyle};
pub use marking::{apply, Cutter, CutterKind};
pub use polyhedron::{Polyhedron, TopologyTable};
pub use scale::scale_to_diameter;
pub use solid::Solid;
