pub mod dice;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod topology;

pub use dice::{Die, MarkingStyle, Polyhedron, Solid, D20, D6};
pub use error::{PolydiceError, Result};
