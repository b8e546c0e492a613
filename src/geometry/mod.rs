pub mod curve;
pub mod surface;

pub use curve::{Curve, Line};
pub use surface::{Plane, Surface};
