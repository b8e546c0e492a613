mod classify;
mod subtract;

pub use classify::{classify_point_in_solid, PointClassification};
pub use subtract::Subtract;
