use tracing::{debug, instrument};

use crate::error::{OperationError, Result};
use crate::operations::transform::Scale;

use super::solid::Solid;

/// Scales `solid` about its centre so a sphere of `nominal_radius` grows to
/// `target_diameter`.
///
/// The factor is `target_diameter / (2 * nominal_radius)`. The solid's
/// recorded circumradius is scaled with it, so passing
/// [`Solid::circumradius`] back in with the same target leaves the solid
/// unchanged.
///
/// # Errors
///
/// Returns [`OperationError::InvalidParameter`] unless both the radius and
/// the target are positive finite numbers.
#[instrument(skip(solid))]
pub fn scale_to_diameter(mut solid: Solid, nominal_radius: f64, target_diameter: f64) -> Result<Solid> {
    for (name, value) in [
        ("nominal_radius", nominal_radius),
        ("target_diameter", target_diameter),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(OperationError::InvalidParameter { name, value }.into());
        }
    }

    let factor = target_diameter / (2.0 * nominal_radius);
    let center = solid.center();
    let (store, id) = solid.parts_mut();
    Scale::new(id, center, factor).execute(store)?;
    let circumradius = solid.circumradius() * factor;
    solid.set_circumradius(circumradius);

    debug!(factor, circumradius, "scaled solid");
    Ok(solid)
}
