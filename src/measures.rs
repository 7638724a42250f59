// src/measures.rs

use crate::constants::{EARTH_RADIUS_M, ICOSA_CENTRAL_ANGLE_RADS, M_SQRT3, MAX_RESOLUTION};
use crate::types::DggsError;

/// Angular radius in radians of the circle enclosing any cell at `resolution`.
///
/// Each resolution shrinks cells by a factor of `sqrt(3)`, starting from the
/// icosahedron's central angle.
#[must_use]
pub fn circumradius_rads(resolution: u8) -> f64 {
  ICOSA_CENTRAL_ANGLE_RADS / M_SQRT3.powi(i32::from(resolution) + 1)
}

/// Cell circumradius in metres on the reference sphere.
pub fn circumradius_m(resolution: u8) -> Result<f64, DggsError> {
  if resolution > MAX_RESOLUTION {
    return Err(DggsError::InvalidResolution);
  }
  Ok(circumradius_rads(resolution) * EARTH_RADIUS_M)
}

/// The coarsest resolution whose cells have a circumradius no larger than `metres`.
pub fn resolution_for_radius_m(metres: f64) -> Result<u8, DggsError> {
  if metres.is_nan() || metres <= 0.0 {
    return Err(DggsError::InvalidResolution);
  }
  (0..=MAX_RESOLUTION)
    .find(|&res| circumradius_rads(res) * EARTH_RADIUS_M <= metres)
    .ok_or(DggsError::InvalidResolution)
}
