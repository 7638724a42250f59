// src/latlng.rs

use crate::constants::{EARTH_RADIUS_M, M_180_PI, M_PI_180};
use crate::types::GeoPoint;

/// Converts degrees to radians.
#[inline]
#[must_use]
pub fn degs_to_rads(degrees: f64) -> f64 {
  degrees * M_PI_180
}

/// Converts radians to degrees.
#[inline]
#[must_use]
pub fn rads_to_degs(radians: f64) -> f64 {
  radians * M_180_PI
}

/// The great circle distance in radians between two points given in degrees.
///
/// Uses the haversine formula, see
///     https://en.wikipedia.org/wiki/Haversine_formula
#[must_use]
pub fn great_circle_distance_rads(a: &GeoPoint, b: &GeoPoint) -> f64 {
  let (a_lat, b_lat) = (degs_to_rads(a.lat), degs_to_rads(b.lat));
  let sin_lat_half = ((b_lat - a_lat) * 0.5).sin();
  let sin_lon_half = (degs_to_rads(b.lon - a.lon) * 0.5).sin();
  let h = sin_lat_half * sin_lat_half + a_lat.cos() * b_lat.cos() * sin_lon_half * sin_lon_half;
  let h = h.clamp(0.0, 1.0);
  2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// The great circle distance in metres on the reference sphere.
#[must_use]
pub fn great_circle_distance_m(a: &GeoPoint, b: &GeoPoint) -> f64 {
  great_circle_distance_rads(a, b) * EARTH_RADIUS_M
}

/// Metres on the reference sphere to an angle in radians.
#[inline]
#[must_use]
pub fn metres_to_rads(metres: f64) -> f64 {
  metres / EARTH_RADIUS_M
}
