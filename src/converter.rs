// src/converter.rs

//! The bridge between native coordinates and grid cells.
//!
//! Projection math lives outside this crate. The containment tests and the bounding
//! rectangle calculator only need the two conversions below.

use crate::index::Index;
use crate::types::{DggsError, GeoPoint};

/// Converts between native coordinates (longitude/latitude in degrees) and cells.
pub trait CoordConverter {
  /// The cell at `resolution` containing `point`.
  fn native_to_pyxis(&self, point: &GeoPoint, resolution: u8) -> Result<Index, DggsError>;

  /// The centre of `index` in native coordinates.
  fn pyxis_to_native(&self, index: &Index) -> GeoPoint;
}

impl<C: CoordConverter + ?Sized> CoordConverter for &C {
  fn native_to_pyxis(&self, point: &GeoPoint, resolution: u8) -> Result<Index, DggsError> {
    (**self).native_to_pyxis(point, resolution)
  }

  fn pyxis_to_native(&self, index: &Index) -> GeoPoint {
    (**self).pyxis_to_native(index)
  }
}
