// src/bbox.rs

//! Bounding rectangles of cells and tiles in native coordinates.
//!
//! Rectangles never wrap: a region crossing the split longitude is reported as two
//! rectangles, one at each end of the `[split, split + 360)` window.

use crate::constants::{NORTH_POLE_VERTEX, SOUTH_POLE_VERTEX};
use crate::converter::CoordConverter;
use crate::index::Index;
use crate::iterators::VertexIterator;
use crate::tiles::{Tile, TileCollection};
use crate::types::{GeoPoint, Rect};
use tracing::trace;

/// Longitude where rectangles are cut unless configured otherwise.
pub const DEFAULT_SPLIT_LONGITUDE: f64 = -180.0;

/// A point further than this from the rectangle's edge is taken to have wrapped around.
const WRAP_THRESHOLD_DEGS: f64 = 90.0;

/// Accumulates cell centres and vertices into a bounding rectangle.
#[derive(Debug, Clone)]
pub struct BoundingRectsCalculator<C> {
  converter: C,
  rect: Rect,
  split_longitude: f64,
  north_pole: bool,
  south_pole: bool,
}

impl<C: CoordConverter> BoundingRectsCalculator<C> {
  pub fn new(converter: C) -> Self {
    Self {
      converter,
      rect: Rect::EMPTY,
      split_longitude: DEFAULT_SPLIT_LONGITUDE,
      north_pole: false,
      south_pole: false,
    }
  }

  #[must_use]
  pub fn with_split_longitude(mut self, split_longitude: f64) -> Self {
    self.split_longitude = split_longitude;
    self
  }

  /// The rectangle accumulated so far, before pole handling and splitting.
  #[must_use]
  pub fn rect(&self) -> Rect {
    self.rect
  }

  /// True once a cell covering either pole has been added.
  #[must_use]
  pub fn contains_pole(&self) -> bool {
    self.north_pole || self.south_pole
  }

  /// Grows the rectangle to include `point`, unwrapping it by a full turn when it lies
  /// far past the current edges.
  pub fn add_point(&mut self, point: &GeoPoint) {
    let mut point = *point;
    if !self.rect.is_empty() {
      if point.lon > self.rect.x_max + WRAP_THRESHOLD_DEGS {
        point.lon -= 360.0;
      } else if point.lon < self.rect.x_min - WRAP_THRESHOLD_DEGS {
        point.lon += 360.0;
      }
    }
    self.rect.expand(&point);
  }

  /// Adds the centre of `index`.
  pub fn add_index(&mut self, index: &Index) {
    self.check_pole(index);
    let centre = self.converter.pyxis_to_native(index);
    self.add_point(&centre);
  }

  /// Adds the centre and every vertex of `index`.
  pub fn add_cell(&mut self, index: &Index) {
    self.add_index(index);
    for vertex in VertexIterator::new(index) {
      let point = self.converter.pyxis_to_native(&vertex);
      self.add_point(&point);
    }
  }

  /// Adds the outer corner cells of `tile`.
  pub fn add_tile(&mut self, tile: &Tile) {
    self.check_pole(&tile.root());
    for corner in tile.corner_cells() {
      self.add_cell(&corner);
    }
  }

  pub fn add_collection(&mut self, collection: &TileCollection) {
    for tile in collection.tiles() {
      self.add_tile(&tile);
    }
  }

  /// The accumulated area as one or two rectangles; the second is empty when one suffices.
  ///
  /// An area containing a pole spans every longitude and reaches the pole.
  #[must_use]
  pub fn bounding_rects(&self) -> (Rect, Rect) {
    if self.rect.is_empty() {
      return (Rect::EMPTY, Rect::EMPTY);
    }
    if self.contains_pole() {
      let mut rect = Rect::new(-180.0, 180.0, self.rect.y_min, self.rect.y_max);
      if self.north_pole {
        rect.y_max = 90.0;
      }
      if self.south_pole {
        rect.y_min = -90.0;
      }
      trace!(north = self.north_pole, south = self.south_pole, "bounds cover a pole");
      return (rect, Rect::EMPTY);
    }
    split_bounds(&self.rect, self.split_longitude)
  }

  fn check_pole(&mut self, index: &Index) {
    if !index.is_pentagon() {
      return;
    }
    match index.primary() {
      NORTH_POLE_VERTEX => self.north_pole = true,
      SOUTH_POLE_VERTEX => self.south_pole = true,
      _ => {}
    }
  }
}

/// Places `rect` in the window `[split_longitude, split_longitude + 360)`, cutting it in two
/// when it runs past the window's east edge.
#[must_use]
pub fn split_bounds(rect: &Rect, split_longitude: f64) -> (Rect, Rect) {
  if rect.is_empty() {
    return (Rect::EMPTY, Rect::EMPTY);
  }
  let window_end = split_longitude + 360.0;
  if rect.width() >= 360.0 {
    return (Rect::new(split_longitude, window_end, rect.y_min, rect.y_max), Rect::EMPTY);
  }

  let shift = ((rect.x_min - split_longitude) / 360.0).floor() * 360.0;
  let x_min = rect.x_min - shift;
  let x_max = rect.x_max - shift;
  if x_max <= window_end {
    return (Rect::new(x_min, x_max, rect.y_min, rect.y_max), Rect::EMPTY);
  }
  trace!(split_longitude, x_min, x_max, "bounds split");
  (
    Rect::new(x_min, window_end, rect.y_min, rect.y_max),
    Rect::new(split_longitude, x_max - 360.0, rect.y_min, rect.y_max),
  )
}
