//! Core value types shared across the grid.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};
use thiserror::Error;

/// One of the seven hexagon directions.
///
/// `Zero` names the cell itself, or its centroid child when used as a child step.
/// Directions `One` to `Six` run counter-clockwise around the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum Direction {
  /// The cell itself.
  #[default]
  Zero = 0,
  /// Direction one.
  One = 1,
  /// Direction two.
  Two = 2,
  /// Direction three.
  Three = 3,
  /// Direction four (opposite of one).
  Four = 4,
  /// Direction five (opposite of two).
  Five = 5,
  /// Direction six (opposite of three).
  Six = 6,
}

impl Direction {
  /// All seven directions in iteration order.
  pub const ALL: [Direction; 7] = [
    Direction::Zero,
    Direction::One,
    Direction::Two,
    Direction::Three,
    Direction::Four,
    Direction::Five,
    Direction::Six,
  ];

  /// The six directions that leave the cell.
  pub const NON_ZERO: [Direction; 6] = [
    Direction::One,
    Direction::Two,
    Direction::Three,
    Direction::Four,
    Direction::Five,
    Direction::Six,
  ];

  /// The digit value of this direction.
  #[inline]
  #[must_use]
  pub const fn digit(self) -> u8 {
    self as u8
  }

  /// Converts a digit `0..=6` into a direction.
  #[must_use]
  pub fn from_digit(digit: u8) -> Option<Direction> {
    Direction::ALL.get(usize::from(digit)).copied()
  }

  /// The opposite direction. `Zero` is its own opposite.
  #[must_use]
  pub fn negate(self) -> Direction {
    match self {
      Direction::Zero => Direction::Zero,
      Direction::One => Direction::Four,
      Direction::Two => Direction::Five,
      Direction::Three => Direction::Six,
      Direction::Four => Direction::One,
      Direction::Five => Direction::Two,
      Direction::Six => Direction::Three,
    }
  }

  /// Rotates counter-clockwise by `steps` sixths of a turn (negative steps turn clockwise).
  /// `Zero` is fixed under rotation.
  #[must_use]
  pub fn rotate(self, steps: i32) -> Direction {
    if self == Direction::Zero {
      return self;
    }
    let turned = (i32::from(self.digit()) - 1 + steps).rem_euclid(6) + 1;
    Direction::NON_ZERO[(turned - 1) as usize]
  }
}

impl TryFrom<u8> for Direction {
  type Error = DggsError;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Direction::from_digit(value).ok_or(DggsError::InvalidDirection)
  }
}

/// The two alternating aperture-3 orientations of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum HexClass {
  /// Even resolutions.
  ClassI = 1,
  /// Odd resolutions.
  ClassII = 2,
}

impl HexClass {
  /// Class of the grid at `resolution`.
  #[inline]
  #[must_use]
  pub fn for_resolution(resolution: i32) -> HexClass {
    if resolution & 1 == 0 {
      HexClass::ClassI
    } else {
      HexClass::ClassII
    }
  }
}

/// Classification of a cell against a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum TestResult {
  /// Cell and all descendants are excluded.
  No = 0,
  /// Cell is included; descendants below the target resolution still need testing.
  Yes = 1,
  /// Cell is wholly included.
  YesComplete = 2,
  /// Undecided at this resolution.
  Maybe = 3,
}

impl TryFrom<u8> for TestResult {
  type Error = DggsError;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(TestResult::No),
      1 => Ok(TestResult::Yes),
      2 => Ok(TestResult::YesComplete),
      3 => Ok(TestResult::Maybe),
      _ => Err(DggsError::InvalidIndex),
    }
  }
}

/// Errors raised by the grid operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[repr(u32)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum DggsError {
  /// Malformed index string, unknown primary or illegal digit sequence.
  #[error("invalid index")]
  InvalidIndex = 1,
  /// Resolution argument was outside of the supported range.
  #[error("resolution out of range")]
  InvalidResolution = 2,
  /// Direction is not available from this cell.
  #[error("direction is not valid for this cell")]
  InvalidDirection = 3,
  /// A move constrained to one root left that root.
  #[error("move crosses a root tessellation boundary")]
  BoundaryCrossing = 4,
  /// Digit position past the end of the index.
  #[error("digit position out of range")]
  IndexOutOfRange = 5,
  /// Tile resolution differs from the collection's cell resolution.
  #[error("tile resolution does not match the collection")]
  ResolutionMismatch = 6,
  /// Tile set bytes could not be read or written.
  #[error("corrupt tile set")]
  CorruptTileSet = 7,
}

/// A point in native coordinates: longitude and latitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
  /// Longitude (x) in degrees.
  pub lon: f64,
  /// Latitude (y) in degrees.
  pub lat: f64,
}

impl GeoPoint {
  /// Creates a point from longitude and latitude in degrees.
  #[inline]
  #[must_use]
  pub const fn new(lon: f64, lat: f64) -> Self {
    Self { lon, lat }
  }
}

/// Axis-aligned rectangle in native coordinates.
///
/// A rectangle with `x_min > x_max` is empty; `Rect::EMPTY` is the canonical empty value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
  /// Western edge.
  pub x_min: f64,
  /// Eastern edge.
  pub x_max: f64,
  /// Southern edge.
  pub y_min: f64,
  /// Northern edge.
  pub y_max: f64,
}

impl Default for Rect {
  fn default() -> Self {
    Rect::EMPTY
  }
}

impl Rect {
  /// The empty rectangle.
  pub const EMPTY: Rect = Rect {
    x_min: f64::INFINITY,
    x_max: f64::NEG_INFINITY,
    y_min: f64::INFINITY,
    y_max: f64::NEG_INFINITY,
  };

  /// Creates a rectangle from its edges.
  #[must_use]
  pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
    Self {
      x_min,
      x_max,
      y_min,
      y_max,
    }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.x_min > self.x_max || self.y_min > self.y_max
  }

  #[must_use]
  pub fn width(&self) -> f64 {
    if self.is_empty() {
      0.0
    } else {
      self.x_max - self.x_min
    }
  }

  #[must_use]
  pub fn height(&self) -> f64 {
    if self.is_empty() {
      0.0
    } else {
      self.y_max - self.y_min
    }
  }

  /// True if `point` lies inside or on the edge of the rectangle.
  #[must_use]
  pub fn contains(&self, point: &GeoPoint) -> bool {
    point.lon >= self.x_min && point.lon <= self.x_max && point.lat >= self.y_min && point.lat <= self.y_max
  }

  /// Grows the rectangle to include `point`.
  pub fn expand(&mut self, point: &GeoPoint) {
    self.x_min = self.x_min.min(point.lon);
    self.x_max = self.x_max.max(point.lon);
    self.y_min = self.y_min.min(point.lat);
    self.y_max = self.y_max.max(point.lat);
  }

  /// The four corners, counter-clockwise from south-west.
  #[must_use]
  pub fn corners(&self) -> [GeoPoint; 4] {
    [
      GeoPoint::new(self.x_min, self.y_min),
      GeoPoint::new(self.x_max, self.y_min),
      GeoPoint::new(self.x_max, self.y_max),
      GeoPoint::new(self.x_min, self.y_max),
    ]
  }
}
