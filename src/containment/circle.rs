// src/containment/circle.rs

use super::{ContainmentTest, TestConfig, TestOutcome};
use crate::converter::CoordConverter;
use crate::index::Index;
use crate::latlng::{great_circle_distance_rads, metres_to_rads};
use crate::measures::circumradius_rads;
use crate::types::{GeoPoint, TestResult};

/// Finds the cells crossed by the edge of a circle on the reference sphere.
///
/// A cell whose circumcircle lies wholly outside or wholly inside the circle has no part
/// of the edge in it; at the data resolution such a cell is `No`. Above the data resolution
/// every cell that might touch the edge is `Maybe`.
#[derive(Debug, Clone)]
pub struct CircleIntersectionTest<C> {
  config: TestConfig,
  converter: C,
  centre: GeoPoint,
  radius_rads: f64,
}

impl<C: CoordConverter> CircleIntersectionTest<C> {
  /// A circle of `radius_m` metres around `centre` (native coordinates).
  pub fn new(converter: C, config: TestConfig, centre: GeoPoint, radius_m: f64) -> Self {
    Self {
      config,
      converter,
      centre,
      radius_rads: metres_to_rads(radius_m),
    }
  }

  #[must_use]
  pub fn centre(&self) -> GeoPoint {
    self.centre
  }

  /// Radius as an angle in radians.
  #[must_use]
  pub fn radius_rads(&self) -> f64 {
    self.radius_rads
  }

  fn classify(&self, index: &Index) -> TestResult {
    let cell_centre = self.converter.pyxis_to_native(index);
    let distance = great_circle_distance_rads(&cell_centre, &self.centre);
    let cell_radius = circumradius_rads(index.resolution());
    let at_data = index.resolution() >= self.config.data_resolution;

    if distance - cell_radius > self.radius_rads {
      TestResult::No
    } else if distance + cell_radius < self.radius_rads {
      if at_data {
        TestResult::No
      } else {
        TestResult::Maybe
      }
    } else if at_data {
      TestResult::Yes
    } else {
      TestResult::Maybe
    }
  }
}

impl<C: CoordConverter> ContainmentTest for CircleIntersectionTest<C> {
  fn config(&self) -> &TestConfig {
    &self.config
  }

  fn test_index(&self, index: &Index) -> TestOutcome {
    self.classify(index).into()
  }
}
