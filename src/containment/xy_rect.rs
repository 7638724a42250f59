// src/containment/xy_rect.rs

use super::{ContainmentTest, TestConfig, TestOutcome};
use crate::constants::{COMPLETE_TEST_RES_DIFF, EDGE_WALK_DEPTH, MIN_SUB_RESOLUTION};
use crate::converter::CoordConverter;
use crate::index::Index;
use crate::iterators::VertexIterator;
use crate::types::{Rect, TestResult};

/// Digit walks from a cell's centre out to its edge, one per direction.
const EDGE_WALKS: [[u8; EDGE_WALK_DEPTH]; 6] = [
  [0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
  [0, 2, 0, 2, 0, 2, 0, 2, 0, 2],
  [0, 3, 0, 3, 0, 3, 0, 3, 0, 3],
  [0, 4, 0, 4, 0, 4, 0, 4, 0, 4],
  [0, 5, 0, 5, 0, 5, 0, 5, 0, 5],
  [0, 6, 0, 6, 0, 6, 0, 6, 0, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VertexCoverage {
  None,
  Some,
  All,
}

/// Finds the cells overlapping a rectangle in native coordinates.
#[derive(Debug, Clone)]
pub struct XyIntersectionTest<C> {
  config: TestConfig,
  converter: C,
  bounds: Rect,
}

impl<C: CoordConverter> XyIntersectionTest<C> {
  pub fn new(converter: C, config: TestConfig, bounds: Rect) -> Self {
    Self {
      config,
      converter,
      bounds,
    }
  }

  #[must_use]
  pub fn bounds(&self) -> Rect {
    self.bounds
  }

  pub fn set_bounds(&mut self, bounds: Rect) {
    self.bounds = bounds;
  }

  fn inside(&self, index: &Index) -> bool {
    self.bounds.contains(&self.converter.pyxis_to_native(index))
  }

  /// How many of the cell's vertices fall in the rectangle.
  ///
  /// With `exhaustive` unset the count stops at the first vertex found, so the answer is
  /// `None` or `Some`. Vertex cells with no vertex inside also have their edges sampled,
  /// since projection distortion can bow an edge into the rectangle.
  fn vertex_coverage(&self, index: &Index, exhaustive: bool) -> VertexCoverage {
    let mut any = false;
    let mut all = true;
    for vertex in VertexIterator::new(index) {
      if self.inside(&vertex) {
        any = true;
        if !exhaustive {
          break;
        }
      } else {
        all = false;
      }
    }

    if !any && !index.has_vertex_children() {
      let data_resolution = usize::from(self.config.data_resolution);
      let depth = EDGE_WALK_DEPTH.min(data_resolution.saturating_sub(usize::from(index.resolution())));
      if depth > 0 {
        for walk in &EDGE_WALKS {
          let probe = index.extended(&walk[..depth]);
          if !probe.is_valid() {
            continue;
          }
          if self.inside(&probe) {
            any = true;
            if !exhaustive {
              break;
            }
          } else {
            all = false;
          }
        }
      }
    }

    match (any, all && exhaustive) {
      (false, _) => VertexCoverage::None,
      (true, false) => VertexCoverage::Some,
      (true, true) => VertexCoverage::All,
    }
  }

  /// True if a corner of the rectangle lands in the cell.
  fn is_area_corner(&self, index: &Index) -> bool {
    let resolution = index.resolution().max(MIN_SUB_RESOLUTION);
    self.bounds.corners().iter().any(|corner| {
      self
        .converter
        .native_to_pyxis(corner, resolution)
        .is_ok_and(|cell| index.is_ancestor_of(&cell))
    })
  }

  fn classify(&self, index: &Index) -> TestResult {
    let resolution = index.resolution();
    let exhaustive = i32::from(self.config.target_resolution) - i32::from(COMPLETE_TEST_RES_DIFF) > i32::from(resolution);
    let coverage = self.vertex_coverage(index, exhaustive);
    let all = coverage == VertexCoverage::All;
    let intersects = coverage != VertexCoverage::None || self.is_area_corner(index);

    if resolution >= self.config.data_resolution {
      return if intersects { TestResult::Yes } else { TestResult::No };
    }
    match (index.has_vertex_children(), intersects, all) {
      (true, true, true) => TestResult::YesComplete,
      (true, true, false) => TestResult::Yes,
      (true, false, _) => TestResult::Maybe,
      (false, true, true) => TestResult::YesComplete,
      (false, true, false) => TestResult::Maybe,
      (false, false, _) => TestResult::No,
    }
  }
}

impl<C: CoordConverter> ContainmentTest for XyIntersectionTest<C> {
  fn config(&self) -> &TestConfig {
    &self.config
  }

  fn test_index(&self, index: &Index) -> TestOutcome {
    self.classify(index).into()
  }
}
