// src/containment/mod.rs

//! Classifying cells against a region and collecting the cells that belong to it.
//!
//! A [`ContainmentTest`] answers one question per cell: is it out, in, wholly in, or
//! undecided? The [`Traverser`] walks the cell hierarchy asking that question and records
//! the answer as a [`TileCollection`](crate::tiles::TileCollection).

pub mod circle;
pub mod traverser;
pub mod xy_rect;

pub use circle::CircleIntersectionTest;
pub use traverser::{CachedCoverage, Traverser};
pub use xy_rect::XyIntersectionTest;

use crate::constants::{MAX_RESOLUTION, PRIMARY_RESOLUTION};
use crate::index::Index;
use crate::types::{DggsError, TestResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Resolutions and abort policy shared by every test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TestConfig {
  /// Finest resolution at which the region's data is meaningful.
  pub data_resolution: u8,
  /// Resolution of the cells the traversal records.
  pub target_resolution: u8,
  /// Stop the whole traversal at the first positive answer.
  pub abort_on_yes: bool,
}

impl Default for TestConfig {
  fn default() -> Self {
    Self {
      data_resolution: 2,
      target_resolution: 2,
      abort_on_yes: false,
    }
  }
}

impl TestConfig {
  /// A configuration with both resolutions in `1..=40`.
  pub fn new(data_resolution: u8, target_resolution: u8) -> Result<Self, DggsError> {
    let range = PRIMARY_RESOLUTION..=MAX_RESOLUTION;
    if !range.contains(&data_resolution) || !range.contains(&target_resolution) {
      return Err(DggsError::InvalidResolution);
    }
    Ok(Self {
      data_resolution,
      target_resolution,
      abort_on_yes: false,
    })
  }

  #[must_use]
  pub fn with_abort_on_yes(mut self, abort_on_yes: bool) -> Self {
    self.abort_on_yes = abort_on_yes;
    self
  }
}

/// A test's answer for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestOutcome {
  pub result: TestResult,
  /// Set to end the traversal immediately.
  pub abort: bool,
}

impl TestOutcome {
  #[must_use]
  pub const fn new(result: TestResult) -> Self {
    Self { result, abort: false }
  }

  #[must_use]
  pub const fn aborting(result: TestResult) -> Self {
    Self { result, abort: true }
  }

  /// True for `Yes` and `YesComplete`.
  #[must_use]
  pub fn is_positive(&self) -> bool {
    matches!(self.result, TestResult::Yes | TestResult::YesComplete)
  }
}

impl From<TestResult> for TestOutcome {
  fn from(result: TestResult) -> Self {
    TestOutcome::new(result)
  }
}

/// A region that can classify cells.
pub trait ContainmentTest {
  fn config(&self) -> &TestConfig;

  /// Classifies `index`. Implementations may request an abort themselves.
  fn test_index(&self, index: &Index) -> TestOutcome;

  /// [`test_index`](Self::test_index), plus the abort requested by
  /// [`TestConfig::abort_on_yes`] on a positive answer.
  fn evaluate(&self, index: &Index) -> TestOutcome {
    let mut outcome = self.test_index(index);
    if self.config().abort_on_yes && outcome.is_positive() {
      outcome.abort = true;
    }
    outcome
  }
}

impl<T: ContainmentTest + ?Sized> ContainmentTest for &T {
  fn config(&self) -> &TestConfig {
    (**self).config()
  }

  fn test_index(&self, index: &Index) -> TestOutcome {
    (**self).test_index(index)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Always(TestConfig, TestResult);

  impl ContainmentTest for Always {
    fn config(&self) -> &TestConfig {
      &self.0
    }

    fn test_index(&self, _index: &Index) -> TestOutcome {
      self.1.into()
    }
  }

  #[test]
  fn test_config_validation() {
    assert_eq!(TestConfig::default(), TestConfig::new(2, 2).unwrap());
    assert_eq!(TestConfig::new(0, 2), Err(DggsError::InvalidResolution));
    assert_eq!(TestConfig::new(2, 41), Err(DggsError::InvalidResolution));
    assert!(TestConfig::new(40, 1).unwrap().with_abort_on_yes(true).abort_on_yes);
  }

  #[test]
  fn test_evaluate_applies_abort_on_yes() {
    let a = Index::face('A').unwrap();
    let config = TestConfig::default().with_abort_on_yes(true);
    assert!(Always(config, TestResult::Yes).evaluate(&a).abort);
    assert!(Always(config, TestResult::YesComplete).evaluate(&a).abort);
    assert!(!Always(config, TestResult::Maybe).evaluate(&a).abort);
    assert!(!Always(TestConfig::default(), TestResult::Yes).evaluate(&a).abort);
    let by_ref = &Always(config, TestResult::No);
    assert_eq!(by_ref.evaluate(&a), TestOutcome::new(TestResult::No));
  }
}
