// src/containment/traverser.rs

use super::{ContainmentTest, TestOutcome};
use crate::constants::{MAX_RESOLUTION, PRIMARY_RESOLUTION};
use crate::index::Index;
use crate::iterators::ChildIterator;
use crate::primaries::all_primaries;
use crate::tiles::TileCollection;
use crate::types::{DggsError, TestResult};
use std::sync::OnceLock;
use tracing::{debug, debug_span, trace};

/// Depth-first containment search over the cell hierarchy.
///
/// Cells are kept on an explicit work stack, so the depth of the search is bounded only by
/// the resolution range.
#[derive(Debug)]
pub struct Traverser<'a, T: ContainmentTest + ?Sized> {
  test: &'a T,
  aggregate: bool,
  aborted: bool,
  tested: usize,
}

impl<'a, T: ContainmentTest + ?Sized> Traverser<'a, T> {
  #[must_use]
  pub fn new(test: &'a T) -> Self {
    Self {
      test,
      aggregate: true,
      aborted: false,
      tested: 0,
    }
  }

  /// Whether the resulting collection aggregates complete sibling sets. On by default.
  #[must_use]
  pub fn with_aggregation(mut self, aggregate: bool) -> Self {
    self.aggregate = aggregate;
    self
  }

  /// True if the last traversal stopped on a test's abort request.
  #[must_use]
  pub fn aborted(&self) -> bool {
    self.aborted
  }

  /// Number of test calls made by the last traversal.
  #[must_use]
  pub fn tested(&self) -> usize {
    self.tested
  }

  /// Collects the cells at `target_resolution` that the test accepts, below `root` or over
  /// the whole globe when `root` is `None`.
  ///
  /// An aborted traversal returns what was recorded before the abort.
  pub fn traverse(&mut self, root: Option<&Index>, target_resolution: u8) -> Result<TileCollection, DggsError> {
    if !(PRIMARY_RESOLUTION..=MAX_RESOLUTION).contains(&target_resolution) {
      return Err(DggsError::InvalidResolution);
    }
    let mut stack: Vec<Index> = match root {
      Some(root) if !root.is_valid() => return Err(DggsError::InvalidIndex),
      Some(root) if root.resolution() > target_resolution => return Err(DggsError::InvalidResolution),
      Some(root) => vec![*root],
      None => {
        let mut roots: Vec<Index> = all_primaries().map(|p| Index::from_raw(p, &[])).collect();
        roots.reverse();
        roots
      }
    };

    let span = debug_span!(
      "traverse",
      root = %root.map_or_else(|| "globe".to_string(), ToString::to_string),
      target = target_resolution,
      data = self.test.config().data_resolution,
    );
    let _guard = span.enter();

    self.aborted = false;
    self.tested = 0;
    let mut tiles = TileCollection::new().with_auto_aggregate(self.aggregate);

    while let Some(cell) = stack.pop() {
      let Some(outcome) = self.run_test(&cell) else {
        break;
      };

      if cell.resolution() >= target_resolution {
        let result = match outcome.result {
          TestResult::Maybe => match self.resolve_maybe(&cell) {
            Some(result) => result,
            None => break,
          },
          result => result,
        };
        if matches!(result, TestResult::Yes | TestResult::YesComplete) {
          trace!(%cell, "recorded");
          tiles.add_index(&cell, target_resolution)?;
        }
        continue;
      }

      match outcome.result {
        TestResult::No => {}
        TestResult::YesComplete if cell.has_vertex_children() => {
          // The centroid child lies wholly inside its parent; the vertex children straddle
          // the parent's edge and are tested on their own.
          let mut children = ChildIterator::new(&cell);
          if let Some(centroid) = children.next() {
            trace!(cell = %centroid, "recorded centroid");
            tiles.add_index(&centroid, target_resolution)?;
          }
          let vertex_children: Vec<Index> = children.collect();
          stack.extend(vertex_children.into_iter().rev());
        }
        TestResult::YesComplete => {
          trace!(%cell, "recorded");
          tiles.add_index(&cell, target_resolution)?;
        }
        TestResult::Yes | TestResult::Maybe => {
          let children: Vec<Index> = ChildIterator::new(&cell).collect();
          stack.extend(children.into_iter().rev());
        }
      }
    }

    if self.aborted {
      debug!(tested = self.tested, "traversal aborted");
    }
    debug!(tested = self.tested, tiles = tiles.tile_count(), "traversal finished");
    Ok(tiles)
  }

  /// Runs the test on `cell`, returning `None` when it asks to abort.
  fn run_test(&mut self, cell: &Index) -> Option<TestOutcome> {
    let outcome = self.test.evaluate(cell);
    self.tested += 1;
    trace!(%cell, result = ?outcome.result, "tested");
    if outcome.abort {
      self.aborted = true;
      return None;
    }
    Some(outcome)
  }

  /// Settles an undecided cell by probing its descendants down to the data resolution.
  ///
  /// `Yes` as soon as any descendant tests positive, `No` when none does. `None` on abort.
  fn resolve_maybe(&mut self, cell: &Index) -> Option<TestResult> {
    let data_resolution = self.test.config().data_resolution;
    if cell.resolution() >= data_resolution {
      return Some(TestResult::No);
    }
    let mut stack: Vec<Index> = ChildIterator::new(cell).collect();
    stack.reverse();
    while let Some(child) = stack.pop() {
      let outcome = self.run_test(&child)?;
      match outcome.result {
        TestResult::Yes | TestResult::YesComplete => return Some(TestResult::Yes),
        TestResult::Maybe if child.resolution() < data_resolution => {
          let children: Vec<Index> = ChildIterator::new(&child).collect();
          stack.extend(children.into_iter().rev());
        }
        _ => {}
      }
    }
    Some(TestResult::No)
  }
}

/// A test paired with its global coverage, computed on first use.
#[derive(Debug)]
pub struct CachedCoverage<T> {
  test: T,
  target_resolution: u8,
  tiles: OnceLock<Result<TileCollection, DggsError>>,
}

impl<T: ContainmentTest> CachedCoverage<T> {
  #[must_use]
  pub fn new(test: T, target_resolution: u8) -> Self {
    Self {
      test,
      target_resolution,
      tiles: OnceLock::new(),
    }
  }

  #[must_use]
  pub fn test(&self) -> &T {
    &self.test
  }

  /// The cells of the whole globe the test accepts at the target resolution.
  pub fn tiles(&self) -> Result<&TileCollection, DggsError> {
    self
      .tiles
      .get_or_init(|| Traverser::new(&self.test).traverse(None, self.target_resolution))
      .as_ref()
      .map_err(|err| *err)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::containment::TestConfig;
  use std::cell::Cell;

  fn idx(s: &str) -> Index {
    s.parse().unwrap()
  }

  fn strs(c: &TileCollection) -> Vec<String> {
    c.indices().map(|i| i.to_string()).collect()
  }

  /// Accepts one cell and everything inside it.
  struct SingleLeaf {
    config: TestConfig,
    leaf: Index,
  }

  impl ContainmentTest for SingleLeaf {
    fn config(&self) -> &TestConfig {
      &self.config
    }

    fn test_index(&self, index: &Index) -> TestOutcome {
      if self.leaf.is_ancestor_of(index) {
        TestResult::YesComplete.into()
      } else if index.is_ancestor_of(&self.leaf) {
        TestResult::Maybe.into()
      } else {
        TestResult::No.into()
      }
    }
  }

  /// Gives the same answer everywhere and counts its calls.
  struct Constant {
    config: TestConfig,
    result: TestResult,
    calls: Cell<usize>,
  }

  impl Constant {
    fn new(config: TestConfig, result: TestResult) -> Self {
      Self {
        config,
        result,
        calls: Cell::new(0),
      }
    }
  }

  impl ContainmentTest for Constant {
    fn config(&self) -> &TestConfig {
      &self.config
    }

    fn test_index(&self, _index: &Index) -> TestOutcome {
      self.calls.set(self.calls.get() + 1);
      self.result.into()
    }
  }

  #[test]
  fn test_single_leaf_at_data_resolution() {
    let test = SingleLeaf {
      config: TestConfig::new(5, 5).unwrap(),
      leaf: idx("B-0203"),
    };
    let mut traverser = Traverser::new(&test);
    let tiles = traverser.traverse(None, 5).unwrap();
    assert_eq!(strs(&tiles), ["B-0203"]);
    assert_eq!(tiles.cell_resolution(), 5);
    assert!(!traverser.aborted());
  }

  #[test]
  fn test_maybe_resolved_below_target() {
    let test = SingleLeaf {
      config: TestConfig::new(5, 3).unwrap(),
      leaf: idx("B-0203"),
    };
    let tiles = Traverser::new(&test).traverse(None, 3).unwrap();
    assert_eq!(strs(&tiles), ["B-02"]);
  }

  #[test]
  fn test_yes_everywhere_aggregates() {
    let test = Constant::new(TestConfig::new(3, 3).unwrap(), TestResult::Yes);
    let tiles = Traverser::new(&test).traverse(Some(&idx("A")), 3).unwrap();
    assert_eq!(strs(&tiles), ["A"]);
    assert_eq!(tiles.cell_count(), 7);
  }

  #[test]
  fn test_yes_complete_records_centroid_and_tests_vertices() {
    let test = Constant::new(TestConfig::new(4, 4).unwrap(), TestResult::YesComplete);
    let mut traverser = Traverser::new(&test).with_aggregation(false);
    let tiles = traverser.traverse(Some(&idx("B-0")), 4).unwrap();
    assert_eq!(traverser.tested(), 7);
    assert_eq!(test.calls.get(), 7);
    assert_eq!(strs(&tiles), ["B-00", "B-01", "B-02", "B-03", "B-04", "B-05", "B-06"]);
    assert_eq!(tiles.cell_count(), 13);

    let aggregated = Traverser::new(&test).traverse(Some(&idx("B-0")), 4).unwrap();
    assert!(aggregated.contains(&idx("B-0")));
    assert_eq!(aggregated.cell_count(), 13);
  }

  #[test]
  fn test_abort_on_yes() {
    let config = TestConfig::new(6, 6).unwrap().with_abort_on_yes(true);
    let test = Constant::new(config, TestResult::Yes);
    let mut traverser = Traverser::new(&test);
    let tiles = traverser.traverse(None, 6).unwrap();
    assert!(traverser.aborted());
    assert!(tiles.is_empty());
    assert_eq!(traverser.tested(), 1);
  }

  #[test]
  fn test_maybe_at_data_resolution_is_no() {
    let test = Constant::new(TestConfig::new(3, 3).unwrap(), TestResult::Maybe);
    let mut traverser = Traverser::new(&test);
    let tiles = traverser.traverse(Some(&idx("A")), 3).unwrap();
    assert!(tiles.is_empty());
    assert_eq!(traverser.tested(), 1 + 1 + 7);
  }

  #[test]
  fn test_maybe_probes_down_to_data_resolution() {
    let test = Constant::new(TestConfig::new(5, 3).unwrap(), TestResult::Maybe);
    let mut traverser = Traverser::new(&test);
    let tiles = traverser.traverse(Some(&idx("A-01")), 3).unwrap();
    assert!(tiles.is_empty());
    // A-01, then A-010, then its seven children at the data resolution.
    assert_eq!(traverser.tested(), 1 + 1 + 7);
  }

  #[test]
  fn test_invalid_arguments() {
    let test = Constant::new(TestConfig::default(), TestResult::Yes);
    let mut traverser = Traverser::new(&test);
    assert_eq!(traverser.traverse(Some(&idx("B-02")), 2), Err(DggsError::InvalidResolution));
    assert_eq!(traverser.traverse(None, 0), Err(DggsError::InvalidResolution));
    assert_eq!(traverser.traverse(None, 41), Err(DggsError::InvalidResolution));
    assert_eq!(traverser.traverse(Some(&Index::NULL), 4), Err(DggsError::InvalidIndex));
  }

  #[test]
  fn test_cached_coverage_runs_once() {
    let test = Constant::new(TestConfig::new(2, 2).unwrap(), TestResult::No);
    let cached = CachedCoverage::new(test, 2);
    assert!(cached.tiles().unwrap().is_empty());
    let calls = cached.test().calls.get();
    assert_eq!(calls, 32);
    assert!(cached.tiles().unwrap().is_empty());
    assert_eq!(cached.test().calls.get(), calls);
  }
}
