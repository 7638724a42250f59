// src/iterators.rs

//! Iteration over the directions, neighbours, vertices and descendants of a cell.
//!
//! The direction iterators expose the explicit `direction` / `advance` / `end` state
//! machine as well as the standard [`Iterator`] interface.

use crate::constants::{MAX_DIGITS, MAX_RESOLUTION};
use crate::index::Index;
use crate::math::icos::step;
use crate::primaries::all_primaries;
use crate::types::Direction;

/// Cycles once through the seven directions, from `Zero` to `Six`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexDirectionIterator {
  /// `None` once the cycle is complete.
  current: Option<Direction>,
}

impl Default for HexDirectionIterator {
  fn default() -> Self {
    Self::new()
  }
}

impl HexDirectionIterator {
  #[must_use]
  pub fn new() -> Self {
    Self {
      current: Some(Direction::Zero),
    }
  }

  /// The current direction, or `None` at the end.
  #[must_use]
  pub fn direction(&self) -> Option<Direction> {
    self.current
  }

  /// True once every direction has been visited.
  #[must_use]
  pub fn end(&self) -> bool {
    self.current.is_none()
  }

  /// Moves to the next direction.
  pub fn advance(&mut self) {
    self.current = match self.current {
      Some(Direction::Six) | None => None,
      Some(dir) => Direction::from_digit(dir.digit() + 1),
    };
  }

  /// Restarts the cycle at `Zero`.
  pub fn reset(&mut self) {
    self.current = Some(Direction::Zero);
  }
}

impl Iterator for HexDirectionIterator {
  type Item = Direction;

  fn next(&mut self) -> Option<Direction> {
    let dir = self.current?;
    self.advance();
    Some(dir)
  }
}

/// Like [`HexDirectionIterator`] but skips the gap direction when the cell is a pentagon.
#[derive(Debug, Clone, Copy)]
pub struct ValidDirectionIterator {
  inner: HexDirectionIterator,
  index: Index,
}

impl ValidDirectionIterator {
  #[must_use]
  pub fn new(index: &Index) -> Self {
    Self {
      inner: HexDirectionIterator::new(),
      index: *index,
    }
  }

  #[must_use]
  pub fn direction(&self) -> Option<Direction> {
    self.inner.direction()
  }

  #[must_use]
  pub fn end(&self) -> bool {
    self.inner.end()
  }

  pub fn advance(&mut self) {
    self.inner.advance();
    while let Some(dir) = self.inner.direction() {
      if self.index.is_valid_direction(dir) {
        break;
      }
      self.inner.advance();
    }
  }

  pub fn reset(&mut self) {
    self.inner.reset();
  }
}

impl Iterator for ValidDirectionIterator {
  type Item = Direction;

  fn next(&mut self) -> Option<Direction> {
    let dir = self.direction()?;
    self.advance();
    Some(dir)
  }
}

/// Yields a cell followed by each of its neighbours, in valid-direction order.
///
/// Neighbours may lie on other primaries.
#[derive(Debug, Clone, Copy)]
pub struct NeighbourIterator {
  directions: ValidDirectionIterator,
  index: Index,
}

impl NeighbourIterator {
  #[must_use]
  pub fn new(index: &Index) -> Self {
    debug_assert!(!index.is_null(), "neighbours of the null index");
    Self {
      directions: ValidDirectionIterator::new(index),
      index: *index,
    }
  }

  /// Direction of the neighbour that [`Iterator::next`] returns next.
  #[must_use]
  pub fn direction(&self) -> Option<Direction> {
    self.directions.direction()
  }

  #[must_use]
  pub fn end(&self) -> bool {
    self.directions.end()
  }
}

impl Iterator for NeighbourIterator {
  type Item = Index;

  fn next(&mut self) -> Option<Index> {
    if self.index.is_null() {
      return None;
    }
    for dir in self.directions.by_ref() {
      if let Some(moved) = step(&self.index, dir) {
        return Some(moved.index);
      }
    }
    None
  }
}

/// Yields the vertex cells of a cell: the neighbours of its centroid child, one resolution finer.
#[derive(Debug, Clone, Copy)]
pub struct VertexIterator {
  neighbours: Option<NeighbourIterator>,
}

impl VertexIterator {
  /// Empty for the null index and for cells at the maximum resolution.
  #[must_use]
  pub fn new(index: &Index) -> Self {
    if index.is_null() || index.digit_count() >= MAX_DIGITS {
      return Self { neighbours: None };
    }
    let mut neighbours = NeighbourIterator::new(&index.pushed(0));
    // Skip the centroid itself.
    neighbours.next();
    Self {
      neighbours: Some(neighbours),
    }
  }
}

impl Iterator for VertexIterator {
  type Item = Index;

  fn next(&mut self) -> Option<Index> {
    self.neighbours.as_mut()?.next()
  }
}

/// Yields the immediate children of a cell: the centroid child, then each valid vertex child.
#[derive(Debug, Clone, Copy)]
pub struct ChildIterator {
  parent: Index,
  directions: ValidDirectionIterator,
  vertex_children: bool,
}

impl ChildIterator {
  /// Empty for the null index and for cells at the maximum resolution.
  #[must_use]
  pub fn new(parent: &Index) -> Self {
    let mut directions = ValidDirectionIterator::new(parent);
    if parent.is_null() || parent.digit_count() >= MAX_DIGITS {
      while !directions.end() {
        directions.advance();
      }
    }
    Self {
      parent: *parent,
      directions,
      vertex_children: parent.has_vertex_children(),
    }
  }
}

impl Iterator for ChildIterator {
  type Item = Index;

  fn next(&mut self) -> Option<Index> {
    let dir = self.directions.next()?;
    if dir != Direction::Zero && !self.vertex_children {
      return None;
    }
    Some(self.parent.pushed(dir.digit()))
  }
}

/// Depth-first walk over every descendant of a root at one resolution.
#[derive(Debug, Clone)]
pub struct DescendantIterator {
  stack: Vec<Index>,
  resolution: u8,
}

impl DescendantIterator {
  /// Cells at `resolution` below `root`. Empty if `resolution` is coarser than the root.
  #[must_use]
  pub fn new(root: &Index, resolution: u8) -> Self {
    let mut stack = Vec::new();
    if !root.is_null() && root.resolution() <= resolution && resolution <= MAX_RESOLUTION {
      stack.push(*root);
    }
    Self { stack, resolution }
  }
}

impl Iterator for DescendantIterator {
  type Item = Index;

  fn next(&mut self) -> Option<Index> {
    while let Some(cell) = self.stack.pop() {
      if cell.resolution() >= self.resolution {
        return Some(cell);
      }
      let children: Vec<Index> = ChildIterator::new(&cell).collect();
      self.stack.extend(children.into_iter().rev());
    }
    None
  }
}

/// Every cell of the globe at one resolution, primary by primary.
#[derive(Debug, Clone)]
pub struct ResolutionIterator {
  roots: std::vec::IntoIter<Index>,
  current: Option<DescendantIterator>,
  resolution: u8,
}

impl ResolutionIterator {
  /// Cells at `resolution` (`1..=40`). Empty outside that range.
  #[must_use]
  pub fn new(resolution: u8) -> Self {
    let roots: Vec<Index> = if (1..=MAX_RESOLUTION).contains(&resolution) {
      all_primaries().map(|p| Index::from_raw(p, &[])).collect()
    } else {
      Vec::new()
    };
    Self {
      roots: roots.into_iter(),
      current: None,
      resolution,
    }
  }
}

impl Iterator for ResolutionIterator {
  type Item = Index;

  fn next(&mut self) -> Option<Index> {
    loop {
      if let Some(cell) = self.current.as_mut().and_then(Iterator::next) {
        return Some(cell);
      }
      let root = self.roots.next()?;
      self.current = Some(DescendantIterator::new(&root, self.resolution));
    }
  }
}
