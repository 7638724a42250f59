// src/index/inspection.rs

//! Structural predicates on a single index.

use super::Index;
use crate::math::sub_index::hex_sector;
use crate::primaries::is_valid_vertex_direction;
use crate::types::{Direction, HexClass};

impl Index {
  /// True if the cell is one of the 12 pentagons at some resolution: a vertex primary
  /// followed only by centroid digits.
  #[must_use]
  pub fn is_pentagon(&self) -> bool {
    self.is_pentagon_prefix(self.digit_count())
  }

  /// [`Index::is_pentagon`] evaluated on the first `digit_count` digits.
  #[must_use]
  pub fn is_pentagon_prefix(&self, digit_count: usize) -> bool {
    let count = digit_count.min(self.digit_count());
    self.is_vertex() && self.digits()[..count].iter().all(|&d| d == 0)
  }

  #[inline]
  #[must_use]
  pub fn is_hexagon(&self) -> bool {
    !self.is_null() && !self.is_pentagon()
  }

  /// True if the cell has vertex children as well as a centroid child.
  ///
  /// Centroid cells (last digit zero) do; vertex cells (last digit non-zero) don't.
  /// Of the bare primaries only the vertices do.
  #[must_use]
  pub fn has_vertex_children(&self) -> bool {
    match self.last_digit() {
      Some(d) => d == 0,
      None => self.is_vertex(),
    }
  }

  /// Grid class of the cell's resolution.
  #[must_use]
  pub fn hex_class(&self) -> HexClass {
    HexClass::for_resolution(i32::from(self.resolution()))
  }

  /// The most significant non-zero digit, or `Zero` for a centroid path.
  #[must_use]
  pub fn hex_sector(&self) -> Direction {
    hex_sector(self.digits())
  }

  /// False only for a pentagon's gap direction.
  #[must_use]
  pub fn is_valid_direction(&self, dir: Direction) -> bool {
    dir == Direction::Zero || !self.is_pentagon() || is_valid_vertex_direction(self.primary(), dir)
  }

  /// Checks the digit path against the grid's structure.
  ///
  /// Digits must be `0..=6` with no two non-zero digits in a row, a face's first digit
  /// must be zero and a vertex path must not start into the pentagon's gap.
  #[must_use]
  pub fn is_valid(&self) -> bool {
    if self.is_null() {
      return false;
    }
    let digits = self.digits();
    if digits.iter().any(|&d| d > 6) || digits.windows(2).any(|w| w[0] != 0 && w[1] != 0) {
      return false;
    }
    if self.is_face() {
      digits.first().map_or(true, |&d| d == 0)
    } else {
      is_valid_vertex_direction(self.primary(), self.hex_sector())
    }
  }

  /// Number of children of the prefix made of the first `digit_count` digits.
  #[must_use]
  pub fn max_child_count(&self, digit_count: usize) -> usize {
    let count = digit_count.min(self.digit_count());
    if count == 0 {
      return if self.is_vertex() { 6 } else { 1 };
    }
    if self.digits()[count - 1] != 0 {
      1
    } else if self.is_pentagon_prefix(count) {
      6
    } else {
      7
    }
  }

  /// True if `other` lies in this cell's descendant tree. A cell is its own ancestor.
  #[must_use]
  pub fn is_ancestor_of(&self, other: &Index) -> bool {
    !self.is_null() && self.primary() == other.primary() && other.digits().starts_with(self.digits())
  }

  #[must_use]
  pub fn is_descendant_of(&self, other: &Index) -> bool {
    other.is_ancestor_of(self)
  }

  /// The finest cell both indices descend from, or the null index across primaries.
  #[must_use]
  pub fn common_ancestor(&self, other: &Index) -> Index {
    if self.is_null() || self.primary() != other.primary() {
      return Index::NULL;
    }
    let shared = self
      .digits()
      .iter()
      .zip(other.digits())
      .take_while(|(a, b)| a == b)
      .count();
    self.with_digits(&self.digits()[..shared])
  }
}
