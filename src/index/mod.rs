//! The `Index` value type: a primary plus the digit path beneath it.
//!
//! A bare primary is a resolution 1 cell; every digit below it adds one resolution.
//! Indices are small `Copy` values so callers pass them around freely.

pub mod inspection;
pub mod string_conv;

use crate::constants::{MAX_DIGITS, MAX_RESOLUTION, PRIMARY_RESOLUTION};
use crate::primaries::{is_face_primary, is_valid_primary, is_vertex_primary};
use crate::types::{DggsError, Direction};
use std::cmp::Ordering;
use std::fmt;

/// Address of one cell of the grid.
///
/// Digits past `len` are always zero so derived equality and hashing see only the path.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Index {
  /// `1..=12` for vertices, `b'A'..=b'T'` for faces, `0` for the null index.
  primary: u8,
  len: u8,
  digits: [u8; MAX_DIGITS],
}

impl Index {
  /// The null index ("no cell").
  pub const NULL: Index = Index {
    primary: 0,
    len: 0,
    digits: [0; MAX_DIGITS],
  };

  /// The resolution 1 cell of vertex primary `vertex` (`1..=12`).
  pub fn vertex(vertex: u8) -> Result<Index, DggsError> {
    if is_vertex_primary(vertex) {
      Ok(Index::from_raw(vertex, &[]))
    } else {
      Err(DggsError::InvalidIndex)
    }
  }

  /// The resolution 1 cell of face primary `face` (`'A'..='T'`).
  pub fn face(face: char) -> Result<Index, DggsError> {
    let code = u8::try_from(face).map_err(|_| DggsError::InvalidIndex)?;
    if is_face_primary(code) {
      Ok(Index::from_raw(code, &[]))
    } else {
      Err(DggsError::InvalidIndex)
    }
  }

  /// Builds an index from a primary code and digits, rejecting anything [`Index::is_valid`] rejects.
  pub fn from_parts(primary: u8, digits: &[u8]) -> Result<Index, DggsError> {
    if !is_valid_primary(primary) || digits.len() > MAX_DIGITS || digits.iter().any(|&d| d > 6) {
      return Err(DggsError::InvalidIndex);
    }
    let index = Index::from_raw(primary, digits);
    if index.is_valid() {
      Ok(index)
    } else {
      Err(DggsError::InvalidIndex)
    }
  }

  /// Builds an index without validation. Callers guarantee the primary and digit bounds.
  pub(crate) fn from_raw(primary: u8, digits: &[u8]) -> Index {
    debug_assert!(digits.len() <= MAX_DIGITS);
    let len = digits.len().min(MAX_DIGITS);
    let mut index = Index {
      primary,
      len: len as u8,
      digits: [0; MAX_DIGITS],
    };
    index.digits[..len].copy_from_slice(&digits[..len]);
    index
  }

  /// Primary code: `1..=12` for vertices, the ASCII letter for faces, `0` when null.
  #[inline]
  #[must_use]
  pub fn primary(&self) -> u8 {
    self.primary
  }

  /// The digit path below the primary.
  #[inline]
  #[must_use]
  pub fn digits(&self) -> &[u8] {
    &self.digits[..usize::from(self.len)]
  }

  #[inline]
  #[must_use]
  pub fn digit_count(&self) -> usize {
    usize::from(self.len)
  }

  /// The digit at position `pos` (0 is the most significant).
  pub fn digit(&self, pos: usize) -> Result<u8, DggsError> {
    self.digits().get(pos).copied().ok_or(DggsError::IndexOutOfRange)
  }

  /// The last digit, if any.
  #[inline]
  #[must_use]
  pub fn last_digit(&self) -> Option<u8> {
    self.digits().last().copied()
  }

  #[inline]
  #[must_use]
  pub fn is_null(&self) -> bool {
    self.primary == 0
  }

  /// True for cells rooted on one of the 12 pentagon primaries.
  #[inline]
  #[must_use]
  pub fn is_vertex(&self) -> bool {
    is_vertex_primary(self.primary)
  }

  /// True for cells rooted on one of the 20 face primaries.
  #[inline]
  #[must_use]
  pub fn is_face(&self) -> bool {
    is_face_primary(self.primary)
  }

  /// Resolution of the cell: 1 for a bare primary, plus one per digit. The null index is 0.
  #[inline]
  #[must_use]
  pub fn resolution(&self) -> u8 {
    if self.is_null() {
      0
    } else {
      self.len + PRIMARY_RESOLUTION
    }
  }

  /// The bare primary this cell descends from.
  #[must_use]
  pub fn root(&self) -> Index {
    Index::from_raw(self.primary, &[])
  }

  /// This cell's ancestor (or zero-padded descendant) at `resolution`.
  pub fn with_resolution(&self, resolution: u8) -> Result<Index, DggsError> {
    debug_assert!(!self.is_null(), "resolution change on the null index");
    if self.is_null() {
      return Err(DggsError::InvalidIndex);
    }
    if !(PRIMARY_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
      return Err(DggsError::InvalidResolution);
    }
    let mut index = *self;
    let len = usize::from(resolution - PRIMARY_RESOLUTION);
    if len < index.digit_count() {
      index.truncate(len);
    } else {
      // Padding digits are already zero.
      index.len = len as u8;
    }
    Ok(index)
  }

  /// The centroid descendant one resolution finer.
  pub fn increment_resolution(&self) -> Result<Index, DggsError> {
    self.with_resolution(self.resolution().saturating_add(1))
  }

  /// The ancestor one resolution coarser. A bare primary has none.
  pub fn decrement_resolution(&self) -> Result<Index, DggsError> {
    self.with_resolution(self.resolution().saturating_sub(1))
  }

  /// The hierarchical parent, or `None` for a bare primary or the null index.
  #[must_use]
  pub fn parent(&self) -> Option<Index> {
    if self.is_null() || self.len == 0 {
      return None;
    }
    let mut parent = *self;
    parent.truncate(usize::from(self.len) - 1);
    Some(parent)
  }

  /// The child reached by appending `dir`.
  ///
  /// `Direction::Zero` gives the centroid child. Other directions need a cell with
  /// vertex children, and a pentagon has no child in its gap direction.
  pub fn child(&self, dir: Direction) -> Result<Index, DggsError> {
    if self.is_null() {
      return Err(DggsError::InvalidIndex);
    }
    if self.digit_count() >= MAX_DIGITS {
      return Err(DggsError::InvalidResolution);
    }
    if dir != Direction::Zero && (!self.has_vertex_children() || !self.is_valid_direction(dir)) {
      return Err(DggsError::InvalidDirection);
    }
    Ok(self.pushed(dir.digit()))
  }

  /// The centroid child one resolution finer.
  pub fn centroid_child(&self) -> Result<Index, DggsError> {
    self.child(Direction::Zero)
  }

  /// Appends a digit without validation.
  pub(crate) fn pushed(&self, digit: u8) -> Index {
    debug_assert!(self.digit_count() < MAX_DIGITS);
    let mut index = *self;
    if let Some(slot) = index.digits.get_mut(usize::from(index.len)) {
      *slot = digit;
      index.len += 1;
    }
    index
  }

  /// Appends several digits without validation, stopping at the maximum resolution.
  pub(crate) fn extended(&self, digits: &[u8]) -> Index {
    let mut index = *self;
    for &digit in digits {
      if usize::from(index.len) >= MAX_DIGITS {
        break;
      }
      index.digits[usize::from(index.len)] = digit;
      index.len += 1;
    }
    index
  }

  /// Same primary with a replaced digit path. Callers guarantee the length bound.
  pub(crate) fn with_digits(&self, digits: &[u8]) -> Index {
    Index::from_raw(self.primary, digits)
  }

  /// Keeps the first `len` digits.
  pub(crate) fn truncate(&mut self, len: usize) {
    let len = len.min(usize::from(self.len));
    self.digits[len..].fill(0);
    self.len = len as u8;
  }
}

impl Default for Index {
  fn default() -> Self {
    Index::NULL
  }
}

impl PartialOrd for Index {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

/// Vertices sort before faces; within a primary, digit paths sort lexicographically
/// with a prefix before its extensions.
impl Ord for Index {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .primary
      .cmp(&other.primary)
      .then_with(|| self.digits().cmp(other.digits()))
  }
}

impl fmt::Debug for Index {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Index({self})")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn idx(s: &str) -> Index {
    s.parse().unwrap()
  }

  #[test]
  fn test_resolution_numbering() {
    assert_eq!(idx("A").resolution(), 1);
    assert_eq!(idx("A-0").resolution(), 2);
    assert_eq!(idx("B-0000200103").resolution(), 11);
    assert_eq!(Index::NULL.resolution(), 0);
  }

  #[test]
  fn test_with_resolution() {
    let index = idx("3-20102");
    assert_eq!(index.with_resolution(3).unwrap(), idx("3-20"));
    assert_eq!(index.with_resolution(1).unwrap(), idx("3"));
    assert_eq!(index.with_resolution(8).unwrap(), idx("3-2010200"));
    assert_eq!(index.with_resolution(0), Err(DggsError::InvalidResolution));
    assert_eq!(index.with_resolution(41), Err(DggsError::InvalidResolution));
  }

  #[test]
  fn test_increment_decrement() {
    assert_eq!(idx("A-0").increment_resolution().unwrap(), idx("A-00"));
    assert_eq!(idx("A-0").decrement_resolution().unwrap(), idx("A"));
    assert_eq!(idx("A").decrement_resolution(), Err(DggsError::InvalidResolution));
  }

  #[test]
  fn test_parent_and_child() {
    assert_eq!(idx("1-20").parent(), Some(idx("1-2")));
    assert_eq!(idx("1-2").parent(), Some(idx("1")));
    assert_eq!(idx("1").parent(), None);

    assert_eq!(idx("1-20").child(Direction::Three).unwrap(), idx("1-203"));
    assert_eq!(idx("1-2").child(Direction::Zero).unwrap(), idx("1-20"));
    // Vertex cells only have a centroid child.
    assert_eq!(idx("1-2").child(Direction::Three), Err(DggsError::InvalidDirection));
    // Pentagon 1 has no child in direction one.
    assert_eq!(idx("1-0").child(Direction::One), Err(DggsError::InvalidDirection));
    assert_eq!(idx("A").child(Direction::Two), Err(DggsError::InvalidDirection));
  }

  #[test]
  fn test_digit_access() {
    let index = idx("D-01");
    assert_eq!(index.digit(0), Ok(0));
    assert_eq!(index.digit(1), Ok(1));
    assert_eq!(index.digit(2), Err(DggsError::IndexOutOfRange));
  }

  #[test]
  fn test_ordering() {
    let mut cells = vec![idx("A-01"), idx("12"), idx("A-0"), idx("1-5"), idx("A"), idx("2")];
    cells.sort();
    assert_eq!(cells, vec![idx("1-5"), idx("2"), idx("12"), idx("A"), idx("A-0"), idx("A-01")]);
  }

  #[test]
  fn test_equality_ignores_padding() {
    let a = idx("A-0100").with_resolution(3).unwrap();
    assert_eq!(a, idx("A-01"));
  }
}
