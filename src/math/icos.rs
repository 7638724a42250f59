// src/math/icos.rs

//! Adjacency on the icosahedron.
//!
//! A move first steps on the plane of the cell's own primary. If the step carries out of
//! the primary's digit extent, the overflowing digits select a neighbouring primary from
//! the fixed connection tables and the remaining digits are rotated into that primary's
//! frame. Steps that land inside a pentagon's missing sector are rotated back out of it.

use crate::index::Index;
use crate::math::sub_index::{hex_sector, planar_move, rotate};
use crate::primaries::{
  is_valid_vertex_direction, is_vertex_primary, res0_connection, res1_connection, res2_overflow, NO_CONNECTION,
};
use crate::types::{DggsError, Direction};

/// Result of a move: the neighbour and the counter-clockwise rotation (`0..6`) applied to its digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
  pub index: Index,
  pub rotation: u8,
}

/// Rotates the digits of `index` by `steps` sixths of a turn (positive is counter-clockwise).
fn rotated(index: &Index, steps: i32) -> Index {
  let steps = steps.rem_euclid(6) as u8;
  if steps == 0 {
    return *index;
  }
  index.with_digits(&rotate(index.digits(), steps, true))
}

fn normalise(rotation: i32) -> u8 {
  rotation.rem_euclid(6) as u8
}

/// Vertex-to-vertex move. `None` in a pentagon's gap direction.
fn resolution0_step(primary: u8, digits: &[u8], dir: Direction) -> Option<(Index, i32)> {
  let conn = res0_connection(primary, dir);
  if conn == NO_CONNECTION {
    return None;
  }
  let index = Index::from_raw(conn.primary, digits);
  let rotation = i32::from(conn.rotation);
  Some((rotated(&index, rotation), rotation))
}

/// Primary-to-primary move at resolution 1.
///
/// A vertex's gap entry falls back to the previous direction followed by one clockwise turn.
fn resolution1_step(primary: u8, digits: &[u8], dir: Direction) -> (Index, i32) {
  let mut dir = dir;
  let mut clockwise_turns = 0;
  loop {
    let conn = res1_connection(primary, dir);
    if conn != NO_CONNECTION {
      let rotation = i32::from(conn.rotation) - clockwise_turns;
      let index = Index::from_raw(conn.primary, digits);
      return (rotated(&index, rotation), rotation);
    }
    dir = dir.rotate(-1);
    clockwise_turns += 1;
  }
}

/// Face-to-vertex move when a face cell's first digit overflows at resolution 2 and finer.
fn resolution2_step(primary: u8, digits: &[u8]) -> (Index, i32) {
  let overflow = res2_overflow(primary, digits[0]);
  let mut moved = digits.to_vec();
  moved[0] = overflow.digit;
  let index = Index::from_raw(overflow.vertex, &moved);
  let rotation = i32::from(overflow.rotation);
  (rotated(&index, rotation), rotation)
}

/// The neighbour of a non-null cell in a direction already known to be valid for it.
pub(crate) fn step(index: &Index, dir: Direction) -> Option<Step> {
  debug_assert!(!index.is_null());
  if dir == Direction::Zero {
    return Some(Step {
      index: *index,
      rotation: 0,
    });
  }

  let primary = index.primary();
  let digits = index.digits();
  if digits.is_empty() {
    let (moved, rotation) = resolution1_step(primary, digits, dir);
    return Some(Step {
      index: moved,
      rotation: normalise(rotation),
    });
  }

  let moved = planar_move(digits, dir);
  let (mut result, mut rotation) = match moved.len().checked_sub(digits.len())? {
    0 => {
      if !is_vertex_primary(primary) && moved[0] != 0 {
        resolution2_step(primary, &moved)
      } else {
        (index.with_digits(&moved), 0)
      }
    }
    1 => {
      let overflow = Direction::from_digit(moved[0])?;
      resolution1_step(primary, &moved[1..], overflow)
    }
    2 => {
      let overflow = Direction::from_digit(moved[0])?;
      resolution0_step(primary, &moved[2..], overflow)?
    }
    _ => return None,
  };

  // Landing inside a pentagon's gap: turn one sector back towards where we started.
  if result.is_vertex() {
    let sector = result.hex_sector();
    if !is_valid_vertex_direction(result.primary(), sector) {
      let start_sector = hex_sector(digits).digit() % 6 + 1;
      let turn = if start_sector > sector.digit() { -1 } else { 1 };
      result = rotated(&result, turn);
      rotation += turn;
    }
  }

  Some(Step {
    index: result,
    rotation: normalise(rotation),
  })
}

/// The neighbour of `index` in direction `dir`, along with the digit rotation applied.
///
/// The neighbour may sit on another primary; its digit count always matches the source.
/// Fails for the null index and for a pentagon's gap direction.
pub fn move_with_rotation(index: &Index, dir: Direction) -> Result<Step, DggsError> {
  if index.is_null() {
    return Err(DggsError::InvalidIndex);
  }
  if !index.is_valid_direction(dir) {
    return Err(DggsError::InvalidDirection);
  }
  step(index, dir).ok_or(DggsError::InvalidDirection)
}

/// The neighbour of `index` in direction `dir`.
pub fn move_index(index: &Index, dir: Direction) -> Result<Index, DggsError> {
  move_with_rotation(index, dir).map(|s| s.index)
}

/// Like [`move_index`], but fails with [`DggsError::BoundaryCrossing`] when the neighbour
/// leaves the source's primary or changes its digit count.
pub fn move_within_root(index: &Index, dir: Direction) -> Result<Index, DggsError> {
  let moved = move_index(index, dir)?;
  if moved.primary() != index.primary() || moved.digit_count() != index.digit_count() {
    return Err(DggsError::BoundaryCrossing);
  }
  Ok(moved)
}

/// The resolution 0 move between the 12 vertices, carrying `index`'s digits along.
pub fn resolution0_move(index: &Index, dir: Direction) -> Result<Index, DggsError> {
  if !index.is_vertex() {
    return Err(DggsError::InvalidIndex);
  }
  if dir == Direction::Zero {
    return Ok(*index);
  }
  resolution0_step(index.primary(), index.digits(), dir)
    .map(|(moved, _)| moved)
    .ok_or(DggsError::InvalidDirection)
}

/// The direction that leads from `from` to its neighbour `to`, or `Zero` if they are not adjacent.
#[must_use]
pub fn neighbour_direction(from: &Index, to: &Index) -> Direction {
  if from.is_null() || to.is_null() || from.digit_count() != to.digit_count() {
    return Direction::Zero;
  }
  Direction::NON_ZERO
    .into_iter()
    .filter(|&dir| from.is_valid_direction(dir))
    .find(|&dir| step(from, dir).is_some_and(|s| s.index == *to))
    .unwrap_or(Direction::Zero)
}

/// Rotates `dir` by `steps` sixths of a turn around `index`, skipping a pentagon's gap.
#[must_use]
pub fn rotate_direction(index: &Index, dir: Direction, steps: i32) -> Direction {
  if dir == Direction::Zero {
    return dir;
  }
  if !index.is_pentagon() {
    return dir.rotate(steps);
  }
  let unit = steps.signum();
  let mut current = dir;
  for _ in 0..steps.unsigned_abs() {
    current = current.rotate(unit);
    if !index.is_valid_direction(current) {
      current = current.rotate(unit);
    }
  }
  current
}

impl Index {
  /// The adjacent cell in direction `dir`. See [`move_index`].
  pub fn neighbour(&self, dir: Direction) -> Result<Index, DggsError> {
    move_index(self, dir)
  }

  /// The adjacent cell, constrained to this cell's primary. See [`move_within_root`].
  pub fn neighbour_within_root(&self, dir: Direction) -> Result<Index, DggsError> {
    move_within_root(self, dir)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn idx(s: &str) -> Index {
    s.parse().unwrap()
  }

  fn dir(d: u8) -> Direction {
    Direction::from_digit(d).unwrap()
  }

  fn check(from: &str, d: u8, to: &str) {
    assert_eq!(move_index(&idx(from), dir(d)).unwrap(), idx(to), "{from} --{d}-->");
  }

  #[test]
  fn test_moves_within_a_face() {
    check("3-00201", 6, "3-06030");
    check("3-06030", 2, "3-00201");
    check("1-206", 6, "1-602");
  }

  #[test]
  fn test_moves_across_primaries() {
    check("3-40404", 4, "7-10101");
    check("7-10101", 1, "3-40404");
    check("K-020202", 2, "F-050505");
    check("F-050505", 5, "K-020202");
    check("3-4020", 2, "F-0606");
    check("F-0606", 5, "3-4020");
  }

  #[test]
  fn test_moves_around_pentagon_gap() {
    check("1-60501", 6, "D-06010");
    check("D-06010", 2, "1-60501");
    check("1-605006", 6, "D-060102");
  }

  #[test]
  fn test_moves_between_vertex_and_face() {
    check("03-201", 6, "B-030");
    check("3-201", 1, "B-003");
    check("3-201", 2, "B-020");
    check("B-030", 2, "3-201");
    check("B-003", 3, "3-201");
    check("B-020", 4, "3-201");
    check("B-020", 3, "3-202");
    check("3-202", 1, "B-020");
    check("B-020", 2, "1-303");
    check("1-303", 4, "B-020");
  }

  #[test]
  fn test_resolution1_moves() {
    check("1", 6, "E");
    check("E", 3, "6");
  }

  #[test]
  fn test_resolution0_move() {
    assert_eq!(resolution0_move(&idx("1"), Direction::Four).unwrap(), idx("4"));
    assert_eq!(resolution0_move(&idx("1"), Direction::One), Err(DggsError::InvalidDirection));
    assert_eq!(resolution0_move(&idx("A"), Direction::Two), Err(DggsError::InvalidIndex));
  }

  #[test]
  fn test_gap_direction_rejected() {
    assert_eq!(move_index(&idx("1-00"), Direction::One), Err(DggsError::InvalidDirection));
    assert_eq!(move_index(&idx("7-0"), Direction::Four), Err(DggsError::InvalidDirection));
    assert_eq!(move_index(&Index::NULL, Direction::One), Err(DggsError::InvalidIndex));
  }

  #[test]
  fn test_move_within_root() {
    assert_eq!(move_within_root(&idx("A-00"), Direction::Two).unwrap(), idx("A-02"));
    assert_eq!(move_within_root(&idx("B-05"), Direction::Four), Err(DggsError::BoundaryCrossing));
  }

  #[test]
  fn test_neighbour_direction() {
    assert_eq!(neighbour_direction(&idx("3-201"), &idx("B-030")), Direction::Six);
    assert_eq!(neighbour_direction(&idx("B-030"), &idx("3-201")), Direction::Two);
    assert_eq!(neighbour_direction(&idx("A-00"), &idx("A-00")), Direction::Zero);
    assert_eq!(neighbour_direction(&idx("A-00"), &idx("C-00")), Direction::Zero);
  }

  #[test]
  fn test_rotate_direction_skips_gap() {
    let pentagon = idx("1-0");
    assert_eq!(rotate_direction(&pentagon, Direction::Six, 1), Direction::Two);
    assert_eq!(rotate_direction(&pentagon, Direction::Two, -1), Direction::Six);
    let hexagon = idx("A-0");
    assert_eq!(rotate_direction(&hexagon, Direction::Six, 1), Direction::One);
  }

  #[test]
  fn test_rotation_reported() {
    let step = move_with_rotation(&idx("1"), Direction::Two).unwrap();
    assert_eq!(step.index, idx("A"));
    assert_eq!(step.rotation, 2);
    let step = move_with_rotation(&idx("A-00"), Direction::One).unwrap();
    assert_eq!(step.rotation, 0);
  }
}
