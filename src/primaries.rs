//! Primary (root) cells and the fixed connection tables between them.
//!
//! Vertices `1..=12` are the pentagons at the icosahedron's corners; faces `'A'..='T'`
//! are the hexagons at its face centres. Every table below is indexed by
//! `[primary slot][direction - 1]`.

use crate::constants::{FIRST_FACE, LAST_FACE, NUM_ROOTS, NUM_VERTICES};
use crate::types::Direction;

/// A neighbouring primary and the counter-clockwise rotation applied to digits carried across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Connection {
  pub primary: u8,
  pub rotation: u8,
}

/// Entry for the gap direction of a pentagon.
pub(crate) const NO_CONNECTION: Connection = Connection { primary: 0, rotation: 0 };

const fn c(primary: u8, rotation: u8) -> Connection {
  Connection { primary, rotation }
}

const fn f(face: char) -> Connection {
  Connection {
    primary: face as u8,
    rotation: 0,
  }
}

const fn fr(face: char, rotation: u8) -> Connection {
  Connection {
    primary: face as u8,
    rotation,
  }
}

const X: Connection = NO_CONNECTION;

/// Vertex-to-vertex moves at resolution 0.
#[rustfmt::skip]
pub(crate) static RES0_CONNECT: [[Connection; 6]; NUM_VERTICES as usize] = [
  [X,        c(2, 3),  c(3, 2),  c(4, 1),  c(5, 0),  c(6, 5)],  // 1
  [X,        c(1, 3),  c(6, 0),  c(11, 0), c(7, 0),  c(3, 0)],  // 2
  [X,        c(1, 4),  c(2, 0),  c(7, 0),  c(8, 0),  c(4, 0)],  // 3
  [X,        c(1, 5),  c(3, 0),  c(8, 0),  c(9, 0),  c(5, 0)],  // 4
  [X,        c(1, 0),  c(4, 0),  c(9, 0),  c(10, 0), c(6, 0)],  // 5
  [X,        c(1, 1),  c(5, 0),  c(10, 0), c(11, 0), c(2, 0)],  // 6
  [c(3, 0),  c(2, 0),  c(11, 0), X,        c(12, 1), c(8, 0)],  // 7
  [c(4, 0),  c(3, 0),  c(7, 0),  X,        c(12, 0), c(9, 0)],  // 8
  [c(5, 0),  c(4, 0),  c(8, 0),  X,        c(12, 5), c(10, 0)], // 9
  [c(6, 0),  c(5, 0),  c(9, 0),  X,        c(12, 4), c(11, 0)], // 10
  [c(2, 0),  c(6, 0),  c(10, 0), X,        c(12, 3), c(7, 0)],  // 11
  [c(9, 1),  c(8, 0),  c(7, 5),  X,        c(11, 3), c(10, 2)], // 12
];

/// Vertex-to-face moves at resolution 1.
#[rustfmt::skip]
pub(crate) static RES1_VERTEX_CONNECT: [[Connection; 6]; NUM_VERTICES as usize] = [
  [X,           fr('A', 2), fr('B', 1), f('C'), fr('D', 5), fr('E', 4)], // 1
  [X,           f('E'),     f('J'),     f('O'), f('F'),     f('A')],     // 2
  [X,           f('A'),     f('F'),     f('K'), f('G'),     f('B')],     // 3
  [X,           f('B'),     f('G'),     f('L'), f('H'),     f('C')],     // 4
  [X,           f('C'),     f('H'),     f('M'), f('I'),     f('D')],     // 5
  [X,           f('D'),     f('I'),     f('N'), f('J'),     f('E')],     // 6
  [f('F'),      f('O'),     f('T'),     X,      f('P'),     f('K')],     // 7
  [f('G'),      f('K'),     f('P'),     X,      f('Q'),     f('L')],     // 8
  [f('H'),      f('L'),     f('Q'),     X,      f('R'),     f('M')],     // 9
  [f('I'),      f('M'),     f('R'),     X,      f('S'),     f('N')],     // 10
  [f('J'),      f('N'),     f('S'),     X,      f('T'),     f('O')],     // 11
  [f('Q'),      fr('P', 5), fr('T', 4), X,      fr('S', 2), fr('R', 1)], // 12
];

/// Face-to-primary moves at resolution 1.
#[rustfmt::skip]
pub(crate) static RES1_FACE_CONNECT: [[Connection; 6]; 20] = [
  [c(1, 4), fr('E', 1), c(2, 0),  f('F'),     c(3, 0),  fr('B', 5)], // A
  [c(1, 5), fr('A', 1), c(3, 0),  f('G'),     c(4, 0),  fr('C', 5)], // B
  [c(1, 0), fr('B', 1), c(4, 0),  f('H'),     c(5, 0),  fr('D', 5)], // C
  [c(1, 1), fr('C', 1), c(5, 0),  f('I'),     c(6, 0),  fr('E', 5)], // D
  [c(1, 2), fr('D', 1), c(6, 0),  f('J'),     c(2, 0),  fr('A', 5)], // E
  [f('A'),  c(2, 0),    f('O'),   c(7, 0),    f('K'),   c(3, 0)],    // F
  [f('B'),  c(3, 0),    f('K'),   c(8, 0),    f('L'),   c(4, 0)],    // G
  [f('C'),  c(4, 0),    f('L'),   c(9, 0),    f('M'),   c(5, 0)],    // H
  [f('D'),  c(5, 0),    f('M'),   c(10, 0),   f('N'),   c(6, 0)],    // I
  [f('E'),  c(6, 0),    f('N'),   c(11, 0),   f('O'),   c(2, 0)],    // J
  [c(3, 0), f('F'),     c(7, 0),  f('P'),     c(8, 0),  f('G')],     // K
  [c(4, 0), f('G'),     c(8, 0),  f('Q'),     c(9, 0),  f('H')],     // L
  [c(5, 0), f('H'),     c(9, 0),  f('R'),     c(10, 0), f('I')],     // M
  [c(6, 0), f('I'),     c(10, 0), f('S'),     c(11, 0), f('J')],     // N
  [c(2, 0), f('J'),     c(11, 0), f('T'),     c(7, 0),  f('F')],     // O
  [f('K'),  c(7, 0),    fr('T', 5), c(12, 1), fr('Q', 1), c(8, 0)],  // P
  [f('L'),  c(8, 0),    fr('P', 5), c(12, 0), fr('R', 1), c(9, 0)],  // Q
  [f('M'),  c(9, 0),    fr('Q', 5), c(12, 5), fr('S', 1), c(10, 0)], // R
  [f('N'),  c(10, 0),   fr('R', 5), c(12, 4), fr('T', 1), c(11, 0)], // S
  [f('O'),  c(11, 0),   fr('S', 5), c(12, 2), fr('P', 1), c(7, 0)],  // T
];

/// Destination of a face cell whose first digit overflows onto a vertex at resolution 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FaceOverflow {
  pub vertex: u8,
  pub digit: u8,
  pub rotation: u8,
}

const fn o(vertex: u8, digit: u8, rotation: u8) -> FaceOverflow {
  FaceOverflow { vertex, digit, rotation }
}

/// Face-to-vertex overflow at resolution 2, indexed by `[face][first digit - 1]`.
#[rustfmt::skip]
pub(crate) static RES2_FACE_CONNECT: [[FaceOverflow; 6]; 20] = [
  [o(1, 5, 4),  o(1, 4, 4),  o(2, 1, 1),  o(2, 6, 0),  o(3, 3, 0),  o(3, 2, 0)],  // A
  [o(1, 5, 5),  o(1, 4, 5),  o(3, 1, 1),  o(3, 6, 0),  o(4, 3, 0),  o(4, 2, 0)],  // B
  [o(1, 5, 0),  o(1, 4, 0),  o(4, 1, 1),  o(4, 6, 0),  o(5, 3, 0),  o(5, 2, 0)],  // C
  [o(1, 5, 1),  o(1, 4, 1),  o(5, 1, 1),  o(5, 6, 0),  o(6, 3, 0),  o(6, 2, 0)],  // D
  [o(1, 5, 3),  o(1, 4, 2),  o(6, 1, 1),  o(6, 6, 0),  o(2, 3, 0),  o(2, 2, 0)],  // E
  [o(3, 3, 0),  o(2, 6, 0),  o(2, 5, 0),  o(7, 2, 0),  o(7, 1, 0),  o(3, 4, 0)],  // F
  [o(4, 3, 0),  o(3, 6, 0),  o(3, 5, 0),  o(8, 2, 0),  o(8, 1, 0),  o(4, 4, 0)],  // G
  [o(5, 3, 0),  o(4, 6, 0),  o(4, 5, 0),  o(9, 2, 0),  o(9, 1, 0),  o(5, 4, 0)],  // H
  [o(6, 3, 0),  o(5, 6, 0),  o(5, 5, 0),  o(10, 2, 0), o(10, 1, 0), o(6, 4, 0)],  // I
  [o(2, 3, 0),  o(6, 6, 0),  o(6, 5, 0),  o(11, 2, 0), o(11, 1, 0), o(2, 4, 0)],  // J
  [o(3, 5, 0),  o(3, 4, 0),  o(7, 1, 0),  o(7, 6, 0),  o(8, 3, 0),  o(8, 2, 0)],  // K
  [o(4, 5, 0),  o(4, 4, 0),  o(8, 1, 0),  o(8, 6, 0),  o(9, 3, 0),  o(9, 2, 0)],  // L
  [o(5, 5, 0),  o(5, 4, 0),  o(9, 1, 0),  o(9, 6, 0),  o(10, 3, 0), o(10, 2, 0)], // M
  [o(6, 5, 0),  o(6, 4, 0),  o(10, 1, 0), o(10, 6, 0), o(11, 3, 0), o(11, 2, 0)], // N
  [o(2, 5, 0),  o(2, 4, 0),  o(11, 1, 0), o(11, 6, 0), o(7, 3, 0),  o(7, 2, 0)],  // O
  [o(8, 3, 0),  o(7, 6, 0),  o(7, 5, 0),  o(12, 2, 1), o(12, 1, 1), o(8, 4, 1)],  // P
  [o(9, 3, 0),  o(8, 6, 0),  o(8, 5, 0),  o(12, 2, 0), o(12, 1, 0), o(9, 4, 1)],  // Q
  [o(10, 3, 0), o(9, 6, 0),  o(9, 5, 0),  o(12, 2, 5), o(12, 1, 5), o(10, 4, 1)], // R
  [o(11, 3, 0), o(10, 6, 0), o(10, 5, 0), o(12, 2, 4), o(12, 1, 4), o(11, 4, 1)], // S
  [o(7, 3, 0),  o(11, 6, 0), o(11, 5, 0), o(12, 2, 3), o(12, 1, 2), o(7, 4, 1)],  // T
];

/// True for the pentagon primaries `1..=12`.
#[inline]
#[must_use]
pub fn is_vertex_primary(primary: u8) -> bool {
  (1..=NUM_VERTICES).contains(&primary)
}

/// True for the hexagon primaries `'A'..='T'`.
#[inline]
#[must_use]
pub fn is_face_primary(primary: u8) -> bool {
  (FIRST_FACE..=LAST_FACE).contains(&primary)
}

#[inline]
#[must_use]
pub fn is_valid_primary(primary: u8) -> bool {
  is_vertex_primary(primary) || is_face_primary(primary)
}

/// Position of a primary among the 32 roots: vertices first, then faces.
#[must_use]
pub fn root_slot(primary: u8) -> Option<usize> {
  if is_vertex_primary(primary) {
    Some(usize::from(primary - 1))
  } else if is_face_primary(primary) {
    Some(usize::from(primary - FIRST_FACE) + usize::from(NUM_VERTICES))
  } else {
    None
  }
}

/// Inverse of [`root_slot`].
#[must_use]
pub fn primary_for_slot(slot: usize) -> Option<u8> {
  if slot >= NUM_ROOTS {
    return None;
  }
  let slot = slot as u8;
  if slot < NUM_VERTICES {
    Some(slot + 1)
  } else {
    Some(slot - NUM_VERTICES + FIRST_FACE)
  }
}

/// All 32 primaries in root-slot order.
pub fn all_primaries() -> impl Iterator<Item = u8> {
  (0..NUM_ROOTS).filter_map(primary_for_slot)
}

/// True if a pentagon rooted at `vertex` has a neighbour in direction `dir`.
#[must_use]
pub fn is_valid_vertex_direction(vertex: u8, dir: Direction) -> bool {
  if dir == Direction::Zero || !is_vertex_primary(vertex) {
    return true;
  }
  RES0_CONNECT[usize::from(vertex - 1)][usize::from(dir.digit() - 1)] != NO_CONNECTION
}

/// The single direction a pentagon rooted at `vertex` does not have.
#[must_use]
pub fn vertex_gap_direction(vertex: u8) -> Option<Direction> {
  if !is_vertex_primary(vertex) {
    return None;
  }
  Direction::NON_ZERO
    .into_iter()
    .find(|&dir| !is_valid_vertex_direction(vertex, dir))
}

#[inline]
pub(crate) fn res0_connection(vertex: u8, dir: Direction) -> Connection {
  RES0_CONNECT[usize::from(vertex - 1)][usize::from(dir.digit() - 1)]
}

#[inline]
pub(crate) fn res1_connection(primary: u8, dir: Direction) -> Connection {
  let d = usize::from(dir.digit() - 1);
  if is_vertex_primary(primary) {
    RES1_VERTEX_CONNECT[usize::from(primary - 1)][d]
  } else {
    RES1_FACE_CONNECT[usize::from(primary - FIRST_FACE)][d]
  }
}

#[inline]
pub(crate) fn res2_overflow(face: u8, first_digit: u8) -> FaceOverflow {
  RES2_FACE_CONNECT[usize::from(face - FIRST_FACE)][usize::from(first_digit - 1)]
}
