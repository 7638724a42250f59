// src/math/sub_index.rs

//! Planar tesseral arithmetic on digit strings.
//!
//! A digit string is the part of an index below its primary, most significant digit first.
//! Its "resolution" here is `len - 1`, so a single digit is resolution 0. Addition works on
//! pairs of digits (one class I, one class II) mapped onto an integer lattice and carried
//! by division by three.

use crate::constants::MAX_DIGITS;
use crate::types::{DggsError, Direction, HexClass};

/// Seed digits for [`multiply`], indexed by direction: high digit in bits 8..12, low in bits 0..4.
const MULTIPLICATION_FACTORS: [u16; 7] = [0x000, 0x104, 0x205, 0x306, 0x401, 0x502, 0x603];

/// Maps a digit pair (`low | high << 4`) onto lattice coordinates.
fn pair_to_integers(pair: u8) -> (i32, i32) {
  match pair {
    0x00 => (0, 0),
    0x01 => (2, 0),
    0x02 => (1, 1),
    0x03 => (-1, 1),
    0x04 => (-2, 0),
    0x05 => (-1, -1),
    0x06 => (1, -1),
    0x10 => (3, 1),
    0x20 => (0, 2),
    0x30 => (-3, 1),
    0x40 => (-3, -1),
    0x50 => (0, -2),
    0x60 => (3, -1),
    _ => {
      debug_assert!(false, "invalid digit pair {pair:#04x}");
      (0, 0)
    }
  }
}

/// Inverse of [`pair_to_integers`] for remainders; unknown coordinates map to `0x00`.
fn integers_to_pair(a: i32, b: i32) -> u8 {
  match (a, b) {
    (2, 0) => 0x01,
    (1, 1) => 0x02,
    (-1, 1) => 0x03,
    (-2, 0) => 0x04,
    (-1, -1) => 0x05,
    (1, -1) => 0x06,
    (3, 1) => 0x10,
    (0, 2) => 0x20,
    (-3, 1) => 0x30,
    (-3, -1) => 0x40,
    (0, -2) => 0x50,
    (3, -1) => 0x60,
    _ => 0x00,
  }
}

/// Splits lattice coordinates into a carry `(a, b)` and a remainder `(r, s)`.
fn divide_by_three(a: i32, b: i32) -> (i32, i32, i32, i32) {
  let mut qa = a.div_euclid(3);
  let mut qb = b.div_euclid(3);
  let mut r = a.rem_euclid(3);
  let mut s = b.rem_euclid(3);

  if s == r + 1 {
    s -= 3;
    qb += 1;
  } else if s == r - 1 {
    r -= 3;
    qa += 1;
  } else if r == 2 && s == 2 {
    r = -1;
    s = -1;
    qa += 1;
    qb += 1;
  }
  (qa, qb, r, s)
}

/// Removes the two least significant digits and packs them as `low | high << 4`.
fn strip_pair(digits: &mut Vec<u8>) -> u8 {
  let mut pair = digits.pop().unwrap_or(0);
  if let Some(high) = digits.pop() {
    pair += high << 4;
  }
  pair
}

fn resolution_of(digits: &[u8]) -> isize {
  digits.len() as isize - 1
}

/// Adds two digit strings on a grid of the given class.
///
/// The sum keeps the larger operand's resolution where possible: leading zeros are
/// trimmed and short sums are zero-padded on the left. A sum that leaves the operands'
/// extent grows by one or two digits.
#[must_use]
pub fn add(first: &[u8], second: &[u8], class: HexClass) -> Vec<u8> {
  let max_res = resolution_of(first).max(resolution_of(second));
  let mut first = first.to_vec();
  let mut second = second.to_vec();

  // Class II strings are shifted so that pairs line up on class I boundaries.
  if class == HexClass::ClassII {
    first.push(0);
    second.push(0);
  }

  let (fa, fb) = pair_to_integers(strip_pair(&mut first));
  let (sa, sb) = pair_to_integers(strip_pair(&mut second));
  let (mut a1, mut b1) = (fa + sa, fb + sb);

  let mut reversed = Vec::with_capacity(first.len().max(second.len()) + 4);
  let mut head: Vec<u8> = Vec::new();
  let pair_count = max_res / 2;
  let mut k = 0;

  while k <= pair_count || a1 != 0 || b1 != 0 {
    if a1 == 0 && b1 == 0 {
      // No carry: the rest of the longer operand passes through unchanged.
      if first.is_empty() {
        head = std::mem::take(&mut second);
        head.extend_from_slice(&[0, 0]);
        break;
      }
      if second.is_empty() {
        head = std::mem::take(&mut first);
        head.extend_from_slice(&[0, 0]);
        break;
      }
    }
    k += 1;

    let (qa, qb, r1, s1) = divide_by_three(a1, b1);
    let (fa, fb) = pair_to_integers(strip_pair(&mut first));
    let (sa, sb) = pair_to_integers(strip_pair(&mut second));
    a1 = qa + fa + sa;
    b1 = qb + fb + sb;
    let (_, _, r2, _) = divide_by_three(a1, b1);

    let mut low = 0;
    let high;
    match (s1, r2) {
      (2, 1 | -2) => {
        high = 6;
        a1 -= 1;
        b1 += 1;
      }
      (2, 2 | -1) => {
        high = 4;
        a1 += 1;
        b1 += 1;
      }
      (-2, 1 | -2) => {
        high = 1;
        a1 -= 1;
        b1 -= 1;
      }
      (-2, 2 | -1) => {
        high = 3;
        a1 += 1;
        b1 -= 1;
      }
      _ => {
        let pair = integers_to_pair(r1, s1);
        low = pair & 0x0f;
        high = (pair >> 4) & 0x0f;
      }
    }
    reversed.push(low);
    reversed.push(high);
  }

  let mut sum = head;
  sum.extend(reversed.into_iter().rev());
  if class == HexClass::ClassII {
    sum.pop();
  }
  adjust_resolution_left(&sum, max_res)
}

/// Adds two digit strings on the grid at `resolution`, trimming leading zeros down to it.
///
/// Fails with [`DggsError::BoundaryCrossing`] if the sum needs more digits than the grid
/// provides and `grow` is false.
pub fn add_at_resolution(first: &[u8], second: &[u8], resolution: usize, grow: bool) -> Result<Vec<u8>, DggsError> {
  let mut sum = add(first, second, HexClass::for_resolution(resolution as i32));
  while sum.len() > resolution + 1 {
    if sum[0] == 0 {
      sum.remove(0);
    } else if grow {
      break;
    } else {
      return Err(DggsError::BoundaryCrossing);
    }
  }
  if sum.len() > MAX_DIGITS {
    return Err(DggsError::InvalidResolution);
  }
  Ok(sum)
}

/// Subtracts `second` from `first` on the grid at `resolution`.
pub fn subtract(first: &[u8], second: &[u8], resolution: usize) -> Result<Vec<u8>, DggsError> {
  add_at_resolution(first, &negate(second), resolution, false)
}

/// Reflects a digit string through the origin.
#[must_use]
pub fn negate(digits: &[u8]) -> Vec<u8> {
  digits
    .iter()
    .map(|&d| Direction::from_digit(d).map_or(d, |dir| dir.negate().digit()))
    .collect()
}

/// The digit string one step from `digits` in direction `dir`, at the same grid class.
#[must_use]
pub fn planar_move(digits: &[u8], dir: Direction) -> Vec<u8> {
  add(digits, &[dir.digit()], HexClass::for_resolution(resolution_of(digits) as i32))
}

/// The digit string `factor` steps from the origin in direction `dir`.
pub fn multiply(factor: i32, dir: Direction, resolution: usize) -> Result<Vec<u8>, DggsError> {
  let dir = if factor < 0 { dir.negate() } else { dir };

  let key = MULTIPLICATION_FACTORS[usize::from(dir.digit())];
  let pattern = [((key >> 8) & 0x0f) as u8, (key & 0x0f) as u8, 0];

  let mut reversed = Vec::new();
  let mut multiplier: u64 = 1;
  let mut remaining = u64::from(factor.unsigned_abs());
  while remaining > 0 {
    if reversed.len() >= MAX_DIGITS {
      return Err(DggsError::InvalidResolution);
    }
    // Every second digit of a straight line is zero.
    if reversed.len() & 1 == 1 {
      reversed.push(0);
    } else {
      let slot = ((remaining - 1) / multiplier) % 3;
      reversed.push(pattern[slot as usize]);
      remaining = remaining.saturating_sub(multiplier);
      multiplier *= 3;
    }
  }

  reversed.reverse();
  if reversed.is_empty() {
    reversed.push(0);
  }
  if resolution as isize > resolution_of(&reversed) {
    reversed = adjust_resolution_left(&reversed, resolution as isize);
  }
  Ok(reversed)
}

/// Rotates every non-zero digit by `steps` sixths of a turn, counter-clockwise when `ccw`.
#[must_use]
pub fn rotate(digits: &[u8], steps: u8, ccw: bool) -> Vec<u8> {
  let steps = i32::from(steps % 6);
  let signed = if ccw { steps } else { -steps };
  digits
    .iter()
    .map(|&d| Direction::from_digit(d).map_or(d, |dir| dir.rotate(signed).digit()))
    .collect()
}

/// The most significant non-zero digit, which names the sector of the origin the cell lies in.
#[must_use]
pub fn hex_sector(digits: &[u8]) -> Direction {
  digits
    .iter()
    .find(|&&d| d != 0)
    .and_then(|&d| Direction::from_digit(d))
    .unwrap_or(Direction::Zero)
}

/// Pads with leading zeros, or trims leading zeros, towards `resolution`.
#[must_use]
pub fn adjust_resolution_left(digits: &[u8], resolution: isize) -> Vec<u8> {
  let current = resolution_of(digits);
  if current < resolution {
    let mut padded = vec![0; (resolution - current) as usize];
    padded.extend_from_slice(digits);
    padded
  } else {
    let excess = (current - resolution) as usize;
    let zeros = digits.iter().take(excess).take_while(|&&d| d == 0).count();
    digits[zeros..].to_vec()
  }
}
