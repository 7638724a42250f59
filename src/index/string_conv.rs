// src/index/string_conv.rs

//! Canonical text form of an index: `<primary>[-<digits>]`.
//!
//! Vertices print as `1`..`12` and faces as `A`..`T`; the null index prints as `NULL`.

use super::Index;
use crate::constants::MAX_DIGITS;
use crate::primaries::{is_face_primary, is_vertex_primary};
use crate::types::DggsError;
use std::fmt;
use std::str::FromStr;

const NULL_TEXT: &str = "NULL";

/// Parses the canonical index string.
///
/// Vertex numbers may carry one leading zero (`"01-0"`). The parsed index must pass
/// [`Index::is_valid`].
///
/// # Returns
/// `Ok(Index)` on success, or `DggsError::InvalidIndex` for any malformed input.
pub fn string_to_index(s: &str) -> Result<Index, DggsError> {
  if s == NULL_TEXT {
    return Ok(Index::NULL);
  }
  let (head, tail) = match s.split_once('-') {
    Some((head, tail)) => (head, Some(tail)),
    None => (s, None),
  };

  let primary = parse_primary(head)?;

  let mut digits = [0u8; MAX_DIGITS];
  let mut count = 0;
  if let Some(tail) = tail {
    if tail.is_empty() || tail.len() > MAX_DIGITS {
      return Err(DggsError::InvalidIndex);
    }
    for b in tail.bytes() {
      match b {
        b'0'..=b'6' => {
          digits[count] = b - b'0';
          count += 1;
        }
        _ => return Err(DggsError::InvalidIndex),
      }
    }
  }

  Index::from_parts(primary, &digits[..count])
}

fn parse_primary(head: &str) -> Result<u8, DggsError> {
  let bytes = head.as_bytes();
  match bytes {
    [c] if is_face_primary(*c) => Ok(*c),
    [_] | [_, _] if bytes.iter().all(u8::is_ascii_digit) => {
      let value = bytes.iter().fold(0u8, |acc, b| acc * 10 + (b - b'0'));
      if is_vertex_primary(value) {
        Ok(value)
      } else {
        Err(DggsError::InvalidIndex)
      }
    }
    _ => Err(DggsError::InvalidIndex),
  }
}

/// Formats an index in canonical form.
#[must_use]
pub fn index_to_string(index: &Index) -> String {
  index.to_string()
}

impl fmt::Display for Index {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_null() {
      return f.write_str(NULL_TEXT);
    }
    if self.is_vertex() {
      write!(f, "{}", self.primary())?;
    } else {
      write!(f, "{}", char::from(self.primary()))?;
    }
    if self.digit_count() > 0 {
      f.write_str("-")?;
      for &d in self.digits() {
        write!(f, "{d}")?;
      }
    }
    Ok(())
  }
}

impl FromStr for Index {
  type Err = DggsError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    string_to_index(s)
  }
}

impl TryFrom<&str> for Index {
  type Error = DggsError;

  fn try_from(s: &str) -> Result<Self, Self::Error> {
    string_to_index(s)
  }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Index {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Index {
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
    string_to_index(&text).map_err(serde::de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_string_to_index() {
    let index = string_to_index("B-0000200103").unwrap();
    assert_eq!(index.primary(), b'B');
    assert_eq!(index.digits(), &[0, 0, 0, 0, 2, 0, 0, 1, 0, 3]);

    let index = string_to_index("12-50").unwrap();
    assert_eq!(index.primary(), 12);
    assert_eq!(index.digits(), &[5, 0]);

    assert_eq!(string_to_index("03-201").unwrap(), string_to_index("3-201").unwrap());
    assert_eq!(string_to_index("T").unwrap().digit_count(), 0);
    assert_eq!(string_to_index("NULL").unwrap(), Index::NULL);
  }

  #[test]
  fn test_string_to_index_rejects() {
    for bad in [
      "", "-", "A-", "U-0", "a-0", "0", "13", "012", "A-07", "A-1", "1-1", "7-04", "A-0x", "3-23", "1--0",
    ] {
      assert_eq!(string_to_index(bad), Err(DggsError::InvalidIndex), "{bad:?}");
    }
    let too_long = format!("A-{}", "0".repeat(MAX_DIGITS + 1));
    assert_eq!(string_to_index(&too_long), Err(DggsError::InvalidIndex));
    let longest = format!("A-{}", "0".repeat(MAX_DIGITS));
    assert_eq!(string_to_index(&longest).unwrap().resolution(), 40);
  }

  #[test]
  fn test_index_to_string() {
    for text in ["1", "12-50", "A-00", "D-01", "B-0000200103", "NULL"] {
      assert_eq!(index_to_string(&text.parse().unwrap()), text);
    }
    assert_eq!(index_to_string(&"01-0".parse().unwrap()), "1-0");
  }
}
