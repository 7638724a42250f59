// src/tiles/tile_set.rs

//! A compact trie of indices.
//!
//! Each of the 32 roots owns a node tree keyed on digits. A node stores a run of digits as
//! one byte per digit (bit `d` set for digit `d`); only its last byte may have several bits,
//! in which case the node has either no children or exactly one child per bit. A node with
//! an empty run stands for its whole subtree, so a stored tile is never listed alongside
//! its descendants.
//!
//! # Binary format
//!
//! Four bytes flag which roots are present (bit `n` of byte `k` for root slot `8k + n`).
//! Each present root's node follows in slot order, then one resolution byte. A node is
//! written as its run of digit bytes with `0x80` added to the last byte when it has no
//! children, followed by its children in digit order.

use crate::constants::{MAX_DIGITS, MAX_RESOLUTION, NUM_ROOTS};
use crate::index::Index;
use crate::iterators::ChildIterator;
use crate::primaries::{primary_for_slot, root_slot};
use crate::types::DggsError;
use std::io::{Read, Write};
use tracing::{debug, warn};

const LEAF_FLAG: u8 = 0x80;
const DIGIT_MASK: u8 = 0x7f;
const HEADER_LEN: usize = NUM_ROOTS / 8;

#[inline]
fn bit(digit: u8) -> u8 {
  1 << digit
}

/// Number of set bits below `digit`, i.e. the child slot of `digit`.
#[inline]
fn rank(byte: u8, digit: u8) -> usize {
  (byte & (bit(digit) - 1)).count_ones() as usize
}

#[inline]
fn single_digit(byte: u8) -> u8 {
  byte.trailing_zeros() as u8
}

fn digit_bytes(digits: &[u8]) -> Vec<u8> {
  digits.iter().map(|&d| bit(d)).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Node {
  substring: Vec<u8>,
  children: Vec<Node>,
}

impl Node {
  /// A node holding `index`'s digits from `offset` on.
  fn from_index(index: &Index, offset: usize, aggregate: bool) -> Node {
    let digits = index.digits();
    let mut node = Node::default();
    if offset < digits.len() {
      node.substring = digit_bytes(&digits[offset..]);
      if aggregate {
        node.aggregate(index, offset);
      }
    }
    node
  }

  #[inline]
  fn is_complete(&self) -> bool {
    self.substring.is_empty()
  }

  fn last_byte(&self) -> u8 {
    self.substring.last().copied().unwrap_or(0)
  }

  fn child(&self, digit: u8) -> Option<&Node> {
    let last = self.last_byte();
    if self.children.is_empty() || last & bit(digit) == 0 {
      return None;
    }
    self.children.get(rank(last, digit))
  }

  fn child_mut(&mut self, digit: u8) -> Option<&mut Node> {
    let last = self.last_byte();
    if self.children.is_empty() || last & bit(digit) == 0 {
      return None;
    }
    self.children.get_mut(rank(last, digit))
  }

  fn insert(&mut self, index: &Index, offset: usize, aggregate: bool) {
    self.insert_local(index, offset, aggregate);
    if aggregate {
      self.aggregate(index, offset);
    }
  }

  fn insert_local(&mut self, index: &Index, mut offset: usize, aggregate: bool) {
    let digits = index.digits();
    let count = digits.len();
    let mut last_digit = None;

    if !self.substring.is_empty() {
      let mut pos = 0;
      loop {
        if offset >= count {
          // The new tile is an ancestor of everything stored from here down.
          self.substring.truncate(pos);
          self.children.clear();
          break;
        }
        let digit = digits[offset];
        last_digit = Some(digit);

        if self.substring[pos] & bit(digit) == 0 {
          self.substring[pos] |= bit(digit);
          if pos + 1 >= self.substring.len() {
            if self.children.is_empty() {
              offset += 1;
              if offset < count {
                let siblings = self.substring[pos].count_ones() as usize;
                self.children = vec![Node::default(); siblings];
                if let Some(child) = self.child_mut(digit) {
                  *child = Node::from_index(index, offset, aggregate);
                }
              }
              return;
            }
          } else {
            // Diverging inside the run: the old tail becomes the only child so far.
            let tail = Node {
              substring: self.substring.split_off(pos + 1),
              children: std::mem::take(&mut self.children),
            };
            self.children = vec![tail];
          }
          let slot = rank(self.substring[pos], digit);
          self.children.insert(slot, Node::from_index(index, offset + 1, aggregate));
          return;
        }

        pos += 1;
        if pos >= self.substring.len() {
          break;
        }
        offset += 1;
      }
    }

    if offset + 1 < count {
      if let Some(child) = self.child_mut(digits[offset]) {
        child.insert(index, offset + 1, aggregate);
      }
    } else if let Some(digit) = last_digit {
      self.clear_child(digit);
    }
  }

  /// Marks the subtree under `digit` as complete.
  fn clear_child(&mut self, digit: u8) {
    if self.children.is_empty() {
      return;
    }
    if self.children.len() == 1 {
      self.children.clear();
    } else {
      let slot = rank(self.last_byte(), digit);
      if let Some(child) = self.children.get_mut(slot) {
        *child = Node::default();
      }
    }
  }

  /// Collapses complete sibling sets into their parent, as far up the run as possible.
  fn aggregate(&mut self, index: &Index, offset: usize) {
    if !self.children.is_empty() && self.children.iter().all(Node::is_complete) {
      self.children.clear();
    }
    if !self.children.is_empty() || self.substring.is_empty() {
      return;
    }
    let mut prefix_len = offset + self.substring.len();
    while let Some(&last) = self.substring.last() {
      prefix_len -= 1;
      if (last.count_ones() as usize) < index.max_child_count(prefix_len) {
        return;
      }
      self.substring.pop();
    }
  }

  /// Removes `digits[offset..]` and everything below it. Returns true if the node became empty.
  fn remove_prefix(&mut self, digits: &[u8], mut offset: usize) -> bool {
    if self.substring.is_empty() {
      return offset >= digits.len();
    }

    let mut pos = 0;
    let digit = loop {
      if offset >= digits.len() {
        return true;
      }
      let digit = digits[offset];
      if self.substring[pos] & bit(digit) == 0 {
        return false;
      }
      if pos + 1 >= self.substring.len() {
        break digit;
      }
      pos += 1;
      offset += 1;
    };

    if offset + 1 < digits.len() {
      match self.child_mut(digit) {
        Some(child) => {
          if !child.remove_prefix(digits, offset + 1) {
            return false;
          }
        }
        None => return false,
      }
    }

    let last = self.substring.len() - 1;
    let byte = self.substring[last];
    if !self.children.is_empty() {
      self.children.remove(rank(byte, digit));
    }
    self.substring[last] = byte & !bit(digit);
    if self.substring[last] == 0 {
      return true;
    }
    if self.substring[last].count_ones() == 1 && !self.children.is_empty() {
      // A single remaining child folds back into this run.
      let child = self.children.remove(0);
      self.substring.extend(child.substring);
      self.children = child.children;
    }
    false
  }

  /// Truncates every stored path to at most `digits` digits.
  fn set_resolution(&mut self, digits: usize) {
    if self.substring.len() <= digits {
      let remaining = digits - self.substring.len();
      for child in &mut self.children {
        child.set_resolution(remaining);
      }
    } else {
      self.children.clear();
      self.substring.truncate(digits);
    }
  }

  fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<usize> {
    let mut written = 0;
    if let Some((&last, head)) = self.substring.split_last() {
      writer.write_all(head)?;
      written += head.len();
      let flag = if self.children.is_empty() { LEAF_FLAG } else { 0 };
      writer.write_all(&[last | flag])?;
    } else {
      writer.write_all(&[LEAF_FLAG])?;
    }
    written += 1;
    for child in &self.children {
      written += child.write(writer)?;
    }
    Ok(written)
  }

  fn read<R: Read>(reader: &mut R, depth: usize) -> Result<Node, DggsError> {
    let mut node = Node::default();
    loop {
      let raw = read_byte(reader)?;
      let byte = raw & DIGIT_MASK;
      if byte != 0 {
        node.substring.push(byte);
      }
      if depth + node.substring.len() > MAX_DIGITS {
        return Err(DggsError::CorruptTileSet);
      }
      if raw & LEAF_FLAG != 0 {
        break;
      }
      match byte.count_ones() {
        0 => return Err(DggsError::CorruptTileSet),
        1 => {}
        fanout => {
          let child_depth = depth + node.substring.len();
          for _ in 0..fanout {
            node.children.push(Node::read(reader, child_depth)?);
          }
          break;
        }
      }
    }
    Ok(node)
  }
}

fn read_byte<R: Read>(reader: &mut R) -> Result<u8, DggsError> {
  let mut buf = [0u8; 1];
  reader.read_exact(&mut buf).map_err(|_| DggsError::CorruptTileSet)?;
  Ok(buf[0])
}

/// A set of tiles stored as a compact trie.
///
/// Single writer: mutation needs `&mut self`, so concurrent readers need external locking
/// only while a writer is active.
#[derive(Debug, Clone)]
pub struct TileSet {
  roots: [Option<Node>; NUM_ROOTS],
  /// Finest resolution kept, 0 for no limit.
  resolution: u8,
}

impl Default for TileSet {
  fn default() -> Self {
    Self::new()
  }
}

impl TileSet {
  /// An empty set with no resolution limit.
  #[must_use]
  pub fn new() -> Self {
    Self {
      roots: std::array::from_fn(|_| None),
      resolution: 0,
    }
  }

  /// An empty set that truncates inserted tiles to `resolution`.
  pub fn with_resolution(resolution: u8) -> Result<Self, DggsError> {
    let mut set = Self::new();
    set.set_resolution(resolution)?;
    Ok(set)
  }

  /// The resolution limit, 0 when unlimited.
  #[must_use]
  pub fn resolution(&self) -> u8 {
    self.resolution
  }

  /// Sets the resolution limit. Stored tiles finer than a tightened limit are truncated to it;
  /// raising the limit leaves them as they are.
  pub fn set_resolution(&mut self, resolution: u8) -> Result<(), DggsError> {
    if resolution > MAX_RESOLUTION {
      return Err(DggsError::InvalidResolution);
    }
    if resolution > 0 && (self.resolution == 0 || resolution < self.resolution) {
      let digits = usize::from(resolution - 1);
      for root in self.roots.iter_mut().flatten() {
        root.set_resolution(digits);
      }
    }
    self.resolution = resolution;
    Ok(())
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.roots.iter().all(Option::is_none)
  }

  pub fn clear(&mut self) {
    self.roots = std::array::from_fn(|_| None);
  }

  /// Number of stored tiles.
  #[must_use]
  pub fn count(&self) -> usize {
    self.iter().count()
  }

  /// Adds a tile. With `aggregate`, complete sibling sets collapse into their parent.
  ///
  /// Inserting a tile already covered by the set changes nothing; inserting an ancestor of
  /// stored tiles replaces them.
  pub fn insert(&mut self, index: &Index, aggregate: bool) -> Result<(), DggsError> {
    let slot = root_slot(index.primary()).ok_or(DggsError::InvalidIndex)?;
    let index = if self.resolution != 0 && index.resolution() > self.resolution {
      index.with_resolution(self.resolution)?
    } else {
      *index
    };
    match &mut self.roots[slot] {
      Some(root) => root.insert(&index, 0, aggregate),
      None => self.roots[slot] = Some(Node::from_index(&index, 0, aggregate)),
    }
    Ok(())
  }

  /// Adds every tile of `other`.
  pub fn insert_set(&mut self, other: &TileSet, aggregate: bool) -> Result<(), DggsError> {
    for tile in other {
      self.insert(&tile, aggregate)?;
    }
    Ok(())
  }

  /// Removes `index` and everything stored below it.
  ///
  /// With `aggregate`, a tile that covers `index` from above is first split into its
  /// children level by level, so only `index` itself is taken out.
  pub fn remove(&mut self, index: &Index, aggregate: bool) -> Result<(), DggsError> {
    let slot = root_slot(index.primary()).ok_or(DggsError::InvalidIndex)?;
    if self.roots[slot].is_none() {
      return Ok(());
    }

    if aggregate {
      if let Some(cover) = self.covering_tile(index) {
        if cover != *index {
          self.remove_exact(&cover, slot);
          let mut current = cover;
          while current != *index {
            let next = index.with_resolution(current.resolution() + 1)?;
            for child in ChildIterator::new(&current) {
              if child != next {
                self.insert(&child, false)?;
              }
            }
            current = next;
          }
          return Ok(());
        }
      }
    }

    self.remove_exact(index, slot);
    Ok(())
  }

  fn remove_exact(&mut self, index: &Index, slot: usize) {
    let emptied = match &mut self.roots[slot] {
      Some(root) => index.digit_count() == 0 || root.remove_prefix(index.digits(), 0),
      None => false,
    };
    if emptied {
      self.roots[slot] = None;
    }
  }

  /// The stored tile that covers `index`, if any.
  fn covering_tile(&self, index: &Index) -> Option<Index> {
    (1..=index.resolution())
      .filter_map(|res| index.with_resolution(res).ok())
      .find(|ancestor| self.contains(ancestor))
  }

  /// True if `index` is a stored tile or lies inside one.
  #[must_use]
  pub fn contains(&self, index: &Index) -> bool {
    self.lookup(index, false)
  }

  /// True if `index` overlaps the set: it lies inside a stored tile or has a stored descendant.
  #[must_use]
  pub fn intersects(&self, index: &Index) -> bool {
    self.lookup(index, true)
  }

  fn lookup(&self, index: &Index, partial: bool) -> bool {
    let Some(mut node) = root_slot(index.primary()).and_then(|slot| self.roots[slot].as_ref()) else {
      return false;
    };
    let digits = index.digits();
    let mut offset = 0;
    loop {
      if node.is_complete() {
        return true;
      }
      for &byte in &node.substring {
        let Some(&digit) = digits.get(offset) else {
          return partial;
        };
        if byte & bit(digit) == 0 {
          return false;
        }
        offset += 1;
      }
      match node.child(digits[offset - 1]) {
        Some(child) => node = child,
        None => return true,
      }
    }
  }

  /// Iterates the stored tiles, root by root and depth first in digit order.
  #[must_use]
  pub fn iter(&self) -> TileSetIter<'_> {
    TileSetIter {
      roots: &self.roots,
      slot: 0,
      stack: Vec::new(),
    }
  }

  /// Writes the binary form of the set.
  pub fn serialize<W: Write>(&self, writer: &mut W) -> Result<(), DggsError> {
    let result = self.write_tiles(writer);
    match &result {
      Ok(bytes) => debug!(bytes, "tile set written"),
      Err(err) => warn!(%err, "tile set write failed"),
    }
    result.map(|_| ()).map_err(|_| DggsError::CorruptTileSet)
  }

  fn write_tiles<W: Write>(&self, writer: &mut W) -> std::io::Result<usize> {
    let mut header = [0u8; HEADER_LEN];
    for (slot, root) in self.roots.iter().enumerate() {
      if root.is_some() {
        header[slot / 8] |= 1 << (slot % 8);
      }
    }
    writer.write_all(&header)?;
    let mut written = HEADER_LEN;
    for root in self.roots.iter().flatten() {
      written += root.write(writer)?;
    }
    writer.write_all(&[self.resolution])?;
    Ok(written + 1)
  }

  /// The binary form of the set as a byte vector.
  #[must_use]
  pub fn to_bytes(&self) -> Vec<u8> {
    let mut bytes = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = self.write_tiles(&mut bytes);
    bytes
  }

  /// Reads a set written by [`TileSet::serialize`].
  ///
  /// Truncated or malformed input fails with [`DggsError::CorruptTileSet`].
  pub fn deserialize<R: Read>(reader: &mut R) -> Result<TileSet, DggsError> {
    let result = Self::read_tiles(reader);
    match &result {
      Ok(set) => debug!(resolution = set.resolution, "tile set read"),
      Err(err) => warn!(%err, "rejected tile set data"),
    }
    result
  }

  fn read_tiles<R: Read>(reader: &mut R) -> Result<TileSet, DggsError> {
    let mut header = [0u8; HEADER_LEN];
    reader.read_exact(&mut header).map_err(|_| DggsError::CorruptTileSet)?;

    let mut set = TileSet::new();
    for slot in 0..NUM_ROOTS {
      if header[slot / 8] & (1 << (slot % 8)) != 0 {
        set.roots[slot] = Some(Node::read(reader, 0)?);
      }
    }

    let resolution = read_byte(reader)?;
    if resolution > MAX_RESOLUTION {
      return Err(DggsError::CorruptTileSet);
    }
    set.resolution = resolution;
    Ok(set)
  }

  /// Reads a set from a byte slice.
  pub fn from_bytes(bytes: &[u8]) -> Result<TileSet, DggsError> {
    let mut reader = bytes;
    Self::deserialize(&mut reader)
  }

  /// Resolution used for equality: the limit, or the finest stored tile when unlimited.
  fn effective_resolution(&self) -> u8 {
    if self.resolution != 0 {
      self.resolution
    } else {
      self.iter().map(|t| t.resolution()).max().unwrap_or(0)
    }
  }
}

/// Two sets are equal when they list the same tiles at the same resolution.
impl PartialEq for TileSet {
  fn eq(&self, other: &Self) -> bool {
    self.effective_resolution() == other.effective_resolution() && self.iter().eq(other.iter())
  }
}

impl<'a> IntoIterator for &'a TileSet {
  type Item = Index;
  type IntoIter = TileSetIter<'a>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

struct Frame<'a> {
  node: &'a Node,
  /// The path down to, but not including, the node's last byte.
  base: Index,
  next_digit: u8,
  next_child: usize,
}

/// Iterator over the tiles of a [`TileSet`].
pub struct TileSetIter<'a> {
  roots: &'a [Option<Node>; NUM_ROOTS],
  slot: usize,
  stack: Vec<Frame<'a>>,
}

impl<'a> TileSetIter<'a> {
  fn next_root(&mut self) -> Option<(&'a Node, Index)> {
    while self.slot < NUM_ROOTS {
      let slot = self.slot;
      self.slot += 1;
      if let (Some(node), Some(primary)) = (&self.roots[slot], primary_for_slot(slot)) {
        return Some((node, Index::from_raw(primary, &[])));
      }
    }
    None
  }

  /// Pushes a frame for `node`, or returns its tile directly when the node is complete.
  fn enter(&mut self, node: &'a Node, prefix: Index) -> Option<Index> {
    let Some((_, head)) = node.substring.split_last() else {
      return Some(prefix);
    };
    let path: Vec<u8> = head.iter().map(|&b| single_digit(b)).collect();
    self.stack.push(Frame {
      node,
      base: prefix.extended(&path),
      next_digit: 0,
      next_child: 0,
    });
    None
  }
}

impl Iterator for TileSetIter<'_> {
  type Item = Index;

  fn next(&mut self) -> Option<Index> {
    loop {
      let frame = match self.stack.last_mut() {
        Some(frame) => frame,
        None => {
          let (node, root) = self.next_root()?;
          if let Some(tile) = self.enter(node, root) {
            return Some(tile);
          }
          continue;
        }
      };

      let node = frame.node;
      let last = node.last_byte();
      let Some(digit) = (frame.next_digit..7).find(|&d| last & bit(d) != 0) else {
        self.stack.pop();
        continue;
      };
      frame.next_digit = digit + 1;
      let cell = frame.base.pushed(digit);
      if node.children.is_empty() {
        return Some(cell);
      }
      let child = node.children.get(frame.next_child);
      frame.next_child += 1;
      if let Some(tile) = child.and_then(|child| self.enter(child, cell)) {
        return Some(tile);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::iterators::DescendantIterator;

  fn idx(s: &str) -> Index {
    s.parse().unwrap()
  }

  fn build(cells: &[&str], aggregate: bool) -> TileSet {
    let mut set = TileSet::new();
    for cell in cells {
      set.insert(&idx(cell), aggregate).unwrap();
    }
    set
  }

  fn strs(set: &TileSet) -> Vec<String> {
    set.iter().map(|t| t.to_string()).collect()
  }

  const SAMPLE: [&str; 11] = [
    "3-2", "3-30", "4-2", "M-02", "M-0302", "M-0303004", "M-050", "M-060002", "M-060010", "M-0600503", "M-0600504",
  ];

  #[test]
  fn test_rank() {
    assert_eq!(rank(0b0101_0101, 0), 0);
    assert_eq!(rank(0b0101_0101, 4), 2);
    assert_eq!(rank(0b0101_0101, 6), 3);
  }

  #[test]
  fn test_reference_encoding() {
    let set = build(&SAMPLE, false);
    assert_eq!(
      set.to_bytes(),
      vec![12, 0, 0, 1, 12, 128, 129, 132, 1, 108, 128, 1, 12, 128, 1, 1, 144, 129, 1, 1, 35, 132, 129, 1, 152, 0]
    );
  }

  #[test]
  fn test_insert_absorbs_descendants_and_duplicates() {
    let set = build(
      &[
        "3-2", "3-20", "3-30", "3-30", "4-2", "M-02", "M-0302", "M-03030040506", "M-0303004", "M-050", "M-060002",
        "M-060010", "M-0600503", "M-0600504",
      ],
      false,
    );
    assert_eq!(strs(&set), SAMPLE);
    assert_eq!(set, build(&SAMPLE, false));
  }

  #[test]
  fn test_contains_and_intersects() {
    let set = build(&SAMPLE, false);
    assert!(set.contains(&idx("3-2")));
    assert!(set.contains(&idx("3-20")));
    assert!(set.contains(&idx("M-0303004")));
    assert!(!set.contains(&idx("M-0303")));
    assert!(!set.contains(&idx("M-06")));
    assert!(!set.contains(&idx("A-0")));
    assert!(!set.contains(&idx("3")));

    assert!(set.intersects(&idx("M-0303")));
    assert!(set.intersects(&idx("M")));
    assert!(set.intersects(&idx("3-204")));
    assert!(!set.intersects(&idx("M-04")));
    assert!(!set.intersects(&idx("5")));
  }

  #[test]
  fn test_aggregation() {
    let set = build(&["3-0200", "3-0400", "3-02"], true);
    assert!(set.contains(&idx("3-02")));
    assert!(set.contains(&idx("3-0400")));
    assert!(!set.contains(&idx("3-04")));

    let all: Vec<String> = (0..=6).map(|d| format!("A-00{d}")).collect();
    let refs: Vec<&str> = all.iter().map(String::as_str).collect();
    assert_eq!(strs(&build(&refs, true)), ["A-00"]);
    assert_eq!(strs(&build(&refs, false)).len(), 7);

    assert_eq!(strs(&build(&["1-00", "1-02", "1-03", "1-04", "1-05", "1-06"], true)), ["1-0"]);
    assert_eq!(strs(&build(&["1-0", "1-2", "1-3", "1-4", "1-5", "1-6"], true)), ["1"]);
    assert_eq!(strs(&build(&["A-0"], true)), ["A"]);
  }

  #[test]
  fn test_lone_child_collapses_on_new_branch() {
    // 9-201 has only its centroid child, so 9-2010 is stored as 9-201 whichever goes first.
    let forward = build(&["9-1", "9-2010"], true);
    assert_eq!(strs(&forward), ["9-1", "9-201"]);
    assert_eq!(forward, build(&["9-2010", "9-1"], true));

    let mut again = forward.clone();
    again.insert(&idx("9-2010"), true).unwrap();
    assert_eq!(again, forward);
  }

  #[test]
  fn test_multi_level_aggregation() {
    let cells: Vec<Index> = DescendantIterator::new(&idx("C"), 4).collect();
    let mut forward = TileSet::new();
    for cell in &cells {
      forward.insert(cell, true).unwrap();
    }
    assert_eq!(strs(&forward), ["C"]);

    let mut backward = TileSet::new();
    for cell in cells.iter().rev() {
      backward.insert(cell, true).unwrap();
    }
    assert_eq!(strs(&backward), ["C"]);
  }

  #[test]
  fn test_remove_exact() {
    let mut set = build(&SAMPLE, false);
    set.remove(&idx("M-0600503"), false).unwrap();
    assert!(!set.contains(&idx("M-0600503")));
    assert!(set.contains(&idx("M-0600504")));
    assert_eq!(set.count(), 10);

    set.remove(&idx("M-06"), false).unwrap();
    assert!(!set.intersects(&idx("M-06")));
    assert_eq!(set.count(), 7);

    set.remove(&idx("3-2"), false).unwrap();
    assert_eq!(&set.to_bytes()[..8], &[12, 0, 0, 1, 8, 129, 132, 1]);
    assert_eq!(strs(&set), ["3-30", "4-2", "M-02", "M-0302", "M-0303004", "M-050"]);

    set.remove(&idx("4"), false).unwrap();
    assert!(!set.intersects(&idx("4")));
  }

  #[test]
  fn test_remove_splits_covering_tile() {
    let all: Vec<String> = (0..=6).map(|d| format!("A-00{d}")).collect();
    let refs: Vec<&str> = all.iter().map(String::as_str).collect();
    let mut set = build(&refs, true);
    set.remove(&idx("A-003"), true).unwrap();
    assert_eq!(strs(&set), ["A-000", "A-001", "A-002", "A-004", "A-005", "A-006"]);

    let mut set = build(&["A-0"], true);
    set.remove(&idx("A-0010"), true).unwrap();
    assert_eq!(
      strs(&set),
      [
        "A-000", "A-002", "A-003", "A-004", "A-005", "A-006", "A-01", "A-02", "A-03", "A-04", "A-05", "A-06"
      ]
    );
    assert!(!set.contains(&idx("A-0010")));
    assert!(!set.contains(&idx("A-001")));
  }

  #[test]
  fn test_set_resolution() {
    let mut set = build(&SAMPLE, false);
    set.set_resolution(5).unwrap();
    assert_eq!(
      strs(&set),
      ["3-2", "3-30", "4-2", "M-02", "M-0302", "M-0303", "M-050", "M-0600"]
    );
    set.set_resolution(2).unwrap();
    assert_eq!(strs(&set), ["3-2", "3-3", "4-2", "M-0"]);
    assert_eq!(set.set_resolution(41), Err(DggsError::InvalidResolution));

    set.insert(&idx("5-20304"), false).unwrap();
    assert!(set.contains(&idx("5-2")));
    assert!(!set.contains(&idx("5-3")));

    // Raising the limit keeps the truncated tiles.
    set.set_resolution(6).unwrap();
    assert_eq!(set.resolution(), 6);
    assert_eq!(strs(&set), ["3-2", "3-3", "4-2", "5-2", "M-0"]);
    set.insert(&idx("6-2030405"), false).unwrap();
    assert!(set.contains(&idx("6-20304")));
    assert!(!set.contains(&idx("6-20305")));
  }

  #[test]
  fn test_serialization_round_trip() {
    let mut set = build(&SAMPLE, false);
    set.insert(&idx("T"), false).unwrap();
    set.set_resolution(9).unwrap();
    let bytes = set.to_bytes();
    let read = TileSet::from_bytes(&bytes).unwrap();
    assert_eq!(read, set);
    assert_eq!(read.resolution(), 9);
    for probe in ["T-0102", "M-0303004", "M-0303", "M-06005", "3-201", "4-3", "B-0"] {
      let probe = idx(probe);
      assert_eq!(read.contains(&probe), set.contains(&probe));
      assert_eq!(read.intersects(&probe), set.intersects(&probe));
    }
  }

  #[test]
  fn test_corrupt_input() {
    let bytes = build(&SAMPLE, false).to_bytes();
    for len in 0..bytes.len() {
      assert_eq!(TileSet::from_bytes(&bytes[..len]), Err(DggsError::CorruptTileSet), "truncated to {len}");
    }
    // A non-leaf byte with no digit bits.
    assert_eq!(TileSet::from_bytes(&[1, 0, 0, 0, 0]), Err(DggsError::CorruptTileSet));
    // Resolution out of range.
    assert_eq!(TileSet::from_bytes(&[0, 0, 0, 0, 41]), Err(DggsError::CorruptTileSet));
    // A run deeper than the maximum resolution.
    let mut deep = vec![1, 0, 0, 0];
    deep.extend(std::iter::repeat(1).take(MAX_DIGITS + 1));
    deep.push(LEAF_FLAG | 1);
    deep.push(0);
    assert_eq!(TileSet::from_bytes(&deep), Err(DggsError::CorruptTileSet));
  }

  #[test]
  fn test_empty_set() {
    let mut set = TileSet::new();
    assert!(set.is_empty());
    assert_eq!(set.count(), 0);
    assert_eq!(set.to_bytes(), vec![0, 0, 0, 0, 0]);
    assert_eq!(TileSet::from_bytes(&[0, 0, 0, 0, 0]).unwrap(), set);
    set.insert(&idx("7"), false).unwrap();
    assert_eq!(strs(&set), ["7"]);
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.insert(&Index::NULL, false), Err(DggsError::InvalidIndex));
  }
}
