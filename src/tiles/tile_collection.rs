// src/tiles/tile_collection.rs

use super::{Tile, TileSet, TileSetIter};
use crate::hierarchy::cell_to_children_size;
use crate::index::Index;
use crate::types::DggsError;
use std::io::{Read, Write};

/// A normalised set of tiles sharing one cell resolution.
///
/// Backed by a [`TileSet`] whose resolution limit is the cell resolution. With
/// auto-aggregation on (the default), complete sibling sets collapse into their parent
/// as tiles are added.
#[derive(Debug, Clone, PartialEq)]
pub struct TileCollection {
  tiles: TileSet,
  auto_aggregate: bool,
}

impl Default for TileCollection {
  fn default() -> Self {
    Self::new()
  }
}

impl TileCollection {
  /// An empty, auto-aggregating collection. The first tile added fixes the cell resolution.
  #[must_use]
  pub fn new() -> Self {
    Self {
      tiles: TileSet::new(),
      auto_aggregate: true,
    }
  }

  #[must_use]
  pub fn with_auto_aggregate(mut self, auto_aggregate: bool) -> Self {
    self.auto_aggregate = auto_aggregate;
    self
  }

  #[must_use]
  pub fn auto_aggregate(&self) -> bool {
    self.auto_aggregate
  }

  /// Resolution of the cells the tiles stand for, 0 while nothing has fixed it.
  #[must_use]
  pub fn cell_resolution(&self) -> u8 {
    self.tiles.resolution()
  }

  /// Changes the cell resolution. Tiles finer than a lowered resolution are truncated.
  pub fn set_cell_resolution(&mut self, cell_resolution: u8) -> Result<(), DggsError> {
    self.tiles.set_resolution(cell_resolution)
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.tiles.is_empty()
  }

  pub fn clear(&mut self) {
    self.tiles.clear();
  }

  /// Number of tiles.
  #[must_use]
  pub fn tile_count(&self) -> usize {
    self.tiles.count()
  }

  /// Number of cells covered at the cell resolution.
  #[must_use]
  pub fn cell_count(&self) -> u128 {
    let resolution = self.cell_resolution();
    self
      .tiles
      .iter()
      .map(|root| cell_to_children_size(&root, resolution.max(root.resolution())).unwrap_or(0))
      .sum()
  }

  /// Adds `root`'s cells at `cell_resolution`.
  ///
  /// Fails with [`DggsError::ResolutionMismatch`] when the collection already holds tiles
  /// at another cell resolution.
  pub fn add_index(&mut self, root: &Index, cell_resolution: u8) -> Result<(), DggsError> {
    if self.is_empty() {
      self.tiles.set_resolution(cell_resolution)?;
    } else if cell_resolution != self.cell_resolution() {
      return Err(DggsError::ResolutionMismatch);
    }
    self.tiles.insert(root, self.auto_aggregate)
  }

  pub fn add_tile(&mut self, tile: &Tile) -> Result<(), DggsError> {
    self.add_index(&tile.root(), tile.cell_resolution())
  }

  /// Merges another collection in, taking the finer of the two cell resolutions.
  pub fn add_collection(&mut self, other: &TileCollection) -> Result<(), DggsError> {
    if self.cell_resolution() < other.cell_resolution() {
      self.set_cell_resolution(other.cell_resolution())?;
    }
    self.tiles.insert_set(&other.tiles, self.auto_aggregate)
  }

  /// Tile roots in trie order.
  #[must_use]
  pub fn indices(&self) -> TileSetIter<'_> {
    self.tiles.iter()
  }

  /// The tiles, each at the collection's cell resolution.
  pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
    let resolution = self.cell_resolution();
    self
      .tiles
      .iter()
      .filter_map(move |root| Tile::new(root, resolution.max(root.resolution())).ok())
  }

  /// True if `index` lies entirely inside the collection.
  #[must_use]
  pub fn contains(&self, index: &Index) -> bool {
    self.tiles.contains(index)
  }

  #[must_use]
  pub fn contains_tile(&self, tile: &Tile) -> bool {
    self.tiles.contains(&tile.root())
  }

  /// True if every tile of `other` lies inside this collection.
  #[must_use]
  pub fn contains_collection(&self, other: &TileCollection) -> bool {
    other.indices().all(|root| self.tiles.contains(&root))
  }

  /// True if `index` overlaps the collection.
  #[must_use]
  pub fn intersects(&self, index: &Index) -> bool {
    self.tiles.intersects(index)
  }

  #[must_use]
  pub fn intersects_tile(&self, tile: &Tile) -> bool {
    self.tiles.intersects(&tile.root())
  }

  /// True if the two collections overlap anywhere.
  #[must_use]
  pub fn intersects_collection(&self, other: &TileCollection) -> bool {
    // Both walks are ordered, so overlapping roots meet while stepping the smaller one.
    let mut mine = self.indices().peekable();
    let mut theirs = other.indices().peekable();
    while let (Some(a), Some(b)) = (mine.peek(), theirs.peek()) {
      if a.is_ancestor_of(b) || b.is_ancestor_of(a) {
        return true;
      }
      if a < b {
        mine.next();
      } else {
        theirs.next();
      }
    }
    false
  }

  /// The area shared by two collections, at the finer cell resolution.
  pub fn intersection(&self, other: &TileCollection) -> Result<TileCollection, DggsError> {
    let resolution = self.cell_resolution().max(other.cell_resolution());
    let mut result = TileCollection::new().with_auto_aggregate(self.auto_aggregate);
    let shared = self
      .indices()
      .filter(|root| other.tiles.contains(root))
      .chain(other.indices().filter(|root| self.tiles.contains(root)));
    for root in shared {
      result.add_index(&root, resolution.max(root.resolution()))?;
    }
    Ok(result)
  }

  /// Both collections combined, at the finer cell resolution.
  pub fn union(&self, other: &TileCollection) -> Result<TileCollection, DggsError> {
    let mut result = other.clone();
    result.auto_aggregate = self.auto_aggregate;
    result.add_collection(self)?;
    Ok(result)
  }

  /// A copy at another cell resolution; tiles finer than `resolution` are truncated to it.
  pub fn copy_to_resolution(&self, resolution: u8) -> Result<TileCollection, DggsError> {
    if resolution == self.cell_resolution() {
      return Ok(self.clone());
    }
    let mut copy = TileCollection::new().with_auto_aggregate(self.auto_aggregate);
    for root in self.indices() {
      let root = if root.resolution() > resolution {
        root.with_resolution(resolution)?
      } else {
        root
      };
      copy.add_index(&root, resolution)?;
    }
    Ok(copy)
  }

  /// Lowers the cell resolution until there are at most `max_tiles` tiles, or raises it
  /// (never past the current one) while there are fewer.
  ///
  /// Resolutions are tried from 5 or the current resolution, whichever is lower.
  pub fn limit_tile_count(&mut self, max_tiles: usize) -> Result<(), DggsError> {
    let original = self.clone();
    let original_resolution = self.cell_resolution();
    let mut resolution = original_resolution.min(5);
    *self = original.copy_to_resolution(resolution)?;

    while self.tile_count() < max_tiles && resolution < original_resolution {
      resolution += 1;
      *self = original.copy_to_resolution(resolution)?;
    }
    while self.tile_count() > max_tiles && resolution > 1 {
      resolution -= 1;
      *self = original.copy_to_resolution(resolution)?;
    }
    Ok(())
  }

  pub fn serialize<W: Write>(&self, writer: &mut W) -> Result<(), DggsError> {
    self.tiles.serialize(writer)
  }

  /// Reads a collection; its cell resolution is the stored set's resolution.
  pub fn deserialize<R: Read>(reader: &mut R) -> Result<TileCollection, DggsError> {
    Ok(Self {
      tiles: TileSet::deserialize(reader)?,
      auto_aggregate: true,
    })
  }

  /// The underlying tile set.
  #[must_use]
  pub fn tile_set(&self) -> &TileSet {
    &self.tiles
  }
}

impl From<Tile> for TileCollection {
  fn from(tile: Tile) -> Self {
    let mut collection = TileCollection::new();
    // A fresh collection takes any tile.
    let _ = collection.add_tile(&tile);
    collection
  }
}
