// src/tiles/tile.rs

use crate::constants::MAX_RESOLUTION;
use crate::hierarchy::cell_to_children_size;
use crate::index::Index;
use crate::iterators::DescendantIterator;
use crate::types::{DggsError, Direction};
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A root cell together with the resolution of the cells it stands for.
///
/// When the cell resolution equals the root's resolution the tile is the single root
/// cell; otherwise it is every descendant of the root at the cell resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tile {
  root: Index,
  cell_resolution: u8,
}

impl Tile {
  /// Usual distance between a tile's root and its cells.
  pub const DEFAULT_DEPTH: u8 = 11;

  /// A tile of `root`'s descendants at `cell_resolution`.
  pub fn new(root: Index, cell_resolution: u8) -> Result<Tile, DggsError> {
    if !root.is_valid() {
      return Err(DggsError::InvalidIndex);
    }
    if cell_resolution < root.resolution() || cell_resolution > MAX_RESOLUTION {
      return Err(DggsError::InvalidResolution);
    }
    Ok(Tile { root, cell_resolution })
  }

  /// The single-cell tile for `cell`.
  pub fn from_cell(cell: Index) -> Result<Tile, DggsError> {
    Tile::new(cell, cell.resolution())
  }

  #[inline]
  #[must_use]
  pub fn root(&self) -> Index {
    self.root
  }

  #[inline]
  #[must_use]
  pub fn cell_resolution(&self) -> u8 {
    self.cell_resolution
  }

  /// Resolutions between the root and the cells.
  #[inline]
  #[must_use]
  pub fn depth(&self) -> u8 {
    self.cell_resolution - self.root.resolution()
  }

  pub fn set_cell_resolution(&mut self, cell_resolution: u8) -> Result<(), DggsError> {
    if cell_resolution < self.root.resolution() || cell_resolution > MAX_RESOLUTION {
      return Err(DggsError::InvalidResolution);
    }
    self.cell_resolution = cell_resolution;
    Ok(())
  }

  /// Moves a vertex-cell root down to its centroid child, so the root has vertex children.
  pub fn set_origin_child_root(&mut self) -> Result<(), DggsError> {
    if self.root.has_vertex_children() {
      return Ok(());
    }
    if self.root.resolution() >= self.cell_resolution {
      return Err(DggsError::InvalidResolution);
    }
    self.root = self.root.increment_resolution()?;
    Ok(())
  }

  /// The smallest cell spatially enclosing every cell of the tile.
  ///
  /// Vertex children poke out of their parent's centroid child, so a root with vertex
  /// children is bounded by its own parent.
  #[must_use]
  pub fn bounding_cell(&self) -> Index {
    if !self.root.has_vertex_children() {
      return self.root;
    }
    self.root.parent().unwrap_or(self.root)
  }

  /// Number of cells in the tile.
  #[must_use]
  pub fn cell_count(&self) -> u128 {
    cell_to_children_size(&self.root, self.cell_resolution).unwrap_or(0)
  }

  /// The cells of the tile, depth first.
  #[must_use]
  pub fn cells(&self) -> DescendantIterator {
    DescendantIterator::new(&self.root, self.cell_resolution)
  }

  /// True if `index` lies in the tile or is an ancestor of its root.
  #[must_use]
  pub fn intersects_index(&self, index: &Index) -> bool {
    self.root.is_ancestor_of(index) || index.is_ancestor_of(&self.root)
  }

  /// True if the two tiles share any area.
  #[must_use]
  pub fn intersects(&self, other: &Tile) -> bool {
    self.intersects_index(&other.root)
  }

  /// The overlap of two tiles at the finer of their cell resolutions.
  #[must_use]
  pub fn intersection(&self, other: &Tile) -> Option<Tile> {
    let root = if self.root.is_descendant_of(&other.root) {
      self.root
    } else if other.root.is_descendant_of(&self.root) {
      other.root
    } else {
      return None;
    };
    Some(Tile {
      root,
      cell_resolution: self.cell_resolution.max(other.cell_resolution),
    })
  }

  /// Cells on the outer corners of the tile, for bounding-box estimates.
  ///
  /// From each valid direction of the root, three paths run outwards at the cell resolution,
  /// alternating centroid and vertex steps so each stays on the rim.
  #[must_use]
  pub fn corner_cells(&self) -> Vec<Index> {
    let mut corners: Vec<Index> = Vec::new();
    for first in Direction::NON_ZERO {
      if !self.root.is_valid_direction(first) {
        continue;
      }
      let d1 = first.digit();
      let (mut d2, mut d3) = (d1, d1);
      let mut paths = [self.root; 3];
      let mut adding_zero = !self.root.has_vertex_children();
      for _ in 0..self.depth() {
        if adding_zero {
          for path in &mut paths {
            *path = path.pushed(0);
          }
        } else {
          paths[0] = paths[0].pushed(d1);
          paths[1] = paths[1].pushed(d2);
          paths[2] = paths[2].pushed(d3);
          d2 = (d1 + 4) % 6 + 1;
          d3 = d1 % 6 + 1;
        }
        adding_zero = !adding_zero;
      }
      for path in paths {
        if !corners.contains(&path) {
          corners.push(path);
        }
      }
    }
    corners
  }
}

impl PartialOrd for Tile {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

/// Orders by cell resolution, then by root.
impl Ord for Tile {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .cell_resolution
      .cmp(&other.cell_resolution)
      .then_with(|| self.root.cmp(&other.root))
  }
}

impl fmt::Display for Tile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.root, self.cell_resolution)
  }
}
