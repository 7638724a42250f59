// src/hierarchy/parent_child.rs

use crate::constants::{MAX_RESOLUTION, PRIMARY_RESOLUTION};
use crate::index::Index;
use crate::iterators::{ChildIterator, VertexIterator};
use crate::primaries::all_primaries;
use crate::types::{DggsError, Direction};

/// Shape of a cell as far as its descendant tree is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
  /// A pentagon: one pentagon child and five vertex children.
  Pentagon,
  /// A hexagon with vertex children: one centroid child and six vertex children.
  Centroid,
  /// A hexagon without vertex children, or a bare face: one centroid child.
  Vertex,
}

fn cell_kind(index: &Index) -> CellKind {
  if index.is_pentagon() {
    CellKind::Pentagon
  } else if index.has_vertex_children() {
    CellKind::Centroid
  } else {
    CellKind::Vertex
  }
}

/// Produces the ancestor of `index` at `parent_res`.
pub fn cell_to_parent(index: &Index, parent_res: u8) -> Result<Index, DggsError> {
  if !index.is_valid() {
    return Err(DggsError::InvalidIndex);
  }
  if parent_res < PRIMARY_RESOLUTION || parent_res > index.resolution() {
    return Err(DggsError::InvalidResolution);
  }
  index.with_resolution(parent_res)
}

/// Produces the centroid descendant of `index` at `child_res`.
pub fn cell_to_center_child(index: &Index, child_res: u8) -> Result<Index, DggsError> {
  if !index.is_valid() {
    return Err(DggsError::InvalidIndex);
  }
  if child_res < index.resolution() || child_res > MAX_RESOLUTION {
    return Err(DggsError::InvalidResolution);
  }
  index.with_resolution(child_res)
}

/// The immediate children of `index`: the centroid child, then each valid vertex child.
pub fn cell_to_children(index: &Index) -> Result<Vec<Index>, DggsError> {
  if !index.is_valid() {
    return Err(DggsError::InvalidIndex);
  }
  if index.resolution() >= MAX_RESOLUTION {
    return Err(DggsError::InvalidResolution);
  }
  Ok(ChildIterator::new(index).collect())
}

/// Number of descendants of `index` at `child_res` (1 when `child_res` is the cell's own resolution).
pub fn cell_to_children_size(index: &Index, child_res: u8) -> Result<u128, DggsError> {
  if !index.is_valid() {
    return Err(DggsError::InvalidIndex);
  }
  if child_res < index.resolution() || child_res > MAX_RESOLUTION {
    return Err(DggsError::InvalidResolution);
  }

  let (mut pentagons, mut centroids, mut vertices) = match cell_kind(index) {
    CellKind::Pentagon => (1u128, 0u128, 0u128),
    CellKind::Centroid => (0, 1, 0),
    CellKind::Vertex => (0, 0, 1),
  };
  for _ in index.resolution()..child_res {
    let next_vertices = 5 * pentagons + 6 * centroids;
    centroids += vertices;
    vertices = next_vertices;
  }
  Ok(pentagons + centroids + vertices)
}

/// Number of cells covering the globe at `resolution`. Resolution 0 counts the 12 vertices.
pub fn cell_count(resolution: u8) -> Result<u128, DggsError> {
  if resolution > MAX_RESOLUTION {
    return Err(DggsError::InvalidResolution);
  }
  if resolution == 0 {
    return Ok(12);
  }
  all_primaries().try_fold(0u128, |total, primary| {
    let root = Index::from_raw(primary, &[]);
    Ok(total + cell_to_children_size(&root, resolution)?)
  })
}

/// The cells one resolution finer that cover `index`: its centroid child and its vertices.
pub fn covered_cells(index: &Index) -> Result<Vec<Index>, DggsError> {
  let centroid = index.centroid_child()?;
  let mut cells = Vec::with_capacity(7);
  cells.push(centroid);
  cells.extend(VertexIterator::new(index));
  Ok(cells)
}

/// Position of `child` among its parent's children, in [`cell_to_children`] order.
pub fn child_position(child: &Index) -> Result<usize, DggsError> {
  let parent = child.parent().ok_or(DggsError::InvalidIndex)?;
  ChildIterator::new(&parent)
    .position(|c| c == *child)
    .ok_or(DggsError::InvalidIndex)
}

/// The direction of the last step from `child`'s parent, `Zero` for a centroid child.
pub fn direction_from_parent(child: &Index) -> Direction {
  child
    .last_digit()
    .and_then(Direction::from_digit)
    .unwrap_or(Direction::Zero)
}

/// True if the two cells are distinct children of the same parent.
#[must_use]
pub fn are_siblings(a: &Index, b: &Index) -> bool {
  a != b && a.digit_count() > 0 && a.parent() == b.parent()
}
