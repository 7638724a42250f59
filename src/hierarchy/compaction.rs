// src/hierarchy/compaction.rs

use crate::constants::MAX_RESOLUTION;
use crate::hierarchy::parent_child::cell_to_children_size;
use crate::index::Index;
use crate::iterators::DescendantIterator;
use crate::tiles::TileSet;
use crate::types::DggsError;

/// Replaces every complete set of siblings by its parent, repeatedly.
///
/// Duplicates and cells covered by another input cell are dropped. The result is sorted.
pub fn compact_cells(cells: &[Index]) -> Result<Vec<Index>, DggsError> {
  let mut set = TileSet::new();
  for cell in cells {
    if !cell.is_valid() {
      return Err(DggsError::InvalidIndex);
    }
    set.insert(cell, true)?;
  }
  Ok(set.iter().collect())
}

fn check_uncompact(cell: &Index, res: u8) -> Result<(), DggsError> {
  if !cell.is_valid() {
    return Err(DggsError::InvalidIndex);
  }
  if cell.resolution() > res {
    return Err(DggsError::ResolutionMismatch);
  }
  Ok(())
}

/// Number of cells [`uncompact_cells`] would produce.
pub fn uncompact_cells_size(compacted: &[Index], res: u8) -> Result<u128, DggsError> {
  if res > MAX_RESOLUTION {
    return Err(DggsError::InvalidResolution);
  }
  let mut count = 0u128;
  for cell in compacted.iter().filter(|c| !c.is_null()) {
    check_uncompact(cell, res)?;
    count = count.saturating_add(cell_to_children_size(cell, res)?);
  }
  Ok(count)
}

/// Expands each cell into its descendants at `res`. Null entries are skipped.
pub fn uncompact_cells(compacted: &[Index], res: u8) -> Result<Vec<Index>, DggsError> {
  if res > MAX_RESOLUTION {
    return Err(DggsError::InvalidResolution);
  }
  let mut out = Vec::new();
  for cell in compacted.iter().filter(|c| !c.is_null()) {
    check_uncompact(cell, res)?;
    out.extend(DescendantIterator::new(cell, res));
  }
  Ok(out)
}
