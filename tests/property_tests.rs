// tests/property_tests.rs

use proptest::prelude::*;
use pyxis_dggs::*;

/// Walks down from a random primary, picking one child per step.
fn valid_index(max_depth: usize) -> impl Strategy<Value = Index> {
  (0usize..32, prop::collection::vec(0usize..7, 0..max_depth)).prop_map(|(root, picks)| {
    let primaries: Vec<Index> = ResolutionIterator::new(1).collect();
    let mut index = primaries[root];
    for pick in picks {
      let children = cell_to_children(&index).unwrap();
      index = children[pick % children.len()];
    }
    index
  })
}

proptest! {
  #[test]
  fn prop_string_round_trip(index in valid_index(20)) {
    let text = index.to_string();
    prop_assert_eq!(string_to_index(&text), Ok(index));
    prop_assert!(index.is_valid());
  }

  #[test]
  fn prop_parent_child_inverse(index in valid_index(15)) {
    for child in cell_to_children(&index).unwrap() {
      prop_assert_eq!(child.parent(), Some(index));
      prop_assert_eq!(cell_to_parent(&child, index.resolution()), Ok(index));
      prop_assert!(index.is_ancestor_of(&child));
    }
    let covered = covered_cells(&index).unwrap();
    prop_assert_eq!(covered[0], cell_to_center_child(&index, index.resolution() + 1).unwrap());
  }

  #[test]
  fn prop_neighbours_are_mutual(index in valid_index(12)) {
    for neighbour in NeighbourIterator::new(&index).skip(1) {
      prop_assert_eq!(neighbour.resolution(), index.resolution());
      prop_assert!(NeighbourIterator::new(&neighbour).any(|back| back == index));
      prop_assert_ne!(neighbour_direction(&index, &neighbour), Direction::Zero);
    }
  }

  #[test]
  fn prop_insert_is_idempotent(tiles in prop::collection::vec(valid_index(8), 1..20), aggregate in any::<bool>()) {
    let mut set = TileSet::new();
    for tile in &tiles {
      set.insert(tile, aggregate).unwrap();
    }
    let snapshot = set.clone();
    for tile in &tiles {
      set.insert(tile, aggregate).unwrap();
      prop_assert!(set.contains(tile));
    }
    prop_assert_eq!(set, snapshot);
  }

  #[test]
  fn prop_serialization_preserves_queries(
    tiles in prop::collection::vec(valid_index(8), 0..20),
    probes in prop::collection::vec(valid_index(9), 0..40),
  ) {
    let mut set = TileSet::new();
    for tile in &tiles {
      set.insert(tile, true).unwrap();
    }
    let read = TileSet::from_bytes(&set.to_bytes()).unwrap();
    for probe in probes.iter().chain(&tiles) {
      prop_assert_eq!(read.contains(probe), set.contains(probe));
      prop_assert_eq!(read.intersects(probe), set.intersects(probe));
    }
  }
}
