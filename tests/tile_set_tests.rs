// tests/tile_set_tests.rs

use pyxis_dggs::*;

fn idx(s: &str) -> Index {
  s.parse().unwrap()
}

fn set_of(tiles: &[&str], aggregate: bool) -> TileSet {
  let mut set = TileSet::new();
  for tile in tiles {
    set.insert(&idx(tile), aggregate).unwrap();
  }
  set
}

fn strs(set: &TileSet) -> Vec<String> {
  set.iter().map(|i| i.to_string()).collect()
}

const REFERENCE_TILES: [&str; 11] = [
  "3-2", "3-30", "4-2", "M-02", "M-0302", "M-0303004", "M-050", "M-060002", "M-060010", "M-0600503", "M-0600504",
];

#[test]
fn test_reference_stream() {
  let set = set_of(&REFERENCE_TILES, false);
  assert_eq!(
    set.to_bytes(),
    [12, 0, 0, 1, 12, 128, 129, 132, 1, 108, 128, 1, 12, 128, 1, 1, 144, 129, 1, 1, 35, 132, 129, 1, 152, 0]
  );
  assert_eq!(strs(&set), REFERENCE_TILES);
}

#[test]
fn test_insert_is_idempotent() {
  let mut set = set_of(&REFERENCE_TILES, false);
  let before = set.count();
  set.insert(&idx("M-0302"), false).unwrap();
  set.insert(&idx("M-03020"), false).unwrap();
  assert_eq!(set.count(), before);
  assert_eq!(set.insert(&Index::NULL, false), Err(DggsError::InvalidIndex));
}

#[test]
fn test_children_collapse_into_centroid() {
  let children: Vec<String> = cell_to_children(&idx("B-00")).unwrap().iter().map(ToString::to_string).collect();
  let refs: Vec<&str> = children.iter().map(String::as_str).collect();
  assert_eq!(strs(&set_of(&refs, true)), ["B-00"]);
  assert_eq!(set_of(&refs, false).count(), 7);

  let pentagon: Vec<String> = cell_to_children(&idx("1-0")).unwrap().iter().map(ToString::to_string).collect();
  let refs: Vec<&str> = pentagon.iter().map(String::as_str).collect();
  assert_eq!(refs.len(), 6);
  assert_eq!(strs(&set_of(&refs, true)), ["1-0"]);
}

#[test]
fn test_full_descendant_sets_collapse_to_their_root() {
  for (root, res) in [("C", 4), ("B-02", 6), ("1-0", 5), ("A-00", 6)] {
    let cells: Vec<Index> = DescendantIterator::new(&idx(root), res).collect();

    let mut forward = TileSet::new();
    for cell in &cells {
      forward.insert(cell, true).unwrap();
    }
    assert_eq!(strs(&forward), [root], "{root} at {res}");

    let mut backward = TileSet::new();
    for cell in cells.iter().rev() {
      backward.insert(cell, true).unwrap();
    }
    assert_eq!(strs(&backward), [root], "{root} at {res}, reversed");
  }
}

#[test]
fn test_new_branch_with_lone_child_is_normalised() {
  for (first, second, expected) in [
    ("9-1", "9-2010", ["9-1", "9-201"]),
    ("A-01", "A-0230", ["A-01", "A-023"]),
  ] {
    let forward = set_of(&[first, second], true);
    assert_eq!(strs(&forward), expected);
    assert_eq!(set_of(&[second, first], true), forward);

    let mut repeated = forward.clone();
    repeated.insert(&idx(second), true).unwrap();
    assert_eq!(repeated, forward);
  }
}

#[test]
fn test_iteration_yields_maximal_tiles() {
  let set = set_of(&["A-0202", "A-02", "A-020", "C-0", "C-01", "7-01"], false);
  assert_eq!(strs(&set), ["7-01", "A-02", "C-0"]);
  let tiles: Vec<Index> = set.iter().collect();
  for a in &tiles {
    for b in &tiles {
      assert!(a == b || !a.is_ancestor_of(b), "{a} covers {b}");
    }
  }
}

#[test]
fn test_round_trip_preserves_queries() {
  let set = set_of(&REFERENCE_TILES, true);
  let mut bytes = Vec::new();
  set.serialize(&mut bytes).unwrap();
  let read = TileSet::deserialize(&mut bytes.as_slice()).unwrap();
  assert_eq!(read, set);

  let samples = ResolutionIterator::new(4)
    .chain(ResolutionIterator::new(2))
    .chain(REFERENCE_TILES.iter().map(|s| idx(s)))
    .chain(["M-03030040", "M-06000", "M-0600", "3"].iter().map(|s| idx(s)));
  for sample in samples {
    assert_eq!(read.contains(&sample), set.contains(&sample), "contains {sample}");
    assert_eq!(read.intersects(&sample), set.intersects(&sample), "intersects {sample}");
  }
}

#[test]
fn test_truncated_stream_is_rejected() {
  let bytes = set_of(&REFERENCE_TILES, false).to_bytes();
  for len in 0..bytes.len() {
    assert_eq!(TileSet::from_bytes(&bytes[..len]), Err(DggsError::CorruptTileSet), "length {len}");
  }
}

#[test]
fn test_remove_from_aggregated_tile() {
  let mut set = set_of(&["B-00"], true);
  set.remove(&idx("B-0003"), true).unwrap();
  assert!(!set.intersects(&idx("B-0003")));
  assert!(set.contains(&idx("B-0004")));
  assert!(set.contains(&idx("B-005")));
  assert!(!set.contains(&idx("B-000")));
  assert!(set.intersects(&idx("B-000")));
  assert_eq!(
    strs(&set),
    [
      "B-0000", "B-0001", "B-0002", "B-0004", "B-0005", "B-0006", "B-001", "B-002", "B-003", "B-004", "B-005",
      "B-006"
    ]
  );
}

#[test]
fn test_collection_over_tile_set() {
  let mut collection = TileCollection::new();
  for tile in REFERENCE_TILES {
    collection.add_index(&idx(tile), 10).unwrap();
  }
  assert_eq!(collection.cell_resolution(), 10);
  assert_eq!(collection.tile_set().count(), collection.tile_count());
  let tiles: Vec<Tile> = collection.tiles().collect();
  assert!(tiles.iter().all(|t| t.cell_resolution() == 10));
  assert_eq!(tiles.iter().map(Tile::cell_count).sum::<u128>(), collection.cell_count());

  let bytes = {
    let mut out = Vec::new();
    collection.serialize(&mut out).unwrap();
    out
  };
  assert_eq!(TileCollection::deserialize(&mut bytes.as_slice()).unwrap(), collection);
}
