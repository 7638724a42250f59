#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
#![allow(clippy::wildcard_imports)]

//! `pyxis_dggs` implements the core of the PYXIS discrete global grid: an icosahedral,
//! aperture-3 hexagonal tiling of the sphere.
//!
//! It provides the cell index algebra (parsing, neighbours, parents and children), a
//! depth-first containment search that turns a region test into a compact set of tiles,
//! a persistent trie for storing those tiles, and bounding rectangles in native coordinates.
//! Projection between native coordinates and cells is supplied by the caller through
//! [`CoordConverter`].

pub mod bbox;
pub mod constants;
pub mod containment;
pub mod converter;
pub mod hierarchy;
pub mod index;
pub mod iterators;
pub mod latlng;
pub mod math;
pub mod measures;
pub mod primaries;
pub mod tiles;
pub mod types;

pub use bbox::{split_bounds, BoundingRectsCalculator, DEFAULT_SPLIT_LONGITUDE};
pub use constants::{MAX_RESOLUTION, PRIMARY_RESOLUTION};
pub use containment::{
  CachedCoverage, CircleIntersectionTest, ContainmentTest, TestConfig, TestOutcome, Traverser, XyIntersectionTest,
};
pub use converter::CoordConverter;
pub use hierarchy::{
  are_siblings, cell_count, cell_to_center_child, cell_to_children, cell_to_children_size, cell_to_parent,
  child_position, compact_cells, covered_cells, direction_from_parent, uncompact_cells, uncompact_cells_size,
};
pub use index::string_conv::{index_to_string, string_to_index};
pub use index::Index;
pub use iterators::{
  ChildIterator, DescendantIterator, HexDirectionIterator, NeighbourIterator, ResolutionIterator,
  ValidDirectionIterator, VertexIterator,
};
pub use latlng::{degs_to_rads, great_circle_distance_m, great_circle_distance_rads, metres_to_rads, rads_to_degs};
pub use math::{
  move_index, move_with_rotation, move_within_root, neighbour_direction, resolution0_move, rotate_direction, Step,
};
pub use measures::{circumradius_m, circumradius_rads, resolution_for_radius_m};
pub use tiles::{Tile, TileCollection, TileSet, TileSetIter};
pub use types::{DggsError, Direction, GeoPoint, HexClass, Rect, TestResult};
