// src/tiles/mod.rs

//! Tiles and the compact structures that store them.

pub mod tile;
pub mod tile_collection;
pub mod tile_set;

pub use tile::Tile;
pub use tile_collection::TileCollection;
pub use tile_set::{TileSet, TileSetIter};
