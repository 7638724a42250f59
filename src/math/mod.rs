// src/math/mod.rs
#![allow(clippy::module_name_repetitions)] // Common in math modules

pub mod icos;
pub mod sub_index;

pub use icos::{
  move_index, move_with_rotation, move_within_root, neighbour_direction, resolution0_move, rotate_direction, Step,
};
