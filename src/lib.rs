//! **mazecrawl** generates stacks of maze levels and moves a player box through them.
//!
//! Each level is a perfect maze carved by a recursive backtracker, turned into wall blocks and
//! floor slabs. Movement is resolved in discrete steps, one axis at a time, against those boxes.

pub mod cells;
pub mod errors;
pub mod game;
pub mod generators;
pub mod geometry;
pub mod grid;
pub mod grid_iterators;
pub mod grid_traits;
pub mod level;
pub mod motion;
pub mod pathing;
pub mod units;
mod utils;
