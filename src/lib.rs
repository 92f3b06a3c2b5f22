//! **mazegen** generates perfect mazes on rectangular grids with a randomised
//! depth-first backtracking algorithm, exposed one step at a time so a caller
//! can watch (and pace) the generation cell by cell.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_traits;
pub mod pathing;
pub mod units;
mod utils;
