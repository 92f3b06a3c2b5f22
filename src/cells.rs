use smallvec::SmallVec;
use std::convert::From;

use crate::units::{ColumnIndex, RowIndex, Width};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, width: Width) -> Cartesian2DCoordinate {
        let Width(w) = width;
        Cartesian2DCoordinate::new((index % w) as u32, (index / w) as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Cartesian2DCoordinate {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    /// The coordinate one cell away in the given direction.
    /// None when that would take x or y below zero. The upper bounds are the
    /// grid's to check - a bare coordinate does not know the grid dimensions.
    pub fn offset(self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => {
                if y > 0 {
                    Some(Cartesian2DCoordinate { x, y: y - 1 })
                } else {
                    None
                }
            }
            CompassPrimary::South => Some(Cartesian2DCoordinate { x, y: y + 1 }),
            CompassPrimary::East => Some(Cartesian2DCoordinate { x: x + 1, y }),
            CompassPrimary::West => {
                if x > 0 {
                    Some(Cartesian2DCoordinate { x: x - 1, y })
                } else {
                    None
                }
            }
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] =
        [CompassPrimary::North, CompassPrimary::South, CompassPrimary::East, CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// The wall slot on a cell that faces this direction.
    /// Carving a passage clears this slot on the source cell and the
    /// `opposite()` slot on the target cell - the single source of truth for
    /// the wall-removal geometry.
    #[inline]
    pub fn wall_index(self) -> usize {
        match self {
            CompassPrimary::North => 0,
            CompassPrimary::South => 1,
            CompassPrimary::East => 2,
            CompassPrimary::West => 3,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellState {
    /// Not yet reached by the generator.
    Available,
    /// The active head of the generation path. At most one cell at a time.
    Current,
    /// Reached and left behind by the generator.
    Visited,
    /// The entrance or exit, marked once generation completes.
    Endpoint,
}

/// One grid unit: four wall slots (present/absent) and a visitation state.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    walls: [bool; 4],
    state: CellState,
}

impl Cell {
    pub fn new() -> Cell {
        Cell {
            walls: [true; 4],
            state: CellState::Available,
        }
    }

    #[inline]
    pub fn is_wall_present(&self, dir: CompassPrimary) -> bool {
        self.walls[dir.wall_index()]
    }

    #[inline]
    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.state == CellState::Available
    }

    pub(crate) fn remove_wall(&mut self, dir: CompassPrimary) {
        self.walls[dir.wall_index()] = false;
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn offsets_in_each_direction() {
        let c = Cartesian2DCoordinate::new(1, 1);
        assert_eq!(c.offset(CompassPrimary::North), Some(Cartesian2DCoordinate::new(1, 0)));
        assert_eq!(c.offset(CompassPrimary::South), Some(Cartesian2DCoordinate::new(1, 2)));
        assert_eq!(c.offset(CompassPrimary::East), Some(Cartesian2DCoordinate::new(2, 1)));
        assert_eq!(c.offset(CompassPrimary::West), Some(Cartesian2DCoordinate::new(0, 1)));
    }

    #[test]
    fn offsets_do_not_underflow() {
        let origin = Cartesian2DCoordinate::new(0, 0);
        assert_eq!(origin.offset(CompassPrimary::North), None);
        assert_eq!(origin.offset(CompassPrimary::West), None);
    }

    #[test]
    fn directions_pair_up() {
        for &dir in CompassPrimary::ALL.iter() {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.wall_index(), dir.opposite().wall_index());
        }
    }

    #[test]
    fn row_major_round_trip() {
        let w = Width(3);
        let coords: Vec<Cartesian2DCoordinate> =
            (0..6).map(|i| Cartesian2DCoordinate::from_row_major_index(i, w)).collect();
        assert_eq!(coords,
                   &[Cartesian2DCoordinate::new(0, 0),
                     Cartesian2DCoordinate::new(1, 0),
                     Cartesian2DCoordinate::new(2, 0),
                     Cartesian2DCoordinate::new(0, 1),
                     Cartesian2DCoordinate::new(1, 1),
                     Cartesian2DCoordinate::new(2, 1)]);
    }

    #[test]
    fn new_cell_is_closed_and_available() {
        let cell = Cell::new();
        assert!(cell.is_available());
        for &dir in CompassPrimary::ALL.iter() {
            assert!(cell.is_wall_present(dir));
        }
    }
}
