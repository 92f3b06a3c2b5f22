use std::error;
use std::fmt;
use std::rc::Rc;

use crate::cells::{Cartesian2DCoordinate, Cell, CellState, CompassPrimary, CoordinateSmallVec};
use crate::grid_traits::{CellObserver, GridDisplay};
use crate::units::{ColumnIndex, Height, NodesCount, RowIndex, Width};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    /// A grid cannot be built with a zero width or height.
    InvalidDimensions { width: usize, height: usize },
    /// The coordinate lies outside the grid.
    InvalidGridCoordinate(Cartesian2DCoordinate),
    /// `remove_boundary_wall` aimed at a wall with a neighbouring cell behind it.
    NotABoundaryWall(Cartesian2DCoordinate, CompassPrimary),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridError::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {}x{}, width and height must be non-zero", width, height)
            }
            GridError::InvalidGridCoordinate(coord) => {
                write!(f, "coordinate ({}, {}) is outside the grid", coord.x, coord.y)
            }
            GridError::NotABoundaryWall(coord, dir) => {
                write!(f, "the {:?} wall of ({}, {}) is not on the grid boundary", dir, coord.x, coord.y)
            }
        }
    }
}

impl error::Error for GridError {
    fn description(&self) -> &str {
        "grid error"
    }
}

/// A rectangular arena of cells addressed by coordinate.
///
/// The cell store is fully populated at construction and fixed in size for
/// the grid's lifetime - regeneration means building a new grid. Only the
/// generator mutates cells (walls and states) and every mutation is reported
/// to the observer, if one is set.
pub struct Grid {
    width: Width,
    height: Height,
    cells: Vec<Cell>,
    links_count: usize,
    observer: Option<Rc<dyn CellObserver>>,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: width: {:?}, height: {:?}, links: {:?}",
               self.width,
               self.height,
               self.links_count)
    }
}

impl Grid {
    pub fn new(width: Width, height: Height) -> Result<Grid, GridError> {
        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 {
            return Err(GridError::InvalidDimensions { width: w, height: h });
        }

        Ok(Grid {
            width,
            height,
            cells: vec![Cell::new(); w * h],
            links_count: 0,
            observer: None,
            grid_display: None,
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.width.0 * self.height.0)
    }

    /// Count of open passages between adjacent cells.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.links_count
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Rc<dyn GridDisplay>> {
        &self.grid_display
    }

    #[inline]
    pub fn set_observer(&mut self, observer: Option<Rc<dyn CellObserver>>) {
        self.observer = observer;
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// Direct cell lookup. All coordinates originate from the grid itself, so
    /// an out of range coordinate is a programming error and panics.
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> &Cell {
        let index = self.grid_coordinate_to_index(coord)
            .unwrap_or_else(|| panic!("coordinate ({}, {}) out of grid bounds", coord.x, coord.y));
        &self.cells[index]
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        coord.offset(direction)
            .and_then(|neighbour_coord| if self.is_valid_coordinate(neighbour_coord) {
                Some(neighbour_coord)
            } else {
                None
            })
    }

    /// Cells to the North, South, East or West of a coordinate, whether or
    /// not a passage links them.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    /// Cells linked to a coordinate by an open passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|&dir| if self.is_linked(coord, dir) {
                self.neighbour_at_direction(coord, dir)
            } else {
                None
            })
            .collect()
    }

    /// Is the passage from this cell towards the given direction open?
    pub fn is_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |_| !self.cell(coord).is_wall_present(direction))
    }

    /// Open the passage from a cell to its neighbour in the given direction.
    ///
    /// Both wall slots are cleared - the slot on the source facing the target
    /// and the slot on the target facing the source - so the passage is
    /// navigable in either direction. Returns the target coordinate.
    pub fn link(&mut self,
                coord: Cartesian2DCoordinate,
                direction: CompassPrimary)
                -> Result<Cartesian2DCoordinate, GridError> {
        if !self.is_valid_coordinate(coord) {
            return Err(GridError::InvalidGridCoordinate(coord));
        }
        let target = self.neighbour_at_direction(coord, direction)
            .ok_or_else(|| GridError::InvalidGridCoordinate(coord.offset(direction)
                .unwrap_or(coord)))?;

        let was_closed = self.cell(coord).is_wall_present(direction);
        if was_closed {
            self.cell_mut(coord).remove_wall(direction);
            self.cell_mut(target).remove_wall(direction.opposite());
            self.links_count += 1;
            self.notify(coord);
            self.notify(target);
        }

        Ok(target)
    }

    /// Remove a wall on the grid's outer boundary, exposing the cell to the
    /// exterior. Fails when another cell sits behind the wall. Removing an
    /// already absent wall is a no-op.
    pub fn remove_boundary_wall(&mut self,
                                coord: Cartesian2DCoordinate,
                                direction: CompassPrimary)
                                -> Result<(), GridError> {
        if !self.is_valid_coordinate(coord) {
            return Err(GridError::InvalidGridCoordinate(coord));
        }
        if self.neighbour_at_direction(coord, direction).is_some() {
            return Err(GridError::NotABoundaryWall(coord, direction));
        }

        if self.cell(coord).is_wall_present(direction) {
            self.cell_mut(coord).remove_wall(direction);
            self.notify(coord);
        }
        Ok(())
    }

    pub(crate) fn set_cell_state(&mut self, coord: Cartesian2DCoordinate, state: CellState) {
        if self.cell(coord).state() != state {
            self.cell_mut(coord).set_state(state);
            self.notify(coord);
        }
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            width: self.width,
            cells_count: self.size().0,
        }
    }

    pub fn iter_row(&self) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Row,
            current_index: 0,
            width: self.width,
            height: self.height,
        }
    }

    pub fn iter_column(&self) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Column,
            current_index: 0,
            width: self.width,
            height: self.height,
        }
    }

    fn cell_mut(&mut self, coord: Cartesian2DCoordinate) -> &mut Cell {
        let index = self.grid_coordinate_to_index(coord)
            .unwrap_or_else(|| panic!("coordinate ({}, {}) out of grid bounds", coord.x, coord.y));
        &mut self.cells[index]
    }

    fn notify(&self, coord: Cartesian2DCoordinate) {
        if let Some(ref observer) = self.observer {
            observer.cell_updated(coord, self.cell(coord));
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    width: Width,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.width);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

#[derive(Debug, Copy, Clone)]
enum BatchIterType {
    Row,
    Column,
}

#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    width: Width,
    height: Height,
}

impl Iterator for BatchIter {
    type Item = Vec<Cartesian2DCoordinate>;

    fn next(&mut self) -> Option<Self::Item> {
        let (batches_count, batch_length) = if let BatchIterType::Row = self.iter_type {
            (self.height.0, self.width.0)
        } else {
            (self.width.0, self.height.0)
        };

        if self.current_index < batches_count {
            let coords = (0..batch_length)
                .map(|i| if let BatchIterType::Row = self.iter_type {
                    Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(i),
                                                                   RowIndex(self.current_index))
                } else {
                    Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(self.current_index),
                                                                   RowIndex(i))
                })
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let batches_count = if let BatchIterType::Row = self.iter_type {
            self.height.0
        } else {
            self.width.0
        };
        let remaining = batches_count - self.current_index;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for BatchIter {}
