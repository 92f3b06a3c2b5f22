//! Randomised depth-first maze generation with backtracking, driven one step
//! at a time.
//!
//! The generator owns the grid while it runs. Each `step` call performs
//! exactly one mutation of the maze - carving a passage to a fresh cell or
//! backtracking from a dead end - so a caller can observe and pace the
//! generation however it likes. The core never sleeps or spawns threads;
//! aborting is simply dropping the generator, which leaves nothing dangling.

use std::error;
use std::fmt;

use rand::{Rng, SeedableRng, XorShiftRng};
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CellState, CompassPrimary};
use crate::grid::{Grid, GridError};
use crate::units::{Height, Width};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationStatus {
    NotStarted,
    Running,
    Completed,
}

/// What a single generation step did.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum StepOutcome {
    /// A passage was carved from `from` to the previously untouched `to`,
    /// which is now the current cell.
    Carved {
        from: Cartesian2DCoordinate,
        to: Cartesian2DCoordinate,
    },
    /// `from` was a dead end and was popped; `to` is the reactivated current cell.
    Backtracked {
        from: Cartesian2DCoordinate,
        to: Cartesian2DCoordinate,
    },
    /// The frontier emptied: generation is complete and the entrance and
    /// exit walls have been opened.
    Completed,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationError {
    /// `start`, `step` or `finalize` called outside the status that allows it.
    InvalidState {
        operation: &'static str,
        status: GenerationStatus,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GenerationError::InvalidState { operation, status } => {
                write!(f, "cannot {} while generation status is {:?}", operation, status)
            }
        }
    }
}

impl error::Error for GenerationError {
    fn description(&self) -> &str {
        "maze generation driven outside its state contract"
    }
}

/// The growing tree / recursive backtracker algorithm over a rectangular grid.
///
/// The frontier stack holds the depth-first path from the entrance to the
/// current cell; it is non-empty for exactly as long as the status is
/// `Running`. The entrance is the first cell in construction order `(0, 0)`
/// and the exit is fixed up front as the opposite corner
/// `(width-1, height-1)`, never derived from traversal order.
pub struct DepthFirstGenerator {
    grid: Grid,
    frontier: Vec<Cartesian2DCoordinate>,
    status: GenerationStatus,
    entrance: Cartesian2DCoordinate,
    exit: Cartesian2DCoordinate,
    rng: XorShiftRng,
}

impl DepthFirstGenerator {
    pub fn new(grid: Grid, rng: XorShiftRng) -> DepthFirstGenerator {
        let (Width(w), Height(h)) = (grid.width(), grid.height());
        DepthFirstGenerator {
            grid,
            frontier: Vec::with_capacity(w * h),
            status: GenerationStatus::NotStarted,
            entrance: Cartesian2DCoordinate::new(0, 0),
            exit: Cartesian2DCoordinate::new(w as u32 - 1, h as u32 - 1),
            rng,
        }
    }

    /// A generator whose neighbour picks replay identically for the same seed.
    pub fn from_seed(grid: Grid, seed: u32) -> DepthFirstGenerator {
        DepthFirstGenerator::new(grid, XorShiftRng::from_seed(expand_seed(seed)))
    }

    #[inline]
    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    #[inline]
    pub fn entrance(&self) -> Cartesian2DCoordinate {
        self.entrance
    }

    #[inline]
    pub fn exit(&self) -> Cartesian2DCoordinate {
        self.exit
    }

    /// The depth-first path from the entrance to the current cell.
    #[inline]
    pub fn frontier(&self) -> &[Cartesian2DCoordinate] {
        &self.frontier
    }

    /// Mark the entrance as the current cell and seed the frontier with it.
    pub fn start(&mut self) -> Result<(), GenerationError> {
        if self.status != GenerationStatus::NotStarted {
            return Err(GenerationError::InvalidState {
                operation: "start",
                status: self.status,
            });
        }

        self.grid.set_cell_state(self.entrance, CellState::Current);
        self.frontier.push(self.entrance);
        self.status = GenerationStatus::Running;
        Ok(())
    }

    /// Advance generation by exactly one mutation.
    ///
    /// Picks uniformly at random among the available neighbours of the cell
    /// on top of the frontier and carves a passage to it, or backtracks when
    /// there are none. The final backtrack empties the frontier, flips the
    /// status to `Completed` and opens the entrance and exit walls as part of
    /// the same transition.
    pub fn step(&mut self) -> Result<StepOutcome, GenerationError> {
        if self.status != GenerationStatus::Running {
            return Err(GenerationError::InvalidState {
                operation: "step",
                status: self.status,
            });
        }

        let last = *self.frontier.last().expect("frontier is non-empty while running");

        let available_directions: SmallVec<[CompassPrimary; 4]> = CompassPrimary::ALL
            .iter()
            .cloned()
            .filter(|&dir| {
                self.grid
                    .neighbour_at_direction(last, dir)
                    .map_or(false, |neighbour| self.grid.cell(neighbour).is_available())
            })
            .collect();

        if !available_directions.is_empty() {

            let direction = available_directions[self.rng.gen::<usize>() %
                                                 available_directions.len()];
            let to = self.grid
                .link(last, direction)
                .expect("an available neighbour is always linkable");

            self.frontier.push(to);
            self.grid.set_cell_state(last, CellState::Visited);
            self.grid.set_cell_state(to, CellState::Current);
            Ok(StepOutcome::Carved { from: last, to })

        } else {

            let popped = self.frontier.pop().expect("frontier is non-empty while running");
            self.grid.set_cell_state(popped, CellState::Visited);

            if let Some(&reactivated) = self.frontier.last() {
                // Re-flag the new stack top so an observer can highlight
                // where the retreat has reached.
                self.grid.set_cell_state(reactivated, CellState::Current);
                Ok(StepOutcome::Backtracked {
                    from: popped,
                    to: reactivated,
                })
            } else {
                self.status = GenerationStatus::Completed;
                self.open_endpoints();
                Ok(StepOutcome::Completed)
            }
        }
    }

    /// Open the entrance and exit boundary walls and mark both cells.
    ///
    /// This runs automatically as part of the transition to `Completed`;
    /// calling it again afterwards is allowed and changes nothing. Calling it
    /// before completion is a contract violation.
    pub fn finalize(&mut self) -> Result<(), GenerationError> {
        if self.status != GenerationStatus::Completed {
            return Err(GenerationError::InvalidState {
                operation: "finalize",
                status: self.status,
            });
        }
        self.open_endpoints();
        Ok(())
    }

    /// Drive the remaining steps back to back. A synchronous caller that does
    /// not care about observing individual steps uses this; anything pacing
    /// the generation calls `step` itself.
    pub fn run_to_completion(&mut self) -> Result<(), GenerationError> {
        if self.status == GenerationStatus::NotStarted {
            self.start()?;
        }
        while self.status == GenerationStatus::Running {
            self.step()?;
        }
        Ok(())
    }

    fn open_endpoints(&mut self) {
        // The entrance is on the west edge and the exit on the east edge by
        // the corner choices made at construction.
        self.grid
            .remove_boundary_wall(self.entrance, CompassPrimary::West)
            .expect("entrance west wall is on the grid boundary");
        self.grid
            .remove_boundary_wall(self.exit, CompassPrimary::East)
            .expect("exit east wall is on the grid boundary");
        self.grid.set_cell_state(self.entrance, CellState::Endpoint);
        self.grid.set_cell_state(self.exit, CellState::Endpoint);
    }
}

impl fmt::Debug for DepthFirstGenerator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "DepthFirstGenerator :: status: {:?}, frontier depth: {:?}, grid: {:?}",
               self.status,
               self.frontier.len(),
               self.grid)
    }
}

/// Build a grid and run the whole generation for it with a fixed seed.
pub fn generate(width: Width, height: Height, seed: u32) -> Result<Grid, GridError> {
    let grid = Grid::new(width, height)?;
    let mut generator = DepthFirstGenerator::from_seed(grid, seed);
    generator.run_to_completion().expect("a fresh generator always runs to completion");
    Ok(generator.into_grid())
}

fn expand_seed(seed: u32) -> [u32; 4] {
    // The xorshift seed must not be all zeroes; the last word is a constant.
    [seed,
     seed.wrapping_mul(0x85eb_ca6b),
     seed.rotate_left(13) ^ 0xc2b2_ae35,
     0x9e37_79b9]
}
