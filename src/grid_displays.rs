//! Text rendering of a grid and the pluggable cell-body displays.
//!
//! The walls are drawn from each cell's own wall slots, so a partially
//! generated maze and the opened entrance/exit boundary walls render exactly
//! as they are. The 3-glyph cell body defaults to a marker for the cell's
//! generation state and can be replaced via `Grid::set_grid_display`.

use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CellState, CompassPrimary};
use crate::grid::Grid;
use crate::grid_traits::GridDisplay;
use crate::utils::{self, FnvHashSet};

fn state_body(state: CellState) -> &'static str {
    match state {
        CellState::Available => "   ",
        CellState::Current => " @ ",
        CellState::Visited => " . ",
        CellState::Endpoint => " * ",
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_CORNER: &str = "+";
        const WALL_HORIZONTAL: &str = "---";
        const WALL_VERTICAL: &str = "|";
        const OPEN_HORIZONTAL: &str = "   ";
        const OPEN_VERTICAL: &str = " ";

        let mut output = String::new();

        let render_horizontal_walls = |rendering: &mut String,
                                       coords: &[Cartesian2DCoordinate],
                                       side: CompassPrimary| {
            rendering.push_str(WALL_CORNER);
            for &coord in coords {
                if self.cell(coord).is_wall_present(side) {
                    rendering.push_str(WALL_HORIZONTAL);
                } else {
                    rendering.push_str(OPEN_HORIZONTAL);
                }
                rendering.push_str(WALL_CORNER);
            }
            rendering.push('\n');
        };

        for (index_row, row) in self.iter_row().enumerate() {

            // Each row draws its own northern boundary only on the first row;
            // afterwards the southern wall line of the row above serves.
            if index_row == 0 {
                render_horizontal_walls(&mut output, &row, CompassPrimary::North);
            }

            let mut middle_section = String::new();
            for (index_column, &coord) in row.iter().enumerate() {
                if index_column == 0 {
                    middle_section.push_str(if self.cell(coord)
                        .is_wall_present(CompassPrimary::West) {
                        WALL_VERTICAL
                    } else {
                        OPEN_VERTICAL
                    });
                }

                if let Some(ref displayer) = *self.grid_display() {
                    middle_section.push_str(displayer.render_cell_body(coord).as_str());
                } else {
                    middle_section.push_str(state_body(self.cell(coord).state()));
                }

                middle_section.push_str(if self.cell(coord).is_wall_present(CompassPrimary::East) {
                    WALL_VERTICAL
                } else {
                    OPEN_VERTICAL
                });
            }
            output.push_str(&middle_section);
            output.push('\n');

            render_horizontal_walls(&mut output, &row, CompassPrimary::South);
        }

        write!(f, "{}", output)
    }
}

/// Marks the entrance with `S` and the exit with `E`.
#[derive(Debug, Copy, Clone)]
pub struct StartEndPointsDisplay {
    entrance: Cartesian2DCoordinate,
    exit: Cartesian2DCoordinate,
}

impl StartEndPointsDisplay {
    pub fn new(entrance: Cartesian2DCoordinate, exit: Cartesian2DCoordinate) -> StartEndPointsDisplay {
        StartEndPointsDisplay { entrance, exit }
    }
}

impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if coord == self.entrance {
            String::from(" S ")
        } else if coord == self.exit {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// Marks every cell on a path with a dot.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> PathDisplay {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[cfg(test)]
mod tests {

    use std::rc::Rc;

    use super::*;
    use crate::generators::generate;
    use crate::grid::Grid;
    use crate::units::{Height, Width};

    #[test]
    fn fully_walled_single_cell() {
        let g = Grid::new(Width(1), Height(1)).expect("grid dimensions are invalid");
        assert_eq!(format!("{}", g), "+---+\n|   |\n+---+\n");
    }

    #[test]
    fn fully_walled_two_by_one() {
        let g = Grid::new(Width(2), Height(1)).expect("grid dimensions are invalid");
        assert_eq!(format!("{}", g), "+---+---+\n|   |   |\n+---+---+\n");
    }

    #[test]
    fn carved_passage_renders_open() {
        let mut g = Grid::new(Width(2), Height(1)).expect("grid dimensions are invalid");
        g.link(Cartesian2DCoordinate::new(0, 0), CompassPrimary::East).expect("link failed");
        // States changed by linking are not set here, so bodies stay blank.
        assert_eq!(format!("{}", g), "+---+---+\n|       |\n+---+---+\n");
    }

    #[test]
    fn generated_single_cell_shows_open_sides_and_endpoint() {
        let g = generate(Width(1), Height(1), 5).expect("generation failed");
        assert_eq!(format!("{}", g), "+---+\n  *  \n+---+\n");
    }

    #[test]
    fn start_end_display_marks_cells() {
        let mut g = generate(Width(3), Height(3), 77).expect("generation failed");
        let entrance = Cartesian2DCoordinate::new(0, 0);
        let exit = Cartesian2DCoordinate::new(2, 2);
        g.set_grid_display(Some(Rc::new(StartEndPointsDisplay::new(entrance, exit)) as
                                Rc<dyn GridDisplay>));

        let rendering = format!("{}", g);
        assert!(rendering.contains(" S "));
        assert!(rendering.contains(" E "));
    }

    #[test]
    fn path_display_dots_path_cells_only() {
        let display = PathDisplay::new(&[Cartesian2DCoordinate::new(0, 0),
                                         Cartesian2DCoordinate::new(1, 0)]);
        assert_eq!(display.render_cell_body(Cartesian2DCoordinate::new(0, 0)), " . ");
        assert_eq!(display.render_cell_body(Cartesian2DCoordinate::new(1, 1)), "   ");
    }
}
