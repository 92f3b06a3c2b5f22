use crate::cells::{Cartesian2DCoordinate, Cell};

/// Renders the contents of a grid cell as text.
/// The String should be 3 glyphs long, padded if required.
pub trait GridDisplay {
    fn render_cell_body(&self, _: Cartesian2DCoordinate) -> String {
        String::from("   ")
    }
}

/// Observes every change the generator makes to a cell - a state transition
/// or a wall removal. A presentation layer reacts to these without the core
/// depending on any rendering API.
pub trait CellObserver {
    fn cell_updated(&self, coord: Cartesian2DCoordinate, cell: &Cell);
}
