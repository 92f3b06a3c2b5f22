//! Breadth-first flood distances over the open passages of a maze.
//!
//! Distances serve two callers: text rendering of how far each cell lies
//! from the entrance, and the tests that prove a generated maze spans the
//! whole grid. `solution_path` walks the distance gradient from an end cell
//! back to the start.

use itertools::Itertools;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::Grid;
use crate::grid_traits::GridDisplay;
use crate::units::NodesCount;
use crate::utils::{self, FnvHashMap};

#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood the grid from a start coordinate, one passage step at a time.
    /// Returns None for a start coordinate outside the grid.
    ///
    /// Every passage costs one step, so the first time a cell is reached is
    /// also its final distance - the distances map doubles as the visited set.
    pub fn new(grid: &Grid, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let NodesCount(cells_count) = grid.size();
        let mut distances = utils::fnv_hashmap(cells_count);
        distances.insert(start_coordinate, 0);
        let mut max = 0;

        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in &*grid.links(*cell_coord) {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// How many cells the flood reached, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if let Some(d) = self.distances.get(&coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

/// The path from `end_point` back down the distance gradient to the start of
/// `distances_from_start`, returned start first. None when the end point is
/// not reachable from the start.
pub fn solution_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: Cartesian2DCoordinate)
                     -> Option<Vec<Cartesian2DCoordinate>> {

    if distances_from_start.distance_from_start_to(end_point).is_none() {
        return None;
    }

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let current_distance = distances_from_start.distance_from_start_to(current_coord)
            .expect("every cell on the path is reachable");

        let closer_neighbour = grid.links(current_coord)
            .iter()
            .map(|&link_coord| {
                (link_coord,
                 distances_from_start.distance_from_start_to(link_coord)
                     .expect("linked cells share a connected component"))
            })
            .fold1(|closest, candidate| if candidate.1 < closest.1 {
                candidate
            } else {
                closest
            });

        match closer_neighbour {
            Some((coord, distance)) if distance < current_distance => {
                current_coord = coord;
                path.push(current_coord);
            }
            // No neighbour closer to the start - broken input data.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {

    use std::u32;

    use super::*;
    use crate::cells::CompassPrimary;
    use crate::generators::generate;
    use crate::units::{Height, Width};

    static OUT_OF_GRID_COORDINATE: Cartesian2DCoordinate = Cartesian2DCoordinate {
        x: u32::MAX,
        y: u32::MAX,
    };

    fn carved_two_by_two() -> Grid {
        // (0,0) - (1,0)
        //   |
        // (0,1) - (1,1)
        let mut g = Grid::new(Width(2), Height(2)).expect("grid dimensions are invalid");
        g.link(Cartesian2DCoordinate::new(0, 0), CompassPrimary::East).expect("link failed");
        g.link(Cartesian2DCoordinate::new(0, 0), CompassPrimary::South).expect("link failed");
        g.link(Cartesian2DCoordinate::new(0, 1), CompassPrimary::East).expect("link failed");
        g
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let g = Grid::new(Width(3), Height(3)).expect("grid dimensions are invalid");
        assert!(Distances::new(&g, OUT_OF_GRID_COORDINATE).is_none());
    }

    #[test]
    fn distances_on_fresh_grid_reach_only_the_start() {
        let g = Grid::new(Width(3), Height(3)).expect("grid dimensions are invalid");
        let start = Cartesian2DCoordinate::new(0, 0);
        let distances = Distances::new(&g, start).expect("start coordinate is invalid");

        assert_eq!(distances.reachable_count(), 1);
        assert_eq!(distances.distance_from_start_to(start), Some(0));
        assert_eq!(distances.distance_from_start_to(Cartesian2DCoordinate::new(1, 0)), None);
    }

    #[test]
    fn distances_follow_passages() {
        let g = carved_two_by_two();
        let distances = Distances::new(&g, Cartesian2DCoordinate::new(0, 0))
            .expect("start coordinate is invalid");

        assert_eq!(distances.distance_from_start_to(Cartesian2DCoordinate::new(0, 0)), Some(0));
        assert_eq!(distances.distance_from_start_to(Cartesian2DCoordinate::new(1, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(Cartesian2DCoordinate::new(0, 1)), Some(1));
        assert_eq!(distances.distance_from_start_to(Cartesian2DCoordinate::new(1, 1)), Some(2));
        assert_eq!(distances.max(), 2);
        assert_eq!(distances.reachable_count(), 4);
    }

    #[test]
    fn solution_path_ends_where_asked() {
        let g = carved_two_by_two();
        let start = Cartesian2DCoordinate::new(0, 0);
        let end = Cartesian2DCoordinate::new(1, 1);
        let distances = Distances::new(&g, start).expect("start coordinate is invalid");

        let path = solution_path(&g, &distances, end).expect("no path found");
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn solution_path_steps_through_linked_cells() {
        let g = generate(Width(9), Height(7), 31).expect("generation failed");
        let entrance = Cartesian2DCoordinate::new(0, 0);
        let exit = Cartesian2DCoordinate::new(8, 6);
        let distances = Distances::new(&g, entrance).expect("start coordinate is invalid");

        let path = solution_path(&g, &distances, exit).expect("a perfect maze connects all cells");
        for pair in path.windows(2) {
            assert!(g.links(pair[0]).iter().any(|&c| c == pair[1]),
                    "path steps between unlinked cells {:?} and {:?}",
                    pair[0],
                    pair[1]);
        }
    }

    #[test]
    fn no_path_to_unreachable_cell() {
        let g = Grid::new(Width(2), Height(1)).expect("grid dimensions are invalid");
        let distances = Distances::new(&g, Cartesian2DCoordinate::new(0, 0))
            .expect("start coordinate is invalid");
        assert!(solution_path(&g, &distances, Cartesian2DCoordinate::new(1, 0)).is_none());
    }
}
