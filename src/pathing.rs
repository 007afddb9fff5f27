use std::fmt::{Debug, Display, LowerHex};
use std::ops::Add;

use num::traits::{Bounded, One, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::MazeGrid;
use crate::grid_traits::GridDisplay;
use crate::utils;
use crate::utils::{FnvHashMap, FnvHashSet};


// Trait (hack) used purely as a generic type parameter alias because it looks ugly to type this out each time
// Note generic parameter type aliases are not in the langauge.
// `type X = Y;` only works with concrete types.
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord
    {
}
impl<T: Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord> MaxDistance for T {}


/// Walking distance from one path cell to every path cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT> Distances<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    /// Flood fill outwards from `start_coordinate` through adjacent path cells.
    ///
    /// Returns None if the start is not a path cell of the grid.
    pub fn new(grid: &MazeGrid, start_coordinate: Cartesian2DCoordinate) -> Option<Distances<MaxDistanceT>> {

        if !grid.is_path(start_coordinate) {
            return None;
        }

        let mut max = Zero::zero();
        let mut distances = utils::fnv_hashmap(grid.path_cells_count());
        distances.insert(start_coordinate, Zero::zero());

        // Every step costs the same so the first time a cell is reached is along its shortest route.
        // The distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell: MaxDistanceT = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for neighbour in grid.path_neighbours(*cell_coord).iter() {
                    if !distances.contains_key(neighbour) {
                        distances.insert(*neighbour, distance_to_cell + One::one());
                        new_frontier.push(*neighbour);
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

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    /// How many cells, the start included, can be walked to.
    #[inline(always)]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect()
    }
}

impl<MaxDistanceT: MaxDistance> GridDisplay for Distances<MaxDistanceT> {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if let Some(d) = self.distances.get(&coord) {
            // right align, padding 2, lowercase hexadecimal
            format!("{:>2x}", d)
        } else {
            String::from("  ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: SmallVec<[Cartesian2DCoordinate; 4]>,
    end_coordinates: SmallVec<[Cartesian2DCoordinate; 4]>,
}
impl StartEndPointsDisplay {
    pub fn new(starts: &[Cartesian2DCoordinate], ends: &[Cartesian2DCoordinate]) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts.iter().cloned().collect(),
            end_coordinates: ends.iter().cloned().collect(),
        }
    }

    fn marker(&self, coord: Cartesian2DCoordinate) -> Option<&'static str> {
        if self.start_coordinates.contains(&coord) {
            Some("S ")
        } else if self.end_coordinates.contains(&coord) {
            Some("E ")
        } else {
            None
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        String::from(self.marker(coord).unwrap_or("  "))
    }
}

/// Marks a route through the maze, keeping any start and end markers on top.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
    end_points: StartEndPointsDisplay,
}
impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        let starts = path.first().into_iter().cloned().collect::<Vec<_>>();
        let ends = path.last().into_iter().cloned().collect::<Vec<_>>();
        PathDisplay {
            on_path_coordinates,
            end_points: StartEndPointsDisplay::new(&starts, &ends),
        }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if let Some(marker) = self.end_points.marker(coord) {
            String::from(marker)
        } else if self.on_path_coordinates.contains(&coord) {
            String::from(". ")
        } else {
            String::from("  ")
        }
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to the
/// neighbour closest to the start.
/// Returns the route start first, or None if the end is not reachable.
pub fn shortest_path<MaxDistanceT>(grid: &MazeGrid,
                                   distances_from_start: &Distances<MaxDistanceT>,
                                   end_point: Cartesian2DCoordinate)
                                   -> Option<Vec<Cartesian2DCoordinate>>
    where MaxDistanceT: MaxDistance
{
    // The end point is not reachable from start.
    distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let current_distance_to_start = distances_from_start.distance_from_start_to(current_coord)?;

        let closest_to_start = grid.path_neighbours(current_coord)
            .iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(*coord).map(|d| (*coord, d))
            })
            .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance_to_start => {
                current_coord = closer_coord;
                path.push(current_coord);
            }
            // No neighbour gets us any closer, the grid changed since the distances were taken.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}
