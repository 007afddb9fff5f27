use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, CellState, CompassPrimary};
use crate::errors::*;
use crate::grid::MazeGrid;
use crate::units::SideLength;

/// Where carving starts. Always a path cell in a generated maze.
pub const START_CELL: Cartesian2DCoordinate = Cartesian2DCoordinate { x: 1, y: 1 };

/// Random samples tried when looking for an exit before falling back to
/// choosing from the enumerated path cells.
pub const EXIT_SAMPLE_ATTEMPTS: usize = 1024;

/// Carving jumps over the wall cell between two rooms.
const CARVE_STEP: u32 = 2;

/// Apply the recursive backtracker maze generation algorithm to a fresh, fully walled grid.
///
/// This is a randomised depth first search. From the cell on top of the stack we look at
/// the rooms two cells away in a random order and carve through the wall to the first one
/// that is still solid. When no such room exists we pop the stack and backtrack.
/// Every room is visited exactly once and only ever carved into from one other room, so the
/// result is a perfect maze: a spanning tree over the odd coordinate cells.
///
/// Fails with `InvalidConfiguration` if the side length is below the minimum carveable size.
pub fn recursive_backtracker<R: Rng>(side: SideLength, rng: &mut R) -> Result<MazeGrid> {

    let mut grid = MazeGrid::new(side)?;

    let _ = grid.set_cell(START_CELL, CellState::Path);
    let mut stack = vec![START_CELL];

    // Right, left, down, up. Reshuffled in place on every visit.
    let mut directions = [CompassPrimary::East,
                          CompassPrimary::West,
                          CompassPrimary::South,
                          CompassPrimary::North];
    let mut max_depth = stack.len();

    while let Some(&current) = stack.last() {

        directions.shuffle(rng);

        // Only move to one new cell at a time
        if let Some(neighbour) = first_carvable_neighbour(&grid, current, &directions) {
            let _ = grid.set_cell(current.midpoint(neighbour), CellState::Path);
            let _ = grid.set_cell(neighbour, CellState::Path);
            stack.push(neighbour);
            max_depth = max_depth.max(stack.len());
        } else {
            let _ = stack.pop();
        }
    }

    debug!("carved {:?} maze: {} path cells, max stack depth {}",
           side, grid.path_cells_count(), max_depth);
    Ok(grid)
}

/// Choose the exit cell for a maze, uniformly at random among its path cells.
///
/// Rejection samples the whole grid a bounded number of times. Should that budget run out,
/// the exit is picked from the enumerated path cells instead, which keeps the choice uniform.
/// Returns None only for a grid without any path cells.
pub fn pick_exit<R: Rng>(grid: &MazeGrid, rng: &mut R) -> Option<Cartesian2DCoordinate> {

    for _ in 0..EXIT_SAMPLE_ATTEMPTS {
        let coord = grid.random_cell(rng);
        if grid.is_path(coord) {
            return Some(coord);
        }
    }

    debug!("exit sampling exhausted {} attempts, choosing from path cells",
           EXIT_SAMPLE_ATTEMPTS);
    let path_cells = grid.iter_path_cells().collect::<Vec<_>>();
    path_cells.choose(rng).cloned()
}

fn first_carvable_neighbour(grid: &MazeGrid,
                            current: Cartesian2DCoordinate,
                            directions: &[CompassPrimary])
                            -> Option<Cartesian2DCoordinate> {
    directions.iter()
        .filter_map(|dir| current.offset(*dir, CARVE_STEP))
        .find(|neighbour| is_carvable(grid, *neighbour))
}

/// Strictly inside the border and not yet carved.
fn is_carvable(grid: &MazeGrid, coord: Cartesian2DCoordinate) -> bool {
    let SideLength(side) = grid.side_length();
    let inside = |n: u32| n > 0 && (n as usize) < side - 1;
    inside(coord.x) && inside(coord.y) && grid.is_wall(coord)
}

#[cfg(test)]
mod tests {

    use petgraph::algo::connected_components;
    use quickcheck::quickcheck;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::units::MazeSize;

    fn seeded(seed: u64) -> XorShiftRng {
        XorShiftRng::seed_from_u64(seed)
    }

    fn maze(rooms: usize, seed: u64) -> MazeGrid {
        recursive_backtracker(MazeSize(rooms).side_length(), &mut seeded(seed))
            .expect("valid maze size")
    }

    fn is_perfect_maze(grid: &MazeGrid) -> bool {
        let graph = grid.path_graph();
        grid.is_path(START_CELL) &&
        connected_components(&graph) == 1 &&
        graph.edge_count() + 1 == graph.node_count()
    }

    #[test]
    fn rejects_sides_below_three() {
        let mut rng = seeded(1);
        for side in 0..3 {
            match recursive_backtracker(SideLength(side), &mut rng) {
                Err(Error(ErrorKind::InvalidConfiguration(_), _)) => {}
                other => panic!("expected invalid configuration, got {:?}", other),
            }
        }
    }

    #[test]
    fn smallest_side_carves_only_the_start() {
        let grid = recursive_backtracker(SideLength(3), &mut seeded(1)).unwrap();
        assert_eq!(grid.path_cells_count(), 1);
        assert!(grid.is_path(START_CELL));
    }

    #[test]
    fn every_room_is_carved() {
        // n * n rooms plus the n * n - 1 walls knocked down between them.
        for rooms in 2..12 {
            let grid = maze(rooms, rooms as u64);
            assert_eq!(grid.path_cells_count(), 2 * rooms * rooms - 1);
            for coord in grid.iter().filter(|c| c.x % 2 == 1 && c.y % 2 == 1) {
                assert!(grid.is_path(coord), "room {:?} was never visited", coord);
            }
        }
    }

    #[test]
    fn generated_mazes_are_spanning_trees() {
        for seed in 0..20 {
            assert!(is_perfect_maze(&maze(10, seed)));
        }
        assert!(is_perfect_maze(&maze(50, 99)));
    }

    #[test]
    fn border_is_all_walls() {
        let grid = maze(8, 7);
        for coord in grid.iter().filter(|c| grid.is_border(*c)) {
            assert!(grid.is_wall(coord), "border cell {:?} was carved", coord);
        }
    }

    #[test]
    fn pillars_between_rooms_stay_solid() {
        // Pillars between rooms always stay solid, otherwise a cycle would exist.
        let grid = maze(9, 12);
        for coord in grid.iter().filter(|c| c.x % 2 == 0 && c.y % 2 == 0) {
            assert!(grid.is_wall(coord));
        }
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(maze(12, 42), maze(12, 42));
        assert_eq!(format!("{}", maze(5, 3)), format!("{}", maze(5, 3)));
    }

    #[test]
    fn different_seeds_usually_differ() {
        let distinct = (0..10).map(|seed| format!("{}", maze(10, seed)))
            .collect::<std::collections::HashSet<_>>();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn exit_is_never_a_wall() {
        let grid = maze(5, 8);
        let mut rng = seeded(8);
        for _ in 0..10_000 {
            let exit = pick_exit(&grid, &mut rng).expect("maze has path cells");
            assert!(grid.is_path(exit));
        }
    }

    #[test]
    fn exit_on_sparse_grid_falls_back_to_enumeration() {
        let mut grid = MazeGrid::new(SideLength(101)).unwrap();
        let only = Cartesian2DCoordinate::new(50, 50);
        grid.set_cell(only, CellState::Path);
        let mut rng = seeded(5);
        for _ in 0..5 {
            assert_eq!(pick_exit(&grid, &mut rng), Some(only));
        }
    }

    #[test]
    fn exit_on_solid_grid_is_none() {
        let grid = MazeGrid::new(SideLength(5)).unwrap();
        assert_eq!(pick_exit(&grid, &mut seeded(1)), None);
    }

    #[test]
    fn quickcheck_perfect_mazes() {
        fn p(rooms: u8, seed: u64) -> bool {
            let rooms = 2 + rooms as usize % 29;
            let grid = maze(rooms, seed);
            let border_solid = grid.iter()
                .filter(|c| grid.is_border(*c))
                .all(|c| grid.is_wall(c));
            border_solid && is_perfect_maze(&grid)
        }
        quickcheck(p as fn(u8, u64) -> bool)
    }
}
