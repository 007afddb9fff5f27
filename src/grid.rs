use std::fmt;
use std::rc::Rc;

use bit_set::BitSet;
use log::trace;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CellState, CompassPrimary};
use crate::errors::*;
use crate::grid_iterators::{RectGridCellIter, RectRowIter};
use crate::grid_traits::GridDisplay;
use crate::units::SideLength;
use crate::utils;

/// Smallest side length that leaves room for one carved cell inside the border.
pub const MIN_SIDE_LENGTH: usize = 3;

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// Undirected graph of walkable cells, an edge per pair of adjacent path cells.
pub type PathGraph = Graph<Cartesian2DCoordinate, (), Undirected, u32>;

/// A square maze grid where every cell is either a wall or a path.
///
/// Cells are walls unless their row major index is in the `paths` bit set.
#[derive(Clone)]
pub struct MazeGrid {
    side: SideLength,
    paths: BitSet,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

impl fmt::Debug for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGrid :: side: {:?}, path cells: {:?}",
               self.side, self.path_cells_count())
    }
}

impl PartialEq for MazeGrid {
    fn eq(&self, other: &MazeGrid) -> bool {
        self.side == other.side && self.paths == other.paths
    }
}
impl Eq for MazeGrid {}

impl MazeGrid {
    /// A grid of the given side length with every cell a wall.
    ///
    /// Fails with `InvalidConfiguration` if no cell could ever be carved.
    pub fn new(side: SideLength) -> Result<MazeGrid> {
        let SideLength(length) = side;
        if length < MIN_SIDE_LENGTH {
            return Err(ErrorKind::InvalidConfiguration(
                format!("maze side length {} is below the minimum of {}", length, MIN_SIDE_LENGTH))
                .into());
        }

        Ok(MazeGrid {
            side,
            paths: BitSet::with_capacity(length * length),
            grid_display: None,
        })
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn side_length(&self) -> SideLength {
        self.side
    }

    /// Total number of cells, walls included.
    #[inline]
    pub fn size(&self) -> usize {
        self.side.0 * self.side.0
    }

    #[inline]
    pub fn path_cells_count(&self) -> usize {
        self.paths.len()
    }

    /// Is the grid coordinate within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.side.0 && (coord.y as usize) < self.side.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.side.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// Cells outside the grid have no state.
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<CellState> {
        self.grid_coordinate_to_index(coord).map(|index| {
            if self.paths.contains(index) {
                CellState::Path
            } else {
                CellState::Wall
            }
        })
    }

    #[inline]
    pub fn is_path(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell(coord) == Some(CellState::Path)
    }

    #[inline]
    pub fn is_wall(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell(coord) == Some(CellState::Wall)
    }

    /// Is the coordinate on the outermost ring of cells.
    pub fn is_border(&self, coord: Cartesian2DCoordinate) -> bool {
        let last = self.side.0 as u32 - 1;
        self.is_valid_coordinate(coord) &&
        (coord.x == 0 || coord.y == 0 || coord.x == last || coord.y == last)
    }

    /// Set the state of a cell.
    /// Returns false if the coordinate is outside the grid.
    pub fn set_cell(&mut self, coord: Cartesian2DCoordinate, state: CellState) -> bool {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => {
                match state {
                    CellState::Path => {
                        let _ = self.paths.insert(index);
                    }
                    CellState::Wall => {
                        let _ = self.paths.remove(index);
                    }
                }
                trace!("cell {:?} set to {:?}", coord, state);
                true
            }
            None => false,
        }
    }

    /// Uniformly random cell from anywhere in the grid, walls included.
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cartesian2DCoordinate {
        let index = rng.gen_range(0..self.size());
        Cartesian2DCoordinate::from_row_major_index(index, self.side)
    }

    /// Path cells one step away to the North, South, East or West.
    pub fn path_neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| coord.offset(*dir, 1))
            .filter(|neighbour| self.is_path(*neighbour))
            .collect()
    }

    #[inline]
    pub fn iter(&self) -> RectGridCellIter {
        RectGridCellIter::new(self.side)
    }

    #[inline]
    pub fn iter_row(&self) -> RectRowIter {
        RectRowIter::new(self.side)
    }

    pub fn iter_path_cells<'a>(&'a self) -> impl Iterator<Item = Cartesian2DCoordinate> + 'a {
        let side = self.side;
        self.paths
            .iter()
            .map(move |index| Cartesian2DCoordinate::from_row_major_index(index, side))
    }

    /// Build the graph of walkable cells.
    ///
    /// Edges are only added towards the East and South so each adjacency appears once.
    pub fn path_graph(&self) -> PathGraph {
        let cells_count = self.path_cells_count();
        let mut graph = PathGraph::with_capacity(cells_count, cells_count * 2);
        let mut node_indices = utils::fnv_hashmap::<Cartesian2DCoordinate, NodeIndex<u32>>(cells_count);

        for coord in self.iter_path_cells() {
            let node = graph.add_node(coord);
            let _ = node_indices.insert(coord, node);
        }

        for coord in self.iter_path_cells() {
            for dir in &[CompassPrimary::East, CompassPrimary::South] {
                let neighbour = coord.offset(*dir, 1)
                    .and_then(|neighbour| node_indices.get(&neighbour).cloned());
                if let Some(neighbour_node) = neighbour {
                    let _ = graph.add_edge(node_indices[&coord], neighbour_node, ());
                }
            }
        }

        graph
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const WALL_GLYPHS: &str = "##";
        let default_body = String::from("  ");

        for row in self.iter_row() {
            for coord in row {
                if self.is_path(coord) {
                    let body = self.grid_display
                        .as_ref()
                        .map(|display| display.render_cell_body(coord))
                        .unwrap_or_else(|| default_body.clone());
                    f.write_str(&body)?;
                } else {
                    f.write_str(WALL_GLYPHS)?;
                }
            }
            f.write_str("\n")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use petgraph::algo::connected_components;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;
    use std::u32;

    use super::*;

    fn walled(side: usize) -> MazeGrid {
        MazeGrid::new(SideLength(side)).expect("side length is large enough")
    }

    #[test]
    fn too_small_side_length_is_invalid_configuration() {
        for side in 0..MIN_SIDE_LENGTH {
            match MazeGrid::new(SideLength(side)) {
                Err(Error(ErrorKind::InvalidConfiguration(_), _)) => {}
                other => panic!("expected invalid configuration, got {:?}", other),
            }
        }
        assert!(MazeGrid::new(SideLength(MIN_SIDE_LENGTH)).is_ok());
    }

    #[test]
    fn new_grid_is_all_walls() {
        let g = walled(5);
        assert_eq!(g.size(), 25);
        assert_eq!(g.path_cells_count(), 0);
        assert!(g.iter().all(|coord| g.is_wall(coord)));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = walled(3);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let coords = &[gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1), gc(0, 2),
                       gc(1, 2), gc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| g.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn setting_cells() {
        let mut g = walled(5);
        let a = Cartesian2DCoordinate::new(1, 1);
        assert!(g.set_cell(a, CellState::Path));
        assert_eq!(g.cell(a), Some(CellState::Path));
        assert_eq!(g.path_cells_count(), 1);

        assert!(g.set_cell(a, CellState::Wall));
        assert_eq!(g.cell(a), Some(CellState::Wall));
        assert_eq!(g.path_cells_count(), 0);

        let outside = Cartesian2DCoordinate::new(5, 0);
        assert!(!g.set_cell(outside, CellState::Path));
        assert_eq!(g.cell(outside), None);
        assert!(!g.is_wall(outside));
        assert!(!g.is_path(outside));
    }

    #[test]
    fn border_cells() {
        let g = walled(5);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert!(g.is_border(gc(0, 0)));
        assert!(g.is_border(gc(4, 2)));
        assert!(g.is_border(gc(2, 4)));
        assert!(!g.is_border(gc(1, 1)));
        assert!(!g.is_border(gc(3, 3)));
        assert!(!g.is_border(gc(5, 5)));
    }

    #[test]
    fn path_neighbours_only_lists_carved_cells() {
        let mut g = walled(5);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        for coord in &[gc(1, 1), gc(2, 1), gc(3, 1), gc(1, 2)] {
            g.set_cell(*coord, CellState::Path);
        }
        let neighbours = g.path_neighbours(gc(1, 1)).iter().cloned().sorted().collect::<Vec<_>>();
        assert_eq!(neighbours, vec![gc(1, 2), gc(2, 1)]);
        assert_eq!(&*g.path_neighbours(gc(3, 1)), &[gc(2, 1)]);
    }

    #[test]
    fn random_cell_stays_in_grid() {
        let g = walled(7);
        let mut rng = XorShiftRng::seed_from_u64(3);
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng);
            assert!(g.is_valid_coordinate(coord));
        }
    }

    #[test]
    fn path_graph_of_l_shaped_corridor() {
        let mut g = walled(5);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        for coord in &[gc(1, 1), gc(2, 1), gc(3, 1), gc(3, 2), gc(3, 3)] {
            g.set_cell(*coord, CellState::Path);
        }
        let graph = g.path_graph();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(connected_components(&graph), 1);
    }

    #[test]
    fn equality_ignores_displays() {
        let mut a = walled(5);
        let b = walled(5);
        a.set_grid_display(Some(Rc::new(BlankDisplay) as Rc<dyn GridDisplay>));
        assert_eq!(a, b);
    }

    struct BlankDisplay;
    impl GridDisplay for BlankDisplay {}

    #[test]
    fn text_rendering() {
        let mut g = walled(3);
        g.set_cell(Cartesian2DCoordinate::new(1, 1), CellState::Path);
        assert_eq!(format!("{}", g), "######\n##  ##\n######\n");
    }
}
