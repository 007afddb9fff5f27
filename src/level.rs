//! Levels stacked on top of each other, each holding one maze and its exit.

use glam::Vec3;
use log::{debug, info};
use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, CellState};
use crate::errors::*;
use crate::generators;
use crate::geometry::{self, Collidable, EntityKind};
use crate::grid::MazeGrid;
use crate::units::{LevelIndex, LevelsCount, MazeSize, SideLength};

/// Vertical distance between two consecutive levels.
pub const DEFAULT_LEVEL_SPACING: f32 = 5.0;

/// The goal of a level. Not collidable; reaching it is checked by distance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ExitMarker {
    pub kind: EntityKind,
    pub cell: Cartesian2DCoordinate,
    pub position: Vec3,
}

impl ExitMarker {
    pub fn new(cell: Cartesian2DCoordinate, y_offset: f32) -> ExitMarker {
        ExitMarker {
            kind: EntityKind::Exit,
            cell,
            position: geometry::cell_center(cell, y_offset + geometry::EXIT_MARKER_HEIGHT_OFFSET),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Level {
    pub index: LevelIndex,
    pub y_offset: f32,
    pub grid: MazeGrid,
    pub collidables: Vec<Collidable>,
    pub exit: ExitMarker,
}

/// Generate one level: carve its maze, choose the exit and build its boxes.
pub fn generate_level<R: Rng>(index: LevelIndex,
                              side: SideLength,
                              level_spacing: f32,
                              rng: &mut R)
                              -> Result<Level> {

    let grid = generators::recursive_backtracker(side, rng)?;
    let exit_cell = generators::pick_exit(&grid, rng).ok_or(ErrorKind::NoPathCells)?;
    let y_offset = index.0 as f32 * level_spacing;
    let collidables = build_collidables(&grid, y_offset, exit_cell);

    debug!("level {} at height {}: exit {:?}, {} collidables",
           index.0, y_offset, exit_cell, collidables.len());

    Ok(Level {
        index,
        y_offset,
        grid,
        collidables,
        exit: ExitMarker::new(exit_cell, y_offset),
    })
}

/// A wall block for every wall cell and a floor slab for every path cell except the exit,
/// which is left open.
pub fn build_collidables(grid: &MazeGrid, y_offset: f32, exit_cell: Cartesian2DCoordinate) -> Vec<Collidable> {
    grid.iter()
        .filter_map(|coord| match grid.cell(coord) {
            Some(CellState::Wall) => Some(Collidable::wall(coord, y_offset)),
            Some(CellState::Path) if coord != exit_cell => Some(Collidable::floor(coord, y_offset)),
            _ => None,
        })
        .collect()
}

/// Every level of a maze session and the flattened boxes of all of them.
#[derive(Debug, Clone)]
pub struct World {
    maze_size: MazeSize,
    level_spacing: f32,
    levels: Vec<Level>,
    collidables: Vec<Collidable>,
}

impl World {
    /// Generate `levels` independent mazes, level 0 at the bottom.
    pub fn generate<R: Rng>(maze_size: MazeSize,
                            levels: LevelsCount,
                            level_spacing: f32,
                            rng: &mut R)
                            -> Result<World> {

        let side = maze_size.side_length();
        let levels = (0..levels.0)
            .map(|index| generate_level(LevelIndex(index), side, level_spacing, rng))
            .collect::<Result<Vec<_>>>()?;

        let collidables = levels.iter()
            .flat_map(|level| level.collidables.iter().cloned())
            .collect::<Vec<_>>();

        info!("generated {} levels of {:?} ({} cells a side), {} collidables",
              levels.len(), maze_size, side.0, collidables.len());

        Ok(World {
            maze_size,
            level_spacing,
            levels,
            collidables,
        })
    }

    #[inline]
    pub fn maze_size(&self) -> MazeSize {
        self.maze_size
    }

    #[inline]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    #[inline]
    pub fn collidables(&self) -> &[Collidable] {
        &self.collidables
    }

    pub fn exits<'a>(&'a self) -> impl Iterator<Item = &'a ExitMarker> + 'a {
        self.levels.iter().map(|level| &level.exit)
    }

    /// Height of the highest level's floor.
    pub fn top_level_offset(&self) -> f32 {
        self.levels.len().saturating_sub(1) as f32 * self.level_spacing
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;

    fn rng() -> XorShiftRng {
        XorShiftRng::seed_from_u64(17)
    }

    #[test]
    fn level_offset_follows_index() {
        let level = generate_level(LevelIndex(3), SideLength(11), DEFAULT_LEVEL_SPACING, &mut rng()).unwrap();
        assert_eq!(level.y_offset, 15.0);
        assert_eq!(level.index, LevelIndex(3));
    }

    #[test]
    fn exit_is_a_path_cell_tagged_as_exit() {
        let level = generate_level(LevelIndex(0), SideLength(11), DEFAULT_LEVEL_SPACING, &mut rng()).unwrap();
        assert!(level.grid.is_path(level.exit.cell));
        assert_eq!(level.exit.kind, EntityKind::Exit);
        let expected = Vec3::new(level.exit.cell.x as f32, 0.05, level.exit.cell.y as f32);
        assert!((level.exit.position - expected).length() < 1e-6);
    }

    #[test]
    fn one_box_per_cell_except_the_exit() {
        let level = generate_level(LevelIndex(1), SideLength(9), DEFAULT_LEVEL_SPACING, &mut rng()).unwrap();
        let grid = &level.grid;
        assert_eq!(level.collidables.len(), grid.size() - 1);

        let walls = level.collidables.iter().filter(|c| c.kind == EntityKind::Wall).count();
        let floors = level.collidables.iter().filter(|c| c.kind == EntityKind::Floor).count();
        assert_eq!(walls, grid.size() - grid.path_cells_count());
        assert_eq!(floors, grid.path_cells_count() - 1);

        let exit_center = geometry::cell_center(level.exit.cell, level.y_offset);
        let floor_under_exit = level.collidables.iter().any(|c| {
            c.kind == EntityKind::Floor &&
            c.bounds.center().x == exit_center.x &&
            c.bounds.center().z == exit_center.z
        });
        assert!(!floor_under_exit);
    }

    #[test]
    fn level_generation_propagates_invalid_sizes() {
        match generate_level(LevelIndex(0), SideLength(1), DEFAULT_LEVEL_SPACING, &mut rng()) {
            Err(Error(ErrorKind::InvalidConfiguration(_), _)) => {}
            other => panic!("expected invalid configuration, got {:?}", other),
        }
    }

    #[test]
    fn world_stacks_levels() {
        let world = World::generate(MazeSize(4), LevelsCount(3), DEFAULT_LEVEL_SPACING, &mut rng()).unwrap();
        assert_eq!(world.levels().len(), 3);
        assert_eq!(world.exits().count(), 3);
        assert_eq!(world.top_level_offset(), 10.0);
        let per_level = world.levels()[0].collidables.len();
        assert_eq!(world.collidables().len(), 3 * per_level);
        for (index, level) in world.levels().iter().enumerate() {
            assert_eq!(level.index, LevelIndex(index));
            assert_eq!(level.grid.side_length(), SideLength(9));
        }
    }

    #[test]
    fn world_with_no_levels_is_empty() {
        let world = World::generate(MazeSize(5), LevelsCount(0), DEFAULT_LEVEL_SPACING, &mut rng()).unwrap();
        assert!(world.collidables().is_empty());
        assert_eq!(world.top_level_offset(), 0.0);
    }

    #[test]
    fn same_seed_same_world() {
        let a = World::generate(MazeSize(6), LevelsCount(2), DEFAULT_LEVEL_SPACING, &mut rng()).unwrap();
        let b = World::generate(MazeSize(6), LevelsCount(2), DEFAULT_LEVEL_SPACING, &mut rng()).unwrap();
        assert_eq!(a.collidables(), b.collidables());
        for (la, lb) in a.levels().iter().zip(b.levels()) {
            assert_eq!(la.grid, lb.grid);
            assert_eq!(la.exit, lb.exit);
        }
    }
}
