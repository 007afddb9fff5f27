//! Axis aligned boxes and the collidable geometry derived from maze cells.

use glam::Vec3;

use crate::cells::Cartesian2DCoordinate;

/// Wall blocks are unit cubes.
pub const WALL_SIZE: Vec3 = Vec3::ONE;
/// Wall blocks sit on top of the floor slabs.
pub const WALL_HEIGHT_OFFSET: f32 = 0.55;
pub const FLOOR_SIZE: Vec3 = Vec3::new(1.0, 0.1, 1.0);
pub const FLOOR_HEIGHT_OFFSET: f32 = 0.0;
pub const EXIT_MARKER_HEIGHT_OFFSET: f32 = 0.05;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Aabb {
        Aabb { min, max }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Aabb {
        Aabb::from_center_half_extents(center, size * 0.5)
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Aabb {
        Aabb {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Boxes overlap when their closed intervals overlap on all three axes.
    /// Touching faces count as an overlap.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.max.x < self.min.x || other.min.x > self.max.x ||
          other.max.y < self.min.y || other.min.y > self.max.y ||
          other.max.z < self.min.z || other.min.z > self.max.z)
    }
}

/// Gameplay role of a box in the world.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EntityKind {
    Wall,
    Floor,
    Exit,
}

/// A solid box the player cannot move into.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Collidable {
    pub kind: EntityKind,
    pub bounds: Aabb,
}

impl Collidable {
    /// Full height block standing on the cell.
    pub fn wall(cell: Cartesian2DCoordinate, y_offset: f32) -> Collidable {
        Collidable {
            kind: EntityKind::Wall,
            bounds: Aabb::from_center_size(cell_center(cell, y_offset + WALL_HEIGHT_OFFSET), WALL_SIZE),
        }
    }

    /// Thin slab under a walkable cell.
    pub fn floor(cell: Cartesian2DCoordinate, y_offset: f32) -> Collidable {
        Collidable {
            kind: EntityKind::Floor,
            bounds: Aabb::from_center_size(cell_center(cell, y_offset + FLOOR_HEIGHT_OFFSET), FLOOR_SIZE),
        }
    }
}

/// World position of a grid cell: grid x maps to world x and grid y to world z.
#[inline]
pub fn cell_center(cell: Cartesian2DCoordinate, height: f32) -> Vec3 {
    Vec3::new(cell.x as f32, height, cell.y as f32)
}

/// Does the box overlap any collidable.
///
/// Linear scan; an empty slice never collides.
pub fn collides(bounds: &Aabb, collidables: &[Collidable]) -> bool {
    collidables.iter().any(|collidable| collidable.bounds.intersects(bounds))
}
