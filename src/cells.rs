use crate::units::{ColumnIndex, RowIndex, SideLength};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

/// The binary state of one maze cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellState {
    Wall,
    Path,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, side: SideLength) -> Cartesian2DCoordinate {
        let SideLength(width) = side;
        let x = index % width;
        let y = index / width;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    /// Creates a new `Coord` offset `steps` cells away in the given direction.
    /// North is towards y = 0 and West towards x = 0.
    /// Returns None if the coordinate is not representable.
    pub fn offset(self, dir: CompassPrimary, steps: u32) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_sub(steps).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::South => y.checked_add(steps).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::East => x.checked_add(steps).map(|x| Cartesian2DCoordinate { x, y }),
            CompassPrimary::West => x.checked_sub(steps).map(|x| Cartesian2DCoordinate { x, y }),
        }
    }

    /// The cell halfway between two cells an even distance apart on one axis.
    #[inline]
    pub fn midpoint(self, other: Cartesian2DCoordinate) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }
}
