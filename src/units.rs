use std::convert::TryFrom;

/// Number of carvable rooms along one side of a maze.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeSize(pub usize);
/// Cells along one side of a maze grid, walls included.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct SideLength(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct LevelIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct LevelsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnIndex(pub usize);

#[derive(PartialEq, PartialOrd, Copy, Clone, Debug)]
pub struct SpeedMultiplier(pub f32);
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Default)]
pub struct Points(pub u32);

impl MazeSize {
    /// A maze of `n` rooms needs a wall between and around every room.
    #[inline]
    pub fn side_length(self) -> SideLength {
        SideLength(self.0 * 2 + 1)
    }

    /// Points for clearing a level of this size, saturating at the largest score.
    #[inline]
    pub fn points(self) -> Points {
        Points(u32::try_from(self.0).unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_length_includes_walls() {
        assert_eq!(MazeSize(5).side_length(), SideLength(11));
        assert_eq!(MazeSize(1).side_length(), SideLength(3));
    }

    #[test]
    fn level_points_saturate() {
        assert_eq!(MazeSize(5).points(), Points(5));
        assert_eq!(MazeSize(u32::MAX as usize).points(), Points(u32::MAX));
        assert_eq!(MazeSize(usize::MAX).points(), Points(u32::MAX));
    }
}
