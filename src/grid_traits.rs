use crate::cells::Cartesian2DCoordinate;

pub trait GridDisplay {
    /// Render the contents of a walkable grid cell as text.
    /// The String should be 2 glyphs long, padded if required.
    fn render_cell_body(&self, _: Cartesian2DCoordinate) -> String {
        String::from("  ")
    }
}
