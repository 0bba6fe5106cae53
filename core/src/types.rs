/// Single coordinate axis used for grid columns, rows, and the grid side length.
pub type Coord = u8;

/// Count type used for boxes per batch.
pub type BoxCount = u16;

/// Cell coordinates `(i, j)`: column and row, row `0` being the far edge.
pub type Coord2 = (Coord, Coord);

/// Position on the board plane `(x, z)`; the plane itself sits at `y = 0`.
pub type Point2 = (f32, f32);

/// Position in board space `(x, y, z)`, `y` pointing up.
pub type Point3 = (f32, f32, f32);

/// Highest grid side length that still has a column letter per column.
pub const MAX_CELLS: Coord = 26;

pub const fn column_letter(i: Coord) -> Option<char> {
    if i < MAX_CELLS {
        Some((b'A' + i) as char)
    } else {
        None
    }
}

pub const fn column_index(letter: char) -> Option<Coord> {
    if letter.is_ascii_uppercase() {
        Some(letter as u8 - b'A')
    } else {
        None
    }
}
