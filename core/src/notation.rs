use alloc::string::String;
use core::fmt::Write;

use crate::*;

/// Board label of a cell: column letter followed by the row number, rows counted from the
/// near edge so that `j = 0` (the far row) gets the highest number.
pub fn encode_notation((i, j): Coord2, cells: Coord) -> Result<String> {
    if cells > MAX_CELLS {
        return Err(SketchError::TooManyCells(cells));
    }
    if i >= cells || j >= cells {
        return Err(SketchError::InvalidNotation);
    }
    let letter = column_letter(i).ok_or(SketchError::InvalidNotation)?;

    let mut notation = String::with_capacity(3);
    notation.push(letter);
    write!(notation, "{}", cells - j).map_err(|_| SketchError::InvalidNotation)?;
    Ok(notation)
}

/// Inverse of [`encode_notation`].
pub fn decode_notation(notation: &str, cells: Coord) -> Result<Coord2> {
    let mut chars = notation.chars();
    let i = chars
        .next()
        .and_then(column_index)
        .ok_or(SketchError::InvalidNotation)?;

    let digits = chars.as_str();
    if digits.is_empty()
        || digits.starts_with('0')
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(SketchError::InvalidNotation);
    }
    let row: Coord = digits.parse().map_err(|_| SketchError::InvalidNotation)?;

    if i >= cells || row == 0 || row > cells {
        return Err(SketchError::InvalidNotation);
    }
    Ok((i, cells - row))
}
