use crate::game_state::chess_types::Position;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[inline]
pub fn king_pattern(from: Position, to: Position) -> bool {
    let d_row = (to.row as i8 - from.row as i8).abs();
    let d_col = (to.col as i8 - from.col as i8).abs();
    d_row <= 1 && d_col <= 1 && (d_row, d_col) != (0, 0)
}

/// On-board squares adjacent to `from`.
pub fn king_neighbours(from: Position) -> impl Iterator<Item = Position> {
    KING_OFFSETS
        .into_iter()
        .filter_map(move |(d_row, d_col)| from.offset(d_row, d_col))
}
