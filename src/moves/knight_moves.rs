use crate::game_state::chess_types::Position;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

#[inline]
pub fn knight_pattern(from: Position, to: Position) -> bool {
    let d_row = (to.row as i8 - from.row as i8).abs();
    let d_col = (to.col as i8 - from.col as i8).abs();
    (d_row == 2 && d_col == 1) || (d_row == 1 && d_col == 2)
}

/// On-board knight destinations from `from`.
pub fn knight_targets(from: Position) -> impl Iterator<Item = Position> {
    KNIGHT_OFFSETS
        .into_iter()
        .filter_map(move |(d_row, d_col)| from.offset(d_row, d_col))
}
