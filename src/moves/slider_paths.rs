//! Path-clearance rule shared by bishops, rooks and queens.
//!
//! A slide normally needs every square strictly between `from` and `to` to
//! be empty. With Spectral Move armed the slider may phase through one
//! occupied square; it does not capture what it passes.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Position;

/// Unit step from `from` towards `to` if the two squares share a rank, file
/// or diagonal.
pub fn line_step(from: Position, to: Position) -> Option<(i8, i8)> {
    let d_row = to.row as i8 - from.row as i8;
    let d_col = to.col as i8 - from.col as i8;
    if (d_row, d_col) == (0, 0) {
        return None;
    }
    if d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs() {
        Some((d_row.signum(), d_col.signum()))
    } else {
        None
    }
}

/// Occupied squares strictly between `from` and `to` along `step`.
pub fn pieces_between(board: &Board, from: Position, to: Position, step: (i8, i8)) -> usize {
    let mut count = 0;
    let mut current = from.offset(step.0, step.1);
    while let Some(pos) = current {
        if pos == to {
            break;
        }
        if !board.is_empty_at(pos) {
            count += 1;
        }
        current = pos.offset(step.0, step.1);
    }
    count
}

#[inline]
pub fn path_is_passable(board: &Board, from: Position, to: Position, step: (i8, i8), spectral: bool) -> bool {
    let blockers = pieces_between(board, from, to, step);
    if spectral {
        blockers <= 1
    } else {
        blockers == 0
    }
}
