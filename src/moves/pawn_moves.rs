//! Pawn movement patterns.
//!
//! Pawns advance onto empty squares only and capture only diagonally.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Forward, non-capturing steps: one square, or two from the home row with
/// both squares empty.
pub fn pawn_advance_pattern(board: &Board, from: Position, to: Position, color: Color) -> bool {
    if from.col != to.col || !board.is_empty_at(to) {
        return false;
    }
    let dir = color.pawn_direction();
    let d_row = to.row as i8 - from.row as i8;
    if d_row == dir {
        return true;
    }
    if d_row == 2 * dir && from.row == color.pawn_home_row() {
        return from
            .offset(dir, 0)
            .is_some_and(|between| board.is_empty_at(between));
    }
    false
}

/// One square diagonally forward onto an enemy piece.
pub fn pawn_capture_pattern(board: &Board, from: Position, to: Position, color: Color) -> bool {
    let d_row = to.row as i8 - from.row as i8;
    let d_col = to.col as i8 - from.col as i8;
    d_row == color.pawn_direction()
        && d_col.abs() == 1
        && board.get(to).is_some_and(|target| target.color != color)
}

pub fn pawn_pattern(board: &Board, from: Position, to: Position, color: Color) -> bool {
    pawn_advance_pattern(board, from, to, color) || pawn_capture_pattern(board, from, to, color)
}
