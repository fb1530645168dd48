use crate::game_state::board::Board;
use crate::game_state::chess_types::Position;
use crate::moves::slider_paths::{line_step, path_is_passable};

pub fn rook_pattern(board: &Board, from: Position, to: Position, spectral: bool) -> bool {
    match line_step(from, to) {
        Some(step @ (d_row, d_col)) if d_row == 0 || d_col == 0 => {
            path_is_passable(board, from, to, step, spectral)
        }
        _ => false,
    }
}
