use crate::game_state::board::Board;
use crate::game_state::chess_types::Position;
use crate::moves::slider_paths::{line_step, path_is_passable};

pub fn queen_pattern(board: &Board, from: Position, to: Position, spectral: bool) -> bool {
    line_step(from, to).is_some_and(|step| path_is_passable(board, from, to, step, spectral))
}
