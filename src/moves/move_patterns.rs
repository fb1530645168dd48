//! Pseudo-legal move oracle.
//!
//! Answers "does this piece's movement pattern allow `from → to` on this
//! board", ignoring whether the mover's king ends up in check. Spectral Move
//! relaxes the path rule for sliders only.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_pattern;
use crate::moves::king_moves::king_pattern;
use crate::moves::knight_moves::knight_pattern;
use crate::moves::pawn_moves::pawn_pattern;
use crate::moves::queen_moves::queen_pattern;
use crate::moves::rook_moves::rook_pattern;
use crate::power_ups::power_up_types::PowerUpKind;

pub fn is_pseudo_legal(
    board: &Board,
    from: Position,
    to: Position,
    active_power_up: Option<PowerUpKind>,
) -> bool {
    if !from.is_on_board() || !to.is_on_board() || from == to {
        return false;
    }
    let Some(piece) = board.get(from) else {
        return false;
    };
    if board.get(to).is_some_and(|target| target.color == piece.color) {
        return false;
    }

    let spectral = active_power_up == Some(PowerUpKind::SpectralMove) && piece.kind.is_slider();

    match piece.kind {
        PieceKind::Pawn => pawn_pattern(board, from, to, piece.color),
        PieceKind::Knight => knight_pattern(from, to),
        PieceKind::Bishop => bishop_pattern(board, from, to, spectral),
        PieceKind::Rook => rook_pattern(board, from, to, spectral),
        PieceKind::Queen => queen_pattern(board, from, to, spectral),
        PieceKind::King => king_pattern(from, to),
    }
}
