//! Check detection and check-safe legality.

use log::error;

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::move_patterns::is_pseudo_legal;
use crate::moves::knight_moves::knight_pattern;
use crate::moves::pawn_moves::pawn_advance_pattern;
use crate::power_ups::power_up_types::PowerUpKind;

/// True when any opposing piece has a power-up-free pattern move onto the
/// king of `color`.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.king_position(color) else {
        error!("no {:?} king on the board\n{}", color, board);
        return false;
    };
    is_square_attacked(board, king, color.opposite())
}

pub fn is_square_attacked(board: &Board, square: Position, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|(from, _)| is_pseudo_legal(board, from, square, None))
}

/// Pattern-legal, never a king capture, and the mover's own king is safe
/// afterwards.
pub fn is_legal_move(
    board: &Board,
    from: Position,
    to: Position,
    active_power_up: Option<PowerUpKind>,
) -> bool {
    if !from.is_on_board() || !to.is_on_board() {
        return false;
    }
    let Some(piece) = board.get(from) else {
        return false;
    };
    if board.get(to).is_some_and(|target| target.kind == PieceKind::King) {
        return false;
    }
    if !is_pseudo_legal(board, from, to, active_power_up) {
        return false;
    }
    let (next, _) = board.move_piece(from, to);
    !is_king_in_check(&next, piece.color)
}

/// Ghastly Possession: an enemy pawn or knight moved onto an empty square
/// using only its non-capturing pattern. Ownership is checked by the caller.
pub fn is_legal_possession_move(board: &Board, from: Position, to: Position) -> bool {
    if !from.is_on_board() || !to.is_on_board() || from == to {
        return false;
    }
    let Some(piece) = board.get(from) else {
        return false;
    };
    if !board.is_empty_at(to) {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => pawn_advance_pattern(board, from, to, piece.color),
        PieceKind::Knight => knight_pattern(from, to),
        _ => false,
    }
}
