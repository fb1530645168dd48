//! End-of-game detection: checkmate, stalemate, insufficient material and
//! the moves-remaining counter.

use serde::{Deserialize, Serialize};

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;

/// Why a finished game was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    MoveLimit,
}

/// Position verdict for the side about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Play goes on; `in_check` tells whether the mover faces check.
    Ongoing { in_check: bool },
    /// The side to move is mated; the other color wins.
    Checkmate { winner: Color },
    Draw(DrawReason),
}

#[derive(Default)]
struct MaterialCount {
    total: u8,
    knights: u8,
    bishops: u8,
    bishop_parity: Option<u8>,
}

/// True only when no sequence of moves can force mate.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut counts = [MaterialCount::default(), MaterialCount::default()];

    for (pos, piece) in board.pieces() {
        let side = &mut counts[piece.color.index()];
        side.total += 1;
        match piece.kind {
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            PieceKind::Knight => side.knights += 1,
            PieceKind::Bishop => {
                side.bishops += 1;
                side.bishop_parity = Some(pos.parity());
            }
            PieceKind::King => {}
        }
    }

    let [white, black] = &counts;
    let lone = |side: &MaterialCount| side.total == 1;
    let single_minor = |side: &MaterialCount| side.total == 2 && (side.knights == 1 || side.bishops == 1);
    let single_bishop = |side: &MaterialCount| side.total == 2 && side.bishops == 1;

    if lone(white) && lone(black) {
        return true;
    }
    if (single_minor(white) && lone(black)) || (single_minor(black) && lone(white)) {
        return true;
    }
    single_bishop(white) && single_bishop(black) && white.bishop_parity == black.bishop_parity
}

/// Evaluate the position for `side_to_move` right after a half-move.
/// `moves_remaining` is the counter value after this half-move was counted.
pub fn evaluate_position(board: &Board, side_to_move: Color, moves_remaining: u16) -> Verdict {
    let in_check = is_king_in_check(board, side_to_move);

    if !has_any_legal_move(board, side_to_move) {
        return if in_check {
            Verdict::Checkmate {
                winner: side_to_move.opposite(),
            }
        } else {
            Verdict::Draw(DrawReason::Stalemate)
        };
    }
    if is_insufficient_material(board) {
        return Verdict::Draw(DrawReason::InsufficientMaterial);
    }
    if moves_remaining == 0 {
        return Verdict::Draw(DrawReason::MoveLimit);
    }
    Verdict::Ongoing { in_check }
}
