//! Full legal move enumeration.
//!
//! Brute force over every from/to pair of the side's pieces, filtered through
//! `is_legal_move`. The board is tiny, so clarity wins over bitboards here.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{is_king_in_check, is_legal_move};
use crate::moves::king_moves::king_neighbours;
use crate::power_ups::power_up_types::PowerUpKind;

pub fn get_all_legal_moves(
    board: &Board,
    color: Color,
    active_power_up: Option<PowerUpKind>,
) -> Vec<ChessMove> {
    let mut moves = Vec::with_capacity(64);
    for (from, _) in board.pieces_of(color) {
        for to in Position::all() {
            if is_legal_move(board, from, to, active_power_up) {
                moves.push(ChessMove::new(from, to));
            }
        }
    }
    moves
}

#[inline]
pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(from, _)| Position::all().any(|to| is_legal_move(board, from, to, None)))
}

/// Ethereal Escape targets: squares around the king that hold neither a
/// friendly piece nor a king and leave the king out of check. Kings teleport,
/// so other enemy pieces may be landed on (and are captured).
pub fn get_ethereal_escape_moves(board: &Board, color: Color) -> Vec<Position> {
    let Some(king) = board.king_position(color) else {
        return Vec::new();
    };
    king_neighbours(king)
        .filter(|to| {
            !board
                .get(*to)
                .is_some_and(|target| target.color == color || target.kind == PieceKind::King)
        })
        .filter(|to| {
            let (next, _) = board.move_piece(king, *to);
            !is_king_in_check(&next, color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::move_generation::legal_move_checks::is_king_in_check;
    use crate::utils::algebraic::{algebraic_to_position, move_to_coordinate};

    fn piece(id: u32, kind: PieceKind, color: Color) -> Option<Piece> {
        Some(Piece::new(id, kind, color))
    }

    fn sq(name: &str) -> Position {
        algebraic_to_position(name).expect("test square should parse")
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let board = Board::initial();
        assert_eq!(get_all_legal_moves(&board, Color::White, None).len(), 20);
        assert_eq!(get_all_legal_moves(&board, Color::Black, None).len(), 20);
    }

    #[test]
    fn every_legal_move_keeps_own_king_safe() {
        let board = Board::empty()
            .with(sq("e1"), piece(0, PieceKind::King, Color::White))
            .with(sq("d2"), piece(1, PieceKind::Queen, Color::White))
            .with(sq("e8"), piece(2, PieceKind::King, Color::Black))
            .with(sq("a5"), piece(3, PieceKind::Bishop, Color::Black))
            .with(sq("h4"), piece(4, PieceKind::Queen, Color::Black));
        for mv in get_all_legal_moves(&board, Color::White, None) {
            let (next, _) = board.move_piece(mv.from, mv.to);
            assert!(!is_king_in_check(&next, Color::White), "{:?} leaves king in check", mv);
        }
    }

    #[test]
    fn check_from_rook_on_e_file_allows_only_evasions() {
        let board = Board::empty()
            .with(sq("e1"), piece(0, PieceKind::King, Color::White))
            .with(sq("a4"), piece(1, PieceKind::Rook, Color::White))
            .with(sq("b5"), piece(2, PieceKind::Bishop, Color::White))
            .with(sq("e8"), piece(3, PieceKind::Rook, Color::Black))
            .with(sq("a8"), piece(4, PieceKind::King, Color::Black));
        assert!(is_king_in_check(&board, Color::White));

        let moves: HashSet<String> = get_all_legal_moves(&board, Color::White, None)
            .into_iter()
            .map(move_to_coordinate)
            .collect();
        let expected: HashSet<String> = [
            // king steps off the e-file
            "e1d1", "e1d2", "e1f1", "e1f2",
            // interpositions
            "a4e4", "b5e2",
            // capture of the checking rook
            "b5e8",
        ]
        .into_iter()
        .map(str::to_owned)
        .collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn back_rank_mate_has_no_legal_moves() {
        let board = Board::empty()
            .with(sq("h1"), piece(0, PieceKind::King, Color::White))
            .with(sq("g2"), piece(1, PieceKind::Pawn, Color::White))
            .with(sq("h2"), piece(2, PieceKind::Pawn, Color::White))
            .with(sq("a1"), piece(3, PieceKind::Rook, Color::Black))
            .with(sq("e8"), piece(4, PieceKind::King, Color::Black));
        assert!(is_king_in_check(&board, Color::White));
        assert!(get_all_legal_moves(&board, Color::White, None).is_empty());
        assert!(!has_any_legal_move(&board, Color::White));
    }

    #[test]
    fn cornered_king_is_stalemated() {
        let board = Board::empty()
            .with(sq("a8"), piece(0, PieceKind::King, Color::Black))
            .with(sq("b6"), piece(1, PieceKind::Queen, Color::White))
            .with(sq("h1"), piece(2, PieceKind::King, Color::White));
        assert!(!is_king_in_check(&board, Color::Black));
        assert!(get_all_legal_moves(&board, Color::Black, None).is_empty());
    }

    #[test]
    fn escape_squares_skip_friends_and_attacked_squares() {
        let board = Board::empty()
            .with(sq("e1"), piece(0, PieceKind::King, Color::White))
            .with(sq("d1"), piece(1, PieceKind::Queen, Color::White))
            .with(sq("e8"), piece(2, PieceKind::Rook, Color::Black))
            .with(sq("f8"), piece(3, PieceKind::Rook, Color::Black))
            .with(sq("a8"), piece(4, PieceKind::King, Color::Black));
        let escapes: HashSet<String> = get_ethereal_escape_moves(&board, Color::White)
            .into_iter()
            .map(|p| p.to_string())
            .collect();
        let expected: HashSet<String> = ["d2"].into_iter().map(str::to_owned).collect();
        assert_eq!(escapes, expected);
    }
}
