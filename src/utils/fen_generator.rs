//! Simplified Forsyth-Edwards position encoder for the opponent oracle.
//!
//! Only piece placement and side to move carry information. Castling, en
//! passant and the clocks are not part of this variant, so a constant
//! placeholder is appended for them.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::FEN_PLACEHOLDER_SUFFIX;
use crate::game_state::chess_types::*;

pub fn generate_fen(board: &Board, side_to_move: Color) -> String {
    let side = match side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    format!("{} {} {}", generate_board_field(board), side, FEN_PLACEHOLDER_SUFFIX)
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for row in 0..8u8 {
        let mut empty_count = 0u8;

        for col in 0..8u8 {
            match board.get(Position::new(row, col)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_fen_char(piece));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}

fn piece_to_fen_char(piece: Piece) -> char {
    let base = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match piece.color {
        Color::White => base.to_ascii_uppercase(),
        Color::Black => base,
    }
}
