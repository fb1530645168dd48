//! Copy-on-write 8×8 board model.
//!
//! `Board` is a small `Copy` value. Every mutating helper either works on an
//! owned copy or returns a new board, so speculative "move and test for
//! check" trials can never disturb the live game.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::INITIAL_BACK_RANK;
use crate::game_state::chess_types::*;
use crate::utils::render_game_state::render_board;

/// Contents of one cell.
pub type Square = Option<Piece>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Square; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard starting setup. Ids are handed out row by row from zero, so
    /// the first free id afterwards is 32.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        let mut next_id = 0u32;
        for color in [Color::Black, Color::White] {
            let back = color.back_row();
            let pawns = color.pawn_home_row();
            let mut rows = [back, pawns];
            if color == Color::White {
                rows.reverse();
            }
            for row in rows {
                for col in 0..8u8 {
                    let kind = if row == back {
                        INITIAL_BACK_RANK[col as usize]
                    } else {
                        PieceKind::Pawn
                    };
                    board.set(Position::new(row, col), Some(Piece::new(next_id, kind, color)));
                    next_id += 1;
                }
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.row as usize][pos.col as usize]
    }

    #[inline]
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.row as usize][pos.col as usize] = square;
    }

    /// Builder-style `set` returning the updated copy.
    #[inline]
    pub fn with(mut self, pos: Position, square: Square) -> Self {
        self.set(pos, square);
        self
    }

    #[inline]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Relocate whatever stands on `from` to `to`, returning the new board and
    /// the piece that previously occupied `to`. `self` is left untouched.
    /// Legality is the caller's business.
    pub fn move_piece(&self, from: Position, to: Position) -> (Board, Option<Piece>) {
        let mut next = *self;
        let captured = next.get(to);
        match next.get(from) {
            Some(piece) => {
                next.set(to, Some(piece));
                next.set(from, None);
                (next, captured)
            }
            None => (next, None),
        }
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|pos| self.get(pos).map(|piece| (pos, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(pos, _)| pos)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::game_state::chess_types::*;

    #[test]
    fn initial_board_has_kings_on_e_file() {
        let board = Board::initial();
        assert_eq!(board.king_position(Color::White), Some(Position::new(7, 4)));
        assert_eq!(board.king_position(Color::Black), Some(Position::new(0, 4)));
        assert_eq!(board.pieces_of(Color::White).count(), 16);
        assert_eq!(board.pieces_of(Color::Black).count(), 16);
    }

    #[test]
    fn initial_board_ids_are_unique() {
        let board = Board::initial();
        let mut ids: Vec<u32> = board.pieces().map(|(_, p)| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
        assert_eq!(ids.last().copied(), Some(31));
    }

    #[test]
    fn move_piece_leaves_source_board_untouched() {
        let board = Board::initial();
        let from = Position::new(6, 4);
        let to = Position::new(4, 4);
        let (next, captured) = board.move_piece(from, to);

        assert!(captured.is_none());
        assert!(board.get(from).is_some());
        assert!(board.is_empty_at(to));
        assert!(next.is_empty_at(from));
        assert_eq!(next.get(to).map(|p| p.kind), Some(PieceKind::Pawn));
    }

    #[test]
    fn move_piece_reports_capture() {
        let rook = Piece::new(1, PieceKind::Rook, Color::White);
        let knight = Piece::new(2, PieceKind::Knight, Color::Black);
        let board = Board::empty()
            .with(Position::new(7, 0), Some(rook))
            .with(Position::new(3, 0), Some(knight));

        let (next, captured) = board.move_piece(Position::new(7, 0), Position::new(3, 0));
        assert_eq!(captured, Some(knight));
        assert_eq!(next.get(Position::new(3, 0)), Some(rook));
    }

    #[test]
    fn move_from_empty_square_is_a_no_op() {
        let board = Board::initial();
        let (next, captured) = board.move_piece(Position::new(4, 4), Position::new(3, 4));
        assert_eq!(next, board);
        assert!(captured.is_none());
    }
}
