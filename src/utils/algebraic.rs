//! Coordinate notation for squares (`e4`) and moves (`e2e4`).
//!
//! Files `a..h` map to columns 0..7 and ranks `8..1` map to rows 0..7, so
//! white's pieces start on ranks 1 and 2.

use std::fmt;

use crate::chess_errors::NotationError;
use crate::game_state::chess_types::{ChessMove, Position};

/// Convert a square name (for example: "e4") to a board position.
pub fn algebraic_to_position(square: &str) -> Result<Position, NotationError> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(NotationError::InvalidSquare(square.to_owned()));
    }
    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(NotationError::InvalidSquare(square.to_owned()));
    }
    Ok(Position::new(b'8' - rank, file - b'a'))
}

/// Convert a board position to its square name (for example: "e4").
#[inline]
pub fn position_to_algebraic(pos: Position) -> String {
    pos.to_string()
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_on_board() {
            return write!(f, "({},{})", self.row, self.col);
        }
        let file = char::from(b'a' + self.col);
        let rank = char::from(b'8' - self.row);
        write!(f, "{file}{rank}")
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[inline]
pub fn move_to_coordinate(mv: ChessMove) -> String {
    mv.to_string()
}

/// Parse exactly four characters of coordinate notation.
pub fn coordinate_to_move(text: &str) -> Result<ChessMove, NotationError> {
    if text.len() != 4 || !text.is_ascii() {
        return Err(NotationError::InvalidMove(text.to_owned()));
    }
    let from = algebraic_to_position(&text[0..2])
        .map_err(|_| NotationError::InvalidMove(text.to_owned()))?;
    let to = algebraic_to_position(&text[2..4])
        .map_err(|_| NotationError::InvalidMove(text.to_owned()))?;
    Ok(ChessMove::new(from, to))
}

/// First `[a-h][1-8][a-h][1-8]` token in free-form oracle output. A trailing
/// promotion letter is ignored; promotions are chosen separately.
pub fn extract_coordinate_move(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.len() < 4 {
        return None;
    }
    let is_file = |b: u8| (b'a'..=b'h').contains(&b);
    let is_rank = |b: u8| (b'1'..=b'8').contains(&b);
    (0..=bytes.len() - 4)
        .find(|&i| {
            is_file(bytes[i]) && is_rank(bytes[i + 1]) && is_file(bytes[i + 2]) && is_rank(bytes[i + 3])
        })
        .map(|i| &text[i..i + 4])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_conversions_follow_board_orientation() {
        assert_eq!(algebraic_to_position("a8").expect("a8 should parse"), Position::new(0, 0));
        assert_eq!(algebraic_to_position("h1").expect("h1 should parse"), Position::new(7, 7));
        assert_eq!(algebraic_to_position("e2").expect("e2 should parse"), Position::new(6, 4));
        assert_eq!(position_to_algebraic(Position::new(4, 4)), "e4");
    }

    #[test]
    fn rejects_bad_squares() {
        assert!(algebraic_to_position("z9").is_err());
        assert!(algebraic_to_position("e").is_err());
        assert!(algebraic_to_position("e10").is_err());
    }

    #[test]
    fn coordinate_moves_parse() {
        let mv = coordinate_to_move("e7e5").expect("e7e5 should parse");
        assert_eq!(mv.from, Position::new(1, 4));
        assert_eq!(mv.to, Position::new(3, 4));
        assert_eq!(move_to_coordinate(mv), "e7e5");
        assert!(coordinate_to_move("z9z9").is_err());
        assert!(coordinate_to_move("e7e5q").is_err());
    }

    #[test]
    fn extracts_first_move_token_from_chatter() {
        assert_eq!(extract_coordinate_move("Best move: g8f6."), Some("g8f6"));
        assert_eq!(extract_coordinate_move("e7e8q"), Some("e7e8"));
        assert_eq!(extract_coordinate_move("z9z9"), None);
        assert_eq!(extract_coordinate_move("ok"), None);
    }
}
