//! Local stand-in oracle.
//!
//! Picks uniformly from the supplied legal moves. Used when no remote oracle
//! is configured and in tests.

use rand::prelude::IndexedRandom;

use crate::chess_errors::OracleError;
use crate::engines::engine_trait::{MoveOracle, OracleRequest};

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomOracle;

impl RandomOracle {
    pub fn new() -> Self {
        Self
    }
}

impl MoveOracle for RandomOracle {
    fn name(&self) -> &str {
        "Phantom Random"
    }

    fn suggest_move(&self, request: &OracleRequest) -> Result<String, OracleError> {
        let mut rng = rand::rng();
        request
            .legal_moves
            .as_slice()
            .choose(&mut rng)
            .cloned()
            .ok_or_else(|| OracleError::Unavailable("no legal moves to choose from".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;

    #[test]
    fn picks_one_of_the_supplied_moves() {
        let request = OracleRequest {
            position_fen: "8/8/8/8/8/8/8/8 b KQkq - 0 1".to_owned(),
            color_to_move: Color::Black,
            legal_moves: vec!["e7e5".to_owned(), "g8f6".to_owned()],
        };
        let picked = RandomOracle::new()
            .suggest_move(&request)
            .expect("random oracle should answer");
        assert!(request.legal_moves.contains(&picked));
    }

    #[test]
    fn empty_move_list_is_an_error() {
        let request = OracleRequest {
            position_fen: String::new(),
            color_to_move: Color::White,
            legal_moves: Vec::new(),
        };
        assert!(RandomOracle.suggest_move(&request).is_err());
    }
}
