//! Opponent move oracle abstraction.
//!
//! The oracle is an external collaborator (a remote model, a UCI engine, a
//! scripted test double). It sees the position and the full legal-move list
//! in coordinate notation and answers with free-form text that should
//! contain one of those moves. Nothing it says is trusted: the selector
//! validates every answer and falls back to a random move.

use crate::chess_errors::OracleError;
use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRequest {
    pub position_fen: String,
    pub color_to_move: Color,
    /// Legal moves such as `"e7e5"`.
    pub legal_moves: Vec<String>,
}

pub trait MoveOracle: Send + Sync {
    fn name(&self) -> &str;

    /// Blocking call; the selector runs it on a worker thread and bounds it
    /// with a timeout.
    fn suggest_move(&self, request: &OracleRequest) -> Result<String, OracleError>;
}
