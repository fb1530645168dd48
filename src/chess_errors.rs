//! Error types used throughout the engine.
//!
//! `TransitionError` covers every intent the state machine can refuse. Those
//! refusals are expected in normal play (a stale click, an out-of-turn
//! request) and never change the game: callers keep the previous snapshot.
//! `OracleError` covers the opponent move oracle and is always recovered by
//! the random fallback. Notation, profile and config errors wrap parsing and
//! persistence failures.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceKind, Position};
use crate::game_state::game_state::GameStatus;
use crate::power_ups::power_up_types::PowerUpKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The match is over; only a reset is accepted.
    #[error("the game is over")]
    GameOver,

    /// The intent does not fit the current state-machine state.
    #[error("intent not accepted while status is {0:?}")]
    WrongPhase(GameStatus),

    /// The intent came from the player whose turn it is not.
    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Color),

    #[error("no {expected:?} piece on {at}")]
    NotYourPiece { at: Position, expected: Color },

    #[error("illegal move {from}{to}")]
    IllegalMove { from: Position, to: Position },

    #[error("cannot promote to {0:?}")]
    InvalidPromotionChoice(PieceKind),

    #[error("power-up {0} is not held by the side to move")]
    UnknownPowerUp(u32),

    #[error("{0:?} is already active")]
    PowerUpAlreadyActive(PowerUpKind),

    #[error("ethereal escape needs the king to be in check")]
    NotInCheck,

    #[error("no stolen piece is waiting to be restored")]
    NoStolenPiece,

    #[error("{0:?} already holds a stolen piece")]
    EscrowOccupied(Color),

    #[error("cannot place a piece on {0}")]
    InvalidPlacement(Position),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid coordinate move: {0}")]
    InvalidMove(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("oracle did not answer within {0} ms")]
    Timeout(u128),

    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    #[error("oracle response did not contain a move: {0:?}")]
    Malformed(String),

    #[error("oracle suggested {0}, which is not a legal move")]
    NotInLegalSet(String),

    #[error("oracle worker disconnected")]
    Disconnected,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("profile store failed: {0}")]
    Store(String),
}

#[derive(Debug, Error)]
#[error("invalid match config: {0}")]
pub struct ConfigError(#[from] serde_json::Error);
