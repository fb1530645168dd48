//! Opponent turn: ask the oracle, trust nothing, always produce a move.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::OracleError;
use crate::engines::engine_trait::{MoveOracle, OracleRequest};
use crate::game_state::chess_types::{ChessMove, PieceKind};
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::{coordinate_to_move, extract_coordinate_move, move_to_coordinate};
use crate::utils::fen_generator::generate_fen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Oracle,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSelection {
    pub mv: ChessMove,
    pub source: MoveSource,
    /// Why the oracle's answer was not used, for display.
    pub advisory: Option<String>,
}

pub struct OpponentMoveSelector {
    oracle: Arc<dyn MoveOracle>,
    timeout: Duration,
    rng: StdRng,
}

impl OpponentMoveSelector {
    pub fn new(oracle: Arc<dyn MoveOracle>, timeout: Duration) -> Self {
        Self::with_rng(oracle, timeout, StdRng::from_os_rng())
    }

    pub fn with_rng(oracle: Arc<dyn MoveOracle>, timeout: Duration, rng: StdRng) -> Self {
        Self { oracle, timeout, rng }
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Pick a move for the side to move, or `None` if it has none.
    pub fn select_move(&mut self, state: &GameState) -> Option<MoveSelection> {
        let legal = state.legal_moves();
        if legal.is_empty() {
            return None;
        }
        let legal_moves: Vec<String> = legal.iter().copied().map(move_to_coordinate).collect();
        let request = OracleRequest {
            position_fen: generate_fen(&state.board, state.current_player),
            color_to_move: state.current_player,
            legal_moves,
        };

        match self.ask_oracle(request.clone()).and_then(|answer| validate(&answer, &request.legal_moves)) {
            Ok(mv) => {
                debug!("{} suggests {}", self.oracle.name(), mv);
                Some(MoveSelection {
                    mv,
                    source: MoveSource::Oracle,
                    advisory: None,
                })
            }
            Err(e) => {
                let mv = *legal.as_slice().choose(&mut self.rng)?;
                warn!("{} failed ({}); falling back to {}", self.oracle.name(), e, mv);
                Some(MoveSelection {
                    mv,
                    source: MoveSource::Fallback,
                    advisory: Some(format!("The spirits are silent ({e}). Playing a random move.")),
                })
            }
        }
    }

    /// Promotions made by the opponent always pick a queen.
    #[inline]
    pub fn choose_promotion(&self) -> PieceKind {
        PieceKind::Queen
    }

    fn ask_oracle(&self, request: OracleRequest) -> Result<String, OracleError> {
        let (tx, rx) = mpsc::channel();
        let oracle = Arc::clone(&self.oracle);
        thread::spawn(move || {
            // The receiver is gone if we already timed out.
            let _ = tx.send(oracle.suggest_move(&request));
        });
        match rx.recv_timeout(self.timeout) {
            Ok(answer) => answer,
            Err(RecvTimeoutError::Timeout) => Err(OracleError::Timeout(self.timeout.as_millis())),
            Err(RecvTimeoutError::Disconnected) => Err(OracleError::Disconnected),
        }
    }
}

/// Accept the answer only if its first move token is in the legal list.
fn validate(answer: &str, legal_moves: &[String]) -> Result<ChessMove, OracleError> {
    let token = extract_coordinate_move(answer).ok_or_else(|| OracleError::Malformed(answer.to_owned()))?;
    if !legal_moves.iter().any(|m| m == token) {
        return Err(OracleError::NotInLegalSet(token.to_owned()));
    }
    coordinate_to_move(token).map_err(|_| OracleError::Malformed(answer.to_owned()))
}
