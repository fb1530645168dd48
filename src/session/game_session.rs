//! Single-writer match controller.
//!
//! Owns the live snapshot and everything that feeds it: the RNG used for
//! power-up rolls and opponent names, the opponent selector, the wall clock
//! and the player's profile. The human always plays white.

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;

use crate::chess_errors::TransitionError;
use crate::engines::opponent_selector::{MoveSelection, OpponentMoveSelector};
use crate::game_state::chess_rules::OPPONENT_NAMES;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::{GameState, GameStatus};
use crate::game_state::match_config::MatchConfig;
use crate::game_state::player_state::PlayerState;
use crate::profile::player_profile::{save_profile, PlayerProfile, ProfileStore};
use crate::state_machine::clock::MatchClock;

const HUMAN: Color = Color::White;

/// Requests coming from the UI on behalf of the human player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SubmitMove { from: Position, to: Position },
    SubmitPromotionChoice(PieceKind),
    ActivatePowerUp(u32),
    SubmitPawnPlacement(Position),
    SubmitPossessionMove { from: Position, to: Position },
    SubmitEscapeSquare(Position),
    SubmitStolenPieceRestore(Position),
    ResetMatch(PlayerProfile),
}

pub struct GameSession {
    state: GameState,
    config: MatchConfig,
    rng: StdRng,
    selector: OpponentMoveSelector,
    profile: PlayerProfile,
    store: Box<dyn ProfileStore + Send>,
    clock: MatchClock,
    result_recorded: bool,
}

impl GameSession {
    pub fn new(
        profile: PlayerProfile,
        store: Box<dyn ProfileStore + Send>,
        mut selector: OpponentMoveSelector,
        config: MatchConfig,
        mut rng: StdRng,
        now: DateTime<Utc>,
    ) -> Self {
        selector.set_timeout(config.oracle_timeout);
        info!(
            "opponent oracle {} ({} ms budget)",
            selector.oracle_name(),
            config.oracle_timeout.as_millis()
        );
        let state = fresh_match(&profile, config, &mut rng);
        Self {
            state,
            config,
            rng,
            selector,
            profile,
            store,
            clock: MatchClock::new(now),
            result_recorded: false,
        }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn store(&self) -> &dyn ProfileStore {
        &*self.store
    }

    /// Apply a UI intent. A rejected intent is logged and leaves the match
    /// untouched.
    pub fn apply(&mut self, intent: Intent) -> Result<(), TransitionError> {
        let intent = match intent {
            Intent::ResetMatch(profile) => {
                self.reset(profile);
                return Ok(());
            }
            other => other,
        };
        match self.transition(&intent) {
            Ok(next) => {
                self.replace(next);
                Ok(())
            }
            Err(e) => {
                warn!("rejected {:?}: {}", intent, e);
                Err(e)
            }
        }
    }

    /// Take a piece of `victim` into escrow (host-triggered event).
    pub fn steal_piece(&mut self, victim: Color, at: Position) -> Result<(), TransitionError> {
        match self.state.steal_piece(victim, at) {
            Ok(next) => {
                self.replace(next);
                Ok(())
            }
            Err(e) => {
                warn!("could not steal from {}: {}", victim.name(), e);
                Err(e)
            }
        }
    }

    /// Charge elapsed wall-clock time to the side to move. Returns the
    /// number of seconds actually charged.
    pub fn advance_clock(&mut self, now: DateTime<Utc>) -> u32 {
        let ticks = self.clock.elapsed_ticks(now);
        let mut charged = 0;
        for _ in 0..ticks {
            let Some(next) = self.state.tick_second() else {
                break;
            };
            self.replace(next);
            charged += 1;
        }
        charged
    }

    /// Let the opponent move if it is black's turn and the board is waiting
    /// for an ordinary move. A fallback advisory is announced on the new
    /// snapshot.
    pub fn play_opponent_turn(&mut self) -> Option<MoveSelection> {
        if self.state.current_player == HUMAN || self.state.gameover || !self.state.status.accepts_moves() {
            return None;
        }
        let selection = self.selector.select_move(&self.state)?;
        let moved = self.state.submit_move(selection.mv.from, selection.mv.to, &mut self.rng);
        let next = moved.and_then(|next| {
            if next.status == GameStatus::Promotion {
                next.submit_promotion_choice(self.selector.choose_promotion(), &mut self.rng)
            } else {
                Ok(next)
            }
        });
        match next {
            Ok(mut next) => {
                if let Some(advisory) = &selection.advisory {
                    let message = match next.announcement.take() {
                        Some(earlier) => format!("{advisory} {}", earlier.message),
                        None => advisory.clone(),
                    };
                    next.announce(message);
                }
                self.replace(next);
                Some(selection)
            }
            Err(e) => {
                error!("opponent move {} was rejected: {}", selection.mv, e);
                None
            }
        }
    }

    fn transition(&mut self, intent: &Intent) -> Result<GameState, TransitionError> {
        if self.state.current_player != HUMAN && !self.state.gameover {
            return Err(TransitionError::NotYourTurn(HUMAN));
        }
        let state = &self.state;
        let rng = &mut self.rng;
        match *intent {
            Intent::SubmitMove { from, to } => state.submit_move(from, to, rng),
            Intent::SubmitPromotionChoice(kind) => state.submit_promotion_choice(kind, rng),
            Intent::ActivatePowerUp(id) => state.activate_power_up(id),
            Intent::SubmitPawnPlacement(at) => state.submit_pawn_placement(at),
            Intent::SubmitPossessionMove { from, to } => state.submit_possession_move(from, to),
            Intent::SubmitEscapeSquare(at) => state.submit_escape_square(at, rng),
            Intent::SubmitStolenPieceRestore(at) => state.submit_stolen_piece_restore(at),
            Intent::ResetMatch(_) => Err(TransitionError::WrongPhase(state.status)),
        }
    }

    fn reset(&mut self, profile: PlayerProfile) {
        self.state = fresh_match(&profile, self.config, &mut self.rng);
        self.profile = profile;
        self.result_recorded = false;
    }

    /// Install a new snapshot and settle the profile once the match ends.
    fn replace(&mut self, next: GameState) {
        self.state = next;
        if !self.state.gameover || self.result_recorded {
            return;
        }
        self.result_recorded = true;
        let Some(result) = self.state.winner else {
            error!("game over without a result ({:?})", self.state.status);
            return;
        };
        self.profile.record_result(result);
        if let Err(e) = save_profile(&mut *self.store, &self.profile) {
            warn!("could not save profile: {}", e);
        }
    }
}

fn fresh_match(profile: &PlayerProfile, config: MatchConfig, rng: &mut StdRng) -> GameState {
    let opponent = OPPONENT_NAMES.choose(rng).copied().unwrap_or("Specter");
    info!("{} faces {}", profile.name, opponent);
    GameState::new_match(
        PlayerState::new(profile.name.clone(), Color::White, profile.level),
        PlayerState::new(opponent, Color::Black, profile.level),
        config,
    )
}
