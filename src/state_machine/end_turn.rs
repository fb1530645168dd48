//! Shared end-of-turn procedure run after every completed half-move.

use log::debug;

use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::termination::evaluate_position;
use crate::power_ups::power_up_grants::consume_power_up;

impl GameState {
    /// Finish the mover's turn on an already-edited snapshot.
    ///
    /// `moved` is the kind that counts as having moved (`None` when the mover
    /// moved an enemy piece); `captured` is any piece taken this turn. Pawn
    /// moves and captures reset the moves-remaining counter, otherwise it
    /// drops by one after each black half-move.
    pub(crate) fn end_turn(mut self, moved: Option<PieceKind>, captured: Option<Piece>) -> GameState {
        let mover = self.current_player;

        if let Some(active) = self.active_power_up.take() {
            if consume_power_up(self.player_mut(mover), active.id).is_some() {
                debug!("{} spent {:?}", mover.name(), active.kind);
            }
        }
        self.promotion_pending = None;

        if moved == Some(PieceKind::Pawn) || captured.is_some() {
            self.moves_remaining = self.config.move_limit;
        } else if mover == Color::Black {
            self.moves_remaining = self.moves_remaining.saturating_sub(1);
        }

        self.current_player = mover.opposite();
        self.move_count += 1;

        let verdict = evaluate_position(&self.board, self.current_player, self.moves_remaining);
        self.apply_verdict(verdict);
        debug!(
            "turn {} done by {}; {:?}, {} moves remaining\n{}",
            self.move_count,
            mover.name(),
            self.status,
            self.moves_remaining,
            self.board
        );
        self
    }
}
