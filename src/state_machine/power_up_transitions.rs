//! Power-up activation and the sub-phases it opens.
//!
//! Activation arms a held power-up for the side to move. Time Twist resolves
//! on the spot; Spectral Move only changes how the next ordinary move is
//! checked; the other four park the game in a pending status until the
//! matching `submit_*` completes the turn. Nothing is consumed until
//! `end_turn`, so cancelling is free.

use log::debug;
use rand::Rng;

use crate::chess_errors::TransitionError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::{GameState, GameStatus};
use crate::move_generation::legal_move_checks::{is_king_in_check, is_legal_possession_move};
use crate::move_generation::termination::evaluate_position;
use crate::power_ups::power_up_grants::consume_power_up;
use crate::power_ups::power_up_types::PowerUpKind;

impl GameState {
    /// Arm (or, if already armed, cancel) power-up `id` of the side to move.
    pub fn activate_power_up(&self, id: u32) -> Result<GameState, TransitionError> {
        if self.gameover {
            return Err(TransitionError::GameOver);
        }
        let mover = self.current_player;
        let Some(power_up) = self.player(mover).power_up(id) else {
            return Err(TransitionError::UnknownPowerUp(id));
        };

        if let Some(active) = self.active_power_up {
            if active.id != id {
                return Err(TransitionError::PowerUpAlreadyActive(active.kind));
            }
            // A move already made under the power-up (e.g. a pending promotion)
            // cannot be taken back by cancelling.
            let own_phase = pending_status(active.kind) == Some(self.status);
            if !self.status.accepts_moves() && !own_phase {
                return Err(TransitionError::WrongPhase(self.status));
            }
            let mut next = self.begin_transition();
            next.active_power_up = None;
            next.status = next.resting_status();
            debug!("{} cancels {:?}", mover.name(), power_up.kind);
            return Ok(next);
        }
        self.ensure_accepts_moves()?;

        let mut next = self.begin_transition();
        match power_up.kind {
            PowerUpKind::TimeTwist => {
                let bonus = next.config.time_twist_bonus_seconds;
                let timer = next.timers.get_mut(mover);
                *timer = timer.saturating_add(bonus);
                consume_power_up(next.player_mut(mover), id);
                let name = next.player(mover).name.clone();
                next.announce(format!("{name} used Time Twist! +{bonus}s"));
                return Ok(next);
            }
            PowerUpKind::SpectralMove => {}
            PowerUpKind::GhostlyPawn => next.status = GameStatus::PlacingPawn,
            PowerUpKind::GhastlyPossession => next.status = GameStatus::PossessingPiece,
            PowerUpKind::EtherealEscape => {
                if !self.is_in_check() {
                    return Err(TransitionError::NotInCheck);
                }
                next.status = GameStatus::EscapingCheck;
            }
            PowerUpKind::Seance => {
                if self.player(mover).stolen_piece.is_none() {
                    return Err(TransitionError::NoStolenPiece);
                }
                next.status = GameStatus::PlacingStolenPiece;
            }
        }
        next.active_power_up = Some(power_up);
        let name = next.player(mover).name.clone();
        next.announce(format!(
            "{name} activated {}! {}",
            power_up.kind.name(),
            power_up.kind.description()
        ));
        debug!("{} arms {:?}, status {:?}", mover.name(), power_up.kind, next.status);
        Ok(next)
    }

    /// Ghostly Pawn: summon a pawn on an empty square of the mover's second rank.
    pub fn submit_pawn_placement(&self, at: Position) -> Result<GameState, TransitionError> {
        self.ensure_phase(GameStatus::PlacingPawn)?;
        let mover = self.current_player;
        if !at.is_on_board() || at.row != mover.pawn_home_row() || !self.board.is_empty_at(at) {
            return Err(TransitionError::InvalidPlacement(at));
        }

        let mut next = self.begin_transition();
        let id = next.allocate_piece_id();
        next.board.set(at, Some(Piece::new(id, PieceKind::Pawn, mover)));
        if leaves_king_in_check(&next.board, mover) {
            return Err(TransitionError::InvalidPlacement(at));
        }
        debug!("{} summons a pawn on {}", mover.name(), at);
        Ok(next.end_turn(Some(PieceKind::Pawn), None))
    }

    /// Ghastly Possession: move an enemy pawn or knight without capturing.
    pub fn submit_possession_move(&self, from: Position, to: Position) -> Result<GameState, TransitionError> {
        self.ensure_phase(GameStatus::PossessingPiece)?;
        let mover = self.current_player;
        let victim = mover.opposite();
        let target = self.own_piece_at(from, victim)?;
        if !is_legal_possession_move(&self.board, from, to) {
            return Err(TransitionError::IllegalMove { from, to });
        }
        // A possessed pawn may not be walked onto its own promotion rank.
        if target.kind == PieceKind::Pawn && to.row == victim.promotion_row() {
            return Err(TransitionError::IllegalMove { from, to });
        }

        let (board, _) = self.board.move_piece(from, to);
        if leaves_king_in_check(&board, mover) {
            return Err(TransitionError::IllegalMove { from, to });
        }
        let mut next = self.begin_transition();
        next.board = board;
        debug!("{} possesses {:?} {}{}", mover.name(), target.kind, from, to);
        Ok(next.end_turn(None, None))
    }

    /// Ethereal Escape: teleport the checked king to one of `escape_squares`.
    pub fn submit_escape_square<R: Rng + ?Sized>(
        &self,
        to: Position,
        rng: &mut R,
    ) -> Result<GameState, TransitionError> {
        self.ensure_phase(GameStatus::EscapingCheck)?;
        let mover = self.current_player;
        let Some(king) = self.board.king_position(mover) else {
            return Err(TransitionError::InvalidPlacement(to));
        };
        if !self.escape_squares().contains(&to) {
            return Err(TransitionError::IllegalMove { from: king, to });
        }

        let mut next = self.begin_transition();
        let (board, captured) = self.board.move_piece(king, to);
        next.board = board;
        next.last_capture = captured.map(|_| to);
        if let Some(taken) = captured {
            next.credit_capture(mover, taken, rng);
        }
        debug!("{} king escapes {}{}", mover.name(), king, to);
        Ok(next.end_turn(Some(PieceKind::King), captured))
    }

    /// Seance: return the mover's stolen piece to an empty square of their
    /// first two ranks.
    pub fn submit_stolen_piece_restore(&self, at: Position) -> Result<GameState, TransitionError> {
        self.ensure_phase(GameStatus::PlacingStolenPiece)?;
        let mover = self.current_player;
        let Some(piece) = self.player(mover).stolen_piece else {
            return Err(TransitionError::NoStolenPiece);
        };
        let own_ranks = at.row == mover.back_row() || at.row == mover.pawn_home_row();
        if !at.is_on_board() || !own_ranks || !self.board.is_empty_at(at) {
            return Err(TransitionError::InvalidPlacement(at));
        }
        // Pawns never rest on a back rank.
        if piece.kind == PieceKind::Pawn && at.row == mover.back_row() {
            return Err(TransitionError::InvalidPlacement(at));
        }

        let mut next = self.begin_transition();
        next.board.set(at, Some(piece));
        if leaves_king_in_check(&next.board, mover) {
            return Err(TransitionError::InvalidPlacement(at));
        }
        next.player_mut(mover).stolen_piece = None;
        let name = next.player(mover).name.clone();
        next.announce(format!("{name}'s {:?} returns from beyond!", piece.kind));
        Ok(next.end_turn(Some(piece.kind), None))
    }

    /// Take a non-king piece of `victim` off the board into that player's
    /// escrow, where a later Seance can bring it back. Does not pass the turn.
    pub fn steal_piece(&self, victim: Color, at: Position) -> Result<GameState, TransitionError> {
        self.ensure_accepts_moves()?;
        if self.player(victim).stolen_piece.is_some() {
            return Err(TransitionError::EscrowOccupied(victim));
        }
        let piece = self.own_piece_at(at, victim)?;
        if piece.kind == PieceKind::King {
            return Err(TransitionError::InvalidPlacement(at));
        }

        let mut next = self.begin_transition();
        next.board.set(at, None);
        next.player_mut(victim).stolen_piece = Some(piece);
        let name = next.player(victim).name.clone();
        next.announce(format!("{name}'s {:?} was stolen!", piece.kind));
        let verdict = evaluate_position(&next.board, next.current_player, next.moves_remaining);
        next.apply_verdict(verdict);
        debug!("{:?} stolen from {} on {}", piece.kind, victim.name(), at);
        Ok(next)
    }

    /// `Playing` or `Check` for the side to move, ignoring any pending phase.
    fn resting_status(&self) -> GameStatus {
        if self.is_in_check() {
            GameStatus::Check
        } else {
            GameStatus::Playing
        }
    }
}

/// Status a power-up parks the game in while it waits for its completion.
fn pending_status(kind: PowerUpKind) -> Option<GameStatus> {
    match kind {
        PowerUpKind::GhostlyPawn => Some(GameStatus::PlacingPawn),
        PowerUpKind::GhastlyPossession => Some(GameStatus::PossessingPiece),
        PowerUpKind::EtherealEscape => Some(GameStatus::EscapingCheck),
        PowerUpKind::Seance => Some(GameStatus::PlacingStolenPiece),
        PowerUpKind::SpectralMove | PowerUpKind::TimeTwist => None,
    }
}

#[inline]
fn leaves_king_in_check(board: &Board, mover: Color) -> bool {
    is_king_in_check(board, mover)
}
