//! Ordinary moves and promotion.

use log::debug;
use rand::Rng;

use crate::chess_errors::TransitionError;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::{GameState, GameStatus, PendingPromotion};
use crate::move_generation::legal_move_checks::is_legal_move;
use crate::power_ups::power_up_grants::{earns_power_up, grant_power_up, roll_power_up_kind};
use crate::power_ups::power_up_types::PowerUp;

impl GameState {
    /// Play `from → to` for the side to move.
    ///
    /// A pawn reaching the far rank parks the game in `Promotion` without
    /// passing the turn. `rng` rolls any power-up earned by a capture.
    pub fn submit_move<R: Rng + ?Sized>(
        &self,
        from: Position,
        to: Position,
        rng: &mut R,
    ) -> Result<GameState, TransitionError> {
        self.ensure_accepts_moves()?;
        let mover = self.current_player;
        let piece = self.own_piece_at(from, mover)?;

        let active = self.active_power_up.map(|p| p.kind);
        if !is_legal_move(&self.board, from, to, active) {
            return Err(TransitionError::IllegalMove { from, to });
        }

        let mut next = self.begin_transition();
        let (board, captured) = self.board.move_piece(from, to);
        next.board = board;
        next.last_capture = captured.map(|_| to);
        debug!("{} plays {}{}", mover.name(), from, to);

        if piece.kind == PieceKind::Pawn && to.row == mover.promotion_row() {
            next.status = GameStatus::Promotion;
            next.promotion_pending = Some(PendingPromotion {
                position: to,
                color: mover,
                captured,
            });
            return Ok(next);
        }

        if let Some(taken) = captured {
            next.credit_capture(mover, taken, rng);
        }
        Ok(next.end_turn(Some(piece.kind), captured))
    }

    /// Resolve a pending promotion. Always counts as a pawn move.
    pub fn submit_promotion_choice<R: Rng + ?Sized>(
        &self,
        kind: PieceKind,
        rng: &mut R,
    ) -> Result<GameState, TransitionError> {
        self.ensure_phase(GameStatus::Promotion)?;
        let Some(pending) = self.promotion_pending else {
            return Err(TransitionError::WrongPhase(self.status));
        };
        if !kind.is_promotion_choice() {
            return Err(TransitionError::InvalidPromotionChoice(kind));
        }
        let Some(pawn) = self.board.get(pending.position) else {
            return Err(TransitionError::NotYourPiece {
                at: pending.position,
                expected: pending.color,
            });
        };

        let mut next = self.begin_transition();
        next.board.set(pending.position, Some(Piece { kind, ..pawn }));
        if let Some(taken) = pending.captured {
            next.credit_capture(pending.color, taken, rng);
        }
        debug!("{} promotes on {} to {:?}", pending.color.name(), pending.position, kind);
        Ok(next.end_turn(Some(PieceKind::Pawn), pending.captured))
    }

    pub(crate) fn own_piece_at(&self, at: Position, color: Color) -> Result<Piece, TransitionError> {
        if !at.is_on_board() {
            return Err(TransitionError::NotYourPiece { at, expected: color });
        }
        self.board
            .get(at)
            .filter(|piece| piece.color == color)
            .ok_or(TransitionError::NotYourPiece { at, expected: color })
    }

    /// Record a capture for `captor` and roll a power-up for non-pawn prey.
    pub(crate) fn credit_capture<R: Rng + ?Sized>(&mut self, captor: Color, taken: Piece, rng: &mut R) {
        self.player_mut(captor).captured_pieces.push(taken);
        if !earns_power_up(&taken) {
            return;
        }
        let kind = roll_power_up_kind(rng, self.player(captor));
        let id = self.allocate_power_up_id();
        let capacity = self.config.power_up_capacity;
        if grant_power_up(self.player_mut(captor), PowerUp::new(id, kind), capacity) {
            let name = self.player(captor).name.clone();
            self.announce(format!("{name} gained {}!", kind.name()));
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::chess_errors::TransitionError;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::{GameResult, GameState, GameStatus};
    use crate::game_state::match_config::MatchConfig;
    use crate::move_generation::legal_move_checks::is_king_in_check;
    use crate::move_generation::termination::DrawReason;
    use crate::power_ups::power_up_types::{PowerUp, PowerUpKind};
    use crate::utils::algebraic::{algebraic_to_position, coordinate_to_move};

    fn sq(name: &str) -> Position {
        algebraic_to_position(name).expect("test square should parse")
    }

    fn piece(id: u32, kind: PieceKind, color: Color) -> Option<Piece> {
        Some(Piece::new(id, kind, color))
    }

    fn play(state: &GameState, mv: &str, rng: &mut StdRng) -> GameState {
        let mv = coordinate_to_move(mv).expect("test move should parse");
        state
            .submit_move(mv.from, mv.to, rng)
            .unwrap_or_else(|e| panic!("{mv} should be accepted: {e}"))
    }

    fn rook_endgame() -> GameState {
        let board = Board::empty()
            .with(sq("e1"), piece(0, PieceKind::King, Color::White))
            .with(sq("a1"), piece(1, PieceKind::Rook, Color::White))
            .with(sq("h2"), piece(2, PieceKind::Pawn, Color::White))
            .with(sq("e8"), piece(3, PieceKind::King, Color::Black))
            .with(sq("a8"), piece(4, PieceKind::Rook, Color::Black))
            .with(sq("h7"), piece(5, PieceKind::Pawn, Color::Black));
        GameState::from_board(board, Color::White, MatchConfig::default())
    }

    fn shuffle_pair(state: &GameState, rng: &mut StdRng) -> GameState {
        let white = if state.board.get(sq("a1")).is_some() { "a1a2" } else { "a2a1" };
        let black = if state.board.get(sq("a8")).is_some() { "a8a7" } else { "a7a8" };
        let after_white = play(state, white, rng);
        play(&after_white, black, rng)
    }

    #[test]
    fn fools_mate_ends_in_checkmate_for_black() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = GameState::from_board(Board::initial(), Color::White, MatchConfig::default());
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            state = play(&state, mv, &mut rng);
        }
        assert!(state.gameover);
        assert_eq!(state.status, GameStatus::Checkmate);
        assert_eq!(state.winner, Some(GameResult::Win(Color::Black)));
        assert_eq!(state.move_count, 4);
    }

    #[test]
    fn rejects_moves_out_of_turn_and_into_check() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = GameState::from_board(Board::initial(), Color::White, MatchConfig::default());
        assert_eq!(
            state.submit_move(sq("e7"), sq("e5"), &mut rng),
            Err(TransitionError::NotYourPiece { at: sq("e7"), expected: Color::White })
        );
        assert_eq!(
            state.submit_move(sq("e2"), sq("e5"), &mut rng),
            Err(TransitionError::IllegalMove { from: sq("e2"), to: sq("e5") })
        );
        assert_eq!(
            state.submit_move(Position::new(9, 9), sq("e5"), &mut rng),
            Err(TransitionError::NotYourPiece { at: Position::new(9, 9), expected: Color::White })
        );

        let pinned = GameState::from_board(
            Board::empty()
                .with(sq("e1"), piece(0, PieceKind::King, Color::White))
                .with(sq("e2"), piece(1, PieceKind::Knight, Color::White))
                .with(sq("e8"), piece(2, PieceKind::Rook, Color::Black))
                .with(sq("a8"), piece(3, PieceKind::King, Color::Black)),
            Color::White,
            MatchConfig::default(),
        );
        assert!(pinned.submit_move(sq("e2"), sq("c3"), &mut rng).is_err());
    }

    #[test]
    fn every_accepted_move_leaves_mover_out_of_check() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = rook_endgame();
        for mv in state.legal_moves() {
            let next = state
                .submit_move(mv.from, mv.to, &mut rng)
                .expect("generated move should be accepted");
            assert!(!is_king_in_check(&next.board, Color::White));
        }
    }

    #[test]
    fn quiet_moves_exhaust_the_counter_after_fifty_pairs() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = rook_endgame();
        for _ in 0..49 {
            state = shuffle_pair(&state, &mut rng);
        }
        assert!(!state.gameover);
        assert_eq!(state.moves_remaining, 1);

        let after_white = play(&state, if state.board.get(sq("a1")).is_some() { "a1a2" } else { "a2a1" }, &mut rng);
        assert_eq!(after_white.moves_remaining, 1);
        assert!(!after_white.gameover);

        let done = shuffle_pair(&state, &mut rng);
        assert!(done.gameover);
        assert_eq!(done.status, GameStatus::Draw);
        assert_eq!(done.draw_reason, Some(DrawReason::MoveLimit));
        assert_eq!(done.winner, Some(GameResult::Draw));
        assert_eq!(done.move_count, 100);
    }

    #[test]
    fn pawn_move_resets_the_counter() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = rook_endgame();
        for _ in 0..10 {
            state = shuffle_pair(&state, &mut rng);
        }
        assert_eq!(state.moves_remaining, 40);
        let state = play(&state, "h2h3", &mut rng);
        assert_eq!(state.moves_remaining, 50);
        let state = play(&state, "a8a6", &mut rng);
        assert_eq!(state.moves_remaining, 49);
    }

    #[test]
    fn capture_resets_counter_and_records_the_piece() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut state = rook_endgame();
        for _ in 0..3 {
            state = shuffle_pair(&state, &mut rng);
        }
        // a-file rooks now face each other on a2 and a7.
        assert_eq!(state.moves_remaining, 47);
        let state = play(&state, "a2a7", &mut rng);
        assert_eq!(state.moves_remaining, 50);
        assert_eq!(state.last_capture, Some(sq("a7")));
        let white = state.player(Color::White);
        assert_eq!(white.captured_pieces.len(), 1);
        assert_eq!(white.captured_pieces[0].kind, PieceKind::Rook);
        assert_eq!(white.power_ups.len(), 1);
        assert!(state.announcement.is_some());
    }

    #[test]
    fn pawn_captures_grant_nothing() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = GameState::from_board(Board::initial(), Color::White, MatchConfig::default());
        for mv in ["e2e4", "d7d5", "e4d5"] {
            state = play(&state, mv, &mut rng);
        }
        let white = state.player(Color::White);
        assert_eq!(white.captured_pieces.len(), 1);
        assert!(white.power_ups.is_empty());
        assert!(state.announcement.is_none());
    }

    #[test]
    fn power_up_grants_respect_capacity() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = rook_endgame();
        for id in 0..3 {
            state.players.white.power_ups.push(PowerUp::new(100 + id, PowerUpKind::TimeTwist));
        }
        for _ in 0..3 {
            state = shuffle_pair(&state, &mut rng);
        }
        let state = play(&state, "a2a7", &mut rng);
        assert_eq!(state.player(Color::White).power_ups.len(), 3);
        assert_eq!(state.player(Color::White).captured_pieces.len(), 1);
    }

    #[test]
    fn promotion_waits_for_a_choice_then_passes_the_turn() {
        let mut rng = StdRng::seed_from_u64(4);
        let board = Board::empty()
            .with(sq("e1"), piece(0, PieceKind::King, Color::White))
            .with(sq("a7"), piece(1, PieceKind::Pawn, Color::White))
            .with(sq("e8"), piece(2, PieceKind::King, Color::Black))
            .with(sq("h5"), piece(3, PieceKind::Rook, Color::Black));
        let mut state = GameState::from_board(board, Color::White, MatchConfig::default());
        state.moves_remaining = 20;

        let pending = play(&state, "a7a8", &mut rng);
        assert_eq!(pending.status, GameStatus::Promotion);
        assert_eq!(pending.current_player, Color::White);
        assert!(pending.promotion_pending.is_some());
        assert!(pending.submit_move(sq("e1"), sq("d1"), &mut rng).is_err());
        assert_eq!(
            pending.submit_promotion_choice(PieceKind::King, &mut rng),
            Err(TransitionError::InvalidPromotionChoice(PieceKind::King))
        );

        let done = pending
            .submit_promotion_choice(PieceKind::Queen, &mut rng)
            .expect("queen promotion should be accepted");
        assert_eq!(done.board.get(sq("a8")).map(|p| p.kind), Some(PieceKind::Queen));
        assert_eq!(done.current_player, Color::Black);
        assert_eq!(done.status, GameStatus::Check);
        assert!(done.promotion_pending.is_none());
        assert_eq!(done.moves_remaining, 50);
    }

    #[test]
    fn promotion_capture_is_credited_on_choice() {
        let mut rng = StdRng::seed_from_u64(4);
        let board = Board::empty()
            .with(sq("e1"), piece(0, PieceKind::King, Color::White))
            .with(sq("a7"), piece(1, PieceKind::Pawn, Color::White))
            .with(sq("b8"), piece(2, PieceKind::Knight, Color::Black))
            .with(sq("h8"), piece(3, PieceKind::King, Color::Black))
            .with(sq("h5"), piece(4, PieceKind::Rook, Color::Black));
        let state = GameState::from_board(board, Color::White, MatchConfig::default());

        let pending = play(&state, "a7b8", &mut rng);
        assert!(pending.player(Color::White).captured_pieces.is_empty());
        let done = pending
            .submit_promotion_choice(PieceKind::Rook, &mut rng)
            .expect("rook promotion should be accepted");
        assert_eq!(done.player(Color::White).captured_pieces.len(), 1);
        assert_eq!(done.player(Color::White).power_ups.len(), 1);
    }

    #[test]
    fn promotion_choice_without_pending_pawn_is_rejected() {
        let mut rng = StdRng::seed_from_u64(4);
        let state = GameState::from_board(Board::initial(), Color::White, MatchConfig::default());
        assert_eq!(
            state.submit_promotion_choice(PieceKind::Queen, &mut rng),
            Err(TransitionError::WrongPhase(GameStatus::Playing))
        );
    }
}
