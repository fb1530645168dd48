//! Match snapshot.
//!
//! `GameState` is an immutable-by-convention value: every transition in
//! `state_machine` clones the previous snapshot, edits the clone, and hands
//! it back whole, so a rejected intent never leaves a half-applied state.

use log::info;
use serde::{Deserialize, Serialize};

use crate::chess_errors::TransitionError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::match_config::MatchConfig;
use crate::game_state::player_state::PlayerState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{get_all_legal_moves, get_ethereal_escape_moves};
use crate::move_generation::termination::{DrawReason, Verdict};
use crate::power_ups::power_up_types::PowerUp;

/// State-machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Playing,
    /// Playing, with the side to move in check.
    Check,
    Checkmate,
    Draw,
    Timeout,
    /// A pawn reached the far rank and waits for a promotion choice.
    Promotion,
    PlacingPawn,
    PossessingPiece,
    EscapingCheck,
    PlacingStolenPiece,
}

impl GameStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Draw | GameStatus::Timeout)
    }

    /// Ordinary moves, power-up activation and clock ticks happen only here.
    #[inline]
    pub const fn accepts_moves(self) -> bool {
        matches!(self, GameStatus::Playing | GameStatus::Check)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameResult {
    Win(Color),
    Draw,
}

/// A pawn waiting on the far rank. The capture made by the promoting move is
/// credited once the choice arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPromotion {
    pub position: Position,
    pub color: Color,
    pub captured: Option<Piece>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub message: String,
    /// Changes on every new announcement so the UI can re-trigger effects.
    pub key: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    pub white: PlayerState,
    pub black: PlayerState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timers {
    pub white: u32,
    pub black: u32,
}

impl Timers {
    #[inline]
    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current_player: Color,
    /// Counts down once per full move pair; reset by pawn moves and captures.
    pub moves_remaining: u16,
    pub players: Players,
    pub status: GameStatus,
    pub gameover: bool,
    pub winner: Option<GameResult>,
    pub draw_reason: Option<DrawReason>,
    pub promotion_pending: Option<PendingPromotion>,
    pub timers: Timers,
    pub last_capture: Option<Position>,
    /// Power-up armed by the side to move, still held until end of turn.
    pub active_power_up: Option<PowerUp>,
    /// Completed half-moves.
    pub move_count: u32,
    pub announcement: Option<Announcement>,
    pub config: MatchConfig,
    pub(crate) next_piece_id: u32,
    pub(crate) next_power_up_id: u32,
    pub(crate) announcement_seq: u64,
}

impl GameState {
    /// Fresh match from the standard setup, white to move.
    pub fn new_match(
        white: PlayerState,
        black: PlayerState,
        config: MatchConfig,
    ) -> Self {
        info!(
            "new match: {} (white) vs {} (black), {}s clocks",
            white.name, black.name, config.timer_seconds
        );
        Self::with_board(Board::initial(), Color::White, white, black, config)
    }

    /// Custom position with default player records. Status reflects whether
    /// `side_to_move` starts in check.
    pub fn from_board(board: Board, side_to_move: Color, config: MatchConfig) -> Self {
        Self::with_board(
            board,
            side_to_move,
            PlayerState::new("White", Color::White, 1),
            PlayerState::new("Black", Color::Black, 1),
            config,
        )
    }

    fn with_board(
        board: Board,
        side_to_move: Color,
        white: PlayerState,
        black: PlayerState,
        config: MatchConfig,
    ) -> Self {
        let next_piece_id = board.pieces().map(|(_, p)| p.id + 1).max().unwrap_or(0);
        let status = if is_king_in_check(&board, side_to_move) {
            GameStatus::Check
        } else {
            GameStatus::Playing
        };
        Self {
            board,
            current_player: side_to_move,
            moves_remaining: config.move_limit,
            players: Players { white, black },
            status,
            gameover: false,
            winner: None,
            draw_reason: None,
            promotion_pending: None,
            timers: Timers {
                white: config.timer_seconds,
                black: config.timer_seconds,
            },
            last_capture: None,
            active_power_up: None,
            move_count: 0,
            announcement: None,
            config,
            next_piece_id,
            next_power_up_id: 0,
            announcement_seq: 0,
        }
    }

    #[inline]
    pub fn player(&self, color: Color) -> &PlayerState {
        match color {
            Color::White => &self.players.white,
            Color::Black => &self.players.black,
        }
    }

    #[inline]
    pub fn player_mut(&mut self, color: Color) -> &mut PlayerState {
        match color {
            Color::White => &mut self.players.white,
            Color::Black => &mut self.players.black,
        }
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        is_king_in_check(&self.board, self.current_player)
    }

    /// Legal ordinary moves for the side to move under the armed power-up.
    pub fn legal_moves(&self) -> Vec<ChessMove> {
        if self.gameover || !self.status.accepts_moves() {
            return Vec::new();
        }
        get_all_legal_moves(
            &self.board,
            self.current_player,
            self.active_power_up.map(|p| p.kind),
        )
    }

    pub fn escape_squares(&self) -> Vec<Position> {
        get_ethereal_escape_moves(&self.board, self.current_player)
    }

    pub(crate) fn ensure_accepts_moves(&self) -> Result<(), TransitionError> {
        if self.gameover {
            return Err(TransitionError::GameOver);
        }
        if !self.status.accepts_moves() {
            return Err(TransitionError::WrongPhase(self.status));
        }
        Ok(())
    }

    pub(crate) fn ensure_phase(&self, expected: GameStatus) -> Result<(), TransitionError> {
        if self.gameover {
            return Err(TransitionError::GameOver);
        }
        if self.status != expected {
            return Err(TransitionError::WrongPhase(self.status));
        }
        Ok(())
    }

    /// Clone for editing, dropping the previous transient announcement.
    pub(crate) fn begin_transition(&self) -> GameState {
        let mut next = self.clone();
        next.announcement = None;
        next
    }

    pub(crate) fn announce(&mut self, message: impl Into<String>) {
        self.announcement_seq += 1;
        self.announcement = Some(Announcement {
            message: message.into(),
            key: self.announcement_seq,
        });
    }

    pub(crate) fn allocate_piece_id(&mut self) -> u32 {
        let id = self.next_piece_id;
        self.next_piece_id += 1;
        id
    }

    pub(crate) fn allocate_power_up_id(&mut self) -> u32 {
        let id = self.next_power_up_id;
        self.next_power_up_id += 1;
        id
    }

    /// Write a termination verdict into status, result and game-over flags.
    pub(crate) fn apply_verdict(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Ongoing { in_check } => {
                self.status = if in_check {
                    GameStatus::Check
                } else {
                    GameStatus::Playing
                };
            }
            Verdict::Checkmate { winner } => {
                self.status = GameStatus::Checkmate;
                self.gameover = true;
                self.winner = Some(GameResult::Win(winner));
                info!("checkmate, {} wins after {} half-moves", winner.name(), self.move_count);
            }
            Verdict::Draw(reason) => {
                self.status = GameStatus::Draw;
                self.gameover = true;
                self.winner = Some(GameResult::Draw);
                self.draw_reason = Some(reason);
                info!("draw by {:?} after {} half-moves", reason, self.move_count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_match_starts_with_white_to_move() {
        let state = GameState::new_match(
            PlayerState::new("Alice", Color::White, 1),
            PlayerState::new("Specter", Color::Black, 1),
            MatchConfig::default(),
        );
        assert_eq!(state.current_player, Color::White);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.moves_remaining, 50);
        assert_eq!(state.timers.get(Color::White), 300);
        assert_eq!(state.timers.get(Color::Black), 300);
        assert_eq!(state.next_piece_id, 32);
        assert!(!state.gameover);
        assert_eq!(state.legal_moves().len(), 20);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let state = GameState::from_board(Board::initial(), Color::White, MatchConfig::default());
        let json = serde_json::to_string(&state).expect("state should serialize");
        assert!(json.contains("\"status\":\"playing\""));
        let back: GameState = serde_json::from_str(&json).expect("state should deserialize");
        assert_eq!(back, state);
    }
}
