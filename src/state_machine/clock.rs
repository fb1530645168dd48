//! Match clocks.
//!
//! `GameState::tick_second` is the one-second transition. `MatchClock` turns
//! wall-clock timestamps into whole ticks for the session and keeps the
//! leftover milliseconds for the next call.

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::game_state::game_state::{GameResult, GameState, GameStatus};

impl GameState {
    /// Charge one second to the side to move.
    ///
    /// Returns `None` while the clock is stopped: after game over and in
    /// every pending sub-phase.
    pub fn tick_second(&self) -> Option<GameState> {
        if self.gameover || !self.status.accepts_moves() {
            return None;
        }
        let mover = self.current_player;
        let mut next = self.clone();
        let timer = next.timers.get_mut(mover);
        *timer = timer.saturating_sub(1);
        if *timer == 0 {
            next.status = GameStatus::Timeout;
            next.gameover = true;
            next.winner = Some(GameResult::Win(mover.opposite()));
            info!("{} ran out of time", mover.name());
        }
        Some(next)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MatchClock {
    last_sample: DateTime<Utc>,
    carry_ms: i64,
}

impl MatchClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            last_sample: now,
            carry_ms: 0,
        }
    }

    /// Drop any partial second, e.g. when a pending phase ends.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        self.last_sample = now;
        self.carry_ms = 0;
    }

    /// Whole seconds elapsed since the previous sample.
    pub fn elapsed_ticks(&mut self, now: DateTime<Utc>) -> u32 {
        let delta = (now - self.last_sample).num_milliseconds();
        self.last_sample = now;
        if delta < 0 {
            warn!("wall clock went backwards by {} ms", -delta);
            return 0;
        }
        let total = self.carry_ms + delta;
        self.carry_ms = total % 1000;
        u32::try_from(total / 1000).unwrap_or(u32::MAX)
    }
}
