//! Per-match tunables.
//!
//! Hosts may deserialize a partial JSON document; any missing field keeps
//! its default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chess_errors::ConfigError;
use crate::game_state::chess_rules::{
    GAME_TIMER_SECONDS, MOVE_LIMIT, POWER_UP_CAPACITY, TIME_TWIST_BONUS_SECONDS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub timer_seconds: u32,
    pub move_limit: u16,
    pub power_up_capacity: usize,
    pub time_twist_bonus_seconds: u32,
    /// Upper bound on a single opponent-oracle round trip.
    pub oracle_timeout: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            timer_seconds: GAME_TIMER_SECONDS,
            move_limit: MOVE_LIMIT,
            power_up_capacity: POWER_UP_CAPACITY,
            time_twist_bonus_seconds: TIME_TWIST_BONUS_SECONDS,
            oracle_timeout: Duration::from_secs(5),
        }
    }
}

impl MatchConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
