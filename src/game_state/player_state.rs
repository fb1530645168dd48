//! Per-player bookkeeping: captures, held power-ups and the escrow slot.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{Color, Piece};
use crate::power_ups::power_up_types::{PowerUp, PowerUpKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub color: Color,
    /// Enemy pieces taken by this player, oldest first.
    pub captured_pieces: Vec<Piece>,
    pub level: u32,
    pub power_ups: Vec<PowerUp>,
    /// Audit trail of consumed power-ups.
    pub power_ups_used: Vec<PowerUpKind>,
    /// Piece taken from this player by an event, waiting for a seance.
    pub stolen_piece: Option<Piece>,
}

impl PlayerState {
    pub fn new(name: impl Into<String>, color: Color, level: u32) -> Self {
        Self {
            name: name.into(),
            color,
            captured_pieces: Vec::new(),
            level,
            power_ups: Vec::new(),
            power_ups_used: Vec::new(),
            stolen_piece: None,
        }
    }

    pub fn power_up(&self, id: u32) -> Option<PowerUp> {
        self.power_ups.iter().copied().find(|p| p.id == id)
    }

    pub fn holds(&self, kind: PowerUpKind) -> bool {
        self.power_ups.iter().any(|p| p.kind == kind)
    }
}
