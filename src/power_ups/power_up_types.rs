//! Power-up kinds and held instances.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    /// Next queen/rook/bishop move may pass through one piece.
    SpectralMove,
    /// Adds time to the activator's clock.
    TimeTwist,
    /// Summons a pawn on the activator's second rank.
    GhostlyPawn,
    /// Moves one enemy pawn or knight.
    GhastlyPossession,
    /// Teleports the checked king to a safe adjacent square.
    EtherealEscape,
    /// Returns the stolen piece to the board.
    Seance,
}

pub const ALL_POWER_UP_KINDS: [PowerUpKind; 6] = [
    PowerUpKind::SpectralMove,
    PowerUpKind::TimeTwist,
    PowerUpKind::GhostlyPawn,
    PowerUpKind::GhastlyPossession,
    PowerUpKind::EtherealEscape,
    PowerUpKind::Seance,
];

impl PowerUpKind {
    pub const fn name(self) -> &'static str {
        match self {
            PowerUpKind::SpectralMove => "Spectral Move",
            PowerUpKind::TimeTwist => "Time Twist",
            PowerUpKind::GhostlyPawn => "Ghostly Pawn",
            PowerUpKind::GhastlyPossession => "Ghastly Possession",
            PowerUpKind::EtherealEscape => "Ethereal Escape",
            PowerUpKind::Seance => "Seance",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            PowerUpKind::SpectralMove => {
                "Your next queen, rook or bishop move may phase through one piece."
            }
            PowerUpKind::TimeTwist => "Gain 30 extra seconds on your clock.",
            PowerUpKind::GhostlyPawn => "Summon a pawn onto an empty square of your second rank.",
            PowerUpKind::GhastlyPossession => {
                "Move one enemy pawn or knight without capturing."
            }
            PowerUpKind::EtherealEscape => {
                "While in check, teleport your king to a safe adjacent square."
            }
            PowerUpKind::Seance => "Return your stolen piece to your first two ranks.",
        }
    }
}

/// A held, not yet consumed power-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    #[inline]
    pub const fn new(id: u32, kind: PowerUpKind) -> Self {
        Self { id, kind }
    }
}
