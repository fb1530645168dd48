//! Granting and consuming power-ups.
//!
//! A grant is rolled uniformly over the six kinds, skipping Ethereal Escape
//! when the holder already has one. Grants past capacity are dropped.

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::game_state::chess_types::{Piece, PieceKind};
use crate::game_state::player_state::PlayerState;
use crate::power_ups::power_up_types::{PowerUp, PowerUpKind, ALL_POWER_UP_KINDS};

/// Only captures of non-pawn pieces earn a power-up.
#[inline]
pub fn earns_power_up(captured: &Piece) -> bool {
    captured.kind != PieceKind::Pawn
}

pub fn roll_power_up_kind<R: Rng + ?Sized>(rng: &mut R, holder: &PlayerState) -> PowerUpKind {
    let has_escape = holder.holds(PowerUpKind::EtherealEscape);
    let candidates: Vec<PowerUpKind> = ALL_POWER_UP_KINDS
        .iter()
        .copied()
        .filter(|kind| !(has_escape && *kind == PowerUpKind::EtherealEscape))
        .collect();
    candidates
        .choose(rng)
        .copied()
        .unwrap_or(PowerUpKind::TimeTwist)
}

/// Add `power_up` unless the player is at capacity. Returns whether it was kept.
pub fn grant_power_up(player: &mut PlayerState, power_up: PowerUp, capacity: usize) -> bool {
    if player.power_ups.len() >= capacity {
        debug!(
            "{} is holding {} power-ups; dropping {:?}",
            player.name,
            player.power_ups.len(),
            power_up.kind
        );
        return false;
    }
    player.power_ups.push(power_up);
    true
}

/// Remove the instance with `id` and log its kind in the audit trail.
pub fn consume_power_up(player: &mut PlayerState, id: u32) -> Option<PowerUp> {
    let index = player.power_ups.iter().position(|p| p.id == id)?;
    let power_up = player.power_ups.remove(index);
    player.power_ups_used.push(power_up.kind);
    Some(power_up)
}
