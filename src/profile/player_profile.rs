//! Persistent player record: name, wins, draws and the level derived from
//! wins. Stored as JSON in an opaque key-value store.

use std::collections::HashMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::chess_errors::ProfileError;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameResult;

pub const PROFILE_STORAGE_KEY: &str = "phantomPawnPlayerProfile";

/// Wins needed for levels 1 through 5.
pub const LEVEL_THRESHOLDS: [u32; 5] = [0, 3, 7, 12, 20];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProfile {
    pub name: String,
    pub wins: u32,
    pub draws: u32,
    pub level: u32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            name: "Player".to_owned(),
            wins: 0,
            draws: 0,
            level: 1,
        }
    }
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Fold a finished match into the record. The profile always plays white.
    pub fn record_result(&mut self, result: GameResult) {
        match result {
            GameResult::Win(Color::White) => self.wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Win(Color::Black) => {}
        }
        self.level = level_for_wins(self.wins);
        info!(
            "profile {}: {} wins, {} draws, level {}",
            self.name, self.wins, self.draws, self.level
        );
    }
}

pub fn level_for_wins(wins: u32) -> u32 {
    LEVEL_THRESHOLDS.iter().filter(|&&needed| wins >= needed).count() as u32
}

/// Opaque string storage, e.g. browser local storage or a settings file.
pub trait ProfileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ProfileError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), ProfileError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryProfileStore {
    entries: HashMap<String, String>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ProfileError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), ProfileError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Load the stored profile. Missing or unreadable data yields the default.
pub fn load_profile(store: &dyn ProfileStore) -> PlayerProfile {
    let raw = match store.get(PROFILE_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return PlayerProfile::default(),
        Err(e) => {
            warn!("profile store unreadable, using default profile: {}", e);
            return PlayerProfile::default();
        }
    };
    match serde_json::from_str::<PlayerProfile>(&raw) {
        Ok(mut profile) => {
            profile.level = level_for_wins(profile.wins);
            profile
        }
        Err(e) => {
            warn!("stored profile is corrupt, using default profile: {}", e);
            PlayerProfile::default()
        }
    }
}

pub fn save_profile(store: &mut dyn ProfileStore, profile: &PlayerProfile) -> Result<(), ProfileError> {
    let raw = serde_json::to_string(profile)?;
    store.set(PROFILE_STORAGE_KEY, raw)
}
