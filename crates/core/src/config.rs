//! Session configuration

use crate::profile::Profile;
use crate::types::GameMode;

/// Settings fixed for the lifetime of a [`GameState`](crate::GameState).
///
/// `restart` keeps the configuration; only session state is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Bag seed. `None` draws one from the OS at construction.
    pub seed: Option<u64>,
    pub mode: GameMode,
    pub starting_level: u32,
    /// Whether `ghost_row` reports a landing row.
    pub ghost_enabled: bool,
    /// Passed through for the audio collaborator.
    pub sound_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            mode: GameMode::Marathon,
            starting_level: 0,
            ghost_enabled: true,
            sound_enabled: true,
        }
    }
}

impl GameConfig {
    /// Player preferences from a stored profile.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            seed: None,
            mode: profile.mode,
            starting_level: profile.starting_level,
            ghost_enabled: profile.ghost_enabled,
            sound_enabled: profile.sound_enabled,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_starting_level(mut self, level: u32) -> Self {
        self.starting_level = level;
        self
    }
}
