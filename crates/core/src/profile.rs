//! Player profile and the persistence seam
//!
//! The engine never touches storage directly. It is handed a [`ProfileStore`],
//! reads the profile once at construction and writes it back when a new high
//! score is reached and when a session ends.

use serde::{Deserialize, Serialize};

use crate::types::GameMode;

/// Lifetime counters kept alongside the high score.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub games_played: u32,
    pub total_lines: u64,
    pub tetrises: u32,
    pub tspins: u32,
    /// Fastest completed sprint, in play-time milliseconds.
    pub best_sprint_ms: Option<u64>,
}

impl Statistics {
    /// Keep the faster of the stored and the new sprint time.
    pub fn record_sprint(&mut self, elapsed_ms: u64) -> bool {
        match self.best_sprint_ms {
            Some(best) if best <= elapsed_ms => false,
            _ => {
                self.best_sprint_ms = Some(elapsed_ms);
                true
            }
        }
    }
}

/// Everything persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub high_score: u32,
    pub starting_level: u32,
    pub mode: GameMode,
    pub ghost_enabled: bool,
    pub sound_enabled: bool,
    pub statistics: Statistics,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            high_score: 0,
            starting_level: 0,
            mode: GameMode::Marathon,
            ghost_enabled: true,
            sound_enabled: true,
            statistics: Statistics::default(),
        }
    }
}

/// Storage collaborator for [`Profile`].
///
/// `load` never fails: a missing or unreadable profile yields defaults.
pub trait ProfileStore {
    fn load(&self) -> Profile;
    fn save(&mut self, profile: &Profile) -> anyhow::Result<()>;
}

/// Store that remembers nothing. Used when no persistence is wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl ProfileStore for NullStore {
    fn load(&self) -> Profile {
        Profile::default()
    }

    fn save(&mut self, _profile: &Profile) -> anyhow::Result<()> {
        Ok(())
    }
}

/// In-memory store for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    profile: Profile,
    saves: usize,
}

impl MemoryStore {
    pub fn new(profile: Profile) -> Self {
        Self { profile, saves: 0 }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Number of successful `save` calls.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Profile {
        self.profile.clone()
    }

    fn save(&mut self, profile: &Profile) -> anyhow::Result<()> {
        self.profile = profile.clone();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprint_record_keeps_fastest() {
        let mut stats = Statistics::default();
        assert!(stats.record_sprint(90_000));
        assert!(!stats.record_sprint(95_000));
        assert!(stats.record_sprint(80_000));
        assert_eq!(stats.best_sprint_ms, Some(80_000));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::default();
        let mut profile = store.load();
        profile.high_score = 4200;
        profile.mode = GameMode::sprint();
        store.save(&profile).unwrap();

        assert_eq!(store.load(), profile);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_partial_profile_json_uses_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"high_score": 12}"#).unwrap();
        assert_eq!(profile.high_score, 12);
        assert!(profile.ghost_enabled);
        assert_eq!(profile.mode, GameMode::Marathon);
        assert_eq!(profile.statistics, Statistics::default());
    }
}
