//! Runner configuration from environment variables.

use std::env;
use std::path::PathBuf;

use tracing::Level;

use crate::core::GameConfig;
use crate::profile_store::JsonProfileStore;
use crate::types::GameMode;

/// Default number of fixed ticks before the runner gives up (10 minutes of play).
pub const DEFAULT_MAX_TICKS: u32 = 37_500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub seed: Option<u64>,
    /// Overrides the profile's mode when set.
    pub mode: Option<GameMode>,
    /// Overrides the profile's starting level when set.
    pub starting_level: Option<u32>,
    pub max_ticks: u32,
    pub profile_path: PathBuf,
    pub log_level: Level,
}

impl RunnerConfig {
    /// Create from environment variables
    ///
    /// - `BLOCKFALL_SEED`: bag seed (random when unset)
    /// - `BLOCKFALL_MODE`: `marathon`, `sprint[:lines]`, `ultra[:seconds]`
    /// - `BLOCKFALL_LEVEL`: starting level
    /// - `BLOCKFALL_MAX_TICKS`: tick budget for one run
    /// - `BLOCKFALL_PROFILE_PATH`: profile JSON file
    /// - `BLOCKFALL_LOG`: `error`, `warn`, `info`, `debug` or `trace`
    ///
    /// Values that fail to parse are ignored.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`RunnerConfig::from_env`] with variables read through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let seed = var("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let mode = var("BLOCKFALL_MODE").and_then(|s| GameMode::from_str(&s));

        let starting_level = var("BLOCKFALL_LEVEL").and_then(|s| s.trim().parse().ok());

        let max_ticks = var("BLOCKFALL_MAX_TICKS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_TICKS);

        let log_level = var("BLOCKFALL_LOG")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(Level::INFO);

        let profile_path = var("BLOCKFALL_PROFILE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(JsonProfileStore::default_path);

        Self {
            seed,
            mode,
            starting_level,
            max_ticks,
            profile_path,
            log_level,
        }
    }

    /// Session settings: profile preferences with the overrides applied.
    pub fn game_config(&self, base: GameConfig) -> GameConfig {
        GameConfig {
            seed: self.seed.or(base.seed),
            mode: self.mode.unwrap_or(base.mode),
            starting_level: self.starting_level.unwrap_or(base.starting_level),
            ..base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_runner_config_parses_vars() {
        let config = RunnerConfig::from_vars(vars(&[
            ("BLOCKFALL_SEED", " 42 "),
            ("BLOCKFALL_MODE", "sprint:10"),
            ("BLOCKFALL_LEVEL", "3"),
            ("BLOCKFALL_MAX_TICKS", "900"),
            ("BLOCKFALL_PROFILE_PATH", "/tmp/p.json"),
            ("BLOCKFALL_LOG", "debug"),
        ]));

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.mode, Some(GameMode::Sprint { target_lines: 10 }));
        assert_eq!(config.starting_level, Some(3));
        assert_eq!(config.max_ticks, 900);
        assert_eq!(config.profile_path, PathBuf::from("/tmp/p.json"));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_runner_config_ignores_bad_values() {
        let config = RunnerConfig::from_vars(vars(&[
            ("BLOCKFALL_SEED", "abc"),
            ("BLOCKFALL_MODE", "zen"),
            ("BLOCKFALL_MAX_TICKS", "0"),
            ("BLOCKFALL_LOG", "loud"),
        ]));

        assert_eq!(config.seed, None);
        assert_eq!(config.mode, None);
        assert_eq!(config.starting_level, None);
        assert_eq!(config.max_ticks, DEFAULT_MAX_TICKS);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_overrides_apply_on_top_of_profile() {
        let config = RunnerConfig {
            seed: Some(5),
            mode: Some(GameMode::sprint()),
            starting_level: None,
            max_ticks: 10,
            profile_path: PathBuf::from("profile.json"),
            log_level: Level::WARN,
        };
        let base = GameConfig::default().with_starting_level(4);
        let merged = config.game_config(base);

        assert_eq!(merged.seed, Some(5));
        assert_eq!(merged.mode, GameMode::sprint());
        assert_eq!(merged.starting_level, 4);
        assert!(merged.ghost_enabled);
    }
}
