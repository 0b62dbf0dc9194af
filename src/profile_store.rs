//! JSON file implementation of [`ProfileStore`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::core::{Profile, ProfileStore};

#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `BLOCKFALL_PROFILE_PATH`, else `$XDG_CONFIG_HOME/blockfall/profile.json`,
    /// else `~/.config/blockfall/profile.json`.
    pub fn default_path() -> PathBuf {
        if let Some(explicit) = std::env::var_os("BLOCKFALL_PROFILE_PATH") {
            return PathBuf::from(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("blockfall");
        path.push("profile.json");
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Profile> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("reading profile {}", self.path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing profile {}", self.path.display()))
    }
}

impl ProfileStore for JsonProfileStore {
    fn load(&self) -> Profile {
        if !self.path.exists() {
            return Profile::default();
        }
        self.read().unwrap_or_else(|err| {
            warn!("using default profile: {err:#}");
            Profile::default()
        })
    }

    fn save(&mut self, profile: &Profile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let text = serde_json::to_string_pretty(profile).context("encoding profile")?;
        fs::write(&self.path, text)
            .with_context(|| format!("writing profile {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("blockfall-{}-{name}", std::process::id()));
        path.push("profile.json");
        path
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let store = JsonProfileStore::new(temp_path("missing"));
        assert_eq!(store.load(), Profile::default());
    }

    #[test]
    fn test_corrupt_file_loads_defaults() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let store = JsonProfileStore::new(&path);
        assert_eq!(store.load(), Profile::default());
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
