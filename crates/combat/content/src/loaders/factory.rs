//! Content factory for loading encounters from a data directory.

use std::path::{Path, PathBuf};

use combat_core::{CharacterTemplate, CombatConfig};

use crate::loaders::{ConfigLoader, LoadResult, RosterLoader};

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── rosters/
///     ├── skirmish.ron
///     └── ambush.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat tuning from `config.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a roster from `rosters/{name}.ron`, validated against the
    /// directory's `config.toml`.
    pub fn load_roster(&self, name: &str) -> LoadResult<Vec<CharacterTemplate>> {
        let config = self.load_config()?;
        let path = self.data_dir.join("rosters").join(format!("{name}.ron"));
        RosterLoader::load_with(&path, &config)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
