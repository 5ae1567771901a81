//! Combat tuning loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`CombatConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load tuning from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)?;

        if !(config.speed_threshold.is_finite() && config.speed_threshold >= 0.0) {
            anyhow::bail!(
                "speed_threshold must be a non-negative number, got {}",
                config.speed_threshold
            );
        }
        if !config.death_threshold.is_finite() {
            anyhow::bail!("death_threshold must be finite");
        }

        Ok(config)
    }
}
