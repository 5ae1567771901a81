//! Encounter roster loader.
//!
//! Loads the characters of one encounter, players and enemies alike, from RON
//! files written as a list of [`CharacterSpec`]s.

use std::path::Path;

use combat_core::{CharacterTemplate, CombatConfig};

use crate::loaders::{LoadResult, read_file};
use crate::spec::CharacterSpec;

/// Loader for encounter rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file, validated against default tuning.
    ///
    /// RON format: `Vec<CharacterSpec>`. Registration order in the encounter
    /// follows file order.
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterTemplate>> {
        Self::load_with(path, &CombatConfig::default())
    }

    /// Load a roster whose characters must start alive under `config`.
    pub fn load_with(path: &Path, config: &CombatConfig) -> LoadResult<Vec<CharacterTemplate>> {
        let content = read_file(path)?;
        Self::parse_with(&content, config)
            .map_err(|e| anyhow::anyhow!("Failed to load roster {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CharacterTemplate>> {
        Self::parse_with(content, &CombatConfig::default())
    }

    pub fn parse_with(content: &str, config: &CombatConfig) -> LoadResult<Vec<CharacterTemplate>> {
        let specs: Vec<CharacterSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        if specs.is_empty() {
            anyhow::bail!("roster has no characters");
        }

        let mut templates = Vec::with_capacity(specs.len());
        for spec in specs {
            // A character without positive speed would stall the scheduler.
            if !(spec.stats.speed > 0.0) {
                anyhow::bail!(
                    "character '{}' needs a positive speed, got {}",
                    spec.name,
                    spec.stats.speed
                );
            }

            let template = spec.into_template();
            // Initial passives may move health before the first turn.
            let health = template.clone().build().stats.health;
            if health <= config.death_threshold {
                anyhow::bail!(
                    "character '{}' would start dead: health {} is at or below the death threshold {}",
                    template.name,
                    health,
                    config.death_threshold
                );
            }

            templates.push(template);
        }

        Ok(templates)
    }
}
