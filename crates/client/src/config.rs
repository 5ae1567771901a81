//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings needed to load content and run one encounter headlessly.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and `rosters/`.
    pub data_dir: PathBuf,
    /// Roster file name under `rosters/`, without extension.
    pub roster: String,
    /// Explicit combat tuning file; overrides `data_dir/config.toml`.
    pub combat_config: Option<PathBuf>,
    pub max_turns: u64,
    /// Also write logs to `combat.log` in this directory.
    pub log_dir: Option<PathBuf>,
    pub event_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("crates/combat/content/data"),
            roster: "skirmish".to_owned(),
            combat_config: None,
            max_turns: 500,
            log_dir: None,
            event_buffer: 256,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_DATA_DIR` - Content directory (default: `crates/combat/content/data`)
    /// - `COMBAT_ROSTER` - Roster name (default: `skirmish`)
    /// - `COMBAT_CONFIG` - Combat tuning file (default: `<data dir>/config.toml`)
    /// - `COMBAT_MAX_TURNS` - Turn limit before giving up (default: 500)
    /// - `COMBAT_LOG_DIR` - Directory for a log file (default: stderr only)
    /// - `COMBAT_EVENT_BUFFER` - Per-topic event buffer size (default: 256)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("COMBAT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(roster) = env::var("COMBAT_ROSTER") {
            config.roster = roster;
        }
        config.combat_config = env::var("COMBAT_CONFIG").ok().map(PathBuf::from);

        if let Some(turns) = read_env::<u64>("COMBAT_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }
        config.log_dir = env::var("COMBAT_LOG_DIR").ok().map(PathBuf::from);

        if let Some(capacity) = read_env::<usize>("COMBAT_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
