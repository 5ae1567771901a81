//! Headless combat client.
//!
//! Loads a roster and combat tuning from the content directory, plays the
//! encounter with [`FirstSpellProvider`] driving the players, prints the
//! combat log as it happens and a JSON summary at the end.
//!
//! ```bash
//! COMBAT_ROSTER=skirmish RUST_LOG=debug cargo run -p combat-client
//! ```
mod config;
mod logging;
mod summary;

use anyhow::{Context, Result};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use combat_content::{ConfigLoader, ContentFactory};
use combat_runtime::{Event, FirstSpellProvider, Runtime, RuntimeConfig, RuntimeError, Topic};

use config::ClientConfig;
use summary::EncounterSummary;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    info!(data_dir = %config.data_dir.display(), roster = %config.roster, "Starting combat client");

    let factory = ContentFactory::new(&config.data_dir);
    let combat = match &config.combat_config {
        Some(path) => ConfigLoader::load(path)?,
        None => factory.load_config()?,
    };
    let roster = factory
        .load_roster(&config.roster)
        .with_context(|| format!("loading roster '{}'", config.roster))?;

    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            combat,
            event_buffer_size: config.event_buffer,
            ..RuntimeConfig::default()
        })
        .roster(roster)
        .player_provider(FirstSpellProvider)
        .build()
        .await?;

    let printer = tokio::spawn(print_log(runtime.handle().subscribe(Topic::Log)));

    let winner = match runtime.run(config.max_turns).await {
        Ok(winner) => Some(winner),
        Err(RuntimeError::TurnLimitReached { turns }) => {
            warn!(turns, "encounter stopped without a winner");
            None
        }
        Err(err) => return Err(err.into()),
    };

    let roster = runtime.handle().query_roster().await?;
    let turns = runtime.turns_begun();

    runtime.shutdown().await?;
    printer.await?;

    let summary = EncounterSummary::new(winner, turns, &roster);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Prints combat log lines until the runtime shuts down.
async fn print_log(mut log_rx: broadcast::Receiver<Event>) {
    loop {
        match log_rx.recv().await {
            Ok(Event::Log(entry)) => println!("[turn {:>3}] {}", entry.turn, entry.text),
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "log printer fell behind"),
            Err(RecvError::Closed) => break,
        }
    }
}
