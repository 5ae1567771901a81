//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive an encounter.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use combat_core::{CharacterTemplate, CombatConfig, CombatInput, Encounter, Side, TurnPhase};

use crate::api::{DispatchReport, IntentProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Acknowledge every animation request as soon as it is emitted.
    pub auto_ack_animations: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            auto_ack_animations: true,
        }
    }
}

/// Result of one [`Runtime::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The encounter is still undecided.
    Running { turns_begun: u64 },
    /// Every character of the other side is dead.
    Decided { winner: Side, turns_begun: u64 },
}

/// Main runtime that orchestrates an encounter
///
/// Design: Runtime owns the worker and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    // Shared handle (can be cloned for clients)
    handle: RuntimeHandle,

    // Player intent provider (injected by user)
    player_provider: Option<Box<dyn IntentProvider>>,

    // Phase and turn count reported by the last dispatch
    phase: TurnPhase,
    turns_begun: u64,

    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Move the encounter forward by whatever it currently waits on.
    ///
    /// Starts the encounter when idle, asks the player provider for intents
    /// on a player turn, and acknowledges pending animations.
    pub async fn step(&mut self) -> Result<Progress> {
        let inputs = match &self.phase {
            TurnPhase::Idle => vec![CombatInput::StartEncounter],
            TurnPhase::PlayerTurn { actor, .. } => {
                let actor = *actor;
                let provider = self
                    .player_provider
                    .as_ref()
                    .ok_or(RuntimeError::ProviderNotSet)?;
                let roster = self.handle.query_roster().await?;
                let mut intents = provider.provide_intents(actor, &roster).await?;
                // Closes the turn if the intents did not.
                intents.push(CombatInput::TurnDoneOrSkip);
                intents
            }
            TurnPhase::AwaitingAnimation { pending } => {
                vec![CombatInput::AnimationPlaybackFinished; *pending]
            }
            TurnPhase::AwaitingNextActor
            | TurnPhase::EnemyTurn { .. }
            | TurnPhase::AwaitingResolution { .. } => vec![CombatInput::Advance],
        };

        let before = self.phase.clone();
        let turns_before = self.turns_begun;
        let mut last = None;
        for input in inputs {
            let report = self.dispatch(input).await?;
            let same_player_turn = report.turns_begun == turns_before
                && matches!(report.phase, TurnPhase::PlayerTurn { .. });
            let decided = report.outcome.is_some();
            last = Some(report);

            if decided || (before.actor().is_some() && !same_player_turn) {
                break;
            }
        }

        let report = match last {
            Some(report) if report.phase != before || !report.notifications.is_empty() => report,
            _ => {
                return Err(RuntimeError::Stalled {
                    phase: before.name(),
                });
            }
        };

        Ok(match report.outcome {
            Some(winner) => Progress::Decided {
                winner,
                turns_begun: report.turns_begun,
            },
            None => Progress::Running {
                turns_begun: report.turns_begun,
            },
        })
    }

    /// Run the encounter until a side wins, giving up after `max_turns` turns.
    pub async fn run(&mut self, max_turns: u64) -> Result<Side> {
        loop {
            match self.step().await? {
                Progress::Decided { winner, .. } => return Ok(winner),
                Progress::Running { turns_begun } if turns_begun >= max_turns => {
                    warn!(turns_begun, "turn limit reached");
                    return Err(RuntimeError::TurnLimitReached {
                        turns: turns_begun,
                    });
                }
                Progress::Running { .. } => {}
            }
        }
    }

    /// Turns begun so far, as reported by the last dispatch.
    pub fn turns_begun(&self) -> u64 {
        self.turns_begun
    }

    /// Phase reported by the last dispatch.
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// Set the player intent provider
    pub fn set_player_provider(&mut self, provider: impl IntentProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    async fn dispatch(&mut self, input: CombatInput) -> Result<DispatchReport> {
        let report = self.handle.dispatch(input).await?;
        debug!(phase = report.phase.name(), produced = report.notifications.len(), "dispatched");
        self.phase = report.phase.clone();
        self.turns_begun = report.turns_begun;
        Ok(report)
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    roster: Vec<CharacterTemplate>,
    player_provider: Option<Box<dyn IntentProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            roster: Vec::new(),
            player_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Characters registered before the worker starts, in order.
    pub fn roster(mut self, roster: Vec<CharacterTemplate>) -> Self {
        self.roster = roster;
        self
    }

    /// Set player intent provider (optional)
    pub fn player_provider(mut self, provider: impl IntentProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let mut encounter = Encounter::new(self.config.combat.clone());
        for template in self.roster {
            encounter.register_template(template)?;
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            encounter,
            command_rx,
            event_bus,
            self.config.auto_ack_animations,
        );
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            player_provider: self.player_provider,
            phase: TurnPhase::Idle,
            turns_begun: 0,
            sim_worker_handle,
        })
    }
}
