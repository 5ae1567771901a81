//! Simulation worker that owns the authoritative [`combat_core::Encounter`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), feeds
//! inputs to the encounter one at a time through a FIFO queue, and publishes
//! every resulting notification to the EventBus.

use std::collections::VecDeque;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use combat_core::{
    CharacterId, CharacterTemplate, CombatInput, Encounter, Notification, Roster, RosterError,
};

use crate::api::DispatchReport;
use crate::events::{CombatEvent, Event, EventBus, extract_event};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Register a character in the encounter.
    Register {
        template: CharacterTemplate,
        reply: oneshot::Sender<Result<CharacterId, RosterError>>,
    },
    /// Feed an input and drain every input it leads to.
    Dispatch {
        input: CombatInput,
        reply: oneshot::Sender<DispatchReport>,
    },
    /// Query the roster (read-only).
    QueryRoster { reply: oneshot::Sender<Roster> },
    /// Drop the roster and return to idle.
    Reset { reply: oneshot::Sender<()> },
}

/// Background task that processes encounter commands.
///
/// Inputs are handled strictly one at a time: the encounter's own advance
/// requests (and, with `auto_ack_animations`, animation acknowledgements) are
/// appended to the same queue as the input that caused them.
pub struct SimulationWorker {
    encounter: Encounter,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    queue: VecDeque<CombatInput>,
    auto_ack_animations: bool,
    outcome_published: bool,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        encounter: Encounter,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        auto_ack_animations: bool,
    ) -> Self {
        info!(
            characters = encounter.roster().len(),
            auto_ack_animations, "SimulationWorker initialized"
        );

        Self {
            encounter,
            command_rx,
            event_bus,
            queue: VecDeque::new(),
            auto_ack_animations,
            outcome_published: false,
        }
    }

    /// Main worker loop. Ends once every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!("SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Register { template, reply } => {
                let result = self.encounter.register_template(template);
                if reply.send(result).is_err() {
                    debug!("Register reply channel closed (caller dropped)");
                }
            }
            Command::Dispatch { input, reply } => {
                let report = self.process(input);
                if reply.send(report).is_err() {
                    debug!("Dispatch reply channel closed (caller dropped)");
                }
            }
            Command::QueryRoster { reply } => {
                if reply.send(self.encounter.roster().clone()).is_err() {
                    debug!("QueryRoster reply channel closed (caller dropped)");
                }
            }
            Command::Reset { reply } => {
                self.encounter.reset();
                self.queue.clear();
                self.outcome_published = false;
                if reply.send(()).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Dispatches `input`, then everything queued behind it.
    ///
    /// Stops draining once a side has won; inputs still queued are dropped.
    fn process(&mut self, input: CombatInput) -> DispatchReport {
        self.queue.push_back(input);
        let mut produced = Vec::new();

        while let Some(next) = self.queue.pop_front() {
            let notifications = self.encounter.dispatch(next);
            let turn = self.encounter.engine().turns_begun();

            for notification in &notifications {
                match notification {
                    Notification::EncounterAdvanceRequested => {
                        self.queue.push_back(CombatInput::Advance);
                    }
                    Notification::PlayAnimation { .. } if self.auto_ack_animations => {
                        self.queue.push_back(CombatInput::AnimationPlaybackFinished);
                    }
                    _ => {}
                }
                self.event_bus.publish(extract_event(notification, turn));
            }
            produced.extend(notifications);

            if self.encounter.outcome().is_some() {
                self.publish_outcome();
                if !self.queue.is_empty() {
                    debug!(dropped = self.queue.len(), "encounter decided, dropping queued inputs");
                    self.queue.clear();
                }
                break;
            }
        }

        DispatchReport {
            notifications: produced,
            phase: self.encounter.phase().clone(),
            outcome: self.encounter.outcome(),
            turns_begun: self.encounter.engine().turns_begun(),
        }
    }

    fn publish_outcome(&mut self) {
        let Some(winner) = self.encounter.outcome() else {
            return;
        };
        if self.outcome_published {
            return;
        }

        let turns = self.encounter.engine().turns_begun();
        info!(%winner, turns, "encounter decided");
        self.event_bus
            .publish(Event::Combat(CombatEvent::EncounterOutcome { winner, turns }));
        self.outcome_published = true;
    }
}
