//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! feeding inputs to the encounter or streaming events from specific topics.

use tokio::sync::{broadcast, mpsc, oneshot};

use combat_core::{
    CharacterId, CharacterTemplate, CombatInput, Notification, Roster, Side, TurnPhase,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// What one input produced once the worker drained its queue.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    /// Every notification, in emission order, including those of the
    /// advances and acknowledgements the worker fed back itself.
    pub notifications: Vec<Notification>,
    /// Phase the encounter waits in now.
    pub phase: TurnPhase,
    pub outcome: Option<Side>,
    pub turns_begun: u64,
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Register a character before the encounter starts.
    pub async fn register(&self, template: CharacterTemplate) -> Result<CharacterId> {
        self.request(|reply| Command::Register { template, reply })
            .await?
            .map_err(RuntimeError::from)
    }

    /// Feed one input to the encounter and wait until the worker is idle again.
    pub async fn dispatch(&self, input: CombatInput) -> Result<DispatchReport> {
        self.request(|reply| Command::Dispatch { input, reply }).await
    }

    /// Query the roster (read-only snapshot)
    pub async fn query_roster(&self) -> Result<Roster> {
        self.request(|reply| Command::QueryRoster { reply }).await
    }

    /// Drop the roster and return the encounter to idle.
    pub async fn reset(&self) -> Result<()> {
        self.request(|reply| Command::Reset { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Turn` - Turn sequencing
    /// - `Topic::Combat` - Health, deaths, animations, passives, outcome
    /// - `Topic::Log` - Combat log lines
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use combat_runtime::Topic;
    ///
    /// let mut log_rx = handle.subscribe(Topic::Log);
    /// while let Ok(event) = log_rx.recv().await {
    ///     // Render the line
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
