//! Broadcast channels split by [`Topic`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{CombatEvent, LogEvent, TurnEvent};

/// Channel an [`Event`] is published on.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Turn sequencing
    Turn,
    /// Health, deaths, animations, passives and the encounter outcome
    Combat,
    /// Human-readable combat log
    Log,
}

/// Any runtime event, tagged by the topic it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Turn(TurnEvent),
    Combat(CombatEvent),
    Log(LogEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Turn(_) => Topic::Turn,
            Event::Combat(_) => Topic::Combat,
            Event::Log(_) => Topic::Log,
        }
    }
}

/// One broadcast channel per [`Topic`].
///
/// Clones publish to and subscribe from the same channels. A receiver that
/// falls more than the capacity behind gets `RecvError::Lagged`.
#[derive(Clone)]
pub struct EventBus {
    turn: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
    log: broadcast::Sender<Event>,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// `capacity` is per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turn: broadcast::channel(capacity).0,
            combat: broadcast::channel(capacity).0,
            log: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Combat => &self.combat,
            Topic::Log => &self.log,
        }
    }

    /// Sends `event` on its topic and returns how many receivers got it.
    ///
    /// Publishing with nobody listening is normal and returns 0.
    pub fn publish(&self, event: Event) -> usize {
        let topic = event.topic();

        match self.sender(topic).send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::trace!(?topic, "event dropped, no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// One receiver per requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
