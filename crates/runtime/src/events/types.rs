//! Event types for different topics.

use combat_core::{AnimationKind, CharacterId, Side};
use serde::{Deserialize, Serialize};

/// Turn sequencing events (lightweight).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A character's turn began.
    Began { character: CharacterId, side: Side },

    /// The acting player may pick one of these spell slots.
    AwaitingIntent {
        character: CharacterId,
        castable: Vec<usize>,
    },

    /// A cast finished resolving.
    Resolved,

    /// The encounter asked to be advanced.
    AdvanceRequested,
}

/// Events describing what happened to characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    HealthChanged { character: CharacterId, health: f32 },

    Animation {
        character: CharacterId,
        kind: AnimationKind,
    },

    Died { character: CharacterId },

    PassiveExpired {
        character: CharacterId,
        passive: String,
    },

    PassiveActivated {
        character: CharacterId,
        passive: String,
    },

    /// Every character of the losing side is dead.
    EncounterOutcome { winner: Side, turns: u64 },
}

/// One line of the human-readable combat log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Turns begun when the line was written.
    pub turn: u64,
    pub text: String,
}
