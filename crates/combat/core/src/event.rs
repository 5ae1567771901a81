//! Messages exchanged between the combat core and its host.
//!
//! The host delivers [`CombatInput`]s one at a time to
//! [`crate::Encounter::dispatch`] and receives the [`Notification`]s each input
//! produced, in emission order. Both are plain values with no acknowledgement
//! semantics.

use crate::state::{CharacterId, Side};

/// Inbound events.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatInput {
    /// Seeds aggro and starts the turn cycle.
    StartEncounter,

    /// The current player picked the spell in this slot of their spell list.
    SpellSelected { slot: usize },

    /// The current player picked a receiver for the selected spell.
    TargetChosen { target: CharacterId },

    /// Finalize the target selection early, or skip the turn when nothing is chosen.
    TurnDoneOrSkip,

    /// The host finished playing one requested animation.
    AnimationPlaybackFinished,

    /// Self-trigger produced by [`Notification::EncounterAdvanceRequested`].
    Advance,
}

/// Visual effect a host should play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AnimationKind {
    /// A spell landed on the character.
    Hit,
    /// Nothing to show; keeps the turn cycle moving when an enemy found no target.
    NoOp,
}

/// Outbound events.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notification {
    TurnBegan {
        character: CharacterId,
        side: Side,
    },

    /// Spells the acting player may pick this turn.
    SpellListRefreshed {
        character: CharacterId,
        castable: Vec<usize>,
    },

    /// Human-readable combat log line.
    CombatLog { text: String },

    HealthChanged {
        character: CharacterId,
        health: f32,
    },

    PlayAnimation {
        character: CharacterId,
        kind: AnimationKind,
    },

    CharacterDied { character: CharacterId },

    /// A timed passive ran out on this character.
    PassiveExpired {
        character: CharacterId,
        passive: String,
    },

    /// A triggered passive activated on this character.
    PassiveActivated {
        character: CharacterId,
        passive: String,
    },

    /// Resolution finished; dependent views should refresh.
    SystemUpdated,

    /// Host must feed [`CombatInput::Advance`] back to the encounter.
    EncounterAdvanceRequested,
}

impl Notification {
    pub(crate) fn log(text: impl Into<String>) -> Self {
        Notification::CombatLog { text: text.into() }
    }
}
