//! Deterministic turn-based combat rules.
//!
//! `combat-core` owns one encounter at a time: initiative scheduling, spell
//! resolution, passive effects and aggro-driven enemy targeting. Hosts talk to
//! it only through [`Encounter::dispatch`], sending [`CombatInput`]s and
//! reading back [`Notification`]s. Replaying the same inputs against the same
//! roster always produces the same notifications.
pub mod config;
pub mod cycle;
pub mod encounter;
pub mod engine;
pub mod error;
pub mod event;
pub mod state;
pub mod stats;

pub use config::CombatConfig;
pub use cycle::{CycleError, IntentError, SelectionProgress, TargetSelection, TurnCycle, TurnPhase};
pub use encounter::Encounter;
pub use engine::{CastError, CombatEngine, PendingCast, TurnError};
pub use error::{CombatError, ErrorContext, ErrorSeverity, log_rejection};
pub use event::{AnimationKind, CombatInput, Notification};
pub use state::{
    Character, CharacterId, CharacterTemplate, DamageType, Element, Passive, PassiveDuration,
    PassiveType, PlayingStatus, Roster, RosterError, Side, Spell, SpellRef, TriggerType,
};
pub use stats::{CombatStats, StatDelta, StatField, apply_delta};
