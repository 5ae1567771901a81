//! Errors surfaced while the turn cycle handles an input.

use crate::engine::{CastError, TurnError};
use crate::error::{CombatError, ErrorContext, ErrorSeverity};
use crate::state::{CharacterId, RosterError};

/// A player intent that breaks the selection rules.
///
/// The selection is left as it was so the player can try again.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    #[error("no spell in slot {slot}")]
    UnknownSpell { slot: usize, context: ErrorContext },

    #[error("spell in slot {slot} is on cooldown for {turns_left} more turn(s)")]
    SpellOnCooldown {
        slot: usize,
        turns_left: u32,
        context: ErrorContext,
    },

    #[error("select a spell before choosing targets")]
    NoSpellSelected { context: ErrorContext },

    #[error("self-only spell cannot target {target}")]
    SelfOnlySpell {
        target: CharacterId,
        context: ErrorContext,
    },

    #[error("{target} is already targeted and the spell forbids repeats")]
    TargetAlreadyChosen {
        target: CharacterId,
        context: ErrorContext,
    },

    #[error("{target} is dead")]
    TargetDead {
        target: CharacterId,
        context: ErrorContext,
    },
}

impl CombatError for IntentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            IntentError::SpellOnCooldown { .. }
            | IntentError::NoSpellSelected { .. }
            | IntentError::TargetAlreadyChosen { .. }
            | IntentError::TargetDead { .. } => ErrorSeverity::Recoverable,
            IntentError::UnknownSpell { .. } => ErrorSeverity::Internal,
            IntentError::SelfOnlySpell { .. } => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            IntentError::UnknownSpell { context, .. }
            | IntentError::SpellOnCooldown { context, .. }
            | IntentError::NoSpellSelected { context }
            | IntentError::SelfOnlySpell { context, .. }
            | IntentError::TargetAlreadyChosen { context, .. }
            | IntentError::TargetDead { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            IntentError::UnknownSpell { .. } => "INTENT_UNKNOWN_SPELL",
            IntentError::SpellOnCooldown { .. } => "INTENT_SPELL_ON_COOLDOWN",
            IntentError::NoSpellSelected { .. } => "INTENT_NO_SPELL_SELECTED",
            IntentError::SelfOnlySpell { .. } => "INTENT_SELF_ONLY_SPELL",
            IntentError::TargetAlreadyChosen { .. } => "INTENT_TARGET_ALREADY_CHOSEN",
            IntentError::TargetDead { .. } => "INTENT_TARGET_DEAD",
        }
    }
}

/// Any failure while dispatching an input. Never leaves the encounter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    #[error("input {input} ignored during {phase}")]
    OutOfPhase {
        input: &'static str,
        phase: &'static str,
    },

    #[error(transparent)]
    Intent(#[from] IntentError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Cast(#[from] CastError),
}

impl CombatError for CycleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CycleError::OutOfPhase { .. } => ErrorSeverity::Recoverable,
            CycleError::Intent(inner) => inner.severity(),
            CycleError::Roster(inner) => inner.severity(),
            CycleError::Turn(inner) => inner.severity(),
            CycleError::Cast(inner) => inner.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            CycleError::Intent(inner) => inner.context(),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CycleError::OutOfPhase { .. } => "CYCLE_OUT_OF_PHASE",
            CycleError::Intent(inner) => inner.error_code(),
            CycleError::Roster(inner) => inner.error_code(),
            CycleError::Turn(inner) => inner.error_code(),
            CycleError::Cast(inner) => inner.error_code(),
        }
    }
}
