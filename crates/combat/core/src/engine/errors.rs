//! Error types for the scheduler and the cast buffer.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::{CharacterId, RosterError, SpellRef};

/// Errors that can occur while selecting the next actor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("no living characters in the roster")]
    NoLivingCharacters,

    /// Every valid character must have positive speed; otherwise nobody can
    /// ever cross the initiative threshold.
    #[error("initiative stalled: none of the {living} living characters has positive speed")]
    Stalled { living: usize },
}

impl CombatError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TurnError::NoLivingCharacters => ErrorSeverity::Validation,
            TurnError::Stalled { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::NoLivingCharacters => "TURN_NO_LIVING_CHARACTERS",
            TurnError::Stalled { .. } => "TURN_STALLED",
        }
    }
}

/// Errors raised when buffering a spell cast.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("character {} has no spell in slot {}", .spell.owner, .spell.slot)]
    UnknownSpell { spell: SpellRef },

    #[error("spell {} does not belong to caster {caster}", .spell.slot)]
    ForeignSpell { caster: CharacterId, spell: SpellRef },

    #[error("a cast by {caster} is already waiting for resolution")]
    CastPending { caster: CharacterId },
}

impl CombatError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CastError::Roster(inner) => inner.severity(),
            CastError::UnknownSpell { .. }
            | CastError::ForeignSpell { .. }
            | CastError::CastPending { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CastError::Roster(inner) => inner.error_code(),
            CastError::UnknownSpell { .. } => "CAST_UNKNOWN_SPELL",
            CastError::ForeignSpell { .. } => "CAST_FOREIGN_SPELL",
            CastError::CastPending { .. } => "CAST_PENDING",
        }
    }
}
