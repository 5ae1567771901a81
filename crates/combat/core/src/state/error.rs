//! Roster errors.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::CharacterId;

/// Errors raised while registering or looking up characters.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RosterError {
    /// The id does not belong to any registered character.
    #[error("unknown character {id} (roster holds {len} characters)")]
    UnknownCharacter { id: CharacterId, len: usize },

    /// All ids have been handed out.
    #[error("character id overflow (registered: {registered})")]
    IdOverflow { registered: usize },

    /// Characters join only while the encounter is idle.
    #[error("cannot register characters once the encounter has started")]
    EncounterStarted,
}

impl CombatError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Producers referencing missing characters are bugs, not player mistakes
            RosterError::UnknownCharacter { .. } => ErrorSeverity::Internal,
            RosterError::IdOverflow { .. } => ErrorSeverity::Fatal,
            RosterError::EncounterStarted => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RosterError::UnknownCharacter { .. } => "ROSTER_UNKNOWN_CHARACTER",
            RosterError::IdOverflow { .. } => "ROSTER_ID_OVERFLOW",
            RosterError::EncounterStarted => "ROSTER_ENCOUNTER_STARTED",
        }
    }
}
