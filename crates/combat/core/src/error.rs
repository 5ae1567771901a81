//! Shared error plumbing for combat-core.
//!
//! Each module owns its error enum (`RosterError`, `TurnError`, `CastError`,
//! `IntentError`, `CycleError`). They all implement [`CombatError`] so the
//! encounter can classify and log a rejected input uniformly. Errors never
//! leave [`crate::Encounter::dispatch`]: they go through [`log_rejection`]
//! and the encounter state stays as it was.

use crate::state::CharacterId;

/// How a rejected input should be treated by whoever produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// The same player may try again this turn, e.g. a spell still cooling down.
    Recoverable,

    /// The input can never be valid as sent, e.g. a self-only spell aimed elsewhere.
    Validation,

    /// A producer referenced a character or slot that does not exist.
    Internal,

    /// The encounter cannot make progress any more.
    Fatal,
}

impl ErrorSeverity {
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Whether the error points at a bug rather than a player mistake.
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Where in the encounter an error was raised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    pub actor: Option<CharacterId>,

    /// Turns begun when the error was raised.
    pub turn: u64,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(turn: u64) -> Self {
        Self { actor: None, turn }
    }

    #[must_use]
    pub const fn with_actor(mut self, actor: CharacterId) -> Self {
        self.actor = Some(actor);
        self
    }
}

/// Implemented by every combat-core error enum.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Stable identifier of the variant, used as a log field.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Logs an error that was rejected at the event boundary.
///
/// Player mistakes are warnings; broken producers and stalls are errors.
pub fn log_rejection<E: CombatError>(error: &E) {
    let severity = error.severity();
    let actor = error.context().and_then(|ctx| ctx.actor);
    let turn = error.context().map(|ctx| ctx.turn);

    if severity.is_internal() {
        tracing::error!(
            code = error.error_code(),
            severity = severity.label(),
            ?actor,
            ?turn,
            "{error}"
        );
    } else {
        tracing::warn!(
            code = error.error_code(),
            severity = severity.label(),
            ?actor,
            ?turn,
            "{error}"
        );
    }
}
