//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, roster registration and intent
//! providers so clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

use combat_core::{CharacterId, RosterError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("player intent provider not set")]
    ProviderNotSet,

    #[error("intent provider failed for {actor}: {reason}")]
    Provider { actor: CharacterId, reason: String },

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("encounter made no progress while {phase}")]
    Stalled { phase: &'static str },

    #[error("encounter still undecided after {turns} turns")]
    TurnLimitReached { turns: u64 },
}
