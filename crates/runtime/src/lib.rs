//! Runtime orchestration for the combat simulation.
//!
//! This crate wires together the intent provider abstraction, the event bus
//! and the simulation worker into a cohesive runtime API. Consumers embed
//! [`Runtime`] to drive an encounter, subscribe to events, and query the
//! roster through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    DispatchReport, FirstSpellProvider, IntentProvider, Result, RuntimeError, RuntimeHandle,
    SkipProvider,
};
pub use events::{CombatEvent, Event, EventBus, LogEvent, Topic, TurnEvent, extract_event};
pub use runtime::{Progress, Runtime, RuntimeBuilder, RuntimeConfig};
