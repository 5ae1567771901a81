//! Topic-based event bus for runtime events.
//!
//! Every notification the encounter produces is republished here, split by
//! topic so consumers subscribe only to what they render.

mod bus;
mod extractor;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use extractor::extract_event;
pub use types::{CombatEvent, LogEvent, TurnEvent};
