//! Combat data: characters, their spells and passives, and the encounter roster.
//!
//! The roster is owned by [`crate::engine::CombatEngine`]. Everything outside
//! the engine refers to characters by [`CharacterId`] and to spells by
//! [`SpellRef`], never by reference.
mod character;
mod common;
mod error;
mod passive;
mod roster;
mod spell;

pub use character::{Character, CharacterTemplate};
pub use common::{CharacterId, DamageType, Element, PlayingStatus, Side};
pub use error::RosterError;
pub use passive::{Passive, PassiveDuration, PassiveType, TriggerType};
pub use roster::Roster;
pub use spell::{Spell, SpellRef};
