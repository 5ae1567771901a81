//! Data-driven encounter content and loaders.
//!
//! This crate reads combat content from data files:
//! - Encounter rosters (data-driven via RON)
//! - Combat tuning (data-driven via TOML)
//!
//! Roster files describe characters with [`CharacterSpec`]s, which resolve
//! into combat-core [`combat_core::CharacterTemplate`]s. Nothing here touches
//! a running encounter.

pub mod spec;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use spec::{CharacterSpec, PassiveSpec};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, RosterLoader};
