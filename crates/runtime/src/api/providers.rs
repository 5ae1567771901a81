//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`IntentProvider`] implementations so an encounter
//! can run with human input, scripted fixtures, or simple policies. Enemies
//! never go through a provider: their turns are resolved by the encounter.
use async_trait::async_trait;
use combat_core::{CharacterId, CombatInput, Roster};

use super::errors::{Result, RuntimeError};

/// Trait for providing a player's intents for one turn.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Scripted/replayed intents
/// - Testing fixtures
#[async_trait]
pub trait IntentProvider: Send + Sync {
    /// Provide the inputs that play `actor`'s turn.
    ///
    /// # Arguments
    /// * `actor` - The player character whose turn it is
    /// * `roster` - Read-only snapshot of the encounter roster
    ///
    /// # Returns
    /// Inputs to dispatch in order. If they leave the turn open, the runtime
    /// closes it with [`CombatInput::TurnDoneOrSkip`].
    async fn provide_intents(&self, actor: CharacterId, roster: &Roster)
    -> Result<Vec<CombatInput>>;
}

/// Casts the first castable spell at the first living opponents.
///
/// Self-only spells target the caster. Skips when nothing is castable or
/// nobody can be targeted.
pub struct FirstSpellProvider;

#[async_trait]
impl IntentProvider for FirstSpellProvider {
    async fn provide_intents(
        &self,
        actor: CharacterId,
        roster: &Roster,
    ) -> Result<Vec<CombatInput>> {
        let character = roster.get(actor).map_err(|e| RuntimeError::Provider {
            actor,
            reason: e.to_string(),
        })?;

        let Some(slot) = character.castable_spells().first().copied() else {
            return Ok(vec![CombatInput::TurnDoneOrSkip]);
        };
        let Some(spell) = character.spell(slot) else {
            return Ok(vec![CombatInput::TurnDoneOrSkip]);
        };

        let targets: Vec<CharacterId> = if spell.self_only {
            vec![actor]
        } else {
            roster
                .living(character.side.opponent())
                .map(|c| c.id)
                .take(spell.nb_targets.max(1))
                .collect()
        };

        if targets.is_empty() {
            return Ok(vec![CombatInput::TurnDoneOrSkip]);
        }

        let mut intents = vec![CombatInput::SpellSelected { slot }];
        intents.extend(
            targets
                .into_iter()
                .map(|target| CombatInput::TargetChosen { target }),
        );
        Ok(intents)
    }
}

/// A provider that always skips the turn.
/// Useful for testing or as a fallback.
pub struct SkipProvider;

#[async_trait]
impl IntentProvider for SkipProvider {
    async fn provide_intents(
        &self,
        _actor: CharacterId,
        _roster: &Roster,
    ) -> Result<Vec<CombatInput>> {
        Ok(vec![CombatInput::TurnDoneOrSkip])
    }
}
