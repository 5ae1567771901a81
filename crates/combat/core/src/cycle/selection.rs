//! Player spell and target selection.

use crate::error::ErrorContext;
use crate::state::{Character, CharacterId, Roster, SpellRef};

use super::{CycleError, IntentError};

/// Whether a selection has enough targets to be committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionProgress {
    Incomplete,
    Complete,
}

/// The spell and receivers the acting player has picked so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetSelection {
    spell: Option<SpellRef>,
    targets: Vec<CharacterId>,
}

impl TargetSelection {
    pub fn spell(&self) -> Option<SpellRef> {
        self.spell
    }

    pub fn targets(&self) -> &[CharacterId] {
        &self.targets
    }

    pub fn has_targets(&self) -> bool {
        !self.targets.is_empty()
    }

    /// Picks a spell of `actor`. Previously chosen targets are dropped.
    pub(crate) fn select_spell(
        &mut self,
        actor: &Character,
        slot: usize,
        turn: u64,
    ) -> Result<(), IntentError> {
        let context = ErrorContext::new(turn).with_actor(actor.id);
        let spell = actor
            .spell(slot)
            .ok_or(IntentError::UnknownSpell { slot, context: context.clone() })?;

        if !spell.is_castable() {
            return Err(IntentError::SpellOnCooldown {
                slot,
                turns_left: spell.base_cooldown - spell.turns_since_last_used,
                context,
            });
        }

        self.spell = Some(SpellRef::new(actor.id, slot));
        self.targets.clear();
        Ok(())
    }

    /// Adds a receiver for the selected spell.
    ///
    /// Reports [`SelectionProgress::Complete`] once the spell's target count
    /// is reached (a spell always takes at least one target).
    pub(crate) fn choose_target(
        &mut self,
        roster: &Roster,
        target: CharacterId,
        turn: u64,
    ) -> Result<SelectionProgress, CycleError> {
        let Some(spell_ref) = self.spell else {
            return Err(IntentError::NoSpellSelected {
                context: ErrorContext::new(turn),
            }
            .into());
        };

        let context = ErrorContext::new(turn).with_actor(spell_ref.owner);
        let caster = roster.get(spell_ref.owner)?;
        let spell = caster.spell(spell_ref.slot).ok_or(IntentError::UnknownSpell {
            slot: spell_ref.slot,
            context: context.clone(),
        })?;
        let receiver = roster.get(target)?;

        if spell.self_only && target != caster.id {
            return Err(IntentError::SelfOnlySpell { target, context }.into());
        }
        if !receiver.is_alive() {
            return Err(IntentError::TargetDead { target, context }.into());
        }
        if !spell.can_target_same_character_multiple_times && self.targets.contains(&target) {
            return Err(IntentError::TargetAlreadyChosen { target, context }.into());
        }

        self.targets.push(target);

        if self.targets.len() >= spell.nb_targets.max(1) {
            Ok(SelectionProgress::Complete)
        } else {
            Ok(SelectionProgress::Incomplete)
        }
    }
}
