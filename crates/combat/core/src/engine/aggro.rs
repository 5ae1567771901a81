//! Aggro tables and enemy target selection.

use crate::state::{CharacterId, RosterError, Side, SpellRef};

use super::CombatEngine;

impl CombatEngine {
    /// Seeds every aggro table.
    ///
    /// For each ordered pair of distinct characters (A, B), A's table gets an
    /// entry for B worth B's current physical plus magical attack.
    pub fn seed_aggro(&mut self) {
        let weights: Vec<(CharacterId, f32)> = self
            .roster
            .iter()
            .map(|c| (c.id, c.stats.base_aggro()))
            .collect();

        for character in self.roster.iter_mut() {
            let own = character.id;
            character.aggro = weights
                .iter()
                .filter(|(id, _)| *id != own)
                .copied()
                .collect();
        }
    }

    /// Adds the damage `caster` dealt to `receiver`'s table.
    ///
    /// Aggro never decreases: negative damage (healing) adds nothing, and a
    /// character never holds aggro on itself.
    pub fn record_damage(
        &mut self,
        receiver: CharacterId,
        caster: CharacterId,
        damage: f32,
    ) -> Result<(), RosterError> {
        if receiver == caster {
            return Ok(());
        }

        let table = &mut self.roster.get_mut(receiver)?.aggro;
        *table.entry(caster).or_insert(0.0) += damage.max(0.0);
        Ok(())
    }

    /// Picks the spell and receivers for an enemy's turn.
    ///
    /// Walks the actor's aggro table in ascending id order, keeps living
    /// player characters, and stops after the first spell's `nb_targets`
    /// receivers. Returns `None` when the actor has no spell or nobody qualifies.
    pub fn select_enemy_targets(
        &self,
        actor: CharacterId,
    ) -> Result<Option<(SpellRef, Vec<CharacterId>)>, RosterError> {
        let character = self.roster.get(actor)?;
        let Some(spell) = character.spells.first() else {
            return Ok(None);
        };

        let targets: Vec<CharacterId> = character
            .aggro
            .keys()
            .copied()
            .filter(|&id| {
                self.roster
                    .get(id)
                    .is_ok_and(|c| c.side == Side::Player && c.is_alive())
            })
            .take(spell.nb_targets)
            .collect();

        if targets.is_empty() {
            return Ok(None);
        }

        Ok(Some((SpellRef::new(actor, 0), targets)))
    }
}
