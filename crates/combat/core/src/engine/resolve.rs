//! Spell resolution.
//!
//! Committing a cast and resolving it are separate steps: [`CombatEngine::on_spell_cast`]
//! only buffers the request, and the buffered cast is resolved by
//! [`CombatEngine::execute_pending`] on the next scheduling pass.

use tracing::error;

use crate::event::{AnimationKind, Notification};
use crate::state::{CharacterId, RosterError, Spell, SpellRef, TriggerType};

use super::{CastError, CombatEngine};

/// A committed cast waiting for resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingCast {
    pub caster: CharacterId,
    pub spell: SpellRef,
    /// Receivers in the order they were chosen. May repeat.
    pub targets: Vec<CharacterId>,
}

impl CombatEngine {
    pub fn pending_cast(&self) -> Option<&PendingCast> {
        self.pending.as_ref()
    }

    /// Buffers a cast for resolution and puts the spell on cooldown.
    ///
    /// The cooldown restarts here, at commit time, whatever the resolution
    /// later does. Nothing is changed when the request is rejected.
    pub fn on_spell_cast(
        &mut self,
        caster: CharacterId,
        targets: Vec<CharacterId>,
        spell: SpellRef,
    ) -> Result<(), CastError> {
        if let Some(pending) = &self.pending {
            return Err(CastError::CastPending {
                caster: pending.caster,
            });
        }
        if spell.owner != caster {
            return Err(CastError::ForeignSpell { caster, spell });
        }
        for &target in &targets {
            self.roster.get(target)?;
        }

        self.roster
            .get_mut(caster)?
            .spells
            .get_mut(spell.slot)
            .ok_or(CastError::UnknownSpell { spell })?
            .mark_used();

        self.pending = Some(PendingCast {
            caster,
            spell,
            targets,
        });
        Ok(())
    }

    /// Resolves the buffered cast against each receiver in request order.
    ///
    /// Returns every notification produced, or nothing if no cast was buffered.
    pub fn execute_pending(&mut self) -> Vec<Notification> {
        let Some(cast) = self.pending.take() else {
            return Vec::new();
        };

        let spell = match self
            .roster
            .get(cast.caster)
            .map(|c| c.spell(cast.spell.slot).cloned())
        {
            Ok(Some(spell)) => spell,
            Ok(None) => {
                error!(caster = %cast.caster, slot = cast.spell.slot, "buffered spell vanished");
                return Vec::new();
            }
            Err(err) => {
                error!(%err, "buffered cast references an unknown caster");
                return Vec::new();
            }
        };

        let mut notifications = Vec::new();
        for receiver in cast.targets {
            match self.resolve_spell(cast.caster, receiver, &spell) {
                Ok(produced) => notifications.extend(produced),
                Err(err) => error!(%err, "skipping receiver"),
            }
        }

        notifications
    }

    /// Applies `spell` from `caster` to `receiver`.
    ///
    /// Damage is the spell's base damage; no crit, defense or resistance is
    /// applied. Always ends with a hit animation request for the receiver.
    pub fn resolve_spell(
        &mut self,
        caster: CharacterId,
        receiver: CharacterId,
        spell: &Spell,
    ) -> Result<Vec<Notification>, RosterError> {
        let caster_name = self.roster.get(caster)?.name.clone();
        let damage = spell.base_dmg;

        let target = self.roster.get_mut(receiver)?;
        target.stats.health -= damage;
        let health = target.stats.health;

        let mut notifications = vec![
            Notification::log(format!(
                "{caster_name} casts {} on {} for {damage} damage, {health} health left",
                spell.name, target.name
            )),
            Notification::HealthChanged {
                character: receiver,
                health,
            },
        ];
        notifications.extend(self.check_death(receiver)?);

        let target = self.roster.get_mut(receiver)?;
        if target.is_alive() {
            for passive in target.fire_trigger(TriggerType::OnHit) {
                notifications.push(Notification::PassiveActivated {
                    character: receiver,
                    passive,
                });
            }
            notifications.extend(self.settle_health(receiver, health)?);
        }

        self.record_damage(receiver, caster, damage)?;

        let attacker = self.roster.get_mut(caster)?;
        if attacker.is_alive() {
            let health_before = attacker.stats.health;
            for passive in attacker.fire_trigger(TriggerType::OnDamageDealt) {
                notifications.push(Notification::PassiveActivated {
                    character: caster,
                    passive,
                });
            }
            notifications.extend(self.settle_health(caster, health_before)?);
        }

        notifications.push(Notification::PlayAnimation {
            character: receiver,
            kind: AnimationKind::Hit,
        });

        Ok(notifications)
    }
}
