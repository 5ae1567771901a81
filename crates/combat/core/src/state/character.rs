use std::collections::BTreeMap;

use tracing::debug;

use super::{CharacterId, Passive, PlayingStatus, Side, Spell, TriggerType};
use crate::stats::CombatStats;

/// A combatant for the duration of one encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    /// Assigned by the roster on registration.
    pub id: CharacterId,
    pub name: String,
    pub side: Side,
    pub status: PlayingStatus,
    pub stats: CombatStats,

    /// Initiative accumulator. Grows by `stats.speed` each scheduling round.
    pub speed_units: f32,

    pub spells: Vec<Spell>,

    /// Insertion order is activation order.
    pub passives: Vec<Passive>,

    /// Aggro other combatants generated on this character, keyed by their id.
    /// Never contains `self.id`.
    pub aggro: BTreeMap<CharacterId, f32>,
}

impl Character {
    pub fn new(name: impl Into<String>, side: Side, stats: CombatStats) -> Self {
        Self {
            id: CharacterId::default(),
            name: name.into(),
            side,
            status: PlayingStatus::Alive,
            stats,
            speed_units: 0.0,
            spells: Vec::new(),
            passives: Vec::new(),
            aggro: BTreeMap::new(),
        }
    }

    pub fn with_spell(mut self, spell: Spell) -> Self {
        self.spells.push(spell);
        self
    }

    /// Attaches a passive while building the character.
    pub fn with_passive(mut self, passive: Passive) -> Self {
        self.attach_passive(passive);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.status == PlayingStatus::Alive
    }

    pub fn is_player(&self) -> bool {
        self.side == Side::Player
    }

    pub fn spell(&self, slot: usize) -> Option<&Spell> {
        self.spells.get(slot)
    }

    /// Slots of every spell currently off cooldown.
    pub fn castable_spells(&self) -> Vec<usize> {
        self.spells
            .iter()
            .enumerate()
            .filter(|(_, spell)| spell.is_castable())
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Attaches a passive, applying stat boosts immediately.
    pub fn attach_passive(&mut self, passive: Passive) {
        if let Some(delta) = passive.attach_delta() {
            delta.apply_to(&mut self.stats);
        }

        self.passives.push(passive);
    }

    /// Counts one owner turn on every timed passive.
    ///
    /// Walks the list back to front so expired entries can be removed in place.
    /// Expired stat boosts are reverted before removal. Returns the removed
    /// passives in removal order; an empty result means nothing changed.
    pub fn tick_passives(&mut self) -> Vec<Passive> {
        let mut removed = Vec::new();

        for index in (0..self.passives.len()).rev() {
            if !self.passives[index].tick() {
                continue;
            }

            let passive = self.passives.remove(index);
            if let Some(delta) = passive.removal_delta() {
                delta.apply_to(&mut self.stats);
            }

            debug!(character = %self.id, passive = %passive.name, "passive expired");
            removed.push(passive);
        }

        removed
    }

    /// Delivers `trigger` to every passive and applies the effects that activate.
    /// Returns the names of the activated passives in list order.
    pub fn fire_trigger(&mut self, trigger: TriggerType) -> Vec<String> {
        let mut activated = Vec::new();

        for passive in &mut self.passives {
            if let Some(delta) = passive.register_trigger(trigger) {
                delta.apply_to(&mut self.stats);
                activated.push(passive.name.clone());
            }
        }

        activated
    }

    /// Bookkeeping done when this character's turn begins: spell cooldowns advance.
    pub(crate) fn begin_turn(&mut self) {
        for spell in &mut self.spells {
            spell.on_owner_turn();
        }
    }

    /// Makes every spell castable. Called on registration.
    pub(crate) fn ready_spells(&mut self) {
        for spell in &mut self.spells {
            spell.ready();
        }
    }

    /// Flags the character dead and freezes its initiative.
    pub(crate) fn mark_dead(&mut self) {
        self.status = PlayingStatus::Dead;
        self.speed_units = 0.0;
    }
}

/// Data used to build a [`Character`] from content files.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTemplate {
    pub name: String,
    pub side: Side,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: CombatStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<Spell>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passives: Vec<Passive>,
}

impl CharacterTemplate {
    /// Builds the character, attaching initial passives in order.
    pub fn build(self) -> Character {
        let mut character = Character::new(self.name, self.side, self.stats);
        character.spells = self.spells;
        for passive in self.passives {
            character.attach_passive(passive);
        }
        character
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PassiveDuration;
    use crate::stats::{StatDelta, StatField};

    fn fighter() -> Character {
        Character::new("Fighter", Side::Player, CombatStats::default())
    }

    #[test]
    fn stat_boost_applies_and_reverts_after_its_duration() {
        let mut character = fighter();
        character.attach_passive(Passive::stat_boost(
            StatField::PhysicalAttack,
            5.0,
            PassiveDuration::Turns(2),
            "War Cry",
        ));
        assert_eq!(character.stats.physical_attack, 15.0);

        assert!(character.tick_passives().is_empty());
        assert_eq!(character.stats.physical_attack, 15.0);

        let removed = character.tick_passives();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].name, "War Cry");
        assert!(character.passives.is_empty());
        assert_eq!(character.stats.physical_attack, 10.0);
    }

    #[test]
    fn ticking_without_timed_passives_changes_nothing() {
        let mut character = fighter().with_passive(Passive::stat_boost(
            StatField::Speed,
            20.0,
            PassiveDuration::Permanent,
            "Swift",
        ));
        let before = character.clone();

        assert!(character.tick_passives().is_empty());
        assert_eq!(character, before);
    }

    #[test]
    fn expiry_keeps_remaining_passives_in_order() {
        let mut character = fighter()
            .with_passive(Passive::stat_boost(
                StatField::Speed,
                1.0,
                PassiveDuration::Turns(1),
                "A",
            ))
            .with_passive(Passive::stat_boost(
                StatField::Speed,
                1.0,
                PassiveDuration::Turns(3),
                "B",
            ))
            .with_passive(Passive::stat_boost(
                StatField::Speed,
                1.0,
                PassiveDuration::Turns(1),
                "C",
            ));

        let removed: Vec<_> = character
            .tick_passives()
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(removed, vec!["C".to_owned(), "A".to_owned()]);
        assert_eq!(character.passives.len(), 1);
        assert_eq!(character.passives[0].name, "B");
        assert_eq!(character.stats.speed, 101.0);
    }

    #[test]
    fn triggered_passive_applies_on_activation() {
        let mut character = fighter().with_passive(Passive::triggered(
            TriggerType::TurnStart,
            StatDelta::new(StatField::Health, 5.0),
            PassiveDuration::Permanent,
            "Regeneration",
        ));
        assert_eq!(character.stats.health, 100.0);

        let activated = character.fire_trigger(TriggerType::TurnStart);
        assert_eq!(activated, vec!["Regeneration".to_owned()]);
        assert_eq!(character.stats.health, 105.0);

        assert!(character.fire_trigger(TriggerType::OnHit).is_empty());
    }

    #[test]
    fn mark_dead_resets_initiative() {
        let mut character = fighter();
        character.speed_units = 640.0;
        character.mark_dead();

        assert!(!character.is_alive());
        assert_eq!(character.speed_units, 0.0);
    }
}
