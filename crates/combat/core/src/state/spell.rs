use super::{CharacterId, DamageType, Element};

/// A spell owned by one character.
///
/// Template data is fixed once the character is built; only the cooldown
/// counter changes during a fight. Spells are never shared between characters,
/// they are addressed through a [`SpellRef`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Spell {
    pub name: String,
    pub base_dmg: f32,
    pub base_mana_cost: f32,
    /// Owner turns that must begin after a cast before the spell is castable again.
    pub base_cooldown: u32,
    pub element: Element,
    pub damage_type: DamageType,
    /// The caster is the only valid receiver.
    pub self_only: bool,
    pub nb_targets: usize,
    pub can_target_same_character_multiple_times: bool,

    /// Owner turns begun since the last cast.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub turns_since_last_used: u32,
}

impl Spell {
    pub fn new(name: impl Into<String>, base_dmg: f32) -> Self {
        Self {
            name: name.into(),
            base_dmg,
            ..Self::default()
        }
    }

    pub fn with_cooldown(mut self, base_cooldown: u32) -> Self {
        self.base_cooldown = base_cooldown;
        self
    }

    pub fn with_targets(mut self, nb_targets: usize) -> Self {
        self.nb_targets = nb_targets;
        self
    }

    pub fn with_repeat_targets(mut self) -> Self {
        self.can_target_same_character_multiple_times = true;
        self
    }

    pub fn self_only(mut self) -> Self {
        self.self_only = true;
        self
    }

    pub fn with_element(mut self, element: Element, damage_type: DamageType) -> Self {
        self.element = element;
        self.damage_type = damage_type;
        self
    }

    pub fn is_castable(&self) -> bool {
        self.turns_since_last_used >= self.base_cooldown
    }

    /// Makes the spell immediately castable (encounter start).
    pub(crate) fn ready(&mut self) {
        self.turns_since_last_used = self.base_cooldown;
    }

    pub(crate) fn mark_used(&mut self) {
        self.turns_since_last_used = 0;
    }

    pub(crate) fn on_owner_turn(&mut self) {
        self.turns_since_last_used = self.turns_since_last_used.saturating_add(1);
    }
}

impl Default for Spell {
    fn default() -> Self {
        Self {
            name: "Unknown".to_owned(),
            base_dmg: 1.0,
            base_mana_cost: 0.0,
            base_cooldown: 1,
            element: Element::ElementLess,
            damage_type: DamageType::Physical,
            self_only: false,
            nb_targets: 1,
            can_target_same_character_multiple_times: false,
            turns_since_last_used: 0,
        }
    }
}

/// Stable handle to a spell: the owning character plus the slot in its spell list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellRef {
    pub owner: CharacterId,
    pub slot: usize,
}

impl SpellRef {
    pub const fn new(owner: CharacterId, slot: usize) -> Self {
        Self { owner, slot }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_counts_owner_turns() {
        let mut spell = Spell::new("Meteor", 40.0).with_cooldown(3);
        spell.ready();
        assert!(spell.is_castable());

        spell.mark_used();
        assert_eq!(spell.turns_since_last_used, 0);

        spell.on_owner_turn();
        spell.on_owner_turn();
        assert!(!spell.is_castable());

        spell.on_owner_turn();
        assert!(spell.is_castable());
    }
}
