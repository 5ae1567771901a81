//! Combat stat block and the additive modifications passives make to it.
//!
//! Passives never store closures. A boost is described by a [`StatDelta`]
//! (which field, by how much) and applied through [`apply_delta`]; removing the
//! boost applies the inverse delta.

use strum::EnumCount;

use crate::state::Element;

/// Current combat stats of a character.
///
/// There is no separate base block: boosts mutate these values directly and
/// revert them on expiry, so every consumer (aggro seeding, scheduling) reads
/// the current values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatStats {
    pub health: f32,

    pub physical_attack: f32,
    pub magical_attack: f32,

    pub physical_defense: f32,
    pub magical_defense: f32,

    /// Initiative gained per scheduling round. Must stay positive.
    pub speed: f32,

    /// Percentages.
    pub crit_chance: f32,
    pub crit_damage: f32,
    pub evasion_rate: f32,

    /// Indexed by [`Element::index`].
    pub elemental_res: [f32; Element::COUNT],
}

impl CombatStats {
    pub const DEFAULT_HEALTH: f32 = 100.0;
    pub const DEFAULT_SPEED: f32 = 100.0;

    /// Reads a single stat.
    pub fn get(&self, field: StatField) -> f32 {
        match field {
            StatField::Health => self.health,
            StatField::PhysicalAttack => self.physical_attack,
            StatField::MagicalAttack => self.magical_attack,
            StatField::PhysicalDefense => self.physical_defense,
            StatField::MagicalDefense => self.magical_defense,
            StatField::Speed => self.speed,
            StatField::CritChance => self.crit_chance,
            StatField::CritDamage => self.crit_damage,
            StatField::Evasion => self.evasion_rate,
            StatField::Resistance(element) => self.elemental_res[element.index()],
        }
    }

    /// Aggro a character generates on everyone else at encounter start.
    pub fn base_aggro(&self) -> f32 {
        self.physical_attack + self.magical_attack
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_attack(mut self, physical: f32, magical: f32) -> Self {
        self.physical_attack = physical;
        self.magical_attack = magical;
        self
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            health: Self::DEFAULT_HEALTH,
            physical_attack: 10.0,
            magical_attack: 10.0,
            physical_defense: 1.0,
            magical_defense: 1.0,
            speed: Self::DEFAULT_SPEED,
            crit_chance: 5.0,
            crit_damage: 150.0,
            evasion_rate: 1.0,
            elemental_res: [0.0; Element::COUNT],
        }
    }
}

/// Selects the stat a boost modifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatField {
    Health,
    PhysicalAttack,
    MagicalAttack,
    PhysicalDefense,
    MagicalDefense,
    Speed,
    CritChance,
    CritDamage,
    Evasion,
    Resistance(Element),
}

/// A signed change to one stat.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatDelta {
    pub field: StatField,
    pub delta: f32,
}

impl StatDelta {
    pub const fn new(field: StatField, delta: f32) -> Self {
        Self { field, delta }
    }

    /// The delta that undoes this one.
    pub fn inverse(self) -> Self {
        Self {
            field: self.field,
            delta: -self.delta,
        }
    }

    pub fn apply_to(self, stats: &mut CombatStats) {
        apply_delta(stats, self.field, self.delta);
    }
}

/// Adds `delta` to the stat selected by `field`.
pub fn apply_delta(stats: &mut CombatStats, field: StatField, delta: f32) {
    let slot = match field {
        StatField::Health => &mut stats.health,
        StatField::PhysicalAttack => &mut stats.physical_attack,
        StatField::MagicalAttack => &mut stats.magical_attack,
        StatField::PhysicalDefense => &mut stats.physical_defense,
        StatField::MagicalDefense => &mut stats.magical_defense,
        StatField::Speed => &mut stats.speed,
        StatField::CritChance => &mut stats.crit_chance,
        StatField::CritDamage => &mut stats.crit_damage,
        StatField::Evasion => &mut stats.evasion_rate,
        StatField::Resistance(element) => &mut stats.elemental_res[element.index()],
    };

    *slot += delta;
}
