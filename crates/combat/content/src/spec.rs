//! Content-side descriptions of characters and their passives.

use combat_core::{
    CharacterTemplate, CombatStats, Passive, PassiveDuration, Side, Spell, StatDelta, StatField,
    TriggerType,
};

/// A passive as written in a roster file.
///
/// Resolves through the combat-core passive factories, so content never sets
/// counters or remaining turns by hand.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PassiveSpec {
    /// Applied on attachment, reverted when `duration` runs out.
    StatBoost {
        name: String,
        field: StatField,
        value: f32,
        duration: PassiveDuration,
        #[cfg_attr(feature = "serde", serde(default))]
        hidden: bool,
    },

    /// Applies `value` to `field` each time `trigger` activates it.
    Triggered {
        name: String,
        trigger: TriggerType,
        field: StatField,
        value: f32,
        duration: PassiveDuration,
        /// Triggers per activation; 0 activates on every trigger.
        #[cfg_attr(feature = "serde", serde(default))]
        every: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        hidden: bool,
    },
}

impl PassiveSpec {
    pub fn name(&self) -> &str {
        match self {
            PassiveSpec::StatBoost { name, .. } | PassiveSpec::Triggered { name, .. } => name,
        }
    }

    pub fn build(self) -> Passive {
        let (passive, hidden) = match self {
            PassiveSpec::StatBoost {
                name,
                field,
                value,
                duration,
                hidden,
            } => (Passive::stat_boost(field, value, duration, name), hidden),
            PassiveSpec::Triggered {
                name,
                trigger,
                field,
                value,
                duration,
                every,
                hidden,
            } => (
                Passive::triggered(trigger, StatDelta::new(field, value), duration, name)
                    .every(every),
                hidden,
            ),
        };

        if hidden { passive.hidden() } else { passive }
    }
}

/// A character as written in a roster file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CharacterSpec {
    pub name: String,
    pub side: Side,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: CombatStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<Spell>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passives: Vec<PassiveSpec>,
}

impl CharacterSpec {
    pub fn into_template(self) -> CharacterTemplate {
        CharacterTemplate {
            name: self.name,
            side: self.side,
            stats: self.stats,
            spells: self.spells,
            passives: self.passives.into_iter().map(PassiveSpec::build).collect(),
        }
    }
}
