//! Timed and permanent effects attached to a character.
//!
//! # Duration
//!
//! `remaining_turns` counts the owner's turns. It is decremented once each time
//! the owner's turn begins and the passive is removed when it reaches zero or
//! less. [`Passive::PERMANENT`] (-1) is never decremented.
//!
//! # Effects
//!
//! A stat boost (`CharacterEffect` + `StatBoost`) applies its [`StatDelta`] on
//! attach and the inverse delta on expiry. Other character-effect triggers apply
//! their delta every time the trigger fires enough times to activate, and those
//! applications are kept when the passive expires.

use crate::stats::{StatDelta, StatField};

/// What the passive is attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveType {
    #[default]
    CharacterEffect,
    SpellEffect,
    TurnEffect,
}

/// When the passive acts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerType {
    TurnStart,
    TurnEnd,
    OnHit,
    OnDamageDealt,
    #[default]
    StatBoost,
}

/// Requested lifetime of a passive built by a factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveDuration {
    Turns(u32),
    Permanent,
}

impl PassiveDuration {
    fn remaining_turns(self) -> i32 {
        match self {
            PassiveDuration::Turns(turns) => i32::try_from(turns).unwrap_or(i32::MAX),
            PassiveDuration::Permanent => Passive::PERMANENT,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passive {
    pub kind: PassiveType,
    pub trigger: TriggerType,
    pub name: String,

    /// Owner turns left; [`Passive::PERMANENT`] for no expiry.
    pub remaining_turns: i32,

    /// Triggers needed per activation. 0 activates on every trigger.
    #[cfg_attr(feature = "serde", serde(default))]
    pub trigger_threshold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub triggers_since_activation: u32,

    /// Hidden from the player's view.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hidden: bool,

    #[cfg_attr(feature = "serde", serde(default))]
    pub activations: u32,

    pub effect: Option<StatDelta>,
}

impl Passive {
    pub const PERMANENT: i32 = -1;

    /// Builds a stat boost passive.
    ///
    /// The boost is applied when the passive is attached to a character and
    /// reverted when `duration` runs out.
    pub fn stat_boost(
        field: StatField,
        value: f32,
        duration: PassiveDuration,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind: PassiveType::CharacterEffect,
            trigger: TriggerType::StatBoost,
            name: name.into(),
            remaining_turns: duration.remaining_turns(),
            trigger_threshold: 0,
            triggers_since_activation: 0,
            hidden: false,
            activations: 0,
            effect: Some(StatDelta::new(field, value)),
        }
    }

    /// Builds a character effect that applies `delta` whenever `trigger` activates it.
    pub fn triggered(
        trigger: TriggerType,
        delta: StatDelta,
        duration: PassiveDuration,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind: PassiveType::CharacterEffect,
            trigger,
            name: name.into(),
            remaining_turns: duration.remaining_turns(),
            trigger_threshold: 0,
            triggers_since_activation: 0,
            hidden: false,
            activations: 0,
            effect: Some(delta),
        }
    }

    /// Requires `threshold` triggers per activation.
    pub fn every(mut self, threshold: u32) -> Self {
        self.trigger_threshold = threshold;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn is_permanent(&self) -> bool {
        self.remaining_turns == Self::PERMANENT
    }

    pub fn is_stat_boost(&self) -> bool {
        self.kind == PassiveType::CharacterEffect && self.trigger == TriggerType::StatBoost
    }

    /// Delta to apply on attach, if this passive applies one.
    pub(crate) fn attach_delta(&self) -> Option<StatDelta> {
        if self.is_stat_boost() { self.effect } else { None }
    }

    /// Delta to apply on expiry, if this passive reverts one.
    pub(crate) fn removal_delta(&self) -> Option<StatDelta> {
        self.attach_delta().map(StatDelta::inverse)
    }

    /// Counts one owner turn. Returns true once the passive has expired.
    pub(crate) fn tick(&mut self) -> bool {
        if self.is_permanent() {
            return false;
        }

        self.remaining_turns -= 1;
        self.remaining_turns <= 0
    }

    /// Registers one occurrence of `trigger`. Returns the delta to apply when
    /// this occurrence activates the passive.
    pub(crate) fn register_trigger(&mut self, trigger: TriggerType) -> Option<StatDelta> {
        if self.kind != PassiveType::CharacterEffect
            || self.trigger != trigger
            || trigger == TriggerType::StatBoost
        {
            return None;
        }

        self.triggers_since_activation += 1;
        if self.triggers_since_activation < self.trigger_threshold {
            return None;
        }

        self.triggers_since_activation = 0;
        self.activations += 1;
        self.effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_maps_duration() {
        let timed = Passive::stat_boost(StatField::Speed, 10.0, PassiveDuration::Turns(3), "Haste");
        assert_eq!(timed.remaining_turns, 3);
        assert!(timed.is_stat_boost());

        let permanent =
            Passive::stat_boost(StatField::Speed, 10.0, PassiveDuration::Permanent, "Aura");
        assert!(permanent.is_permanent());
    }

    #[test]
    fn permanent_passive_never_expires() {
        let mut passive =
            Passive::stat_boost(StatField::Health, 5.0, PassiveDuration::Permanent, "Blessing");
        for _ in 0..10 {
            assert!(!passive.tick());
        }
        assert_eq!(passive.remaining_turns, Passive::PERMANENT);
    }

    #[test]
    fn trigger_threshold_debounces_activation() {
        let mut passive = Passive::triggered(
            TriggerType::OnHit,
            StatDelta::new(StatField::PhysicalDefense, 1.0),
            PassiveDuration::Permanent,
            "Thick Skin",
        )
        .every(2);

        assert!(passive.register_trigger(TriggerType::OnHit).is_none());
        assert!(passive.register_trigger(TriggerType::TurnStart).is_none());
        assert!(passive.register_trigger(TriggerType::OnHit).is_some());
        assert_eq!(passive.activations, 1);
        assert_eq!(passive.triggers_since_activation, 0);
    }

    #[test]
    fn stat_boost_ignores_triggers() {
        let mut passive =
            Passive::stat_boost(StatField::Speed, 10.0, PassiveDuration::Turns(2), "Haste");
        assert!(passive.register_trigger(TriggerType::StatBoost).is_none());
        assert_eq!(passive.activations, 0);
    }
}
