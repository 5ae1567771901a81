//! Combat simulation: initiative, aggro and spell resolution.
//!
//! The [`CombatEngine`] exclusively owns the encounter [`Roster`] and the
//! buffered spell cast. It exposes plain synchronous methods; sequencing them
//! into turns is the job of [`crate::cycle::TurnCycle`].

mod aggro;
mod errors;
mod resolve;
mod turns;

pub use errors::{CastError, TurnError};
pub use resolve::PendingCast;

use crate::config::CombatConfig;
use crate::event::Notification;
use crate::state::{Character, CharacterId, Roster, RosterError, TriggerType};

/// Owner of all character data for one encounter.
#[derive(Clone, Debug, Default)]
pub struct CombatEngine {
    roster: Roster,
    config: CombatConfig,
    pending: Option<PendingCast>,
    turns_begun: u64,
}

impl CombatEngine {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            roster: Roster::new(),
            config,
            pending: None,
            turns_begun: 0,
        }
    }

    /// Registers a character for this encounter. See [`Roster::register`].
    pub fn register(&mut self, character: Character) -> Result<CharacterId, RosterError> {
        let id = self.roster.register(character)?;
        tracing::debug!(character = %id, "character registered");
        Ok(id)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[cfg(test)]
    pub(crate) fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn character(&self, id: CharacterId) -> Result<&Character, RosterError> {
        self.roster.get(id)
    }

    /// Number of turns begun since the encounter started.
    pub fn turns_begun(&self) -> u64 {
        self.turns_begun
    }

    /// Opens `actor`'s turn.
    ///
    /// Ticks the actor's passives, advances its spell cooldowns and fires its
    /// turn-start triggers, then announces the turn. If those passives kill
    /// the actor, no `TurnBegan` is emitted and the turn is not counted.
    pub fn begin_turn(&mut self, actor: CharacterId) -> Result<Vec<Notification>, RosterError> {
        let character = self.roster.get_mut(actor)?;
        let health_before = character.stats.health;
        let mut notifications = Vec::new();

        for passive in character.tick_passives() {
            notifications.push(Notification::log(format!(
                "{} is no longer under the effect of {}",
                character.name, passive.name
            )));
            notifications.push(Notification::PassiveExpired {
                character: actor,
                passive: passive.name,
            });
        }

        character.begin_turn();

        for passive in character.fire_trigger(TriggerType::TurnStart) {
            notifications.push(Notification::PassiveActivated {
                character: actor,
                passive,
            });
        }

        notifications.extend(self.settle_health(actor, health_before)?);

        let character = self.roster.get(actor)?;
        if !character.is_alive() {
            tracing::debug!(character = %actor, "actor died before acting");
            return Ok(notifications);
        }

        let side = character.side;
        self.turns_begun += 1;
        tracing::info!(character = %actor, %side, turn = self.turns_begun, "turn began");

        notifications.push(Notification::TurnBegan {
            character: actor,
            side,
        });

        Ok(notifications)
    }

    /// Closes `actor`'s turn by firing its turn-end triggers.
    pub fn end_turn(&mut self, actor: CharacterId) -> Result<Vec<Notification>, RosterError> {
        let character = self.roster.get_mut(actor)?;
        if !character.is_alive() {
            return Ok(Vec::new());
        }

        let health_before = character.stats.health;
        let mut notifications: Vec<_> = character
            .fire_trigger(TriggerType::TurnEnd)
            .into_iter()
            .map(|passive| Notification::PassiveActivated {
                character: actor,
                passive,
            })
            .collect();

        notifications.extend(self.settle_health(actor, health_before)?);
        Ok(notifications)
    }

    /// Reports a health change made by passives since `health_before`, then
    /// applies the death rule.
    pub(crate) fn settle_health(
        &mut self,
        id: CharacterId,
        health_before: f32,
    ) -> Result<Vec<Notification>, RosterError> {
        let health = self.roster.get(id)?.stats.health;
        let mut notifications = Vec::new();
        if health != health_before {
            notifications.push(Notification::HealthChanged {
                character: id,
                health,
            });
        }

        notifications.extend(self.check_death(id)?);
        Ok(notifications)
    }

    /// Marks `id` dead if it is alive with health at or below the death
    /// threshold. Emits the death exactly once.
    pub(crate) fn check_death(&mut self, id: CharacterId) -> Result<Vec<Notification>, RosterError> {
        let death_threshold = self.config.death_threshold;
        let character = self.roster.get_mut(id)?;
        if !character.is_alive() || character.stats.health > death_threshold {
            return Ok(Vec::new());
        }

        character.mark_dead();
        tracing::info!(character = %id, name = %character.name, "character died");
        Ok(vec![
            Notification::log(format!("{} died", character.name)),
            Notification::CharacterDied { character: id },
        ])
    }

    /// Drops the roster and any buffered cast.
    pub fn reset(&mut self) {
        self.roster.clear();
        self.pending = None;
        self.turns_begun = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Character, Passive, PassiveDuration, Side, Spell};
    use crate::stats::{CombatStats, StatDelta, StatField};

    fn engine_with(hero: Character) -> CombatEngine {
        let mut engine = CombatEngine::new(CombatConfig::default());
        engine.register(hero).unwrap();
        engine
            .register(Character::new("Rat", Side::Enemy, CombatStats::default()))
            .unwrap();
        engine.seed_aggro();
        engine
    }

    fn died(notifications: &[Notification], id: CharacterId) -> usize {
        notifications
            .iter()
            .filter(|n| **n == Notification::CharacterDied { character: id })
            .count()
    }

    #[test]
    fn expiring_health_boost_kills_at_turn_start() {
        let mut hero = Character::new("Hero", Side::Player, CombatStats::default().with_health(10.0));
        hero.attach_passive(Passive::stat_boost(
            StatField::Health,
            50.0,
            PassiveDuration::Turns(1),
            "Vigor",
        ));
        let mut engine = engine_with(hero);
        engine
            .resolve_spell(CharacterId(1), CharacterId(0), &Spell::new("Bite", 55.0))
            .unwrap();
        assert!(engine.character(CharacterId(0)).unwrap().is_alive());

        let notifications = engine.begin_turn(CharacterId(0)).unwrap();

        let hero = engine.character(CharacterId(0)).unwrap();
        assert!(!hero.is_alive());
        assert_eq!(hero.speed_units, 0.0);
        assert_eq!(died(&notifications, CharacterId(0)), 1);
        assert!(notifications.contains(&Notification::HealthChanged {
            character: CharacterId(0),
            health: -45.0
        }));
        assert!(
            !notifications
                .iter()
                .any(|n| matches!(n, Notification::TurnBegan { .. }))
        );
        assert_eq!(engine.turns_begun(), 0);
    }

    #[test]
    fn turn_start_poison_kills_without_opening_turn() {
        let mut hero = Character::new("Hero", Side::Player, CombatStats::default().with_health(5.0));
        hero.attach_passive(Passive::triggered(
            TriggerType::TurnStart,
            StatDelta::new(StatField::Health, -10.0),
            PassiveDuration::Permanent,
            "Poison",
        ));
        let mut engine = engine_with(hero);

        let notifications = engine.begin_turn(CharacterId(0)).unwrap();

        assert!(!engine.character(CharacterId(0)).unwrap().is_alive());
        assert_eq!(died(&notifications, CharacterId(0)), 1);
        assert!(
            !notifications
                .iter()
                .any(|n| matches!(n, Notification::TurnBegan { .. }))
        );

        let again = engine.end_turn(CharacterId(0)).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn turn_end_drain_kills_once() {
        let mut hero = Character::new("Hero", Side::Player, CombatStats::default().with_health(3.0));
        hero.attach_passive(Passive::triggered(
            TriggerType::TurnEnd,
            StatDelta::new(StatField::Health, -3.0),
            PassiveDuration::Permanent,
            "Bleed",
        ));
        let mut engine = engine_with(hero);
        let opened = engine.begin_turn(CharacterId(0)).unwrap();
        assert_eq!(died(&opened, CharacterId(0)), 0);

        let notifications = engine.end_turn(CharacterId(0)).unwrap();

        assert_eq!(died(&notifications, CharacterId(0)), 1);
        assert!(!engine.character(CharacterId(0)).unwrap().is_alive());
    }

    #[test]
    fn healthy_turn_start_opens_turn() {
        let hero = Character::new("Hero", Side::Player, CombatStats::default());
        let mut engine = engine_with(hero);

        let notifications = engine.begin_turn(CharacterId(0)).unwrap();

        assert_eq!(
            notifications.last(),
            Some(&Notification::TurnBegan {
                character: CharacterId(0),
                side: Side::Player
            })
        );
        assert_eq!(engine.turns_begun(), 1);
    }
}
