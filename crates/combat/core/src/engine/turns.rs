//! Initiative scheduler.
//!
//! Every scheduling round, each living character gains its speed in speed
//! units. A character whose speed units strictly exceed the threshold is
//! granted a turn and pays `threshold + 1`, keeping the remainder for later
//! rounds. When several characters qualify, the highest accumulator wins and
//! ties go to the earliest character in roster order.

use crate::state::CharacterId;

use super::{CombatEngine, TurnError};

impl CombatEngine {
    /// Returns the living character entitled to act now, if any.
    ///
    /// Scans in roster order keeping the first strictly greater accumulator.
    pub fn find_next_actor(&self) -> Option<CharacterId> {
        let mut highest = self.config.speed_threshold;
        let mut next = None;

        for character in self.roster.iter().filter(|c| c.is_alive()) {
            if character.speed_units > highest {
                highest = character.speed_units;
                next = Some(character.id);
            }
        }

        next
    }

    /// Selects the next actor, running scheduling rounds until someone
    /// crosses the threshold, and charges it the turn cost.
    pub fn advance_to_next_actor(&mut self) -> Result<CharacterId, TurnError> {
        let mut rounds = 0u64;

        loop {
            if let Some(actor) = self.find_next_actor() {
                let cost = self.config.turn_cost();
                if let Ok(character) = self.roster.get_mut(actor) {
                    character.speed_units -= cost;
                }

                tracing::debug!(character = %actor, rounds, "next actor selected");
                return Ok(actor);
            }

            self.accumulate_initiative()?;
            rounds += 1;
        }
    }

    /// Runs one scheduling round.
    fn accumulate_initiative(&mut self) -> Result<(), TurnError> {
        let living = self.roster.iter().filter(|c| c.is_alive()).count();
        if living == 0 {
            return Err(TurnError::NoLivingCharacters);
        }

        let progressing = self
            .roster
            .iter()
            .any(|c| c.is_alive() && c.stats.speed > 0.0);
        if !progressing {
            tracing::error!(living, "no living character has positive speed");
            return Err(TurnError::Stalled { living });
        }

        for character in self.roster.iter_mut().filter(|c| c.is_alive()) {
            character.speed_units += character.stats.speed;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::state::{Character, Side};
    use crate::stats::CombatStats;

    fn engine_with_speeds(speeds: &[f32]) -> CombatEngine {
        let mut engine = CombatEngine::new(CombatConfig::default());
        for (index, &speed) in speeds.iter().enumerate() {
            engine
                .register(Character::new(
                    format!("C{index}"),
                    Side::Player,
                    CombatStats::default().with_speed(speed),
                ))
                .unwrap();
        }
        engine
    }

    #[test]
    fn faster_characters_act_first() {
        let mut engine = engine_with_speeds(&[100.0, 100.0, 50.0]);

        let order: Vec<_> = (0..5)
            .map(|_| engine.advance_to_next_actor().unwrap())
            .collect();

        assert_eq!(order[0], CharacterId(0));
        assert_eq!(order[1], CharacterId(1));
        assert!(!order[..2].contains(&CharacterId(2)));
        assert!(order.contains(&CharacterId(2)));
    }

    #[test]
    fn ties_go_to_roster_order() {
        let mut engine = engine_with_speeds(&[100.0, 100.0]);

        assert_eq!(engine.advance_to_next_actor().unwrap(), CharacterId(0));
        // Ten rounds: 100 * 10 = 1000 > 999, minus the turn cost of 1000.
        assert_eq!(engine.character(CharacterId(0)).unwrap().speed_units, 0.0);
        assert_eq!(engine.character(CharacterId(1)).unwrap().speed_units, 1000.0);
    }

    #[test]
    fn highest_accumulator_beats_roster_order() {
        let mut engine = engine_with_speeds(&[100.0, 100.0]);
        engine.roster.get_mut(CharacterId(0)).unwrap().speed_units = 1200.0;
        engine.roster.get_mut(CharacterId(1)).unwrap().speed_units = 1300.0;

        assert_eq!(engine.find_next_actor(), Some(CharacterId(1)));
    }

    #[test]
    fn remainder_is_kept_after_acting() {
        let mut engine = engine_with_speeds(&[300.0]);

        engine.advance_to_next_actor().unwrap();
        // Four rounds reach 1200; acting costs 1000.
        assert_eq!(engine.character(CharacterId(0)).unwrap().speed_units, 200.0);
    }

    #[test]
    fn dead_characters_are_never_scheduled() {
        let mut engine = engine_with_speeds(&[500.0, 100.0]);
        engine.roster.get_mut(CharacterId(0)).unwrap().mark_dead();

        for _ in 0..4 {
            assert_eq!(engine.advance_to_next_actor().unwrap(), CharacterId(1));
            assert_eq!(engine.character(CharacterId(0)).unwrap().speed_units, 0.0);
        }
    }

    #[test]
    fn empty_roster_has_no_actor() {
        let mut engine = CombatEngine::new(CombatConfig::default());
        assert_eq!(engine.find_next_actor(), None);
        assert_eq!(
            engine.advance_to_next_actor(),
            Err(TurnError::NoLivingCharacters)
        );
    }

    #[test]
    fn zero_speed_roster_stalls_instead_of_spinning() {
        let mut engine = engine_with_speeds(&[0.0, 0.0]);
        assert_eq!(
            engine.advance_to_next_actor(),
            Err(TurnError::Stalled { living: 2 })
        );
    }
}
