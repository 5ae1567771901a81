//! Turn-cycle controller.
//!
//! [`TurnCycle`] sequences one encounter as an explicit state machine:
//!
//! ```text
//! Idle ─StartEncounter─▶ AwaitingNextActor ─Advance─▶ PlayerTurn ─commit─┐
//!                              ▲                 └──▶ EnemyTurn ─────────┤
//!                              │                                         ▼
//!                      AwaitingAnimation ◀─Advance── AwaitingResolution ◀┘
//! ```
//!
//! Every transition happens inside [`TurnCycle::handle`]. Whenever the cycle
//! wants to move on by itself it emits
//! [`Notification::EncounterAdvanceRequested`]; the host answers with
//! [`CombatInput::Advance`]. The cycle never owns character data: the
//! [`CombatEngine`] is passed in for every input.

mod errors;
mod selection;

pub use errors::{CycleError, IntentError};
pub use selection::{SelectionProgress, TargetSelection};

use tracing::{debug, info};

use crate::engine::CombatEngine;
use crate::event::{AnimationKind, CombatInput, Notification};
use crate::state::{CharacterId, Side, SpellRef};

/// Where the turn cycle currently stands.
#[derive(Clone, Debug, Default, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    /// Nothing started yet, or the encounter was reset.
    #[default]
    Idle,

    /// Waiting for an advance to pick the next actor.
    AwaitingNextActor,

    /// A player is picking a spell and its targets.
    PlayerTurn {
        actor: CharacterId,
        selection: TargetSelection,
    },

    /// An enemy is choosing its cast. Left within the same step it was entered.
    EnemyTurn { actor: CharacterId },

    /// A cast is buffered and resolves on the next advance.
    AwaitingResolution { actor: CharacterId },

    /// Waiting for the host to finish `pending` animations.
    AwaitingAnimation { pending: usize },
}

impl TurnPhase {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// The character whose turn is in progress, if any.
    pub fn actor(&self) -> Option<CharacterId> {
        match self {
            TurnPhase::PlayerTurn { actor, .. }
            | TurnPhase::EnemyTurn { actor }
            | TurnPhase::AwaitingResolution { actor } => Some(*actor),
            _ => None,
        }
    }
}

/// State machine binding scheduling, selection, resolution and animation.
#[derive(Clone, Debug, Default)]
pub struct TurnCycle {
    phase: TurnPhase,
}

impl TurnCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// Returns the cycle to [`TurnPhase::Idle`].
    pub fn reset(&mut self) {
        self.phase = TurnPhase::Idle;
    }

    /// Handles one input to completion.
    ///
    /// On error the phase and the engine are left as they were, so the same
    /// input can be corrected and sent again.
    pub fn handle(
        &mut self,
        engine: &mut CombatEngine,
        input: CombatInput,
    ) -> Result<Vec<Notification>, CycleError> {
        match (&self.phase, input) {
            (TurnPhase::Idle, CombatInput::StartEncounter) => Ok(self.start(engine)),
            (TurnPhase::AwaitingNextActor, CombatInput::Advance) => self.next_turn(engine),
            (TurnPhase::PlayerTurn { .. }, CombatInput::SpellSelected { slot }) => {
                self.select_spell(engine, slot)
            }
            (TurnPhase::PlayerTurn { .. }, CombatInput::TargetChosen { target }) => {
                self.choose_target(engine, target)
            }
            (TurnPhase::PlayerTurn { .. }, CombatInput::TurnDoneOrSkip) => {
                self.done_or_skip(engine)
            }
            (TurnPhase::AwaitingResolution { .. }, CombatInput::Advance) => {
                Ok(self.resolve(engine))
            }
            (TurnPhase::AwaitingAnimation { .. }, CombatInput::AnimationPlaybackFinished) => {
                Ok(self.animation_finished())
            }
            (phase, input) => Err(CycleError::OutOfPhase {
                input: (&input).into(),
                phase: phase.name(),
            }),
        }
    }

    fn start(&mut self, engine: &mut CombatEngine) -> Vec<Notification> {
        engine.seed_aggro();
        info!(characters = engine.roster().len(), "encounter started");

        self.phase = TurnPhase::AwaitingNextActor;
        vec![Notification::EncounterAdvanceRequested]
    }

    fn next_turn(&mut self, engine: &mut CombatEngine) -> Result<Vec<Notification>, CycleError> {
        let actor = engine.advance_to_next_actor()?;
        let mut notifications = engine.begin_turn(actor)?;

        let character = engine.character(actor)?;
        if !character.is_alive() {
            info!(character = %actor, "turn lost to death");
            notifications.push(Notification::EncounterAdvanceRequested);
            self.phase = TurnPhase::AwaitingNextActor;
            return Ok(notifications);
        }

        match character.side {
            Side::Player => {
                notifications.push(Notification::SpellListRefreshed {
                    character: actor,
                    castable: character.castable_spells(),
                });
                self.phase = TurnPhase::PlayerTurn {
                    actor,
                    selection: TargetSelection::default(),
                };
            }
            Side::Enemy => {
                self.phase = TurnPhase::EnemyTurn { actor };
                notifications.extend(self.run_enemy_turn(engine, actor)?);
            }
        }

        Ok(notifications)
    }

    /// Picks and buffers the enemy's cast, or plays a no-op when nobody qualifies.
    fn run_enemy_turn(
        &mut self,
        engine: &mut CombatEngine,
        actor: CharacterId,
    ) -> Result<Vec<Notification>, CycleError> {
        match engine.select_enemy_targets(actor)? {
            Some((spell, targets)) => self.commit(engine, actor, spell, targets),
            None => {
                debug!(character = %actor, "enemy found no target");
                let mut notifications = engine.end_turn(actor)?;
                notifications.push(Notification::PlayAnimation {
                    character: actor,
                    kind: AnimationKind::NoOp,
                });
                self.phase = TurnPhase::AwaitingAnimation { pending: 1 };
                Ok(notifications)
            }
        }
    }

    fn select_spell(
        &mut self,
        engine: &CombatEngine,
        slot: usize,
    ) -> Result<Vec<Notification>, CycleError> {
        let turn = engine.turns_begun();
        let TurnPhase::PlayerTurn { actor, selection } = &mut self.phase else {
            return Ok(Vec::new());
        };

        let character = engine.character(*actor)?;
        selection.select_spell(character, slot, turn)?;
        debug!(character = %actor, slot, "spell selected");
        Ok(Vec::new())
    }

    fn choose_target(
        &mut self,
        engine: &mut CombatEngine,
        target: CharacterId,
    ) -> Result<Vec<Notification>, CycleError> {
        let turn = engine.turns_begun();
        let TurnPhase::PlayerTurn { actor, selection } = &mut self.phase else {
            return Ok(Vec::new());
        };
        let actor = *actor;

        match selection.choose_target(engine.roster(), target, turn)? {
            SelectionProgress::Incomplete => {
                debug!(character = %actor, %target, "target chosen");
                Ok(Vec::new())
            }
            SelectionProgress::Complete => self.commit_selection(engine, actor),
        }
    }

    fn done_or_skip(&mut self, engine: &mut CombatEngine) -> Result<Vec<Notification>, CycleError> {
        let TurnPhase::PlayerTurn { actor, selection } = &self.phase else {
            return Ok(Vec::new());
        };
        let actor = *actor;

        if selection.has_targets() {
            return self.commit_selection(engine, actor);
        }

        info!(character = %actor, "turn skipped");
        let mut notifications = engine.end_turn(actor)?;
        notifications.push(Notification::EncounterAdvanceRequested);
        self.phase = TurnPhase::AwaitingNextActor;
        Ok(notifications)
    }

    fn commit_selection(
        &mut self,
        engine: &mut CombatEngine,
        actor: CharacterId,
    ) -> Result<Vec<Notification>, CycleError> {
        let TurnPhase::PlayerTurn { selection, .. } = &self.phase else {
            return Ok(Vec::new());
        };
        let Some(spell) = selection.spell() else {
            return Ok(Vec::new());
        };
        let targets = selection.targets().to_vec();

        self.commit(engine, actor, spell, targets)
    }

    /// Buffers the cast and closes the actor's turn.
    fn commit(
        &mut self,
        engine: &mut CombatEngine,
        actor: CharacterId,
        spell: SpellRef,
        targets: Vec<CharacterId>,
    ) -> Result<Vec<Notification>, CycleError> {
        debug!(character = %actor, slot = spell.slot, targets = targets.len(), "cast committed");
        engine.on_spell_cast(actor, targets, spell)?;

        let mut notifications = engine.end_turn(actor)?;
        notifications.push(Notification::EncounterAdvanceRequested);
        self.phase = TurnPhase::AwaitingResolution { actor };
        Ok(notifications)
    }

    fn resolve(&mut self, engine: &mut CombatEngine) -> Vec<Notification> {
        let mut notifications = engine.execute_pending();
        notifications.push(Notification::SystemUpdated);

        let animations = notifications
            .iter()
            .filter(|n| matches!(n, Notification::PlayAnimation { .. }))
            .count();

        if animations == 0 {
            notifications.push(Notification::EncounterAdvanceRequested);
            self.phase = TurnPhase::AwaitingNextActor;
        } else {
            self.phase = TurnPhase::AwaitingAnimation {
                pending: animations,
            };
        }

        notifications
    }

    fn animation_finished(&mut self) -> Vec<Notification> {
        let TurnPhase::AwaitingAnimation { pending } = &mut self.phase else {
            return Vec::new();
        };

        *pending = pending.saturating_sub(1);
        if *pending > 0 {
            return Vec::new();
        }

        self.phase = TurnPhase::AwaitingNextActor;
        vec![Notification::EncounterAdvanceRequested]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::state::{Character, Passive, PassiveDuration, Spell, TriggerType};
    use crate::stats::{CombatStats, StatDelta, StatField};

    fn setup(player_speed: f32, enemy_speed: f32) -> (TurnCycle, CombatEngine) {
        let mut engine = CombatEngine::new(CombatConfig::default());
        engine
            .register(
                Character::new(
                    "Hero",
                    Side::Player,
                    CombatStats::default().with_speed(player_speed),
                )
                .with_spell(Spell::new("Strike", 10.0))
                .with_spell(Spell::new("Cleave", 4.0).with_targets(2)),
            )
            .unwrap();
        engine
            .register(
                Character::new(
                    "Orc",
                    Side::Enemy,
                    CombatStats::default().with_speed(enemy_speed),
                )
                .with_spell(Spell::new("Club", 6.0)),
            )
            .unwrap();
        engine
            .register(Character::new(
                "Wolf",
                Side::Enemy,
                CombatStats::default().with_speed(1.0),
            ))
            .unwrap();
        (TurnCycle::new(), engine)
    }

    fn start(cycle: &mut TurnCycle, engine: &mut CombatEngine) -> Vec<Notification> {
        cycle.handle(engine, CombatInput::StartEncounter).unwrap();
        cycle.handle(engine, CombatInput::Advance).unwrap()
    }

    #[test]
    fn start_requests_an_advance() {
        let (mut cycle, mut engine) = setup(100.0, 50.0);

        let out = cycle.handle(&mut engine, CombatInput::StartEncounter).unwrap();

        assert_eq!(out, vec![Notification::EncounterAdvanceRequested]);
        assert_eq!(cycle.phase(), &TurnPhase::AwaitingNextActor);
        assert_eq!(engine.character(CharacterId(0)).unwrap().aggro.len(), 2);
    }

    #[test]
    fn player_turn_refreshes_spell_list() {
        let (mut cycle, mut engine) = setup(100.0, 50.0);

        let out = start(&mut cycle, &mut engine);

        assert!(out.contains(&Notification::TurnBegan {
            character: CharacterId(0),
            side: Side::Player
        }));
        assert_eq!(
            out.last(),
            Some(&Notification::SpellListRefreshed {
                character: CharacterId(0),
                castable: vec![0, 1]
            })
        );
        assert_eq!(cycle.phase().actor(), Some(CharacterId(0)));
    }

    #[test]
    fn reaching_target_count_commits() {
        let (mut cycle, mut engine) = setup(100.0, 50.0);
        start(&mut cycle, &mut engine);

        cycle
            .handle(&mut engine, CombatInput::SpellSelected { slot: 0 })
            .unwrap();
        let out = cycle
            .handle(
                &mut engine,
                CombatInput::TargetChosen {
                    target: CharacterId(1),
                },
            )
            .unwrap();

        assert_eq!(out, vec![Notification::EncounterAdvanceRequested]);
        assert_eq!(
            cycle.phase(),
            &TurnPhase::AwaitingResolution {
                actor: CharacterId(0)
            }
        );
        // Resolution waits for the advance
        assert_eq!(engine.character(CharacterId(1)).unwrap().stats.health, 100.0);
    }

    #[test]
    fn resolution_waits_for_every_animation() {
        let (mut cycle, mut engine) = setup(100.0, 50.0);
        start(&mut cycle, &mut engine);
        cycle
            .handle(&mut engine, CombatInput::SpellSelected { slot: 1 })
            .unwrap();
        cycle
            .handle(
                &mut engine,
                CombatInput::TargetChosen {
                    target: CharacterId(1),
                },
            )
            .unwrap();
        cycle
            .handle(
                &mut engine,
                CombatInput::TargetChosen {
                    target: CharacterId(2),
                },
            )
            .unwrap();

        let out = cycle.handle(&mut engine, CombatInput::Advance).unwrap();
        assert!(out.contains(&Notification::SystemUpdated));
        assert_eq!(cycle.phase(), &TurnPhase::AwaitingAnimation { pending: 2 });

        let first = cycle
            .handle(&mut engine, CombatInput::AnimationPlaybackFinished)
            .unwrap();
        assert!(first.is_empty());

        let second = cycle
            .handle(&mut engine, CombatInput::AnimationPlaybackFinished)
            .unwrap();
        assert_eq!(second, vec![Notification::EncounterAdvanceRequested]);
        assert_eq!(cycle.phase(), &TurnPhase::AwaitingNextActor);

        let extra = cycle.handle(&mut engine, CombatInput::AnimationPlaybackFinished);
        assert!(matches!(extra, Err(CycleError::OutOfPhase { .. })));
    }

    #[test]
    fn done_with_partial_selection_commits_early() {
        let (mut cycle, mut engine) = setup(100.0, 50.0);
        start(&mut cycle, &mut engine);
        cycle
            .handle(&mut engine, CombatInput::SpellSelected { slot: 1 })
            .unwrap();
        cycle
            .handle(
                &mut engine,
                CombatInput::TargetChosen {
                    target: CharacterId(2),
                },
            )
            .unwrap();

        cycle
            .handle(&mut engine, CombatInput::TurnDoneOrSkip)
            .unwrap();

        assert_eq!(
            engine.pending_cast().map(|c| c.targets.clone()),
            Some(vec![CharacterId(2)])
        );
    }

    #[test]
    fn done_without_targets_skips() {
        let (mut cycle, mut engine) = setup(100.0, 50.0);
        start(&mut cycle, &mut engine);

        let out = cycle
            .handle(&mut engine, CombatInput::TurnDoneOrSkip)
            .unwrap();

        assert_eq!(out, vec![Notification::EncounterAdvanceRequested]);
        assert_eq!(cycle.phase(), &TurnPhase::AwaitingNextActor);
        assert!(engine.pending_cast().is_none());
    }

    #[test]
    fn rejected_intent_keeps_the_selection() {
        let (mut cycle, mut engine) = setup(100.0, 50.0);
        start(&mut cycle, &mut engine);
        cycle
            .handle(&mut engine, CombatInput::SpellSelected { slot: 1 })
            .unwrap();
        cycle
            .handle(
                &mut engine,
                CombatInput::TargetChosen {
                    target: CharacterId(1),
                },
            )
            .unwrap();
        let before = cycle.phase().clone();

        let err = cycle
            .handle(
                &mut engine,
                CombatInput::TargetChosen {
                    target: CharacterId(1),
                },
            )
            .unwrap_err();

        assert!(matches!(
            err,
            CycleError::Intent(IntentError::TargetAlreadyChosen { .. })
        ));
        assert_eq!(cycle.phase(), &before);
    }

    #[test]
    fn enemy_turn_buffers_a_cast_in_the_same_step() {
        let (mut cycle, mut engine) = setup(50.0, 100.0);

        let out = start(&mut cycle, &mut engine);

        assert!(out.contains(&Notification::TurnBegan {
            character: CharacterId(1),
            side: Side::Enemy
        }));
        assert_eq!(out.last(), Some(&Notification::EncounterAdvanceRequested));
        assert_eq!(
            engine.pending_cast().map(|c| c.targets.clone()),
            Some(vec![CharacterId(0)])
        );
    }

    #[test]
    fn enemy_without_target_plays_a_no_op() {
        let (mut cycle, mut engine) = setup(50.0, 100.0);
        cycle
            .handle(&mut engine, CombatInput::StartEncounter)
            .unwrap();
        engine.roster_mut().get_mut(CharacterId(0)).unwrap().mark_dead();

        let out = cycle.handle(&mut engine, CombatInput::Advance).unwrap();

        assert_eq!(
            out.last(),
            Some(&Notification::PlayAnimation {
                character: CharacterId(1),
                kind: AnimationKind::NoOp
            })
        );
        assert_eq!(cycle.phase(), &TurnPhase::AwaitingAnimation { pending: 1 });
    }

    #[test]
    fn actor_killed_at_turn_start_hands_over() {
        let (mut cycle, mut engine) = setup(100.0, 50.0);
        engine
            .roster_mut()
            .get_mut(CharacterId(0))
            .unwrap()
            .attach_passive(Passive::triggered(
                TriggerType::TurnStart,
                StatDelta::new(StatField::Health, -200.0),
                PassiveDuration::Permanent,
                "Curse",
            ));
        cycle
            .handle(&mut engine, CombatInput::StartEncounter)
            .unwrap();

        let out = cycle.handle(&mut engine, CombatInput::Advance).unwrap();

        assert!(out.contains(&Notification::CharacterDied {
            character: CharacterId(0)
        }));
        assert!(!out.iter().any(|n| matches!(n, Notification::TurnBegan { .. })));
        assert_eq!(out.last(), Some(&Notification::EncounterAdvanceRequested));
        assert_eq!(cycle.phase(), &TurnPhase::AwaitingNextActor);
    }

    #[test]
    fn inputs_outside_their_phase_are_rejected() {
        let (mut cycle, mut engine) = setup(100.0, 50.0);

        let err = cycle
            .handle(&mut engine, CombatInput::TurnDoneOrSkip)
            .unwrap_err();
        assert_eq!(
            err,
            CycleError::OutOfPhase {
                input: "turn_done_or_skip",
                phase: "idle"
            }
        );

        cycle
            .handle(&mut engine, CombatInput::StartEncounter)
            .unwrap();
        assert!(cycle
            .handle(&mut engine, CombatInput::StartEncounter)
            .is_err());
    }
}
