//! Single entry point for hosts.

use std::collections::VecDeque;

use tracing::debug;

use crate::config::CombatConfig;
use crate::cycle::{CycleError, TurnCycle, TurnPhase};
use crate::engine::CombatEngine;
use crate::error::log_rejection;
use crate::event::{CombatInput, Notification};
use crate::state::{Character, CharacterId, CharacterTemplate, Roster, RosterError, Side};

/// One combat session: the engine owning the roster plus the turn cycle
/// sequencing it.
///
/// Hosts register characters, send [`CombatInput::StartEncounter`], then keep
/// feeding inputs through [`Encounter::dispatch`]. Rejected inputs are logged
/// and leave the encounter untouched; they are never returned to the caller.
#[derive(Clone, Debug, Default)]
pub struct Encounter {
    engine: CombatEngine,
    cycle: TurnCycle,
}

impl Encounter {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            engine: CombatEngine::new(config),
            cycle: TurnCycle::new(),
        }
    }

    /// Adds a character. Only allowed while idle: aggro is seeded by
    /// [`CombatInput::StartEncounter`].
    pub fn register(&mut self, character: Character) -> Result<CharacterId, RosterError> {
        if self.cycle.phase() != &TurnPhase::Idle {
            return Err(RosterError::EncounterStarted);
        }

        self.engine.register(character)
    }

    pub fn register_template(
        &mut self,
        template: CharacterTemplate,
    ) -> Result<CharacterId, RosterError> {
        self.register(template.build())
    }

    /// Handles one input and returns what it produced, in emission order.
    pub fn dispatch(&mut self, input: CombatInput) -> Vec<Notification> {
        match self.cycle.handle(&mut self.engine, input) {
            Ok(notifications) => notifications,
            Err(CycleError::OutOfPhase { input, phase }) => {
                debug!(input, phase, "ignoring input outside its phase");
                Vec::new()
            }
            Err(err) => {
                log_rejection(&err);
                Vec::new()
            }
        }
    }

    /// Dispatches `input`, then answers every advance request with
    /// [`CombatInput::Advance`] in the order the requests were emitted.
    ///
    /// Returns once the encounter waits on something other than itself:
    /// player intents or animation acknowledgements.
    pub fn dispatch_and_advance(&mut self, input: CombatInput) -> Vec<Notification> {
        let mut queue = VecDeque::from([input]);
        let mut notifications = Vec::new();

        while let Some(next) = queue.pop_front() {
            for notification in self.dispatch(next) {
                if notification == Notification::EncounterAdvanceRequested {
                    queue.push_back(CombatInput::Advance);
                }
                notifications.push(notification);
            }
        }

        notifications
    }

    pub fn phase(&self) -> &TurnPhase {
        self.cycle.phase()
    }

    pub fn engine(&self) -> &CombatEngine {
        &self.engine
    }

    pub fn roster(&self) -> &Roster {
        self.engine.roster()
    }

    /// The winning side once every character of the other side is dead.
    ///
    /// The encounter keeps running regardless; stopping is up to the host.
    pub fn outcome(&self) -> Option<Side> {
        let roster = self.engine.roster();
        [Side::Player, Side::Enemy].into_iter().find(|&side| {
            let opponent = side.opponent();
            roster.living(side).next().is_some()
                && roster.iter().any(|c| c.side == opponent)
                && roster.living(opponent).next().is_none()
        })
    }

    /// Ends the encounter: the roster is dropped and the cycle returns to idle.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.cycle.reset();
        debug!("encounter reset");
    }
}
