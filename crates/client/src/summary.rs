//! End-of-encounter report printed as JSON.
use serde::Serialize;

use combat_core::{CharacterId, Roster, Side};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Survivor {
    pub id: CharacterId,
    pub name: String,
    pub side: Side,
    pub health: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncounterSummary {
    /// `None` when the turn limit stopped the encounter.
    pub winner: Option<Side>,
    pub turns: u64,
    pub survivors: Vec<Survivor>,
}

impl EncounterSummary {
    pub fn new(winner: Option<Side>, turns: u64, roster: &Roster) -> Self {
        let survivors = roster
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| Survivor {
                id: c.id,
                name: c.name.clone(),
                side: c.side,
                health: c.stats.health,
            })
            .collect();

        Self {
            winner,
            turns,
            survivors,
        }
    }
}
