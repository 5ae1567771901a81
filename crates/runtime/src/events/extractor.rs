//! Event extraction from encounter notifications.

use combat_core::Notification;

use super::bus::Event;
use super::types::{CombatEvent, LogEvent, TurnEvent};

/// Maps one encounter notification to the event published for it.
///
/// `turn` is the number of turns begun so far; it stamps log lines.
pub fn extract_event(notification: &Notification, turn: u64) -> Event {
    match notification.clone() {
        Notification::TurnBegan { character, side } => {
            Event::Turn(TurnEvent::Began { character, side })
        }
        Notification::SpellListRefreshed {
            character,
            castable,
        } => Event::Turn(TurnEvent::AwaitingIntent {
            character,
            castable,
        }),
        Notification::SystemUpdated => Event::Turn(TurnEvent::Resolved),
        Notification::EncounterAdvanceRequested => Event::Turn(TurnEvent::AdvanceRequested),
        Notification::CombatLog { text } => Event::Log(LogEvent { turn, text }),
        Notification::HealthChanged { character, health } => {
            Event::Combat(CombatEvent::HealthChanged { character, health })
        }
        Notification::PlayAnimation { character, kind } => {
            Event::Combat(CombatEvent::Animation { character, kind })
        }
        Notification::CharacterDied { character } => {
            Event::Combat(CombatEvent::Died { character })
        }
        Notification::PassiveExpired { character, passive } => {
            Event::Combat(CombatEvent::PassiveExpired { character, passive })
        }
        Notification::PassiveActivated { character, passive } => {
            Event::Combat(CombatEvent::PassiveActivated { character, passive })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Topic;
    use combat_core::{CharacterId, Side};

    #[test]
    fn notifications_land_on_their_topic() {
        let cases = [
            (
                Notification::TurnBegan {
                    character: CharacterId(0),
                    side: Side::Player,
                },
                Topic::Turn,
            ),
            (
                Notification::CombatLog {
                    text: "x".to_owned(),
                },
                Topic::Log,
            ),
            (
                Notification::CharacterDied {
                    character: CharacterId(2),
                },
                Topic::Combat,
            ),
            (Notification::EncounterAdvanceRequested, Topic::Turn),
        ];

        for (notification, topic) in cases {
            assert_eq!(extract_event(&notification, 3).topic(), topic);
        }
    }
}
