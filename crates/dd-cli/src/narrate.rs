//! Turning game events into console text

use dd_core::GameEvent;

pub const LINE_BREAK: &str = "--------------------------------------------------------------";

/// Text printed for an event, or `None` for events the console keeps silent.
pub fn narrate(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::Challenged { .. } => Some(format!("{LINE_BREAK}\n{event}\n{LINE_BREAK}")),
        GameEvent::TurnStarted { .. } | GameEvent::TurnEnded { .. } => None,
        GameEvent::Hit { .. } | GameEvent::Missed { .. } => Some(event.to_string()),
        GameEvent::Victory { .. } | GameEvent::Defeat { .. } => Some(LINE_BREAK.to_string()),
        GameEvent::Slain { .. } | GameEvent::GameOver { .. } => Some(event.to_string()),
        GameEvent::Abandoned { .. } | GameEvent::PotionFound => {
            Some(format!("{LINE_BREAK}\n{event}"))
        }
    }
}
