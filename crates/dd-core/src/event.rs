//! Observable game events
//!
//! The engine reports everything that happens as a [`GameEvent`]; front ends
//! decide how to show it. `Display` gives the standard message text.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::Ability;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A mob opened a battle
    Challenged { enemy: String },
    /// Player is about to act
    TurnStarted { turn: u32 },
    /// An ability landed
    Hit {
        caster: String,
        target: String,
        damage: u32,
        ability: Ability,
    },
    /// An ability missed
    Missed { caster: String, ability: Ability },
    /// Both sides acted and are still standing
    TurnEnded { turn: u32 },
    /// Enemy reduced to zero health
    Victory { enemy: String, turns: u32 },
    /// Player reduced to zero health
    Defeat { enemy: String, turns: u32 },
    /// Player left the battle without finishing it
    Abandoned { enemy: String, turns: u32 },
    /// Post-battle tally in the dungeon
    Slain { enemy: String, wins: u32 },
    /// Player was healed after a victory
    PotionFound,
    /// Dungeon run ended with the player's death
    GameOver { wins: u32 },
}

impl GameEvent {
    /// Whether this event ends a battle.
    pub fn is_battle_end(&self) -> bool {
        matches!(
            self,
            GameEvent::Victory { .. } | GameEvent::Defeat { .. } | GameEvent::Abandoned { .. }
        )
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Challenged { enemy } => {
                write!(f, "{} has challenged you to a battle", enemy)
            }
            GameEvent::TurnStarted { turn } => write!(f, "Turn {}", turn),
            GameEvent::Hit {
                caster,
                target,
                damage,
                ability,
            } => write!(f, "{} damaged {} for {} using {}", caster, target, damage, ability),
            GameEvent::Missed { caster, .. } => write!(f, "{} missed", caster),
            GameEvent::TurnEnded { turn } => write!(f, "End of turn {}", turn),
            GameEvent::Victory { enemy, turns } => {
                write!(f, "You defeated {} in {} turns", enemy, turns)
            }
            GameEvent::Defeat { enemy, turns } => {
                write!(f, "You were defeated by {} after {} turns", enemy, turns)
            }
            GameEvent::Abandoned { enemy, .. } => {
                write!(f, "You left the fight against {}", enemy)
            }
            GameEvent::Slain { enemy, wins } => {
                write!(f, "{} has been slain.\n \nTotal wins:{}", enemy, wins)
            }
            GameEvent::PotionFound => f.write_str("A health potion was found on the corpse."),
            GameEvent::GameOver { .. } => f.write_str("Game over"),
        }
    }
}
