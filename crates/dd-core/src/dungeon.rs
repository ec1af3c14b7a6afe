//! Dungeon progression
//!
//! Chains battles against random mobs until the player falls. Winning grants a
//! chance at a full heal and always refills mana.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::combat::{Battle, BattleController, BattleOutcome};
use crate::entity::{Entity, Mob, MobKind, PlayerClass};
use crate::error::CombatError;
use crate::event::GameEvent;
use crate::rng::RollSource;

/// Summary of a dungeon run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DungeonReport {
    pub wins: u32,
    pub battles: u32,
    /// False if the run ended with the player's death
    pub survived: bool,
    /// The controller walked away mid-battle
    pub abandoned: bool,
}

/// Progression loop state
#[derive(Debug, Clone, Default)]
pub struct Dungeon {
    wins: u32,
    battles: u32,
    max_battles: Option<u32>,
}

impl Dungeon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after `max` battles even if the player is still alive.
    pub fn with_max_battles(max: u32) -> Self {
        Self {
            max_battles: Some(max),
            ..Self::default()
        }
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn battles(&self) -> u32 {
        self.battles
    }

    /// Pick the next opponent: God one time in five, otherwise a coin flip
    /// between Dark Knight and Dark Mage.
    pub fn next_encounter(rng: &mut (impl RollSource + ?Sized)) -> MobKind {
        if rng.roll(1, 5) == 5 {
            MobKind::God
        } else if rng.roll(1, 2) == 1 {
            MobKind::DarkKnight
        } else {
            MobKind::DarkMage
        }
    }

    /// Fight until the player dies, the controller abandons a battle, or the
    /// battle limit is reached.
    pub fn run(
        &mut self,
        player: &mut PlayerClass,
        controller: &mut (impl BattleController + ?Sized),
        rng: &mut (impl RollSource + ?Sized),
    ) -> Result<DungeonReport, CombatError> {
        loop {
            if self.max_battles.is_some_and(|max| self.battles >= max) {
                info!(wins = self.wins, battles = self.battles, "battle limit reached");
                return Ok(self.report(true, false));
            }

            let kind = Self::next_encounter(rng);
            let mut enemy = Mob::spawn(kind, rng);
            self.battles += 1;

            match Battle::start(player, &mut enemy, controller).run(controller, rng)? {
                BattleOutcome::PlayerVictory => {}
                BattleOutcome::PlayerDefeat => {
                    info!(wins = self.wins, "player fell in the dungeon");
                    controller.notify(&GameEvent::GameOver { wins: self.wins });
                    return Ok(self.report(false, false));
                }
                BattleOutcome::PlayerAbandoned => {
                    info!(wins = self.wins, battles = self.battles, "run abandoned");
                    return Ok(self.report(true, true));
                }
            }

            self.wins += 1;
            controller.notify(&GameEvent::Slain {
                enemy: enemy.name().to_string(),
                wins: self.wins,
            });
            self.reward(player, controller, rng);
        }
    }

    fn reward(
        &self,
        player: &mut PlayerClass,
        controller: &mut (impl BattleController + ?Sized),
        rng: &mut (impl RollSource + ?Sized),
    ) {
        if rng.roll(1, 2) == 1 {
            controller.notify(&GameEvent::PotionFound);
            player.heal();
        }
        player.mana_refill();
    }

    fn report(&self, survived: bool, abandoned: bool) -> DungeonReport {
        DungeonReport {
            wins: self.wins,
            battles: self.battles,
            survived,
            abandoned,
        }
    }
}
