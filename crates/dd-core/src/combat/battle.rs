//! One battle between the player and a mob
//!
//! The battle is a small state machine advanced one transition at a time by
//! [`Battle::step`]. Turns strictly alternate, player first, and there is no
//! turn limit.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entity::{Entity, Mob, PlayerClass};
use crate::error::CombatError;
use crate::event::GameEvent;
use crate::rng::RollSource;

/// Supplies the player's actions and receives battle events.
pub trait BattleController {
    /// Zero-based index into the player's abilities, or `None` to abandon
    /// the battle (for example when input has closed).
    ///
    /// An index should already satisfy [`PlayerClass::validate_selection`];
    /// the battle checks again and fails with the validation error otherwise.
    fn select_ability(&mut self, player: &PlayerClass, enemy: &Mob) -> Option<usize>;

    fn notify(&mut self, _event: &GameEvent) {}
}

/// Where a battle is in its turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    AwaitingPlayerAction,
    ResolvingPlayerAction { index: usize },
    CheckEnemyDefeated,
    ResolvingEnemyAction,
    CheckPlayerDefeated,
    PlayerVictory,
    PlayerDefeat,
    /// The controller gave up before choosing an action
    PlayerAbandoned,
}

impl BattlePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BattlePhase::PlayerVictory | BattlePhase::PlayerDefeat | BattlePhase::PlayerAbandoned
        )
    }
}

/// How a finished battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    PlayerVictory,
    PlayerDefeat,
    PlayerAbandoned,
}

impl BattleOutcome {
    pub fn player_won(&self) -> bool {
        matches!(self, BattleOutcome::PlayerVictory)
    }
}

/// An in-progress battle; holds both participants exclusively.
#[derive(Debug)]
pub struct Battle<'a> {
    player: &'a mut PlayerClass,
    enemy: &'a mut Mob,
    phase: BattlePhase,
    turn: u32,
}

impl<'a> Battle<'a> {
    /// Announce the challenge and wait for the player's first action.
    pub fn start(
        player: &'a mut PlayerClass,
        enemy: &'a mut Mob,
        controller: &mut (impl BattleController + ?Sized),
    ) -> Self {
        info!(player = player.name(), enemy = enemy.name(), "battle started");
        controller.notify(&GameEvent::Challenged {
            enemy: enemy.name().to_string(),
        });
        Self {
            player,
            enemy,
            phase: BattlePhase::AwaitingPlayerAction,
            turn: 0,
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Turns started so far
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn player(&self) -> &PlayerClass {
        &*self.player
    }

    pub fn enemy(&self) -> &Mob {
        &*self.enemy
    }

    /// Advance one transition and return the new phase.
    ///
    /// Terminal phases are returned unchanged.
    pub fn step(
        &mut self,
        controller: &mut (impl BattleController + ?Sized),
        rng: &mut (impl RollSource + ?Sized),
    ) -> Result<BattlePhase, CombatError> {
        self.phase = match self.phase {
            BattlePhase::AwaitingPlayerAction => {
                self.turn += 1;
                controller.notify(&GameEvent::TurnStarted { turn: self.turn });
                match controller.select_ability(&*self.player, &*self.enemy) {
                    Some(index) => {
                        self.player.validate_selection(index)?;
                        BattlePhase::ResolvingPlayerAction { index }
                    }
                    None => self.finish(controller, BattleOutcome::PlayerAbandoned),
                }
            }
            BattlePhase::ResolvingPlayerAction { index } => {
                let event = self
                    .player
                    .use_ability(index, self.enemy.combatant_mut(), rng)?;
                controller.notify(&event);
                BattlePhase::CheckEnemyDefeated
            }
            BattlePhase::CheckEnemyDefeated => {
                if self.enemy.is_defeated() {
                    self.finish(controller, BattleOutcome::PlayerVictory)
                } else {
                    BattlePhase::ResolvingEnemyAction
                }
            }
            BattlePhase::ResolvingEnemyAction => {
                let event = self.enemy.use_ability(self.player.combatant_mut(), rng)?;
                controller.notify(&event);
                BattlePhase::CheckPlayerDefeated
            }
            BattlePhase::CheckPlayerDefeated => {
                if self.player.is_defeated() {
                    self.finish(controller, BattleOutcome::PlayerDefeat)
                } else {
                    controller.notify(&GameEvent::TurnEnded { turn: self.turn });
                    BattlePhase::AwaitingPlayerAction
                }
            }
            terminal @ (BattlePhase::PlayerVictory
            | BattlePhase::PlayerDefeat
            | BattlePhase::PlayerAbandoned) => terminal,
        };
        Ok(self.phase)
    }

    /// Step until one side is down.
    pub fn run(
        mut self,
        controller: &mut (impl BattleController + ?Sized),
        rng: &mut (impl RollSource + ?Sized),
    ) -> Result<BattleOutcome, CombatError> {
        loop {
            match self.step(controller, rng)? {
                BattlePhase::PlayerVictory => return Ok(BattleOutcome::PlayerVictory),
                BattlePhase::PlayerDefeat => return Ok(BattleOutcome::PlayerDefeat),
                BattlePhase::PlayerAbandoned => return Ok(BattleOutcome::PlayerAbandoned),
                _ => {}
            }
        }
    }

    fn finish(
        &mut self,
        controller: &mut (impl BattleController + ?Sized),
        outcome: BattleOutcome,
    ) -> BattlePhase {
        let enemy = self.enemy.name().to_string();
        let turns = self.turn;
        info!(?outcome, %enemy, turns, "battle finished");
        match outcome {
            BattleOutcome::PlayerVictory => {
                controller.notify(&GameEvent::Victory { enemy, turns });
                BattlePhase::PlayerVictory
            }
            BattleOutcome::PlayerDefeat => {
                controller.notify(&GameEvent::Defeat { enemy, turns });
                BattlePhase::PlayerDefeat
            }
            BattleOutcome::PlayerAbandoned => {
                controller.notify(&GameEvent::Abandoned { enemy, turns });
                BattlePhase::PlayerAbandoned
            }
        }
    }
}

/// Fight `enemy` to the end. Returns true if the player won, false if they
/// were defeated or the controller abandoned the battle.
pub fn battle(
    player: &mut PlayerClass,
    enemy: &mut Mob,
    controller: &mut (impl BattleController + ?Sized),
    rng: &mut (impl RollSource + ?Sized),
) -> Result<bool, CombatError> {
    let outcome = Battle::start(player, enemy, controller).run(controller, rng)?;
    Ok(outcome.player_won())
}
