//! Non-interactive controller for simulated runs

use std::io::Write;

use dd_core::{BattleController, GameEvent, GameRng, Mob, PlayerClass, RollSource};
use tracing::warn;

use crate::narrate::narrate;

/// Picks a random affordable ability each turn, the same way mobs do.
pub struct Autopilot<W> {
    rng: GameRng,
    output: Option<W>,
}

impl<W: Write> Autopilot<W> {
    /// `output` of `None` runs silently.
    pub fn new(rng: GameRng, output: Option<W>) -> Self {
        Self { rng, output }
    }
}

impl<W: Write> BattleController for Autopilot<W> {
    fn select_ability(&mut self, player: &PlayerClass, _enemy: &Mob) -> Option<usize> {
        // Every class has a zero-cost ability, so this finds one eventually
        loop {
            let index = self.rng.index(player.ability_count());
            if player.validate_selection(index).is_ok() {
                return Some(index);
            }
        }
    }

    fn notify(&mut self, event: &GameEvent) {
        let Some(output) = self.output.as_mut() else {
            return;
        };
        if let Some(text) = narrate(event) {
            if let Err(err) = writeln!(output, "{text}") {
                warn!(%err, "failed to write narration");
            }
        }
    }
}
