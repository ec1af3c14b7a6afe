//! Combat participants
//!
//! [`PlayerClass`] and [`Mob`] share one [`Combatant`] state struct and differ
//! only in how their next action is chosen.

mod combatant;
mod mob;
mod player;

pub use combatant::{Combatant, Stats};
pub use mob::{Mob, MobKind, MobTemplate, StatRange};
pub use player::{PlayerClass, Role};

/// Common access to a participant's combat state
pub trait Entity {
    fn combatant(&self) -> &Combatant;

    fn combatant_mut(&mut self) -> &mut Combatant;

    /// Human-readable summary; no side effects
    fn render_status(&self) -> String;

    fn name(&self) -> &str {
        &self.combatant().name
    }

    fn is_defeated(&self) -> bool {
        self.combatant().is_defeated()
    }

    fn heal(&mut self) {
        self.combatant_mut().heal();
    }

    fn mana_refill(&mut self) {
        self.combatant_mut().mana_refill();
    }
}
