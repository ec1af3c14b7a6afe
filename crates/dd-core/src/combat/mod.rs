//! Combat system
//!
//! Ability resolution, speed-based hit rolls and the battle turn loop.

mod ability;
mod battle;
mod hit;

pub use ability::{Ability, AbilityParams, BLOOD_SLASH_HEALTH_COST, DamageFormula, HitRule};
pub use battle::{Battle, BattleController, BattleOutcome, BattlePhase, battle};
pub use hit::{HIT_ROLL_MAX, HitChance, hit_success, roll_hits};
