//! dd-core: Combat engine for dungeon-duel
//!
//! This crate contains all game logic with no I/O dependencies.
//! Randomness is passed in explicitly so every battle can be replayed.

pub mod combat;
pub mod dungeon;
pub mod entity;
pub mod error;
pub mod event;
pub mod rng;

pub use combat::{Ability, Battle, BattleController, BattleOutcome, BattlePhase, battle};
pub use dungeon::{Dungeon, DungeonReport};
pub use entity::{Combatant, Entity, Mob, MobKind, PlayerClass, Role, Stats};
pub use error::CombatError;
pub use event::GameEvent;
pub use rng::{GameRng, RollSource, ScriptedRolls};
