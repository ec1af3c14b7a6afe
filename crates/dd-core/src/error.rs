//! Combat error types

use thiserror::Error;

use crate::combat::Ability;

/// Errors raised by entity construction and ability selection.
///
/// Selection errors are recoverable: a front end re-prompts and tries again.
/// Nothing is mutated when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("Invalid ability index {index} (have {len} abilities)")]
    InvalidAbilityIndex { index: usize, len: usize },

    #[error("Insufficient mana for {ability}: requires {required}, have {available}")]
    InsufficientMana {
        ability: Ability,
        required: u32,
        available: u32,
    },

    #[error("{name} has no abilities")]
    EmptyAbilities { name: String },

    #[error("{name} lists {ability} more than once")]
    DuplicateAbility { name: String, ability: Ability },

    #[error("{name} has no zero-cost ability to fall back on")]
    NoFreeAbility { name: String },

    #[error("Invalid stats for {name}: {reason}")]
    InvalidStats { name: String, reason: String },
}

impl CombatError {
    /// Whether re-selecting an action can clear this error.
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            CombatError::InvalidAbilityIndex { .. } | CombatError::InsufficientMana { .. }
        )
    }
}
