//! Shared combat state for players and mobs

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combat::Ability;
use crate::error::CombatError;
use crate::event::GameEvent;
use crate::rng::RollSource;

/// Starting stats for a combatant. Health and mana start full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u32,
    pub mana: u32,
    pub attack_damage: u32,
    pub magic_power: u32,
    pub speed: u32,
}

/// A participant in a battle
///
/// Health and mana are private so they stay within `0..=max`; damage and costs
/// saturate at zero. Deserialized values go through the same checks as
/// [`Combatant::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CombatantRepr")]
pub struct Combatant {
    /// Display name
    pub name: String,
    hp: u32,
    max_hp: u32,
    mana: u32,
    max_mana: u32,
    pub attack_damage: u32,
    pub magic_power: u32,
    pub speed: u32,
    abilities: Vec<Ability>,
}

/// Wire form of [`Combatant`], unchecked.
#[derive(Deserialize)]
struct CombatantRepr {
    name: String,
    hp: u32,
    max_hp: u32,
    mana: u32,
    max_mana: u32,
    attack_damage: u32,
    magic_power: u32,
    speed: u32,
    abilities: Vec<Ability>,
}

impl TryFrom<CombatantRepr> for Combatant {
    type Error = CombatError;

    fn try_from(repr: CombatantRepr) -> Result<Self, Self::Error> {
        let stats = Stats {
            hp: repr.max_hp,
            mana: repr.max_mana,
            attack_damage: repr.attack_damage,
            magic_power: repr.magic_power,
            speed: repr.speed,
        };
        let mut combatant = Combatant::new(repr.name, stats, repr.abilities)?;
        combatant.set_hp(repr.hp);
        combatant.set_mana(repr.mana);
        Ok(combatant)
    }
}

impl Combatant {
    /// Create a combatant, checking the stat and ability contracts.
    pub fn new(
        name: impl Into<String>,
        stats: Stats,
        abilities: Vec<Ability>,
    ) -> Result<Self, CombatError> {
        let name = name.into();
        if stats.hp == 0 {
            return Err(CombatError::InvalidStats {
                name,
                reason: "max hp must be positive".to_string(),
            });
        }
        if abilities.is_empty() {
            return Err(CombatError::EmptyAbilities { name });
        }
        for (i, ability) in abilities.iter().enumerate() {
            if abilities[..i].contains(ability) {
                return Err(CombatError::DuplicateAbility {
                    name,
                    ability: *ability,
                });
            }
        }
        Ok(Self::from_parts(name, stats, abilities))
    }

    /// Build from trusted archetype data without validation.
    pub(crate) fn from_parts(name: String, stats: Stats, abilities: Vec<Ability>) -> Self {
        Self {
            name,
            hp: stats.hp,
            max_hp: stats.hp,
            mana: stats.mana,
            max_mana: stats.mana,
            attack_damage: stats.attack_damage,
            magic_power: stats.magic_power,
            speed: stats.speed,
            abilities,
        }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn mana(&self) -> u32 {
        self.mana
    }

    pub fn max_mana(&self) -> u32 {
        self.max_mana
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Set current health, capped at max.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    /// Set current mana, capped at max.
    pub fn set_mana(&mut self, mana: u32) {
        self.mana = mana.min(self.max_mana);
    }

    pub(crate) fn lose_hp(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub(crate) fn spend_mana(&mut self, amount: u32) {
        self.mana = self.mana.saturating_sub(amount);
    }

    /// Restore health to max
    pub fn heal(&mut self) {
        self.hp = self.max_hp;
    }

    /// Restore mana to max
    pub fn mana_refill(&mut self) {
        self.mana = self.max_mana;
    }

    /// Check that the ability at `index` exists and is affordable.
    pub fn validate_selection(&self, index: usize) -> Result<Ability, CombatError> {
        let ability = *self
            .abilities
            .get(index)
            .ok_or(CombatError::InvalidAbilityIndex {
                index,
                len: self.abilities.len(),
            })?;
        if ability.mana_cost() > self.mana {
            return Err(CombatError::InsufficientMana {
                ability,
                required: ability.mana_cost(),
                available: self.mana,
            });
        }
        Ok(ability)
    }

    /// Use the ability at `index` on `target`.
    ///
    /// Returns the hit or miss event; damage is the target's actual health loss.
    pub fn use_ability(
        &mut self,
        index: usize,
        target: &mut Combatant,
        rng: &mut (impl RollSource + ?Sized),
    ) -> Result<GameEvent, CombatError> {
        let ability = self.validate_selection(index)?;
        let hp_before = target.hp;
        let hit = ability.resolve(self, target, rng);

        let event = if hit {
            GameEvent::Hit {
                caster: self.name.clone(),
                target: target.name.clone(),
                damage: hp_before - target.hp,
                ability,
            }
        } else {
            GameEvent::Missed {
                caster: self.name.clone(),
                ability,
            }
        };

        debug!(
            caster = %self.name,
            target = %target.name,
            %ability,
            hit,
            damage = hp_before - target.hp,
            target_hp = target.hp,
            caster_hp = self.hp,
            caster_mana = self.mana,
            "ability resolved"
        );
        Ok(event)
    }
}
