//! Player classes

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{Combatant, Entity, Stats};
use crate::combat::Ability;
use crate::error::CombatError;
use crate::event::GameEvent;
use crate::rng::RollSource;

/// Playable class
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    #[default]
    Knight,
    Mage,
}

impl Role {
    /// Fixed starting stats
    pub const fn stats(&self) -> Stats {
        match self {
            Role::Knight => Stats {
                hp: 150,
                mana: 0,
                attack_damage: 40,
                magic_power: 0,
                speed: 50,
            },
            Role::Mage => Stats {
                hp: 90,
                mana: 150,
                attack_damage: 20,
                magic_power: 50,
                speed: 55,
            },
        }
    }

    pub const fn abilities(&self) -> &'static [Ability] {
        match self {
            Role::Knight => &[Ability::Slash, Ability::HeavySwing],
            Role::Mage => &[Ability::Slash, Ability::ArcaneBlast, Ability::ArcaneComet],
        }
    }
}

/// The player's character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerClass {
    role: Role,
    body: Combatant,
}

impl PlayerClass {
    pub fn new(role: Role, name: impl Into<String>) -> Self {
        Self {
            role,
            body: Combatant::from_parts(name.into(), role.stats(), role.abilities().to_vec()),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn ability_count(&self) -> usize {
        self.body.abilities().len()
    }

    /// Check a zero-based menu choice; see [`Combatant::validate_selection`].
    pub fn validate_selection(&self, index: usize) -> Result<Ability, CombatError> {
        self.body.validate_selection(index)
    }

    pub fn use_ability(
        &mut self,
        index: usize,
        target: &mut Combatant,
        rng: &mut (impl RollSource + ?Sized),
    ) -> Result<GameEvent, CombatError> {
        self.body.use_ability(index, target, rng)
    }

    /// Current health, mana and the numbered ability list.
    pub fn fight_menu(&self) -> String {
        let body = &self.body;
        let mut menu = format!(
            "{}\nHP: {}/{}\nMana: {}/{}\n\nAbilities: \n",
            body.name,
            body.hp(),
            body.max_hp(),
            body.mana(),
            body.max_mana()
        );
        for (i, ability) in body.abilities().iter().enumerate() {
            menu.push_str(&format!("{}. {}: {}\n", i + 1, ability, ability.description()));
        }
        menu
    }
}

impl Entity for PlayerClass {
    fn combatant(&self) -> &Combatant {
        &self.body
    }

    fn combatant_mut(&mut self) -> &mut Combatant {
        &mut self.body
    }

    fn render_status(&self) -> String {
        self.fight_menu()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_knight_stats() {
        let knight = PlayerClass::new(Role::Knight, "Arthur");
        let body = knight.combatant();
        assert_eq!(body.hp(), 150);
        assert_eq!(body.mana(), 0);
        assert_eq!(body.attack_damage, 40);
        assert_eq!(body.speed, 50);
        assert_eq!(body.abilities(), &[Ability::Slash, Ability::HeavySwing]);
    }

    #[test]
    fn test_roles_satisfy_contracts() {
        for role in Role::iter() {
            let validated = Combatant::new(role.to_string(), role.stats(), role.abilities().to_vec());
            assert!(validated.is_ok(), "{role} fails construction checks");
        }
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Knight".parse::<Role>().unwrap(), Role::Knight);
        assert_eq!("mage".parse::<Role>().unwrap(), Role::Mage);
        assert!("Rogue".parse::<Role>().is_err());
    }

    #[test]
    fn test_fight_menu() {
        let mage = PlayerClass::new(Role::Mage, "Merlin");
        let menu = mage.fight_menu();
        assert!(menu.starts_with("Merlin\nHP: 90/90\nMana: 150/150\n\nAbilities: \n"));
        assert!(menu.contains("1. Slash: Quick and fast attack."));
        assert!(menu.contains("3. Arcane Comet: Summon an arcane comet."));
    }

    #[test]
    fn test_mage_cannot_overspend() {
        let mut mage = PlayerClass::new(Role::Mage, "Merlin");
        mage.combatant_mut().set_mana(34);
        assert!(mage.validate_selection(1).is_ok());
        assert!(matches!(
            mage.validate_selection(2),
            Err(CombatError::InsufficientMana { required: 35, .. })
        ));
    }
}
