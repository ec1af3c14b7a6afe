//! Computer-controlled monsters

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::debug;

use super::{Combatant, Entity, Stats};
use crate::combat::Ability;
use crate::error::CombatError;
use crate::event::GameEvent;
use crate::rng::RollSource;

/// Inclusive integer range a stat is rolled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: u32,
    pub max: u32,
}

impl StatRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: u32) -> Self {
        Self::new(value, value)
    }

    /// Fixed ranges do not draw from `rng`.
    pub fn roll(&self, rng: &mut (impl RollSource + ?Sized)) -> u32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.roll(self.min, self.max)
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Stat ranges and abilities for a kind of mob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobTemplate {
    pub hp: StatRange,
    pub mana: StatRange,
    pub attack_damage: StatRange,
    pub magic_power: StatRange,
    pub speed: StatRange,
    pub abilities: &'static [Ability],
}

/// Mob archetype
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum MobKind {
    #[strum(to_string = "Dark Knight")]
    DarkKnight,
    #[strum(to_string = "Dark Mage")]
    DarkMage,
    #[strum(to_string = "God")]
    God,
}

impl MobKind {
    pub const fn template(&self) -> MobTemplate {
        match self {
            MobKind::DarkKnight => MobTemplate {
                hp: StatRange::new(140, 170),
                mana: StatRange::new(50, 70),
                attack_damage: StatRange::new(40, 60),
                magic_power: StatRange::new(10, 20),
                speed: StatRange::new(30, 55),
                abilities: &[Ability::Slash, Ability::HeavySwing, Ability::BloodSlash],
            },
            MobKind::DarkMage => MobTemplate {
                hp: StatRange::new(70, 100),
                mana: StatRange::new(50, 70),
                attack_damage: StatRange::new(10, 15),
                magic_power: StatRange::new(30, 50),
                speed: StatRange::new(45, 60),
                abilities: &[
                    Ability::Slash,
                    Ability::ArcaneBlast,
                    Ability::ArcaneComet,
                    Ability::Backstab,
                ],
            },
            MobKind::God => MobTemplate {
                hp: StatRange::fixed(400),
                mana: StatRange::fixed(400),
                attack_damage: StatRange::fixed(1000),
                magic_power: StatRange::fixed(1000),
                speed: StatRange::fixed(100),
                abilities: &[Ability::Smite],
            },
        }
    }
}

/// A monster that picks its own actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MobRepr")]
pub struct Mob {
    kind: MobKind,
    body: Combatant,
}

#[derive(Deserialize)]
struct MobRepr {
    kind: MobKind,
    body: Combatant,
}

impl TryFrom<MobRepr> for Mob {
    type Error = CombatError;

    fn try_from(repr: MobRepr) -> Result<Self, Self::Error> {
        Mob::new(repr.kind, repr.body)
    }
}

impl Mob {
    /// Wrap an existing combatant as a mob.
    ///
    /// A mob must always be able to act, so at least one ability has to cost
    /// no mana.
    pub fn new(kind: MobKind, body: Combatant) -> Result<Self, CombatError> {
        if !body.abilities().iter().any(|a| a.mana_cost() == 0) {
            return Err(CombatError::NoFreeAbility { name: body.name });
        }
        Ok(Self { kind, body })
    }

    /// Roll a fresh mob of `kind`. Stats are drawn hp, mana, attack, magic, speed.
    pub fn spawn(kind: MobKind, rng: &mut (impl RollSource + ?Sized)) -> Self {
        let template = kind.template();
        let stats = Stats {
            hp: template.hp.roll(rng),
            mana: template.mana.roll(rng),
            attack_damage: template.attack_damage.roll(rng),
            magic_power: template.magic_power.roll(rng),
            speed: template.speed.roll(rng),
        };
        let body = Combatant::from_parts(kind.to_string(), stats, template.abilities.to_vec());
        Self { kind, body }
    }

    pub fn kind(&self) -> MobKind {
        self.kind
    }

    /// Draw ability indices until one is affordable.
    ///
    /// Terminates because construction guarantees a zero-cost ability.
    pub fn choose_ability(&self, rng: &mut (impl RollSource + ?Sized)) -> usize {
        let abilities = self.body.abilities();
        loop {
            let index = rng.index(abilities.len());
            if abilities[index].mana_cost() <= self.body.mana() {
                debug!(mob = %self.body.name, ability = %abilities[index], "mob chose ability");
                return index;
            }
        }
    }

    /// Pick an affordable ability and use it on `target`.
    pub fn use_ability(
        &mut self,
        target: &mut Combatant,
        rng: &mut (impl RollSource + ?Sized),
    ) -> Result<GameEvent, CombatError> {
        let index = self.choose_ability(rng);
        self.body.use_ability(index, target, rng)
    }

    /// Name, health, mana and offensive stats.
    pub fn info(&self) -> String {
        let body = &self.body;
        format!(
            "{}\nHP: {}/{}\nMana: {}/{}\nAttack: {}\nMagic: {}",
            body.name,
            body.hp(),
            body.max_hp(),
            body.mana(),
            body.max_mana(),
            body.attack_damage,
            body.magic_power
        )
    }
}

impl Entity for Mob {
    fn combatant(&self) -> &Combatant {
        &self.body
    }

    fn combatant_mut(&mut self) -> &mut Combatant {
        &mut self.body
    }

    fn render_status(&self) -> String {
        self.info()
    }
}
