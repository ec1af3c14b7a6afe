//! Ability catalog
//!
//! Each ability is a fixed bundle of parameters ([`AbilityParams`]) fed through
//! one resolution routine. Abilities carry no state of their own.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::hit::{HitChance, hit_success};
use crate::entity::Combatant;
use crate::rng::RollSource;

/// Health paid by the caster on every Blood Slash.
pub const BLOOD_SLASH_HEALTH_COST: u32 = 20;

/// Combat action an entity can take
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
pub enum Ability {
    #[strum(to_string = "Slash")]
    Slash,
    #[strum(to_string = "Arcane Blast")]
    ArcaneBlast,
    #[strum(to_string = "Heavy Swing")]
    HeavySwing,
    #[strum(to_string = "Arcane Comet")]
    ArcaneComet,
    #[strum(to_string = "Backstab")]
    Backstab,
    #[strum(to_string = "Blood Slash")]
    BloodSlash,
    #[strum(to_string = "Smite")]
    Smite,
}

/// How an ability decides whether it lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitRule {
    /// Roll against a speed-dependent chance
    Roll(HitChance),
    /// Lands only if the caster is strictly faster; never rolls
    Outspeed,
}

/// Damage dealt to the target on a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageFormula {
    /// `attack_damage * mult / div`
    Physical { mult: u32, div: u32 },
    /// `magic_power * mult / div`
    Magical { mult: u32, div: u32 },
    /// `attack_damage + magic_power`
    Hybrid,
    /// Target health drops straight to zero
    Execute,
}

impl DamageFormula {
    /// Damage this formula deals for `caster`, or `None` for an execute.
    pub fn amount(&self, caster: &Combatant) -> Option<u32> {
        match *self {
            DamageFormula::Physical { mult, div } => {
                Some(caster.attack_damage.saturating_mul(mult) / div.max(1))
            }
            DamageFormula::Magical { mult, div } => {
                Some(caster.magic_power.saturating_mul(mult) / div.max(1))
            }
            DamageFormula::Hybrid => Some(caster.attack_damage.saturating_add(caster.magic_power)),
            DamageFormula::Execute => None,
        }
    }

    fn apply(&self, caster: &Combatant, target: &mut Combatant) {
        match self.amount(caster) {
            Some(damage) => target.lose_hp(damage),
            None => target.lose_hp(target.hp()),
        }
    }
}

/// Fixed resolution parameters of an ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityParams {
    pub hit: HitRule,
    pub damage: DamageFormula,
    pub mana_cost: u32,
    pub health_cost: u32,
    /// Costs are paid before the hit roll instead of after it
    pub pay_before_roll: bool,
}

impl Ability {
    /// Resolution parameters for this ability
    pub const fn params(&self) -> AbilityParams {
        match self {
            Ability::Slash => AbilityParams {
                hit: HitRule::Roll(HitChance::new(80, 60, 40)),
                damage: DamageFormula::Physical { mult: 1, div: 1 },
                mana_cost: 0,
                health_cost: 0,
                pay_before_roll: false,
            },
            Ability::ArcaneBlast => AbilityParams {
                hit: HitRule::Roll(HitChance::new(90, 70, 55)),
                damage: DamageFormula::Magical { mult: 1, div: 1 },
                mana_cost: 30,
                health_cost: 0,
                pay_before_roll: false,
            },
            Ability::HeavySwing => AbilityParams {
                hit: HitRule::Roll(HitChance::new(65, 50, 45)),
                damage: DamageFormula::Physical { mult: 2, div: 1 },
                mana_cost: 0,
                health_cost: 0,
                pay_before_roll: false,
            },
            // 2.5x magic power, floored
            Ability::ArcaneComet => AbilityParams {
                hit: HitRule::Roll(HitChance::new(65, 50, 45)),
                damage: DamageFormula::Magical { mult: 5, div: 2 },
                mana_cost: 35,
                health_cost: 0,
                pay_before_roll: true,
            },
            Ability::Backstab => AbilityParams {
                hit: HitRule::Outspeed,
                damage: DamageFormula::Physical { mult: 1, div: 2 },
                mana_cost: 0,
                health_cost: 0,
                pay_before_roll: false,
            },
            Ability::BloodSlash => AbilityParams {
                hit: HitRule::Roll(HitChance::new(80, 70, 50)),
                damage: DamageFormula::Hybrid,
                mana_cost: 30,
                health_cost: BLOOD_SLASH_HEALTH_COST,
                pay_before_roll: false,
            },
            Ability::Smite => AbilityParams {
                hit: HitRule::Roll(HitChance::flat(15)),
                damage: DamageFormula::Execute,
                mana_cost: 0,
                health_cost: 0,
                pay_before_roll: false,
            },
        }
    }

    pub const fn mana_cost(&self) -> u32 {
        self.params().mana_cost
    }

    pub const fn health_cost(&self) -> u32 {
        self.params().health_cost
    }

    /// Help text shown in the fight menu
    pub const fn description(&self) -> &'static str {
        match self {
            Ability::Slash => "Quick and fast attack. \nUses physical damage.",
            Ability::ArcaneBlast => "Fires a blast of magic. \nUses magic. \nMana cost: 30",
            Ability::HeavySwing => "Swings weapon at enemy. \nUses physical damage.",
            Ability::ArcaneComet => "Summon an arcane comet. \nUses magic. \nMana cost: 35",
            Ability::Backstab => {
                "Backstab enemy. Requires speed to be higher than that of the enemy. \nUses physical damage."
            }
            Ability::BloodSlash => {
                "Infuse blade with own blood and slash enemy. \nUses physical damage and magic. \nHP cost: 20 \nMana cost: 30"
            }
            Ability::Smite => "The weapon of God. \nDeals holy damage.",
        }
    }

    /// Resolve one use of this ability, applying every side effect.
    ///
    /// Costs are paid whether or not the ability lands. Returns whether it hit.
    pub fn resolve(
        &self,
        caster: &mut Combatant,
        target: &mut Combatant,
        rng: &mut (impl RollSource + ?Sized),
    ) -> bool {
        let params = self.params();

        if params.pay_before_roll {
            Self::pay(&params, caster);
        }
        let hit = match params.hit {
            HitRule::Roll(chance) => hit_success(chance, caster, target, rng),
            HitRule::Outspeed => caster.speed > target.speed,
        };
        if !params.pay_before_roll {
            Self::pay(&params, caster);
        }

        if hit {
            params.damage.apply(caster, target);
        }
        hit
    }

    fn pay(params: &AbilityParams, caster: &mut Combatant) {
        caster.spend_mana(params.mana_cost);
        caster.lose_hp(params.health_cost);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Stats;
    use crate::rng::ScriptedRolls;
    use strum::IntoEnumIterator;

    const ALWAYS_HIT: u32 = 0;
    const ALWAYS_MISS: u32 = 100;

    fn combatant(hp: u32, mana: u32, attack_damage: u32, magic_power: u32, speed: u32) -> Combatant {
        Combatant::new(
            "test",
            Stats {
                hp,
                mana,
                attack_damage,
                magic_power,
                speed,
            },
            Ability::iter().collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_slash_hit() {
        let mut knight = combatant(150, 0, 40, 0, 50);
        let mut target = combatant(150, 0, 10, 0, 30);
        let mut rolls = ScriptedRolls::constant(ALWAYS_HIT);

        assert!(Ability::Slash.resolve(&mut knight, &mut target, &mut rolls));
        assert_eq!(target.hp(), 110);
    }

    #[test]
    fn test_slash_miss_leaves_target() {
        let mut knight = combatant(150, 0, 40, 0, 50);
        let mut target = combatant(150, 0, 10, 0, 30);
        let mut rolls = ScriptedRolls::constant(ALWAYS_MISS);

        assert!(!Ability::Slash.resolve(&mut knight, &mut target, &mut rolls));
        assert_eq!(target.hp(), 150);
    }

    #[test]
    fn test_heavy_swing_doubles_attack() {
        let mut caster = combatant(100, 0, 40, 0, 50);
        let mut target = combatant(150, 0, 0, 0, 50);

        Ability::HeavySwing.resolve(&mut caster, &mut target, &mut ScriptedRolls::constant(ALWAYS_HIT));
        assert_eq!(target.hp(), 70);
    }

    #[test]
    fn test_arcane_blast_pays_mana_on_miss() {
        let mut mage = combatant(90, 150, 20, 50, 55);
        let mut target = combatant(100, 0, 0, 0, 30);

        assert!(!Ability::ArcaneBlast.resolve(&mut mage, &mut target, &mut ScriptedRolls::constant(ALWAYS_MISS)));
        assert_eq!(mage.mana(), 120);
        assert_eq!(target.hp(), 100);

        assert!(Ability::ArcaneBlast.resolve(&mut mage, &mut target, &mut ScriptedRolls::constant(ALWAYS_HIT)));
        assert_eq!(mage.mana(), 90);
        assert_eq!(target.hp(), 50);
    }

    #[test]
    fn test_arcane_comet() {
        let mut mage = combatant(90, 150, 20, 50, 55);
        let mut target = combatant(200, 0, 0, 0, 30);

        assert!(!Ability::ArcaneComet.resolve(&mut mage, &mut target, &mut ScriptedRolls::constant(ALWAYS_MISS)));
        assert_eq!(mage.mana(), 115);
        assert_eq!(target.hp(), 200);

        assert!(Ability::ArcaneComet.resolve(&mut mage, &mut target, &mut ScriptedRolls::constant(ALWAYS_HIT)));
        assert_eq!(mage.mana(), 80);
        assert_eq!(target.hp(), 75);
    }

    #[test]
    fn test_arcane_comet_floors_half_points() {
        let mut caster = combatant(90, 100, 0, 33, 55);
        let mut target = combatant(100, 0, 0, 0, 30);

        Ability::ArcaneComet.resolve(&mut caster, &mut target, &mut ScriptedRolls::constant(ALWAYS_HIT));
        // 2.5 * 33 = 82.5
        assert_eq!(target.hp(), 18);
    }

    #[test]
    fn test_arcane_comet_clamps_target() {
        let mut mage = combatant(90, 150, 20, 50, 55);
        let mut target = combatant(60, 0, 0, 0, 30);

        Ability::ArcaneComet.resolve(&mut mage, &mut target, &mut ScriptedRolls::constant(ALWAYS_HIT));
        assert_eq!(target.hp(), 0);
    }

    #[test]
    fn test_backstab_needs_speed() {
        let mut rogue = combatant(80, 40, 15, 0, 45);
        let mut equal = combatant(100, 0, 0, 0, 45);
        let mut faster = combatant(100, 0, 0, 0, 60);
        let mut rolls = ScriptedRolls::constant(ALWAYS_HIT);

        assert!(!Ability::Backstab.resolve(&mut rogue, &mut equal, &mut rolls));
        assert!(!Ability::Backstab.resolve(&mut rogue, &mut faster, &mut rolls));
        assert_eq!(equal.hp(), 100);
        assert_eq!(faster.hp(), 100);
        assert_eq!(rogue.mana(), 40);
        assert_eq!(rolls.draws(), 0);
    }

    #[test]
    fn test_backstab_halves_attack() {
        let mut rogue = combatant(80, 0, 15, 0, 60);
        let mut slow = combatant(100, 0, 0, 0, 45);
        let mut rolls = ScriptedRolls::constant(ALWAYS_MISS);

        assert!(Ability::Backstab.resolve(&mut rogue, &mut slow, &mut rolls));
        assert_eq!(slow.hp(), 93);
        assert_eq!(rolls.draws(), 0);
    }

    #[test]
    fn test_blood_slash_costs_every_use() {
        let mut dark_knight = combatant(150, 60, 50, 15, 40);
        let mut target = combatant(150, 0, 0, 0, 40);

        assert!(!Ability::BloodSlash.resolve(&mut dark_knight, &mut target, &mut ScriptedRolls::constant(ALWAYS_MISS)));
        assert_eq!(dark_knight.hp(), 130);
        assert_eq!(dark_knight.mana(), 30);
        assert_eq!(target.hp(), 150);

        assert!(Ability::BloodSlash.resolve(&mut dark_knight, &mut target, &mut ScriptedRolls::constant(ALWAYS_HIT)));
        assert_eq!(dark_knight.hp(), 110);
        assert_eq!(dark_knight.mana(), 0);
        assert_eq!(target.hp(), 85);
    }

    #[test]
    fn test_blood_slash_clamps_caster() {
        let mut caster = combatant(150, 60, 50, 15, 40);
        caster.set_hp(12);
        let mut target = combatant(150, 0, 0, 0, 40);

        Ability::BloodSlash.resolve(&mut caster, &mut target, &mut ScriptedRolls::constant(ALWAYS_HIT));
        assert_eq!(caster.hp(), 0);
        assert_eq!(target.hp(), 85);
    }

    #[test]
    fn test_smite_executes() {
        let mut god = combatant(400, 400, 1000, 1000, 100);
        let mut target = combatant(150, 0, 0, 0, 50);

        assert!(Ability::Smite.resolve(&mut god, &mut target, &mut ScriptedRolls::constant(15)));
        assert_eq!(target.hp(), 0);
    }

    #[test]
    fn test_smite_flat_chance() {
        let mut god = combatant(400, 400, 1000, 1000, 100);
        let mut target = combatant(150, 0, 0, 0, 500);

        assert!(!Ability::Smite.resolve(&mut god, &mut target, &mut ScriptedRolls::constant(16)));
        assert_eq!(target.hp(), 150);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Ability::ArcaneBlast.to_string(), "Arcane Blast");
        assert_eq!(Ability::BloodSlash.to_string(), "Blood Slash");
        assert_eq!("Heavy Swing".parse::<Ability>().unwrap(), Ability::HeavySwing);
    }

    #[test]
    fn test_zero_cost_abilities() {
        let free: Vec<Ability> = Ability::iter().filter(|a| a.mana_cost() == 0).collect();
        assert_eq!(
            free,
            vec![Ability::Slash, Ability::HeavySwing, Ability::Backstab, Ability::Smite]
        );
    }
}
