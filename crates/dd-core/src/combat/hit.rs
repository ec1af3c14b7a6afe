//! Speed-based hit resolution
//!
//! The roll is drawn from `0..=100`, so a listed chance of `p` succeeds with
//! probability `(p + 1) / 101`. An 80 is really about 80.2%.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::entity::Combatant;
use crate::rng::RollSource;

/// Highest value of the hit roll (inclusive).
pub const HIT_ROLL_MAX: u32 = 100;

/// Hit percentages keyed on how the caster's speed compares to the target's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HitChance {
    /// Caster strictly faster
    pub greater: u32,
    /// Equal speed
    pub equal: u32,
    /// Caster strictly slower
    pub less: u32,
}

impl HitChance {
    pub const fn new(greater: u32, equal: u32, less: u32) -> Self {
        Self {
            greater,
            equal,
            less,
        }
    }

    /// Same chance whatever the speeds.
    pub const fn flat(chance: u32) -> Self {
        Self::new(chance, chance, chance)
    }

    /// Pick the percentage that applies for these speeds.
    pub fn for_speeds(&self, caster_speed: u32, target_speed: u32) -> u32 {
        match caster_speed.cmp(&target_speed) {
            Ordering::Greater => self.greater,
            Ordering::Equal => self.equal,
            Ordering::Less => self.less,
        }
    }
}

/// A roll hits when it does not exceed the percentage.
pub fn roll_hits(percentage: u32, roll: u32) -> bool {
    percentage >= roll
}

/// Roll to hit `target` with one of the caster's abilities.
///
/// Draws exactly one number from `rng`.
pub fn hit_success(
    chance: HitChance,
    caster: &Combatant,
    target: &Combatant,
    rng: &mut (impl RollSource + ?Sized),
) -> bool {
    let percentage = chance.for_speeds(caster.speed, target.speed);
    let roll = rng.roll(0, HIT_ROLL_MAX);
    roll_hits(percentage, roll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Ability;
    use crate::entity::Stats;
    use crate::rng::{GameRng, ScriptedRolls};

    fn with_speed(speed: u32) -> Combatant {
        Combatant::new(
            "dummy",
            Stats {
                hp: 100,
                mana: 0,
                attack_damage: 10,
                magic_power: 0,
                speed,
            },
            vec![Ability::Slash],
        )
        .unwrap()
    }

    #[test]
    fn test_chance_selection_by_speed() {
        let chance = HitChance::new(80, 60, 40);
        assert_eq!(chance.for_speeds(50, 30), 80);
        assert_eq!(chance.for_speeds(30, 30), 60);
        assert_eq!(chance.for_speeds(29, 30), 40);
    }

    #[test]
    fn test_roll_boundary() {
        assert!(roll_hits(80, 80));
        assert!(!roll_hits(80, 81));
        assert!(roll_hits(0, 0));
        assert!(!roll_hits(99, 100));
    }

    #[test]
    fn test_hit_success_uses_one_draw() {
        let caster = with_speed(50);
        let target = with_speed(30);
        let mut rolls = ScriptedRolls::new([80, 81]);

        assert!(hit_success(HitChance::new(80, 60, 40), &caster, &target, &mut rolls));
        assert!(!hit_success(HitChance::new(80, 60, 40), &caster, &target, &mut rolls));
        assert_eq!(rolls.draws(), 2);
    }

    #[test]
    fn test_slower_caster_uses_less_chance() {
        let caster = with_speed(10);
        let target = with_speed(30);
        let chance = HitChance::new(80, 60, 40);

        assert!(hit_success(chance, &caster, &target, &mut ScriptedRolls::constant(40)));
        assert!(!hit_success(chance, &caster, &target, &mut ScriptedRolls::constant(41)));
    }

    #[test]
    fn test_hit_rate_matches_inclusive_draw() {
        let caster = with_speed(50);
        let target = with_speed(30);
        let mut rng = GameRng::new(42);

        let trials = 20_000;
        let hits = (0..trials)
            .filter(|_| hit_success(HitChance::flat(80), &caster, &target, &mut rng))
            .count();

        // Expected 81/101 ~ 0.802
        let rate = hits as f64 / trials as f64;
        assert!((rate - 81.0 / 101.0).abs() < 0.02, "rate was {rate}");
    }
}
