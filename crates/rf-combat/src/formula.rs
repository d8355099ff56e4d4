//! Hit, feint, critical and armor formulas.
//!
//! All chances are plain `f64` probabilities. Each formula applies the
//! modifier registry and clamps to its documented band, so callers can
//! rely on the output range regardless of how extreme the inputs are.

use rand::Rng;
use rand::rngs::StdRng;

use crate::modifier::{Metric, ModifierContext, ModifierRegistry};

/// Lower clamp of the hit chance band.
pub const HIT_CHANCE_MIN: f64 = 0.10;
/// Upper clamp of the hit chance band.
pub const HIT_CHANCE_MAX: f64 = 0.95;
/// Lower clamp of the feint chance band.
pub const FEINT_CHANCE_MIN: f64 = 0.20;
/// Upper clamp of the feint chance band.
pub const FEINT_CHANCE_MAX: f64 = 0.90;
/// Base chance for a landed hit to crit.
pub const BASE_CRIT_CHANCE: f64 = 0.05;
/// Base critical damage multiplier.
pub const BASE_CRIT_MULTIPLIER: f64 = 1.5;
/// Cap on armor damage reduction.
pub const ARMOR_REDUCTION_CAP: f64 = 0.75;

/// Inputs to the hit chance formula.
#[derive(Debug, Clone, Default)]
pub struct HitChanceInput {
    /// Attacker's weapon skill.
    pub attacker_weapon_skill: i32,
    /// Defender's agility.
    pub defender_agility: i32,
    /// Defender's current energy.
    pub defender_energy: i32,
    /// Defender's maximum energy.
    pub defender_max_energy: i32,
    /// Defender's endurance.
    pub defender_endurance: i32,
    /// Flat bonus or malus from the ability being used.
    pub ability_modifier: f64,
    /// True if the defender is in a defensive stance.
    pub defending: bool,
}

/// Chance for an attack to land, clamped to `[0.10, 0.95]`.
///
/// A winded defender is easier to hit twice over: the energy factor
/// adds to the chance as energy drains, and the same proportion scales
/// down the agility penalty — stamina and defense are deliberately
/// coupled through one term.
pub fn hit_chance(
    input: &HitChanceInput,
    registry: &ModifierRegistry,
    ctx: &ModifierContext,
) -> f64 {
    let energy_proportion = if input.defender_max_energy <= 0 {
        0.0
    } else {
        (f64::from(input.defender_energy) / f64::from(input.defender_max_energy)).max(0.0)
    };
    let energy_factor = (1.0 - energy_proportion) * f64::from(input.defender_endurance) * 0.03;

    let mut chance = 0.60 + f64::from(input.attacker_weapon_skill) * 0.04
        - f64::from(input.defender_agility) * 0.05 * energy_proportion
        + energy_factor
        + input.ability_modifier;

    if input.defending {
        chance -= 0.3;
    }

    // The modifier pass only runs for weapon or ability attacks; bare
    // contexts (enemy swings) keep the raw formula value.
    if ctx.is_scoped() {
        chance = registry.apply(chance, Metric::HitChance, ctx);
    }

    chance.clamp(HIT_CHANCE_MIN, HIT_CHANCE_MAX)
}

/// Chance for a feint to succeed, clamped to `[0.20, 0.90]`.
pub fn feint_chance(
    attacker_agility: i32,
    defender_coordination: i32,
    registry: &ModifierRegistry,
    ctx: &ModifierContext,
) -> f64 {
    let base = 0.5 + f64::from(attacker_agility - defender_coordination) * 0.05;
    registry
        .apply(base, Metric::HitChance, ctx)
        .clamp(FEINT_CHANCE_MIN, FEINT_CHANCE_MAX)
}

/// The outcome of a critical hit roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalHit {
    /// True if the roll succeeded.
    pub is_critical: bool,
    /// Damage multiplier to apply: the modified critical multiplier on
    /// a crit, 1.0 otherwise.
    pub multiplier: f64,
    /// The chance that was rolled against.
    pub chance: f64,
}

/// Roll for a critical hit. The damage multiplier is only
/// modifier-adjusted when the roll actually succeeds.
pub fn roll_critical(
    registry: &ModifierRegistry,
    ctx: &ModifierContext,
    rng: &mut StdRng,
) -> CriticalHit {
    let chance = registry
        .apply(BASE_CRIT_CHANCE, Metric::CritChance, ctx)
        .clamp(0.0, 1.0);
    let is_critical = rng.random::<f64>() < chance;
    let multiplier = if is_critical {
        registry.apply(BASE_CRIT_MULTIPLIER, Metric::CritDamage, ctx)
    } else {
        1.0
    };
    CriticalHit {
        is_critical,
        multiplier,
        chance,
    }
}

/// Fraction of incoming damage removed by armor: `min(0.75, armor * 0.02)`.
pub fn armor_reduction(armor_value: u32) -> f64 {
    (f64::from(armor_value) * 0.02).min(ARMOR_REDUCTION_CAP)
}

/// Apply armor reduction to a damage total, flooring the result.
pub fn apply_armor(damage: u32, armor_value: u32) -> u32 {
    let remaining = f64::from(damage) * (1.0 - armor_reduction(armor_value));
    remaining.floor() as u32
}
