//! Weapon abilities as data.
//!
//! An ability's damage formula is a tagged variant interpreted by one
//! pure evaluator — no embedded closures, so abilities serialize and
//! the evaluator is the single place the damage math lives.

use serde::{Deserialize, Serialize};

use rf_core::WeaponType;
use rf_core::player::Attributes;

use crate::modifier::{Metric, ModifierContext, ModifierRegistry};
use crate::status::StatusKind;

/// How an ability converts weapon damage and stats into a total.
///
/// Every variant adds the weapon-mastery bonus on top; the multiplier
/// scales the weapon's base damage before the stat term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DamageKind {
    /// A straightforward strike: half of strength on top.
    Standard {
        /// Weapon base damage multiplier.
        multiplier: f64,
    },
    /// A committed heavy blow: full strength on top.
    Heavy {
        /// Weapon base damage multiplier.
        multiplier: f64,
    },
    /// A placed strike: coordination on top.
    Precise {
        /// Weapon base damage multiplier.
        multiplier: f64,
    },
    /// A wide arc: the average of strength and agility on top.
    Sweeping {
        /// Weapon base damage multiplier.
        multiplier: f64,
    },
}

/// A status effect an ability may inflict on hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusApplication {
    /// The status to inflict.
    pub kind: StatusKind,
    /// Base chance to stick, before StatusChance modifiers.
    pub chance: f64,
    /// Base damage per tick (DOT kinds).
    pub damage: u32,
    /// Base duration in turns, before StatusDuration modifiers.
    pub duration: u32,
    /// Base power, before StatusPower modifiers.
    pub power: f64,
}

/// A weapon ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    /// Stable id, referenced by actions, skills and unlock sets.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The weapon family the ability belongs to.
    pub weapon: WeaponType,
    /// Energy the ability costs to use.
    pub energy_cost: i32,
    /// Flat adjustment to the hit chance formula.
    pub hit_modifier: f64,
    /// The damage formula variant.
    pub damage: DamageKind,
    /// Optional on-hit status effect.
    pub status: Option<StatusApplication>,
    /// True if the ability must be unlocked through the skill tree.
    pub requires_unlock: bool,
}

/// Base damage for each weapon family.
pub fn weapon_base_damage(weapon: WeaponType) -> u32 {
    match weapon {
        WeaponType::Sword => 10,
        WeaponType::Mace => 12,
        WeaponType::Axe => 11,
        WeaponType::Polearm => 9,
    }
}

/// Evaluate an ability's damage.
///
/// Pipeline: the weapon base passes through BaseDamage modifiers, the
/// variant's formula adds its stat term and the mastery bonus, the
/// critical multiplier scales the total, and the result passes through
/// DamageMultiplier modifiers before flooring.
pub fn evaluate_damage(
    kind: DamageKind,
    weapon_base: u32,
    attributes: &Attributes,
    mastery_bonus: u32,
    crit_multiplier: f64,
    registry: &ModifierRegistry,
    ctx: &ModifierContext,
) -> u32 {
    let base = registry.apply(f64::from(weapon_base), Metric::BaseDamage, ctx);
    let stat_term = match kind {
        DamageKind::Standard { .. } => f64::from(attributes.strength) / 2.0,
        DamageKind::Heavy { .. } => f64::from(attributes.strength),
        DamageKind::Precise { .. } => f64::from(attributes.coordination),
        DamageKind::Sweeping { .. } => f64::from(attributes.strength + attributes.agility) / 2.0,
    };
    let multiplier = match kind {
        DamageKind::Standard { multiplier }
        | DamageKind::Heavy { multiplier }
        | DamageKind::Precise { multiplier }
        | DamageKind::Sweeping { multiplier } => multiplier,
    };

    let raw = (base * multiplier + stat_term + f64::from(mastery_bonus)) * crit_multiplier;
    let adjusted = registry.apply(raw, Metric::DamageMultiplier, ctx);
    if adjusted <= 0.0 {
        0
    } else {
        adjusted.floor() as u32
    }
}

/// The set of all abilities, indexed for lookup.
#[derive(Debug, Clone)]
pub struct AbilityCatalog {
    abilities: Vec<Ability>,
}

impl AbilityCatalog {
    /// Build a catalog from an explicit ability list.
    pub fn new(abilities: Vec<Ability>) -> Self {
        Self { abilities }
    }

    /// The standard Ravenfall ability set: at least two abilities per
    /// weapon family, the strongest locked behind the skill tree.
    pub fn standard() -> Self {
        Self::new(standard_abilities())
    }

    /// Look up an ability by id.
    pub fn get(&self, id: &str) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.id == id)
    }

    /// All abilities for a weapon family.
    pub fn for_weapon(&self, weapon: WeaponType) -> Vec<&Ability> {
        self.abilities.iter().filter(|a| a.weapon == weapon).collect()
    }

    /// All abilities.
    pub fn all(&self) -> &[Ability] {
        &self.abilities
    }
}

impl Default for AbilityCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn ability(
    id: &str,
    name: &str,
    weapon: WeaponType,
    energy_cost: i32,
    hit_modifier: f64,
    damage: DamageKind,
) -> Ability {
    Ability {
        id: id.to_string(),
        name: name.to_string(),
        weapon,
        energy_cost,
        hit_modifier,
        damage,
        status: None,
        requires_unlock: false,
    }
}

fn standard_abilities() -> Vec<Ability> {
    let mut list = vec![
        ability(
            "sword_slash",
            "Slash",
            WeaponType::Sword,
            5,
            0.0,
            DamageKind::Standard { multiplier: 1.0 },
        ),
        ability(
            "sword_lunge",
            "Lunge",
            WeaponType::Sword,
            10,
            -0.05,
            DamageKind::Precise { multiplier: 1.2 },
        ),
        ability(
            "mace_smash",
            "Smash",
            WeaponType::Mace,
            8,
            0.0,
            DamageKind::Heavy { multiplier: 1.1 },
        ),
        ability(
            "axe_hack",
            "Hack",
            WeaponType::Axe,
            6,
            0.0,
            DamageKind::Standard { multiplier: 1.1 },
        ),
        ability(
            "polearm_thrust",
            "Thrust",
            WeaponType::Polearm,
            5,
            0.05,
            DamageKind::Precise { multiplier: 1.0 },
        ),
    ];

    let mut crush = ability(
        "mace_crush",
        "Crushing Blow",
        WeaponType::Mace,
        14,
        -0.10,
        DamageKind::Heavy { multiplier: 1.5 },
    );
    crush.status = Some(StatusApplication {
        kind: StatusKind::Stun,
        chance: 0.25,
        damage: 0,
        duration: 1,
        power: 1.0,
    });
    list.push(crush);

    let mut cleave = ability(
        "axe_cleave",
        "Cleave",
        WeaponType::Axe,
        12,
        -0.05,
        DamageKind::Sweeping { multiplier: 1.3 },
    );
    cleave.status = Some(StatusApplication {
        kind: StatusKind::Bleed,
        chance: 0.40,
        damage: 3,
        duration: 3,
        power: 1.0,
    });
    list.push(cleave);

    let mut sweep = ability(
        "polearm_sweep",
        "Sweep",
        WeaponType::Polearm,
        10,
        0.0,
        DamageKind::Sweeping { multiplier: 1.2 },
    );
    sweep.status = Some(StatusApplication {
        kind: StatusKind::Weaken,
        chance: 0.30,
        damage: 0,
        duration: 2,
        power: 0.25,
    });
    list.push(sweep);

    // Skill-tree unlocks, one per family.
    let mut riposte = ability(
        "sword_riposte",
        "Riposte",
        WeaponType::Sword,
        12,
        0.05,
        DamageKind::Precise { multiplier: 1.4 },
    );
    riposte.requires_unlock = true;
    list.push(riposte);

    let mut skullbreaker = ability(
        "mace_skullbreaker",
        "Skullbreaker",
        WeaponType::Mace,
        18,
        -0.15,
        DamageKind::Heavy { multiplier: 1.8 },
    );
    skullbreaker.status = Some(StatusApplication {
        kind: StatusKind::Stun,
        chance: 0.35,
        damage: 0,
        duration: 1,
        power: 1.0,
    });
    skullbreaker.requires_unlock = true;
    list.push(skullbreaker);

    let mut rend = ability(
        "axe_rend",
        "Rend",
        WeaponType::Axe,
        15,
        -0.05,
        DamageKind::Sweeping { multiplier: 1.5 },
    );
    rend.status = Some(StatusApplication {
        kind: StatusKind::Bleed,
        chance: 0.60,
        damage: 4,
        duration: 3,
        power: 1.0,
    });
    rend.requires_unlock = true;
    list.push(rend);

    let mut impale = ability(
        "polearm_impale",
        "Impale",
        WeaponType::Polearm,
        16,
        -0.10,
        DamageKind::Precise { multiplier: 1.6 },
    );
    impale.status = Some(StatusApplication {
        kind: StatusKind::Bleed,
        chance: 0.40,
        damage: 3,
        duration: 2,
        power: 1.0,
    });
    impale.requires_unlock = true;
    list.push(impale);

    list
}
