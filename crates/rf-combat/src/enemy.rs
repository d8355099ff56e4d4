//! Enemy templates and battle kinds.

use serde::{Deserialize, Serialize};

/// Which staged battle is being fought. Each kind selects an enemy
/// template with its own special-attack flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleKind {
    /// The first battle: a sword-armed raider.
    Raider,
    /// The second battle: an axe-armed berserker.
    Berserker,
}

impl BattleKind {
    /// The enemy template this battle kind spawns.
    pub fn template(&self) -> EnemyTemplate {
        match self {
            BattleKind::Raider => preset::raider(),
            BattleKind::Berserker => preset::berserker(),
        }
    }
}

impl std::fmt::Display for BattleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleKind::Raider => write!(f, "raider"),
            BattleKind::Berserker => write!(f, "berserker"),
        }
    }
}

/// One of an enemy's attack options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackProfile {
    /// Display label for battle messages.
    pub label: String,
    /// Energy the attack spends.
    pub energy_cost: i32,
    /// Minimum damage roll.
    pub min_damage: u32,
    /// Maximum damage roll.
    pub max_damage: u32,
}

impl AttackProfile {
    /// Create an attack profile.
    pub fn new(label: impl Into<String>, energy_cost: i32, min_damage: u32, max_damage: u32) -> Self {
        Self {
            label: label.into(),
            energy_cost,
            min_damage,
            max_damage,
        }
    }
}

/// Immutable reference data for an enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    /// Display name.
    pub name: String,
    /// Maximum health.
    pub health: i32,
    /// Maximum energy.
    pub energy: i32,
    /// Agility score.
    pub agility: i32,
    /// Endurance score.
    pub endurance: i32,
    /// Weapon skill score.
    pub weapon_skill: i32,
    /// Coordination score.
    pub coordination: i32,
    /// Flavor text shown when the battle begins.
    pub flavor: String,
    /// Weapon-mastery experience granted on victory.
    pub exp_reward: u32,
    /// Basic attack.
    pub attack: AttackProfile,
    /// Heavy attack.
    pub heavy_attack: AttackProfile,
    /// Signature attack, flavored per battle kind.
    pub special: AttackProfile,
}

/// Built-in enemy templates.
pub mod preset {
    use super::{AttackProfile, EnemyTemplate};

    /// The sword-armed raider of the first battle.
    pub fn raider() -> EnemyTemplate {
        EnemyTemplate {
            name: "Skarde the Raider".to_string(),
            health: 80,
            energy: 70,
            agility: 5,
            endurance: 5,
            weapon_skill: 4,
            coordination: 4,
            flavor: "A scarred raider steps over the ashes, sword low and eyes steady.".to_string(),
            exp_reward: 120,
            attack: AttackProfile::new("quick slash", 5, 6, 12),
            heavy_attack: AttackProfile::new("overhead cut", 12, 12, 20),
            special: AttackProfile::new("riven blade", 15, 10, 18),
        }
    }

    /// The axe-armed berserker of the second battle.
    pub fn berserker() -> EnemyTemplate {
        EnemyTemplate {
            name: "Ulfgar Bloodaxe".to_string(),
            health: 110,
            energy: 80,
            agility: 4,
            endurance: 7,
            weapon_skill: 6,
            coordination: 3,
            flavor: "The berserker howls, hefting an axe still dark with old blood.".to_string(),
            exp_reward: 200,
            attack: AttackProfile::new("axe swing", 6, 8, 14),
            heavy_attack: AttackProfile::new("splitting blow", 14, 14, 24),
            special: AttackProfile::new("reckless cleave", 18, 16, 26),
        }
    }
}
