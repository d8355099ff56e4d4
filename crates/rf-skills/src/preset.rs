//! The default Ravenfall skill tree: one branch per weapon family.

use rf_combat::{Metric, ModifierKind, Scope};
use rf_core::WeaponType;

use crate::skill::Skill;
use crate::tree::{Branch, SkillTree};

/// The standard four-branch tree.
pub fn default_tree() -> SkillTree {
    SkillTree::new(vec![
        sword_branch(),
        mace_branch(),
        axe_branch(),
        polearm_branch(),
    ])
}

fn sword_branch() -> Branch {
    let weapon = WeaponType::Sword;
    Branch::new(
        "duelist",
        "The Duelist",
        vec![
            Skill::new("sword_edge", "Honed Edge", 3, 1).with_modifier(
                Scope::Weapon(weapon),
                Metric::BaseDamage,
                ModifierKind::Flat,
                1.0,
            ),
            Skill::new("sword_footwork", "Footwork", 2, 1)
                .with_prerequisite("sword_edge", 1)
                .with_modifier(Scope::Weapon(weapon), Metric::HitChance, ModifierKind::Flat, 0.05),
            Skill::new("sword_tempo", "Tempo", 2, 2)
                .with_branch_gate(3)
                .with_modifier(
                    Scope::Weapon(weapon),
                    Metric::DamageMultiplier,
                    ModifierKind::Percent,
                    0.10,
                ),
            Skill::new("sword_riposte_form", "Riposte Form", 1, 2)
                .with_branch_gate(5)
                .with_prerequisite("sword_tempo", 1)
                .with_unlock(weapon, "sword_riposte"),
        ],
    )
}

fn mace_branch() -> Branch {
    let weapon = WeaponType::Mace;
    Branch::new(
        "breaker",
        "The Breaker",
        vec![
            Skill::new("mace_weight", "Thrown Weight", 3, 1).with_modifier(
                Scope::Weapon(weapon),
                Metric::BaseDamage,
                ModifierKind::Flat,
                1.0,
            ),
            Skill::new("mace_followthrough", "Follow-Through", 2, 1)
                .with_prerequisite("mace_weight", 1)
                .with_modifier(
                    Scope::Weapon(weapon),
                    Metric::CritDamage,
                    ModifierKind::Flat,
                    0.25,
                ),
            Skill::new("mace_concussion", "Concussion", 2, 2)
                .with_branch_gate(3)
                .with_modifier(
                    Scope::Weapon(weapon),
                    Metric::StatusChance,
                    ModifierKind::Flat,
                    0.10,
                ),
            Skill::new("mace_skullbreaker_form", "Skullbreaker Form", 1, 2)
                .with_branch_gate(5)
                .with_prerequisite("mace_concussion", 1)
                .with_unlock(weapon, "mace_skullbreaker"),
        ],
    )
}

fn axe_branch() -> Branch {
    let weapon = WeaponType::Axe;
    Branch::new(
        "reaver",
        "The Reaver",
        vec![
            Skill::new("axe_bite", "Deep Bite", 3, 1).with_modifier(
                Scope::Weapon(weapon),
                Metric::BaseDamage,
                ModifierKind::Flat,
                1.0,
            ),
            Skill::new("axe_opened_veins", "Opened Veins", 2, 1)
                .with_prerequisite("axe_bite", 1)
                .with_modifier(
                    Scope::Weapon(weapon),
                    Metric::StatusPower,
                    ModifierKind::Percent,
                    0.25,
                ),
            Skill::new("axe_momentum", "Momentum", 2, 2)
                .with_branch_gate(3)
                .with_modifier(
                    Scope::Weapon(weapon),
                    Metric::DamageMultiplier,
                    ModifierKind::Percent,
                    0.10,
                ),
            Skill::new("axe_rend_form", "Rending Form", 1, 2)
                .with_branch_gate(5)
                .with_prerequisite("axe_momentum", 1)
                .with_unlock(weapon, "axe_rend"),
        ],
    )
}

fn polearm_branch() -> Branch {
    let weapon = WeaponType::Polearm;
    Branch::new(
        "warden",
        "The Warden",
        vec![
            Skill::new("polearm_reach", "Measured Reach", 3, 1).with_modifier(
                Scope::Weapon(weapon),
                Metric::HitChance,
                ModifierKind::Flat,
                0.04,
            ),
            Skill::new("polearm_setpoint", "Set Point", 2, 1)
                .with_prerequisite("polearm_reach", 1)
                .with_modifier(
                    Scope::Weapon(weapon),
                    Metric::BaseDamage,
                    ModifierKind::Flat,
                    1.0,
                ),
            Skill::new("polearm_harry", "Harrying Point", 2, 2)
                .with_branch_gate(3)
                .with_modifier(
                    Scope::Weapon(weapon),
                    Metric::StatusDuration,
                    ModifierKind::Flat,
                    1.0,
                ),
            Skill::new("polearm_impale_form", "Impaling Form", 1, 2)
                .with_branch_gate(5)
                .with_prerequisite("polearm_harry", 1)
                .with_unlock(weapon, "polearm_impale"),
        ],
    )
}
