//! Skill definitions.

use serde::{Deserialize, Serialize};

use rf_combat::{Metric, ModifierKind, Scope};
use rf_core::WeaponType;

/// A modifier a skill grants per rank.
///
/// Each rank re-applies the same base value under a fresh source tag,
/// so three ranks of a flat +0.1 are three separate +0.1 entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillModifier {
    /// Where the modifier applies.
    pub scope: Scope,
    /// Which metric it adjusts.
    pub metric: Metric,
    /// Flat or percent.
    pub kind: ModifierKind,
    /// Base value applied once per rank.
    pub value: f64,
}

/// A prerequisite on another skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisite {
    /// The skill that must be ranked first.
    pub skill_id: String,
    /// Its minimum rank.
    pub min_rank: u32,
}

/// An ability unlocked by taking a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityUnlock {
    /// The weapon family the ability belongs to.
    pub weapon: WeaponType,
    /// The ability id to unlock.
    pub ability_id: String,
}

/// A skill in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Maximum rank, 1 to 3.
    pub max_rank: u32,
    /// Skill points each rank costs.
    pub cost_per_rank: u32,
    /// Modifiers applied once per rank.
    pub modifiers: Vec<SkillModifier>,
    /// Skills that must be ranked before this one.
    pub prerequisites: Vec<Prerequisite>,
    /// Minimum points already spent in the branch, if gated.
    pub branch_gate: Option<u32>,
    /// Ability unlocked at rank 1, if any.
    pub unlocks: Option<AbilityUnlock>,
}

impl Skill {
    /// Create a skill with no modifiers, prerequisites or unlocks.
    pub fn new(id: &str, name: &str, max_rank: u32, cost_per_rank: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            max_rank,
            cost_per_rank,
            modifiers: Vec::new(),
            prerequisites: Vec::new(),
            branch_gate: None,
            unlocks: None,
        }
    }

    /// Add a granted modifier.
    pub fn with_modifier(mut self, scope: Scope, metric: Metric, kind: ModifierKind, value: f64) -> Self {
        self.modifiers.push(SkillModifier {
            scope,
            metric,
            kind,
            value,
        });
        self
    }

    /// Add a prerequisite.
    pub fn with_prerequisite(mut self, skill_id: &str, min_rank: u32) -> Self {
        self.prerequisites.push(Prerequisite {
            skill_id: skill_id.to_string(),
            min_rank,
        });
        self
    }

    /// Gate the skill behind points spent in its branch.
    pub fn with_branch_gate(mut self, required: u32) -> Self {
        self.branch_gate = Some(required);
        self
    }

    /// Unlock an ability when the skill is first taken.
    pub fn with_unlock(mut self, weapon: WeaponType, ability_id: &str) -> Self {
        self.unlocks = Some(AbilityUnlock {
            weapon,
            ability_id: ability_id.to_string(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_composes() {
        let skill = Skill::new("sword_edge", "Honed Edge", 3, 1)
            .with_modifier(
                Scope::Weapon(WeaponType::Sword),
                Metric::BaseDamage,
                ModifierKind::Flat,
                1.0,
            )
            .with_prerequisite("sword_footing", 1)
            .with_branch_gate(2)
            .with_unlock(WeaponType::Sword, "sword_riposte");

        assert_eq!(skill.modifiers.len(), 1);
        assert_eq!(skill.prerequisites[0].skill_id, "sword_footing");
        assert_eq!(skill.branch_gate, Some(2));
        assert_eq!(skill.unlocks.as_ref().unwrap().ability_id, "sword_riposte");
    }
}
