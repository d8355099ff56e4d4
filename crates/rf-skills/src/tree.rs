//! The skill tree: rank storage, validation, and point spending.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rf_combat::ModifierRegistry;
use rf_core::PlayerState;

use crate::error::{SkillError, SkillResult};
use crate::skill::Skill;

/// Source-tag prefix for every modifier the skill tree injects.
pub const SOURCE_PREFIX: &str = "skilltree";

/// A named group of skills sharing one branch-point counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Skills in the branch, shallowest first.
    pub skills: Vec<Skill>,
}

impl Branch {
    /// Create a branch.
    pub fn new(id: &str, name: &str, skills: Vec<Skill>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            skills,
        }
    }
}

/// The skill tree with all learned ranks.
///
/// Ranks only increase; the only rollback is [`SkillTree::reset`],
/// which refunds everything and purges all skill-tree modifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTree {
    branches: Vec<Branch>,
    ranks: BTreeMap<String, u32>,
    branch_points: BTreeMap<String, u32>,
}

impl SkillTree {
    /// Create a tree from branch definitions, with no ranks learned.
    pub fn new(branches: Vec<Branch>) -> Self {
        Self {
            branches,
            ranks: BTreeMap::new(),
            branch_points: BTreeMap::new(),
        }
    }

    /// The branch definitions.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// The learned rank of a skill (0 if untaken).
    pub fn rank(&self, skill_id: &str) -> u32 {
        self.ranks.get(skill_id).copied().unwrap_or(0)
    }

    /// All learned ranks, keyed by skill id.
    pub fn ranks(&self) -> &BTreeMap<String, u32> {
        &self.ranks
    }

    /// Restore previously learned ranks, e.g. from a save game.
    ///
    /// Does not touch the registry; call
    /// [`SkillTree::rebuild_modifiers`] afterwards.
    pub fn restore_ranks(&mut self, ranks: BTreeMap<String, u32>, branch_points: BTreeMap<String, u32>) {
        self.ranks = ranks;
        self.branch_points = branch_points;
    }

    /// Points spent so far in a branch.
    pub fn branch_points(&self, branch_id: &str) -> u32 {
        self.branch_points.get(branch_id).copied().unwrap_or(0)
    }

    /// Points spent in each branch, keyed by branch id.
    pub fn all_branch_points(&self) -> &BTreeMap<String, u32> {
        &self.branch_points
    }

    /// Spend one skill point on a skill. Returns the new rank.
    ///
    /// Validation runs in a fixed order and short-circuits on the first
    /// failure, each with its own error kind: the skill must exist, be
    /// below max rank, be affordable, have its branch gate satisfied,
    /// and have every prerequisite met. On success the rank increments,
    /// the branch-point counter grows by the cost, the cost is
    /// deducted, the skill's modifiers are injected under a fresh
    /// per-rank source tag, and any carried ability unlock registers.
    pub fn apply_skill_point(
        &mut self,
        branch_id: &str,
        skill_id: &str,
        player: &mut PlayerState,
        registry: &mut ModifierRegistry,
    ) -> SkillResult<u32> {
        let branch = self
            .branches
            .iter()
            .find(|b| b.id == branch_id)
            .ok_or_else(|| SkillError::UnknownBranch(branch_id.to_string()))?;
        let skill = branch
            .skills
            .iter()
            .find(|s| s.id == skill_id)
            .ok_or_else(|| SkillError::UnknownSkill(skill_id.to_string()))?;

        let current_rank = self.ranks.get(skill_id).copied().unwrap_or(0);
        if current_rank >= skill.max_rank {
            return Err(SkillError::MaxRank {
                skill: skill_id.to_string(),
                rank: skill.max_rank,
            });
        }

        if player.skill_points < skill.cost_per_rank {
            return Err(SkillError::InsufficientSkillPoints {
                required: skill.cost_per_rank,
                available: player.skill_points,
            });
        }

        let spent = self.branch_points.get(branch_id).copied().unwrap_or(0);
        if let Some(required) = skill.branch_gate
            && spent < required
        {
            return Err(SkillError::BranchLocked { required, spent });
        }

        for prereq in &skill.prerequisites {
            let have = self.ranks.get(&prereq.skill_id).copied().unwrap_or(0);
            if have < prereq.min_rank {
                return Err(SkillError::PrerequisiteUnmet {
                    skill: prereq.skill_id.clone(),
                    required_rank: prereq.min_rank,
                });
            }
        }

        let new_rank = current_rank + 1;
        let skill = skill.clone();
        self.ranks.insert(skill_id.to_string(), new_rank);
        *self.branch_points.entry(branch_id.to_string()).or_insert(0) += skill.cost_per_rank;
        player.skill_points -= skill.cost_per_rank;

        inject_rank(&skill, new_rank, registry);

        if new_rank == 1
            && let Some(unlock) = &skill.unlocks
        {
            player.unlock_ability(unlock.weapon, unlock.ability_id.as_str());
        }

        Ok(new_rank)
    }

    /// Full reset: refund every spent point, clear all ranks and branch
    /// points, revoke skill-granted ability unlocks, and purge every
    /// skill-tree modifier from the registry.
    pub fn reset(&mut self, player: &mut PlayerState, registry: &mut ModifierRegistry) {
        let mut refund = 0;
        for branch in &self.branches {
            for skill in &branch.skills {
                let rank = self.ranks.get(&skill.id).copied().unwrap_or(0);
                refund += rank * skill.cost_per_rank;
                if rank > 0
                    && let Some(unlock) = &skill.unlocks
                    && let Some(set) = player.unlocked_abilities.get_mut(&unlock.weapon)
                {
                    set.remove(&unlock.ability_id);
                }
            }
        }
        player.skill_points += refund;
        self.ranks.clear();
        self.branch_points.clear();
        registry.remove_by_source_prefix(SOURCE_PREFIX);
    }

    /// Re-derive every skill-tree modifier from the current ranks.
    ///
    /// Purges the skill-tree entries first, then re-injects rank by
    /// rank in branch declaration order, so a registry rebuilt from
    /// ranks matches one built by learning skills in that order.
    pub fn rebuild_modifiers(&self, registry: &mut ModifierRegistry) {
        registry.remove_by_source_prefix(SOURCE_PREFIX);
        for branch in &self.branches {
            for skill in &branch.skills {
                let rank = self.ranks.get(&skill.id).copied().unwrap_or(0);
                for r in 1..=rank {
                    inject_rank(skill, r, registry);
                }
            }
        }
    }
}

/// Inject one rank's worth of a skill's modifiers under a fresh tag.
fn inject_rank(skill: &Skill, rank: u32, registry: &mut ModifierRegistry) {
    let source = format!("{SOURCE_PREFIX}:{}:{rank}", skill.id);
    for modifier in &skill.modifiers {
        registry.add(
            modifier.scope.clone(),
            modifier.metric,
            modifier.kind,
            modifier.value,
            source.clone(),
        );
    }
}
