//! Error types for the skill tree.

use thiserror::Error;

/// Result type for skill tree operations.
pub type SkillResult<T> = Result<T, SkillError>;

/// Errors that can occur when spending skill points.
///
/// The five rejection reasons of `apply_skill_point` are distinct
/// variants in validation order; none of them mutates any state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkillError {
    /// No branch with this id exists.
    #[error("unknown branch: {0}")]
    UnknownBranch(String),

    /// No skill with this id exists in the branch.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// The skill is already at its maximum rank.
    #[error("{skill} is already at max rank {rank}")]
    MaxRank {
        /// The skill id.
        skill: String,
        /// The rank it is capped at.
        rank: u32,
    },

    /// The player does not have enough skill points.
    #[error("not enough skill points: need {required}, have {available}")]
    InsufficientSkillPoints {
        /// Points the rank costs.
        required: u32,
        /// Points the player has.
        available: u32,
    },

    /// Too few points spent in the branch to reach this skill.
    #[error("branch locked: requires {required} points spent, have {spent}")]
    BranchLocked {
        /// Points that must already be spent in the branch.
        required: u32,
        /// Points actually spent so far.
        spent: u32,
    },

    /// A prerequisite skill is below its required rank.
    #[error("requires {skill} at rank {required_rank}")]
    PrerequisiteUnmet {
        /// The prerequisite skill id.
        skill: String,
        /// The rank it must have reached.
        required_rank: u32,
    },
}
