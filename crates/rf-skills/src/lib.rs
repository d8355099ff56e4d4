//! Skill tree resolver for Ravenfall.
//!
//! Skills live in branches; spending a skill point on a skill raises
//! its rank, injects the skill's modifiers into the combat registry
//! (one fresh entry per rank, so ranks stack additively) and may unlock
//! a weapon ability. Validation is ordered and every failure mode is
//! its own error kind, so callers can tell a locked branch from an
//! unmet prerequisite.

pub mod error;
pub mod preset;
pub mod skill;
pub mod tree;

pub use error::{SkillError, SkillResult};
pub use skill::{AbilityUnlock, Prerequisite, Skill, SkillModifier};
pub use tree::{Branch, SkillTree};
