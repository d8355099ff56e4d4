//! Story nodes, choices, stat checks, and chapters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use rf_combat::BattleKind;
use rf_core::Attribute;

use crate::condition::Condition;
use crate::effect::StoryEffect;
use crate::interpreter::Transition;

/// The id of a story node within a chapter.
///
/// The minor part models sub-steps (`5.1`, `5.2`) between whole-numbered
/// beats without resorting to fractional arithmetic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId {
    /// The whole-numbered beat.
    pub major: u32,
    /// The sub-step, 0 for whole nodes.
    pub minor: u32,
}

impl NodeId {
    /// A whole-numbered node id.
    pub const fn new(major: u32) -> Self {
        Self { major, minor: 0 }
    }

    /// A sub-step node id, displayed as `major.minor`.
    pub const fn sub(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.minor == 0 {
            write!(f, "{}", self.major)
        } else {
            write!(f, "{}.{}", self.major, self.minor)
        }
    }
}

/// One side of a stat check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckBranch {
    /// Descriptive text shown before continuing, if any.
    pub text: Option<String>,
    /// Effects applied when this side resolves.
    pub effects: Vec<StoryEffect>,
    /// Overrides the node's or choice's next node, if set.
    pub next: Option<NodeId>,
}

impl CheckBranch {
    /// A branch that only continues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the descriptive text.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: StoryEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Override the next node.
    pub fn with_next(mut self, next: NodeId) -> Self {
        self.next = Some(next);
        self
    }
}

/// A branch point resolved by comparing a player attribute to a
/// threshold. The threshold is inclusive: meeting it succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCheck {
    /// The attribute compared.
    pub attribute: Attribute,
    /// The value the attribute must reach.
    pub threshold: i32,
    /// Taken when `attribute >= threshold`.
    pub success: CheckBranch,
    /// Taken otherwise.
    pub failure: CheckBranch,
}

impl StatCheck {
    /// Create a stat check.
    pub fn new(attribute: Attribute, threshold: i32, success: CheckBranch, failure: CheckBranch) -> Self {
        Self {
            attribute,
            threshold,
            success,
            failure,
        }
    }

    /// Returns true if the player passes the check.
    pub fn passes(&self, score: i32) -> bool {
        score >= self.threshold
    }
}

/// A selectable option on a story node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// The option's display text.
    pub text: String,
    /// Where the choice leads.
    pub next: NodeId,
    /// Visibility predicate; hidden options are not offered at all.
    pub condition: Option<Condition>,
    /// Effects applied on selection.
    pub effects: Vec<StoryEffect>,
    /// Descriptive delta text shown before advancing, if any.
    pub response: Option<String>,
    /// A nested stat check resolved on selection, if any.
    pub stat_check: Option<StatCheck>,
}

impl Choice {
    /// Create a plain choice.
    pub fn new(text: &str, next: NodeId) -> Self {
        Self {
            text: text.to_string(),
            next,
            condition: None,
            effects: Vec::new(),
            response: None,
            stat_check: None,
        }
    }

    /// Gate the choice's visibility.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Add a selection effect.
    pub fn with_effect(mut self, effect: StoryEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the response text shown before advancing.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = Some(response.to_string());
        self
    }

    /// Resolve the choice through a stat check instead of flat effects.
    pub fn with_stat_check(mut self, check: StatCheck) -> Self {
        self.stat_check = Some(check);
        self
    }
}

/// How a terminal node concludes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ending {
    /// Chapter to swap to, or none to finish the story.
    pub next_chapter: Option<String>,
}

/// One node of the story graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryNode {
    /// The node's id within its chapter.
    pub id: NodeId,
    /// Narrative text.
    pub text: String,
    /// Where a plain node continues.
    pub next: Option<NodeId>,
    /// Offered options; mutually exclusive with a stat check.
    pub choices: Vec<Choice>,
    /// A node-level stat check resolved on entry.
    pub stat_check: Option<StatCheck>,
    /// Effects applied when the node is entered.
    pub on_enter: Vec<StoryEffect>,
    /// Hand control to an external screen before continuing.
    pub transition: Option<Transition>,
    /// Marks the node terminal, optionally swapping chapters.
    pub ending: Option<Ending>,
}

impl StoryNode {
    /// Create a plain text node.
    pub fn text(id: NodeId, text: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            next: None,
            choices: Vec::new(),
            stat_check: None,
            on_enter: Vec::new(),
            transition: None,
            ending: None,
        }
    }

    /// Continue to a node on acknowledgment.
    pub fn with_next(mut self, next: NodeId) -> Self {
        self.next = Some(next);
        self
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Resolve a stat check on entry.
    pub fn with_stat_check(mut self, check: StatCheck) -> Self {
        self.stat_check = Some(check);
        self
    }

    /// Add an on-entry effect.
    pub fn with_on_enter(mut self, effect: StoryEffect) -> Self {
        self.on_enter.push(effect);
        self
    }

    /// Hand control to an external screen before continuing.
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Mark the node terminal.
    pub fn with_ending(mut self, next_chapter: Option<&str>) -> Self {
        self.ending = Some(Ending {
            next_chapter: next_chapter.map(str::to_string),
        });
        self
    }

    /// Convenience: a battle transition node.
    pub fn battle(id: NodeId, text: &str, kind: BattleKind, next: NodeId) -> Self {
        Self::text(id, text)
            .with_transition(Transition::Battle(kind))
            .with_next(next)
    }
}

/// An independently addressable node-id space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Stable chapter id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// The node the chapter opens on.
    pub start: NodeId,
    nodes: HashMap<NodeId, StoryNode>,
}

impl Chapter {
    /// Create a chapter from its nodes.
    pub fn new(id: &str, title: &str, start: NodeId, nodes: Vec<StoryNode>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            start,
            nodes: nodes.into_iter().map(|n| (n.id, n)).collect(),
        }
    }

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&StoryNode> {
        self.nodes.get(&id)
    }

    /// Number of nodes in the chapter.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the chapter holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_display() {
        assert_eq!(NodeId::new(5).to_string(), "5");
        assert_eq!(NodeId::sub(5, 1).to_string(), "5.1");
    }

    #[test]
    fn node_id_ordering() {
        assert!(NodeId::new(5) < NodeId::sub(5, 1));
        assert!(NodeId::sub(5, 2) < NodeId::new(6));
    }

    #[test]
    fn stat_check_threshold_is_inclusive() {
        let check = StatCheck::new(
            Attribute::Agility,
            6,
            CheckBranch::new(),
            CheckBranch::new(),
        );
        assert!(check.passes(6), "meeting the threshold succeeds");
        assert!(check.passes(7));
        assert!(!check.passes(5));
    }

    #[test]
    fn chapter_lookup() {
        let chapter = Chapter::new(
            "ashes",
            "Ashes",
            NodeId::new(1),
            vec![
                StoryNode::text(NodeId::new(1), "The village still smolders."),
                StoryNode::text(NodeId::sub(1, 1), "You find tracks leading north."),
            ],
        );
        assert_eq!(chapter.len(), 2);
        assert!(chapter.get(NodeId::sub(1, 1)).is_some());
        assert!(chapter.get(NodeId::new(9)).is_none());
    }
}
