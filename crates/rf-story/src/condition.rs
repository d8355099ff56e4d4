//! Visibility conditions on story choices.

use serde::{Deserialize, Serialize};

use rf_core::{Attribute, PlayerState};

use crate::node::NodeId;
use crate::progress::Progress;

/// A predicate deciding whether a choice is offered.
///
/// Conditions evaluate against the player and the traversal progress of
/// the active chapter; the most common use is hiding a once-only option
/// after it has been taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// True until the node has been visited.
    NotVisited(NodeId),
    /// True until the choice (node + declared index) has been taken.
    NotChosen {
        /// The node carrying the choice.
        node: NodeId,
        /// The declared index of the choice on that node.
        index: usize,
    },
    /// True if the flag exists and is truthy.
    FlagSet(String),
    /// True if the flag is absent or falsy.
    FlagNotSet(String),
    /// True if an attribute meets a minimum (inclusive).
    MinAttribute {
        /// The attribute tested.
        attribute: Attribute,
        /// The minimum score.
        min: i32,
    },
    /// True if reputation meets a minimum (inclusive).
    MinReputation(i32),
    /// True if the player carries at least one of the item.
    HasItem(String),
    /// Logical NOT.
    Not(Box<Condition>),
    /// True when every inner condition holds.
    All(Vec<Condition>),
    /// True when any inner condition holds.
    Any(Vec<Condition>),
}

impl Condition {
    /// Evaluate against the player and the active chapter's progress.
    pub fn evaluate(&self, player: &PlayerState, progress: &Progress, chapter: &str) -> bool {
        match self {
            Condition::NotVisited(node) => !progress.has_visited(chapter, *node),
            Condition::NotChosen { node, index } => !progress.has_chosen(chapter, *node, *index),
            Condition::FlagSet(key) => player.flag_is_set(key),
            Condition::FlagNotSet(key) => !player.flag_is_set(key),
            Condition::MinAttribute { attribute, min } => player.attribute(*attribute) >= *min,
            Condition::MinReputation(min) => player.reputation >= *min,
            Condition::HasItem(name) => player.has_item(name),
            Condition::Not(inner) => !inner.evaluate(player, progress, chapter),
            Condition::All(conditions) => conditions
                .iter()
                .all(|c| c.evaluate(player, progress, chapter)),
            Condition::Any(conditions) => conditions
                .iter()
                .any(|c| c.evaluate(player, progress, chapter)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_core::bundle;

    fn player() -> PlayerState {
        PlayerState::from_bundle(&bundle::preset::wanderer())
    }

    #[test]
    fn not_chosen_hides_taken_options() {
        let mut progress = Progress::new();
        let cond = Condition::NotChosen {
            node: NodeId::new(3),
            index: 0,
        };
        assert!(cond.evaluate(&player(), &progress, "ashes"));
        progress.mark_chosen("ashes", NodeId::new(3), 0);
        assert!(!cond.evaluate(&player(), &progress, "ashes"));
    }

    #[test]
    fn flags() {
        let mut p = player();
        let progress = Progress::new();
        let set = Condition::FlagSet("oath".to_string());
        let not_set = Condition::FlagNotSet("oath".to_string());
        assert!(!set.evaluate(&p, &progress, "ashes"));
        assert!(not_set.evaluate(&p, &progress, "ashes"));
        p.set_flag("oath", true);
        assert!(set.evaluate(&p, &progress, "ashes"));
        assert!(!not_set.evaluate(&p, &progress, "ashes"));
    }

    #[test]
    fn min_attribute_inclusive() {
        let p = player();
        let progress = Progress::new();
        let cond = Condition::MinAttribute {
            attribute: Attribute::Charisma,
            min: 6,
        };
        assert!(cond.evaluate(&p, &progress, "ashes"), "6 >= 6");
        let harder = Condition::MinAttribute {
            attribute: Attribute::Charisma,
            min: 7,
        };
        assert!(!harder.evaluate(&p, &progress, "ashes"));
    }

    #[test]
    fn combinators() {
        let mut p = player();
        p.set_flag("a", true);
        let progress = Progress::new();

        let both = Condition::All(vec![
            Condition::FlagSet("a".to_string()),
            Condition::FlagSet("b".to_string()),
        ]);
        assert!(!both.evaluate(&p, &progress, "ashes"));

        let either = Condition::Any(vec![
            Condition::FlagSet("a".to_string()),
            Condition::FlagSet("b".to_string()),
        ]);
        assert!(either.evaluate(&p, &progress, "ashes"));

        let negated = Condition::Not(Box::new(Condition::FlagSet("b".to_string())));
        assert!(negated.evaluate(&p, &progress, "ashes"));
    }
}
