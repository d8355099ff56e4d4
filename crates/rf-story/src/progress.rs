//! Tracks which nodes the player has visited and which choices they
//! have taken, across chapters.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// Visited-node and taken-choice bookkeeping.
///
/// Keys combine chapter id and node id, since each chapter is its own
/// node-id space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    visited: BTreeSet<String>,
    chosen: BTreeMap<String, BTreeSet<usize>>,
}

impl Progress {
    /// Create empty progress.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(chapter: &str, node: NodeId) -> String {
        format!("{chapter}/{node}")
    }

    /// Mark a node visited.
    pub fn mark_visited(&mut self, chapter: &str, node: NodeId) {
        self.visited.insert(Self::key(chapter, node));
    }

    /// Returns true if the node has been visited.
    pub fn has_visited(&self, chapter: &str, node: NodeId) -> bool {
        self.visited.contains(&Self::key(chapter, node))
    }

    /// Mark a choice (by declared index) as taken.
    pub fn mark_chosen(&mut self, chapter: &str, node: NodeId, index: usize) {
        self.chosen
            .entry(Self::key(chapter, node))
            .or_default()
            .insert(index);
    }

    /// Returns true if the choice (by declared index) has been taken.
    pub fn has_chosen(&self, chapter: &str, node: NodeId, index: usize) -> bool {
        self.chosen
            .get(&Self::key(chapter, node))
            .is_some_and(|set| set.contains(&index))
    }

    /// Forget everything (new game).
    pub fn reset(&mut self) {
        self.visited.clear();
        self.chosen.clear();
    }
}
