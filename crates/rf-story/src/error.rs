//! Error types for the story interpreter.

use thiserror::Error;

use crate::node::NodeId;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while walking the story graph.
///
/// Unknown ids and dead ends are authoring bugs: fatal, not retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoryError {
    /// No chapter with this id exists.
    #[error("unknown chapter: {0}")]
    UnknownChapter(String),

    /// No node with this id exists in the active chapter.
    #[error("unknown story node: {0}")]
    UnknownNode(NodeId),

    /// The selected choice index is not among the visible choices.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// A node has no way to continue: no next, no choices, no ending.
    #[error("story node {0} is a dead end")]
    DeadEnd(NodeId),
}
