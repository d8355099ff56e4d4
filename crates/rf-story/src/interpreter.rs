//! The story graph walker.
//!
//! One node is active at a time. Advancing is two-staged wherever text
//! must be read first: the interpreter parks in an explicit
//! awaiting-acknowledgment mode and only moves when
//! [`StoryInterpreter::acknowledge`] is called. A stray acknowledgment
//! in any other mode is a no-op, which is what prevents a global
//! "click to advance" handler from advancing twice.

use serde::{Deserialize, Serialize};

use rf_combat::BattleKind;
use rf_core::PlayerState;

use crate::effect;
use crate::error::{StoryError, StoryResult};
use crate::node::{Chapter, Choice, NodeId, StoryNode};
use crate::progress::Progress;

/// An external screen the story hands control to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// The camp screen and its activities.
    Camp,
    /// A staged battle.
    Battle(BattleKind),
    /// The game-over screen.
    GameOver,
}

/// What the presentation layer should show after a story step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    /// Narrative or effect text to display.
    pub text: String,
    /// Visible choice texts, in offer order.
    pub choices: Vec<String>,
    /// True if the interpreter waits for an acknowledgment.
    pub awaiting_ack: bool,
    /// Set when control passes to an external screen.
    pub transition: Option<Transition>,
    /// True once the story has concluded.
    pub finished: bool,
}

/// Where an acknowledgment will take the story.
#[derive(Debug, Clone)]
enum AckTarget {
    /// Continue to a node in the active chapter.
    Node(NodeId),
    /// Swap to another chapter and enter its start node.
    Chapter(String),
    /// Conclude the story.
    Finish,
}

/// The interpreter's suspension state.
#[derive(Debug, Clone)]
enum Mode {
    /// Showing a node with choices.
    AtNode,
    /// Showing text; waiting for exactly one acknowledgment.
    AwaitingAck {
        /// The text being shown.
        text: String,
        /// Where the acknowledgment leads.
        target: AckTarget,
    },
    /// Control handed to an external screen.
    InTransition {
        /// The external screen.
        transition: Transition,
        /// Where the story resumes afterwards.
        next: Option<NodeId>,
    },
    /// The story has concluded.
    Finished,
}

/// Walks chapters of story nodes, one active node at a time.
#[derive(Debug, Clone)]
pub struct StoryInterpreter {
    chapters: Vec<Chapter>,
    current_chapter: String,
    current_node: NodeId,
    mode: Mode,
    progress: Progress,
}

impl StoryInterpreter {
    /// Create an interpreter over a chapter set.
    pub fn new(chapters: Vec<Chapter>, start_chapter: &str) -> StoryResult<Self> {
        let chapter = chapters
            .iter()
            .find(|c| c.id == start_chapter)
            .ok_or_else(|| StoryError::UnknownChapter(start_chapter.to_string()))?;
        let current_node = chapter.start;
        Ok(Self {
            current_chapter: start_chapter.to_string(),
            current_node,
            chapters,
            mode: Mode::AtNode,
            progress: Progress::new(),
        })
    }

    /// The active chapter id.
    pub fn chapter_id(&self) -> &str {
        &self.current_chapter
    }

    /// The active node id.
    pub fn node_id(&self) -> NodeId {
        self.current_node
    }

    /// Traversal progress (visited nodes, taken choices).
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Replace the traversal progress, e.g. from a save game.
    pub fn set_progress(&mut self, progress: Progress) {
        self.progress = progress;
    }

    /// Point the interpreter at a chapter and node without entering it.
    /// Used when restoring a save; follow with [`StoryInterpreter::enter`].
    pub fn restore_position(&mut self, chapter: &str, node: NodeId) -> StoryResult<()> {
        let found = self
            .chapters
            .iter()
            .find(|c| c.id == chapter)
            .ok_or_else(|| StoryError::UnknownChapter(chapter.to_string()))?;
        if found.get(node).is_none() {
            return Err(StoryError::UnknownNode(node));
        }
        self.current_chapter = chapter.to_string();
        self.current_node = node;
        self.mode = Mode::AtNode;
        Ok(())
    }

    /// True once the story has concluded.
    pub fn is_finished(&self) -> bool {
        matches!(self.mode, Mode::Finished)
    }

    /// True while the interpreter waits for an acknowledgment.
    pub fn is_awaiting_ack(&self) -> bool {
        matches!(self.mode, Mode::AwaitingAck { .. })
    }

    /// The external screen currently holding control, if any.
    pub fn pending_transition(&self) -> Option<Transition> {
        match &self.mode {
            Mode::InTransition { transition, .. } => Some(*transition),
            _ => None,
        }
    }

    /// Enter the active chapter's start node.
    pub fn start(&mut self, player: &mut PlayerState) -> StoryResult<StepView> {
        let start = self.chapter()?.start;
        self.enter(start, player)
    }

    /// Enter a node: mark it visited, run its entry effects, resolve a
    /// node-level stat check, and surface text, choices or a transition.
    pub fn enter(&mut self, id: NodeId, player: &mut PlayerState) -> StoryResult<StepView> {
        let node = self
            .chapter()?
            .get(id)
            .cloned()
            .ok_or(StoryError::UnknownNode(id))?;
        tracing::debug!(chapter = %self.current_chapter, node = %id, "entering story node");

        self.current_node = id;
        self.progress.mark_visited(&self.current_chapter, id);
        effect::apply_all(&node.on_enter, player);

        if let Some(check) = &node.stat_check {
            let score = player.attribute(check.attribute);
            let branch = if check.passes(score) {
                &check.success
            } else {
                &check.failure
            };
            effect::apply_all(&branch.effects, player);
            let mut text = node.text.clone();
            if let Some(extra) = &branch.text {
                text.push_str("\n\n");
                text.push_str(extra);
            }
            let target = self.target_after(&node, branch.next)?;
            self.mode = Mode::AwaitingAck { text, target };
            return Ok(self.render(player));
        }

        if let Some(transition) = node.transition {
            self.mode = Mode::InTransition {
                transition,
                next: node.next,
            };
            return Ok(self.render(player));
        }

        if !node.choices.is_empty() {
            self.mode = Mode::AtNode;
            return Ok(self.render(player));
        }

        let target = self.target_after(&node, None)?;
        self.mode = Mode::AwaitingAck {
            text: node.text.clone(),
            target,
        };
        Ok(self.render(player))
    }

    /// Select one of the currently visible choices by its position in
    /// the visible list.
    ///
    /// Choosing while no choices are offered is a forgiving no-op; an
    /// out-of-range index is an [`StoryError::InvalidChoice`]. Any
    /// response text parks the interpreter awaiting acknowledgment
    /// before the advance — the two-stage advance.
    pub fn choose(&mut self, visible_index: usize, player: &mut PlayerState) -> StoryResult<StepView> {
        if !matches!(self.mode, Mode::AtNode) {
            return Ok(self.render(player));
        }
        let node = self
            .chapter()?
            .get(self.current_node)
            .cloned()
            .ok_or(StoryError::UnknownNode(self.current_node))?;

        let visible = self.visible_choices(&node, player);
        let Some((declared_index, choice)) = visible
            .get(visible_index)
            .map(|(i, c)| (*i, (*c).clone()))
        else {
            return Err(StoryError::InvalidChoice(visible_index));
        };

        self.progress
            .mark_chosen(&self.current_chapter, self.current_node, declared_index);

        let (response, target) = if let Some(check) = &choice.stat_check {
            let branch = if check.passes(player.attribute(check.attribute)) {
                &check.success
            } else {
                &check.failure
            };
            effect::apply_all(&branch.effects, player);
            (branch.text.clone(), branch.next.unwrap_or(choice.next))
        } else {
            effect::apply_all(&choice.effects, player);
            (choice.response.clone(), choice.next)
        };

        match response {
            Some(text) => {
                self.mode = Mode::AwaitingAck {
                    text,
                    target: AckTarget::Node(target),
                };
                Ok(self.render(player))
            }
            None => self.enter(target, player),
        }
    }

    /// Resolve a pending acknowledgment and advance.
    ///
    /// Calling this in any other mode is a no-op that returns the
    /// current view unchanged, so a doubled "continue" cannot skip a
    /// step.
    pub fn acknowledge(&mut self, player: &mut PlayerState) -> StoryResult<StepView> {
        let Mode::AwaitingAck { target, .. } = &self.mode else {
            return Ok(self.render(player));
        };
        self.follow(target.clone(), player)
    }

    /// Resume the story after an external screen returns control.
    ///
    /// A no-op unless a transition is actually pending.
    pub fn resume_after_transition(&mut self, player: &mut PlayerState) -> StoryResult<StepView> {
        let Mode::InTransition { next, .. } = &self.mode else {
            return Ok(self.render(player));
        };
        let target = match next {
            Some(id) => AckTarget::Node(*id),
            None => {
                let node = self
                    .chapter()?
                    .get(self.current_node)
                    .cloned()
                    .ok_or(StoryError::UnknownNode(self.current_node))?;
                self.target_after(&node, None)?
            }
        };
        self.follow(target, player)
    }

    /// The current view, re-rendered without advancing.
    pub fn view(&self, player: &PlayerState) -> StepView {
        self.render(player)
    }

    fn follow(&mut self, target: AckTarget, player: &mut PlayerState) -> StoryResult<StepView> {
        match target {
            AckTarget::Node(id) => self.enter(id, player),
            AckTarget::Chapter(chapter_id) => {
                let start = self.find_chapter(&chapter_id)?.start;
                tracing::debug!(chapter = %chapter_id, "swapping chapter");
                self.current_chapter = chapter_id;
                self.enter(start, player)
            }
            AckTarget::Finish => {
                self.mode = Mode::Finished;
                Ok(self.render(player))
            }
        }
    }

    fn target_after(&self, node: &StoryNode, override_next: Option<NodeId>) -> StoryResult<AckTarget> {
        if let Some(next) = override_next.or(node.next) {
            return Ok(AckTarget::Node(next));
        }
        if let Some(ending) = &node.ending {
            return Ok(match &ending.next_chapter {
                Some(chapter) => AckTarget::Chapter(chapter.clone()),
                None => AckTarget::Finish,
            });
        }
        Err(StoryError::DeadEnd(node.id))
    }

    fn visible_choices<'a>(
        &self,
        node: &'a StoryNode,
        player: &PlayerState,
    ) -> Vec<(usize, &'a Choice)> {
        node.choices
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                c.condition
                    .as_ref()
                    .is_none_or(|cond| cond.evaluate(player, &self.progress, &self.current_chapter))
            })
            .collect()
    }

    fn render(&self, player: &PlayerState) -> StepView {
        let node_text = self
            .chapter()
            .ok()
            .and_then(|c| c.get(self.current_node))
            .map(|n| n.text.clone())
            .unwrap_or_default();

        match &self.mode {
            Mode::AtNode => {
                let choices = self
                    .chapter()
                    .ok()
                    .and_then(|c| c.get(self.current_node))
                    .map(|node| {
                        self.visible_choices(node, player)
                            .into_iter()
                            .map(|(_, c)| c.text.clone())
                            .collect()
                    })
                    .unwrap_or_default();
                StepView {
                    text: node_text,
                    choices,
                    awaiting_ack: false,
                    transition: None,
                    finished: false,
                }
            }
            Mode::AwaitingAck { text, .. } => StepView {
                text: text.clone(),
                choices: Vec::new(),
                awaiting_ack: true,
                transition: None,
                finished: false,
            },
            Mode::InTransition { transition, .. } => StepView {
                text: node_text,
                choices: Vec::new(),
                awaiting_ack: false,
                transition: Some(*transition),
                finished: false,
            },
            Mode::Finished => StepView {
                text: node_text,
                choices: Vec::new(),
                awaiting_ack: false,
                transition: None,
                finished: true,
            },
        }
    }

    fn chapter(&self) -> StoryResult<&Chapter> {
        self.find_chapter(&self.current_chapter)
    }

    fn find_chapter(&self, id: &str) -> StoryResult<&Chapter> {
        self.chapters
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| StoryError::UnknownChapter(id.to_string()))
    }
}
