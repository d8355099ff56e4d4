//! Collaborator interfaces consumed, never implemented, by the core.
//!
//! Frontends plug these in; the session only calls them. Both are fire
//! and forget from the core's perspective.

/// A screen the session can hand control to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// The story reader.
    Story,
    /// The camp and its activities.
    Camp,
    /// A running battle.
    Battle,
    /// The game-over screen.
    GameOver,
}

/// A scene/screen transition service.
pub trait ScreenTransitions {
    /// Move the presentation from one screen to another.
    fn transition(&mut self, from: Screen, to: Screen);
}

/// A text display sink.
pub trait TextSink {
    /// Replace the displayed text.
    fn set_text(&mut self, text: &str);
    /// Append to the displayed text.
    fn append_text(&mut self, text: &str);
}
