//! Error types for session orchestration.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by the session command surface.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A core player-model error.
    #[error(transparent)]
    Core(#[from] rf_core::CoreError),

    /// A combat engine error.
    #[error(transparent)]
    Combat(#[from] rf_combat::CombatError),

    /// A skill tree error.
    #[error(transparent)]
    Skill(#[from] rf_skills::SkillError),

    /// A story interpreter error.
    #[error(transparent)]
    Story(#[from] rf_story::StoryError),

    /// A battle command arrived with no battle running.
    #[error("no battle in progress")]
    NoBattle,

    /// A battle conclusion was requested before the battle ended.
    #[error("the battle is still running")]
    BattleStillRunning,

    /// Save file I/O failed.
    #[error("save i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Save (de)serialization failed.
    #[error("save format error: {0}")]
    Format(#[from] serde_json::Error),
}
