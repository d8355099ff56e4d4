//! Error types for the core player model.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while manipulating player state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An attribute name did not match any known ability score.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// A weapon type name did not match any of the four weapon types.
    #[error("unknown weapon type: {0}")]
    UnknownWeaponType(String),

    /// A stat bundle name did not match any starting template.
    #[error("unknown stat bundle: {0}")]
    UnknownBundle(String),

    /// The player cannot afford a gold cost.
    #[error("not enough gold: need {required}, have {available}")]
    InsufficientGold {
        /// Gold required by the purchase.
        required: u32,
        /// Gold the player currently holds.
        available: u32,
    },
}
