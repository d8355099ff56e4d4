//! Error types for the combat engine.

use rf_core::WeaponType;
use thiserror::Error;

/// Result type for combat operations.
pub type CombatResult<T> = Result<T, CombatError>;

/// Errors that can occur during battle setup and action resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CombatError {
    /// The action costs more energy than the player has. The action is
    /// rejected without any state mutation.
    #[error("not enough energy: need {required}, have {available}")]
    InsufficientEnergy {
        /// Energy the action costs.
        required: i32,
        /// Energy currently available.
        available: i32,
    },

    /// No ability with this id exists in the catalog.
    #[error("unknown ability: {0}")]
    UnknownAbility(String),

    /// The ability exists but has not been unlocked by the skill tree.
    #[error("ability not yet unlocked: {0}")]
    AbilityLocked(String),

    /// The ability belongs to a different weapon than the one equipped.
    #[error("ability {ability} does not fit the equipped {equipped}")]
    WrongWeapon {
        /// The requested ability id.
        ability: String,
        /// The weapon the player has equipped.
        equipped: WeaponType,
    },

    /// The equipped weapon has no abilities in the catalog. This is an
    /// authoring bug, fatal at battle initialization.
    #[error("no abilities configured for weapon type {0}")]
    NoAbilities(WeaponType),
}
