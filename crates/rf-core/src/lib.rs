//! Core player model for Ravenfall: ability scores, resource pools,
//! leveling and weapon mastery, inventory, and story flags.
//!
//! Everything here is plain owned state. Nothing is global: callers create
//! a [`PlayerState`] from a named [`StatBundle`] and pass it into the
//! combat, skill and story crates explicitly, so independent sessions
//! (and tests) never share anything.

pub mod attribute;
pub mod bundle;
pub mod error;
pub mod flag;
pub mod item;
pub mod player;
pub mod pool;
pub mod progression;
pub mod weapon;

pub use attribute::Attribute;
pub use bundle::StatBundle;
pub use error::{CoreError, CoreResult};
pub use flag::FlagValue;
pub use item::Item;
pub use player::{Mastery, PlayerState};
pub use pool::Pool;
pub use weapon::WeaponType;
