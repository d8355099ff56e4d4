//! Session orchestration for Ravenfall.
//!
//! [`GameSession`] is the composition root: it owns the player, the
//! modifier registry, the ability catalog, the skill tree, the story
//! interpreter, an optional running battle and the seeded RNG, and
//! exposes the command surface a frontend drives — story steps, battle
//! actions, skill points, camp activities, save and load. Nothing is
//! global; two sessions never share state.

pub mod camp;
pub mod config;
pub mod content;
pub mod error;
pub mod external;
pub mod save;
pub mod session;

pub use camp::{CampActivity, CampReport};
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use external::{Screen, ScreenTransitions, TextSink};
pub use session::{BattleConclusion, GameSession};
