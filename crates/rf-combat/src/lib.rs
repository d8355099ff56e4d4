//! Combat engine for Ravenfall.
//!
//! The crate is layered leaves-first: the [`modifier`] registry holds
//! stackable stat adjustments, [`formula`] computes hit/feint/critical
//! chances and armor reduction from player and enemy stats, [`ability`]
//! describes weapon abilities as data interpreted by one evaluator,
//! [`status`] ticks damage-over-time effects, and [`battle`] sequences
//! all of it into a turn-based encounter.
//!
//! Nothing here owns randomness: every stochastic function takes
//! `&mut StdRng`, so a seeded session replays identically.

pub mod ability;
pub mod battle;
pub mod enemy;
pub mod error;
pub mod formula;
pub mod modifier;
pub mod status;

pub use ability::{Ability, AbilityCatalog, DamageKind, StatusApplication};
pub use battle::{Battle, BattleEvent, Outcome, Phase, PlayerAction};
pub use enemy::{AttackProfile, BattleKind, EnemyTemplate};
pub use error::{CombatError, CombatResult};
pub use formula::{CriticalHit, HitChanceInput};
pub use modifier::{Metric, Modifier, ModifierContext, ModifierKind, ModifierRegistry, Scope};
pub use status::{StatusEffect, StatusKind, StatusTick};
