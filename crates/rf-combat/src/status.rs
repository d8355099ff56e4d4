//! Status effects and per-turn ticking.

use serde::{Deserialize, Serialize};

use rf_core::Pool;

/// The kinds of status effect an ability can inflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    /// Damage over time from an open wound.
    Bleed,
    /// Damage over time from venom.
    Poison,
    /// Damage over time from fire.
    Burn,
    /// Skip the victim's next action.
    Stun,
    /// Reduce the victim's outgoing damage while active.
    Weaken,
}

impl StatusKind {
    /// The display name of the status.
    pub fn name(&self) -> &'static str {
        match self {
            StatusKind::Bleed => "bleed",
            StatusKind::Poison => "poison",
            StatusKind::Burn => "burn",
            StatusKind::Stun => "stun",
            StatusKind::Weaken => "weaken",
        }
    }

    /// Returns true if the status deals damage each turn.
    pub fn is_damage_over_time(&self) -> bool {
        matches!(
            self,
            StatusKind::Bleed | StatusKind::Poison | StatusKind::Burn
        )
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An active status effect on the enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// What the effect does.
    pub kind: StatusKind,
    /// Base damage per tick (DOT kinds only).
    pub damage: u32,
    /// Turns remaining, decremented once per tick.
    pub duration: u32,
    /// Strength multiplier; DOT damage is `floor(damage * power)`,
    /// weaken reduces outgoing damage by this fraction.
    pub power: f64,
}

/// The result of ticking all active statuses once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusTick {
    /// Human-readable message. A single slot: when several effects
    /// resolve in one tick only the last message survives.
    pub message: Option<String>,
    /// True if a stun resolved this tick.
    pub stun: bool,
    /// Total DOT damage dealt this tick.
    pub damage_dealt: u32,
}

/// Tick every active effect once against the target's health pool.
///
/// Effects resolve in list order; afterwards every duration decrements
/// and expired effects are pruned. Weaken does not act here — its
/// reduction applies where outgoing damage is computed.
pub fn tick_statuses(effects: &mut Vec<StatusEffect>, target_health: &mut Pool) -> StatusTick {
    let mut tick = StatusTick::default();

    for effect in effects.iter() {
        match effect.kind {
            StatusKind::Bleed => {
                let dealt = tick_damage(effect);
                target_health.adjust(-i32::try_from(dealt).unwrap_or(i32::MAX));
                tick.damage_dealt += dealt;
                tick.message = Some(format!("The enemy's wounds bleed for {dealt} damage."));
            }
            StatusKind::Poison => {
                let dealt = tick_damage(effect);
                target_health.adjust(-i32::try_from(dealt).unwrap_or(i32::MAX));
                tick.damage_dealt += dealt;
                tick.message = Some(format!("Poison eats at the enemy for {dealt} damage."));
            }
            StatusKind::Burn => {
                let dealt = tick_damage(effect);
                target_health.adjust(-i32::try_from(dealt).unwrap_or(i32::MAX));
                tick.damage_dealt += dealt;
                tick.message = Some(format!("Flames sear the enemy for {dealt} damage."));
            }
            StatusKind::Stun => {
                tick.stun = true;
                tick.message = Some("The enemy is stunned!".to_string());
            }
            StatusKind::Weaken => {
                tick.message = Some("The enemy's blows are weakened.".to_string());
            }
        }
    }

    for effect in effects.iter_mut() {
        effect.duration = effect.duration.saturating_sub(1);
    }
    effects.retain(|e| e.duration > 0);

    tick
}

/// DOT damage for one tick: `floor(damage * power)`.
fn tick_damage(effect: &StatusEffect) -> u32 {
    let raw = f64::from(effect.damage) * effect.power;
    if raw <= 0.0 { 0 } else { raw.floor() as u32 }
}

/// The outgoing-damage factor from any active weaken effects.
///
/// The strongest active weaken wins; with none active the factor is 1.
pub fn weaken_factor(effects: &[StatusEffect]) -> f64 {
    effects
        .iter()
        .filter(|e| e.kind == StatusKind::Weaken)
        .map(|e| (1.0 - e.power).clamp(0.0, 1.0))
        .fold(1.0, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bleed(damage: u32, duration: u32, power: f64) -> StatusEffect {
        StatusEffect {
            kind: StatusKind::Bleed,
            damage,
            duration,
            power,
        }
    }

    #[test]
    fn dot_damages_and_floors() {
        let mut effects = vec![bleed(5, 2, 1.5)];
        let mut health = Pool::new(50);
        let tick = tick_statuses(&mut effects, &mut health);
        assert_eq!(tick.damage_dealt, 7, "floor(5 * 1.5)");
        assert_eq!(health.current(), 43);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].duration, 1);
    }

    #[test]
    fn expired_effects_are_pruned() {
        let mut effects = vec![bleed(2, 1, 1.0)];
        let mut health = Pool::new(50);
        tick_statuses(&mut effects, &mut health);
        assert!(effects.is_empty());
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut effects = vec![bleed(100, 3, 2.0)];
        let mut health = Pool::new(20);
        let tick = tick_statuses(&mut effects, &mut health);
        assert_eq!(tick.damage_dealt, 200);
        assert_eq!(health.current(), 0);
    }

    #[test]
    fn only_last_message_survives() {
        let mut effects = vec![
            bleed(3, 2, 1.0),
            StatusEffect {
                kind: StatusKind::Weaken,
                damage: 0,
                duration: 2,
                power: 0.25,
            },
        ];
        let mut health = Pool::new(50);
        let tick = tick_statuses(&mut effects, &mut health);
        assert_eq!(
            tick.message.as_deref(),
            Some("The enemy's blows are weakened.")
        );
        assert_eq!(tick.damage_dealt, 3, "the bleed still resolved");
    }

    #[test]
    fn stun_sets_flag_without_damage() {
        let mut effects = vec![StatusEffect {
            kind: StatusKind::Stun,
            damage: 0,
            duration: 1,
            power: 1.0,
        }];
        let mut health = Pool::new(50);
        let tick = tick_statuses(&mut effects, &mut health);
        assert!(tick.stun);
        assert_eq!(tick.damage_dealt, 0);
        assert!(effects.is_empty());
    }

    #[test]
    fn weaken_factor_takes_strongest() {
        let effects = vec![
            StatusEffect {
                kind: StatusKind::Weaken,
                damage: 0,
                duration: 2,
                power: 0.25,
            },
            StatusEffect {
                kind: StatusKind::Weaken,
                damage: 0,
                duration: 2,
                power: 0.5,
            },
        ];
        assert!((weaken_factor(&effects) - 0.5).abs() < f64::EPSILON);
        assert!((weaken_factor(&[]) - 1.0).abs() < f64::EPSILON);
    }
}
