//! The turn-based battle state machine.
//!
//! A [`Battle`] is ephemeral: it snapshots the player's pools at start,
//! runs player and enemy turns against copies, and only writes back
//! into [`PlayerState`] on victory. Every resolution step returns an
//! ordered list of [`BattleEvent`]s; the caller decides pacing and
//! presentation.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use rf_core::{PlayerState, Pool, WeaponType};

use crate::ability::{self, AbilityCatalog};
use crate::enemy::{AttackProfile, BattleKind, EnemyTemplate};
use crate::error::{CombatError, CombatResult};
use crate::formula::{self, HitChanceInput};
use crate::modifier::{Metric, ModifierContext, ModifierRegistry};
use crate::status::{self, StatusEffect};

/// Energy cost of a feint attempt.
const FEINT_COST: i32 = 5;
/// Enemy energy drained by a successful feint.
const FEINT_DRAIN: i32 = 15;
/// Extra energy the player loses when a feint fails.
const FEINT_PENALTY: i32 = 5;
/// Energy cost of a throw.
const THROW_COST: i32 = 4;
/// Throw damage band.
const THROW_DAMAGE: std::ops::RangeInclusive<u32> = 4..=10;
/// Recover restoration band, shared by player and enemy.
const RECOVER_AMOUNT: std::ops::RangeInclusive<i32> = 10..=20;
/// Base chance for an armed evade to dodge fully.
const EVADE_BASE: f64 = 0.30;
/// Evade chance per point of agility.
const EVADE_PER_AGILITY: f64 = 0.05;
/// Evade chance cap.
const EVADE_CAP: f64 = 0.80;

/// Whose turn it is, or how the battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Awaiting a player action.
    Player,
    /// The enemy acts next.
    Enemy,
    /// Terminal; no further actions are permitted.
    Ended(Outcome),
}

/// How a battle concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The enemy fell.
    Victory,
    /// The player fell.
    Defeat,
}

/// An action the player can submit on their turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    /// Use a weapon ability by id.
    UseAbility(String),
    /// Attempt to drain enemy energy with a feint.
    Feint,
    /// A flat random-damage throw, independent of the ability system.
    Throw,
    /// Halve the next incoming hit.
    Defend,
    /// Restore energy.
    Recover,
    /// Arm a full-dodge attempt against the next enemy attack.
    Evade,
}

/// One resolved step of a battle.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    /// A player ability landed.
    AbilityHit {
        /// Ability name.
        ability: String,
        /// Damage dealt after all multipliers.
        damage: u32,
        /// True if the hit was critical.
        critical: bool,
    },
    /// A player ability missed.
    AbilityMissed {
        /// Ability name.
        ability: String,
    },
    /// A status effect stuck to the enemy.
    StatusInflicted {
        /// The inflicted status.
        kind: status::StatusKind,
    },
    /// The per-turn status message (single slot).
    StatusMessage {
        /// Human-readable text.
        text: String,
    },
    /// A feint succeeded and drained enemy energy.
    FeintSucceeded {
        /// Energy drained.
        drained: i32,
    },
    /// A feint failed, costing extra energy.
    FeintFailed {
        /// Extra energy lost.
        penalty: i32,
    },
    /// A thrown weapon connected.
    ThrowHit {
        /// Damage dealt.
        damage: u32,
    },
    /// The player braced behind their guard.
    Defended,
    /// The player recovered energy.
    Recovered {
        /// Energy restored.
        amount: i32,
    },
    /// The player is watching for an opening to dodge.
    EvadeReadied,
    /// The armed evade paid off; the attack missed entirely.
    Dodged {
        /// The enemy attack that was avoided.
        attack: String,
    },
    /// The enemy lost its action to a stun.
    EnemyStunned,
    /// The enemy paused to catch its breath.
    EnemyRecovered {
        /// Energy restored.
        amount: i32,
    },
    /// An enemy attack landed.
    EnemyHit {
        /// Attack label.
        attack: String,
        /// Damage dealt after weaken, guard and armor.
        damage: u32,
    },
    /// An enemy attack missed.
    EnemyMissed {
        /// Attack label.
        attack: String,
    },
    /// The battle reached a terminal state.
    Ended {
        /// Victory or defeat.
        outcome: Outcome,
    },
    /// Weapon-mastery experience was granted.
    WeaponExperienceGained {
        /// The weapon track.
        weapon: WeaponType,
        /// Experience amount.
        amount: u32,
    },
    /// A weapon-mastery level was reached.
    MasteryLeveled {
        /// The weapon track.
        weapon: WeaponType,
        /// The new mastery level.
        level: u32,
    },
}

impl std::fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AbilityHit {
                ability,
                damage,
                critical: true,
            } => write!(f, "{ability} strikes true — a critical hit for {damage}!"),
            Self::AbilityHit {
                ability, damage, ..
            } => write!(f, "{ability} lands for {damage} damage."),
            Self::AbilityMissed { ability } => write!(f, "{ability} misses."),
            Self::StatusInflicted { kind } => write!(f, "The enemy suffers {kind}."),
            Self::StatusMessage { text } => write!(f, "{text}"),
            Self::FeintSucceeded { drained } => {
                write!(f, "The feint works; the enemy wastes {drained} energy.")
            }
            Self::FeintFailed { penalty } => {
                write!(f, "The feint is read; you overextend for {penalty} energy.")
            }
            Self::ThrowHit { damage } => write!(f, "The throw bites for {damage} damage."),
            Self::Defended => write!(f, "You raise your guard."),
            Self::Recovered { amount } => write!(f, "You recover {amount} energy."),
            Self::EvadeReadied => write!(f, "You watch for an opening to slip aside."),
            Self::Dodged { attack } => write!(f, "You slip clear of the {attack}."),
            Self::EnemyStunned => write!(f, "The enemy reels, losing its turn."),
            Self::EnemyRecovered { amount } => {
                write!(f, "The enemy steadies itself, recovering {amount} energy.")
            }
            Self::EnemyHit { attack, damage } => {
                write!(f, "The {attack} catches you for {damage} damage.")
            }
            Self::EnemyMissed { attack } => write!(f, "The {attack} goes wide."),
            Self::Ended {
                outcome: Outcome::Victory,
            } => write!(f, "The enemy falls."),
            Self::Ended {
                outcome: Outcome::Defeat,
            } => write!(f, "You fall."),
            Self::WeaponExperienceGained { weapon, amount } => {
                write!(f, "+{amount} {weapon} experience.")
            }
            Self::MasteryLeveled { weapon, level } => {
                write!(f, "Your {weapon} mastery rises to level {level}!")
            }
        }
    }
}

/// The ephemeral state of one battle.
#[derive(Debug, Clone)]
pub struct Battle {
    kind: BattleKind,
    enemy: EnemyTemplate,
    enemy_health: Pool,
    enemy_energy: Pool,
    player_health: Pool,
    player_energy: Pool,
    phase: Phase,
    defending: bool,
    evading: bool,
    enemy_stunned: bool,
    statuses: Vec<StatusEffect>,
    turn: u32,
    log: Vec<BattleEvent>,
}

impl Battle {
    /// Start a battle: snapshot the player's pools, copy the enemy
    /// template for the battle kind, phase `Player`.
    ///
    /// Fails fast if the equipped weapon has no abilities configured —
    /// that is an authoring bug, not a recoverable condition.
    pub fn new(
        kind: BattleKind,
        player: &PlayerState,
        catalog: &AbilityCatalog,
    ) -> CombatResult<Self> {
        if catalog.for_weapon(player.equipped_weapon).is_empty() {
            return Err(CombatError::NoAbilities(player.equipped_weapon));
        }
        let enemy = kind.template();
        Ok(Self {
            kind,
            enemy_health: Pool::new(enemy.health),
            enemy_energy: Pool::new(enemy.energy),
            player_health: player.health,
            player_energy: player.energy,
            enemy,
            phase: Phase::Player,
            defending: false,
            evading: false,
            enemy_stunned: false,
            statuses: Vec::new(),
            turn: 1,
            log: Vec::new(),
        })
    }

    /// Which staged battle this is.
    pub fn kind(&self) -> BattleKind {
        self.kind
    }

    /// The enemy template in play.
    pub fn enemy(&self) -> &EnemyTemplate {
        &self.enemy
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The terminal outcome, once the battle has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Current turn number (1-based).
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// The player's health snapshot.
    pub fn player_health(&self) -> Pool {
        self.player_health
    }

    /// The player's energy snapshot.
    pub fn player_energy(&self) -> Pool {
        self.player_energy
    }

    /// The enemy's health.
    pub fn enemy_health(&self) -> Pool {
        self.enemy_health
    }

    /// The enemy's energy.
    pub fn enemy_energy(&self) -> Pool {
        self.enemy_energy
    }

    /// Status effects currently on the enemy.
    pub fn statuses(&self) -> &[StatusEffect] {
        &self.statuses
    }

    /// Everything that has happened so far, in order.
    pub fn log(&self) -> &[BattleEvent] {
        &self.log
    }

    /// Validate an energy cost against the battle snapshot and deduct
    /// it. Rejection happens before any other mutation.
    fn spend_energy(&mut self, cost: i32) -> CombatResult<()> {
        let available = self.player_energy.current();
        if cost > available {
            return Err(CombatError::InsufficientEnergy {
                required: cost,
                available,
            });
        }
        self.player_energy.adjust(-cost);
        Ok(())
    }

    /// Resolve a player action.
    ///
    /// Outside the `Player` phase this is a silent no-op (empty event
    /// list), matching forgiving input handling. Validation failures —
    /// unknown/locked/mismatched abilities, insufficient energy — are
    /// typed errors and mutate nothing.
    pub fn submit_player_action(
        &mut self,
        action: &PlayerAction,
        player: &PlayerState,
        registry: &ModifierRegistry,
        catalog: &AbilityCatalog,
        rng: &mut StdRng,
    ) -> CombatResult<Vec<BattleEvent>> {
        if self.phase != Phase::Player {
            return Ok(Vec::new());
        }
        tracing::debug!(turn = self.turn, ?action, "resolving player action");

        let mut events = Vec::new();
        match action {
            PlayerAction::UseAbility(id) => {
                self.resolve_ability(id, player, registry, catalog, rng, &mut events)?;
            }
            PlayerAction::Feint => {
                self.spend_energy(FEINT_COST)?;
                let ctx = ModifierContext::weapon(player.equipped_weapon);
                let chance = formula::feint_chance(
                    player.attribute(rf_core::Attribute::Agility),
                    self.enemy.coordination,
                    registry,
                    &ctx,
                );
                if rng.random::<f64>() < chance {
                    self.enemy_energy.adjust(-FEINT_DRAIN);
                    events.push(BattleEvent::FeintSucceeded {
                        drained: FEINT_DRAIN,
                    });
                } else {
                    self.player_energy.adjust(-FEINT_PENALTY);
                    events.push(BattleEvent::FeintFailed {
                        penalty: FEINT_PENALTY,
                    });
                }
            }
            PlayerAction::Throw => {
                self.spend_energy(THROW_COST)?;
                let damage = rng.random_range(THROW_DAMAGE);
                self.enemy_health.adjust(-to_delta(damage));
                events.push(BattleEvent::ThrowHit { damage });
            }
            PlayerAction::Defend => {
                self.defending = true;
                events.push(BattleEvent::Defended);
            }
            PlayerAction::Recover => {
                let before = self.player_energy.current();
                self.player_energy.adjust(rng.random_range(RECOVER_AMOUNT));
                events.push(BattleEvent::Recovered {
                    amount: self.player_energy.current() - before,
                });
            }
            PlayerAction::Evade => {
                self.evading = true;
                events.push(BattleEvent::EvadeReadied);
            }
        }

        if self.enemy_health.is_depleted() {
            self.phase = Phase::Ended(Outcome::Victory);
            events.push(BattleEvent::Ended {
                outcome: Outcome::Victory,
            });
        } else {
            self.phase = Phase::Enemy;
        }

        self.log.extend(events.iter().cloned());
        Ok(events)
    }

    fn resolve_ability(
        &mut self,
        id: &str,
        player: &PlayerState,
        registry: &ModifierRegistry,
        catalog: &AbilityCatalog,
        rng: &mut StdRng,
        events: &mut Vec<BattleEvent>,
    ) -> CombatResult<()> {
        let Some(chosen) = catalog.get(id) else {
            return Err(CombatError::UnknownAbility(id.to_string()));
        };
        if chosen.weapon != player.equipped_weapon {
            return Err(CombatError::WrongWeapon {
                ability: id.to_string(),
                equipped: player.equipped_weapon,
            });
        }
        if chosen.requires_unlock && !player.has_unlocked(chosen.weapon, &chosen.id) {
            return Err(CombatError::AbilityLocked(id.to_string()));
        }
        let chosen = chosen.clone();
        self.spend_energy(chosen.energy_cost)?;

        let ctx = ModifierContext::ability(chosen.weapon, chosen.id.as_str());
        let input = HitChanceInput {
            attacker_weapon_skill: player.attribute(rf_core::Attribute::WeaponSkill),
            defender_agility: self.enemy.agility,
            defender_energy: self.enemy_energy.current(),
            defender_max_energy: self.enemy_energy.max(),
            defender_endurance: self.enemy.endurance,
            ability_modifier: chosen.hit_modifier,
            defending: false,
        };
        let chance = formula::hit_chance(&input, registry, &ctx);

        if rng.random::<f64>() >= chance {
            events.push(BattleEvent::AbilityMissed {
                ability: chosen.name.clone(),
            });
            return Ok(());
        }

        let crit = formula::roll_critical(registry, &ctx, rng);
        let damage = ability::evaluate_damage(
            chosen.damage,
            ability::weapon_base_damage(chosen.weapon),
            &player.attributes,
            player.weapon_damage_bonus(chosen.weapon),
            crit.multiplier,
            registry,
            &ctx,
        );
        self.enemy_health.adjust(-to_delta(damage));
        events.push(BattleEvent::AbilityHit {
            ability: chosen.name.clone(),
            damage,
            critical: crit.is_critical,
        });

        if let Some(app) = &chosen.status
            && !self.enemy_health.is_depleted()
        {
            let chance = registry
                .apply(app.chance, Metric::StatusChance, &ctx)
                .clamp(0.0, 1.0);
            if rng.random::<f64>() < chance {
                let duration = registry
                    .apply(f64::from(app.duration), Metric::StatusDuration, &ctx)
                    .floor()
                    .max(1.0) as u32;
                let power = registry.apply(app.power, Metric::StatusPower, &ctx);
                self.statuses.push(StatusEffect {
                    kind: app.kind,
                    damage: app.damage,
                    duration,
                    power,
                });
                events.push(BattleEvent::StatusInflicted { kind: app.kind });
            }
        }
        Ok(())
    }

    /// Resolve the enemy's turn.
    ///
    /// Status effects tick first and can end the battle on their own; a
    /// stunned enemy loses its action; a winded enemy may pause to
    /// recover; otherwise it picks uniformly among its three attacks.
    /// The defending/evading flags are consumed and reset here.
    pub fn resolve_enemy_turn(
        &mut self,
        player: &PlayerState,
        registry: &ModifierRegistry,
        rng: &mut StdRng,
    ) -> Vec<BattleEvent> {
        if self.phase != Phase::Enemy {
            return Vec::new();
        }
        tracing::debug!(turn = self.turn, "resolving enemy turn");

        let mut events = Vec::new();
        let tick = status::tick_statuses(&mut self.statuses, &mut self.enemy_health);
        if let Some(text) = tick.message {
            events.push(BattleEvent::StatusMessage { text });
        }
        if tick.stun {
            self.enemy_stunned = true;
        }
        if self.enemy_health.is_depleted() {
            self.phase = Phase::Ended(Outcome::Victory);
            events.push(BattleEvent::Ended {
                outcome: Outcome::Victory,
            });
            self.defending = false;
            self.evading = false;
            self.log.extend(events.iter().cloned());
            return events;
        }

        if self.enemy_stunned {
            self.enemy_stunned = false;
            events.push(BattleEvent::EnemyStunned);
        } else if self.enemy_energy.fraction() < 0.5 && rng.random_bool(0.5) {
            let before = self.enemy_energy.current();
            self.enemy_energy.adjust(rng.random_range(RECOVER_AMOUNT));
            events.push(BattleEvent::EnemyRecovered {
                amount: self.enemy_energy.current() - before,
            });
        } else {
            let profile = self.pick_attack(rng).clone();
            self.enemy_energy.adjust(-profile.energy_cost);
            self.resolve_enemy_attack(&profile, player, registry, rng, &mut events);
        }

        self.defending = false;
        self.evading = false;

        if self.player_health.is_depleted() {
            self.phase = Phase::Ended(Outcome::Defeat);
            events.push(BattleEvent::Ended {
                outcome: Outcome::Defeat,
            });
        } else {
            self.phase = Phase::Player;
            self.turn += 1;
        }

        self.log.extend(events.iter().cloned());
        events
    }

    fn pick_attack(&self, rng: &mut StdRng) -> &AttackProfile {
        match rng.random_range(0..3) {
            0 => &self.enemy.attack,
            1 => &self.enemy.heavy_attack,
            _ => &self.enemy.special,
        }
    }

    fn resolve_enemy_attack(
        &mut self,
        profile: &AttackProfile,
        player: &PlayerState,
        registry: &ModifierRegistry,
        rng: &mut StdRng,
        events: &mut Vec<BattleEvent>,
    ) {
        if self.evading {
            let dodge = (EVADE_BASE
                + f64::from(player.attribute(rf_core::Attribute::Agility)) * EVADE_PER_AGILITY)
                .min(EVADE_CAP);
            if rng.random::<f64>() < dodge {
                events.push(BattleEvent::Dodged {
                    attack: profile.label.clone(),
                });
                return;
            }
        }

        let input = HitChanceInput {
            attacker_weapon_skill: self.enemy.weapon_skill,
            defender_agility: player.attribute(rf_core::Attribute::Agility),
            defender_energy: self.player_energy.current(),
            defender_max_energy: self.player_energy.max(),
            defender_endurance: player.attribute(rf_core::Attribute::Endurance),
            ability_modifier: 0.0,
            defending: self.defending,
        };
        let chance = formula::hit_chance(&input, registry, &ModifierContext::none());

        if rng.random::<f64>() >= chance {
            events.push(BattleEvent::EnemyMissed {
                attack: profile.label.clone(),
            });
            return;
        }

        let roll = rng.random_range(profile.min_damage..=profile.max_damage);
        let mut damage = f64::from(roll) * status::weaken_factor(&self.statuses);
        if self.defending {
            damage /= 2.0;
        }
        let damage = formula::apply_armor(damage.floor().max(0.0) as u32, player.armor_value);
        self.player_health.adjust(-to_delta(damage));
        events.push(BattleEvent::EnemyHit {
            attack: profile.label.clone(),
            damage,
        });
    }

    /// Apply victory rewards to the player: write the battle pools back
    /// and grant the enemy's weapon-mastery experience (cascading).
    ///
    /// A no-op unless the battle ended in victory; defeat writes
    /// nothing back.
    pub fn apply_victory_rewards(&self, player: &mut PlayerState) -> Vec<BattleEvent> {
        if self.outcome() != Some(Outcome::Victory) {
            return Vec::new();
        }
        player.health.set(self.player_health.current());
        player.energy.set(self.player_energy.current());

        let weapon = player.equipped_weapon;
        let before = player.mastery(weapon).level;
        player.add_weapon_experience(weapon, self.enemy.exp_reward);
        let after = player.mastery(weapon).level;

        let mut events = vec![BattleEvent::WeaponExperienceGained {
            weapon,
            amount: self.enemy.exp_reward,
        }];
        if after > before {
            events.push(BattleEvent::MasteryLeveled {
                weapon,
                level: after,
            });
        }
        events
    }
}

/// Convert unsigned damage into a negative pool delta.
fn to_delta(damage: u32) -> i32 {
    i32::try_from(damage).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use rf_core::bundle;
    use crate::status::StatusKind;

    fn setup() -> (PlayerState, ModifierRegistry, AbilityCatalog) {
        let player = PlayerState::from_bundle(&bundle::preset::warrior());
        (
            player,
            ModifierRegistry::new(),
            AbilityCatalog::standard(),
        )
    }

    #[test]
    fn init_snapshots_pools() {
        let (player, _, catalog) = setup();
        let battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
        assert_eq!(battle.phase(), Phase::Player);
        assert_eq!(battle.player_health().current(), player.health.current());
        assert_eq!(battle.enemy_health().max(), 80);
        assert_eq!(battle.turn(), 1);
    }

    #[test]
    fn init_rejects_weapon_without_abilities() {
        let (player, _, _) = setup();
        let empty = AbilityCatalog::new(Vec::new());
        assert_eq!(
            Battle::new(BattleKind::Raider, &player, &empty).unwrap_err(),
            CombatError::NoAbilities(player.equipped_weapon)
        );
    }

    #[test]
    fn action_outside_player_phase_is_noop() {
        let (player, registry, catalog) = setup();
        let mut battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        battle.phase = Phase::Enemy;
        let events = battle
            .submit_player_action(&PlayerAction::Defend, &player, &registry, &catalog, &mut rng)
            .unwrap();
        assert!(events.is_empty());
        assert!(!battle.defending);
    }

    #[test]
    fn action_after_end_is_noop() {
        let (player, registry, catalog) = setup();
        let mut battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        battle.phase = Phase::Ended(Outcome::Victory);
        let events = battle
            .submit_player_action(
                &PlayerAction::Recover,
                &player,
                &registry,
                &catalog,
                &mut rng,
            )
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn insufficient_energy_rejects_without_mutation() {
        let (player, registry, catalog) = setup();
        let mut battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        battle.player_energy = Pool::with_current(3, 60);
        let err = battle
            .submit_player_action(
                &PlayerAction::UseAbility("sword_slash".to_string()),
                &player,
                &registry,
                &catalog,
                &mut rng,
            )
            .unwrap_err();
        assert_eq!(
            err,
            CombatError::InsufficientEnergy {
                required: 5,
                available: 3
            }
        );
        assert_eq!(battle.player_energy.current(), 3);
        assert_eq!(battle.phase(), Phase::Player, "phase unchanged on rejection");
    }

    #[test]
    fn unknown_ability_rejected() {
        let (player, registry, catalog) = setup();
        let mut battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let err = battle
            .submit_player_action(
                &PlayerAction::UseAbility("war_cry".to_string()),
                &player,
                &registry,
                &catalog,
                &mut rng,
            )
            .unwrap_err();
        assert_eq!(err, CombatError::UnknownAbility("war_cry".to_string()));
    }

    #[test]
    fn wrong_weapon_rejected() {
        let (player, registry, catalog) = setup();
        let mut battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let err = battle
            .submit_player_action(
                &PlayerAction::UseAbility("axe_hack".to_string()),
                &player,
                &registry,
                &catalog,
                &mut rng,
            )
            .unwrap_err();
        assert!(matches!(err, CombatError::WrongWeapon { .. }));
    }

    #[test]
    fn locked_ability_rejected_until_unlocked() {
        let (mut player, registry, catalog) = setup();
        let mut battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let action = PlayerAction::UseAbility("sword_riposte".to_string());
        let err = battle
            .submit_player_action(&action, &player, &registry, &catalog, &mut rng)
            .unwrap_err();
        assert_eq!(err, CombatError::AbilityLocked("sword_riposte".to_string()));

        player.unlock_ability(rf_core::WeaponType::Sword, "sword_riposte");
        let events = battle
            .submit_player_action(&action, &player, &registry, &catalog, &mut rng)
            .unwrap();
        assert!(!events.is_empty());
    }

    #[test]
    fn defend_and_recover_advance_phase() {
        let (player, registry, catalog) = setup();
        let mut battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let events = battle
            .submit_player_action(&PlayerAction::Defend, &player, &registry, &catalog, &mut rng)
            .unwrap();
        assert_eq!(events, vec![BattleEvent::Defended]);
        assert!(battle.defending);
        assert_eq!(battle.phase(), Phase::Enemy);

        battle.resolve_enemy_turn(&player, &registry, &mut rng);
        assert!(!battle.defending, "flag resets every enemy turn");
    }

    #[test]
    fn recover_restores_within_band() {
        let (player, registry, catalog) = setup();
        let mut battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        battle.player_energy = Pool::with_current(10, 60);
        let events = battle
            .submit_player_action(
                &PlayerAction::Recover,
                &player,
                &registry,
                &catalog,
                &mut rng,
            )
            .unwrap();
        let BattleEvent::Recovered { amount } = events[0] else {
            panic!("expected Recovered, got {:?}", events[0]);
        };
        assert!((10..=20).contains(&amount));
        assert_eq!(battle.player_energy.current(), 10 + amount);
    }

    #[test]
    fn dot_can_win_the_battle_on_enemy_turn() {
        let (player, registry, catalog) = setup();
        let mut battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        battle.enemy_health = Pool::with_current(2, 80);
        battle.statuses.push(StatusEffect {
            kind: StatusKind::Bleed,
            damage: 5,
            duration: 2,
            power: 1.0,
        });
        battle.phase = Phase::Enemy;
        let events = battle.resolve_enemy_turn(&player, &registry, &mut rng);
        assert_eq!(battle.outcome(), Some(Outcome::Victory));
        assert!(events.contains(&BattleEvent::Ended {
            outcome: Outcome::Victory
        }));
    }

    #[test]
    fn stun_skips_enemy_action() {
        let (player, registry, catalog) = setup();
        let mut battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        battle.enemy_stunned = true;
        battle.phase = Phase::Enemy;
        let health_before = battle.player_health.current();
        let events = battle.resolve_enemy_turn(&player, &registry, &mut rng);
        assert!(events.contains(&BattleEvent::EnemyStunned));
        assert!(!battle.enemy_stunned, "stun clears after the skipped turn");
        assert_eq!(battle.player_health.current(), health_before);
        assert_eq!(battle.phase(), Phase::Player);
        assert_eq!(battle.turn(), 2);
    }

    #[test]
    fn victory_rewards_write_back_and_grant_mastery() {
        let (mut player, registry, catalog) = setup();
        let mut battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        battle.enemy_health = Pool::with_current(1, 80);
        battle.player_health = Pool::with_current(77, 120);
        // Throw always deals at least 4.
        battle
            .submit_player_action(&PlayerAction::Throw, &player, &registry, &catalog, &mut rng)
            .unwrap();
        assert_eq!(battle.outcome(), Some(Outcome::Victory));

        let events = battle.apply_victory_rewards(&mut player);
        assert_eq!(player.health.current(), 77);
        assert!(events.contains(&BattleEvent::WeaponExperienceGained {
            weapon: rf_core::WeaponType::Sword,
            amount: 120,
        }));
        // 120 exp crosses the level-1 threshold of 100.
        assert_eq!(player.mastery(rf_core::WeaponType::Sword).level, 2);
        assert!(events.contains(&BattleEvent::MasteryLeveled {
            weapon: rf_core::WeaponType::Sword,
            level: 2,
        }));
    }

    #[test]
    fn defeat_writes_nothing_back() {
        let (mut player, registry, catalog) = setup();
        let mut battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
        battle.phase = Phase::Ended(Outcome::Defeat);
        let health_before = player.health;
        let events = battle.apply_victory_rewards(&mut player);
        assert!(events.is_empty());
        assert_eq!(player.health, health_before);
        assert_eq!(player.mastery(rf_core::WeaponType::Sword).level, 1);
    }

    #[test]
    fn pools_never_escape_bounds_over_a_full_battle() {
        let (player, registry, catalog) = setup();
        let mut battle = Battle::new(BattleKind::Berserker, &player, &catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(1234);
        let actions = [
            PlayerAction::UseAbility("sword_slash".to_string()),
            PlayerAction::Defend,
            PlayerAction::Feint,
            PlayerAction::Recover,
            PlayerAction::Evade,
            PlayerAction::Throw,
        ];
        let mut i = 0;
        for _ in 0..1000 {
            if battle.outcome().is_some() {
                break;
            }
            let action = &actions[i % actions.len()];
            i += 1;
            // Skip actions the pool cannot pay for.
            match battle.submit_player_action(action, &player, &registry, &catalog, &mut rng) {
                Ok(_) => {}
                Err(CombatError::InsufficientEnergy { .. }) => {
                    battle
                        .submit_player_action(
                            &PlayerAction::Recover,
                            &player,
                            &registry,
                            &catalog,
                            &mut rng,
                        )
                        .unwrap();
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
            battle.resolve_enemy_turn(&player, &registry, &mut rng);

            for pool in [
                battle.player_health(),
                battle.player_energy(),
                battle.enemy_health(),
                battle.enemy_energy(),
            ] {
                assert!(pool.current() >= 0);
                assert!(pool.current() <= pool.max());
            }
        }
        assert!(battle.outcome().is_some(), "battle should conclude");
    }

    #[test]
    fn battle_is_replayable_from_the_same_seed() {
        let (player, registry, catalog) = setup();
        let run = |seed: u64| {
            let mut battle = Battle::new(BattleKind::Raider, &player, &catalog).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..40 {
                if battle.outcome().is_some() {
                    break;
                }
                let _ = battle.submit_player_action(
                    &PlayerAction::UseAbility("sword_slash".to_string()),
                    &player,
                    &registry,
                    &catalog,
                    &mut rng,
                );
                battle.resolve_enemy_turn(&player, &registry, &mut rng);
            }
            battle.log().to_vec()
        };
        assert_eq!(run(99), run(99));
    }
}
