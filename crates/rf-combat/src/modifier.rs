//! Stackable stat modifiers.
//!
//! Modifiers adjust a base value for one metric, at one of three scopes.
//! Application folds matching entries in a fixed order — global, then
//! the context's weapon type, then the context's ability — and within
//! each scope in insertion order. Percent entries multiply the running
//! total by `(1 + value)`, so they compound rather than sum; outcomes
//! therefore depend on acquisition order, which is intentional.

use serde::{Deserialize, Serialize};

use rf_core::WeaponType;

/// Which computed value a modifier adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Chance for a player ability to land.
    HitChance,
    /// Chance for a landed hit to crit.
    CritChance,
    /// Critical damage multiplier.
    CritDamage,
    /// Weapon base damage before the per-ability formula.
    BaseDamage,
    /// Final ability damage.
    DamageMultiplier,
    /// Chance for an ability's status effect to stick.
    StatusChance,
    /// Duration of inflicted status effects.
    StatusDuration,
    /// Power of inflicted status effects.
    StatusPower,
    /// Incoming-damage mitigation.
    Defense,
    /// Chance to fully avoid an attack.
    Evasion,
    /// Portion of enemy armor ignored.
    ArmorPenetration,
}

/// How a modifier combines with the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Adds the raw value.
    Flat,
    /// Multiplies the running total by `(1 + value)`.
    Percent,
}

/// The breadth at which a modifier applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// Applies to every computation of the metric.
    Global,
    /// Applies only when attacking with this weapon type.
    Weapon(WeaponType),
    /// Applies only when using this specific ability.
    Ability(String),
}

/// A single stat adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    /// Where the modifier applies.
    pub scope: Scope,
    /// Which metric it adjusts.
    pub metric: Metric,
    /// How it combines.
    pub kind: ModifierKind,
    /// The adjustment value.
    pub value: f64,
    /// Origin tag, used for bulk removal (e.g. a respec).
    pub source: String,
}

/// The weapon/ability context of a modifier application.
#[derive(Debug, Clone, Default)]
pub struct ModifierContext {
    /// Weapon type of the attack, if any.
    pub weapon: Option<WeaponType>,
    /// Ability id of the attack, if any.
    pub ability: Option<String>,
}

impl ModifierContext {
    /// A context with no weapon or ability (enemy attacks, raw checks).
    pub fn none() -> Self {
        Self::default()
    }

    /// A weapon-only context.
    pub fn weapon(weapon: WeaponType) -> Self {
        Self {
            weapon: Some(weapon),
            ability: None,
        }
    }

    /// A weapon-and-ability context.
    pub fn ability(weapon: WeaponType, ability: impl Into<String>) -> Self {
        Self {
            weapon: Some(weapon),
            ability: Some(ability.into()),
        }
    }

    /// Returns true if the context names a weapon or an ability.
    pub fn is_scoped(&self) -> bool {
        self.weapon.is_some() || self.ability.is_some()
    }
}

/// The registry of all active modifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifierRegistry {
    entries: Vec<Modifier>,
}

impl ModifierRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a modifier.
    pub fn add(
        &mut self,
        scope: Scope,
        metric: Metric,
        kind: ModifierKind,
        value: f64,
        source: impl Into<String>,
    ) {
        self.entries.push(Modifier {
            scope,
            metric,
            kind,
            value,
            source: source.into(),
        });
    }

    /// Fold every matching modifier into a base value.
    ///
    /// Order is fixed: global entries first, then entries scoped to the
    /// context's weapon type, then entries scoped to the context's
    /// ability; insertion order within each group. A metric with no
    /// matching entries is the identity transform.
    pub fn apply(&self, base: f64, metric: Metric, ctx: &ModifierContext) -> f64 {
        let mut value = base;
        value = self.fold_scope(value, metric, |scope| matches!(scope, Scope::Global));
        if let Some(weapon) = ctx.weapon {
            value = self.fold_scope(value, metric, |scope| {
                matches!(scope, Scope::Weapon(w) if *w == weapon)
            });
        }
        if let Some(ability) = ctx.ability.as_deref() {
            value = self.fold_scope(value, metric, |scope| {
                matches!(scope, Scope::Ability(a) if a == ability)
            });
        }
        value
    }

    fn fold_scope(&self, base: f64, metric: Metric, matches: impl Fn(&Scope) -> bool) -> f64 {
        self.entries
            .iter()
            .filter(|m| m.metric == metric && matches(&m.scope))
            .fold(base, |acc, m| match m.kind {
                ModifierKind::Flat => acc + m.value,
                ModifierKind::Percent => acc * (1.0 + m.value),
            })
    }

    /// Delete every entry whose source tag matches exactly.
    pub fn remove_by_source(&mut self, source: &str) {
        self.entries.retain(|m| m.source != source);
    }

    /// Delete every entry whose source tag starts with the prefix.
    /// Used for bulk removal of a whole family of sources, e.g. all
    /// skill-tree entries on a respec.
    pub fn remove_by_source_prefix(&mut self, prefix: &str) {
        self.entries.retain(|m| !m.source.starts_with(prefix));
    }

    /// All entries, in insertion order.
    pub fn entries(&self) -> &[Modifier] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_is_identity() {
        let reg = ModifierRegistry::new();
        let out = reg.apply(0.6, Metric::HitChance, &ModifierContext::none());
        assert!((out - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn flat_entries_stack_additively() {
        let mut reg = ModifierRegistry::new();
        for rank in 1..=3 {
            reg.add(
                Scope::Global,
                Metric::HitChance,
                ModifierKind::Flat,
                0.1,
                format!("skilltree:steady_hand:{rank}"),
            );
        }
        assert_eq!(reg.len(), 3, "three ranks are three separate entries");
        let out = reg.apply(0.6, Metric::HitChance, &ModifierContext::none());
        assert!((out - 0.9).abs() < 1e-12);
    }

    #[test]
    fn percent_compounds() {
        let mut reg = ModifierRegistry::new();
        reg.add(
            Scope::Global,
            Metric::DamageMultiplier,
            ModifierKind::Percent,
            0.10,
            "a",
        );
        reg.add(
            Scope::Global,
            Metric::DamageMultiplier,
            ModifierKind::Percent,
            0.10,
            "b",
        );
        let out = reg.apply(100.0, Metric::DamageMultiplier, &ModifierContext::none());
        assert!((out - 121.0).abs() < 1e-9, "1.1 * 1.1, not 1.2");
    }

    #[test]
    fn scope_order_global_then_weapon_then_ability() {
        let mut reg = ModifierRegistry::new();
        // Percent first by insertion, but the global flat still applies
        // before it because scope classes fold in fixed order.
        reg.add(
            Scope::Ability("sword_slash".to_string()),
            Metric::HitChance,
            ModifierKind::Percent,
            1.0,
            "ability",
        );
        reg.add(
            Scope::Global,
            Metric::HitChance,
            ModifierKind::Flat,
            0.1,
            "global",
        );
        reg.add(
            Scope::Weapon(WeaponType::Sword),
            Metric::HitChance,
            ModifierKind::Flat,
            0.05,
            "weapon",
        );
        let ctx = ModifierContext::ability(WeaponType::Sword, "sword_slash");
        let out = reg.apply(0.5, Metric::HitChance, &ctx);
        // (0.5 + 0.1 + 0.05) * 2.0
        assert!((out - 1.3).abs() < 1e-12);
    }

    #[test]
    fn unscoped_context_skips_weapon_and_ability_entries() {
        let mut reg = ModifierRegistry::new();
        reg.add(
            Scope::Weapon(WeaponType::Axe),
            Metric::HitChance,
            ModifierKind::Flat,
            0.5,
            "weapon",
        );
        let out = reg.apply(0.6, Metric::HitChance, &ModifierContext::none());
        assert!((out - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn other_weapon_entries_do_not_apply() {
        let mut reg = ModifierRegistry::new();
        reg.add(
            Scope::Weapon(WeaponType::Axe),
            Metric::HitChance,
            ModifierKind::Flat,
            0.5,
            "weapon",
        );
        let out = reg.apply(
            0.6,
            Metric::HitChance,
            &ModifierContext::weapon(WeaponType::Sword),
        );
        assert!((out - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn remove_by_source_exact() {
        let mut reg = ModifierRegistry::new();
        reg.add(
            Scope::Global,
            Metric::Defense,
            ModifierKind::Flat,
            1.0,
            "ring",
        );
        reg.add(
            Scope::Global,
            Metric::Defense,
            ModifierKind::Flat,
            1.0,
            "ring_of_iron",
        );
        reg.remove_by_source("ring");
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.entries()[0].source, "ring_of_iron");
    }

    #[test]
    fn remove_by_source_prefix() {
        let mut reg = ModifierRegistry::new();
        reg.add(
            Scope::Global,
            Metric::HitChance,
            ModifierKind::Flat,
            0.1,
            "skilltree:a:1",
        );
        reg.add(
            Scope::Global,
            Metric::HitChance,
            ModifierKind::Flat,
            0.1,
            "skilltree:b:1",
        );
        reg.add(
            Scope::Global,
            Metric::HitChance,
            ModifierKind::Flat,
            0.1,
            "potion",
        );
        reg.remove_by_source_prefix("skilltree");
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.entries()[0].source, "potion");
    }

    #[test]
    fn unknown_metric_is_identity() {
        let mut reg = ModifierRegistry::new();
        reg.add(
            Scope::Global,
            Metric::HitChance,
            ModifierKind::Flat,
            0.2,
            "x",
        );
        let out = reg.apply(10.0, Metric::Evasion, &ModifierContext::none());
        assert!((out - 10.0).abs() < f64::EPSILON);
    }
}
