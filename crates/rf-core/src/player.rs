//! The player character sheet.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::bundle::StatBundle;
use crate::error::{CoreError, CoreResult};
use crate::flag::FlagValue;
use crate::item::Item;
use crate::pool::Pool;
use crate::weapon::WeaponType;

/// The eight ability scores as a plain record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    /// Raw physical power.
    pub strength: i32,
    /// Speed and reflexes.
    pub agility: i32,
    /// Stamina.
    pub endurance: i32,
    /// Precision.
    pub coordination: i32,
    /// Constitution.
    pub vitality: i32,
    /// Trained weapon handling.
    pub weapon_skill: i32,
    /// Wits.
    pub intelligence: i32,
    /// Presence.
    pub charisma: i32,
}

impl Attributes {
    /// Read a score by attribute.
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Endurance => self.endurance,
            Attribute::Coordination => self.coordination,
            Attribute::Vitality => self.vitality,
            Attribute::WeaponSkill => self.weapon_skill,
            Attribute::Intelligence => self.intelligence,
            Attribute::Charisma => self.charisma,
        }
    }

    /// Overwrite a score.
    pub fn set(&mut self, attribute: Attribute, value: i32) {
        match attribute {
            Attribute::Strength => self.strength = value,
            Attribute::Agility => self.agility = value,
            Attribute::Endurance => self.endurance = value,
            Attribute::Coordination => self.coordination = value,
            Attribute::Vitality => self.vitality = value,
            Attribute::WeaponSkill => self.weapon_skill = value,
            Attribute::Intelligence => self.intelligence = value,
            Attribute::Charisma => self.charisma = value,
        }
    }
}

/// Per-weapon-type leveling state, independent of character level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mastery {
    /// Mastery level, starting at 1.
    pub level: u32,
    /// Experience toward the next mastery level.
    pub exp: u32,
}

impl Default for Mastery {
    fn default() -> Self {
        Self { level: 1, exp: 0 }
    }
}

/// The full mutable state of the player character.
///
/// Created from a [`StatBundle`] at game start, mutated throughout
/// story, camp and battle, and replaced wholesale on a new game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Ability scores.
    pub attributes: Attributes,
    /// Health pool.
    pub health: Pool,
    /// Energy pool.
    pub energy: Pool,
    /// Accumulated fatigue from camp and story events.
    pub fatigue: i32,
    /// Standing with the settlements, displayed roughly in [-100, 100].
    pub reputation: i32,
    /// White-raven alignment counter (mercy, honor).
    pub white_raven: u32,
    /// Black-raven alignment counter (ruthlessness, cunning).
    pub black_raven: u32,
    /// Character level, starting at 1.
    pub level: u32,
    /// Experience toward the next character level.
    pub exp: u32,
    /// Unspent skill points.
    pub skill_points: u32,
    /// Armor value feeding the damage-reduction formula.
    pub armor_value: u32,
    /// The weapon type currently wielded.
    pub equipped_weapon: WeaponType,
    /// Gold; spending is validated, story losses clamp at 0.
    gold: u32,
    /// Mastery track per weapon type.
    mastery: BTreeMap<WeaponType, Mastery>,
    /// Carried items, in acquisition order.
    pub inventory: Vec<Item>,
    /// Ability ids unlocked by the skill tree, per weapon type.
    pub unlocked_abilities: BTreeMap<WeaponType, BTreeSet<String>>,
    /// Story-conditioned flags.
    pub flags: BTreeMap<String, FlagValue>,
}

impl PlayerState {
    /// Create a fresh character from a starting bundle.
    pub fn from_bundle(bundle: &StatBundle) -> Self {
        Self {
            attributes: bundle.attributes,
            health: Pool::new(bundle.health),
            energy: Pool::new(bundle.energy),
            fatigue: 0,
            reputation: 0,
            white_raven: 0,
            black_raven: 0,
            level: 1,
            exp: 0,
            skill_points: 0,
            armor_value: bundle.armor_value,
            equipped_weapon: bundle.equipped_weapon,
            gold: bundle.gold,
            mastery: WeaponType::ALL
                .into_iter()
                .map(|w| (w, Mastery::default()))
                .collect(),
            inventory: Vec::new(),
            unlocked_abilities: BTreeMap::new(),
            flags: BTreeMap::new(),
        }
    }

    /// Read an ability score.
    pub fn attribute(&self, attribute: Attribute) -> i32 {
        self.attributes.get(attribute)
    }

    /// Overwrite an ability score.
    pub fn set_attribute(&mut self, attribute: Attribute, value: i32) {
        self.attributes.set(attribute, value);
    }

    /// Add a delta to an ability score.
    pub fn update_attribute(&mut self, attribute: Attribute, delta: i32) {
        let current = self.attributes.get(attribute);
        self.attributes.set(attribute, current + delta);
    }

    /// Gold currently held.
    pub fn gold(&self) -> u32 {
        self.gold
    }

    /// Add gold.
    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Spend gold, rejecting the purchase without mutation if the player
    /// cannot afford it.
    pub fn spend_gold(&mut self, amount: u32) -> CoreResult<()> {
        if amount > self.gold {
            return Err(CoreError::InsufficientGold {
                required: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }

    /// Adjust gold by a signed delta; losses clamp at 0.
    pub fn adjust_gold(&mut self, delta: i64) {
        let next = i64::from(self.gold) + delta;
        self.gold = u32::try_from(next.max(0)).unwrap_or(u32::MAX);
    }

    /// The mastery track for a weapon type.
    pub fn mastery(&self, weapon: WeaponType) -> Mastery {
        self.mastery.get(&weapon).copied().unwrap_or_default()
    }

    pub(crate) fn mastery_mut(&mut self, weapon: WeaponType) -> &mut Mastery {
        self.mastery.entry(weapon).or_default()
    }

    /// Add items to the inventory, merging stacks by name.
    pub fn add_item(&mut self, name: impl Into<String>, quantity: u32) {
        let name = name.into();
        if let Some(existing) = self.inventory.iter_mut().find(|i| i.name == name) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.inventory.push(Item::stack(name, quantity));
        }
    }

    /// Returns true if the player carries at least one of the named item.
    pub fn has_item(&self, name: &str) -> bool {
        self.inventory
            .iter()
            .any(|i| i.name == name && i.quantity > 0)
    }

    /// Remove up to `quantity` of the named item. Returns true if the
    /// full amount was removed.
    pub fn take_item(&mut self, name: &str, quantity: u32) -> bool {
        let Some(index) = self.inventory.iter().position(|i| i.name == name) else {
            return false;
        };
        let item = &mut self.inventory[index];
        if item.quantity < quantity {
            return false;
        }
        item.quantity -= quantity;
        if item.quantity == 0 {
            self.inventory.remove(index);
        }
        true
    }

    /// Set a story flag.
    pub fn set_flag(&mut self, key: impl Into<String>, value: impl Into<FlagValue>) {
        self.flags.insert(key.into(), value.into());
    }

    /// Read a story flag.
    pub fn flag(&self, key: &str) -> Option<&FlagValue> {
        self.flags.get(key)
    }

    /// Returns true if a flag exists and is truthy.
    pub fn flag_is_set(&self, key: &str) -> bool {
        self.flags.get(key).is_some_and(FlagValue::is_truthy)
    }

    /// Record an ability id as unlocked for a weapon type.
    pub fn unlock_ability(&mut self, weapon: WeaponType, ability_id: impl Into<String>) {
        self.unlocked_abilities
            .entry(weapon)
            .or_default()
            .insert(ability_id.into());
    }

    /// Returns true if the ability id has been unlocked for the weapon.
    pub fn has_unlocked(&self, weapon: WeaponType, ability_id: &str) -> bool {
        self.unlocked_abilities
            .get(&weapon)
            .is_some_and(|set| set.contains(ability_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle;

    fn player() -> PlayerState {
        PlayerState::from_bundle(&bundle::preset::warrior())
    }

    #[test]
    fn from_bundle_initial_state() {
        let p = player();
        assert_eq!(p.level, 1);
        assert_eq!(p.exp, 0);
        assert_eq!(p.skill_points, 0);
        assert!(p.health.is_full());
        assert!(p.energy.is_full());
        assert_eq!(p.mastery(WeaponType::Sword).level, 1);
        assert_eq!(p.equipped_weapon, WeaponType::Sword);
    }

    #[test]
    fn attribute_round_trip() {
        let mut p = player();
        p.set_attribute(Attribute::Agility, 9);
        assert_eq!(p.attribute(Attribute::Agility), 9);
        p.update_attribute(Attribute::Agility, -2);
        assert_eq!(p.attribute(Attribute::Agility), 7);
    }

    #[test]
    fn spend_gold_validates() {
        let mut p = player();
        let start = p.gold();
        let err = p.spend_gold(start + 1).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientGold { .. }));
        assert_eq!(p.gold(), start, "rejection must not mutate");

        p.spend_gold(10).unwrap();
        assert_eq!(p.gold(), start - 10);
    }

    #[test]
    fn adjust_gold_clamps_at_zero() {
        let mut p = player();
        p.adjust_gold(-1_000_000);
        assert_eq!(p.gold(), 0);
        p.adjust_gold(40);
        assert_eq!(p.gold(), 40);
    }

    #[test]
    fn inventory_merges_stacks() {
        let mut p = player();
        p.add_item("Dried fish", 2);
        p.add_item("Dried fish", 3);
        assert_eq!(p.inventory.len(), 1);
        assert_eq!(p.inventory[0].quantity, 5);

        assert!(p.take_item("Dried fish", 5));
        assert!(!p.has_item("Dried fish"));
        assert!(!p.take_item("Dried fish", 1));
    }

    #[test]
    fn take_item_rejects_partial() {
        let mut p = player();
        p.add_item("Arrow", 2);
        assert!(!p.take_item("Arrow", 3));
        assert_eq!(p.inventory[0].quantity, 2);
    }

    #[test]
    fn flags() {
        let mut p = player();
        assert!(!p.flag_is_set("spared_thrall"));
        p.set_flag("spared_thrall", true);
        assert!(p.flag_is_set("spared_thrall"));
        p.set_flag("debt", 0i64);
        assert!(!p.flag_is_set("debt"));
    }

    #[test]
    fn ability_unlocks() {
        let mut p = player();
        assert!(!p.has_unlocked(WeaponType::Axe, "axe_rend"));
        p.unlock_ability(WeaponType::Axe, "axe_rend");
        assert!(p.has_unlocked(WeaponType::Axe, "axe_rend"));
    }
}
