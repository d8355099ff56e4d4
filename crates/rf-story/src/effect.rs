//! Effects that story nodes and choices apply to the player.

use serde::{Deserialize, Serialize};

use rf_core::{Attribute, FlagValue, PlayerState, WeaponType};

/// A state change carried by a story node or choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoryEffect {
    /// Add a delta to an ability score.
    AdjustAttribute {
        /// The attribute to change.
        attribute: Attribute,
        /// Signed delta.
        delta: i32,
    },
    /// Add or remove gold; losses clamp at zero.
    AdjustGold(i64),
    /// Shift reputation.
    AdjustReputation(i32),
    /// Add to the white-raven alignment counter.
    GainWhiteRaven(u32),
    /// Add to the black-raven alignment counter.
    GainBlackRaven(u32),
    /// Heal or hurt, clamped to the health pool.
    AdjustHealth(i32),
    /// Restore or drain energy, clamped to the energy pool.
    AdjustEnergy(i32),
    /// Add or shed fatigue.
    AdjustFatigue(i32),
    /// Add items to the inventory.
    GiveItem {
        /// Item name.
        name: String,
        /// How many.
        quantity: u32,
    },
    /// Remove items from the inventory, if present.
    TakeItem {
        /// Item name.
        name: String,
        /// How many.
        quantity: u32,
    },
    /// Set a story flag.
    SetFlag {
        /// Flag key.
        key: String,
        /// Value to store.
        value: FlagValue,
    },
    /// Grant character experience (may cascade level-ups).
    GrantExperience(u32),
    /// Grant weapon-mastery experience.
    GrantWeaponExperience {
        /// The weapon track.
        weapon: WeaponType,
        /// Experience amount.
        amount: u32,
    },
    /// Change the equipped weapon.
    EquipWeapon(WeaponType),
}

impl StoryEffect {
    /// Apply the effect to the player.
    pub fn apply(&self, player: &mut PlayerState) {
        match self {
            StoryEffect::AdjustAttribute { attribute, delta } => {
                player.update_attribute(*attribute, *delta);
            }
            StoryEffect::AdjustGold(delta) => player.adjust_gold(*delta),
            StoryEffect::AdjustReputation(delta) => player.reputation += delta,
            StoryEffect::GainWhiteRaven(amount) => player.white_raven += amount,
            StoryEffect::GainBlackRaven(amount) => player.black_raven += amount,
            StoryEffect::AdjustHealth(delta) => {
                player.health.adjust(*delta);
            }
            StoryEffect::AdjustEnergy(delta) => {
                player.energy.adjust(*delta);
            }
            StoryEffect::AdjustFatigue(delta) => player.fatigue += delta,
            StoryEffect::GiveItem { name, quantity } => {
                player.add_item(name.as_str(), *quantity);
            }
            StoryEffect::TakeItem { name, quantity } => {
                player.take_item(name, *quantity);
            }
            StoryEffect::SetFlag { key, value } => {
                player.set_flag(key.as_str(), value.clone());
            }
            StoryEffect::GrantExperience(amount) => player.add_experience(*amount),
            StoryEffect::GrantWeaponExperience { weapon, amount } => {
                player.add_weapon_experience(*weapon, *amount);
            }
            StoryEffect::EquipWeapon(weapon) => player.equipped_weapon = *weapon,
        }
    }
}

/// Apply a list of effects in order.
pub fn apply_all(effects: &[StoryEffect], player: &mut PlayerState) {
    for effect in effects {
        effect.apply(player);
    }
}
