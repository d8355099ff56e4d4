//! Named starting stat bundles.
//!
//! A bundle is the template a new [`crate::PlayerState`] is created from
//! at game start or character-type selection.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::player::Attributes;
use crate::weapon::WeaponType;

/// A starting template for a new character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatBundle {
    /// Bundle name used for selection.
    pub name: String,
    /// Starting ability scores.
    pub attributes: Attributes,
    /// Starting maximum health.
    pub health: i32,
    /// Starting maximum energy.
    pub energy: i32,
    /// Starting gold.
    pub gold: u32,
    /// Starting armor value.
    pub armor_value: u32,
    /// The weapon the character begins with.
    pub equipped_weapon: WeaponType,
}

/// Names of every built-in bundle.
pub fn names() -> Vec<&'static str> {
    vec!["warrior", "hunter", "wanderer"]
}

/// Look up a built-in bundle by name, case-insensitively.
pub fn by_name(name: &str) -> CoreResult<StatBundle> {
    match name.to_lowercase().as_str() {
        "warrior" => Ok(preset::warrior()),
        "hunter" => Ok(preset::hunter()),
        "wanderer" => Ok(preset::wanderer()),
        _ => Err(CoreError::UnknownBundle(name.to_string())),
    }
}

/// Built-in bundle constructors.
pub mod preset {
    use super::StatBundle;
    use crate::player::Attributes;
    use crate::weapon::WeaponType;

    /// A shield-wall fighter: strong and durable, slow.
    pub fn warrior() -> StatBundle {
        StatBundle {
            name: "warrior".to_string(),
            attributes: Attributes {
                strength: 7,
                agility: 4,
                endurance: 6,
                coordination: 4,
                vitality: 6,
                weapon_skill: 5,
                intelligence: 3,
                charisma: 4,
            },
            health: 120,
            energy: 60,
            gold: 25,
            armor_value: 8,
            equipped_weapon: WeaponType::Sword,
        }
    }

    /// A tracker: quick and precise, lightly built.
    pub fn hunter() -> StatBundle {
        StatBundle {
            name: "hunter".to_string(),
            attributes: Attributes {
                strength: 4,
                agility: 7,
                endurance: 5,
                coordination: 6,
                vitality: 4,
                weapon_skill: 4,
                intelligence: 5,
                charisma: 4,
            },
            health: 90,
            energy: 80,
            gold: 30,
            armor_value: 4,
            equipped_weapon: WeaponType::Axe,
        }
    }

    /// A drifter: even scores, a silver tongue, thin purse.
    pub fn wanderer() -> StatBundle {
        StatBundle {
            name: "wanderer".to_string(),
            attributes: Attributes {
                strength: 5,
                agility: 5,
                endurance: 5,
                coordination: 5,
                vitality: 5,
                weapon_skill: 5,
                intelligence: 5,
                charisma: 6,
            },
            health: 100,
            energy: 70,
            gold: 15,
            armor_value: 5,
            equipped_weapon: WeaponType::Sword,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_bundles() {
        for name in names() {
            let bundle = by_name(name).unwrap();
            assert_eq!(bundle.name, name);
            assert!(bundle.health > 0);
            assert!(bundle.energy > 0);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(by_name("Warrior").unwrap().name, "warrior");
    }

    #[test]
    fn lookup_unknown_bundle() {
        assert!(matches!(
            by_name("berserker"),
            Err(CoreError::UnknownBundle(_))
        ));
    }
}
