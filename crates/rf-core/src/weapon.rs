//! The four weapon types.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A weapon family with its own mastery track and ability list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponType {
    /// Balanced one-handed blades.
    Sword,
    /// Crushing weapons; slow, heavy strikes.
    Mace,
    /// Cleaving weapons; bleed-heavy abilities.
    Axe,
    /// Reach weapons; precise thrusts.
    Polearm,
}

impl WeaponType {
    /// All four weapon types.
    pub const ALL: [WeaponType; 4] = [
        WeaponType::Sword,
        WeaponType::Mace,
        WeaponType::Axe,
        WeaponType::Polearm,
    ];

    /// The display name of the weapon type.
    pub fn name(&self) -> &'static str {
        match self {
            WeaponType::Sword => "sword",
            WeaponType::Mace => "mace",
            WeaponType::Axe => "axe",
            WeaponType::Polearm => "polearm",
        }
    }

    /// Parse a weapon type from its name, case-insensitively.
    pub fn parse(name: &str) -> CoreResult<WeaponType> {
        let lower = name.to_lowercase();
        WeaponType::ALL
            .into_iter()
            .find(|w| w.name() == lower)
            .ok_or_else(|| CoreError::UnknownWeaponType(name.to_string()))
    }
}

impl std::fmt::Display for WeaponType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trip() {
        for weapon in WeaponType::ALL {
            assert_eq!(WeaponType::parse(weapon.name()).unwrap(), weapon);
        }
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(WeaponType::parse("Polearm").unwrap(), WeaponType::Polearm);
        assert_eq!(WeaponType::parse("AXE").unwrap(), WeaponType::Axe);
    }

    #[test]
    fn parse_unknown() {
        assert!(matches!(
            WeaponType::parse("halberd"),
            Err(CoreError::UnknownWeaponType(_))
        ));
    }
}
