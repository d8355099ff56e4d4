//! The eight ability scores.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// An ability score on the player sheet.
///
/// Scores are unbounded upward; story effects and camp training raise
/// them over the course of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// Raw physical power; drives heavy weapon damage.
    Strength,
    /// Speed and reflexes; drives dodging and feints.
    Agility,
    /// Stamina; blunts the fatigue penalty when energy runs low.
    Endurance,
    /// Precision; drives feint defense and precise strikes.
    Coordination,
    /// Constitution; health-adjacent checks in the story.
    Vitality,
    /// Trained weapon handling; the attacker side of the hit formula.
    WeaponSkill,
    /// Wits; story checks and camp games.
    Intelligence,
    /// Presence; reputation-adjacent story checks.
    Charisma,
}

impl Attribute {
    /// All eight attributes, in sheet order.
    pub const ALL: [Attribute; 8] = [
        Attribute::Strength,
        Attribute::Agility,
        Attribute::Endurance,
        Attribute::Coordination,
        Attribute::Vitality,
        Attribute::WeaponSkill,
        Attribute::Intelligence,
        Attribute::Charisma,
    ];

    /// The display name of the attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Strength => "strength",
            Attribute::Agility => "agility",
            Attribute::Endurance => "endurance",
            Attribute::Coordination => "coordination",
            Attribute::Vitality => "vitality",
            Attribute::WeaponSkill => "weaponSkill",
            Attribute::Intelligence => "intelligence",
            Attribute::Charisma => "charisma",
        }
    }

    /// Parse an attribute from its name, case-insensitively.
    ///
    /// Unknown names are rejected at this boundary rather than coerced.
    pub fn parse(name: &str) -> CoreResult<Attribute> {
        let lower = name.to_lowercase();
        Attribute::ALL
            .into_iter()
            .find(|a| a.name().to_lowercase() == lower)
            .ok_or_else(|| CoreError::UnknownAttribute(name.to_string()))
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
