//! Experience, leveling, and weapon mastery.
//!
//! Character level and per-weapon mastery share the same threshold rule:
//! the next level costs `level * 100` experience, and excess carries
//! over, so a large grant can cascade through several levels at once.

use crate::player::PlayerState;
use crate::weapon::WeaponType;

/// Skill points granted per character level.
const SKILL_POINTS_PER_LEVEL: u32 = 3;
/// Maximum-health increase per character level.
const HEALTH_PER_LEVEL: i32 = 10;
/// Maximum-energy increase per character level.
const ENERGY_PER_LEVEL: i32 = 5;

impl PlayerState {
    /// Experience required to reach the next character level.
    pub fn exp_to_next_level(&self) -> u32 {
        self.level * 100
    }

    /// Grant character experience. A zero grant is a silent no-op.
    ///
    /// Each level consumed grants skill points, raises both pool maxima,
    /// and restores health and energy to the new maxima — leveling
    /// always full-heals.
    pub fn add_experience(&mut self, amount: u32) {
        if amount == 0 {
            return;
        }
        self.exp += amount;
        while self.exp >= self.exp_to_next_level() {
            self.exp -= self.exp_to_next_level();
            self.level += 1;
            self.skill_points += SKILL_POINTS_PER_LEVEL;
            self.health.raise_max(HEALTH_PER_LEVEL);
            self.energy.raise_max(ENERGY_PER_LEVEL);
            self.health.refill();
            self.energy.refill();
        }
    }

    /// Experience required for the next mastery level of a weapon type.
    pub fn weapon_exp_to_next_level(&self, weapon: WeaponType) -> u32 {
        self.mastery(weapon).level * 100
    }

    /// Grant weapon-mastery experience. A zero grant is a silent no-op.
    ///
    /// Mirrors [`PlayerState::add_experience`] per weapon type, with no
    /// pool side effects.
    pub fn add_weapon_experience(&mut self, weapon: WeaponType, amount: u32) {
        if amount == 0 {
            return;
        }
        let mastery = self.mastery_mut(weapon);
        mastery.exp += amount;
        while mastery.exp >= mastery.level * 100 {
            mastery.exp -= mastery.level * 100;
            mastery.level += 1;
        }
    }

    /// Flat damage bonus from weapon mastery: `(level - 1) * 2`.
    pub fn weapon_damage_bonus(&self, weapon: WeaponType) -> u32 {
        (self.mastery(weapon).level - 1) * 2
    }

    /// Progress toward the next mastery level, in `[0.0, 1.0)`.
    pub fn weapon_level_progress(&self, weapon: WeaponType) -> f64 {
        let mastery = self.mastery(weapon);
        f64::from(mastery.exp) / f64::from(mastery.level * 100)
    }
}

#[cfg(test)]
mod tests {
    use crate::bundle;
    use crate::player::PlayerState;
    use crate::weapon::WeaponType;

    fn player() -> PlayerState {
        PlayerState::from_bundle(&bundle::preset::wanderer())
    }

    #[test]
    fn zero_experience_is_noop() {
        let mut p = player();
        p.add_experience(0);
        assert_eq!(p.level, 1);
        assert_eq!(p.exp, 0);
    }

    #[test]
    fn exact_threshold_levels_once() {
        let mut p = player();
        p.health.adjust(-30);
        p.add_experience(100);
        assert_eq!(p.level, 2);
        assert_eq!(p.exp, 0);
        assert_eq!(p.skill_points, 3);
        assert_eq!(p.health.max(), 110);
        assert_eq!(p.energy.max(), 75);
        assert!(p.health.is_full(), "leveling always full-heals");
        assert!(p.energy.is_full());
    }

    #[test]
    fn excess_carries_over() {
        let mut p = player();
        p.add_experience(150);
        assert_eq!(p.level, 2);
        assert_eq!(p.exp, 50);
    }

    #[test]
    fn large_grant_cascades() {
        let mut p = player();
        // 100 + 200 = 300 consumed, 40 left over.
        p.add_experience(340);
        assert_eq!(p.level, 3);
        assert_eq!(p.exp, 40);
        assert_eq!(p.skill_points, 6);
        assert_eq!(p.health.max(), 120);
    }

    #[test]
    fn weapon_mastery_cascades_independently() {
        let mut p = player();
        let before_health = p.health;
        p.add_weapon_experience(WeaponType::Mace, 320);
        let mastery = p.mastery(WeaponType::Mace);
        assert_eq!(mastery.level, 3);
        assert_eq!(mastery.exp, 20);
        assert_eq!(p.level, 1, "weapon exp never touches character level");
        assert_eq!(p.health, before_health, "no pool side effects");
        assert_eq!(p.mastery(WeaponType::Sword).level, 1);
    }

    #[test]
    fn damage_bonus_scales_with_mastery() {
        let mut p = player();
        assert_eq!(p.weapon_damage_bonus(WeaponType::Axe), 0);
        p.add_weapon_experience(WeaponType::Axe, 100);
        assert_eq!(p.weapon_damage_bonus(WeaponType::Axe), 2);
        p.add_weapon_experience(WeaponType::Axe, 200);
        assert_eq!(p.weapon_damage_bonus(WeaponType::Axe), 4);
    }

    #[test]
    fn level_progress_fraction() {
        let mut p = player();
        p.add_weapon_experience(WeaponType::Sword, 50);
        assert!((p.weapon_level_progress(WeaponType::Sword) - 0.5).abs() < f64::EPSILON);
    }
}
