//! Clamped resource pools (health, energy).

use serde::{Deserialize, Serialize};

/// A numeric resource clamped to `[0, max]`.
///
/// Health and energy never go negative and never exceed their current
/// maximum; every mutation path enforces the clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Current value.
    current: i32,
    /// Maximum value.
    max: i32,
}

impl Pool {
    /// Create a pool starting at its maximum value.
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    /// Create a pool with an explicit current value, clamped to `[0, max]`.
    pub fn with_current(current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    /// Current value.
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Maximum value.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Adjust by a delta, clamping to `[0, max]`. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.current = (self.current + delta).clamp(0, self.max);
        self.current
    }

    /// Set the current value directly, clamped to `[0, max]`.
    pub fn set(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    /// Restore the pool to its maximum.
    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Empty the pool.
    pub fn deplete(&mut self) {
        self.current = 0;
    }

    /// Raise the maximum by a delta. The current value is re-clamped but
    /// not refilled; leveling calls [`Pool::refill`] separately.
    pub fn raise_max(&mut self, delta: i32) {
        self.max = (self.max + delta).max(0);
        self.current = self.current.clamp(0, self.max);
    }

    /// Returns true if the pool is at 0.
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Returns true if the pool is at its maximum.
    pub fn is_full(&self) -> bool {
        self.current == self.max
    }

    /// The filled fraction of the pool, in `[0.0, 1.0]`.
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        f64::from(self.current) / f64::from(self.max)
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_starts_full() {
        let p = Pool::new(20);
        assert_eq!(p.current(), 20);
        assert_eq!(p.max(), 20);
        assert!(p.is_full());
    }

    #[test]
    fn adjust_clamps_low() {
        let mut p = Pool::new(10);
        assert_eq!(p.adjust(-25), 0);
        assert!(p.is_depleted());
    }

    #[test]
    fn adjust_clamps_high() {
        let mut p = Pool::with_current(3, 10);
        assert_eq!(p.adjust(100), 10);
        assert!(p.is_full());
    }

    #[test]
    fn raise_max_keeps_current() {
        let mut p = Pool::with_current(4, 10);
        p.raise_max(10);
        assert_eq!(p.max(), 20);
        assert_eq!(p.current(), 4);
        p.refill();
        assert_eq!(p.current(), 20);
    }

    #[test]
    fn with_current_clamps() {
        let p = Pool::with_current(50, 10);
        assert_eq!(p.current(), 10);
        let p = Pool::with_current(-5, 10);
        assert_eq!(p.current(), 0);
    }

    #[test]
    fn fraction() {
        let p = Pool::with_current(35, 70);
        assert!((p.fraction() - 0.5).abs() < f64::EPSILON);
        assert!((Pool::new(0).fraction()).abs() < f64::EPSILON);
    }

    #[test]
    fn display() {
        assert_eq!(Pool::with_current(7, 30).to_string(), "7/30");
    }

    proptest! {
        #[test]
        fn adjust_never_escapes_bounds(max in 0i32..10_000, deltas in prop::collection::vec(-500i32..500, 0..64)) {
            let mut pool = Pool::new(max);
            for delta in deltas {
                pool.adjust(delta);
                prop_assert!(pool.current() >= 0);
                prop_assert!(pool.current() <= pool.max());
            }
        }
    }
}
