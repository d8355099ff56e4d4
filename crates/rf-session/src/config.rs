//! Session configuration.

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible battles and camp rolls.
    pub seed: u64,
    /// The stat bundle a new character starts from.
    pub bundle: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            bundle: "warrior".to_string(),
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting stat bundle.
    pub fn with_bundle(mut self, bundle: &str) -> Self {
        self.bundle = bundle.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.bundle, "warrior");
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default().with_seed(7).with_bundle("hunter");
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.bundle, "hunter");
    }
}
