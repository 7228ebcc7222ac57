//! Construction-time parameters for a game session.

use crate::types::{
    PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, STAR_COUNT, TARGET_COUNT, TARGET_RADIUS_MIN,
    TARGET_RADIUS_SPAN,
};

/// Smallest playfield side: the widest possible target must fit between the walls.
pub const MIN_PLAYFIELD_EXTENT: f64 = 2.0 * (TARGET_RADIUS_MIN + TARGET_RADIUS_SPAN);

/// Session configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Playfield width in units.
    pub width: f64,
    /// Playfield height in units.
    pub height: f64,
    /// Seed for target and star generation.
    pub seed: u32,
    /// Constant target population.
    pub target_count: usize,
    pub star_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            seed: 1,
            target_count: TARGET_COUNT,
            star_count: STAR_COUNT,
        }
    }
}

impl GameConfig {
    /// Create from environment variables.
    ///
    /// - `SHOOTER_SEED`: RNG seed (default: derived from the clock)
    /// - `SHOOTER_WIDTH` / `SHOOTER_HEIGHT`: playfield size in units
    ///
    /// Unparseable or non-positive values fall back to the defaults; sizes below
    /// [`MIN_PLAYFIELD_EXTENT`] are raised to it.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let seed = env::var("SHOOTER_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let width = env::var("SHOOTER_WIDTH")
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| v.max(MIN_PLAYFIELD_EXTENT))
            .unwrap_or(defaults.width);

        let height = env::var("SHOOTER_HEIGHT")
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| v.max(MIN_PLAYFIELD_EXTENT))
            .unwrap_or(defaults.height);

        Self {
            width,
            height,
            seed,
            ..defaults
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

fn clock_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    (nanos as u32) ^ ((nanos >> 32) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_arcade_layout() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.width, 800.0);
        assert_eq!(cfg.height, 600.0);
        assert_eq!(cfg.target_count, 7);
        assert_eq!(cfg.star_count, 100);
    }

    #[test]
    fn from_env_does_not_panic() {
        let cfg = GameConfig::from_env();
        assert!(cfg.width >= MIN_PLAYFIELD_EXTENT);
        assert!(cfg.height >= MIN_PLAYFIELD_EXTENT);
    }

    #[test]
    fn min_extent_fits_largest_target() {
        assert_eq!(MIN_PLAYFIELD_EXTENT, 52.0);
    }
}
