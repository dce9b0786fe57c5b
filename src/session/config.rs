//! Session limits.

use serde::{Deserialize, Serialize};

use crate::core::MoveWeights;

/// Limits for one automated game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Swaps before the game ends.
    pub max_swaps: u32,

    /// Shuffles allowed over the whole game before the board is declared
    /// unplayable.
    pub max_shuffles: u32,

    /// Settle rounds allowed per swap (plus one) before the board is
    /// declared degenerate. A board that keeps clearing itself without
    /// player input is not a level.
    pub degenerate_ratio: u32,

    /// Points used when enumerating legal moves.
    pub move_weights: MoveWeights,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_swaps: 40,
            max_shuffles: 20,
            degenerate_ratio: 40,
            move_weights: MoveWeights::default(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_max_swaps(mut self, swaps: u32) -> Self {
        self.max_swaps = swaps;
        self
    }

    #[must_use]
    pub fn with_max_shuffles(mut self, shuffles: u32) -> Self {
        self.max_shuffles = shuffles;
        self
    }

    #[must_use]
    pub fn with_degenerate_ratio(mut self, ratio: u32) -> Self {
        self.degenerate_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_move_weights(mut self, weights: MoveWeights) -> Self {
        self.move_weights = weights;
        self
    }

    /// Most settle rounds tolerated after `swaps` swaps.
    #[must_use]
    pub fn combination_budget(&self, swaps: u32) -> u32 {
        swaps.saturating_add(1).saturating_mul(self.degenerate_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.max_swaps, 40);
        assert_eq!(config.max_shuffles, 20);
        assert_eq!(config.combination_budget(0), 40);
        assert_eq!(config.combination_budget(2), 120);
    }

    #[test]
    fn test_builders() {
        let config = SessionConfig::default()
            .with_max_swaps(5)
            .with_max_shuffles(1)
            .with_degenerate_ratio(3);
        assert_eq!((config.max_swaps, config.max_shuffles), (5, 1));
        assert_eq!(config.combination_budget(u32::MAX), u32::MAX);
    }
}
