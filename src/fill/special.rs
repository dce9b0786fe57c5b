//! Pre-built special gems at board creation.

use tracing::debug;

use crate::core::{Board, Cell, ConfigError, GameRng, Pos, SpecialSeedConfig};

/// Places a fixed number of special gems on random vacant cells.
#[derive(Clone, Debug)]
pub struct SpecialSeeder {
    config: SpecialSeedConfig,
}

impl SpecialSeeder {
    #[must_use]
    pub fn new(config: SpecialSeedConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SpecialSeedConfig {
        &self.config
    }

    pub fn run(&self, board: &mut Board, rng: &mut GameRng) -> Result<(), ConfigError> {
        self.config.validate()?;

        let grid = board.grid_mut();
        let mut free: Vec<Pos> = grid
            .iter()
            .filter(|(_, cell)| cell.is_vacant())
            .map(|(pos, _)| pos)
            .collect();
        if self.config.count > free.len() {
            return Err(ConfigError::TooManySpecials {
                requested: self.config.count,
                available: free.len(),
            });
        }

        rng.shuffle(&mut free);
        for &pos in free.iter().take(self.config.count) {
            let kind = self.config.kinds[rng.below(self.config.kinds.len())];
            let color = rng.gem_color(self.config.colors);
            grid.set(pos, Cell::special(kind, color));
        }
        debug!(count = self.config.count, "special gems seeded");
        Ok(())
    }
}
