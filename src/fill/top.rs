//! Top-row refill.

use tracing::trace;

use crate::core::{Board, Cell, Change, ChangeReason, ConfigError, GameRng, LockState, Pos, TopFillConfig};

/// Refills vacant cells of row 0 each tick.
///
/// With a non-zero `locked_fraction` some refills are colorless locked
/// fillers instead of gems ("nasty" filling): they occupy the cell, block
/// gravity below it and need one exposure to clear.
#[derive(Clone, Debug)]
pub struct TopFiller {
    config: TopFillConfig,
}

impl TopFiller {
    pub fn new(config: TopFillConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Plain refill with `colors` palette colors.
    pub fn plain(colors: u8) -> Result<Self, ConfigError> {
        Self::new(TopFillConfig::new(colors))
    }

    #[must_use]
    pub fn config(&self) -> &TopFillConfig {
        &self.config
    }

    /// Fill every vacant top cell, left to right.
    ///
    /// Returns the changed cells; empty when every top cell was already
    /// occupied, locked or out of play.
    pub fn step(&self, board: &mut Board, rng: &mut GameRng) -> Vec<Change> {
        let grid = board.grid_mut();
        let mut changes = Vec::new();
        for col in 0..grid.cols() {
            let pos = Pos::new(0, col);
            if !grid[pos].is_vacant() {
                continue;
            }
            let locked = self.config.locked_fraction > 0.0 && rng.chance(self.config.locked_fraction);
            if locked {
                grid.set(pos, Cell::EMPTY.with_lock(LockState::Locked));
                changes.push(Change::new(pos, ChangeReason::RefilledLocked));
            } else {
                grid.set(pos, Cell::simple(rng.gem_color(self.config.colors).raw()));
                changes.push(Change::new(pos, ChangeReason::Refilled));
            }
        }
        if !changes.is_empty() {
            trace!(filled = changes.len(), "top refill");
        }
        changes
    }
}
