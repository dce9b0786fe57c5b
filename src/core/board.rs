//! The live game board: grid, event history and swap counter.

use serde::{Deserialize, Serialize};

use super::config::BoardConfig;
use super::error::ConfigError;
use super::event::{Event, EventLog};
use super::grid::Grid;

/// Everything the engine components read and write.
///
/// Exactly one `Board` is live per game. `clone()` produces a fully
/// independent snapshot (grid, events and counters), used for before/after
/// diffs and for lookahead on scratch copies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub(crate) grid: Grid,
    pub(crate) events: EventLog,
    moves_made: u32,
}

impl Board {
    /// Empty board of the given size.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_grid(Grid::new(rows, cols))
    }

    /// Empty board from a validated configuration.
    pub fn from_config(config: &BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.rows, config.cols))
    }

    /// Board around an existing grid (fixtures, restored snapshots).
    #[must_use]
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            events: EventLog::new(),
            moves_made: 0,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for drivers and fixtures.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Swaps applied to this board so far.
    #[must_use]
    pub const fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub(crate) fn record(&mut self, event: Event) {
        self.events.push(event);
    }

    pub(crate) fn count_move(&mut self) {
        self.moves_made += 1;
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "BOARD: {}x{}", self.grid.rows(), self.grid.cols())?;
        write!(f, "{}", self.grid)
    }
}
