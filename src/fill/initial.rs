//! Creation-time zone setup.

use tracing::debug;

use crate::core::{Board, BorderConfig, ConfigError, GameRng, Grid, LockState, Pos, Cell};

use super::special::SpecialSeeder;

/// Marks disabled and double-locked zones, then optionally seeds specials.
///
/// Disabled cells become out of play first; locking then skips them, so a
/// cell in both zones stays out of play. Locked cells are left empty: they
/// block gravity until exposed twice, after which the top filler can reach
/// them.
#[derive(Clone, Debug, Default)]
pub struct InitialFiller {
    border: BorderConfig,
    special: Option<SpecialSeeder>,
}

impl InitialFiller {
    #[must_use]
    pub fn new(border: BorderConfig) -> Self {
        Self {
            border,
            special: None,
        }
    }

    /// Seed special gems after the zones are in place.
    #[must_use]
    pub fn with_special(mut self, seeder: SpecialSeeder) -> Self {
        self.special = Some(seeder);
        self
    }

    #[must_use]
    pub fn border(&self) -> &BorderConfig {
        &self.border
    }

    /// Apply the zones to `board`, then seed specials if configured.
    ///
    /// Zones and specials are laid out on a scratch copy first, so nothing
    /// is written if the configuration does not fit the board.
    pub fn run(&self, board: &mut Board, rng: &mut GameRng) -> Result<(), ConfigError> {
        let (rows, cols) = (board.grid().rows(), board.grid().cols());
        self.border.validate(rows, cols)?;
        if let Some(seeder) = &self.special {
            seeder.config().validate()?;
        }

        let mut scratch = board.clone();
        let grid = scratch.grid_mut();
        let (disabled_rows, disabled_cols) =
            self.pick_zone(rows, cols, self.border.disabled_rows, self.border.disabled_cols, rng);
        for &pos in &zone_cells(grid, &disabled_rows, &disabled_cols) {
            grid.set(pos, Cell::OUT_OF_PLAY);
        }

        let (locked_rows, locked_cols) =
            self.pick_zone(rows, cols, self.border.locked_rows, self.border.locked_cols, rng);
        for &pos in &zone_cells(grid, &locked_rows, &locked_cols) {
            if !grid[pos].is_out_of_play() {
                grid.set_lock(pos, LockState::DoubleLocked);
            }
        }
        debug!(
            disabled = grid.count(Cell::is_out_of_play),
            locked = grid.count(|cell| cell.lock.is_locked()),
            "zones placed"
        );

        if let Some(seeder) = &self.special {
            seeder.run(&mut scratch, rng)?;
        }
        *board = scratch;
        Ok(())
    }

    /// Row and column indices of one zone.
    fn pick_zone(
        &self,
        rows: usize,
        cols: usize,
        nrows: usize,
        ncols: usize,
        rng: &mut GameRng,
    ) -> (Vec<usize>, Vec<usize>) {
        if self.border.lock_border {
            let zone_rows = (rows - nrows..rows).collect();
            let zone_cols = (0..ncols).chain(cols - ncols..cols).collect();
            (zone_rows, zone_cols)
        } else {
            let mut col_pool: Vec<usize> = (0..cols).collect();
            rng.shuffle(&mut col_pool);
            col_pool.truncate(ncols);
            // Row 0 is where refills enter.
            let mut row_pool: Vec<usize> = (1..rows).collect();
            rng.shuffle(&mut row_pool);
            row_pool.truncate(nrows);
            (row_pool, col_pool)
        }
    }
}

/// Every position on one of the given rows or columns, deduplicated.
fn zone_cells(grid: &Grid, rows: &[usize], cols: &[usize]) -> Vec<Pos> {
    grid.positions()
        .filter(|pos| rows.contains(&pos.row) || cols.contains(&pos.col))
        .collect()
}
