//! One-layer gravity.

use tracing::trace;

use crate::core::{Board, Change, ChangeReason, GameRng, Pos};

/// Moves gems down by at most one row per call.
///
/// Destinations are scanned from the bottom row up (row 0 never receives a
/// falling gem), columns left to right. A vacant destination takes the free
/// gem directly above it. When the cell above is neither vacant nor a free
/// gem (locked, out of play, a locked filler), the destination may instead
/// take a free gem from the upper-left or upper-right, provided the cell
/// beside the destination on that side is occupied so gems do not slide
/// through gaps. A coin flip picks which side is tried first.
///
/// Because the scan runs bottom-up in a single pass, a whole column of gems
/// can move down one row in one call; callers interleave calls with the top
/// refill until both report no change.
#[derive(Clone, Copy, Debug, Default)]
pub struct GravityResolver;

impl GravityResolver {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Apply one layer of drops. Returns the destinations that changed.
    pub fn step(&self, board: &mut Board, rng: &mut GameRng) -> Vec<Change> {
        let grid = board.grid_mut();
        let mut changes = Vec::new();

        for row in (1..grid.rows()).rev() {
            for col in 0..grid.cols() {
                let dest = Pos::new(row, col);
                if !grid[dest].is_vacant() {
                    continue;
                }
                let above = Pos::new(row - 1, col);
                if grid[above].is_vacant() {
                    continue;
                }
                if grid[above].is_free_gem() {
                    grid.move_cell(above, dest);
                    changes.push(Change::new(dest, ChangeReason::DroppedFromTop));
                    continue;
                }

                let first: isize = if rng.coin_flip() { -1 } else { 1 };
                for side in [first, -first] {
                    let (Some(source), Some(support)) =
                        (grid.offset(above, 0, side), grid.offset(dest, 0, side))
                    else {
                        continue;
                    };
                    if grid[source].is_free_gem() && grid[support].kind.is_occupied() {
                        grid.move_cell(source, dest);
                        let reason = if side < 0 {
                            ChangeReason::DroppedFromTopLeft
                        } else {
                            ChangeReason::DroppedFromTopRight
                        };
                        changes.push(Change::new(dest, reason));
                        break;
                    }
                }
            }
        }

        if !changes.is_empty() {
            trace!(moved = changes.len(), "gravity layer");
        }
        changes
    }
}
