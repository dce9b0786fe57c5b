//! Swap execution and special-pair combinations.
//!
//! After the two cells trade places, the lower-ranked gem `a` and the
//! higher-ranked gem `b` (`Simple < Stripe < Bomb < Zapper`, the source cell
//! counting as `a` on equal ranks) decide the reaction:
//!
//! | a + b | effect | combo |
//! |-------|--------|-------|
//! | zapper + zapper | every free gem on the board | 55 |
//! | X + zapper | every simple gem of X's color becomes an X and is hit | 51 / 52 / 54 |
//! | bomb + bomb | 5x5 square around the destination | 44 |
//! | stripe + bomb | three rows and three columns through the destination | 42 |
//! | stripe + stripe | the row and column through the destination | 22 |
//! | simple + non-zapper | nothing; the next combine pass decides | |
//!
//! A combination clears both trigger cells (recording `Activated` for each
//! special trigger) and applies its footprint with exposure on.

use tracing::info;

use crate::core::{Board, CellMask, Cell, Combo, Event, GameRng, GemKind, Grid, MoveWeights, Pos};

use super::effect::apply_mask;
use super::moves::{enumerate_valid_moves, shuffle_colors, Move, ScoredMove};

/// Result of applying a swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Cells traded places; matching is left to the combiner.
    Swapped,
    /// Two gems reacted with each other.
    Combined(Combo),
}

/// Validates, applies and scores swaps.
#[derive(Clone, Debug, Default)]
pub struct SwapResolver {
    weights: MoveWeights,
}

impl SwapResolver {
    #[must_use]
    pub fn new(weights: MoveWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &MoveWeights {
        &self.weights
    }

    /// Legal moves on the current board, both directions of each swap.
    #[must_use]
    pub fn valid_moves(&self, grid: &Grid) -> Vec<ScoredMove> {
        enumerate_valid_moves(grid, &self.weights)
    }

    /// Permute colors of unlocked simple gems when no move is left.
    pub fn shuffle(&self, board: &mut Board, rng: &mut GameRng) -> bool {
        shuffle_colors(board, rng)
    }

    /// Apply `mv` to the board.
    ///
    /// # Panics
    ///
    /// If either cell is off the grid, the cells are not adjacent, or either
    /// is not an unlocked gem. Moves from [`SwapResolver::valid_moves`]
    /// always satisfy this.
    pub fn run(&self, board: &mut Board, mv: Move, rng: &mut GameRng) -> SwapOutcome {
        let grid = board.grid();
        assert!(
            grid.contains(mv.from) && grid.contains(mv.to),
            "swap {mv} leaves the {}x{} grid",
            grid.rows(),
            grid.cols()
        );
        assert!(mv.from.is_adjacent(mv.to), "swap {mv} is not between neighbors");
        assert!(
            grid[mv.from].is_free_gem() && grid[mv.to].is_free_gem(),
            "swap {mv} needs two unlocked gems"
        );

        board.grid_mut().swap(mv.from, mv.to);
        board.count_move();

        let (from_cell, to_cell) = (board.grid()[mv.from], board.grid()[mv.to]);
        let ((low_pos, low), (high_pos, high)) = if to_cell.kind < from_cell.kind {
            ((mv.to, to_cell), (mv.from, from_cell))
        } else {
            ((mv.from, from_cell), (mv.to, to_cell))
        };

        let (combo, mask) = match (low.kind, high.kind) {
            (GemKind::Zapper, GemKind::Zapper) => {
                let mut mask = CellMask::for_grid(board.grid());
                for (pos, cell) in board.grid().iter() {
                    if cell.is_free_gem() && pos != low_pos && pos != high_pos {
                        mask.insert(pos);
                    }
                }
                (Combo::ZapperZapper, mask)
            }
            (kind, GemKind::Zapper) => {
                let mask = convert_color(board, low, kind, rng);
                (Combo::zapper_with(kind), mask)
            }
            (GemKind::Bomb, GemKind::Bomb) => {
                let mut mask = CellMask::for_grid(board.grid());
                mask.fill_square(mv.to, 2);
                (Combo::BombBomb, mask)
            }
            (GemKind::StripeRow | GemKind::StripeCol, GemKind::Bomb) => {
                let mut mask = CellMask::for_grid(board.grid());
                mask.fill_cross(mv.to, 1);
                (Combo::BombStripe, mask)
            }
            (GemKind::StripeRow | GemKind::StripeCol, GemKind::StripeRow | GemKind::StripeCol) => {
                let mut mask = CellMask::for_grid(board.grid());
                mask.fill_cross(mv.to, 0);
                (Combo::StripeStripe, mask)
            }
            (GemKind::Simple, _) => return SwapOutcome::Swapped,
            (a, b) => unreachable!("no reaction for {a:?} + {b:?}"),
        };

        board.record(Event::Combined(combo));
        for (pos, cell) in [(low_pos, low), (high_pos, high)] {
            board.grid_mut().clear(pos);
            if cell.kind.is_special() {
                board.record(Event::Activated(cell.kind));
            }
        }
        let tally = apply_mask(board, &mask, true);
        info!(%mv, code = combo.code(), destroyed = tally.destroyed, "special pair combined");
        SwapOutcome::Combined(combo)
    }
}

/// Turn every unlocked simple gem of `trigger`'s color into `kind` and
/// return their positions as a footprint.
fn convert_color(board: &mut Board, trigger: Cell, kind: GemKind, rng: &mut GameRng) -> CellMask {
    let grid = board.grid_mut();
    let mut mask = CellMask::for_grid(grid);
    let targets: Vec<Pos> = grid
        .iter()
        .filter(|(_, cell)| {
            cell.kind == GemKind::Simple && cell.lock.is_normal() && cell.color == trigger.color
        })
        .map(|(pos, _)| pos)
        .collect();

    for pos in targets {
        let new_kind = match kind {
            GemKind::StripeRow | GemKind::StripeCol => {
                if rng.coin_flip() {
                    GemKind::StripeRow
                } else {
                    GemKind::StripeCol
                }
            }
            other => other,
        };
        grid.set(pos, Cell::special(new_kind, trigger.color));
        mask.insert(pos);
    }
    mask
}
