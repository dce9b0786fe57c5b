//! Legal move enumeration and the no-move shuffle.
//!
//! A swap of two adjacent free gems is legal when it
//!
//! - puts a zapper next to anything, or swaps two special gems, or
//! - lines up at least three gems of one color around either swapped cell.
//!
//! The line check looks at the board as it would be after the swap without
//! touching it: for each swapped cell it tests the two cells beyond it in
//! each of the four directions, and the two cells on either side of it along
//! each axis. This is a cheap sufficient condition, not a full combine pass.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Board, Cell, GameRng, Grid, GemKind, MoveWeights, Pos, DIRECTIONS};

/// A swap from one cell into an adjacent one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
}

impl Move {
    #[must_use]
    pub const fn new(from: Pos, to: Pos) -> Self {
        Self { from, to }
    }

    /// The same swap in the other direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(self.to, self.from)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// A legal move and its heuristic score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: u32,
}

/// Every legal move on `grid`, each yielded in both directions.
///
/// Pairs are discovered by scanning each cell's right then down neighbor in
/// row-major order; a pair's two directions are adjacent in the output and
/// carry the same score. Calling this does not change anything, so it can
/// be repeated freely.
#[must_use]
pub fn enumerate_valid_moves(grid: &Grid, weights: &MoveWeights) -> Vec<ScoredMove> {
    let mut scores: FxHashMap<(Pos, Pos), u32> = FxHashMap::default();
    let mut order: Vec<(Pos, Pos)> = Vec::new();
    let mut credit = |key: (Pos, Pos), points: u32| {
        let entry = scores.entry(key).or_insert_with(|| {
            order.push(key);
            0
        });
        *entry += points;
    };

    for (a, cell_a) in grid.iter() {
        if !cell_a.is_free_gem() {
            continue;
        }
        for (dr, dc) in [(0, 1), (1, 0)] {
            let Some(b) = grid.offset(a, dr, dc) else {
                continue;
            };
            let cell_b = grid[b];
            if !cell_b.is_free_gem() {
                continue;
            }

            let zapper = cell_a.kind == GemKind::Zapper || cell_b.kind == GemKind::Zapper;
            if zapper || (cell_a.kind.is_special() && cell_b.kind.is_special()) {
                credit((a, b), weights.special_pair);
                continue;
            }

            let hits = line_hits(grid, a, b) + line_hits(grid, b, a);
            if hits > 0 {
                credit((a, b), hits * weights.line);
            }
        }
    }

    order
        .into_iter()
        .flat_map(|(a, b)| {
            let score = scores[&(a, b)];
            let mv = Move::new(a, b);
            [ScoredMove { mv, score }, ScoredMove { mv: mv.reversed(), score }]
        })
        .collect()
}

/// Lines completed around `to` once the gem from `from` lands there.
fn line_hits(grid: &Grid, from: Pos, to: Pos) -> u32 {
    let landed = grid[from];
    if !landed.is_matchable() || landed.color.is_colorless() {
        return 0;
    }
    let same = |dr: isize, dc: isize| {
        let (row, col) = (to.row as isize + dr, to.col as isize + dc);
        cell_after_swap(grid, from, to, row, col).matches_color(&landed)
    };

    let mut hits = 0;
    for (dr, dc) in DIRECTIONS {
        if same(dr, dc) && same(2 * dr, 2 * dc) {
            hits += 1;
        }
    }
    if same(0, -1) && same(0, 1) {
        hits += 1;
    }
    if same(-1, 0) && same(1, 0) {
        hits += 1;
    }
    hits
}

/// Cell at `(row, col)` as it would read after swapping `a` and `b`.
fn cell_after_swap(grid: &Grid, a: Pos, b: Pos, row: isize, col: isize) -> Cell {
    let (Ok(r), Ok(c)) = (usize::try_from(row), usize::try_from(col)) else {
        return Cell::OUT_OF_PLAY;
    };
    let pos = Pos::new(r, c);
    if pos == a {
        grid.get(b).copied().unwrap_or(Cell::OUT_OF_PLAY)
    } else if pos == b {
        grid.get(a).copied().unwrap_or(Cell::OUT_OF_PLAY)
    } else {
        grid.cell_at(row, col)
    }
}

/// Permute the colors of all unlocked simple gems.
///
/// Returns whether any cell's color changed. Kinds and locks are untouched.
pub fn shuffle_colors(board: &mut Board, rng: &mut GameRng) -> bool {
    let grid = board.grid_mut();
    let targets: Vec<Pos> = grid
        .iter()
        .filter(|(_, cell)| cell.kind == GemKind::Simple && cell.lock.is_normal())
        .map(|(pos, _)| pos)
        .collect();
    let mut colors: Vec<_> = targets.iter().map(|&pos| grid[pos].color).collect();
    rng.shuffle(&mut colors);

    let mut changed = false;
    for (pos, color) in targets.into_iter().zip(colors) {
        let cell = grid[pos];
        if cell.color != color {
            grid.set(pos, Cell { color, ..cell });
            changed = true;
        }
    }
    debug!(changed, "colors shuffled");
    changed
}
