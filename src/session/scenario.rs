//! Random level generation.
//!
//! A scenario is a board shape, a palette and a seed. The seed fixes every
//! random choice in the level:
//!
//! | choice | distribution |
//! |--------|--------------|
//! | disabled / locked row count | `k` in `0..rows`, weight `1 / (0.2 + k)` |
//! | disabled / locked column count | `k` in `0..cols`, weight `1 / (0.2 + k)` |
//! | special seeding | 10%; kinds stripes + bomb, or those plus zapper, evenly |
//! | disabled zone | 10% |
//! | border placement | symmetric or random, evenly |
//!
//! Small counts are much more likely than large ones. Counts are clamped so
//! every generated level passes [`BorderConfig::validate`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    Board, BoardConfig, BorderConfig, ConfigError, EngineResult, GameRng, GemKind, SpecialSeedConfig, TopFillConfig,
    UnplayableBoard,
};
use crate::fill::{InitialFiller, SpecialSeeder, TopFiller};

use super::config::SessionConfig;
use super::game::GameSession;

/// Draws random levels of one shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBuilder {
    /// Board shape and palette.
    pub board: BoardConfig,
    /// Chance that each refill is a locked filler.
    pub locked_fraction: f64,
    /// Chance of seeding special gems.
    pub special_chance: f64,
    /// Chance of a disabled zone.
    pub disable_chance: f64,
    /// Upper bound on seeded special gems.
    pub max_specials: usize,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl ScenarioBuilder {
    #[must_use]
    pub fn new(board: BoardConfig) -> Self {
        Self {
            board,
            locked_fraction: 0.02,
            special_chance: 0.1,
            disable_chance: 0.1,
            max_specials: 4,
        }
    }

    #[must_use]
    pub fn with_locked_fraction(mut self, fraction: f64) -> Self {
        self.locked_fraction = fraction;
        self
    }

    #[must_use]
    pub fn with_special_chance(mut self, chance: f64) -> Self {
        self.special_chance = chance;
        self
    }

    #[must_use]
    pub fn with_disable_chance(mut self, chance: f64) -> Self {
        self.disable_chance = chance;
        self
    }

    #[must_use]
    pub fn with_max_specials(mut self, count: usize) -> Self {
        self.max_specials = count;
        self
    }

    /// Generate the level for `seed`.
    ///
    /// Equal seeds give identical boards.
    pub fn build(&self, seed: u64) -> EngineResult<Scenario> {
        self.board.validate()?;
        let top = TopFillConfig::new(self.board.colors).with_locked_fraction(self.locked_fraction);
        top.validate()?;
        for chance in [self.special_chance, self.disable_chance] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::InvalidProbability(chance).into());
            }
        }

        let mut rng = GameRng::new(seed);
        let (rows, cols) = (self.board.rows, self.board.cols);

        let disabled_rows = weighted_count(rows, &mut rng);
        let locked_rows = weighted_count(rows, &mut rng);
        let disabled_cols = weighted_count(cols, &mut rng);
        let locked_cols = weighted_count(cols, &mut rng);

        let special = rng.chance(self.special_chance).then(|| {
            let mut kinds = vec![GemKind::StripeRow, GemKind::StripeCol, GemKind::Bomb];
            if rng.coin_flip() {
                kinds.push(GemKind::Zapper);
            }
            kinds
        });
        let disable = rng.chance(self.disable_chance);
        let lock_border = rng.coin_flip();

        let border = clamp_border(
            BorderConfig::new()
                .with_locked(locked_rows, locked_cols)
                .with_disabled(
                    if disable { disabled_rows } else { 0 },
                    if disable { disabled_cols } else { 0 },
                )
                .symmetric(lock_border),
            rows,
            cols,
        );

        let mut board = Board::from_config(&self.board)?;
        InitialFiller::new(border.clone()).run(&mut board, &mut rng)?;

        let special = match special {
            Some(kinds) => {
                let free = board.grid().count(|cell| cell.is_vacant());
                let count = (1 + rng.below(self.max_specials.max(1))).min(free);
                let config = SpecialSeedConfig::new(count, kinds, self.board.colors);
                SpecialSeeder::new(config.clone()).run(&mut board, &mut rng)?;
                Some(config)
            }
            None => None,
        };

        debug!(seed, ?border, specials = special.as_ref().map_or(0, |s| s.count), "scenario built");
        Ok(Scenario {
            seed,
            board,
            border,
            special,
            top: TopFiller::new(top)?,
        })
    }

    /// Like [`build`](Self::build), but rejects a level whose starting grid
    /// equals the one built from any lower seed.
    ///
    /// Every lower seed is rebuilt, so this costs `seed + 1` builds.
    pub fn build_unique(&self, seed: u64) -> EngineResult<Scenario> {
        let scenario = self.build(seed)?;
        for earlier in 0..seed {
            if self.build(earlier)?.board.grid() == scenario.board.grid() {
                warn!(seed, earlier, "duplicate level");
                return Err(UnplayableBoard::DuplicateLevel { seed, earlier }.into());
            }
        }
        Ok(scenario)
    }
}

/// A generated level, ready to play.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub seed: u64,
    pub board: Board,
    /// Zones actually placed.
    pub border: BorderConfig,
    /// Specials actually seeded.
    pub special: Option<SpecialSeedConfig>,
    pub top: TopFiller,
}

impl Scenario {
    /// Start a game on a copy of this level.
    ///
    /// The game's random stream is independent of the level's, so one level
    /// can be replayed with many game seeds.
    #[must_use]
    pub fn session(&self, config: SessionConfig, game_seed: u64) -> GameSession {
        GameSession::new(self.board.clone(), self.top.clone(), config, GameRng::new(game_seed))
    }
}

/// `k` in `0..n` with weight `1 / (0.2 + k)`.
fn weighted_count(n: usize, rng: &mut GameRng) -> usize {
    let weights: Vec<f64> = (0..n).map(|k| 1.0 / (0.2 + k as f64)).collect();
    rng.weighted_index(&weights).unwrap_or(0)
}

/// Shrink zone counts until they fit a `rows x cols` board.
fn clamp_border(mut border: BorderConfig, rows: usize, cols: usize) -> BorderConfig {
    let row_budget = rows.saturating_sub(1);
    border.disabled_rows = border.disabled_rows.min(row_budget);
    border.locked_rows = border.locked_rows.min(row_budget);

    let per_side = if border.lock_border { 2 } else { 1 };
    border.disabled_cols = border.disabled_cols.min(cols.saturating_sub(1) / per_side);
    border.locked_cols = border.locked_cols.min(cols / per_side);
    border
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineError, Pos};

    #[test]
    fn test_same_seed_same_level() {
        let builder = ScenarioBuilder::default();
        for seed in 0..20 {
            let a = builder.build(seed).unwrap();
            let b = builder.build(seed).unwrap();
            assert_eq!(a.board, b.board);
            assert_eq!(a.border, b.border);
        }
    }

    #[test]
    fn test_levels_always_validate() {
        let builder = ScenarioBuilder::new(BoardConfig::new(4, 3, 4))
            .with_special_chance(0.5)
            .with_disable_chance(0.5);
        for seed in 0..200 {
            let scenario = builder.build(seed).unwrap();
            assert!(scenario.border.validate(4, 3).is_ok());
            let grid = scenario.board.grid();
            assert!((0..3).any(|col| !grid[Pos::new(0, col)].is_out_of_play()));
        }
    }

    #[test]
    fn test_small_counts_dominate() {
        let mut rng = GameRng::new(8);
        let draws: Vec<usize> = (0..2000).map(|_| weighted_count(8, &mut rng)).collect();
        let zeros = draws.iter().filter(|&&k| k == 0).count();
        let sevens = draws.iter().filter(|&&k| k == 7).count();
        assert!(zeros > 5 * sevens);
        assert!(draws.iter().all(|&k| k < 8));
    }

    #[test]
    fn test_specials_seeded_when_forced() {
        let builder = ScenarioBuilder::new(BoardConfig::new(6, 6, 5))
            .with_special_chance(1.0)
            .with_max_specials(3);
        let scenario = builder.build(5).unwrap();
        let seeded = scenario.special.as_ref().unwrap();
        let placed = scenario.board.grid().count(|cell| cell.kind.is_special());
        assert_eq!(placed, seeded.count);
        assert!(placed <= 3);
    }

    #[test]
    fn test_unique_levels_reject_repeats() {
        let builder = ScenarioBuilder::new(BoardConfig::new(5, 5, 4));
        assert!(builder.build_unique(0).is_ok());

        let mut repeats = 0;
        for seed in 1..30 {
            match builder.build_unique(seed) {
                Ok(scenario) => {
                    for earlier in 0..seed {
                        assert_ne!(builder.build(earlier).unwrap().board.grid(), scenario.board.grid());
                    }
                }
                Err(EngineError::Unplayable(UnplayableBoard::DuplicateLevel { seed: s, earlier })) => {
                    assert_eq!(s, seed);
                    assert!(earlier < seed);
                    assert_eq!(
                        builder.build(earlier).unwrap().board.grid(),
                        builder.build(seed).unwrap().board.grid()
                    );
                    repeats += 1;
                }
                Err(err) => panic!("unexpected error for seed {seed}: {err}"),
            }
        }
        // Zone-free levels without specials are all the same empty grid.
        assert!(repeats > 0);
    }

    #[test]
    fn test_rejects_bad_shape() {
        let err = ScenarioBuilder::new(BoardConfig::new(0, 5, 3)).build(1).unwrap_err();
        assert!(!err.is_unplayable());
        let err = ScenarioBuilder::default().with_locked_fraction(2.0).build(1).unwrap_err();
        assert_eq!(err, EngineError::Config(ConfigError::InvalidProbability(2.0)));
        let err = ScenarioBuilder::default().with_special_chance(-0.5).build(1).unwrap_err();
        assert_eq!(err, EngineError::Config(ConfigError::InvalidProbability(-0.5)));
    }
}
