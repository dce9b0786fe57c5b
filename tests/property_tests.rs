//! Property tests over random boards.

use proptest::prelude::*;

use rust_match3::core::{Board, BoardConfig, Cell, GameRng, GemColor, GemKind, Grid, LockState, Pos};
use rust_match3::engine::{Activator, Combiner, GravityResolver};
use rust_match3::fill::TopFiller;
use rust_match3::session::{GameSession, ScenarioBuilder, SessionConfig};
use rust_match3::strategy::RandomMove;

/// Cell from generated selectors. Most cells are simple gems.
fn cell_from(kind: u8, color: u8, lock: u8) -> Cell {
    let base = match kind {
        0 => return Cell::EMPTY,
        1 => return Cell::OUT_OF_PLAY,
        2 => Cell::special(GemKind::StripeRow, GemColor::new(color)),
        3 => Cell::special(GemKind::Bomb, GemColor::new(color)),
        4 => Cell::zapper(),
        _ => Cell::simple(color),
    };
    match lock {
        0 => base.with_lock(LockState::Locked),
        1 => base.with_lock(LockState::DoubleLocked),
        _ => base,
    }
}

/// Strategy: boards from 3x3 to 7x7 with a mix of every cell kind.
fn arb_board() -> impl Strategy<Value = Board> {
    (3usize..8, 3usize..8).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec((0u8..12, 1u8..5, 0u8..8), rows * cols).prop_map(move |cells| {
            let mut grid = Grid::new(rows, cols);
            for (i, &(kind, color, lock)) in cells.iter().enumerate() {
                grid.set(Pos::new(i / cols, i % cols), cell_from(kind, color, lock));
            }
            Board::from_grid(grid)
        })
    })
}

/// Strategy: boards of simple gems and holes only, so nothing blocks a fall.
fn arb_open_board() -> impl Strategy<Value = Board> {
    (3usize..8, 3usize..8).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(0u8..5, rows * cols).prop_map(move |cells| {
            let mut grid = Grid::new(rows, cols);
            for (i, &color) in cells.iter().enumerate() {
                let cell = if color == 0 { Cell::EMPTY } else { Cell::simple(color) };
                grid.set(Pos::new(i / cols, i % cols), cell);
            }
            Board::from_grid(grid)
        })
    })
}

fn free_gems(cells: impl Iterator<Item = Cell>) -> Vec<(GemKind, GemColor)> {
    let mut gems: Vec<_> = cells
        .filter(Cell::is_free_gem)
        .map(|cell| (cell.kind, cell.color))
        .collect();
    gems.sort();
    gems
}

// =============================================================================
// Gravity
// =============================================================================

proptest! {
    #[test]
    fn prop_gravity_conserves_gems(board in arb_board(), seed in any::<u64>()) {
        let mut board = board;
        let before = free_gems(board.grid().iter().map(|(_, c)| c));
        let mut rng = GameRng::new(seed);
        let gravity = GravityResolver::new();
        for _ in 0..board.grid().rows() {
            gravity.step(&mut board, &mut rng);
        }
        prop_assert_eq!(free_gems(board.grid().iter().map(|(_, c)| c)), before);
    }

    #[test]
    fn prop_open_columns_keep_their_gems(board in arb_open_board(), seed in any::<u64>()) {
        let mut board = board;
        let column = |b: &Board, col: usize| {
            let grid = b.grid();
            free_gems((0..grid.rows()).map(|row| grid[Pos::new(row, col)]))
        };
        let cols = board.grid().cols();
        let before: Vec<_> = (0..cols).map(|col| column(&board, col)).collect();
        let mut rng = GameRng::new(seed);
        for _ in 0..board.grid().rows() {
            GravityResolver::new().step(&mut board, &mut rng);
        }
        let after: Vec<_> = (0..cols).map(|col| column(&board, col)).collect();
        prop_assert_eq!(after, before);
    }

    #[test]
    fn prop_gravity_never_moves_locked_cells(board in arb_board(), seed in any::<u64>()) {
        let mut board = board;
        let locked: Vec<(Pos, Cell)> = board
            .grid()
            .iter()
            .filter(|(_, c)| c.lock.is_locked() || c.is_out_of_play())
            .collect();
        let mut rng = GameRng::new(seed);
        for _ in 0..board.grid().rows() {
            GravityResolver::new().step(&mut board, &mut rng);
        }
        for (pos, cell) in locked {
            prop_assert_eq!(board.grid()[pos], cell);
        }
    }
}

// =============================================================================
// Combining
// =============================================================================

proptest! {
    #[test]
    fn prop_matches_only_cover_free_gems(board in arb_board()) {
        let combiner = Combiner::new();
        for found in combiner.find_matches(board.grid()) {
            for &pos in &found.cells {
                prop_assert!(board.grid()[pos].is_matchable(), "locked or empty cell {} matched", pos);
                prop_assert_eq!(board.grid()[pos].color, found.color);
            }
        }
    }

    #[test]
    fn prop_settle_leaves_no_exploding_cells(board in arb_board(), seed in any::<u64>()) {
        let mut game = GameSession::new(
            board,
            TopFiller::plain(4).unwrap(),
            SessionConfig::default(),
            GameRng::new(seed),
        );
        prop_assume!(game.settle().is_ok());
        prop_assert_eq!(game.board().grid().count(|c| c.lock.is_exploding()), 0);
    }

    #[test]
    fn prop_quiet_board_stays_quiet(board in arb_board(), seed in any::<u64>()) {
        let mut board = board;
        let mut rng = GameRng::new(seed);
        let mut combiner = Combiner::new();
        let activator = Activator::new();
        let mut rounds = 0;
        while combiner.step(&mut board, &mut rng) | activator.step(&mut board, &mut rng) {
            rounds += 1;
            prop_assert!(rounds < 200, "combine loop did not converge");
        }
        let snapshot = board.clone();
        prop_assert!(!combiner.step(&mut board, &mut rng));
        prop_assert!(!activator.step(&mut board, &mut rng));
        prop_assert_eq!(board, snapshot);
    }
}

// =============================================================================
// Determinism
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_games_replay_from_seed(level in 0u64..1_000, game_seed in any::<u64>()) {
        let scenario = ScenarioBuilder::new(BoardConfig::new(6, 6, 5)).build(level).unwrap();
        let config = SessionConfig::default().with_max_swaps(4);

        let mut first = scenario.session(config.clone(), game_seed);
        let mut second = scenario.session(config, game_seed);
        let a = first.run(&RandomMove);
        let b = second.run(&RandomMove);

        prop_assert_eq!(a, b);
        prop_assert_eq!(first.board(), second.board());
    }
}
