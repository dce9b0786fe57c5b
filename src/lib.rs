//! # rust-match3
//!
//! A deterministic match-3 board simulation engine for automated play and
//! level tuning.
//!
//! ## Design Principles
//!
//! 1. **Explicit Randomness**: No component owns a random source. Every
//!    step takes the caller's [`GameRng`], so a seed replays a game exactly.
//!
//! 2. **Small Steps**: Gravity, refill, combining, activation and swaps are
//!    separate components that each advance the board by one step and
//!    report whether anything changed. Drivers compose them.
//!
//! 3. **Events, Not Scores**: The engine appends what happened to the
//!    board's event log. Scoring and statistics read the log afterwards.
//!
//! ## Architecture
//!
//! - **Cell Grid**: One array of cells, each with a kind, a color and a lock
//!   state. Out-of-play cells shape the board and never change.
//!
//! - **Persistent Event Log**: `im` vectors make board copies cheap, which
//!   lookahead strategies rely on.
//!
//! ## Modules
//!
//! - `core`: Cells, grid, masks, events, board, configuration, errors, RNG
//! - `fill`: Initial zones, special seeding and top-row refill
//! - `engine`: Gravity, pattern matching, activation, swaps, move enumeration
//! - `strategy`: Move selectors and score cards
//! - `session`: Reference game loop and random level generation

pub mod core;
pub mod fill;
pub mod engine;
pub mod strategy;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Board, Cell, GemColor, GemKind, LockState,
    Grid, Pos, CellMask,
    Combo, Event, EventLog, Change, ChangeReason,
    BoardConfig, BorderConfig, MoveWeights, SpecialSeedConfig, TopFillConfig,
    ConfigError, EngineError, EngineResult, LayoutError, UnplayableBoard,
    GameRng, GameRngState,
};

pub use crate::fill::{InitialFiller, SpecialSeeder, TopFiller};

pub use crate::engine::{
    Activator, Combiner, GravityResolver, Match, Pattern, PatternLibrary,
    Move, ScoredMove, SwapOutcome, SwapResolver,
};

pub use crate::strategy::{
    BestMove, LookaheadWeights, MoveSelector, RandomMove, ScoreCard, SmartMove, WorstMove,
};

pub use crate::session::{GameSession, Scenario, ScenarioBuilder, SessionConfig};
