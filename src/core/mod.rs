//! Core types: cells, grid, board, events, configuration, errors, RNG.
//!
//! Everything here is plain data plus invariant checks. The engine
//! components that move gems around live in [`crate::engine`] and
//! [`crate::fill`].

pub mod cell;
pub mod grid;
pub mod mask;
pub mod event;
pub mod change;
pub mod board;
pub mod config;
pub mod error;
pub mod rng;

pub use cell::{Cell, GemColor, GemKind, LockState};
pub use grid::{Grid, Pos, DIRECTIONS};
pub use mask::CellMask;
pub use event::{Combo, Event, EventLog};
pub use change::{Change, ChangeReason};
pub use board::Board;
pub use config::{BoardConfig, BorderConfig, MoveWeights, SpecialSeedConfig, TopFillConfig};
pub use error::{ConfigError, EngineError, EngineResult, LayoutError, UnplayableBoard};
pub use rng::{GameRng, GameRngState};
