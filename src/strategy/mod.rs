//! Move selection and game scoring.
//!
//! Nothing here is engine state: selectors only read a settled board and
//! the enumerated moves, and [`ScoreCard`] only reads the event log.

pub mod lookahead;
pub mod scoring;
pub mod selectors;

pub use lookahead::{simulate_move, LookaheadWeights};
pub use scoring::ScoreCard;
pub use selectors::{BestMove, MoveSelector, RandomMove, SmartMove, WorstMove};
