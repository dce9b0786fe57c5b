//! The board simulation engine.
//!
//! ## Phases
//!
//! A driver advances the board in two settle loops:
//!
//! 1. **Drop**: [`GravityResolver::step`] and [`TopFiller::step`] until
//!    neither reports a change.
//! 2. **Combine**: [`Combiner::step`] and [`Activator::step`] until neither
//!    reports a change.
//!
//! Only then are moves enumerated with [`SwapResolver::valid_moves`] and one
//! applied with [`SwapResolver::run`]. Every step takes the caller's
//! [`GameRng`]; no component owns randomness.
//!
//! [`TopFiller::step`]: crate::fill::TopFiller::step
//! [`GameRng`]: crate::core::GameRng

pub mod effect;
pub mod gravity;
pub mod pattern;
pub mod combiner;
pub mod activator;
pub mod moves;
pub mod swap;

pub use effect::{apply_mask, EffectTally};
pub use gravity::GravityResolver;
pub use pattern::{Pattern, PatternLibrary};
pub use combiner::{Combiner, Match};
pub use activator::Activator;
pub use moves::{enumerate_valid_moves, shuffle_colors, Move, ScoredMove};
pub use swap::{SwapOutcome, SwapResolver};
