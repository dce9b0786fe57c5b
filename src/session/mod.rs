//! Automated play: a reference game loop and random level generation.
//!
//! The engine itself only exposes single steps. This module composes them
//! the way a level-tuning harness does: generate a level with
//! [`ScenarioBuilder`], start a [`GameSession`] on it and let a
//! [`MoveSelector`](crate::strategy::MoveSelector) play until the swap
//! budget in [`SessionConfig`] is spent.

pub mod config;
pub mod game;
pub mod scenario;

pub use config::SessionConfig;
pub use game::GameSession;
pub use scenario::{Scenario, ScenarioBuilder};
