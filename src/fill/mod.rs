//! Board population.
//!
//! - [`InitialFiller`]: one-time setup of disabled and double-locked zones,
//!   optionally followed by a [`SpecialSeeder`].
//! - [`TopFiller`]: per-tick refill of the top row.
//!
//! Fillers never place gems below row 0 after setup; gravity carries refills
//! down the board.

pub mod initial;
pub mod special;
pub mod top;

pub use initial::InitialFiller;
pub use special::SpecialSeeder;
pub use top::TopFiller;
