//! Core state types and logic.
//!
//! This module contains the pure functional core of the cycling machine:
//! - State definitions via the `State` and `Toggle` traits
//! - The randomized `PhaseTimer` that decides when to flip
//! - Bounded history of published flips
//!
//! Nothing in this module spawns threads or blocks; the imperative shell
//! lives in [`crate::machine`].

mod history;
mod state;
mod timer;

pub use history::{StateHistory, StateTransition};
pub use state::{State, Toggle};
pub use timer::{seeded_rng, PhaseTimer};
