//! The cycling machine: the threaded shell around the pure core.
//!
//! # Key Concepts
//!
//! - **Worker**: one background thread per machine, paced by a fixed tick
//! - **Publishing**: every flip is pushed onto the machine's blocking queue
//! - **Waiting**: callers drain that queue until their target state appears
//! - **Shutdown**: `stop()` cancels and joins the worker and closes the queue

mod builder;
mod config;
mod cycling;
mod error;

pub use builder::CyclingMachineBuilder;
pub use config::CycleConfig;
pub use cycling::{wait_for, CyclingStateMachine};
pub use error::{BuildError, ConfigError, MachineError};
