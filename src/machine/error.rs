//! Errors for cycling machine configuration, construction and lifecycle.

use thiserror::Error;

/// Invalid [`CycleConfig`](super::CycleConfig) values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Tick granularity must be greater than zero")]
    ZeroTick,

    #[error("Threshold range [{min}, {max}] must start above zero")]
    EmptyRange { min: u64, max: u64 },

    #[error("Threshold range is inverted: min {min} > max {max}")]
    InvertedRange { min: u64, max: u64 },

    #[error("History limit must be greater than zero")]
    ZeroHistoryLimit,

    /// Configuration text could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Errors that can occur when building a cycling machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Lifecycle and wait errors of a running machine.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Machine already started")]
    AlreadyStarted,

    /// The machine was stopped; its queue is closed and drained.
    #[error("Machine stopped")]
    Stopped,

    #[error("Failed to spawn cycling worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Cycling worker panicked")]
    WorkerPanicked,
}
