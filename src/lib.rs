//! Light Cycle: a two-state machine that publishes each flip through a
//! blocking handoff queue.
//!
//! The crate follows a "pure core, imperative shell" split. The core holds
//! the state traits, the randomized phase timer and the flip history, all
//! free of threads and blocking. The shell is a background worker that
//! flips the state on the timer and hands every new state to consumers
//! through a mutex + condvar queue.
//!
//! # Core Concepts
//!
//! - **State**: two-valued state types via the `State` and `Toggle` traits
//! - **BlockingQueue**: unbounded FIFO with blocking `receive`, non-blocking `send`
//! - **CyclingStateMachine**: flips on a random threshold and publishes each flip
//! - **wait_for_state**: blocks a caller until a target state is published
//!
//! # Example
//!
//! ```rust
//! use light_cycle::{CyclingMachineBuilder, LightPhase};
//! use std::time::Duration;
//!
//! let light = CyclingMachineBuilder::new()
//!     .initial(LightPhase::Red)
//!     .tick(Duration::from_micros(100))
//!     .threshold_range(40, 60)
//!     .build()
//!     .unwrap();
//!
//! light.start().unwrap();
//! light.wait_for_state(LightPhase::Green).unwrap();
//! light.stop().unwrap();
//!
//! let history = light.history();
//! assert!(history.intervals().iter().all(|t| (40..=60).contains(t)));
//! ```

mod macros;

pub mod core;
pub mod light;
pub mod machine;
pub mod queue;

// Re-export commonly used types
pub use crate::core::{State, StateHistory, StateTransition, Toggle};
pub use light::{LightPhase, TrafficLight};
pub use machine::{
    BuildError, ConfigError, CycleConfig, CyclingMachineBuilder, CyclingStateMachine,
    MachineError,
};
pub use queue::{BlockingQueue, MessageSource, QueueError};
