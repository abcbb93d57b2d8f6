//! Builder for constructing cycling machines.

use crate::core::Toggle;
use crate::machine::config::CycleConfig;
use crate::machine::cycling::CyclingStateMachine;
use crate::machine::error::BuildError;
use std::time::Duration;

/// Builder for constructing cycling machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use light_cycle::{CyclingMachineBuilder, LightPhase};
/// use std::time::Duration;
///
/// let machine = CyclingMachineBuilder::new()
///     .initial(LightPhase::Red)
///     .tick(Duration::from_micros(250))
///     .threshold_range(40, 60)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current_state(), LightPhase::Red);
/// assert_eq!(machine.config().tick_micros, 250);
/// ```
pub struct CyclingMachineBuilder<S: Toggle + 'static> {
    initial: Option<S>,
    config: CycleConfig,
}

impl<S: Toggle + 'static> CyclingMachineBuilder<S> {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            initial: None,
            config: CycleConfig::default(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: CycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the sleep granularity of the worker loop.
    pub fn tick(mut self, tick: Duration) -> Self {
        self.config.tick_micros = u64::try_from(tick.as_micros()).unwrap_or(u64::MAX);
        self
    }

    /// Set the inclusive range, in ticks, a phase may last.
    pub fn threshold_range(mut self, min_ticks: u64, max_ticks: u64) -> Self {
        self.config.min_ticks = min_ticks;
        self.config.max_ticks = max_ticks;
        self
    }

    /// Use a fixed RNG seed for a reproducible flip schedule.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Build the machine.
    /// Returns an error if the initial state is missing or the configuration is invalid.
    pub fn build(self) -> Result<CyclingStateMachine<S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        Ok(CyclingStateMachine::new(initial, self.config)?)
    }
}

impl<S: Toggle + 'static> Default for CyclingMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
