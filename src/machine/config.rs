//! Cycling machine configuration.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and bookkeeping parameters for a cycling machine.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use light_cycle::CycleConfig;
///
/// let config = CycleConfig::from_json(r#"{ "tick_micros": 500 }"#).unwrap();
/// assert_eq!(config.tick_micros, 500);
/// assert_eq!((config.min_ticks, config.max_ticks), (4000, 6000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Sleep granularity of the worker loop (microseconds).
    pub tick_micros: u64,
    /// Smallest number of ticks a phase lasts.
    pub min_ticks: u64,
    /// Largest number of ticks a phase lasts.
    pub max_ticks: u64,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Number of flips retained in the history.
    pub history_limit: usize,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            tick_micros: 1_000,
            min_ticks: 4_000,
            max_ticks: 6_000,
            seed: None,
            history_limit: 1_024,
        }
    }
}

impl CycleConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_micros == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.min_ticks == 0 {
            return Err(ConfigError::EmptyRange {
                min: self.min_ticks,
                max: self.max_ticks,
            });
        }
        if self.min_ticks > self.max_ticks {
            return Err(ConfigError::InvertedRange {
                min: self.min_ticks,
                max: self.max_ticks,
            });
        }
        if self.history_limit == 0 {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        Ok(())
    }

    /// Parse a JSON document and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_micros(self.tick_micros)
    }

    /// Shortest and longest wall-clock phase, ignoring sleep overshoot.
    pub fn phase_bounds(&self) -> (Duration, Duration) {
        let tick = self.tick();
        (
            tick.saturating_mul(u32::try_from(self.min_ticks).unwrap_or(u32::MAX)),
            tick.saturating_mul(u32::try_from(self.max_ticks).unwrap_or(u32::MAX)),
        )
    }
}
