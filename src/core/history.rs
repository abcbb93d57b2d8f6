//! Flip history tracking.
//!
//! Every state change the cycling worker publishes is recorded here, so
//! callers can inspect the path the machine took and how long each phase
//! lasted. The history is mutated in place; the machine keeps it behind a
//! mutex and hands out clones.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single published flip.
///
/// # Example
///
/// ```rust
/// use light_cycle::core::StateTransition;
/// use light_cycle::LightPhase;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: LightPhase::Red,
///     to: LightPhase::Green,
///     timestamp: Utc::now(),
///     ticks: 4200,
/// };
/// assert_eq!(transition.ticks, 4200);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being published
    pub to: S,
    /// When the flip was committed
    pub timestamp: DateTime<Utc>,
    /// Ticks that elapsed in `from` before the flip
    pub ticks: u64,
}

/// Ordered, optionally bounded history of flips.
///
/// When a limit is set, recording beyond it evicts the oldest entry.
///
/// # Example
///
/// ```rust
/// use light_cycle::core::{StateHistory, StateTransition};
/// use light_cycle::LightPhase;
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// history.record(StateTransition {
///     from: LightPhase::Red,
///     to: LightPhase::Green,
///     timestamp: Utc::now(),
///     ticks: 5000,
/// });
/// history.record(StateTransition {
///     from: LightPhase::Green,
///     to: LightPhase::Red,
///     timestamp: Utc::now(),
///     ticks: 4100,
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // Red -> Green -> Red
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    limit: Option<usize>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty, unbounded history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: None,
        }
    }

    /// Create an empty history that keeps at most `limit` flips.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(1024)),
            limit: Some(limit),
        }
    }

    /// Append a flip, evicting the oldest one if the limit is reached.
    pub fn record(&mut self, transition: StateTransition<S>) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.transitions.len() >= limit {
                self.transitions.pop_front();
            }
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the `from` state of the
    /// oldest retained flip, then the `to` state of each flip.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Wall-clock time between the oldest and newest retained flip.
    ///
    /// Returns `None` if there are no flips.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Tick counts of each retained flip, oldest first.
    pub fn intervals(&self) -> Vec<u64> {
        self.transitions.iter().map(|t| t.ticks).collect()
    }

    /// Iterate over retained flips, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    /// The most recent flip.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
