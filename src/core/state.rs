//! Core State trait for state machine states.
//!
//! All state machine states must implement this trait, which provides
//! pure methods for inspecting state properties without side effects.
//! Two-valued states additionally implement [`Toggle`].

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States represent immutable
/// values that describe the current position in a state machine.
///
/// # Required Traits
///
/// - `Clone`: States are copied into the queue, the history and snapshots
/// - `PartialEq`: States must be comparable for the wait protocol
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States must be serializable for persistence
/// - `Send` + `Sync`: States cross the worker thread boundary
///
/// # Example
///
/// ```rust
/// use light_cycle::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Valve {
///     Open,
///     Closed,
/// }
///
/// impl State for Valve {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Valve::Open.name(), "Open");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// A state with exactly two values, each the other's successor.
///
/// `toggled` must be an involution: `s.toggled().toggled() == s` and
/// `s.toggled() != s`. Types generated by [`two_state_enum!`](crate::two_state_enum)
/// satisfy this by construction.
///
/// # Example
///
/// ```rust
/// use light_cycle::core::Toggle;
/// use light_cycle::LightPhase;
///
/// assert_eq!(LightPhase::Red.toggled(), LightPhase::Green);
/// assert_eq!(LightPhase::Green.toggled(), LightPhase::Red);
/// ```
pub trait Toggle: State {
    /// The other value.
    fn toggled(&self) -> Self;
}
