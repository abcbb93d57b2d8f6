//! Traffic light: the canonical two-state cycling machine.

use crate::machine::{CycleConfig, CyclingStateMachine, MachineError};
use crate::two_state_enum;

two_state_enum! {
    /// Phase of a traffic light.
    pub enum LightPhase {
        Red,
        Green,
    }
}

/// A cycling machine over [`LightPhase`].
pub type TrafficLight = CyclingStateMachine<LightPhase>;

impl TrafficLight {
    /// A red light flipping every 4 to 6 seconds.
    pub fn standard() -> Self {
        Self::new(LightPhase::Red, CycleConfig::default())
            .expect("Default configuration should always validate")
    }

    /// Block until the light turns green.
    pub fn wait_for_green(&self) -> Result<(), MachineError> {
        self.wait_for_state(LightPhase::Green)
    }
}
