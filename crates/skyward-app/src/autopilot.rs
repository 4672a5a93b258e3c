//! Scripted pilot for headless runs: takeoff roll, rotation, then attitude-based altitude hold.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use skyward_core::commands::{ControlInput, ThrottleInput};
use skyward_core::state::AircraftState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutopilotPhase {
    TakeoffRoll,
    Rotate,
    Cruise,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Autopilot {
    /// Full throttle on the runway until this time (s).
    pub rotate_at: f64,
    /// Stick back until this time (s).
    pub cruise_at: f64,
    /// Altitude held during cruise (m).
    pub cruise_altitude: f64,
    pub cruise_throttle: f64,
    /// Pull the trigger during cruise.
    pub fire: bool,
    /// One half-second burst every this many seconds.
    pub burst_period: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            rotate_at: 3.0,
            cruise_at: 5.0,
            cruise_altitude: 300.0,
            cruise_throttle: 0.8,
            fire: false,
            burst_period: 4.0,
        }
    }
}

const BURST_SECS: f64 = 0.5;
const MAX_CRUISE_PITCH: f64 = 0.25;

/// Nose elevation above the horizon (rad).
fn nose_pitch(aircraft: &AircraftState) -> f64 {
    let forward = aircraft.orientation * DVec3::Z;
    forward.y.clamp(-1.0, 1.0).asin()
}

impl Autopilot {
    pub fn phase(&self, t: f64) -> AutopilotPhase {
        if t < self.rotate_at {
            AutopilotPhase::TakeoffRoll
        } else if t < self.cruise_at {
            AutopilotPhase::Rotate
        } else {
            AutopilotPhase::Cruise
        }
    }

    /// Stick and throttle for simulation time `t`.
    pub fn input(&self, t: f64, aircraft: &AircraftState) -> ControlInput {
        match self.phase(t) {
            AutopilotPhase::TakeoffRoll => ControlInput {
                throttle: ThrottleInput::Set(1.0),
                ..Default::default()
            },
            AutopilotPhase::Rotate => ControlInput {
                pitch: 0.5,
                throttle: ThrottleInput::Set(1.0),
                ..Default::default()
            },
            AutopilotPhase::Cruise => {
                // Stick commands a rate, so hold a nose attitude rather than pushing on altitude error.
                let error = self.cruise_altitude - aircraft.position.y;
                let target = (error / 200.0).clamp(-MAX_CRUISE_PITCH, MAX_CRUISE_PITCH);
                let cruise_time = t - self.cruise_at;
                ControlInput {
                    pitch: ((target - nose_pitch(aircraft)) * 3.0).clamp(-1.0, 1.0),
                    throttle: ThrottleInput::Set(self.cruise_throttle),
                    fire: self.fire && cruise_time.rem_euclid(self.burst_period) < BURST_SECS,
                    ..Default::default()
                }
            }
        }
    }
}
