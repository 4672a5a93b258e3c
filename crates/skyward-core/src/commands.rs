//! Pilot input and control commands sent from the frontend to the simulation.
//!
//! `ControlInput` is sampled every frame and passed to `advance`.
//! `SimCommand`s are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// How the throttle lever moves this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value")]
pub enum ThrottleInput {
    /// Leave the throttle where it is.
    #[default]
    Hold,
    /// Move the lever at a rate proportional to the axis (-1 = closing, 1 = opening).
    Adjust(f64),
    /// Jump to an absolute setting in [0, 1] (slider input).
    Set(f64),
}

/// Per-frame pilot intent. Out-of-range values are clamped, never rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    /// Stick back (+) raises the nose.
    pub pitch: f64,
    /// Bank axis; the body roll rate is the negated axis.
    pub roll: f64,
    /// Rudder axis; positive turns the nose toward +x.
    pub yaw: f64,
    pub throttle: ThrottleInput,
    /// Wheel brakes; only effective on the ground.
    pub brake: bool,
    /// Pull the trigger. Ignored while the gun is cooling down.
    pub fire: bool,
}

impl ControlInput {
    /// Copy with every axis clamped to its legal range.
    pub fn clamped(&self) -> Self {
        let throttle = match self.throttle {
            ThrottleInput::Hold => ThrottleInput::Hold,
            ThrottleInput::Adjust(axis) => ThrottleInput::Adjust(clamp_axis(axis)),
            ThrottleInput::Set(value) => ThrottleInput::Set(clamp_unit(value)),
        };
        Self {
            pitch: clamp_axis(self.pitch),
            roll: clamp_axis(self.roll),
            yaw: clamp_axis(self.yaw),
            throttle,
            brake: self.brake,
            fire: self.fire,
        }
    }
}

/// Clamp to [-1, 1]; NaN becomes 0.
fn clamp_axis(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Clamp to [0, 1]; NaN becomes 0.
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Discrete simulation commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Put the aircraft back on the runway immediately.
    ResetAircraft,
    /// Despawn every live projectile.
    ClearProjectiles,
    /// Freeze the simulation.
    Pause,
    /// Unfreeze the simulation.
    Resume,
}
