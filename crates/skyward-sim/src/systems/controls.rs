//! Control folding: turns raw stick/throttle axes into throttle, brake, and body-rate targets.

use glam::DVec3;

use skyward_core::commands::{ControlInput, ThrottleInput};
use skyward_core::config::ControlTuning;

use crate::kinematics::KinematicState;

/// Apply one frame of pilot input to the kinematic state.
pub fn run(state: &mut KinematicState, input: &ControlInput, tuning: &ControlTuning, dt: f64) {
    let input = input.clamped();

    state.throttle = match input.throttle {
        ThrottleInput::Hold => state.throttle,
        ThrottleInput::Adjust(axis) => state.throttle + axis * tuning.throttle_rate * dt,
        ThrottleInput::Set(value) => value,
    }
    .clamp(0.0, 1.0);

    state.braking = input.brake;

    // Positive x-rate pitches the nose down, so stick-back maps to a negative rate.
    let target = DVec3::new(
        -input.pitch * tuning.pitch_rate,
        input.yaw * tuning.yaw_rate,
        -input.roll * tuning.roll_rate,
    );

    let deflected = input.pitch.abs() > tuning.deadband
        || input.roll.abs() > tuning.deadband
        || input.yaw.abs() > tuning.deadband;
    let gain = if deflected {
        tuning.response_active
    } else {
        tuning.response_idle
    };
    let factor = (dt * gain).clamp(0.0, 1.0);

    state.angular_velocity = state.angular_velocity.lerp(target, factor);
}
