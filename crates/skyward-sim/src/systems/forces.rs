//! Force model: thrust, lift, and drag magnitudes from the current state.
//!
//! Writes `thrust`, `lift`, and `drag` back onto the state. Directions are
//! applied later by the integrator.

use glam::DVec3;

use skyward_core::config::PhysicsTuning;
use skyward_core::constants::AOA_MIN_AIRSPEED;

use crate::kinematics::KinematicState;

/// Recompute force magnitudes for this tick.
pub fn run(state: &mut KinematicState, tuning: &PhysicsTuning) {
    let airspeed = state.airspeed();
    let aoa = angle_of_attack(state.velocity, state.forward());

    state.thrust = state.throttle * tuning.max_thrust;
    state.lift = airspeed * airspeed * lift_coefficient(aoa, tuning);
    state.drag = airspeed * airspeed * tuning.drag_coefficient;

    if state.on_ground && state.braking {
        state.drag += airspeed * tuning.brake_force;
    }
}

/// Angle between the velocity vector and the nose, in radians.
///
/// Zero when the aircraft is too slow for the velocity direction to mean anything.
pub fn angle_of_attack(velocity: DVec3, forward: DVec3) -> f64 {
    if velocity.length() <= AOA_MIN_AIRSPEED {
        return 0.0;
    }
    velocity.normalize().dot(forward).clamp(-1.0, 1.0).acos()
}

/// Lift coefficient with linear collapse beyond the stall angle.
pub fn lift_coefficient(angle_of_attack: f64, tuning: &PhysicsTuning) -> f64 {
    if angle_of_attack <= tuning.stall_angle {
        return tuning.lift_coefficient;
    }
    let retained = 1.0 - (angle_of_attack - tuning.stall_angle) * tuning.stall_falloff;
    tuning.lift_coefficient * retained.max(0.0)
}
