//! Explicit Euler integration of orientation and translation.

use glam::{DQuat, DVec3, EulerRot};

use skyward_core::config::PhysicsTuning;
use skyward_core::constants::MIN_DIRECTION_SPEED;

use crate::kinematics::KinematicState;

/// Rotate, then translate, over `dt` seconds.
pub fn run(state: &mut KinematicState, tuning: &PhysicsTuning, dt: f64) {
    rotate(state, tuning.angular_damping, dt);
    translate(state, tuning, dt);
}

/// Compose this tick's rotation delta ahead of the current orientation and damp the rates.
pub fn rotate(state: &mut KinematicState, damping: f64, dt: f64) {
    let delta = state.angular_velocity * dt;
    let delta = DQuat::from_euler(EulerRot::XYZ, delta.x, delta.y, delta.z);

    state.orientation = (delta * state.orientation).normalize();
    state.angular_velocity *= damping;
}

/// Accumulate thrust, lift, drag, gravity, and rolling friction, then step velocity and position.
pub fn translate(state: &mut KinematicState, tuning: &PhysicsTuning, dt: f64) {
    let forward = state.forward();
    let up = state.up();

    let mut acceleration = DVec3::ZERO;
    acceleration += forward * state.thrust;
    acceleration += up * state.lift;

    if state.velocity.length() > MIN_DIRECTION_SPEED {
        acceleration -= state.velocity.normalize() * state.drag;
    }

    acceleration.y -= tuning.gravity;

    if state.on_ground {
        let horizontal = DVec3::new(state.velocity.x, 0.0, state.velocity.z);
        let speed = horizontal.length();
        if speed > MIN_DIRECTION_SPEED {
            acceleration -= horizontal.normalize() * speed * tuning.ground_friction;
        }
    }

    state.acceleration = acceleration;
    state.velocity += acceleration * dt;
    state.position += state.velocity * dt;
}
