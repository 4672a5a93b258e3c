//! Ground contact: inelastic floor at terrain level plus clearance.

use skyward_core::config::PhysicsTuning;

use crate::kinematics::KinematicState;

/// Clamp the aircraft onto the floor and refresh `on_ground`.
///
/// Returns `Some(on_ground)` when the flag changed this call.
pub fn run(state: &mut KinematicState, tuning: &PhysicsTuning) -> Option<bool> {
    let floor = tuning.ground_level + tuning.ground_clearance;
    let was_on_ground = state.on_ground;

    // Resting exactly on the floor keeps the previous flag, so a repeat call is a no-op.
    if state.position.y < floor {
        state.position.y = floor;
        if state.velocity.y < 0.0 {
            state.velocity.y = 0.0;
        }
        state.on_ground = true;
    } else if state.position.y > floor {
        state.on_ground = false;
    }

    (state.on_ground != was_on_ground).then_some(state.on_ground)
}
