//! Aircraft kinematic state: the single record mutated by every tick stage.
//!
//! Owned by `SimulationEngine` and reinitialized in place on respawn.

use glam::{DQuat, DVec3};

use skyward_core::constants::SPAWN_POSITION;
use skyward_core::state::AircraftState;

#[derive(Debug, Clone, PartialEq)]
pub struct KinematicState {
    pub position: DVec3,
    /// Unit quaternion; renormalized after every rotation step.
    pub orientation: DQuat,
    pub velocity: DVec3,
    pub acceleration: DVec3,
    /// Body rates (rad/s) around x (pitch), y (yaw), z (roll).
    pub angular_velocity: DVec3,
    /// Lever position in [0, 1].
    pub throttle: f64,

    // Recomputed by the force model each tick.
    pub lift: f64,
    pub drag: f64,
    pub thrust: f64,

    pub on_ground: bool,
    pub braking: bool,
}

impl Default for KinematicState {
    fn default() -> Self {
        Self::spawn()
    }
}

impl KinematicState {
    /// Canonical spawn pose: on the runway, level, stationary, engine idle.
    pub fn spawn() -> Self {
        Self {
            position: DVec3::from_array(SPAWN_POSITION),
            orientation: DQuat::IDENTITY,
            velocity: DVec3::ZERO,
            acceleration: DVec3::ZERO,
            angular_velocity: DVec3::ZERO,
            throttle: 0.0,
            lift: 0.0,
            drag: 0.0,
            thrust: 0.0,
            on_ground: true,
            braking: false,
        }
    }

    /// Reinitialize every field to the spawn pose.
    pub fn reset(&mut self) {
        *self = Self::spawn();
    }

    /// Nose direction in world space.
    pub fn forward(&self) -> DVec3 {
        self.orientation * DVec3::Z
    }

    /// Canopy direction in world space.
    pub fn up(&self) -> DVec3 {
        self.orientation * DVec3::Y
    }

    pub fn airspeed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn view(&self) -> AircraftState {
        AircraftState {
            position: self.position,
            orientation: self.orientation,
            velocity: self.velocity,
            on_ground: self.on_ground,
        }
    }
}
