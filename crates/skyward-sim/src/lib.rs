//! Flight simulation core for SKYWARD.
//!
//! Owns the aircraft kinematics and a hecs world of obstacles and projectiles,
//! steps them once per frame, and reports what happened as `SimulationEvents`.

pub mod engine;
pub mod kinematics;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use kinematics::KinematicState;
pub use skyward_core as core;

#[cfg(test)]
mod tests;
