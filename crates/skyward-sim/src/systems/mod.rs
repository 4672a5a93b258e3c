//! Tick stages that operate on the aircraft and the simulation world.
//!
//! Stages are free functions over explicit state. They own nothing; the
//! engine holds all state and calls them in a fixed order.

pub mod collision;
pub mod controls;
pub mod forces;
pub mod ground;
pub mod integrator;
pub mod projectiles;
pub mod respawn;
pub mod snapshot;
pub mod world_motion;
