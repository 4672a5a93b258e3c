//! Dynamic bounds refresh for drifting world objects.
//!
//! Runs before the collision scan so every query sees current bounds.

use hecs::World;

use skyward_core::components::{Bounds, Drift};

/// Translate the bounds of every drifting object by `velocity * dt`.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (bounds, drift)) in world.query_mut::<(&mut Bounds, &Drift)>() {
        bounds.0 = bounds.0.translated(drift.velocity * dt);
    }
}
