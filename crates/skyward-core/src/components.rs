//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::ObjectKind;
use crate::types::{Aabb, ObjectId};

/// Identity of an externally populated world object.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
}

/// Current world-space bounding volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds(pub Aabb);

/// Marks an object whose bounds move and must be refreshed before each collision query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dynamic;

/// Constant drift applied to a dynamic object's bounds every tick (m/s).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Drift {
    pub velocity: DVec3,
}

/// A live gun round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub position: DVec3,
    /// Fixed at spawn.
    pub velocity: DVec3,
    /// Simulation time at which the round left the muzzle.
    pub spawn_time: f64,
}
