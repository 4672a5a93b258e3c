//! Events emitted by the simulation for rendering, HUD, and audio feedback.
//!
//! Events are transient: they describe one tick and are never stored.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::ObjectKind;
use crate::types::ObjectId;

/// The aircraft hit a world object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub object_id: ObjectId,
    pub kind: ObjectKind,
    /// Aircraft position when the crash was detected.
    pub position: DVec3,
}

/// A projectile struck (and destroyed) a world object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactEvent {
    pub object_id: ObjectId,
    pub kind: ObjectKind,
    /// Projectile position at the moment of impact.
    pub position: DVec3,
    /// Suggested scale for the resulting effect.
    pub size_hint: f64,
}

/// Fire-and-forget request for a visual explosion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionSignal {
    pub position: DVec3,
    pub scale: f64,
    pub duration_secs: f64,
}

/// The gun fired this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotFired {
    pub muzzle: DVec3,
    pub velocity: DVec3,
}

/// Everything noteworthy that happened during one `advance`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvents {
    /// At most one crash per tick (first object in scan order wins).
    pub collision: Option<CollisionEvent>,
    pub impacts: Vec<ImpactEvent>,
    pub explosions: Vec<ExplosionSignal>,
    pub shot_fired: Option<ShotFired>,
    /// `Some(new_state)` when the on-ground flag toggled this tick.
    pub ground_contact: Option<bool>,
    /// The aircraft was put back at the spawn pose this tick.
    pub respawned: bool,
}

impl SimulationEvents {
    pub fn is_empty(&self) -> bool {
        self.collision.is_none()
            && self.impacts.is_empty()
            && self.explosions.is_empty()
            && self.shot_fired.is_none()
            && self.ground_contact.is_none()
            && !self.respawned
    }
}
