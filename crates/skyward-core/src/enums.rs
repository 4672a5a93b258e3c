//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// What a world object represents. Drives collision and weapon rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Building,
    Mountain,
    OtherAircraft,
    /// Sentinel for the terrain plane. Never collides through the object scan;
    /// ground contact is resolved separately.
    Ground,
}

impl ObjectKind {
    /// Whether projectiles can strike and destroy this kind of object.
    pub fn is_shootable(self) -> bool {
        matches!(self, ObjectKind::Building | ObjectKind::OtherAircraft)
    }
}

/// Respawn state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetPhase {
    /// Normal flight; collisions are processed.
    #[default]
    Flying,
    /// A crash happened and the respawn timer is pending.
    ResettingScheduled,
}

/// Top-level simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}
