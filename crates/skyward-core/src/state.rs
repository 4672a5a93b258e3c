//! Read-only views of the simulation for rendering, HUD, and camera collaborators.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::SimTime;

/// Aircraft pose as seen by the renderer and camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftState {
    pub position: DVec3,
    pub orientation: DQuat,
    pub velocity: DVec3,
    pub on_ground: bool,
}

/// Cockpit instrument values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HudReadout {
    pub airspeed_knots: f64,
    pub altitude_feet: f64,
    /// Radians, nose up positive.
    pub pitch: f64,
    /// Radians, Euler-Z of the orientation.
    pub roll: f64,
    /// Radians, Euler-Y of the orientation.
    pub heading: f64,
    /// Lever position in [0, 1].
    pub throttle: f64,
}

/// A live projectile for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Seconds since it was fired.
    pub age_secs: f64,
}

/// Complete visible state after a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub reset_phase: ResetPhase,
    pub aircraft: AircraftState,
    pub thrust: f64,
    pub lift: f64,
    pub drag: f64,
    pub braking: bool,
    pub hud: HudReadout,
    pub projectiles: Vec<ProjectileView>,
    pub world_object_count: usize,
}
