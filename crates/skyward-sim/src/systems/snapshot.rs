//! Snapshot system: assembles a `FlightSnapshot` for the renderer, HUD, and camera.
//!
//! This system is read-only; it never modifies the world.

use glam::EulerRot;
use hecs::World;

use skyward_core::constants::{METERS_TO_FEET, MPS_TO_KNOTS};
use skyward_core::enums::{ResetPhase, SimPhase};
use skyward_core::state::{FlightSnapshot, HudReadout};
use skyward_core::types::SimTime;

use crate::kinematics::KinematicState;
use crate::systems::projectiles;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: SimPhase,
    reset_phase: ResetPhase,
    aircraft: &KinematicState,
    world_object_count: usize,
) -> FlightSnapshot {
    FlightSnapshot {
        time: *time,
        phase,
        reset_phase,
        aircraft: aircraft.view(),
        thrust: aircraft.thrust,
        lift: aircraft.lift,
        drag: aircraft.drag,
        braking: aircraft.braking,
        hud: build_hud(aircraft),
        projectiles: projectiles::views(world, time.elapsed_secs),
        world_object_count,
    }
}

/// Instrument values in cockpit units.
pub fn build_hud(aircraft: &KinematicState) -> HudReadout {
    let (x, y, z) = aircraft.orientation.to_euler(EulerRot::XYZ);
    HudReadout {
        airspeed_knots: aircraft.airspeed() * MPS_TO_KNOTS,
        altitude_feet: aircraft.position.y * METERS_TO_FEET,
        // Negative x-rotation raises the nose.
        pitch: -x,
        roll: z,
        heading: y,
        throttle: aircraft.throttle,
    }
}
