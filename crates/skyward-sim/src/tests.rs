//! Engine-level tests: tick ordering, collision and respawn, weapons, and commands.

use approx::assert_relative_eq;
use glam::DVec3;

use skyward_core::commands::{ControlInput, SimCommand, ThrottleInput};
use skyward_core::config::PhysicsTuning;
use skyward_core::constants::*;
use skyward_core::enums::*;
use skyward_core::error::SimError;
use skyward_core::types::{Aabb, ObjectMotion, WorldObjectDesc};

use crate::engine::{SimConfig, SimulationEngine};
use crate::kinematics::KinematicState;
use crate::systems::{forces, ground};

const DT: f64 = 1.0 / 60.0;

fn block(kind: ObjectKind, center: DVec3, half: f64) -> WorldObjectDesc {
    WorldObjectDesc::fixed(kind, Aabb::from_center_half_extents(center, DVec3::splat(half)))
}

fn airborne_engine(position: DVec3) -> SimulationEngine {
    let mut engine = SimulationEngine::default();
    let aircraft = engine.kinematics_mut();
    aircraft.position = position;
    aircraft.on_ground = false;
    engine
}

fn trigger() -> ControlInput {
    ControlInput {
        fire: true,
        ..Default::default()
    }
}

// ---- Flight dynamics ----

#[test]
fn test_orientation_stays_normalized() {
    let mut engine = airborne_engine(DVec3::new(0.0, 500.0, 0.0));

    for i in 0..3000 {
        let t = i as f64 * DT;
        let input = ControlInput {
            pitch: (t * 0.7).sin(),
            roll: (t * 1.3).cos(),
            yaw: (t * 0.4).sin() * 0.5,
            throttle: ThrottleInput::Set(1.0),
            ..Default::default()
        };
        engine.advance(DT, &input);

        let length = engine.state().orientation.length();
        assert!(
            (length - 1.0).abs() < 1e-9,
            "orientation drifted to |q|={length} at tick {i}"
        );
    }
}

#[test]
fn test_stall_lift_collapses_to_zero() {
    let tuning = PhysicsTuning::default();
    let airspeed = tuning.stall_speed * 4.0;
    let steps = 20;

    let mut previous = f64::INFINITY;
    for k in 0..=steps {
        let aoa = tuning.stall_angle + (k as f64 / steps as f64) / 3.0;
        let mut state = KinematicState::spawn();
        state.on_ground = false;
        state.throttle = 0.5;
        state.velocity = DVec3::new(0.0, -aoa.sin(), aoa.cos()) * airspeed;

        forces::run(&mut state, &tuning);
        if k > 0 {
            assert!(state.lift < previous, "lift did not drop at aoa={aoa}");
        }
        previous = state.lift;
    }
    assert_relative_eq!(previous, 0.0, epsilon = 1e-4);

    let mut beyond = KinematicState::spawn();
    let aoa = tuning.stall_angle + 0.5;
    beyond.velocity = DVec3::new(0.0, -aoa.sin(), aoa.cos()) * airspeed;
    forces::run(&mut beyond, &tuning);
    assert_eq!(beyond.lift, 0.0);
}

#[test]
fn test_ground_clamp_idempotent_after_tick() {
    let mut engine = SimulationEngine::default();
    engine.kinematics_mut().velocity = DVec3::new(0.0, -20.0, 5.0);
    engine.advance(DT, &ControlInput::default());

    let tuning = PhysicsTuning::default();
    let mut state = engine.kinematics().clone();
    ground::run(&mut state, &tuning);
    let once = state.clone();
    ground::run(&mut state, &tuning);
    assert_eq!(state, once);
    assert_eq!(state.position.y, tuning.ground_level + tuning.ground_clearance);
}

#[test]
fn test_takeoff_roll_leaves_ground() {
    let mut engine = SimulationEngine::default();
    let full = ControlInput {
        throttle: ThrottleInput::Set(1.0),
        ..Default::default()
    };

    let mut lifted_off = false;
    let mut max_altitude: f64 = 0.0;
    for _ in 0..600 {
        let events = engine.advance(DT, &full);
        if events.ground_contact == Some(false) {
            lifted_off = true;
        }
        let state = engine.state();
        assert!(state.position.is_finite() && state.velocity.is_finite());
        max_altitude = max_altitude.max(state.position.y);
    }

    assert!(lifted_off, "aircraft never left the runway");
    assert!(max_altitude > 10.0, "peak altitude only {max_altitude}");
}

#[test]
fn test_brake_slows_ground_roll() {
    let rolling = |brake: bool| {
        let mut engine = SimulationEngine::default();
        engine.kinematics_mut().velocity = DVec3::new(0.0, 0.0, 5.0);
        let input = ControlInput {
            brake,
            ..Default::default()
        };
        for _ in 0..30 {
            engine.advance(DT, &input);
        }
        engine.state().velocity.z
    };

    assert!(rolling(true) < rolling(false));
}

#[test]
fn test_frame_step_clamped() {
    let mut engine = SimulationEngine::default();
    engine.advance(5.0, &ControlInput::default());
    assert_eq!(engine.time().elapsed_secs, MAX_FRAME_DT);

    engine.advance(f64::NAN, &ControlInput::default());
    engine.advance(-1.0, &ControlInput::default());
    assert_eq!(engine.time().elapsed_secs, MAX_FRAME_DT);
    assert_eq!(engine.time().tick, 3);
    assert_eq!(engine.state().position, DVec3::from_array(SPAWN_POSITION));
}

// ---- Collision and respawn ----

#[test]
fn test_collision_schedules_single_reset_then_respawns() {
    let crash_site = DVec3::new(0.0, 60.0, 100.0);
    let mut engine = airborne_engine(crash_site);
    engine.kinematics_mut().velocity = DVec3::new(0.0, 0.0, 30.0);
    let building = engine.register_world_object(block(ObjectKind::Building, crash_site, 20.0));

    let events = engine.advance(DT, &ControlInput::default());
    let collision = events.collision.expect("aircraft inside a building must crash");
    assert_eq!(collision.kind, ObjectKind::Building);
    assert_eq!(collision.object_id, building);
    assert_eq!(events.explosions.len(), 1);
    assert_eq!(events.explosions[0].scale, CRASH_EXPLOSION_SCALE);
    assert_eq!(events.explosions[0].duration_secs, CRASH_EXPLOSION_SECS);
    assert_eq!(engine.reset_phase(), ResetPhase::ResettingScheduled);
    assert_eq!(engine.pending_resets(), 1);

    let crash_position = engine.state().position;
    let mut respawned_after = None;
    for tick in 1..200 {
        let events = engine.advance(DT, &ControlInput::default());
        assert!(events.collision.is_none(), "second crash reported while reset pending");
        if events.respawned {
            assert_eq!(events.ground_contact, Some(true), "respawn touchdown not reported");
            respawned_after = Some(tick);
            break;
        }
        assert_eq!(engine.pending_resets(), 1);
        assert_ne!(engine.state().position, crash_position, "physics froze during the delay");
    }

    let ticks = respawned_after.expect("reset never fired");
    let waited = ticks as f64 * DT;
    assert!(waited >= RESET_DELAY_SECS - 1e-9 && waited < RESET_DELAY_SECS + 2.0 * DT);
    assert_eq!(*engine.kinematics(), KinematicState::spawn());
    assert_eq!(engine.reset_phase(), ResetPhase::Flying);
    assert_eq!(engine.pending_resets(), 0);
}

#[test]
fn test_first_overlap_wins() {
    let mut engine = airborne_engine(DVec3::new(0.0, 40.0, 0.0));
    let first = engine.register_world_object(block(
        ObjectKind::Mountain,
        DVec3::new(0.0, 40.0, 0.0),
        10.0,
    ));
    engine.register_world_object(block(ObjectKind::Building, DVec3::new(0.0, 40.0, 0.0), 10.0));

    let events = engine.advance(DT, &ControlInput::default());
    let collision = events.collision.unwrap();
    assert_eq!(collision.object_id, first);
    assert_eq!(collision.kind, ObjectKind::Mountain);
    assert_eq!(events.explosions.len(), 1);
    assert_eq!(engine.pending_resets(), 1);
}

#[test]
fn test_ground_sentinel_never_crashes() {
    let mut engine = SimulationEngine::default();
    engine.register_world_object(WorldObjectDesc::ground(GROUND_LEVEL));

    for _ in 0..120 {
        let events = engine.advance(DT, &ControlInput::default());
        assert!(events.collision.is_none());
    }
    assert_eq!(engine.reset_phase(), ResetPhase::Flying);
}

#[test]
fn test_drifting_aircraft_runs_into_player() {
    let mut engine = airborne_engine(DVec3::new(0.0, 300.0, 0.0));
    engine.kinematics_mut().velocity = DVec3::ZERO;
    let intruder = engine.register_world_object(WorldObjectDesc::drifting(
        ObjectKind::OtherAircraft,
        Aabb::from_center_half_extents(DVec3::new(60.0, 300.0, 0.0), DVec3::splat(6.0)),
        DVec3::new(-60.0, 0.0, 0.0),
    ));

    let mut hit = None;
    for _ in 0..120 {
        if let Some(collision) = engine.advance(DT, &ControlInput::default()).collision {
            hit = Some(collision);
            break;
        }
    }
    assert_eq!(hit.map(|c| c.object_id), Some(intruder));
}

// ---- Weapons ----

#[test]
fn test_fire_rate_gate() {
    let mut engine = airborne_engine(DVec3::new(0.0, 500.0, 0.0));

    let first = engine.advance(DT, &trigger());
    let second = engine.advance(DT, &trigger());
    assert!(first.shot_fired.is_some());
    assert!(second.shot_fired.is_none());
    assert_eq!(engine.projectile_count(), 1);

    // The cooldown ends 12 ticks after the first shot; accumulated time may land
    // the boundary on either side of tick 13, so allow two ticks for it.
    let mut fired = 0;
    for _ in 0..12 {
        if engine.advance(DT, &trigger()).shot_fired.is_some() {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
    assert_eq!(engine.projectile_count(), 2);
}

#[test]
fn test_projectile_expires_after_lifetime() {
    let mut engine = SimulationEngine::new(SimConfig {
        max_frame_dt: 0.25,
        ..Default::default()
    });
    let aircraft = engine.kinematics_mut();
    aircraft.position = DVec3::new(0.0, 1000.0, 0.0);
    aircraft.on_ground = false;

    // Fired at t = 0.25; dt is exact in binary so the boundary is exact too.
    engine.advance(0.25, &trigger());
    assert_eq!(engine.projectile_count(), 1);

    for tick in 2..=9 {
        engine.advance(0.25, &ControlInput::default());
        assert_eq!(engine.projectile_count(), 1, "expired early at tick {tick}");
    }
    assert_eq!(engine.time().elapsed_secs, 2.25);

    let events = engine.advance(0.25, &ControlInput::default());
    assert_eq!(engine.projectile_count(), 0);
    assert!(events.impacts.is_empty());
}

#[test]
fn test_impact_removes_other_aircraft() {
    let mut engine = airborne_engine(DVec3::new(0.0, 200.0, 0.0));
    let bystander = engine.register_world_object(block(
        ObjectKind::Mountain,
        DVec3::new(500.0, 0.0, 500.0),
        50.0,
    ));
    let target = engine.register_world_object(block(
        ObjectKind::OtherAircraft,
        DVec3::new(0.0, 200.0, 40.0),
        10.0,
    ));

    let fired = engine.advance(DT, &trigger());
    assert!(fired.shot_fired.is_some());
    assert!(fired.impacts.is_empty());

    let events = engine.advance(DT, &ControlInput::default());
    assert_eq!(events.impacts.len(), 1);
    let impact = events.impacts[0];
    assert_eq!(impact.kind, ObjectKind::OtherAircraft);
    assert_eq!(impact.object_id, target);
    assert_eq!(impact.size_hint, AIRCRAFT_IMPACT_SIZE);
    assert_eq!(events.explosions.len(), 1);
    assert_eq!(events.explosions[0].scale, AIRCRAFT_IMPACT_SIZE);

    assert_eq!(engine.world_object_ids(), vec![bystander]);
    assert!(engine.world_object(target).is_none());
    assert_eq!(engine.projectile_count(), 0);

    for _ in 0..10 {
        engine.advance(DT, &ControlInput::default());
        assert_eq!(engine.projectile_count(), 0);
        assert!(engine.snapshot().projectiles.is_empty());
    }
}

#[test]
fn test_rounds_pass_through_mountains() {
    let mut engine = airborne_engine(DVec3::new(0.0, 200.0, 0.0));
    engine.register_world_object(block(
        ObjectKind::Mountain,
        DVec3::new(0.0, 200.0, 40.0),
        10.0,
    ));

    engine.advance(DT, &trigger());
    let events = engine.advance(DT, &ControlInput::default());
    assert!(events.impacts.is_empty());
    assert_eq!(engine.world_object_count(), 1);
    assert_eq!(engine.projectile_count(), 1);
}

// ---- World feed ----

#[test]
fn test_update_dynamic_bounds() {
    let mut engine = SimulationEngine::default();
    let fixed = engine.register_world_object(block(ObjectKind::Building, DVec3::ZERO, 1.0));
    let [tracked]: [_; 1] = engine
        .register_world_objects([WorldObjectDesc {
            kind: ObjectKind::OtherAircraft,
            bounds: Aabb::from_center_half_extents(DVec3::splat(500.0), DVec3::ONE),
            motion: ObjectMotion::External,
        }])
        .try_into()
        .unwrap();

    let moved = Aabb::from_center_half_extents(DVec3::new(10.0, 20.0, 30.0), DVec3::ONE);
    assert_eq!(engine.update_dynamic_bounds(tracked, moved), Ok(()));
    assert_eq!(
        engine.world_object(tracked),
        Some((ObjectKind::OtherAircraft, moved))
    );

    assert_eq!(
        engine.update_dynamic_bounds(fixed, moved),
        Err(SimError::NotDynamic(fixed))
    );
    let missing = skyward_core::types::ObjectId(99);
    assert_eq!(
        engine.update_dynamic_bounds(missing, moved),
        Err(SimError::UnknownObject(missing))
    );
}

// ---- Commands ----

#[test]
fn test_pause_freezes_simulation() {
    let mut engine = airborne_engine(DVec3::new(0.0, 100.0, 0.0));
    engine.queue_command(SimCommand::Pause);
    let events = engine.advance(DT, &trigger());

    assert!(events.is_empty());
    assert_eq!(engine.phase(), SimPhase::Paused);
    assert_eq!(engine.time().tick, 0);
    assert_eq!(engine.state().position.y, 100.0);
    assert_eq!(engine.projectile_count(), 0);

    engine.queue_command(SimCommand::Resume);
    engine.advance(DT, &ControlInput::default());
    assert_eq!(engine.phase(), SimPhase::Running);
    assert_eq!(engine.time().tick, 1);
    assert!(engine.state().position.y < 100.0);
}

#[test]
fn test_reset_command_returns_to_spawn() {
    let mut engine = airborne_engine(DVec3::new(30.0, 250.0, -40.0));
    engine.kinematics_mut().throttle = 0.8;
    engine.queue_commands([SimCommand::ResetAircraft]);

    let events = engine.advance(0.0, &ControlInput::default());
    assert!(events.respawned);
    assert_eq!(engine.state(), KinematicState::spawn().view());
    assert_eq!(engine.kinematics().throttle, 0.0);
}

#[test]
fn test_reset_command_reports_touchdown() {
    let mut engine = airborne_engine(DVec3::new(0.0, 500.0, 0.0));
    let events = engine.advance(DT, &ControlInput::default());
    assert_eq!(events.ground_contact, None);

    engine.queue_command(SimCommand::ResetAircraft);
    let events = engine.advance(DT, &ControlInput::default());
    assert!(events.respawned);
    assert_eq!(events.ground_contact, Some(true));
    assert!(engine.state().on_ground);

    for _ in 0..5 {
        let events = engine.advance(DT, &ControlInput::default());
        assert_eq!(events.ground_contact, None);
    }
}

#[test]
fn test_reset_command_while_respawn_pending_keeps_one_timer() {
    let crash_site = DVec3::new(0.0, 60.0, 100.0);
    let mut engine = airborne_engine(crash_site);
    engine.register_world_object(block(ObjectKind::Building, crash_site, 20.0));

    assert!(engine.advance(DT, &ControlInput::default()).collision.is_some());
    assert_eq!(engine.pending_resets(), 1);

    engine.queue_command(SimCommand::ResetAircraft);
    let events = engine.advance(DT, &ControlInput::default());
    assert!(events.respawned);
    assert_eq!(engine.state(), KinematicState::spawn().view());
    assert_eq!(engine.reset_phase(), ResetPhase::ResettingScheduled);

    // Back into the building before the timer fires: no second timer.
    let aircraft = engine.kinematics_mut();
    aircraft.position = crash_site;
    aircraft.on_ground = false;
    let events = engine.advance(DT, &ControlInput::default());
    assert!(events.collision.is_none());
    assert_eq!(engine.pending_resets(), 1);

    let mut fired = false;
    for _ in 0..120 {
        if engine.advance(DT, &ControlInput::default()).respawned {
            fired = true;
            break;
        }
    }
    assert!(fired, "queued respawn never fired");
    assert_eq!(engine.reset_phase(), ResetPhase::Flying);
    assert_eq!(engine.pending_resets(), 0);

    let aircraft = engine.kinematics_mut();
    aircraft.position = crash_site;
    aircraft.on_ground = false;
    assert!(engine.advance(DT, &ControlInput::default()).collision.is_some());
    assert_eq!(engine.pending_resets(), 1);
}

#[test]
fn test_clear_projectiles_command() {
    let mut engine = airborne_engine(DVec3::new(0.0, 500.0, 0.0));
    engine.advance(DT, &trigger());
    assert_eq!(engine.projectile_count(), 1);

    engine.queue_command(SimCommand::ClearProjectiles);
    engine.advance(DT, &ControlInput::default());
    assert_eq!(engine.projectile_count(), 0);
}

// ---- Snapshot ----

#[test]
fn test_snapshot_serializes() {
    let mut engine = airborne_engine(DVec3::new(0.0, 100.0, 0.0));
    engine.register_world_object(block(ObjectKind::Building, DVec3::splat(400.0), 5.0));
    engine.advance(DT, &trigger());

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.world_object_count, 1);
    assert_eq!(snapshot.projectiles.len(), 1);
    assert_eq!(snapshot.time.tick, 1);

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: skyward_core::state::FlightSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.world_object_count, snapshot.world_object_count);
    assert_eq!(back.reset_phase, ResetPhase::Flying);
}
