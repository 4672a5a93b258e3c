//! Simulation engine: the flight core.
//!
//! `SimulationEngine` owns the aircraft's kinematic state, the hecs world of
//! obstacles and projectiles, and the deferred-action scheduler. It processes
//! queued commands, runs every tick stage in order, and produces
//! `SimulationEvents` and `FlightSnapshot`s. Completely headless, driven by
//! whatever frame clock calls `advance`.

use std::collections::VecDeque;

use hecs::{Entity, World};

use skyward_core::commands::{ControlInput, SimCommand};
use skyward_core::components::{Bounds, Dynamic, WorldObject};
use skyward_core::config::FlightTuning;
use skyward_core::constants::{CRASH_EXPLOSION_SCALE, CRASH_EXPLOSION_SECS, MAX_FRAME_DT};
use skyward_core::enums::{ObjectKind, ResetPhase, SimPhase};
use skyward_core::error::SimError;
use skyward_core::events::{ExplosionSignal, SimulationEvents};
use skyward_core::state::{AircraftState, FlightSnapshot};
use skyward_core::types::{Aabb, ObjectId, SimTime, WorldObjectDesc};

use crate::kinematics::KinematicState;
use crate::scheduler::{ScheduledAction, Scheduler};
use crate::systems;
use crate::systems::projectiles::GunState;
use crate::systems::respawn::ResetPolicy;
use crate::world_setup::ObjectRegistry;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub tuning: FlightTuning,
    /// Frame steps longer than this are clamped before integration.
    pub max_frame_dt: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tuning: FlightTuning::default(),
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

/// The simulation engine. Owns the aircraft, the ECS world, and all sim state.
pub struct SimulationEngine {
    world: World,
    objects: ObjectRegistry,
    aircraft: KinematicState,
    time: SimTime,
    phase: SimPhase,
    reset: ResetPolicy,
    scheduler: Scheduler,
    gun: GunState,
    tuning: FlightTuning,
    max_frame_dt: f64,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<Entity>,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl SimulationEngine {
    /// Create an engine with the aircraft at the spawn pose and an empty world.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            objects: ObjectRegistry::new(),
            aircraft: KinematicState::spawn(),
            time: SimTime::default(),
            phase: SimPhase::default(),
            reset: ResetPolicy::default(),
            scheduler: Scheduler::new(),
            gun: GunState::default(),
            tuning: config.tuning,
            max_frame_dt: config.max_frame_dt,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Step the simulation by one frame.
    ///
    /// `dt` is clamped to `[0, max_frame_dt]`; non-finite values count as zero.
    /// While paused only queued commands are processed.
    pub fn advance(&mut self, dt: f64, input: &ControlInput) -> SimulationEvents {
        let mut events = SimulationEvents::default();
        self.process_commands(&mut events);

        if self.phase == SimPhase::Paused {
            return events;
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.max_frame_dt)
        } else {
            0.0
        };
        self.time.advance(dt);
        self.run_systems(dt, input, &mut events);
        events
    }

    /// Aircraft pose for the renderer and camera.
    pub fn state(&self) -> AircraftState {
        self.aircraft.view()
    }

    /// Complete visible state, including HUD readout and live projectiles.
    pub fn snapshot(&self) -> FlightSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.reset.phase(),
            &self.aircraft,
            self.objects.len(),
        )
    }

    /// Register one world object at the end of the scan order.
    pub fn register_world_object(&mut self, desc: WorldObjectDesc) -> ObjectId {
        self.objects.register(&mut self.world, &desc)
    }

    /// Register objects in order. Returned ids match the input order.
    pub fn register_world_objects(
        &mut self,
        objects: impl IntoIterator<Item = WorldObjectDesc>,
    ) -> Vec<ObjectId> {
        let ids: Vec<ObjectId> = objects
            .into_iter()
            .map(|desc| self.objects.register(&mut self.world, &desc))
            .collect();
        tracing::debug!(count = ids.len(), total = self.objects.len(), "world objects registered");
        ids
    }

    /// Replace the bounds of an externally driven dynamic object.
    ///
    /// Call before `advance` so the next collision scan sees the new volume.
    pub fn update_dynamic_bounds(&mut self, id: ObjectId, bounds: Aabb) -> Result<(), SimError> {
        let Some(entity) = self.objects.entity(id) else {
            tracing::warn!(object = id.0, "bounds update for unknown object");
            return Err(SimError::UnknownObject(id));
        };
        if self.world.get::<&Dynamic>(entity).is_err() {
            tracing::warn!(object = id.0, "bounds update for static object");
            return Err(SimError::NotDynamic(id));
        }
        let mut current = self
            .world
            .get::<&mut Bounds>(entity)
            .map_err(|_| SimError::UnknownObject(id))?;
        current.0 = bounds;
        Ok(())
    }

    /// Live object ids in scan order.
    pub fn world_object_ids(&self) -> Vec<ObjectId> {
        self.objects.ids(&self.world)
    }

    /// Kind and current bounds of a live object.
    pub fn world_object(&self, id: ObjectId) -> Option<(ObjectKind, Aabb)> {
        let entity = self.objects.entity(id)?;
        let mut query = self.world.query_one::<(&WorldObject, &Bounds)>(entity).ok()?;
        let (object, bounds) = query.get()?;
        Some((object.kind, bounds.0))
    }

    pub fn world_object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn kinematics(&self) -> &KinematicState {
        &self.aircraft
    }

    /// The aircraft's world-space collision box this tick.
    pub fn aircraft_bounds(&self) -> Aabb {
        Aabb::from_oriented(
            self.tuning.hull,
            self.aircraft.orientation,
            self.aircraft.position,
        )
    }

    pub fn reset_phase(&self) -> ResetPhase {
        self.reset.phase()
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tuning(&self) -> &FlightTuning {
        &self.tuning
    }

    pub fn projectile_count(&self) -> usize {
        systems::projectiles::count(&self.world)
    }

    /// Respawn timers not yet fired.
    pub fn pending_resets(&self) -> usize {
        self.scheduler.pending()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access to the aircraft for positioning it in tests.
    #[cfg(test)]
    pub fn kinematics_mut(&mut self) -> &mut KinematicState {
        &mut self.aircraft
    }

    /// Process all queued commands.
    fn process_commands(&mut self, events: &mut SimulationEvents) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, events);
        }
    }

    fn handle_command(&mut self, command: SimCommand, events: &mut SimulationEvents) {
        match command {
            SimCommand::ResetAircraft => {
                let touched_down = self
                    .reset
                    .reset_on_request(&mut self.aircraft, self.scheduler.pending());
                if touched_down.is_some() {
                    events.ground_contact = touched_down;
                }
                events.respawned = true;
                tracing::info!(t = self.time.elapsed_secs, "aircraft reset on request");
            }
            SimCommand::ClearProjectiles => {
                let cleared = systems::projectiles::clear(&mut self.world, &mut self.despawn_buffer);
                tracing::debug!(cleared, "projectiles cleared");
            }
            SimCommand::Pause => {
                if self.phase == SimPhase::Running {
                    self.phase = SimPhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Running;
                }
            }
        }
    }

    /// Run all tick stages in order.
    fn run_systems(&mut self, dt: f64, input: &ControlInput, events: &mut SimulationEvents) {
        let now = self.time.elapsed_secs;

        // 1. Fold pilot input into throttle, brake, and rate targets
        systems::controls::run(&mut self.aircraft, input, &self.tuning.controls, dt);
        // 2. Force model
        systems::forces::run(&mut self.aircraft, &self.tuning.physics);
        // 3. Integrator
        systems::integrator::run(&mut self.aircraft, &self.tuning.physics, dt);
        // 4. Ground contact
        if let Some(on_ground) = systems::ground::run(&mut self.aircraft, &self.tuning.physics) {
            events.ground_contact = Some(on_ground);
        }
        // 5. Drifting object bounds
        systems::world_motion::run(&mut self.world, dt);
        // 6. Collision scan (suppressed while a respawn is pending)
        if self.reset.accepts_collisions() {
            self.detect_collision(now, events);
        }
        // 7. Gun
        if input.fire {
            events.shot_fired = systems::projectiles::fire(
                &mut self.world,
                &mut self.gun,
                &self.aircraft,
                &self.tuning.gun,
                now,
            );
        }
        // 8. Projectile advance, expiry, and hits
        systems::projectiles::run(
            &mut self.world,
            &mut self.objects,
            dt,
            now,
            self.tuning.gun.lifetime_secs,
            &mut self.despawn_buffer,
            events,
        );
        // 9. Deferred actions
        for action in self.scheduler.drain_due(now) {
            match action {
                ScheduledAction::ResetAircraft => {
                    if let Some(on_ground) = self.reset.respawn(&mut self.aircraft) {
                        events.ground_contact = Some(on_ground);
                    }
                    events.respawned = true;
                    tracing::info!(t = now, "aircraft respawned");
                }
            }
        }
    }

    fn detect_collision(&mut self, now: f64, events: &mut SimulationEvents) {
        let hull = self.aircraft_bounds();
        let Some(collision) =
            systems::collision::run(&self.world, self.objects.order(), &hull, self.aircraft.position)
        else {
            return;
        };

        tracing::info!(
            object = collision.object_id.0,
            kind = ?collision.kind,
            position = ?collision.position,
            t = now,
            "aircraft crashed"
        );
        events.explosions.push(ExplosionSignal {
            position: collision.position,
            scale: CRASH_EXPLOSION_SCALE,
            duration_secs: CRASH_EXPLOSION_SECS,
        });
        self.reset
            .on_collision(&mut self.scheduler, now, self.tuning.reset_delay_secs);
        events.collision = Some(collision);
    }
}
