//! Projectile subsystem: rate-limited firing, ballistic advance, expiry, and hit resolution.

use glam::DVec3;
use hecs::{Entity, World};

use skyward_core::components::{Bounds, Projectile, WorldObject};
use skyward_core::config::GunTuning;
use skyward_core::constants::{AIRCRAFT_IMPACT_SIZE, BUILDING_IMPACT_SIZE, IMPACT_EXPLOSION_SECS};
use skyward_core::enums::ObjectKind;
use skyward_core::events::{ExplosionSignal, ImpactEvent, ShotFired, SimulationEvents};
use skyward_core::state::ProjectileView;

use crate::kinematics::KinematicState;
use crate::world_setup::{despawn, ObjectRegistry};

/// Trigger bookkeeping for the cooldown gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GunState {
    /// Simulation time of the last successful shot. `None` until the first.
    pub last_fire: Option<f64>,
}

impl GunState {
    pub fn ready(&self, now: f64, cooldown: f64) -> bool {
        match self.last_fire {
            Some(last) => now - last >= cooldown,
            None => true,
        }
    }
}

/// Spawn a round ahead of the nose if the gun has cooled down.
///
/// A request during cooldown is silently ignored.
pub fn fire(
    world: &mut World,
    gun: &mut GunState,
    aircraft: &KinematicState,
    tuning: &GunTuning,
    now: f64,
) -> Option<ShotFired> {
    if !gun.ready(now, tuning.cooldown_secs) {
        return None;
    }

    let forward = aircraft.forward();
    let muzzle = aircraft.position + forward * tuning.muzzle_standoff;
    let velocity = forward * tuning.projectile_speed;

    world.spawn((Projectile {
        position: muzzle,
        velocity,
        spawn_time: now,
    },));
    gun.last_fire = Some(now);

    tracing::debug!(?muzzle, t = now, "gun fired");
    Some(ShotFired { muzzle, velocity })
}

/// Advance every round, expire old ones, and resolve hits against shootable objects.
///
/// Struck objects leave the registry immediately so a later round in the same
/// tick cannot hit them again. Rounds are collected first and despawned after
/// the scan, so removal never disturbs iteration.
pub fn run(
    world: &mut World,
    registry: &mut ObjectRegistry,
    dt: f64,
    now: f64,
    lifetime: f64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut SimulationEvents,
) {
    despawn_buffer.clear();

    let mut live: Vec<(Entity, DVec3)> = Vec::new();
    for (entity, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.position += projectile.velocity * dt;
        if now - projectile.spawn_time > lifetime {
            despawn_buffer.push(entity);
        } else {
            live.push((entity, projectile.position));
        }
    }

    if !despawn_buffer.is_empty() {
        tracing::debug!(count = despawn_buffer.len(), t = now, "projectiles expired");
    }

    for (projectile, point) in live {
        let Some(target) = find_target(world, registry.order(), point) else {
            continue;
        };

        let size_hint = impact_size(target.kind);
        registry.remove(world, target.id);
        despawn_buffer.push(projectile);

        tracing::info!(object = target.id.0, kind = ?target.kind, ?point, "projectile impact");
        events.impacts.push(ImpactEvent {
            object_id: target.id,
            kind: target.kind,
            position: point,
            size_hint,
        });
        events.explosions.push(ExplosionSignal {
            position: point,
            scale: size_hint,
            duration_secs: IMPACT_EXPLOSION_SECS,
        });
    }

    for entity in despawn_buffer.drain(..) {
        despawn(world, entity);
    }
}

/// First shootable object, in scan order, whose bounds contain `point`.
fn find_target(world: &World, order: &[Entity], point: DVec3) -> Option<WorldObject> {
    order.iter().find_map(|&entity| {
        let mut query = world.query_one::<(&WorldObject, &Bounds)>(entity).ok()?;
        let (object, bounds) = query.get()?;
        let hit = object.kind.is_shootable() && bounds.0.contains_point(point);
        hit.then_some(*object)
    })
}

fn impact_size(kind: ObjectKind) -> f64 {
    match kind {
        ObjectKind::OtherAircraft => AIRCRAFT_IMPACT_SIZE,
        _ => BUILDING_IMPACT_SIZE,
    }
}

/// Despawn every live round. Returns how many were removed.
pub fn clear(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&Projectile>().into_iter().map(|(e, _)| e));
    let count = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        despawn(world, entity);
    }
    count
}

pub fn count(world: &World) -> usize {
    world.query::<&Projectile>().iter().count()
}

/// Renderer views of every live round.
pub fn views(world: &World, now: f64) -> Vec<ProjectileView> {
    world
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| ProjectileView {
            position: p.position,
            velocity: p.velocity,
            age_secs: now - p.spawn_time,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyward_core::types::{Aabb, WorldObjectDesc};

    fn flying_at(position: DVec3) -> KinematicState {
        let mut aircraft = KinematicState::spawn();
        aircraft.position = position;
        aircraft.on_ground = false;
        aircraft
    }

    #[test]
    fn test_fire_gate() {
        let mut world = World::new();
        let mut gun = GunState::default();
        let tuning = GunTuning::default();
        let aircraft = flying_at(DVec3::new(0.0, 100.0, 0.0));

        assert!(fire(&mut world, &mut gun, &aircraft, &tuning, 0.0).is_some());
        assert!(fire(&mut world, &mut gun, &aircraft, &tuning, 0.1).is_none());
        assert!(fire(&mut world, &mut gun, &aircraft, &tuning, 0.19).is_none());
        assert_eq!(count(&world), 1);

        assert!(fire(&mut world, &mut gun, &aircraft, &tuning, 0.2).is_some());
        assert_eq!(count(&world), 2);
    }

    #[test]
    fn test_round_leaves_ahead_of_nose() {
        let mut world = World::new();
        let mut gun = GunState::default();
        let tuning = GunTuning::default();
        let aircraft = flying_at(DVec3::new(10.0, 100.0, 0.0));

        let shot = fire(&mut world, &mut gun, &aircraft, &tuning, 3.0).unwrap();
        assert_eq!(shot.muzzle, DVec3::new(10.0, 100.0, tuning.muzzle_standoff));
        assert_eq!(shot.velocity, DVec3::new(0.0, 0.0, tuning.projectile_speed));
    }

    #[test]
    fn test_lifetime_boundary() {
        let mut world = World::new();
        let mut registry = ObjectRegistry::new();
        let mut buffer = Vec::new();
        let mut gun = GunState::default();
        let tuning = GunTuning::default();
        let aircraft = flying_at(DVec3::new(0.0, 100.0, 0.0));
        fire(&mut world, &mut gun, &aircraft, &tuning, 0.0);

        let dt: f64 = 0.1;
        let mut now: f64 = 0.0;
        for _ in 0..20 {
            now += dt;
            let mut events = SimulationEvents::default();
            let clamped = now.min(tuning.lifetime_secs);
            run(&mut world, &mut registry, dt, clamped, tuning.lifetime_secs, &mut buffer, &mut events);
            assert_eq!(count(&world), 1, "expired early at t={clamped}");
        }

        let mut events = SimulationEvents::default();
        run(&mut world, &mut registry, 0.0, 2.0, tuning.lifetime_secs, &mut buffer, &mut events);
        assert_eq!(count(&world), 1, "exactly at the lifetime the round survives");

        run(&mut world, &mut registry, 0.001, 2.001, tuning.lifetime_secs, &mut buffer, &mut events);
        assert_eq!(count(&world), 0);
        assert!(events.impacts.is_empty());
    }

    #[test]
    fn test_hit_removes_object_and_round() {
        let mut world = World::new();
        let mut registry = ObjectRegistry::new();
        let mountain = registry.register(
            &mut world,
            &WorldObjectDesc::fixed(
                ObjectKind::Mountain,
                Aabb::from_center_half_extents(DVec3::new(0.0, 0.0, 50.0), DVec3::splat(20.0)),
            ),
        );
        let target = registry.register(
            &mut world,
            &WorldObjectDesc::fixed(
                ObjectKind::OtherAircraft,
                Aabb::from_center_half_extents(DVec3::new(0.0, 0.0, 50.0), DVec3::splat(3.0)),
            ),
        );
        world.spawn((Projectile {
            position: DVec3::new(0.0, 0.0, 40.0),
            velocity: DVec3::new(0.0, 0.0, 100.0),
            spawn_time: 0.0,
        },));

        let mut buffer = Vec::new();
        let mut events = SimulationEvents::default();
        run(&mut world, &mut registry, 0.1, 0.1, 2.0, &mut buffer, &mut events);

        assert_eq!(events.impacts.len(), 1);
        let impact = events.impacts[0];
        assert_eq!(impact.object_id, target);
        assert_eq!(impact.kind, ObjectKind::OtherAircraft);
        assert_eq!(impact.size_hint, AIRCRAFT_IMPACT_SIZE);
        assert_eq!(events.explosions.len(), 1);
        assert_eq!(events.explosions[0].duration_secs, IMPACT_EXPLOSION_SECS);

        assert_eq!(registry.ids(&world), vec![mountain]);
        assert_eq!(count(&world), 0);
    }

    #[test]
    fn test_two_rounds_one_target() {
        let mut world = World::new();
        let mut registry = ObjectRegistry::new();
        registry.register(
            &mut world,
            &WorldObjectDesc::fixed(
                ObjectKind::Building,
                Aabb::from_center_half_extents(DVec3::ZERO, DVec3::splat(5.0)),
            ),
        );
        for offset in [-1.0, 1.0] {
            world.spawn((Projectile {
                position: DVec3::new(offset, 0.0, 0.0),
                velocity: DVec3::ZERO,
                spawn_time: 0.0,
            },));
        }

        let mut buffer = Vec::new();
        let mut events = SimulationEvents::default();
        run(&mut world, &mut registry, 0.0, 0.0, 2.0, &mut buffer, &mut events);

        assert_eq!(events.impacts.len(), 1);
        assert_eq!(events.impacts[0].size_hint, BUILDING_IMPACT_SIZE);
        assert!(registry.is_empty());
        assert_eq!(count(&world), 1, "second round flies on");
    }

    #[test]
    fn test_clear_and_views() {
        let mut world = World::new();
        let mut gun = GunState::default();
        let tuning = GunTuning::default();
        let aircraft = flying_at(DVec3::new(0.0, 100.0, 0.0));
        fire(&mut world, &mut gun, &aircraft, &tuning, 1.0);

        let views = views(&world, 1.5);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].age_secs, 0.5);

        let mut buffer = Vec::new();
        assert_eq!(clear(&mut world, &mut buffer), 1);
        assert_eq!(count(&world), 0);
    }
}
