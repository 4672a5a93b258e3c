//! Collision engine: aircraft hull vs. world-object bounds.
//!
//! Box-vs-box only. Corners of a rotated hull are covered by the enclosing
//! world-aligned box, so near-miss reports are possible and accepted.

use glam::DVec3;
use hecs::{Entity, World};

use skyward_core::components::{Bounds, WorldObject};
use skyward_core::enums::ObjectKind;
use skyward_core::events::CollisionEvent;
use skyward_core::types::Aabb;

/// Scan objects in registration order and report the first one the hull touches.
///
/// The ground sentinel is skipped. Entities that no longer exist are ignored.
pub fn run(
    world: &World,
    object_order: &[Entity],
    hull: &Aabb,
    aircraft_position: DVec3,
) -> Option<CollisionEvent> {
    for &entity in object_order {
        let Ok(mut query) = world.query_one::<(&WorldObject, &Bounds)>(entity) else {
            continue;
        };
        let Some((object, bounds)) = query.get() else {
            continue;
        };
        if object.kind == ObjectKind::Ground {
            continue;
        }
        if hull.intersects(&bounds.0) {
            return Some(CollisionEvent {
                object_id: object.id,
                kind: object.kind,
                position: aircraft_position,
            });
        }
    }
    None
}
