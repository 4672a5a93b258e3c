//! World-object registration and the stable scan order.
//!
//! Objects arrive from the scene builder as `WorldObjectDesc`s and become
//! hecs entities. `ObjectRegistry` keeps registration order, which is the
//! order every collision and hit scan walks.

use std::collections::HashMap;

use hecs::{Entity, World};

use skyward_core::components::{Bounds, Drift, Dynamic, WorldObject};
use skyward_core::types::{ObjectId, ObjectMotion, WorldObjectDesc};

/// Spawn a world object entity with the component bundle its motion needs.
pub fn spawn_object(world: &mut World, id: ObjectId, desc: &WorldObjectDesc) -> Entity {
    let base = (
        WorldObject {
            id,
            kind: desc.kind,
        },
        Bounds(desc.bounds),
    );
    match desc.motion {
        ObjectMotion::Static => world.spawn(base),
        ObjectMotion::External => world.spawn((base.0, base.1, Dynamic)),
        ObjectMotion::Drifting(velocity) => {
            world.spawn((base.0, base.1, Dynamic, Drift { velocity }))
        }
    }
}

/// Registration-ordered index of live world objects.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    order: Vec<Entity>,
    index: HashMap<ObjectId, Entity>,
    next_id: u32,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `desc` and append it to the scan order.
    pub fn register(&mut self, world: &mut World, desc: &WorldObjectDesc) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        let entity = spawn_object(world, id, desc);
        self.order.push(entity);
        self.index.insert(id, entity);
        id
    }

    /// Despawn an object and drop it from the scan order.
    pub fn remove(&mut self, world: &mut World, id: ObjectId) -> bool {
        let Some(entity) = self.index.remove(&id) else {
            return false;
        };
        self.order.retain(|&e| e != entity);
        despawn(world, entity);
        true
    }

    pub fn entity(&self, id: ObjectId) -> Option<Entity> {
        self.index.get(&id).copied()
    }

    /// Entities in scan order.
    pub fn order(&self) -> &[Entity] {
        &self.order
    }

    /// Ids in scan order.
    pub fn ids(&self, world: &World) -> Vec<ObjectId> {
        self.order
            .iter()
            .filter_map(|&e| world.get::<&WorldObject>(e).ok().map(|object| object.id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Despawn `entity`, warning if it was already gone.
pub(crate) fn despawn(world: &mut World, entity: Entity) {
    if let Err(e) = world.despawn(entity) {
        tracing::warn!(?entity, error = %e, "despawn of missing entity");
    }
}
