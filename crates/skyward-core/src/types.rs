//! Fundamental geometric and simulation types.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Stable handle for a registered world object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks stepped so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Axis-aligned bounding box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Build a box from any two opposite corners.
    pub fn from_corners(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// World-space bounds of a local box after rotating it and moving it to `position`.
    ///
    /// The result encloses all eight transformed corners, so a rotated body
    /// grows its bounds rather than shrinking them.
    pub fn from_oriented(local: Aabb, orientation: DQuat, position: DVec3) -> Self {
        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);
        for i in 0..8 {
            let corner = DVec3::new(
                if i & 1 == 0 { local.min.x } else { local.max.x },
                if i & 2 == 0 { local.min.y } else { local.max.y },
                if i & 4 == 0 { local.min.z } else { local.max.z },
            );
            let world = position + orientation * corner;
            min = min.min(world);
            max = max.max(world);
        }
        Self { min, max }
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Boxes sharing a face or edge count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Points on the boundary are contained.
    pub fn contains_point(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// How a registered object's bounds change over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum ObjectMotion {
    /// Bounds never change.
    #[default]
    Static,
    /// Owner pushes new bounds through `update_dynamic_bounds`.
    External,
    /// The simulation translates the bounds by this velocity each tick.
    Drifting(DVec3),
}

/// Registration record for a world object supplied by the scene builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldObjectDesc {
    pub kind: crate::enums::ObjectKind,
    pub bounds: Aabb,
    #[serde(default)]
    pub motion: ObjectMotion,
}

impl WorldObjectDesc {
    pub fn fixed(kind: crate::enums::ObjectKind, bounds: Aabb) -> Self {
        Self {
            kind,
            bounds,
            motion: ObjectMotion::Static,
        }
    }

    pub fn drifting(kind: crate::enums::ObjectKind, bounds: Aabb, velocity: DVec3) -> Self {
        Self {
            kind,
            bounds,
            motion: ObjectMotion::Drifting(velocity),
        }
    }

    /// The terrain sentinel. Its bounds are a thin slab whose top is `level`.
    pub fn ground(level: f64) -> Self {
        const EXTENT: f64 = 1.0e6;
        Self::fixed(
            crate::enums::ObjectKind::Ground,
            Aabb::from_corners(
                DVec3::new(-EXTENT, level - 1.0, -EXTENT),
                DVec3::new(EXTENT, level, EXTENT),
            ),
        )
    }
}
