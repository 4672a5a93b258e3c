//! Demo world scatter: airport structures, buildings, mountains, and drifting traffic.
//!
//! Stands in for the scene builder. Placement is seeded so a run can be repeated.

use glam::DVec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use skyward_core::constants::GROUND_LEVEL;
use skyward_core::enums::ObjectKind;
use skyward_core::types::{Aabb, WorldObjectDesc};

/// How much to scatter and where.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Edge length of the square world (m).
    pub world_size: f64,
    pub building_count: usize,
    pub mountain_count: usize,
    pub plane_count: usize,
    /// Buildings keep at least this far from the runway (m).
    pub building_clearance: f64,
    pub mountain_clearance: f64,
    /// Top of the ground sentinel; match the tuning's ground level.
    pub ground_level: f64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            world_size: 10_000.0,
            building_count: 100,
            mountain_count: 20,
            plane_count: 5,
            building_clearance: 300.0,
            mountain_clearance: 500.0,
            ground_level: GROUND_LEVEL,
        }
    }
}

/// Build the registration list. The ground sentinel always comes first.
pub fn populate(seed: u64, settings: &WorldSettings) -> Vec<WorldObjectDesc> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut objects = vec![WorldObjectDesc::ground(settings.ground_level)];

    objects.extend(airport());

    let span = settings.world_size / 2.0 - 500.0;
    for _ in 0..settings.building_count {
        let (x, z) = scatter_point(&mut rng, span, settings.building_clearance);
        let width: f64 = rng.gen_range(20.0..50.0);
        let height: f64 = rng.gen_range(20.0..120.0);
        let depth: f64 = rng.gen_range(20.0..50.0);
        objects.push(WorldObjectDesc::fixed(
            ObjectKind::Building,
            Aabb::from_corners(
                DVec3::new(x - width / 2.0, 0.0, z - depth / 2.0),
                DVec3::new(x + width / 2.0, height, z + depth / 2.0),
            ),
        ));
    }

    for _ in 0..settings.mountain_count {
        let (x, z) = scatter_point(&mut rng, span, settings.mountain_clearance);
        let radius: f64 = rng.gen_range(100.0..300.0);
        let height: f64 = rng.gen_range(200.0..700.0);
        objects.push(WorldObjectDesc::fixed(
            ObjectKind::Mountain,
            Aabb::from_corners(
                DVec3::new(x - radius, 0.0, z - radius),
                DVec3::new(x + radius, height, z + radius),
            ),
        ));
    }

    let sky_span = settings.world_size / 2.0 - 1000.0;
    for _ in 0..settings.plane_count {
        let x: f64 = rng.gen_range(-0.5..0.5);
        let y: f64 = rng.gen_range(500.0..1500.0);
        let z: f64 = rng.gen_range(-0.5..0.5);
        let center = DVec3::new(x * sky_span, y, z * sky_span);
        let heading: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let climb: f64 = rng.gen_range(-0.05..0.05);
        let speed: f64 = rng.gen_range(1.0..3.0);
        let direction = DVec3::new(heading.sin(), climb, heading.cos()).normalize();
        objects.push(WorldObjectDesc::drifting(
            ObjectKind::OtherAircraft,
            Aabb::from_center_half_extents(center, DVec3::new(2.5, 0.6, 2.5)),
            direction * speed,
        ));
    }

    objects
}

/// Terminal, control tower, and hangars beside the runway.
fn airport() -> Vec<WorldObjectDesc> {
    let mut structures = vec![
        WorldObjectDesc::fixed(
            ObjectKind::Building,
            Aabb::from_center_half_extents(
                DVec3::new(-80.0, 7.5, 100.0),
                DVec3::new(50.0, 7.5, 20.0),
            ),
        ),
        WorldObjectDesc::fixed(
            ObjectKind::Building,
            Aabb::from_corners(DVec3::new(-115.0, 0.0, 35.0), DVec3::new(-85.0, 40.0, 65.0)),
        ),
    ];
    structures.extend((0..3).map(|i| {
        WorldObjectDesc::fixed(
            ObjectKind::Building,
            Aabb::from_center_half_extents(
                DVec3::new(-50.0 + i as f64 * 50.0, 7.5, -80.0),
                DVec3::new(20.0, 7.5, 15.0),
            ),
        )
    }));
    structures
}

/// Uniform point in the square `[-span/2, span/2]^2` outside `clearance` of the origin.
fn scatter_point(rng: &mut ChaCha8Rng, span: f64, clearance: f64) -> (f64, f64) {
    loop {
        let x: f64 = rng.gen_range(-0.5..0.5) * span;
        let z: f64 = rng.gen_range(-0.5..0.5) * span;
        if x.hypot(z) > clearance {
            return (x, z);
        }
    }
}
