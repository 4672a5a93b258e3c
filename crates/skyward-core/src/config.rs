//! Runtime tuning. Defaults come from `constants`; a JSON file may override any subset.

use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::Aabb;

/// Aerodynamic and ground-handling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub gravity: f64,
    pub max_thrust: f64,
    pub lift_coefficient: f64,
    pub drag_coefficient: f64,
    pub stall_angle: f64,
    pub stall_falloff: f64,
    pub stall_speed: f64,
    pub ground_friction: f64,
    pub brake_force: f64,
    pub ground_level: f64,
    pub ground_clearance: f64,
    pub angular_damping: f64,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_thrust: MAX_THRUST,
            lift_coefficient: LIFT_COEFFICIENT,
            drag_coefficient: DRAG_COEFFICIENT,
            stall_angle: STALL_ANGLE,
            stall_falloff: STALL_FALLOFF,
            stall_speed: STALL_SPEED,
            ground_friction: GROUND_FRICTION,
            brake_force: BRAKE_FORCE,
            ground_level: GROUND_LEVEL,
            ground_clearance: GROUND_CLEARANCE,
            angular_damping: ANGULAR_DAMPING,
        }
    }
}

/// Stick and throttle response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlTuning {
    pub roll_rate: f64,
    pub pitch_rate: f64,
    pub yaw_rate: f64,
    pub throttle_rate: f64,
    pub response_active: f64,
    pub response_idle: f64,
    pub deadband: f64,
}

impl Default for ControlTuning {
    fn default() -> Self {
        Self {
            roll_rate: ROLL_RATE,
            pitch_rate: PITCH_RATE,
            yaw_rate: YAW_RATE,
            throttle_rate: THROTTLE_RATE,
            response_active: CONTROL_RESPONSE_ACTIVE,
            response_idle: CONTROL_RESPONSE_IDLE,
            deadband: CONTROL_DEADBAND,
        }
    }
}

/// Gun and projectile parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GunTuning {
    pub cooldown_secs: f64,
    pub projectile_speed: f64,
    pub lifetime_secs: f64,
    pub muzzle_standoff: f64,
}

impl Default for GunTuning {
    fn default() -> Self {
        Self {
            cooldown_secs: FIRE_COOLDOWN_SECS,
            projectile_speed: PROJECTILE_SPEED,
            lifetime_secs: PROJECTILE_LIFETIME_SECS,
            muzzle_standoff: MUZZLE_STANDOFF,
        }
    }
}

/// Complete tuning for one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub physics: PhysicsTuning,
    pub controls: ControlTuning,
    pub gun: GunTuning,
    /// Seconds between a crash and the respawn.
    pub reset_delay_secs: f64,
    /// Aircraft hull in body coordinates.
    pub hull: Aabb,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            physics: PhysicsTuning::default(),
            controls: ControlTuning::default(),
            gun: GunTuning::default(),
            reset_delay_secs: RESET_DELAY_SECS,
            hull: Aabb::from_corners(DVec3::from_array(HULL_MIN), DVec3::from_array(HULL_MAX)),
        }
    }
}

impl FlightTuning {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: FlightTuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse, and validate a JSON tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values that would make the integrator misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        let c = &self.controls;
        let g = &self.gun;

        non_negative("physics.gravity", p.gravity)?;
        non_negative("physics.max_thrust", p.max_thrust)?;
        non_negative("physics.lift_coefficient", p.lift_coefficient)?;
        non_negative("physics.drag_coefficient", p.drag_coefficient)?;
        non_negative("physics.stall_angle", p.stall_angle)?;
        non_negative("physics.stall_falloff", p.stall_falloff)?;
        non_negative("physics.stall_speed", p.stall_speed)?;
        non_negative("physics.ground_friction", p.ground_friction)?;
        non_negative("physics.brake_force", p.brake_force)?;
        finite("physics.ground_level", p.ground_level)?;
        non_negative("physics.ground_clearance", p.ground_clearance)?;
        if !(0.0..=1.0).contains(&p.angular_damping) {
            return Err(ConfigError::InvalidParameter {
                name: "physics.angular_damping",
                value: p.angular_damping,
                reason: "must be within [0, 1]",
            });
        }

        non_negative("controls.roll_rate", c.roll_rate)?;
        non_negative("controls.pitch_rate", c.pitch_rate)?;
        non_negative("controls.yaw_rate", c.yaw_rate)?;
        non_negative("controls.throttle_rate", c.throttle_rate)?;
        non_negative("controls.response_active", c.response_active)?;
        non_negative("controls.response_idle", c.response_idle)?;
        non_negative("controls.deadband", c.deadband)?;

        non_negative("gun.cooldown_secs", g.cooldown_secs)?;
        positive("gun.projectile_speed", g.projectile_speed)?;
        positive("gun.lifetime_secs", g.lifetime_secs)?;
        non_negative("gun.muzzle_standoff", g.muzzle_standoff)?;

        non_negative("reset_delay_secs", self.reset_delay_secs)?;
        for value in self.hull.min.to_array().into_iter().chain(self.hull.max.to_array()) {
            finite("hull", value)?;
        }
        Ok(())
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must not be negative",
        });
    }
    Ok(())
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value <= 0.0 {
        return Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be positive",
        });
    }
    Ok(())
}
