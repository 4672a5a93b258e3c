//! Simulation constants and tuning defaults.
//!
//! Coordinate system: y = Up, +z = aircraft nose at identity orientation.
//! These values seed `FlightTuning::default()`; runtime code reads the tuning.

// --- Timing ---

/// Nominal frame rate of the external clock (Hz).
pub const FRAME_RATE: u32 = 60;

/// Nominal seconds per frame.
pub const NOMINAL_DT: f64 = 1.0 / FRAME_RATE as f64;

/// Largest frame delta fed to the integrator. Longer frames are clamped.
pub const MAX_FRAME_DT: f64 = 0.1;

// --- Environment ---

/// Gravitational acceleration (m/s²), along world -y.
pub const GRAVITY: f64 = 9.8;

/// Terrain height.
pub const GROUND_LEVEL: f64 = 0.0;

/// Distance from the aircraft origin to its wheels.
pub const GROUND_CLEARANCE: f64 = 1.5;

// --- Force model ---

pub const MAX_THRUST: f64 = 40.0;
pub const LIFT_COEFFICIENT: f64 = 0.2;
pub const DRAG_COEFFICIENT: f64 = 0.01;

/// Angle of attack (radians) above which lift starts collapsing.
pub const STALL_ANGLE: f64 = 0.3;

/// Lift coefficient loss per radian beyond the stall angle.
pub const STALL_FALLOFF: f64 = 3.0;

/// Airspeed below which the wing cannot sustain level flight (m/s).
pub const STALL_SPEED: f64 = 8.0;

/// Horizontal deceleration per m/s of ground speed while rolling.
pub const GROUND_FRICTION: f64 = 0.03;

/// Extra drag per m/s of airspeed while braking on the ground.
pub const BRAKE_FORCE: f64 = 0.2;

/// Airspeed below which angle of attack is treated as zero.
pub const AOA_MIN_AIRSPEED: f64 = 0.1;

/// Speed below which drag and friction directions are undefined.
pub const MIN_DIRECTION_SPEED: f64 = 0.01;

// --- Rotation ---

/// Per-tick multiplier on angular velocity (stick return to center).
pub const ANGULAR_DAMPING: f64 = 0.95;

pub const ROLL_RATE: f64 = 1.5;
pub const PITCH_RATE: f64 = 1.0;
pub const YAW_RATE: f64 = 0.8;

/// Lerp gain toward target rates when any axis is deflected past the deadband.
pub const CONTROL_RESPONSE_ACTIVE: f64 = 10.0;

/// Lerp gain toward target rates for small deflections.
pub const CONTROL_RESPONSE_IDLE: f64 = 5.0;

/// Axis magnitude separating the idle and active response gains.
pub const CONTROL_DEADBAND: f64 = 0.1;

/// Throttle change per second at full axis deflection.
pub const THROTTLE_RATE: f64 = 0.5;

// --- Aircraft hull (local axis-aligned box around the origin) ---

/// Wingtip to wingtip half-span, belly, and tail.
pub const HULL_MIN: [f64; 3] = [-3.5, -0.8, -2.5];

/// Opposite corner: wingtip, canopy top, propeller hub.
pub const HULL_MAX: [f64; 3] = [3.5, 1.2, 2.8];

// --- Spawn ---

/// Canonical spawn position (on the runway, wheels on the ground).
pub const SPAWN_POSITION: [f64; 3] = [0.0, GROUND_LEVEL + GROUND_CLEARANCE, 0.0];

// --- Gun ---

/// Minimum seconds between shots.
pub const FIRE_COOLDOWN_SECS: f64 = 0.2;

/// Muzzle speed along the aircraft forward axis (m/s).
pub const PROJECTILE_SPEED: f64 = 800.0;

/// Seconds a projectile lives without hitting anything.
pub const PROJECTILE_LIFETIME_SECS: f64 = 2.0;

/// Distance ahead of the aircraft origin where projectiles appear.
pub const MUZZLE_STANDOFF: f64 = 5.0;

// --- Effects ---

/// Explosion scale for an aircraft crash.
pub const CRASH_EXPLOSION_SCALE: f64 = 5.0;

/// Explosion duration for an aircraft crash (seconds).
pub const CRASH_EXPLOSION_SECS: f64 = 1.0;

/// Impact effect size for a projectile striking a building.
pub const BUILDING_IMPACT_SIZE: f64 = 0.5;

/// Impact effect size for a projectile striking another aircraft.
pub const AIRCRAFT_IMPACT_SIZE: f64 = 2.0;

/// Explosion duration for projectile impacts (seconds).
pub const IMPACT_EXPLOSION_SECS: f64 = 0.5;

// --- Respawn ---

/// Delay between a crash and the aircraft reappearing at the spawn pose.
pub const RESET_DELAY_SECS: f64 = 1.0;

// --- HUD ---

/// Meters per second to knots.
pub const MPS_TO_KNOTS: f64 = 1.94384;

/// Meters to feet.
pub const METERS_TO_FEET: f64 = 3.28084;
