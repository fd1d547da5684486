//! Simulation constants and tuning parameters.
//!
//! Per-kind tuning (hit points, speeds, damage) lives in the data tables;
//! the values here are fixed across kinds.

use std::time::Duration;

use glam::Vec2;

use crate::types::IntRect;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Length of one fixed simulation step.
pub const TIME_PER_FRAME: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

// --- Player ---

/// Speed applied by a single movement command (units/s).
pub const PLAYER_SPEED: f32 = 200.0;

/// Missiles carried by a freshly built aircraft.
pub const INITIAL_MISSILE_AMMO: u32 = 10;

/// Upper bound for the fire rate upgrade level.
pub const MAX_FIRE_RATE_LEVEL: u32 = 10;

/// Upper bound for the fire spread upgrade level (number of bullet lanes).
pub const MAX_SPREAD_LEVEL: u32 = 3;

// --- Projectiles ---

/// How strongly a guided missile bends towards its target each second.
pub const MISSILE_APPROACH_RATE: f32 = 200.0;

/// Bullet spawn offset along the aircraft's facing, as a fraction of sprite height.
pub const PROJECTILE_Y_OFFSET: f32 = 0.5;

/// Horizontal lane offsets, as fractions of sprite width, per spread level.
pub const SPREAD_LANES: [&[f32]; 3] = [&[0.0], &[-0.33, 0.33], &[-0.5, 0.0, 0.5]];

// --- Pickups ---

/// One in this many destroyed enemies drops a pickup.
pub const PICKUP_DROP_ONE_IN: u32 = 3;

/// Slow downward drift of a dropped pickup.
pub const PICKUP_DRIFT: Vec2 = Vec2::new(0.0, 1.0);

// --- Particles ---

/// Particles emitted per second by an emitter node.
pub const EMISSION_RATE: f32 = 30.0;

/// Emitter offset at the tail of a missile, as a fraction of sprite height.
pub const MISSILE_EMITTER_OFFSET: f32 = 0.5;

// --- Explosion animation ---

pub const EXPLOSION_FRAME_SIZE: (i32, i32) = (256, 256);
pub const EXPLOSION_FRAME_COUNT: usize = 16;
pub const EXPLOSION_DURATION: Duration = Duration::from_secs(1);

// --- Roll animation (texture rects of the player sprite sheet) ---

pub const ROLL_NONE: IntRect = IntRect::new(0, 0, 48, 64);
pub const ROLL_LEFT: IntRect = IntRect::new(48, 0, 48, 64);
pub const ROLL_RIGHT: IntRect = IntRect::new(96, 0, 48, 64);

// --- Labels ---

pub const HEALTH_LABEL_OFFSET: Vec2 = Vec2::new(0.0, 50.0);
pub const MISSILE_LABEL_OFFSET: Vec2 = Vec2::new(0.0, 70.0);
pub const LABEL_CHARACTER_SIZE: u32 = 20;

// --- Layout ---

/// Enemies face down the screen.
pub const ENEMY_ROTATION: f32 = 180.0;
