//! Data tables: per-kind tuning for aircraft, projectiles, pickups and particles.
//!
//! Tables are plain serde data so a host can ship them as JSON. Every kind
//! enum variant must have an entry; `validate` enforces that once at load
//! time so lookups afterwards can index directly.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::error::ConfigError;
use crate::types::{Color, IntRect};

/// One leg of a scripted movement pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    /// Heading in degrees, relative to straight down the screen.
    pub angle: f32,
    /// Distance to travel before switching to the next leg.
    pub distance: f32,
}

impl Direction {
    pub const fn new(angle: f32, distance: f32) -> Self {
        Self { angle, distance }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftData {
    pub hitpoints: u32,
    pub speed: f32,
    pub texture: TextureId,
    /// Sub-region of the texture to show; the whole texture when absent.
    #[serde(default)]
    pub texture_rect: Option<IntRect>,
    /// Seconds between shots at fire rate level zero. Zero disables firing.
    pub fire_interval: f32,
    #[serde(default)]
    pub directions: Vec<Direction>,
    #[serde(default)]
    pub has_roll_animation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileData {
    pub damage: u32,
    pub speed: f32,
    pub texture: TextureId,
}

/// Effect applied to the aircraft that collects a pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PickupEffect {
    Repair { hitpoints: u32 },
    AddMissiles { count: u32 },
    IncreaseSpread,
    IncreaseFireRate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupData {
    pub texture: TextureId,
    pub effect: PickupEffect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleData {
    pub color: Color,
    /// Seconds a particle stays alive.
    pub lifetime: f32,
}

/// All per-kind tuning tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTables {
    pub aircraft: BTreeMap<AircraftType, AircraftData>,
    pub projectiles: BTreeMap<ProjectileType, ProjectileData>,
    pub pickups: BTreeMap<PickupType, PickupData>,
    pub particles: BTreeMap<ParticleType, ParticleData>,
}

impl DataTables {
    /// Check every kind has an entry and values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in AircraftType::ALL {
            let data = self
                .aircraft
                .get(&kind)
                .ok_or_else(|| ConfigError::Invalid(format!("missing aircraft entry {kind:?}")))?;
            if Duration::try_from_secs_f32(data.fire_interval).is_err() {
                return Err(ConfigError::Invalid(format!(
                    "fire interval {} for {kind:?} is not a valid duration",
                    data.fire_interval
                )));
            }
            if data.directions.iter().any(|d| d.distance <= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "movement leg with non-positive distance for {kind:?}"
                )));
            }
        }
        for kind in ProjectileType::ALL {
            if !self.projectiles.contains_key(&kind) {
                return Err(ConfigError::Invalid(format!(
                    "missing projectile entry {kind:?}"
                )));
            }
        }
        for kind in PickupType::ALL {
            if !self.pickups.contains_key(&kind) {
                return Err(ConfigError::Invalid(format!("missing pickup entry {kind:?}")));
            }
        }
        for kind in ParticleType::ALL {
            let data = self
                .particles
                .get(&kind)
                .ok_or_else(|| ConfigError::Invalid(format!("missing particle entry {kind:?}")))?;
            if data.lifetime <= 0.0 || Duration::try_from_secs_f32(data.lifetime).is_err() {
                return Err(ConfigError::Invalid(format!(
                    "particle lifetime {} for {kind:?} is not a valid duration",
                    data.lifetime
                )));
            }
        }
        Ok(())
    }

    pub fn aircraft(&self, kind: AircraftType) -> &AircraftData {
        &self.aircraft[&kind]
    }

    pub fn projectile(&self, kind: ProjectileType) -> &ProjectileData {
        &self.projectiles[&kind]
    }

    pub fn pickup(&self, kind: PickupType) -> &PickupData {
        &self.pickups[&kind]
    }

    pub fn particle(&self, kind: ParticleType) -> &ParticleData {
        &self.particles[&kind]
    }
}

impl Default for DataTables {
    fn default() -> Self {
        let mut aircraft = BTreeMap::new();
        aircraft.insert(
            AircraftType::Eagle,
            AircraftData {
                hitpoints: 100,
                speed: 200.0,
                texture: TextureId::Eagle,
                texture_rect: Some(crate::constants::ROLL_NONE),
                fire_interval: 1.0,
                directions: Vec::new(),
                has_roll_animation: true,
            },
        );
        aircraft.insert(
            AircraftType::Raptor,
            AircraftData {
                hitpoints: 20,
                speed: 80.0,
                texture: TextureId::Raptor,
                texture_rect: None,
                fire_interval: 0.0,
                directions: vec![
                    Direction::new(45.0, 80.0),
                    Direction::new(-45.0, 160.0),
                    Direction::new(45.0, 80.0),
                ],
                has_roll_animation: false,
            },
        );
        aircraft.insert(
            AircraftType::Avenger,
            AircraftData {
                hitpoints: 40,
                speed: 50.0,
                texture: TextureId::Avenger,
                texture_rect: None,
                fire_interval: 2.0,
                directions: vec![
                    Direction::new(45.0, 50.0),
                    Direction::new(0.0, 50.0),
                    Direction::new(-45.0, 100.0),
                    Direction::new(0.0, 50.0),
                    Direction::new(45.0, 50.0),
                ],
                has_roll_animation: false,
            },
        );

        let mut projectiles = BTreeMap::new();
        projectiles.insert(
            ProjectileType::AlliedBullet,
            ProjectileData {
                damage: 10,
                speed: 300.0,
                texture: TextureId::Bullet,
            },
        );
        projectiles.insert(
            ProjectileType::EnemyBullet,
            ProjectileData {
                damage: 10,
                speed: 300.0,
                texture: TextureId::Bullet,
            },
        );
        projectiles.insert(
            ProjectileType::Missile,
            ProjectileData {
                damage: 200,
                speed: 200.0,
                texture: TextureId::Missile,
            },
        );

        let mut pickups = BTreeMap::new();
        pickups.insert(
            PickupType::HealthRefill,
            PickupData {
                texture: TextureId::HealthRefill,
                effect: PickupEffect::Repair { hitpoints: 25 },
            },
        );
        pickups.insert(
            PickupType::MissileRefill,
            PickupData {
                texture: TextureId::MissileRefill,
                effect: PickupEffect::AddMissiles { count: 3 },
            },
        );
        pickups.insert(
            PickupType::FireSpread,
            PickupData {
                texture: TextureId::FireSpread,
                effect: PickupEffect::IncreaseSpread,
            },
        );
        pickups.insert(
            PickupType::FireRate,
            PickupData {
                texture: TextureId::FireRate,
                effect: PickupEffect::IncreaseFireRate,
            },
        );

        let mut particles = BTreeMap::new();
        particles.insert(
            ParticleType::Propellant,
            ParticleData {
                color: Color::rgb(255, 255, 50),
                lifetime: 0.6,
            },
        );
        particles.insert(
            ParticleType::Smoke,
            ParticleData {
                color: Color::rgb(50, 50, 50),
                lifetime: 4.0,
            },
        );

        Self {
            aircraft,
            projectiles,
            pickups,
            particles,
        }
    }
}
