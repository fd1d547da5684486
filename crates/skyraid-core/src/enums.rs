//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Aircraft model. `Eagle` is flown by the player; the rest are enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AircraftType {
    Eagle,
    Raptor,
    Avenger,
}

impl AircraftType {
    pub const ALL: [AircraftType; 3] = [Self::Eagle, Self::Raptor, Self::Avenger];

    pub fn is_allied(self) -> bool {
        self == Self::Eagle
    }
}

/// Projectile model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectileType {
    AlliedBullet,
    EnemyBullet,
    Missile,
}

impl ProjectileType {
    pub const ALL: [ProjectileType; 3] = [Self::AlliedBullet, Self::EnemyBullet, Self::Missile];

    /// Guided projectiles home in on the nearest enemy every frame.
    pub fn is_guided(self) -> bool {
        self == Self::Missile
    }
}

/// Pickup dropped by destroyed enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PickupType {
    HealthRefill,
    MissileRefill,
    FireSpread,
    FireRate,
}

impl PickupType {
    pub const ALL: [PickupType; 4] = [
        Self::HealthRefill,
        Self::MissileRefill,
        Self::FireSpread,
        Self::FireRate,
    ];
}

/// Particle flavour. Each flavour has one particle system in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParticleType {
    Propellant,
    Smoke,
}

impl ParticleType {
    pub const ALL: [ParticleType; 2] = [Self::Propellant, Self::Smoke];
}

/// Named texture asset requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TextureId {
    Eagle,
    Raptor,
    Avenger,
    Bullet,
    Missile,
    HealthRefill,
    MissileRefill,
    FireSpread,
    FireRate,
    Landscape,
    FinishLine,
    Explosion,
    Particle,
}

impl TextureId {
    pub const ALL: [TextureId; 13] = [
        Self::Eagle,
        Self::Raptor,
        Self::Avenger,
        Self::Bullet,
        Self::Missile,
        Self::HealthRefill,
        Self::MissileRefill,
        Self::FireSpread,
        Self::FireRate,
        Self::Landscape,
        Self::FinishLine,
        Self::Explosion,
        Self::Particle,
    ];
}

/// Named font asset requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FontId {
    Main,
}

/// Top-level scene layers, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Background,
    LowerAir,
    UpperAir,
}

impl Layer {
    pub const COUNT: usize = 3;
    pub const ALL: [Layer; Self::COUNT] = [Self::Background, Self::LowerAir, Self::UpperAir];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Outcome of the current mission as seen by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStatus {
    #[default]
    Running,
    Success,
    Failure,
}
