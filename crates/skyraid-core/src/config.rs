//! Simulation configuration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::AircraftType;
use crate::error::ConfigError;
use crate::tables::DataTables;

/// An enemy placed relative to the player's spawn position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: AircraftType,
    /// Horizontal offset from the spawn position.
    pub offset_x: f32,
    /// Distance up the level from the spawn position.
    pub distance: f32,
}

impl EnemySpawn {
    pub const fn new(kind: AircraftType, offset_x: f32, distance: f32) -> Self {
        Self {
            kind,
            offset_x,
            distance,
        }
    }
}

/// Configuration for starting a new world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same run.
    pub seed: u64,
    /// Size of the camera view in world units.
    pub view_size: Vec2,
    /// Total scrolling height of the level.
    pub world_height: f32,
    /// Camera scroll per second (negative scrolls up).
    pub scroll_speed: f32,
    /// Inset from the view edges the player is clamped to.
    pub border_distance: f32,
    /// How far above the view enemies are spawned and kept alive.
    pub battlefield_margin: f32,
    /// Draw entity bounding boxes as outlines.
    pub show_bounding_boxes: bool,
    /// Enemy placement for the level.
    pub spawns: Vec<EnemySpawn>,
    pub tables: DataTables,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            view_size: Vec2::new(1200.0, 800.0),
            world_height: 5000.0,
            scroll_speed: -50.0,
            border_distance: 40.0,
            battlefield_margin: 100.0,
            show_bounding_boxes: false,
            spawns: vec![
                EnemySpawn::new(AircraftType::Raptor, -250.0, 200.0),
                EnemySpawn::new(AircraftType::Raptor, 0.0, 200.0),
                EnemySpawn::new(AircraftType::Raptor, 250.0, 200.0),
                EnemySpawn::new(AircraftType::Avenger, -70.0, 400.0),
                EnemySpawn::new(AircraftType::Avenger, 70.0, 400.0),
            ],
            tables: DataTables::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.view_size.x <= 0.0 || self.view_size.y <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "view size must be positive, got {:?}",
                self.view_size
            )));
        }
        if self.world_height < self.view_size.y {
            return Err(ConfigError::Invalid(format!(
                "world height {} is smaller than the view",
                self.world_height
            )));
        }
        let min_side = self.view_size.x.min(self.view_size.y);
        if self.border_distance < 0.0 || 2.0 * self.border_distance > min_side {
            return Err(ConfigError::Invalid(format!(
                "border distance {} does not fit the view",
                self.border_distance
            )));
        }
        if self.battlefield_margin < 0.0 {
            return Err(ConfigError::Invalid("negative battlefield margin".into()));
        }
        if let Some(spawn) = self.spawns.iter().find(|s| s.kind.is_allied()) {
            return Err(ConfigError::Invalid(format!(
                "allied aircraft {:?} cannot be placed as an enemy",
                spawn.kind
            )));
        }
        self.tables.validate()
    }
}
