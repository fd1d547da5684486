//! Enemy spawner: materialises spawn points as the battlefield reaches them.

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use skyraid_core::config::EnemySpawn;
use skyraid_core::constants::ENEMY_ROTATION;
use skyraid_core::enums::AircraftType;
use skyraid_core::types::Transform;

use crate::entities::aircraft;
use crate::scene::{NodeId, SceneGraph};
use crate::textures::Assets;

/// A future enemy at an absolute world position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub kind: AircraftType,
    pub x: f32,
    pub y: f32,
}

/// Place `spawns` relative to `origin`, sorted ascending by y so the
/// nearest point (largest y) sits at the back.
pub fn build_spawn_points(spawns: &[EnemySpawn], origin: Vec2) -> Vec<SpawnPoint> {
    let mut points: Vec<SpawnPoint> = spawns
        .iter()
        .map(|spawn| SpawnPoint {
            kind: spawn.kind,
            x: origin.x + spawn.offset_x,
            y: origin.y - spawn.distance,
        })
        .collect();
    points.sort_by(|a, b| a.y.total_cmp(&b.y));
    points
}

/// Spawn every pending point below `battlefield_top` into `layer`, nearest
/// first. Returns the number of enemies spawned.
pub fn run(
    scene: &mut SceneGraph,
    assets: &Assets,
    layer: NodeId,
    points: &mut Vec<SpawnPoint>,
    battlefield_top: f32,
) -> usize {
    let mut spawned = 0;
    while let Some(point) = points.last().copied() {
        if point.y <= battlefield_top {
            break;
        }
        points.pop();

        let transform =
            Transform::from_position(Vec2::new(point.x, point.y)).with_rotation(ENEMY_ROTATION);
        let enemy = aircraft::spawn(scene, assets, point.kind, transform);
        scene.attach(layer, enemy);
        debug!(
            "spawned {:?} at ({:.0}, {:.0}), {} points left",
            point.kind,
            point.x,
            point.y,
            points.len()
        );
        spawned += 1;
    }
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_points_sort_nearest_last() {
        let spawns = [
            EnemySpawn::new(AircraftType::Raptor, 0.0, 500.0),
            EnemySpawn::new(AircraftType::Avenger, -70.0, 100.0),
            EnemySpawn::new(AircraftType::Raptor, 70.0, 300.0),
        ];
        let points = build_spawn_points(&spawns, Vec2::new(400.0, 1000.0));
        let ys: Vec<f32> = points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![500.0, 700.0, 900.0]);
        assert_eq!(points[2].kind, AircraftType::Avenger);
        assert_eq!(points[2].x, 330.0);
    }
}
