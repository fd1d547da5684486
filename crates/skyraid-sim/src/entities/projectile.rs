//! Bullets and guided missiles.

use std::time::Duration;

use glam::Vec2;

use skyraid_core::category::Category;
use skyraid_core::constants::{MISSILE_APPROACH_RATE, MISSILE_EMITTER_OFFSET};
use skyraid_core::enums::{ParticleType, ProjectileType};
use skyraid_core::types::Transform;

use super::body::{self, Body};
use super::particles;
use super::sprite::Sprite;
use crate::scene::{NodeId, NodeKind, SceneGraph};
use crate::textures::Assets;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    kind: ProjectileType,
    damage: u32,
    speed: f32,
    target_direction: Vec2,
}

impl Projectile {
    pub fn kind(&self) -> ProjectileType {
        self.kind
    }

    pub fn is_guided(&self) -> bool {
        self.kind.is_guided()
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn max_speed(&self) -> f32 {
        self.speed
    }

    pub fn target_direction(&self) -> Vec2 {
        self.target_direction
    }

    /// Point a guided projectile at `direction`. Panics for unguided ones.
    pub fn guide_towards(&mut self, direction: Vec2) {
        assert!(self.is_guided(), "{:?} cannot be guided", self.kind);
        self.target_direction = direction.normalize_or_zero();
    }

    /// Bend `velocity` towards the target direction at the fixed approach
    /// rate, keeping the projectile at full speed.
    pub fn steer(&self, velocity: Vec2, dt: Duration) -> Vec2 {
        let blended = self.target_direction * MISSILE_APPROACH_RATE * dt.as_secs_f32() + velocity;
        blended.normalize_or_zero() * self.speed
    }
}

/// Build a detached projectile. Missiles get smoke and propellant trails.
pub fn spawn(
    scene: &mut SceneGraph,
    assets: &Assets,
    kind: ProjectileType,
    position: Vec2,
    velocity: Vec2,
) -> NodeId {
    let data = assets.tables.projectile(kind);
    let sprite = Sprite::new(assets.texture(data.texture)).centered();
    let projectile = Projectile {
        kind,
        damage: data.damage,
        speed: data.speed,
        target_direction: Vec2::ZERO,
    };
    let category = if kind == ProjectileType::EnemyBullet {
        Category::ENEMY_PROJECTILE
    } else {
        Category::ALLIED_PROJECTILE
    };

    let id = scene.spawn(
        category,
        NodeKind::Projectile,
        Transform::from_position(position),
        (Body::new(1).with_velocity(velocity), sprite, projectile),
    );

    if kind.is_guided() {
        let tail = Transform::from_position(Vec2::new(0.0, sprite.size().y * MISSILE_EMITTER_OFFSET));
        for particle in [ParticleType::Smoke, ParticleType::Propellant] {
            let emitter = particles::spawn_emitter(scene, particle, tail);
            scene.attach(id, emitter);
        }
    }
    id
}

pub(crate) fn update(scene: &mut SceneGraph, id: NodeId, dt: Duration) {
    let steered = match (scene.get::<Projectile>(id), scene.get::<Body>(id)) {
        (Some(projectile), Some(body)) if projectile.is_guided() => {
            Some(projectile.steer(body.velocity, dt))
        }
        _ => None,
    };

    if let Some(velocity) = steered {
        if let Some(body) = scene.get_mut::<Body>(id) {
            body.velocity = velocity;
        }
        let heading = velocity.y.atan2(velocity.x).to_degrees() + 90.0;
        scene.transform_mut(id).set_rotation(heading);
    }

    body::advance(scene, id, dt);
}

#[cfg(test)]
mod tests {
    use skyraid_core::resources::ResourceMap;
    use skyraid_core::tables::DataTables;

    use super::*;

    fn assets() -> Assets {
        Assets::load(&ResourceMap::headless(), DataTables::default()).unwrap()
    }

    #[test]
    fn missile_turns_towards_target() {
        let mut scene = SceneGraph::new();
        let missile = spawn(
            &mut scene,
            &assets(),
            ProjectileType::Missile,
            Vec2::ZERO,
            Vec2::new(0.0, -200.0),
        );
        scene.attach(scene.root(), missile);
        assert_eq!(scene.children(missile).len(), 2, "smoke and propellant emitters");

        scene
            .get_mut::<Projectile>(missile)
            .unwrap()
            .guide_towards(Vec2::new(1.0, 0.0));
        update(&mut scene, missile, Duration::from_millis(100));

        let velocity = scene.get::<Body>(missile).unwrap().velocity;
        assert!(velocity.x > 0.0, "missile bends right, got {velocity:?}");
        assert!((velocity.length() - 200.0).abs() < 1e-3, "speed is preserved");
        let rotation = scene.transform(missile).rotation;
        assert!(rotation > 0.0 && rotation < 90.0, "heading rotates clockwise, got {rotation}");
    }

    #[test]
    fn bullet_flies_straight() {
        let mut scene = SceneGraph::new();
        let bullet = spawn(
            &mut scene,
            &assets(),
            ProjectileType::EnemyBullet,
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 300.0),
        );
        update(&mut scene, bullet, Duration::from_millis(500));
        assert_eq!(scene.transform(bullet).position, Vec2::new(10.0, 160.0));
        assert_eq!(scene.category(bullet), Category::ENEMY_PROJECTILE);
    }

    #[test]
    #[should_panic(expected = "cannot be guided")]
    fn guiding_a_bullet_panics() {
        let mut scene = SceneGraph::new();
        let bullet = spawn(
            &mut scene,
            &assets(),
            ProjectileType::AlliedBullet,
            Vec2::ZERO,
            Vec2::ZERO,
        );
        scene
            .get_mut::<Projectile>(bullet)
            .unwrap()
            .guide_towards(Vec2::X);
    }
}
