//! Entity layer shared by aircraft, projectiles and pickups.

use std::time::Duration;

use glam::Vec2;

use crate::scene::{NodeId, SceneGraph};

/// Hit points and velocity. Zero hit points means destroyed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    hitpoints: u32,
    pub velocity: Vec2,
}

impl Body {
    pub fn new(hitpoints: u32) -> Self {
        Self {
            hitpoints,
            velocity: Vec2::ZERO,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn hitpoints(&self) -> u32 {
        self.hitpoints
    }

    /// Lose hit points, stopping at zero.
    pub fn damage(&mut self, amount: u32) {
        self.hitpoints = self.hitpoints.saturating_sub(amount);
    }

    pub fn repair(&mut self, amount: u32) {
        self.hitpoints = self.hitpoints.saturating_add(amount);
    }

    pub fn destroy(&mut self) {
        self.hitpoints = 0;
    }

    pub fn is_destroyed(&self) -> bool {
        self.hitpoints == 0
    }

    pub fn accelerate(&mut self, velocity: Vec2) {
        self.velocity += velocity;
    }
}

/// Move an entity along its velocity.
pub(crate) fn advance(scene: &mut SceneGraph, id: NodeId, dt: Duration) {
    let Some(velocity) = scene.get::<Body>(id).map(|body| body.velocity) else {
        return;
    };
    scene
        .transform_mut(id)
        .translate(velocity * dt.as_secs_f32());
}

pub(crate) fn damage(scene: &mut SceneGraph, id: NodeId, amount: u32) {
    if let Some(body) = scene.get_mut::<Body>(id) {
        body.damage(amount);
    }
}

pub(crate) fn destroy(scene: &mut SceneGraph, id: NodeId) {
    if let Some(body) = scene.get_mut::<Body>(id) {
        body.destroy();
    }
}

pub(crate) fn hitpoints(scene: &SceneGraph, id: NodeId) -> u32 {
    scene.get::<Body>(id).map_or(0, |body| body.hitpoints())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_floors_at_zero() {
        let mut body = Body::new(100);
        body.damage(150);
        assert_eq!(body.hitpoints(), 0);
        assert!(body.is_destroyed(), "zero hit points must mark the body destroyed");
    }

    #[test]
    fn repair_restores_hitpoints() {
        let mut body = Body::new(10);
        body.damage(5);
        body.repair(25);
        assert_eq!(body.hitpoints(), 30);
        assert!(!body.is_destroyed());
    }

    #[test]
    fn accelerate_accumulates() {
        let mut body = Body::new(1);
        body.accelerate(Vec2::new(-200.0, 0.0));
        body.accelerate(Vec2::new(0.0, 200.0));
        assert_eq!(body.velocity, Vec2::new(-200.0, 200.0));
    }
}
