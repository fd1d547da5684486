//! Particle systems and the emitters that feed them.
//!
//! One particle system per [`ParticleType`] lives in the lower air layer.
//! Emitters ride on other nodes (missile tails) and push particles into the
//! matching system at a fixed rate. Particle positions are world
//! coordinates, so systems ignore their own node transform when drawing.

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec2;

use skyraid_core::category::Category;
use skyraid_core::constants::EMISSION_RATE;
use skyraid_core::enums::ParticleType;
use skyraid_core::render::{RenderTarget, Vertex};
use skyraid_core::resources::TextureHandle;
use skyraid_core::tables::ParticleData;
use skyraid_core::types::{Color, Transform};

use super::UpdateContext;
use crate::command::Command;
use crate::scene::{NodeId, NodeKind, SceneGraph};
use crate::textures::Assets;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub color: Color,
    /// Time left to live.
    pub lifetime: Duration,
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    kind: ParticleType,
    texture: TextureHandle,
    color: Color,
    lifetime: Duration,
    particles: VecDeque<Particle>,
}

impl ParticleSystem {
    pub fn new(kind: ParticleType, data: &ParticleData, texture: TextureHandle) -> Self {
        Self {
            kind,
            texture,
            color: data.color,
            lifetime: Duration::from_secs_f32(data.lifetime),
            particles: VecDeque::new(),
        }
    }

    pub fn kind(&self) -> ParticleType {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn add_particle(&mut self, position: Vec2) {
        self.particles.push_back(Particle {
            position,
            color: self.color,
            lifetime: self.lifetime,
        });
    }

    /// Drop expired particles, then age the rest.
    ///
    /// Particles are appended in emission order with equal lifetimes, so the
    /// front of the queue always expires first.
    pub fn age(&mut self, dt: Duration) {
        while self
            .particles
            .front()
            .is_some_and(|particle| particle.lifetime.is_zero())
        {
            self.particles.pop_front();
        }
        for particle in &mut self.particles {
            particle.lifetime = particle.lifetime.saturating_sub(dt);
        }
    }

    /// One textured quad per particle, fading out over its lifetime.
    pub fn vertices(&self) -> Vec<Vertex> {
        let size = Vec2::new(self.texture.size.x as f32, self.texture.size.y as f32);
        let half = size / 2.0;
        let total = self.lifetime.as_secs_f32();

        let mut vertices = Vec::with_capacity(self.particles.len() * 4);
        for particle in &self.particles {
            let ratio = if total > 0.0 {
                particle.lifetime.as_secs_f32() / total
            } else {
                0.0
            };
            let color = particle
                .color
                .with_alpha((255.0 * ratio.clamp(0.0, 1.0)) as u8);
            let corners = [
                (Vec2::new(-half.x, -half.y), Vec2::ZERO),
                (Vec2::new(half.x, -half.y), Vec2::new(size.x, 0.0)),
                (Vec2::new(half.x, half.y), size),
                (Vec2::new(-half.x, half.y), Vec2::new(0.0, size.y)),
            ];
            for (offset, tex_coords) in corners {
                vertices.push(Vertex {
                    position: particle.position + offset,
                    tex_coords,
                    color,
                });
            }
        }
        vertices
    }
}

/// Feeds particles into the system of its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Emitter {
    kind: ParticleType,
    accumulated: Duration,
    system: Option<NodeId>,
}

impl Emitter {
    pub fn new(kind: ParticleType) -> Self {
        Self {
            kind,
            accumulated: Duration::ZERO,
            system: None,
        }
    }

    pub fn kind(&self) -> ParticleType {
        self.kind
    }

    /// The system this emitter feeds, once found.
    pub fn system(&self) -> Option<NodeId> {
        self.system
    }

    /// Number of particles due after `dt` more time has passed.
    fn due(&mut self, dt: Duration) -> usize {
        let interval = Duration::from_secs_f32(1.0 / EMISSION_RATE);
        self.accumulated += dt;
        let mut count = 0;
        while self.accumulated > interval {
            self.accumulated -= interval;
            count += 1;
        }
        count
    }
}

pub fn spawn_system(scene: &mut SceneGraph, assets: &Assets, kind: ParticleType) -> NodeId {
    let system = ParticleSystem::new(
        kind,
        assets.tables.particle(kind),
        assets.texture(skyraid_core::enums::TextureId::Particle),
    );
    scene.spawn(
        Category::PARTICLE_SYSTEM,
        NodeKind::ParticleSystem,
        Transform::default(),
        (system,),
    )
}

pub fn spawn_emitter(scene: &mut SceneGraph, kind: ParticleType, transform: Transform) -> NodeId {
    scene.spawn(
        Category::NONE,
        NodeKind::Emitter,
        transform,
        (Emitter::new(kind),),
    )
}

pub(crate) fn update_system(scene: &mut SceneGraph, id: NodeId, dt: Duration) {
    if let Some(system) = scene.get_mut::<ParticleSystem>(id) {
        system.age(dt);
    }
}

pub(crate) fn update_emitter(
    scene: &mut SceneGraph,
    id: NodeId,
    dt: Duration,
    ctx: &mut UpdateContext<'_>,
) {
    let Some((kind, system)) = scene
        .get::<Emitter>(id)
        .map(|emitter| (emitter.kind, emitter.system))
    else {
        return;
    };

    match system.filter(|&system| scene.contains(system)) {
        Some(system) => emit(scene, id, system, dt),
        None => ctx.commands.push(find_system_command(id, kind)),
    }
}

/// Looks up the particle system of `kind` and caches it on `emitter`.
fn find_system_command(emitter: NodeId, kind: ParticleType) -> Command {
    Command::derived::<ParticleSystem>(Category::PARTICLE_SYSTEM, move |mut node, _dt| {
        if node.get().kind() != kind {
            return;
        }
        let system = node.id();
        if let Some(emitter) = node.scene().get_mut::<Emitter>(emitter) {
            emitter.system = Some(system);
        }
    })
}

fn emit(scene: &mut SceneGraph, id: NodeId, system: NodeId, dt: Duration) {
    let position = scene.world_position(id);
    let Some(count) = scene.get_mut::<Emitter>(id).map(|emitter| emitter.due(dt)) else {
        return;
    };
    if let Some(system) = scene.get_mut::<ParticleSystem>(system) {
        for _ in 0..count {
            system.add_particle(position);
        }
    }
}

pub(crate) fn draw_system(scene: &SceneGraph, id: NodeId, target: &mut dyn RenderTarget) {
    let Some(system) = scene.get::<ParticleSystem>(id) else {
        return;
    };
    if system.is_empty() {
        return;
    }
    target.draw_vertices(system.texture, &system.vertices());
}

#[cfg(test)]
mod tests {
    use glam::UVec2;

    use skyraid_core::enums::TextureId;

    use super::*;

    fn smoke() -> ParticleSystem {
        let data = ParticleData {
            color: Color::rgb(50, 50, 50),
            lifetime: 0.5,
        };
        let texture = TextureHandle {
            id: TextureId::Particle,
            size: UVec2::new(6, 6),
        };
        ParticleSystem::new(ParticleType::Smoke, &data, texture)
    }

    #[test]
    fn expired_particles_leave_from_the_front() {
        let mut system = smoke();
        system.add_particle(Vec2::ZERO);
        system.age(Duration::from_millis(250));
        system.add_particle(Vec2::ONE);

        system.age(Duration::from_millis(250));
        assert_eq!(system.len(), 2, "the first particle hits zero but is culled next tick");

        system.age(Duration::from_millis(250));
        assert_eq!(system.len(), 1);
        assert_eq!(system.particles().next().unwrap().position, Vec2::ONE);
    }

    #[test]
    fn vertices_fade_with_age() {
        let mut system = smoke();
        system.add_particle(Vec2::new(10.0, 10.0));
        system.age(Duration::from_millis(250));

        let vertices = system.vertices();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[0].position, Vec2::new(7.0, 7.0));
        assert_eq!(vertices[2].tex_coords, Vec2::new(6.0, 6.0));
        assert_eq!(vertices[0].color.a, 127);
    }

    #[test]
    fn emitter_paces_particles() {
        let mut emitter = Emitter::new(ParticleType::Propellant);
        assert_eq!(emitter.due(Duration::from_millis(10)), 0);
        assert_eq!(emitter.due(Duration::from_millis(100)), 3, "30 particles per second");
    }
}
