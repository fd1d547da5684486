//! Concrete node kinds and the per-kind hooks the scene graph calls.
//!
//! Each [`NodeKind`] maps to a set of components and to update, draw,
//! bounds and removal behaviour. The functions here dispatch on the kind
//! tag so the graph itself stays unaware of gameplay.

pub mod aircraft;
pub mod animation;
pub mod body;
pub mod particles;
pub mod pickup;
pub mod projectile;
pub mod sprite;

use std::rc::Rc;
use std::time::Duration;

use glam::Affine2;
use rand_chacha::ChaCha8Rng;

use skyraid_core::events::AudioEvent;
use skyraid_core::render::RenderTarget;
use skyraid_core::types::FloatRect;

pub use aircraft::Aircraft;
pub use animation::Animation;
pub use body::Body;
pub use particles::{Emitter, Particle, ParticleSystem};
pub use pickup::Pickup;
pub use projectile::Projectile;
pub use sprite::{Label, Sprite};

use crate::command::CommandQueue;
use crate::scene::{NodeId, NodeKind, SceneGraph};
use crate::textures::Assets;

/// Everything an update hook may touch besides the scene itself.
pub struct UpdateContext<'a> {
    /// Commands queued here run at the next dispatch pass.
    pub commands: &'a mut CommandQueue,
    pub rng: &'a mut ChaCha8Rng,
    pub audio: &'a mut Vec<AudioEvent>,
    pub assets: &'a Rc<Assets>,
}

pub(crate) fn update_current(
    scene: &mut SceneGraph,
    id: NodeId,
    dt: Duration,
    ctx: &mut UpdateContext<'_>,
) {
    match scene.kind(id) {
        NodeKind::Aircraft => aircraft::update(scene, id, dt, ctx),
        NodeKind::Projectile => projectile::update(scene, id, dt),
        NodeKind::Pickup => body::advance(scene, id, dt),
        NodeKind::Emitter => particles::update_emitter(scene, id, dt, ctx),
        NodeKind::ParticleSystem => particles::update_system(scene, id, dt),
        NodeKind::Plain | NodeKind::Sprite | NodeKind::Label => {}
    }
}

pub(crate) fn draw_current(
    scene: &SceneGraph,
    id: NodeId,
    transform: &Affine2,
    target: &mut dyn RenderTarget,
) {
    match scene.kind(id) {
        NodeKind::Aircraft => aircraft::draw(scene, id, transform, target),
        NodeKind::Sprite | NodeKind::Projectile | NodeKind::Pickup => {
            sprite::draw_sprite(scene, id, transform, target)
        }
        NodeKind::Label => sprite::draw_label(scene, id, transform, target),
        NodeKind::ParticleSystem => particles::draw_system(scene, id, target),
        NodeKind::Plain | NodeKind::Emitter => {}
    }
}

/// World-space bounding box of an entity node. Other kinds have none.
pub fn bounding_rect(scene: &SceneGraph, id: NodeId) -> Option<FloatRect> {
    if !scene.kind(id).is_entity() {
        return None;
    }
    let local = scene.get::<Sprite>(id)?.local_bounds();
    Some(local.transformed(&scene.world_transform(id)))
}

/// True for an entity whose hit points ran out.
pub fn is_destroyed(scene: &SceneGraph, id: NodeId) -> bool {
    scene.get::<Body>(id).is_some_and(|body| body.is_destroyed())
}

/// True when the node should be dropped at the next wreck sweep.
pub fn is_marked_for_removal(scene: &SceneGraph, id: NodeId) -> bool {
    match scene.kind(id) {
        NodeKind::Aircraft => aircraft::is_marked_for_removal(scene, id),
        NodeKind::Projectile | NodeKind::Pickup => is_destroyed(scene, id),
        _ => false,
    }
}

/// Destroy an entity and skip its death effects, so it is swept right away.
pub fn remove(scene: &mut SceneGraph, id: NodeId) {
    if let Some(body) = scene.get_mut::<Body>(id) {
        body.destroy();
    }
    if let Some(aircraft) = scene.get_mut::<Aircraft>(id) {
        aircraft.suppress_explosion();
    }
}
