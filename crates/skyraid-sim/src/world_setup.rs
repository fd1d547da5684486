//! Initial scene layout for a new world.

use glam::Vec2;
use log::debug;

use skyraid_core::category::Category;
use skyraid_core::enums::{AircraftType, Layer, ParticleType, TextureId};
use skyraid_core::types::{FloatRect, IntRect, Transform};

use crate::entities::{aircraft, particles, sprite, Sprite};
use crate::scene::{NodeId, SceneGraph};
use crate::textures::Assets;

/// Handles the world keeps after building the scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneLayout {
    pub layers: [NodeId; Layer::COUNT],
    pub player: NodeId,
}

/// Build the layers, background, particle systems and the player's aircraft.
pub fn build_scene(
    scene: &mut SceneGraph,
    assets: &Assets,
    world_bounds: FloatRect,
    spawn_position: Vec2,
) -> SceneLayout {
    let root = scene.root();
    let layers = Layer::ALL.map(|layer| {
        let category = if layer == Layer::UpperAir {
            Category::AIR_SCENE_LAYER
        } else {
            Category::NONE
        };
        let node = scene.spawn_plain(category, Transform::default());
        scene.attach(root, node);
        node
    });
    let background = layers[Layer::Background.index()];

    // The landscape tiles across the whole level.
    let landscape = Sprite::new(assets.texture(TextureId::Landscape)).with_rect(IntRect::new(
        0,
        0,
        world_bounds.width as i32,
        world_bounds.height as i32,
    ));
    let landscape = sprite::spawn_sprite(
        scene,
        landscape,
        Transform::from_position(Vec2::new(world_bounds.left, world_bounds.top)),
    );
    scene.attach(background, landscape);

    // The finish line sits just above the top of the level.
    let finish = Sprite::new(assets.texture(TextureId::FinishLine));
    let finish_height = finish.size().y;
    let finish = sprite::spawn_sprite(
        scene,
        finish,
        Transform::from_position(Vec2::new(world_bounds.left, world_bounds.top - finish_height)),
    );
    scene.attach(background, finish);

    let lower_air = layers[Layer::LowerAir.index()];
    for kind in ParticleType::ALL {
        let system = particles::spawn_system(scene, assets, kind);
        scene.attach(lower_air, system);
    }

    let player = aircraft::spawn(
        scene,
        assets,
        AircraftType::Eagle,
        Transform::from_position(spawn_position),
    );
    scene.attach(layers[Layer::UpperAir.index()], player);

    debug!("scene built with {} nodes", scene.len());
    SceneLayout { layers, player }
}
