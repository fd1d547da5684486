//! Pickups dropped by destroyed enemies.

use skyraid_core::category::Category;
use skyraid_core::constants::PICKUP_DRIFT;
use skyraid_core::enums::PickupType;
use skyraid_core::tables::PickupEffect;
use skyraid_core::types::Transform;

use super::aircraft::Aircraft;
use super::body::Body;
use super::sprite::Sprite;
use crate::scene::{NodeId, NodeKind, SceneGraph};
use crate::textures::Assets;

/// Carries a one-shot effect for the aircraft that collects it.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    kind: PickupType,
    effect: Option<PickupEffect>,
}

impl Pickup {
    pub fn kind(&self) -> PickupType {
        self.kind
    }

    /// The effect, handed out at most once.
    pub fn take_effect(&mut self) -> Option<PickupEffect> {
        self.effect.take()
    }
}

pub fn spawn(
    scene: &mut SceneGraph,
    assets: &Assets,
    kind: PickupType,
    transform: Transform,
) -> NodeId {
    let data = assets.tables.pickup(kind);
    let pickup = Pickup {
        kind,
        effect: Some(data.effect),
    };
    scene.spawn(
        Category::PICKUP,
        NodeKind::Pickup,
        transform,
        (
            Body::new(1).with_velocity(PICKUP_DRIFT),
            Sprite::new(assets.texture(data.texture)).centered(),
            pickup,
        ),
    )
}

/// Apply `pickup`'s effect to `aircraft`. Returns false if it was already used.
pub fn apply(scene: &mut SceneGraph, pickup: NodeId, aircraft: NodeId) -> bool {
    let Some(effect) = scene
        .get_mut::<Pickup>(pickup)
        .and_then(|pickup| pickup.take_effect())
    else {
        return false;
    };

    match effect {
        PickupEffect::Repair { hitpoints } => {
            if let Some(body) = scene.get_mut::<Body>(aircraft) {
                body.repair(hitpoints);
            }
        }
        PickupEffect::AddMissiles { count } => {
            if let Some(target) = scene.get_mut::<Aircraft>(aircraft) {
                target.collect_missiles(count);
            }
        }
        PickupEffect::IncreaseSpread => {
            if let Some(target) = scene.get_mut::<Aircraft>(aircraft) {
                target.increase_spread();
            }
        }
        PickupEffect::IncreaseFireRate => {
            if let Some(target) = scene.get_mut::<Aircraft>(aircraft) {
                target.increase_fire_rate();
            }
        }
    }
    true
}
