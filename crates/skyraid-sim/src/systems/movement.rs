//! Player movement bookkeeping around the command pass.
//!
//! The player's velocity is rebuilt every frame from movement commands, so
//! it is zeroed before the queue drains and normalised afterwards. After the
//! scene update the aircraft is pulled back inside the visible area.

use std::f32::consts::SQRT_2;

use skyraid_core::types::FloatRect;

use crate::entities::Body;
use crate::scene::{NodeId, SceneGraph};

pub fn reset_velocity(scene: &mut SceneGraph, player: NodeId) {
    if let Some(body) = scene.get_mut::<Body>(player) {
        body.velocity = glam::Vec2::ZERO;
    }
}

/// Keep diagonal movement as fast as movement along one axis.
pub fn adapt_velocity(scene: &mut SceneGraph, player: NodeId) {
    if let Some(body) = scene.get_mut::<Body>(player) {
        if body.velocity.x != 0.0 && body.velocity.y != 0.0 {
            body.velocity /= SQRT_2;
        }
    }
}

/// Clamp the player inside `view`, `border` units from every edge.
pub fn adapt_position(scene: &mut SceneGraph, player: NodeId, view: FloatRect, border: f32) {
    if !scene.contains(player) {
        return;
    }
    let transform = scene.transform_mut(player);
    let position = &mut transform.position;
    position.x = position
        .x
        .max(view.left + border)
        .min(view.right() - border);
    position.y = position
        .y
        .max(view.top + border)
        .min(view.bottom() - border);
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use skyraid_core::category::Category;
    use skyraid_core::types::Transform;

    use super::*;
    use crate::scene::NodeKind;

    fn player(scene: &mut SceneGraph, position: Vec2, velocity: Vec2) -> NodeId {
        scene.spawn(
            Category::PLAYER_AIRCRAFT,
            NodeKind::Aircraft,
            Transform::from_position(position),
            (Body::new(100).with_velocity(velocity),),
        )
    }

    #[test]
    fn diagonal_velocity_is_normalised() {
        let mut scene = SceneGraph::new();
        let id = player(&mut scene, Vec2::ZERO, Vec2::new(200.0, -200.0));
        adapt_velocity(&mut scene, id);
        let velocity = scene.get::<Body>(id).unwrap().velocity;
        assert!((velocity.length() - 200.0).abs() < 1e-3, "got {velocity:?}");
    }

    #[test]
    fn axis_velocity_is_untouched() {
        let mut scene = SceneGraph::new();
        let id = player(&mut scene, Vec2::ZERO, Vec2::new(200.0, 0.0));
        adapt_velocity(&mut scene, id);
        assert_eq!(scene.get::<Body>(id).unwrap().velocity, Vec2::new(200.0, 0.0));
    }

    #[test]
    fn position_clamps_to_view_border() {
        let mut scene = SceneGraph::new();
        let id = player(&mut scene, Vec2::new(-50.0, 900.0), Vec2::ZERO);
        let view = FloatRect::new(0.0, 200.0, 800.0, 600.0);
        adapt_position(&mut scene, id, view, 40.0);
        assert_eq!(scene.transform(id).position, Vec2::new(40.0, 760.0));
    }
}
