//! Missile guidance: point every guided projectile at the nearest enemy.
//!
//! Runs as two commands queued back to back. The first collects the
//! positions of live enemy aircraft, the second hands each allied missile
//! the direction to the closest of them. Missiles bend towards that
//! direction during their own update.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use skyraid_core::category::Category;

use crate::command::{Command, CommandQueue};
use crate::entities::{self, Aircraft, Projectile};

pub fn queue_commands(commands: &mut CommandQueue) {
    let enemies: Rc<RefCell<Vec<Vec2>>> = Rc::default();

    let collected = Rc::clone(&enemies);
    commands.push(Command::derived::<Aircraft>(
        Category::ENEMY_AIRCRAFT,
        move |mut node, _dt| {
            let id = node.id();
            let scene = node.scene();
            if !entities::is_destroyed(scene, id) {
                collected.borrow_mut().push(scene.world_position(id));
            }
        },
    ));

    commands.push(Command::derived::<Projectile>(
        Category::ALLIED_PROJECTILE,
        move |mut node, _dt| {
            if !node.get().is_guided() {
                return;
            }
            let id = node.id();
            let position = node.scene().world_position(id);
            let nearest = enemies.borrow().iter().copied().min_by(|a, b| {
                a.distance_squared(position)
                    .total_cmp(&b.distance_squared(position))
            });
            if let Some(target) = nearest {
                node.get().guide_towards(target - position);
            }
        },
    ));
}
