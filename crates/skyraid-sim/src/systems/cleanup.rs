//! Cleanup system: retires entities that have left the battlefield.

use skyraid_core::category::Category;
use skyraid_core::types::FloatRect;

use crate::command::Command;
use crate::entities;

/// Remove every projectile and enemy aircraft whose bounds no longer touch
/// `battlefield`. Removed aircraft skip their explosion.
pub fn out_of_view_command(battlefield: FloatRect) -> Command {
    Command::new(
        Category::PROJECTILE | Category::ENEMY_AIRCRAFT,
        move |scene, id, _dt| {
            let outside = entities::bounding_rect(scene, id)
                .is_some_and(|bounds| !bounds.intersects(&battlefield));
            if outside {
                entities::remove(scene, id);
            }
        },
    )
}
