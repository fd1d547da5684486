//! Collision resolution: apply gameplay effects to every colliding pair.

use log::trace;

use skyraid_core::category::Category;
use skyraid_core::events::AudioEvent;

use crate::entities::{body, pickup, Projectile};
use crate::scene::{CollisionPair, NodeId, SceneGraph};

/// Resolve every pair the scene graph reports this frame.
/// Returns how many pairs had an effect.
pub fn run(scene: &mut SceneGraph, audio: &mut Vec<AudioEvent>) -> usize {
    let pairs = scene.collision_pairs();
    let resolved = pairs
        .iter()
        .filter(|pair| resolve(scene, pair, audio))
        .count();
    if !pairs.is_empty() {
        trace!("{} collision pairs, {resolved} resolved", pairs.len());
    }
    resolved
}

/// Order `pair` so its first node is tagged `first` and its second `second`.
pub fn matches_categories(
    scene: &SceneGraph,
    pair: &CollisionPair,
    first: Category,
    second: Category,
) -> Option<(NodeId, NodeId)> {
    let (a, b) = (pair.first(), pair.second());
    let (category_a, category_b) = (scene.category(a), scene.category(b));

    if category_a.intersects(first) && category_b.intersects(second) {
        Some((a, b))
    } else if category_b.intersects(first) && category_a.intersects(second) {
        Some((b, a))
    } else {
        None
    }
}

/// Apply the first rule that matches `pair`.
fn resolve(scene: &mut SceneGraph, pair: &CollisionPair, audio: &mut Vec<AudioEvent>) -> bool {
    if let Some((player, enemy)) =
        matches_categories(scene, pair, Category::PLAYER_AIRCRAFT, Category::ENEMY_AIRCRAFT)
    {
        let impact = body::hitpoints(scene, enemy);
        body::damage(scene, player, impact);
        body::destroy(scene, enemy);
        return true;
    }

    if let Some((player, pickup)) =
        matches_categories(scene, pair, Category::PLAYER_AIRCRAFT, Category::PICKUP)
    {
        if pickup::apply(scene, pickup, player) {
            audio.push(AudioEvent::CollectPickup);
        }
        body::destroy(scene, pickup);
        return true;
    }

    let hit = matches_categories(scene, pair, Category::ENEMY_AIRCRAFT, Category::ALLIED_PROJECTILE)
        .or_else(|| {
            matches_categories(scene, pair, Category::PLAYER_AIRCRAFT, Category::ENEMY_PROJECTILE)
        });
    if let Some((aircraft, projectile)) = hit {
        let damage = scene
            .get::<Projectile>(projectile)
            .map_or(0, |projectile| projectile.damage());
        body::damage(scene, aircraft, damage);
        body::destroy(scene, projectile);
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use skyraid_core::enums::{AircraftType, PickupType, ProjectileType};
    use skyraid_core::resources::ResourceMap;
    use skyraid_core::tables::DataTables;
    use skyraid_core::types::Transform;

    use super::*;
    use crate::entities::{aircraft, projectile, Aircraft, Body};
    use crate::textures::Assets;

    fn assets() -> Assets {
        Assets::load(&ResourceMap::headless(), DataTables::default()).unwrap()
    }

    fn place_aircraft(scene: &mut SceneGraph, assets: &Assets, kind: AircraftType) -> NodeId {
        let id = aircraft::spawn(scene, assets, kind, Transform::default());
        let root = scene.root();
        scene.attach(root, id);
        id
    }

    #[test]
    fn category_match_swaps_pair_order() {
        let assets = assets();
        let mut scene = SceneGraph::new();
        let player = place_aircraft(&mut scene, &assets, AircraftType::Eagle);
        let enemy = place_aircraft(&mut scene, &assets, AircraftType::Raptor);

        let pair = CollisionPair::new(enemy, player);
        let forward = matches_categories(
            &scene,
            &pair,
            Category::PLAYER_AIRCRAFT,
            Category::ENEMY_AIRCRAFT,
        );
        let backward = matches_categories(
            &scene,
            &pair,
            Category::ENEMY_AIRCRAFT,
            Category::PLAYER_AIRCRAFT,
        );
        assert_eq!(forward, Some((player, enemy)));
        assert_eq!(backward, Some((enemy, player)));
        assert_eq!(
            matches_categories(&scene, &pair, Category::PICKUP, Category::ENEMY_AIRCRAFT),
            None
        );
    }

    #[test]
    fn ramming_costs_the_enemy_hitpoints() {
        let assets = assets();
        let mut scene = SceneGraph::new();
        let player = place_aircraft(&mut scene, &assets, AircraftType::Eagle);
        let enemy = place_aircraft(&mut scene, &assets, AircraftType::Raptor);

        let mut audio = Vec::new();
        assert_eq!(run(&mut scene, &mut audio), 1);
        assert_eq!(body::hitpoints(&scene, player), 80);
        assert!(crate::entities::is_destroyed(&scene, enemy));
    }

    #[test]
    fn allied_bullet_hits_enemy_once() {
        let assets = assets();
        let mut scene = SceneGraph::new();
        let enemy = place_aircraft(&mut scene, &assets, AircraftType::Avenger);
        let bullet = projectile::spawn(
            &mut scene,
            &assets,
            ProjectileType::AlliedBullet,
            Vec2::ZERO,
            Vec2::new(0.0, -300.0),
        );
        let root = scene.root();
        scene.attach(root, bullet);

        let mut audio = Vec::new();
        assert_eq!(run(&mut scene, &mut audio), 1);
        assert_eq!(body::hitpoints(&scene, enemy), 30);
        assert!(crate::entities::is_destroyed(&scene, bullet));

        assert_eq!(run(&mut scene, &mut audio), 0, "a destroyed bullet no longer collides");
    }

    #[test]
    fn enemy_bullets_spare_enemies() {
        let assets = assets();
        let mut scene = SceneGraph::new();
        let enemy = place_aircraft(&mut scene, &assets, AircraftType::Avenger);
        let bullet = projectile::spawn(
            &mut scene,
            &assets,
            ProjectileType::EnemyBullet,
            Vec2::ZERO,
            Vec2::new(0.0, 300.0),
        );
        let root = scene.root();
        scene.attach(root, bullet);

        let mut audio = Vec::new();
        assert_eq!(run(&mut scene, &mut audio), 0);
        assert_eq!(scene.get::<Body>(enemy).unwrap().hitpoints(), 40);
    }

    #[test]
    fn pickup_upgrades_player() {
        let assets = assets();
        let mut scene = SceneGraph::new();
        let player = place_aircraft(&mut scene, &assets, AircraftType::Eagle);
        let pickup = pickup::spawn(&mut scene, &assets, PickupType::FireSpread, Transform::default());
        let root = scene.root();
        scene.attach(root, pickup);

        let mut audio = Vec::new();
        assert_eq!(run(&mut scene, &mut audio), 1);
        assert_eq!(scene.get::<Aircraft>(player).unwrap().spread_level(), 2);
        assert!(crate::entities::is_destroyed(&scene, pickup));
        assert_eq!(audio, vec![AudioEvent::CollectPickup]);
    }
}
