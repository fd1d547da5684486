#[cfg(test)]
mod tests {
    use glam::{Affine2, Vec2};

    use crate::category::Category;
    use crate::config::SimConfig;
    use crate::enums::*;
    use crate::error::{ConfigError, ResourceError};
    use crate::events::AudioEvent;
    use crate::resources::{ResourceMap, ResourceProvider};
    use crate::tables::{DataTables, PickupEffect};
    use crate::types::{FloatRect, SimTime, Transform};

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_category_composites() {
        assert!(Category::AIRCRAFT.contains(Category::PLAYER_AIRCRAFT));
        assert!(Category::AIRCRAFT.contains(Category::ENEMY_AIRCRAFT));
        assert_eq!(
            Category::AIRCRAFT,
            Category::PLAYER_AIRCRAFT | Category::ENEMY_AIRCRAFT,
            "every aircraft is either the player or an enemy"
        );
        assert!(!Category::AIRCRAFT.intersects(Category::PICKUP));
        assert!(Category::PROJECTILE.intersects(Category::ALLIED_PROJECTILE));
        assert!(!Category::NONE.intersects(Category::all()));
    }

    #[test]
    fn test_transform_matrix_order() {
        let mut t = Transform::from_position(Vec2::new(10.0, 0.0)).with_rotation(90.0);
        t.scale = Vec2::splat(2.0);
        t.origin = Vec2::new(1.0, 0.0);

        // (2,0) - origin = (1,0), scaled to (2,0), rotated clockwise to (0,2), then translated.
        let p = t.matrix().transform_point2(Vec2::new(2.0, 0.0));
        assert!(approx(p, Vec2::new(10.0, 2.0)), "got {p:?}");
    }

    #[test]
    fn test_rotation_wraps() {
        let mut t = Transform::default().with_rotation(-90.0);
        assert_eq!(t.rotation, 270.0);
        t.rotate(180.0);
        assert_eq!(t.rotation, 90.0);
    }

    #[test]
    fn test_rect_intersects_is_strict() {
        let a = FloatRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&FloatRect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&FloatRect::new(10.0, 0.0, 5.0, 5.0)), "touching edges");
        assert!(!a.intersects(&FloatRect::new(2.0, 2.0, 0.0, 0.0)), "empty rect");
    }

    #[test]
    fn test_rect_contains_half_open() {
        let r = FloatRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::ZERO));
        assert!(r.contains(Vec2::new(9.9, 9.9)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
        assert!(!r.contains(Vec2::new(5.0, -0.1)));
    }

    #[test]
    fn test_rect_transformed_rotated() {
        let r = FloatRect::new(0.0, 0.0, 2.0, 4.0);
        let out = r.transformed(&Affine2::from_angle(90f32.to_radians()));
        assert!(approx(Vec2::new(out.left, out.top), Vec2::new(-4.0, 0.0)), "{out:?}");
        assert!(approx(out.size(), Vec2::new(4.0, 2.0)), "{out:?}");
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        time.advance(crate::constants::TIME_PER_FRAME);
        time.advance(crate::constants::TIME_PER_FRAME);
        assert_eq!(time.tick, 2);
        assert!((time.elapsed.as_secs_f32() - 2.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_tables_are_complete() {
        let tables = DataTables::default();
        tables.validate().unwrap();
        assert_eq!(tables.aircraft(AircraftType::Raptor).hitpoints, 20);
        assert_eq!(tables.aircraft(AircraftType::Avenger).directions.len(), 5);
        assert_eq!(tables.projectile(ProjectileType::Missile).damage, 200);
        assert_eq!(
            tables.pickup(PickupType::HealthRefill).effect,
            PickupEffect::Repair { hitpoints: 25 }
        );
    }

    #[test]
    fn test_tables_missing_entry_rejected() {
        let mut tables = DataTables::default();
        tables.projectiles.remove(&ProjectileType::EnemyBullet);
        match tables.validate() {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("EnemyBullet"), "{msg}"),
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn test_tables_reject_unrepresentable_durations() {
        let mut tables = DataTables::default();
        tables
            .aircraft
            .get_mut(&AircraftType::Eagle)
            .unwrap()
            .fire_interval = 1e20;
        match tables.validate() {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("Eagle"), "{msg}"),
            other => panic!("expected invalid config, got {other:?}"),
        }

        let mut tables = DataTables::default();
        tables
            .aircraft
            .get_mut(&AircraftType::Raptor)
            .unwrap()
            .fire_interval = -1.0;
        assert!(matches!(tables.validate(), Err(ConfigError::Invalid(_))));

        let mut tables = DataTables::default();
        tables
            .particles
            .get_mut(&ParticleType::Smoke)
            .unwrap()
            .lifetime = f32::INFINITY;
        assert!(matches!(tables.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_config_with_oversized_fire_interval_is_rejected() {
        let mut config = SimConfig::default();
        config
            .tables
            .aircraft
            .get_mut(&AircraftType::Eagle)
            .unwrap()
            .fire_interval = 1e20;
        let json = serde_json::to_string(&config).unwrap();
        assert!(matches!(SimConfig::from_json(&json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_tables_serde_roundtrip() {
        let tables = DataTables::default();
        let json = serde_json::to_string(&tables).unwrap();
        let back: DataTables = serde_json::from_str(&json).unwrap();
        assert_eq!(tables, back);
    }

    #[test]
    fn test_config_from_empty_json_is_default() {
        let config = SimConfig::from_json("{}").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_config_partial_override() {
        let config = SimConfig::from_json(r#"{ "seed": 7, "scroll_speed": -80.0 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.scroll_speed, -80.0);
        assert_eq!(config.world_height, 5000.0);
        assert_eq!(config.spawns.len(), 5);
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        assert!(matches!(
            SimConfig::from_json("{ seed: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_config_rejects_oversized_border() {
        let err = SimConfig::from_json(r#"{ "view_size": [100.0, 100.0], "world_height": 500.0, "border_distance": 60.0 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn test_config_rejects_allied_enemy_spawn() {
        let json = r#"{ "spawns": [ { "kind": "Eagle", "offset_x": 0.0, "distance": 100.0 } ] }"#;
        assert!(matches!(SimConfig::from_json(json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_headless_resources_cover_every_asset() {
        let resources = ResourceMap::headless();
        for id in TextureId::ALL {
            let handle = resources.texture(id).unwrap();
            assert_eq!(handle.id, id);
            assert!(handle.size.x > 0 && handle.size.y > 0);
        }
        assert!(resources.font(FontId::Main).is_ok());
    }

    #[test]
    fn test_missing_texture_reported() {
        let mut resources = ResourceMap::headless();
        resources.remove_texture(TextureId::Missile);
        let err = resources.texture(TextureId::Missile).unwrap_err();
        assert_eq!(err, ResourceError::MissingTexture(TextureId::Missile));
        assert_eq!(err.to_string(), "texture Missile is not loaded");
    }

    #[test]
    fn test_audio_event_serde() {
        let events = vec![
            AudioEvent::AlliedGunfire,
            AudioEvent::LaunchMissile,
            AudioEvent::Explosion { x: 1.0, y: 2.0 },
        ];
        for e in events {
            let json = serde_json::to_string(&e).unwrap();
            let back: AudioEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(e, back);
        }
    }

    #[test]
    fn test_layer_order() {
        let indices: Vec<usize> = Layer::ALL.iter().map(|l| l.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
