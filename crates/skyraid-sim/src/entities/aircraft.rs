//! Aircraft: the player's plane and the enemies.
//!
//! An aircraft is alive until its hit points run out, then plays its
//! explosion (possibly dropping a pickup) and becomes removable once the
//! explosion is over. A removed aircraft skips the explosion entirely.

use std::rc::Rc;
use std::time::Duration;

use glam::{Affine2, Vec2};
use log::{debug, warn};
use rand::Rng;

use skyraid_core::category::Category;
use skyraid_core::constants::*;
use skyraid_core::enums::{AircraftType, PickupType, ProjectileType, TextureId};
use skyraid_core::events::AudioEvent;
use skyraid_core::render::RenderTarget;
use skyraid_core::tables::Direction;
use skyraid_core::types::Transform;

use super::animation::Animation;
use super::body::{self, Body};
use super::sprite::{self, Label, Sprite};
use super::{pickup, projectile, UpdateContext};
use crate::command::Command;
use crate::scene::{NodeId, NodeKind, SceneGraph};
use crate::textures::Assets;

#[derive(Debug, Clone)]
pub struct Aircraft {
    kind: AircraftType,
    speed: f32,
    fire_interval: Duration,
    directions: Vec<Direction>,
    has_roll_animation: bool,

    travel_distance: f32,
    direction_index: usize,

    is_firing: bool,
    is_launching_missile: bool,
    fire_countdown: Duration,
    fire_rate_level: u32,
    spread_level: u32,
    missile_ammo: u32,

    explosion: Animation,
    show_explosion: bool,
    played_explosion_sound: bool,
    spawned_pickup: bool,

    health_label: NodeId,
    missile_label: Option<NodeId>,
}

/// Projectiles an aircraft asked for during one update.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Launch {
    bullets: bool,
    missile: bool,
}

impl Aircraft {
    pub fn kind(&self) -> AircraftType {
        self.kind
    }

    pub fn is_allied(&self) -> bool {
        self.kind.is_allied()
    }

    pub fn max_speed(&self) -> f32 {
        self.speed
    }

    /// Request a volley. Aircraft without a fire interval never shoot.
    pub fn fire(&mut self) {
        if !self.fire_interval.is_zero() {
            self.is_firing = true;
        }
    }

    pub fn launch_missile(&mut self) {
        self.is_launching_missile = true;
    }

    pub fn is_firing(&self) -> bool {
        self.is_firing
    }

    pub fn fire_countdown(&self) -> Duration {
        self.fire_countdown
    }

    pub fn fire_rate_level(&self) -> u32 {
        self.fire_rate_level
    }

    pub fn spread_level(&self) -> u32 {
        self.spread_level
    }

    pub fn missile_ammo(&self) -> u32 {
        self.missile_ammo
    }

    pub fn increase_fire_rate(&mut self) {
        self.fire_rate_level = (self.fire_rate_level + 1).min(MAX_FIRE_RATE_LEVEL);
    }

    pub fn increase_spread(&mut self) {
        self.spread_level = (self.spread_level + 1).min(MAX_SPREAD_LEVEL);
    }

    pub fn collect_missiles(&mut self, count: u32) {
        self.missile_ammo = self.missile_ammo.saturating_add(count);
    }

    pub fn direction_index(&self) -> usize {
        self.direction_index
    }

    pub fn travel_distance(&self) -> f32 {
        self.travel_distance
    }

    pub fn explosion(&self) -> &Animation {
        &self.explosion
    }

    pub fn shows_explosion(&self) -> bool {
        self.show_explosion
    }

    /// Skip the explosion so a destroyed aircraft is swept immediately.
    pub fn suppress_explosion(&mut self) {
        self.show_explosion = false;
    }

    /// Step along the movement pattern and return this frame's velocity.
    /// Aircraft without a pattern keep whatever velocity they have.
    fn next_pattern_velocity(&mut self, dt: Duration) -> Option<Vec2> {
        if self.directions.is_empty() {
            return None;
        }

        if self.travel_distance > self.directions[self.direction_index].distance {
            self.direction_index = (self.direction_index + 1) % self.directions.len();
            self.travel_distance = 0.0;
        }

        // Angles are measured from straight down the screen.
        let radians = (self.directions[self.direction_index].angle + 90.0).to_radians();
        let velocity = Vec2::new(radians.cos(), radians.sin()) * self.speed;
        self.travel_distance += self.speed * dt.as_secs_f32();
        Some(velocity)
    }

    /// Tick the fire cooldown and consume pending fire and launch requests.
    fn check_projectile_launch(&mut self, dt: Duration) -> Launch {
        if !self.is_allied() {
            self.fire();
        }

        let mut launch = Launch::default();
        if self.is_firing && self.fire_countdown.is_zero() {
            launch.bullets = true;
            self.is_firing = false;
            self.fire_countdown = self.fire_interval / (self.fire_rate_level + 1);
        } else if !self.fire_countdown.is_zero() {
            self.fire_countdown = self.fire_countdown.saturating_sub(dt);
        }

        if self.is_launching_missile {
            if self.missile_ammo > 0 {
                launch.missile = true;
                self.missile_ammo -= 1;
            }
            self.is_launching_missile = false;
        }
        launch
    }
}

/// Build a detached aircraft of `kind`, with its labels attached.
pub fn spawn(
    scene: &mut SceneGraph,
    assets: &Assets,
    kind: AircraftType,
    transform: Transform,
) -> NodeId {
    let data = assets.tables.aircraft(kind);
    let mut sprite = Sprite::new(assets.texture(data.texture)).centered();
    if let Some(rect) = data.texture_rect {
        sprite = sprite.with_rect(rect);
    }

    let health_label = sprite::spawn_label(
        scene,
        assets.font,
        Transform::from_position(HEALTH_LABEL_OFFSET),
    );
    let missile_label = kind.is_allied().then(|| {
        sprite::spawn_label(
            scene,
            assets.font,
            Transform::from_position(MISSILE_LABEL_OFFSET),
        )
    });

    let aircraft = Aircraft {
        kind,
        speed: data.speed,
        fire_interval: Duration::from_secs_f32(data.fire_interval),
        directions: data.directions.clone(),
        has_roll_animation: data.has_roll_animation,
        travel_distance: 0.0,
        direction_index: 0,
        is_firing: false,
        is_launching_missile: false,
        fire_countdown: Duration::ZERO,
        fire_rate_level: 1,
        spread_level: 1,
        missile_ammo: INITIAL_MISSILE_AMMO,
        explosion: Animation::explosion(assets.texture(TextureId::Explosion)),
        show_explosion: true,
        played_explosion_sound: false,
        spawned_pickup: false,
        health_label,
        missile_label,
    };

    let category = if kind.is_allied() {
        Category::PLAYER_AIRCRAFT
    } else {
        Category::ENEMY_AIRCRAFT
    };
    let id = scene.spawn(
        category,
        NodeKind::Aircraft,
        transform,
        (Body::new(data.hitpoints), sprite, aircraft),
    );
    scene.attach(id, health_label);
    if let Some(label) = missile_label {
        scene.attach(id, label);
    }
    update_labels(scene, id);
    id
}

pub(crate) fn update(
    scene: &mut SceneGraph,
    id: NodeId,
    dt: Duration,
    ctx: &mut UpdateContext<'_>,
) {
    update_labels(scene, id);
    update_roll_animation(scene, id);

    if super::is_destroyed(scene, id) {
        update_wreck(scene, id, dt, ctx);
        return;
    }

    update_movement_pattern(scene, id, dt);
    body::advance(scene, id, dt);
    check_projectile_launch(scene, id, dt, ctx);
}

pub(crate) fn is_marked_for_removal(scene: &SceneGraph, id: NodeId) -> bool {
    super::is_destroyed(scene, id)
        && scene
            .get::<Aircraft>(id)
            .is_some_and(|aircraft| aircraft.explosion.is_finished() || !aircraft.show_explosion)
}

pub(crate) fn draw(
    scene: &SceneGraph,
    id: NodeId,
    transform: &Affine2,
    target: &mut dyn RenderTarget,
) {
    let Some(aircraft) = scene.get::<Aircraft>(id) else {
        return;
    };
    if super::is_destroyed(scene, id) {
        if aircraft.show_explosion && !aircraft.explosion.is_finished() {
            aircraft.explosion.sprite().draw(transform, target);
        }
    } else if let Some(sprite) = scene.get::<Sprite>(id) {
        sprite.draw(transform, target);
    }
}

fn update_movement_pattern(scene: &mut SceneGraph, id: NodeId, dt: Duration) {
    let Some(velocity) = scene
        .get_mut::<Aircraft>(id)
        .and_then(|aircraft| aircraft.next_pattern_velocity(dt))
    else {
        return;
    };
    if let Some(body) = scene.get_mut::<Body>(id) {
        body.velocity = velocity;
    }
}

fn update_roll_animation(scene: &mut SceneGraph, id: NodeId) {
    let rolls = scene
        .get::<Aircraft>(id)
        .is_some_and(|aircraft| aircraft.has_roll_animation);
    if !rolls {
        return;
    }

    let vx = scene.get::<Body>(id).map_or(0.0, |body| body.velocity.x);
    let rect = if vx < 0.0 {
        ROLL_LEFT
    } else if vx > 0.0 {
        ROLL_RIGHT
    } else {
        ROLL_NONE
    };
    if let Some(sprite) = scene.get_mut::<Sprite>(id) {
        sprite.texture_rect = rect;
    }
}

/// Refresh the hit point and missile readouts and keep them upright.
fn update_labels(scene: &mut SceneGraph, id: NodeId) {
    let Some((health_label, missile_label, ammo)) = scene
        .get::<Aircraft>(id)
        .map(|aircraft| (aircraft.health_label, aircraft.missile_label, aircraft.missile_ammo))
    else {
        return;
    };
    let destroyed = super::is_destroyed(scene, id);
    let hitpoints = body::hitpoints(scene, id);
    let rotation = scene.transform(id).rotation;

    let health_text = if destroyed {
        String::new()
    } else {
        format!("{hitpoints} HP")
    };
    set_label(scene, health_label, health_text, -rotation);

    if let Some(label) = missile_label {
        let missile_text = if destroyed || ammo == 0 {
            String::new()
        } else {
            format!("M: {ammo}")
        };
        set_label(scene, label, missile_text, -rotation);
    }
}

fn set_label(scene: &mut SceneGraph, label: NodeId, text: String, rotation: f32) {
    if let Some(node) = scene.get_mut::<Label>(label) {
        node.text = text;
    }
    if scene.contains(label) {
        scene.transform_mut(label).set_rotation(rotation);
    }
}

fn update_wreck(scene: &mut SceneGraph, id: NodeId, dt: Duration, ctx: &mut UpdateContext<'_>) {
    let position = scene.world_position(id);
    let Some(aircraft) = scene.get_mut::<Aircraft>(id) else {
        return;
    };
    aircraft.explosion.update(dt);

    if !aircraft.played_explosion_sound {
        aircraft.played_explosion_sound = true;
        ctx.audio.push(AudioEvent::Explosion {
            x: position.x,
            y: position.y,
        });
    }

    let may_drop = !aircraft.spawned_pickup && !aircraft.is_allied();
    aircraft.spawned_pickup = true;
    if may_drop {
        check_pickup_drop(position, ctx);
    }
}

/// Roll once for a pickup at a wreck's position.
fn check_pickup_drop(position: Vec2, ctx: &mut UpdateContext<'_>) {
    if ctx.rng.gen_range(0..PICKUP_DROP_ONE_IN) != 0 {
        return;
    }
    let kind = PickupType::ALL[ctx.rng.gen_range(0..PickupType::ALL.len())];
    debug!("dropping {kind:?} pickup at ({:.0}, {:.0})", position.x, position.y);

    let assets = Rc::clone(ctx.assets);
    ctx.commands.push(Command::new(
        Category::AIR_SCENE_LAYER,
        move |scene, layer, _dt| {
            let pickup = pickup::spawn(scene, &assets, kind, Transform::from_position(position));
            scene.attach(layer, pickup);
        },
    ));
}

fn check_projectile_launch(
    scene: &mut SceneGraph,
    id: NodeId,
    dt: Duration,
    ctx: &mut UpdateContext<'_>,
) {
    let Some(aircraft) = scene.get_mut::<Aircraft>(id) else {
        return;
    };
    let allied = aircraft.is_allied();
    let launch = aircraft.check_projectile_launch(dt);
    let ammo = aircraft.missile_ammo;

    if launch.bullets {
        ctx.commands.push(fire_command(id, Rc::clone(ctx.assets)));
        ctx.audio.push(if allied {
            AudioEvent::AlliedGunfire
        } else {
            AudioEvent::EnemyGunfire
        });
    }
    if launch.missile {
        ctx.commands.push(missile_command(id, Rc::clone(ctx.assets)));
        ctx.audio.push(AudioEvent::LaunchMissile);
        debug!("{id:?} launched a missile, {ammo} left");
    }
}

/// Spawns the shooter's bullets into the air layer.
fn fire_command(shooter: NodeId, assets: Rc<Assets>) -> Command {
    Command::new(Category::AIR_SCENE_LAYER, move |scene, layer, _dt| {
        let Some(volley) = Volley::from_shooter(scene, shooter) else {
            warn!("dropping volley from {shooter:?}, which has left the scene");
            return;
        };
        let kind = if volley.allied {
            ProjectileType::AlliedBullet
        } else {
            ProjectileType::EnemyBullet
        };
        let level = volley.spread_level.clamp(1, MAX_SPREAD_LEVEL) as usize;
        for &x_offset in SPREAD_LANES[level - 1] {
            volley.launch(scene, layer, &assets, kind, x_offset);
        }
    })
}

/// Spawns one guided missile into the air layer.
fn missile_command(shooter: NodeId, assets: Rc<Assets>) -> Command {
    Command::new(Category::AIR_SCENE_LAYER, move |scene, layer, _dt| {
        let Some(volley) = Volley::from_shooter(scene, shooter) else {
            warn!("dropping missile from {shooter:?}, which has left the scene");
            return;
        };
        volley.launch(scene, layer, &assets, ProjectileType::Missile, 0.0);
    })
}

/// Shooter state read when a queued fire command finally runs.
struct Volley {
    origin: Vec2,
    sprite_size: Vec2,
    allied: bool,
    spread_level: u32,
}

impl Volley {
    fn from_shooter(scene: &SceneGraph, shooter: NodeId) -> Option<Self> {
        if !scene.contains(shooter) {
            return None;
        }
        let (allied, spread_level) = scene
            .get::<Aircraft>(shooter)
            .map(|aircraft| (aircraft.is_allied(), aircraft.spread_level))?;
        let sprite_size = scene.get::<Sprite>(shooter)?.size();
        Some(Self {
            origin: scene.world_position(shooter),
            sprite_size,
            allied,
            spread_level,
        })
    }

    /// Spawn one projectile ahead of the shooter, `x_offset` sprite widths off-centre.
    fn launch(
        &self,
        scene: &mut SceneGraph,
        layer: NodeId,
        assets: &Assets,
        kind: ProjectileType,
        x_offset: f32,
    ) {
        let sign = if self.allied { -1.0 } else { 1.0 };
        let offset = Vec2::new(
            x_offset * self.sprite_size.x,
            PROJECTILE_Y_OFFSET * self.sprite_size.y,
        );
        let speed = assets.tables.projectile(kind).speed;
        let projectile = projectile::spawn(
            scene,
            assets,
            kind,
            self.origin + offset * sign,
            Vec2::new(0.0, speed) * sign,
        );
        scene.attach(layer, projectile);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use skyraid_core::resources::ResourceMap;
    use skyraid_core::tables::DataTables;

    use super::*;
    use crate::command::CommandQueue;

    struct Fixture {
        scene: SceneGraph,
        assets: Rc<Assets>,
        commands: CommandQueue,
        rng: ChaCha8Rng,
        audio: Vec<AudioEvent>,
    }

    impl Fixture {
        fn new() -> Self {
            let assets = Assets::load(&ResourceMap::headless(), DataTables::default()).unwrap();
            Self {
                scene: SceneGraph::new(),
                assets: Rc::new(assets),
                commands: CommandQueue::new(),
                rng: ChaCha8Rng::seed_from_u64(7),
                audio: Vec::new(),
            }
        }

        fn spawn(&mut self, kind: AircraftType) -> NodeId {
            let id = spawn(&mut self.scene, &self.assets, kind, Transform::default());
            let root = self.scene.root();
            self.scene.attach(root, id);
            id
        }

        fn update(&mut self, id: NodeId, dt: Duration) {
            let mut ctx = UpdateContext {
                commands: &mut self.commands,
                rng: &mut self.rng,
                audio: &mut self.audio,
                assets: &self.assets,
            };
            update(&mut self.scene, id, dt, &mut ctx);
        }

        fn aircraft(&mut self, id: NodeId) -> &mut Aircraft {
            self.scene.get_mut::<Aircraft>(id).unwrap()
        }
    }

    #[test]
    fn fire_cooldown_allows_one_shot_per_interval() {
        let mut fx = Fixture::new();
        let player = fx.spawn(AircraftType::Eagle);

        fx.aircraft(player).fire();
        fx.update(player, Duration::from_millis(10));
        assert_eq!(fx.commands.len(), 1, "first shot fires immediately");
        assert_eq!(
            fx.aircraft(player).fire_countdown(),
            Duration::from_millis(500),
            "1s interval at fire rate level 1 halves to 0.5s"
        );

        // Hold the trigger for exactly 0.5s.
        for _ in 0..2 {
            fx.aircraft(player).fire();
            fx.update(player, Duration::from_millis(250));
        }
        assert_eq!(fx.commands.len(), 1, "still cooling down");
        assert!(fx.aircraft(player).fire_countdown().is_zero());

        fx.aircraft(player).fire();
        fx.update(player, Duration::from_millis(250));
        assert_eq!(fx.commands.len(), 2, "exactly one more volley after the cooldown");
    }

    #[test]
    fn raptor_never_fires() {
        let mut fx = Fixture::new();
        let raptor = fx.spawn(AircraftType::Raptor);
        for _ in 0..10 {
            fx.update(raptor, Duration::from_millis(500));
        }
        assert!(fx.commands.is_empty(), "Raptor has no fire interval");
        assert!(!fx.aircraft(raptor).is_firing());
    }

    #[test]
    fn avenger_fires_on_its_own() {
        let mut fx = Fixture::new();
        let avenger = fx.spawn(AircraftType::Avenger);
        fx.update(avenger, Duration::from_millis(10));
        assert_eq!(fx.commands.len(), 1);
        assert_eq!(fx.audio, vec![AudioEvent::EnemyGunfire]);
    }

    #[test]
    fn movement_pattern_cycles_through_legs() {
        let mut fx = Fixture::new();
        let raptor = fx.spawn(AircraftType::Raptor);
        let step = Duration::from_millis(500); // 40 units per step at speed 80

        let mut legs = Vec::new();
        for _ in 0..12 {
            fx.update(raptor, step);
            legs.push(fx.aircraft(raptor).direction_index());
        }
        assert_eq!(legs, vec![0, 0, 0, 1, 1, 1, 1, 1, 2, 2, 2, 0]);
        assert_eq!(
            fx.aircraft(raptor).travel_distance(),
            40.0,
            "distance restarts from zero on the new leg"
        );
    }

    #[test]
    fn movement_follows_leg_angle() {
        let mut fx = Fixture::new();
        let raptor = fx.spawn(AircraftType::Raptor);
        fx.update(raptor, Duration::from_millis(500));

        // 45 degrees off straight down, drifting left in screen space.
        let velocity = fx.scene.get::<Body>(raptor).unwrap().velocity;
        let expected = Vec2::new(-1.0, 1.0).normalize() * 80.0;
        assert!((velocity - expected).length() < 1e-3, "got {velocity:?}");
    }

    #[test]
    fn missiles_are_limited_by_ammo() {
        let mut fx = Fixture::new();
        let player = fx.spawn(AircraftType::Eagle);
        for _ in 0..INITIAL_MISSILE_AMMO + 2 {
            fx.aircraft(player).launch_missile();
            fx.update(player, Duration::from_millis(10));
        }
        assert_eq!(fx.commands.len(), INITIAL_MISSILE_AMMO as usize);
        assert_eq!(fx.aircraft(player).missile_ammo(), 0);
    }

    #[test]
    fn upgrades_are_capped() {
        let mut fx = Fixture::new();
        let player = fx.spawn(AircraftType::Eagle);
        let aircraft = fx.aircraft(player);
        for _ in 0..20 {
            aircraft.increase_fire_rate();
            aircraft.increase_spread();
        }
        assert_eq!(aircraft.fire_rate_level(), MAX_FIRE_RATE_LEVEL);
        assert_eq!(aircraft.spread_level(), MAX_SPREAD_LEVEL);
    }

    #[test]
    fn labels_track_hitpoints_and_stay_upright() {
        let mut fx = Fixture::new();
        let raptor = fx.spawn(AircraftType::Raptor);
        fx.scene.transform_mut(raptor).set_rotation(ENEMY_ROTATION);
        fx.scene.get_mut::<Body>(raptor).unwrap().damage(5);
        fx.update(raptor, Duration::from_millis(10));

        let label = fx.scene.children(raptor)[0];
        assert_eq!(fx.scene.get::<Label>(label).unwrap().text, "15 HP");
        assert_eq!(fx.scene.transform(label).rotation, 180.0);
    }

    #[test]
    fn wreck_explodes_then_becomes_removable() {
        let mut fx = Fixture::new();
        let raptor = fx.spawn(AircraftType::Raptor);
        fx.scene.get_mut::<Body>(raptor).unwrap().destroy();

        fx.update(raptor, Duration::from_millis(500));
        assert!(!is_marked_for_removal(&fx.scene, raptor), "explosion still playing");
        assert!(matches!(fx.audio[0], AudioEvent::Explosion { .. }));

        fx.update(raptor, Duration::from_millis(500));
        assert!(is_marked_for_removal(&fx.scene, raptor));
        assert_eq!(
            fx.audio.iter().filter(|e| matches!(e, AudioEvent::Explosion { .. })).count(),
            1,
            "explosion sound plays once"
        );
    }

    #[test]
    fn removed_aircraft_skips_explosion() {
        let mut fx = Fixture::new();
        let raptor = fx.spawn(AircraftType::Raptor);
        crate::entities::remove(&mut fx.scene, raptor);
        assert!(is_marked_for_removal(&fx.scene, raptor));
    }
}
