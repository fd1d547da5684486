//! The world: scene graph, camera, spawner and the per-frame update order.
//!
//! `World` owns the scene graph and everything that drives it. The host
//! pushes player commands into [`World::command_queue`], calls
//! [`World::update`] once per fixed step and [`World::draw`] once per
//! rendered frame, and polls [`World::mission_status`] to decide when the
//! mission is over. Completely headless, so runs are deterministic for a
//! given seed and input sequence.

use std::rc::Rc;
use std::time::Duration;

use glam::Vec2;
use log::{debug, info, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyraid_core::config::SimConfig;
use skyraid_core::enums::{Layer, MissionStatus};
use skyraid_core::error::SimError;
use skyraid_core::events::AudioEvent;
use skyraid_core::render::RenderTarget;
use skyraid_core::resources::ResourceProvider;
use skyraid_core::types::{FloatRect, SimTime};

use crate::command::CommandQueue;
use crate::entities::{self, UpdateContext};
use crate::scene::{NodeId, SceneGraph};
use crate::systems::spawner::{self, SpawnPoint};
use crate::systems::{cleanup, collision, guidance, movement};
use crate::textures::Assets;
use crate::world_setup;

pub struct World {
    scene: SceneGraph,
    layers: [NodeId; Layer::COUNT],
    player: NodeId,
    assets: Rc<Assets>,
    command_queue: CommandQueue,
    rng: ChaCha8Rng,
    audio_events: Vec<AudioEvent>,
    time: SimTime,

    view_center: Vec2,
    view_size: Vec2,
    world_bounds: FloatRect,
    scroll_speed: f32,
    border_distance: f32,
    battlefield_margin: f32,
    show_bounding_boxes: bool,
    spawn_points: Vec<SpawnPoint>,
}

impl World {
    /// Build a world from `config`, resolving every asset through `provider`.
    pub fn new(config: SimConfig, provider: &dyn ResourceProvider) -> Result<Self, SimError> {
        config.validate()?;
        let assets = Rc::new(Assets::load(provider, config.tables.clone())?);

        let view_size = config.view_size;
        let world_bounds = FloatRect::new(0.0, 0.0, view_size.x, config.world_height);
        let spawn_position = Vec2::new(
            view_size.x / 2.0,
            world_bounds.height - view_size.y / 2.0,
        );

        let mut scene = SceneGraph::new();
        let layout = world_setup::build_scene(&mut scene, &assets, world_bounds, spawn_position);
        let spawn_points = spawner::build_spawn_points(&config.spawns, spawn_position);

        info!(
            "world built: {}x{} level, seed {}, {} enemies pending",
            world_bounds.width,
            world_bounds.height,
            config.seed,
            spawn_points.len()
        );

        Ok(Self {
            scene,
            layers: layout.layers,
            player: layout.player,
            assets,
            command_queue: CommandQueue::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            audio_events: Vec::new(),
            time: SimTime::default(),
            view_center: spawn_position,
            view_size,
            world_bounds,
            scroll_speed: config.scroll_speed,
            border_distance: config.border_distance,
            battlefield_margin: config.battlefield_margin,
            show_bounding_boxes: config.show_bounding_boxes,
            spawn_points,
        })
    }

    /// Advance the world by one step of length `dt`.
    pub fn update(&mut self, dt: Duration) {
        // 1. Scroll the camera. Player movement is rebuilt from this frame's commands.
        self.view_center.y += self.scroll_speed * dt.as_secs_f32();
        movement::reset_velocity(&mut self.scene, self.player);

        // 2-3. Retire stragglers and aim missiles.
        self.command_queue
            .push(cleanup::out_of_view_command(self.battlefield_bounds()));
        guidance::queue_commands(&mut self.command_queue);

        // 4. Drain the queue, including commands entities queued last frame.
        let mut commands = 0;
        let mut matched = 0;
        while let Some(mut command) = self.command_queue.pop() {
            matched += self.scene.on_command(&mut command, dt);
            commands += 1;
        }
        trace!("tick {}: {commands} commands reached {matched} nodes", self.time.tick);

        // 5-6. Normalise input, then apply collisions.
        movement::adapt_velocity(&mut self.scene, self.player);
        collision::run(&mut self.scene, &mut self.audio_events);

        // 7. Sweep wrecks.
        let removed = self.scene.remove_wrecks();
        if removed > 0 {
            debug!("removed {removed} wrecks, {} nodes left", self.scene.len());
        }

        // 8. Spawn enemies the battlefield has reached.
        let battlefield_top = self.battlefield_bounds().top;
        let air_layer = self.layer(Layer::UpperAir);
        spawner::run(
            &mut self.scene,
            &self.assets,
            air_layer,
            &mut self.spawn_points,
            battlefield_top,
        );

        // 9. Entity behaviour. Commands queued here run next frame.
        let mut ctx = UpdateContext {
            commands: &mut self.command_queue,
            rng: &mut self.rng,
            audio: &mut self.audio_events,
            assets: &self.assets,
        };
        self.scene.update(dt, &mut ctx);

        // 10. Keep the player on screen.
        let view = self.view_bounds();
        movement::adapt_position(&mut self.scene, self.player, view, self.border_distance);

        self.time.advance(dt);
    }

    /// Draw the whole scene through the current view.
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        target.set_view(self.view_bounds());
        self.scene.draw(target, self.show_bounding_boxes);
    }

    /// Queue for commands the host issues, such as player input.
    pub fn command_queue(&mut self) -> &mut CommandQueue {
        &mut self.command_queue
    }

    /// True while the player's aircraft is still in play.
    pub fn has_alive_player(&self) -> bool {
        self.scene.contains(self.player) && !entities::is_marked_for_removal(&self.scene, self.player)
    }

    /// True once the player has flown past the top of the level.
    pub fn has_player_reached_end(&self) -> bool {
        self.scene.contains(self.player)
            && !self
                .world_bounds
                .contains(self.scene.world_position(self.player))
    }

    pub fn mission_status(&self) -> MissionStatus {
        if !self.has_alive_player() {
            MissionStatus::Failure
        } else if self.has_player_reached_end() {
            MissionStatus::Success
        } else {
            MissionStatus::Running
        }
    }

    /// Sound cues emitted since the last call.
    pub fn drain_audio_events(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut self.audio_events)
    }

    /// Enemies not yet spawned, nearest last.
    pub fn spawn_points(&self) -> &[SpawnPoint] {
        &self.spawn_points
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn player(&self) -> NodeId {
        self.player
    }

    pub fn layer(&self, layer: Layer) -> NodeId {
        self.layers[layer.index()]
    }

    /// The visible part of the level.
    pub fn view_bounds(&self) -> FloatRect {
        FloatRect::new(
            self.view_center.x - self.view_size.x / 2.0,
            self.view_center.y - self.view_size.y / 2.0,
            self.view_size.x,
            self.view_size.y,
        )
    }

    /// The view extended upwards, where enemies spawn and stay alive.
    pub fn battlefield_bounds(&self) -> FloatRect {
        let mut bounds = self.view_bounds();
        bounds.top -= self.battlefield_margin;
        bounds.height += self.battlefield_margin;
        bounds
    }

    pub fn world_bounds(&self) -> FloatRect {
        self.world_bounds
    }

    #[cfg(test)]
    pub(crate) fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    #[cfg(test)]
    pub(crate) fn assets(&self) -> Rc<Assets> {
        Rc::clone(&self.assets)
    }
}
