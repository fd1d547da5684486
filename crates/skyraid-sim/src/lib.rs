//! Headless simulation core for skyraid.
//!
//! Owns the scene graph (a hecs world arranged as a tree), dispatches
//! category-filtered commands through it, detects collisions and runs the
//! per-frame world loop. The host supplies assets through a
//! `ResourceProvider`, injects player commands, and receives draw calls
//! through a `RenderTarget`.

pub mod command;
pub mod entities;
pub mod game_loop;
pub mod player;
pub mod scene;
pub mod systems;
pub mod textures;
pub mod world;
pub mod world_setup;

pub use command::{Command, CommandQueue, NodeMut};
pub use scene::{CollisionPair, NodeId, SceneGraph};
pub use skyraid_core as core;
pub use world::World;
