//! Per-frame systems the world runs over the scene graph.
//!
//! Systems are plain functions over `&mut SceneGraph`. They hold no state of
//! their own; anything that must survive a frame lives in the world or on
//! the nodes.

pub mod cleanup;
pub mod collision;
pub mod guidance;
pub mod movement;
pub mod spawner;
