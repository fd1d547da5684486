//! Events emitted by the simulation for audio feedback.

use serde::{Deserialize, Serialize};

/// Audio events for the host's sound system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Player bullets fired.
    AlliedGunfire,
    /// Enemy bullets fired.
    EnemyGunfire,
    /// Guided missile launched.
    LaunchMissile,
    /// Aircraft destroyed at the given world position.
    Explosion { x: f32, y: f32 },
    /// Player collected a pickup.
    CollectPickup,
}
