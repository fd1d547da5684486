//! Player actions the host maps its input onto.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use skyraid_core::category::Category;
use skyraid_core::constants::PLAYER_SPEED;

use crate::command::Command;
use crate::entities::{Aircraft, Body};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Fire,
    LaunchMissile,
}

impl PlayerAction {
    pub const ALL: [PlayerAction; 6] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::MoveUp,
        Self::MoveDown,
        Self::Fire,
        Self::LaunchMissile,
    ];

    /// Realtime actions are issued every frame while their input is held;
    /// the rest fire once per press.
    pub fn is_realtime(self) -> bool {
        !matches!(self, Self::LaunchMissile)
    }

    /// The command carrying out this action on the player's aircraft.
    pub fn command(self) -> Command {
        match self {
            Self::MoveLeft => mover(Vec2::new(-PLAYER_SPEED, 0.0)),
            Self::MoveRight => mover(Vec2::new(PLAYER_SPEED, 0.0)),
            Self::MoveUp => mover(Vec2::new(0.0, -PLAYER_SPEED)),
            Self::MoveDown => mover(Vec2::new(0.0, PLAYER_SPEED)),
            Self::Fire => {
                Command::derived::<Aircraft>(Category::PLAYER_AIRCRAFT, |mut node, _dt| {
                    node.get().fire();
                })
            }
            Self::LaunchMissile => {
                Command::derived::<Aircraft>(Category::PLAYER_AIRCRAFT, |mut node, _dt| {
                    node.get().launch_missile();
                })
            }
        }
    }
}

fn mover(velocity: Vec2) -> Command {
    Command::derived::<Body>(Category::PLAYER_AIRCRAFT, move |mut node, _dt| {
        node.get().accelerate(velocity);
    })
}
