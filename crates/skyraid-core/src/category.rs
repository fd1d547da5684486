//! Category bitmask used for command routing and collision classification.

bitflags::bitflags! {
    /// Classifies a scene node. A node carries zero or more flags; commands
    /// and collision rules select nodes by intersecting against them.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Category: u32 {
        const SCENE             = 1 << 0;
        const PLAYER_AIRCRAFT   = 1 << 1;
        const ENEMY_AIRCRAFT    = 1 << 2;
        const ENEMY_PROJECTILE  = 1 << 3;
        const ALLIED_PROJECTILE = 1 << 4;
        const AIR_SCENE_LAYER   = 1 << 5;
        const PICKUP            = 1 << 6;
        const PARTICLE_SYSTEM   = 1 << 7;

        const AIRCRAFT = Self::PLAYER_AIRCRAFT.bits() | Self::ENEMY_AIRCRAFT.bits();
        const PROJECTILE = Self::ENEMY_PROJECTILE.bits() | Self::ALLIED_PROJECTILE.bits();
    }
}

impl Category {
    /// The empty mask. Nodes tagged with it never receive commands.
    pub const NONE: Category = Category::empty();
}
