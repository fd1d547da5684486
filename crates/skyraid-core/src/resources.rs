//! Named asset handles supplied by the host.
//!
//! The simulation never touches the file system. It asks a
//! [`ResourceProvider`] for each texture or font it needs and keeps the
//! returned handles; the host maps handles back to its own GPU objects.

use std::collections::BTreeMap;

use glam::UVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{FontId, TextureId};
use crate::error::ResourceError;

/// A loaded texture. `size` is the full texture size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureHandle {
    pub id: TextureId,
    pub size: UVec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontHandle {
    pub id: FontId,
}

/// Source of ready-to-use asset handles.
pub trait ResourceProvider {
    fn texture(&self, id: TextureId) -> Result<TextureHandle, ResourceError>;
    fn font(&self, id: FontId) -> Result<FontHandle, ResourceError>;
}

/// In-memory provider for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct ResourceMap {
    textures: BTreeMap<TextureId, TextureHandle>,
    fonts: BTreeMap<FontId, FontHandle>,
}

impl ResourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider holding every asset at the size of the stock artwork.
    pub fn headless() -> Self {
        let mut map = Self::new();
        for id in TextureId::ALL {
            let size = match id {
                TextureId::Eagle => UVec2::new(144, 64),
                TextureId::Raptor => UVec2::new(84, 64),
                TextureId::Avenger => UVec2::new(60, 59),
                TextureId::Bullet => UVec2::new(3, 14),
                TextureId::Missile => UVec2::new(15, 32),
                TextureId::HealthRefill
                | TextureId::MissileRefill
                | TextureId::FireSpread
                | TextureId::FireRate => UVec2::new(40, 40),
                TextureId::Landscape => UVec2::new(1024, 1024),
                TextureId::FinishLine => UVec2::new(1024, 76),
                TextureId::Explosion => UVec2::new(1024, 1024),
                TextureId::Particle => UVec2::new(6, 6),
            };
            map.insert_texture(id, size);
        }
        map.insert_font(FontId::Main);
        map
    }

    pub fn insert_texture(&mut self, id: TextureId, size: UVec2) {
        self.textures.insert(id, TextureHandle { id, size });
    }

    pub fn insert_font(&mut self, id: FontId) {
        self.fonts.insert(id, FontHandle { id });
    }

    pub fn remove_texture(&mut self, id: TextureId) -> Option<TextureHandle> {
        self.textures.remove(&id)
    }
}

impl ResourceProvider for ResourceMap {
    fn texture(&self, id: TextureId) -> Result<TextureHandle, ResourceError> {
        self.textures
            .get(&id)
            .copied()
            .ok_or(ResourceError::MissingTexture(id))
    }

    fn font(&self, id: FontId) -> Result<FontHandle, ResourceError> {
        self.fonts
            .get(&id)
            .copied()
            .ok_or(ResourceError::MissingFont(id))
    }
}
