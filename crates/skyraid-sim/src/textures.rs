//! Assets resolved once when a world is built.

use std::collections::BTreeMap;

use log::debug;

use skyraid_core::enums::{FontId, TextureId};
use skyraid_core::error::ResourceError;
use skyraid_core::resources::{FontHandle, ResourceProvider, TextureHandle};
use skyraid_core::tables::DataTables;

/// Every texture the simulation draws with.
#[derive(Debug, Clone)]
pub struct TextureSet {
    handles: BTreeMap<TextureId, TextureHandle>,
}

impl TextureSet {
    /// Ask the provider for every texture, failing on the first missing one.
    pub fn load(provider: &dyn ResourceProvider) -> Result<Self, ResourceError> {
        let handles = TextureId::ALL
            .into_iter()
            .map(|id| provider.texture(id).map(|handle| (id, handle)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        debug!("resolved {} textures", handles.len());
        Ok(Self { handles })
    }

    pub fn get(&self, id: TextureId) -> TextureHandle {
        self.handles[&id]
    }
}

/// Read-only data shared by entity factories and queued commands.
#[derive(Debug, Clone)]
pub struct Assets {
    pub textures: TextureSet,
    pub font: FontHandle,
    pub tables: DataTables,
}

impl Assets {
    pub fn load(provider: &dyn ResourceProvider, tables: DataTables) -> Result<Self, ResourceError> {
        Ok(Self {
            textures: TextureSet::load(provider)?,
            font: provider.font(FontId::Main)?,
            tables,
        })
    }

    pub fn texture(&self, id: TextureId) -> TextureHandle {
        self.textures.get(id)
    }
}
