//! Map display settings: which lines, stops and buses are shown, and which
//! tile provider draws the base map.
//!
//! Settings live in an explicit [`MapSettings`] value handed to the
//! rendering layer. Persistence goes through an injected [`KeyValueStore`].

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::traits::KeyValueStore;

pub const MAP_FILTERS_KEY: &str = "map_filters";
pub const TILE_PROVIDER_KEY: &str = "leaflet_provider";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to serialize setting {key}: {source}")]
    Serialize {
        key: &'static str,
        source: serde_json::Error,
    },
}

/// Visibility mode for stops and buses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    #[default]
    All,
    None,
    /// Only items belonging to the selected lines.
    LineOnly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    #[default]
    All,
    None,
}

/// Which lines are shown: all, none, or an explicit selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineFilter {
    Mode(LineMode),
    Lines(Vec<String>),
}

impl Default for LineFilter {
    fn default() -> Self {
        Self::Mode(LineMode::All)
    }
}

impl LineFilter {
    pub fn allows(&self, line: &str) -> bool {
        match self {
            Self::Mode(LineMode::All) => true,
            Self::Mode(LineMode::None) => false,
            Self::Lines(lines) => lines.iter().any(|selected| selected == line),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapFilters {
    pub line: LineFilter,
    pub stop: Filter,
    pub bus: Filter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileProvider {
    pub id: u32,
    pub url: String,
    pub name: String,
}

const PROVIDERS: &[(u32, &str, &str)] = &[
    (1, "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png", "CartoDB Light"),
    (2, "https://tile.openstreetmap.org/{z}/{x}/{y}.png", "OpenStreetMap.ORG"),
    (3, "https://tile.openstreetmap.de/{z}/{x}/{y}.png", "OpenStreetMap.DE"),
    (4, "https://tile.osm.ch/switzerland/{z}/{x}/{y}.png", "OpenStreetMap.SW"),
    (5, "https://{s}.tile.openstreetmap.fr/osmfr/{z}/{x}/{y}.png", "OpenStreetMap.FR"),
    (6, "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png", "OpenStreetMap.HOT"),
];

const DEFAULT_PROVIDER_ID: u32 = 2;

impl TileProvider {
    /// The providers offered in the settings screen.
    pub fn builtin() -> Vec<Self> {
        PROVIDERS
            .iter()
            .map(|&(id, url, name)| Self {
                id,
                url: url.to_string(),
                name: name.to_string(),
            })
            .collect()
    }

    pub fn by_id(id: u32) -> Option<Self> {
        Self::builtin().into_iter().find(|provider| provider.id == id)
    }
}

impl Default for TileProvider {
    fn default() -> Self {
        Self::builtin()
            .into_iter()
            .find(|provider| provider.id == DEFAULT_PROVIDER_ID)
            .unwrap_or_else(|| Self {
                id: DEFAULT_PROVIDER_ID,
                url: PROVIDERS[1].1.to_string(),
                name: PROVIDERS[1].2.to_string(),
            })
    }
}

/// Current settings, backed by `S`.
#[derive(Debug)]
pub struct MapSettings<S: KeyValueStore> {
    store: S,
    filters: MapFilters,
    tile_provider: TileProvider,
}

impl<S: KeyValueStore> MapSettings<S> {
    /// Loads stored settings, using defaults for anything missing or unreadable.
    pub fn load(store: S) -> Self {
        let filters = read(&store, MAP_FILTERS_KEY).unwrap_or_default();
        let tile_provider = read(&store, TILE_PROVIDER_KEY).unwrap_or_default();
        Self {
            store,
            filters,
            tile_provider,
        }
    }

    pub fn filters(&self) -> &MapFilters {
        &self.filters
    }

    pub fn tile_provider(&self) -> &TileProvider {
        &self.tile_provider
    }

    pub fn set_filters(&mut self, filters: MapFilters) -> Result<(), SettingsError> {
        write(&mut self.store, MAP_FILTERS_KEY, &filters)?;
        self.filters = filters;
        Ok(())
    }

    pub fn set_tile_provider(&mut self, provider: TileProvider) -> Result<(), SettingsError> {
        write(&mut self.store, TILE_PROVIDER_KEY, &provider)?;
        self.tile_provider = provider;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

fn read<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, %err, "failed to parse stored setting");
            None
        }
    }
}

fn write<T: Serialize>(store: &mut impl KeyValueStore, key: &'static str, value: &T) -> Result<(), SettingsError> {
    let raw = serde_json::to_string(value).map_err(|source| SettingsError::Serialize { key, source })?;
    store.set_item(key, raw);
    Ok(())
}

/// In-process store, for tests and hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.items.insert(key.to_string(), value);
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}
