use std::collections::{BTreeMap, HashMap};

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

const PRESETS_KEY: &str = "subtitle-presets";

/// Narrow key-value persistence used for user preferences.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// Process-local store, the default when no persistent backend is wired in.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Vertical placement of burned-in subtitles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtitlePosition {
    Top,
    Middle,
    #[default]
    Bottom,
}

/// Look of burned-in subtitles, forwarded untouched to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleStyle {
    pub font_family: String,
    pub font_size: u32,
    pub primary_color: String,
    pub outline_color: String,
    pub outline_width: f32,
    pub position: SubtitlePosition,
    pub uppercase: bool,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_family: "Montserrat".to_string(),
            font_size: 48,
            primary_color: "#FFFFFF".to_string(),
            outline_color: "#000000".to_string(),
            outline_width: 3.0,
            position: SubtitlePosition::Bottom,
            uppercase: false,
        }
    }
}

/// Named subtitle styles kept in an injected [`KeyValueStore`].
///
/// # Example
/// ```
/// use engine::presets::{MemoryStore, SubtitlePresets, SubtitleStyle};
///
/// let mut presets = SubtitlePresets::new(MemoryStore::default());
/// presets.save("bold", SubtitleStyle { font_size: 64, ..SubtitleStyle::default() })?;
/// assert_eq!(presets.get("bold").map(|style| style.font_size), Some(64));
/// # Ok::<(), engine::EngineError>(())
/// ```
#[derive(Debug)]
pub struct SubtitlePresets<S> {
    store: S,
}

impl<S> SubtitlePresets<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns every saved preset, sorted by name.
    ///
    /// An unreadable stored value is treated as no presets.
    pub fn list(&self) -> BTreeMap<String, SubtitleStyle> {
        let Some(raw) = self.store.get(PRESETS_KEY) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&raw) {
            Ok(presets) => presets,
            Err(error) => {
                warn!(%error, "stored subtitle presets are unreadable; ignoring them");
                BTreeMap::new()
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<SubtitleStyle> {
        self.list().remove(name)
    }

    pub fn save(&mut self, name: &str, style: SubtitleStyle) -> Result<()> {
        let mut presets = self.list();
        presets.insert(name.to_string(), style);
        self.write(name, &presets)
    }

    /// Removes a preset. Returns whether it existed.
    pub fn delete(&mut self, name: &str) -> Result<bool> {
        let mut presets = self.list();
        if presets.remove(name).is_none() {
            return Ok(false);
        }
        if presets.is_empty() {
            self.store.remove(PRESETS_KEY);
        } else {
            self.write(name, &presets)?;
        }
        Ok(true)
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn write(&mut self, name: &str, presets: &BTreeMap<String, SubtitleStyle>) -> Result<()> {
        let raw = serde_json::to_string(presets).map_err(|source| {
            EngineError::PresetSerialization {
                name: name.to_string(),
                source,
            }
        })?;
        self.store.set(PRESETS_KEY, raw);
        Ok(())
    }
}
