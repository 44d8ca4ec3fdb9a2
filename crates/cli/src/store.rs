use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use engine::presets::KeyValueStore;

/// Key-value store persisted as one JSON object on disk.
///
/// Changes stay in memory until [`JsonFileStore::flush`].
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    pub fn open(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read store {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("store {} is not a JSON object", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn flush(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("failed to write store {}", self.path.display()))
    }
}

impl KeyValueStore for JsonFileStore {
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

#[cfg(test)]
mod tests {
    use super::JsonFileStore;
    use engine::presets::KeyValueStore;

    #[test]
    fn values_survive_flush_and_reopen() {
        let path = std::env::temp_dir().join(format!(
            "clip-cli-store-{}-{}.json",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("system clock must be after unix epoch")
                .as_nanos()
        ));

        let mut store = JsonFileStore::open(&path).expect("open should succeed");
        store.set("theme", "dark".to_string());
        store.flush().expect("flush should succeed");

        let reopened = JsonFileStore::open(&path).expect("reopen should succeed");
        let _ = std::fs::remove_file(&path);
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
    }
}
