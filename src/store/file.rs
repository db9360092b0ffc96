//! JSON file backed store
//!
//! All values live in one JSON object, e.g.
//! `{ "snake-highscore": "12", "snake-score": "3" }`. The whole file is
//! rewritten on every `set`; there are only ever a handful of keys.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::KeyValueStore;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`
    ///
    /// A missing file is an empty store. A file that cannot be parsed is
    /// treated as empty too and will be overwritten on the next `set`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read score file {:?}", path))?;
            match serde_json::from_str(&text) {
                Ok(values) => values,
                Err(err) => {
                    warn!(path = ?path, error = %err, "score file is not valid JSON, starting empty");
                    BTreeMap::new()
                }
            }
        } else {
            debug!(path = ?path, "score file does not exist yet");
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json =
            serde_json::to_string_pretty(&self.values).context("Failed to serialize scores")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write scores to {:?}", self.path))?;

        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path().join("scores.json")).unwrap();

        assert_eq!(store.get("snake-score"), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("scores.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("snake-highscore", "12").unwrap();
        store.set("snake-score", "3").unwrap();
        assert!(path.exists());

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("snake-highscore"), Some("12".to_string()));
        assert_eq!(reopened.get("snake-score"), Some("3".to_string()));
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("snake-score"), None);

        store.set("snake-score", "1").unwrap();
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("snake-score"), Some("1".to_string()));
    }
}
