use anyhow::Result;
use std::collections::HashMap;

use super::KeyValueStore;

/// Store that forgets everything when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a"), None);

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a"), Some("1".to_string()));

        store.set("a", "2").unwrap();
        assert_eq!(store.get("a"), Some("2".to_string()));
    }

    #[test]
    fn test_with_values() {
        let store = MemoryStore::with_values([("x", "7"), ("y", "oops")]);
        assert_eq!(store.get("x"), Some("7".to_string()));
        assert_eq!(store.get("y"), Some("oops".to_string()));
    }
}
