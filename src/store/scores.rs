use anyhow::Result;

use super::KeyValueStore;

/// Score of the current game, rewritten on every change and on restart
pub const SCORE_KEY: &str = "snake-score";

/// Best score ever reached with this store
pub const HIGH_SCORE_KEY: &str = "snake-highscore";

/// Read a decimal counter; absent or malformed values count as zero
pub fn read_count(store: &dyn KeyValueStore, key: &str) -> u32 {
    store
        .get(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

pub fn write_count(store: &mut dyn KeyValueStore, key: &str, count: u32) -> Result<()> {
    store.set(key, &count.to_string())
}
