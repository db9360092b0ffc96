//! Key-value persistence for scores
//!
//! The game only ever needs two string values, so storage is a tiny
//! `get`/`set` interface injected into the game loop. [`MemoryStore`] keeps
//! values for the lifetime of the process, [`JsonFileStore`] keeps them in a
//! JSON file between runs.

pub mod file;
pub mod memory;
pub mod scores;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use scores::{HIGH_SCORE_KEY, SCORE_KEY, read_count, write_count};

use anyhow::Result;

/// String-valued key-value storage
pub trait KeyValueStore {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing what was there
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
