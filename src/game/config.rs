use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use super::difficulty::Difficulty;

/// Largest board side accepted by [`GameConfig::validate`]
pub const MAX_BOARD_SIZE: usize = 64;

/// What happens when the head leaves the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Leaving the board ends the game
    #[default]
    Wall,
    /// Leaving one edge re-enters from the opposite edge
    Wrap,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown boundary policy `{0}` (expected wall or wrap)")]
pub struct ParseBoundaryError(pub String);

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryPolicy::Wall => f.write_str("wall"),
            BoundaryPolicy::Wrap => f.write_str("wrap"),
        }
    }
}

impl FromStr for BoundaryPolicy {
    type Err = ParseBoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wall" => Ok(BoundaryPolicy::Wall),
            "wrap" => Ok(BoundaryPolicy::Wrap),
            _ => Err(ParseBoundaryError(s.to_string())),
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square game grid
    pub board_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Whether the walls kill or wrap
    pub boundary: BoundaryPolicy,
    /// Difficulty the game starts with
    pub difficulty: Difficulty,
    /// Whether selecting a difficulty also restarts the game
    pub restart_on_difficulty_change: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 10,
            initial_snake_length: 3,
            boundary: BoundaryPolicy::Wall,
            difficulty: Difficulty::Normal,
            restart_on_difficulty_change: true,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Same defaults, but the snake wraps around the edges
    pub fn wrapping() -> Self {
        Self {
            boundary: BoundaryPolicy::Wrap,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the initial snake fits on the board with room to move
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.initial_snake_length > 0,
            "initial snake length must be at least 1"
        );
        ensure!(
            self.board_size > self.initial_snake_length,
            "board size {} is too small for a snake of length {}",
            self.board_size,
            self.initial_snake_length
        );
        ensure!(
            self.board_size <= MAX_BOARD_SIZE,
            "board size {} exceeds the maximum of {}",
            self.board_size,
            MAX_BOARD_SIZE
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 10);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.boundary, BoundaryPolicy::Wall);
        assert_eq!(config.difficulty, Difficulty::Normal);
        assert!(config.restart_on_difficulty_change);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.board_size, 15);
        assert_eq!(config.boundary, BoundaryPolicy::Wall);
    }

    #[test]
    fn test_validation() {
        assert!(GameConfig::new(3).validate().is_err());
        assert!(GameConfig::new(4).validate().is_ok());
        assert!(GameConfig::new(MAX_BOARD_SIZE + 1).validate().is_err());

        let config = GameConfig {
            initial_snake_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_boundary_parse() {
        assert_eq!("wall".parse::<BoundaryPolicy>(), Ok(BoundaryPolicy::Wall));
        assert_eq!("WRAP".parse::<BoundaryPolicy>(), Ok(BoundaryPolicy::Wrap));
        assert!("bounce".parse::<BoundaryPolicy>().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "boundary": "wrap", "difficulty": "hard" }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.boundary, BoundaryPolicy::Wrap);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.board_size, 10);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "board_size": 2 }"#).unwrap();
        assert!(GameConfig::load(&path).is_err());

        std::fs::write(&path, "not json").unwrap();
        assert!(GameConfig::load(&path).is_err());

        assert!(GameConfig::load(&temp_dir.path().join("missing.json")).is_err());
    }
}
