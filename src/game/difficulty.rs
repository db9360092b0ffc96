use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Speed setting of the game, selected by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Special,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}` (expected easy, normal, hard or special)")]
pub struct ParseDifficultyError(pub String);

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Special,
    ];

    /// Time between two ticks at this difficulty
    pub fn tick_interval(&self) -> Duration {
        let millis = match self {
            Difficulty::Easy => 300,
            Difficulty::Normal => 200,
            Difficulty::Hard => 100,
            Difficulty::Special => 90,
        };
        Duration::from_millis(millis)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Special => "special",
        }
    }

    /// The next difficulty in selector order, wrapping after the last one
    pub fn next(&self) -> Difficulty {
        let index = Self::ALL
            .iter()
            .position(|difficulty| difficulty == self)
            .unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}
