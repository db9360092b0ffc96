use super::state::CollisionType;

/// Discrete things that happened during a tick
///
/// The presentation layer turns these into sounds, flashes or log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The snake ate; `score` is the new score
    FoodEaten { score: u32 },
    /// The score went past the previous high score for the first time this game
    NewHighScore { score: u32 },
    /// The snake crashed
    GameOver { score: u32, collision: CollisionType },
}
