//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! [`GameEngine`] holds the rules, [`GameLoop`] owns a running session on top of it.

pub mod action;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod events;
pub mod game_loop;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{BoundaryPolicy, GameConfig, ParseBoundaryError};
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use events::GameEvent;
pub use game_loop::{DifficultyChange, GameLoop};
pub use snapshot::{CellKind, GameView, GridSnapshot};
pub use state::{Cell, CollisionType, GameState, GameStatus, Snake};
