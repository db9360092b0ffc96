//! The game session: state, pending input, scores and difficulty
//!
//! [`GameLoop`] is driven from outside. Something calls [`GameLoop::tick`]
//! every [`GameLoop::tick_interval`] and forwards player input through
//! [`GameLoop::change_direction`]. Between two ticks any number of direction
//! requests may arrive; the last accepted one is applied on the next tick.

use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{
    action::Direction,
    config::GameConfig,
    difficulty::Difficulty,
    engine::GameEngine,
    events::GameEvent,
    snapshot::{GameView, GridSnapshot},
    state::{GameState, GameStatus},
};
use crate::store::{HIGH_SCORE_KEY, KeyValueStore, SCORE_KEY, read_count, write_count};

/// Outcome of a difficulty selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyChange {
    pub difficulty: Difficulty,
    pub tick_interval: Duration,
    /// Whether the selection also started a new game
    pub restarted: bool,
}

pub struct GameLoop {
    engine: GameEngine,
    state: GameState,
    pending_direction: Option<Direction>,
    high_score: u32,
    high_score_announced: bool,
    difficulty: Difficulty,
    store: Box<dyn KeyValueStore>,
}

impl GameLoop {
    /// Start a session after checking the config
    pub fn new(config: GameConfig, store: Box<dyn KeyValueStore>) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_engine(GameEngine::new(config), store))
    }

    /// Build around an existing engine, e.g. one with a fixed seed
    ///
    /// The engine's config must already be valid. The score picks up where
    /// the store left it; the high score is never below that, and a raised
    /// high score is written back.
    pub fn with_engine(mut engine: GameEngine, store: Box<dyn KeyValueStore>) -> Self {
        let difficulty = engine.config().difficulty;
        let mut state = engine.reset();

        let stored_score = read_count(store.as_ref(), SCORE_KEY);
        let stored_high_score = read_count(store.as_ref(), HIGH_SCORE_KEY);
        state.score = stored_score;

        debug!(
            score = stored_score,
            high_score = stored_high_score,
            "loaded scores from store"
        );

        let mut game = Self {
            engine,
            state,
            pending_direction: None,
            high_score: stored_high_score.max(stored_score),
            high_score_announced: false,
            difficulty,
            store,
        };

        if stored_score > stored_high_score {
            game.persist(HIGH_SCORE_KEY, stored_score);
        }

        game
    }

    /// Advance the game by one step
    ///
    /// Once the game is over this does nothing until [`GameLoop::restart`].
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.state.is_running() {
            return events;
        }

        let turn = self.pending_direction.take();
        let result = self.engine.step(&self.state, turn);
        self.state = result.state;

        if let Some(collision) = result.info.collision_type {
            info!(
                score = self.state.score,
                steps = self.state.steps,
                ?collision,
                "game over"
            );
            events.push(GameEvent::GameOver {
                score: self.state.score,
                collision,
            });
        } else if result.info.ate_food {
            let score = self.state.score;
            debug!(score, length = self.state.snake.len(), "food eaten");
            self.persist(SCORE_KEY, score);
            events.push(GameEvent::FoodEaten { score });

            if score > self.high_score {
                self.high_score = score;
                self.persist(HIGH_SCORE_KEY, score);

                if !self.high_score_announced {
                    self.high_score_announced = true;
                    info!(score, "new high score");
                    events.push(GameEvent::NewHighScore { score });
                }
            }
        }

        events
    }

    /// Ask for a new heading on the next tick
    ///
    /// Returns false, leaving any earlier request in place, when the game is
    /// over or when `direction` is the reverse of the heading the snake is
    /// actually moving in.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if !self.state.is_running() || self.state.snake.direction.is_opposite(direction) {
            return false;
        }

        self.pending_direction = Some(direction);
        true
    }

    /// Like [`GameLoop::change_direction`] for a raw `(d_row, d_col)` vector
    ///
    /// Vectors that are not one of the four unit steps are ignored.
    pub fn change_direction_vector(&mut self, d_row: i32, d_col: i32) -> bool {
        match Direction::from_delta(d_row, d_col) {
            Some(direction) => self.change_direction(direction),
            None => false,
        }
    }

    /// Start over with the initial snake and a zero score
    pub fn restart(&mut self) {
        self.state = self.engine.reset();
        self.pending_direction = None;
        self.high_score_announced = false;
        self.persist(SCORE_KEY, 0);

        info!(difficulty = %self.difficulty, "game restarted");
    }

    /// Switch to another difficulty
    ///
    /// Selecting the difficulty that is already active changes nothing.
    /// Otherwise the game restarts if the config asks for it.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> DifficultyChange {
        let changed = difficulty != self.difficulty;
        self.difficulty = difficulty;

        let restarted = changed && self.engine.config().restart_on_difficulty_change;
        if changed {
            info!(%difficulty, restarted, "difficulty changed");
        }
        if restarted {
            self.restart();
        }

        DifficultyChange {
            difficulty,
            tick_interval: difficulty.tick_interval(),
            restarted,
        }
    }

    /// Select a difficulty by name; unknown names are ignored
    pub fn select_difficulty(&mut self, name: &str) -> Option<DifficultyChange> {
        match name.parse::<Difficulty>() {
            Ok(difficulty) => Some(self.set_difficulty(difficulty)),
            Err(err) => {
                debug!(error = %err, "ignoring difficulty selection");
                None
            }
        }
    }

    fn persist(&mut self, key: &str, value: u32) {
        if let Err(err) = write_count(self.store.as_mut(), key, value) {
            warn!(key, value, error = %err, "failed to persist score");
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn tick_interval(&self) -> Duration {
        self.difficulty.tick_interval()
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::from_state(&self.state)
    }

    pub fn view(&self) -> GameView {
        GameView {
            grid: self.snapshot(),
            score: self.state.score,
            high_score: self.high_score,
            status: self.state.status,
            difficulty: self.difficulty,
            boundary: self.engine.config().boundary,
        }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Give the store back, e.g. to hand it to the next session
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }
}
