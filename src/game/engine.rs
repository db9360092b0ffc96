use super::{
    action::Direction,
    config::{BoundaryPolicy, GameConfig},
    state::{Cell, CollisionType, GameState, GameStatus, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Random draws tried before falling back to scanning for free cells
const MAX_FOOD_ATTEMPTS: usize = 256;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// State after the step
    pub state: GameState,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game rules
///
/// `step` never touches the state it is given; it hands back the next one.
/// The only thing the engine mutates is its random generator.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    ///
    /// The config must pass [`GameConfig::validate`]; an empty board panics
    /// on the first food draw. [`crate::game::GameLoop::new`] checks this.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Same as [`GameEngine::new`] but with a reproducible food sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the starting state: canonical snake, fresh food, score 0
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::initial(self.config.initial_snake_length);
        let food = self.spawn_food_avoid_snake(&snake);

        GameState::new(snake, food, self.config.board_size)
    }

    /// Execute one tick, optionally turning first
    ///
    /// A turn that would reverse the snake onto its neck is ignored.
    pub fn step(&mut self, state: &GameState, turn: Option<Direction>) -> StepResult {
        if !state.is_running() {
            return StepResult {
                state: state.clone(),
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: None,
                },
            };
        }

        let mut next = state.clone();
        next.steps += 1;

        let heading = match turn {
            Some(direction) if !state.snake.direction.is_opposite(direction) => direction,
            _ => state.snake.direction,
        };

        let new_head = match self.next_head(state, heading) {
            Ok(cell) => cell,
            Err(collision_type) => return Self::collided(next, collision_type),
        };

        if state.is_occupied_by_snake(new_head) {
            return Self::collided(next, CollisionType::SelfCollision);
        }

        let ate_food = state.food == Some(new_head);

        next.snake.direction = heading;
        next.snake.advance(new_head, ate_food);

        if ate_food {
            next.score += 1;
            next.food = self.spawn_food_avoid_snake(&next.snake);
        }

        StepResult {
            state: next,
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }

    /// Where the head lands, or the wall it hit
    fn next_head(&self, state: &GameState, heading: Direction) -> Result<Cell, CollisionType> {
        let moved = state.snake.head().moved_in_direction(heading);

        match self.config.boundary {
            BoundaryPolicy::Wrap => Ok(moved.wrapped(state.board_size)),
            BoundaryPolicy::Wall if state.is_in_bounds(moved) => Ok(moved),
            BoundaryPolicy::Wall => Err(CollisionType::Wall),
        }
    }

    /// The snake stays exactly as it was before the fatal move
    fn collided(mut next: GameState, collision_type: CollisionType) -> StepResult {
        next.status = GameStatus::GameOver;

        StepResult {
            state: next,
            terminated: true,
            info: StepInfo {
                ate_food: false,
                collision_type: Some(collision_type),
            },
        }
    }

    /// Spawn food at a random empty cell
    ///
    /// Draws uniformly and rejects cells under the snake. If that keeps
    /// failing (a nearly full board) the free cells are listed and one is
    /// picked from them. A full board gets no food at all.
    pub fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Option<Cell> {
        let size = self.config.board_size;

        for _ in 0..MAX_FOOD_ATTEMPTS {
            let row = self.rng.gen_range(0..size) as i32;
            let col = self.rng.gen_range(0..size) as i32;
            let cell = Cell::new(row, col);

            if !snake.occupies(cell) {
                return Some(cell);
            }
        }

        let free: Vec<Cell> = (0..size as i32)
            .flat_map(|row| (0..size as i32).map(move |col| Cell::new(row, col)))
            .filter(|cell| !snake.occupies(*cell))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}
