use super::action::Direction;

/// A cell on the game grid, addressed by row then column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move cell by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }

    /// Fold the cell back onto a square board of the given size
    pub fn wrapped(&self, board_size: usize) -> Self {
        let size = board_size as i32;
        Self {
            row: self.row.rem_euclid(size),
            col: self.col.rem_euclid(size),
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
    /// Direction the snake moved in on the last tick
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting cell and direction
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (d_row, d_col) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-d_row, -d_col));
        }

        Self { body, direction }
    }

    /// The starting snake: along the top row, head rightmost, heading right.
    ///
    /// With length 3 this is `[(0,2), (0,1), (0,0)]`.
    pub fn initial(length: usize) -> Self {
        let head_col = length.max(1) as i32 - 1;
        Self::new(Cell::new(0, head_col), Direction::Right, length)
    }

    /// Get the head cell
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Check if any segment, head and tail included, sits on the cell
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Put a new head in front; drop the tail unless growing
    pub fn advance(&mut self, new_head: Cell, should_grow: bool) {
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board with walls enabled
    Wall,
    /// Snake ran into itself
    SelfCollision,
}

/// Whether the game is still being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Running,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the snake covers every cell
    pub food: Option<Cell>,
    pub board_size: usize,
    pub score: u32,
    pub steps: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Option<Cell>, board_size: usize) -> Self {
        Self {
            snake,
            food,
            board_size,
            score: 0,
            steps: 0,
            status: GameStatus::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Check if a cell is within the grid bounds
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        let size = self.board_size as i32;
        cell.row >= 0 && cell.row < size && cell.col >= 0 && cell.col < size
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.occupies(cell)
    }
}
