use super::config::BoundaryPolicy;
use super::difficulty::Difficulty;
use super::state::{Cell, GameState, GameStatus};

/// What occupies a grid cell, as far as presentation cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    #[default]
    Empty,
    Body,
    Head,
    Food,
}

/// Row-major occupancy of the whole board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    size: usize,
    cells: Vec<CellKind>,
}

impl GridSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let size = state.board_size;
        let mut snapshot = Self {
            size,
            cells: vec![CellKind::Empty; size * size],
        };

        if let Some(food) = state.food {
            snapshot.mark(food, CellKind::Food);
        }
        for &segment in state.snake.body.iter().skip(1) {
            snapshot.mark(segment, CellKind::Body);
        }
        snapshot.mark(state.snake.head(), CellKind::Head);

        snapshot
    }

    fn mark(&mut self, cell: Cell, kind: CellKind) {
        if let Some(index) = self.index(cell) {
            self.cells[index] = kind;
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let size = self.size as i32;
        if cell.row < 0 || cell.row >= size || cell.col < 0 || cell.col >= size {
            return None;
        }
        Some(cell.row as usize * self.size + cell.col as usize)
    }

    /// Kind of the cell, `Empty` for anything off the board
    pub fn get(&self, cell: Cell) -> CellKind {
        self.index(cell)
            .map(|index| self.cells[index])
            .unwrap_or(CellKind::Empty)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.size.max(1))
    }
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub grid: GridSnapshot,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    pub difficulty: Difficulty,
    pub boundary: BoundaryPolicy,
}
