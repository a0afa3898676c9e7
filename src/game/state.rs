use std::collections::VecDeque;

use super::action::Direction;
use super::board::{Board, Cell};
use super::free_cells::FreeCells;

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Cell>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake from its segments, head first
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        Self {
            body: cells.into_iter().collect(),
            direction,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Segment right behind the head, if any
    pub fn neck(&self) -> Option<Cell> {
        self.body.get(1).copied()
    }

    /// Segments from head to tail
    pub fn cells(&self) -> impl DoubleEndedIterator<Item = Cell> + ExactSizeIterator + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a live game)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        self.body.pop_back()
    }
}

/// Complete game state, owned by a [`GameEngine`](super::GameEngine)
///
/// Renderers and other collaborators only ever see it through `&GameState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) snake: Snake,
    pub(crate) free: FreeCells,
    pub(crate) food: Cell,
    pub(crate) score: u32,
    pub(crate) steps: u32,
    pub(crate) collided: bool,
}

impl GameState {
    /// Build a state around an existing snake.
    ///
    /// Free cells are derived once here from the snake; from then on the
    /// engine keeps them in sync incrementally.
    pub fn new(board: Board, snake: Snake, food: Cell) -> Self {
        let mut free = FreeCells::full(board);
        for cell in snake.cells() {
            free.remove(cell);
        }
        Self {
            board,
            snake,
            free,
            food,
            score: 0,
            steps: 0,
            collided: false,
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn free_cells(&self) -> &FreeCells {
        &self.free
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Snake covers every cell
    pub fn is_won(&self) -> bool {
        self.snake.len() == self.board.cell_count()
    }

    /// Snake hit a wall or itself
    pub fn is_collided(&self) -> bool {
        self.collided
    }

    /// No further steps are possible until the next reset
    pub fn is_over(&self) -> bool {
        self.collided || self.is_won()
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.board.contains(cell) && !self.free.contains(cell)
    }
}
