use serde::{Deserialize, Serialize};

use crate::error::{Result, SnakeError};

/// Number of discrete actions exposed to an agent
pub const ACTION_COUNT: usize = 4;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Directions in action-index order: 0=Up, 1=Left, 2=Right, 3=Down
    pub const ALL: [Direction; ACTION_COUNT] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (d_row, d_col) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Direction the snake actually takes when `requested` arrives while
    /// heading `self`. Reversals are ignored.
    pub fn resolve(self, requested: Direction) -> Direction {
        if self.is_opposite(requested) {
            self
        } else {
            requested
        }
    }

    /// Discrete action index of this direction
    pub fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Left => 1,
            Direction::Right => 2,
            Direction::Down => 3,
        }
    }
}

/// Action that can be taken in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move in a specific direction
    Move(Direction),
    /// Keep the current direction (the "no input this tick" sentinel)
    Continue,
}

impl Action {
    /// Map a discrete action index to an action.
    ///
    /// With `strict` unset, indices outside `0..=3` fall back to
    /// [`Action::Continue`]; with it set they are rejected.
    pub fn from_index(index: usize, strict: bool) -> Result<Action> {
        match Direction::ALL.get(index) {
            Some(&direction) => Ok(Action::Move(direction)),
            None if strict => Err(SnakeError::InvalidAction { index }),
            None => Ok(Action::Continue),
        }
    }

    /// Direction the snake will head in after this action
    pub fn resolve(&self, current: Direction) -> Direction {
        match self {
            Action::Move(requested) => current.resolve(*requested),
            Action::Continue => current,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}
