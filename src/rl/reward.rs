//! Reward shaping
//!
//! Turns the facts of one transition into a scalar learning signal. Rules are
//! checked in priority order:
//!
//! 1. Victory (snake fills the board): `max_growth * 0.1`
//! 2. Step limit exceeded: ends the episode, scored as a game over
//! 3. Game over: `-(max_growth ^ ((grid - size) / max_growth)) * 0.1`,
//!    harsher the shorter the snake died
//! 4. Food eaten: `size / grid`
//! 5. Otherwise a small `±0.1 / size` nudge towards the food

use crate::game::{GameConfig, TransitionInfo, config::INITIAL_SNAKE_LENGTH};

/// Outcome of scoring one transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reward {
    pub value: f32,
    /// Whether the episode ends with this transition
    pub done: bool,
}

/// Why an episode ended, if it did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Victory,
    StepLimit,
    Collision,
}

/// Fixed shaping policy for one board size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardModel {
    grid_size: usize,
    initial_snake_size: usize,
}

impl RewardModel {
    pub fn new(board_size: usize, initial_snake_size: usize) -> Self {
        Self {
            grid_size: board_size * board_size,
            initial_snake_size,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.board_size, INITIAL_SNAKE_LENGTH)
    }

    /// Cells the snake can still grow into from its starting length
    pub fn max_growth(&self) -> usize {
        self.grid_size.saturating_sub(self.initial_snake_size).max(1)
    }

    /// Classify how (and whether) the episode ends
    pub fn termination(
        &self,
        info: &TransitionInfo,
        collided: bool,
        step_limit_exceeded: bool,
    ) -> Option<Termination> {
        if info.snake_size == self.grid_size {
            Some(Termination::Victory)
        } else if step_limit_exceeded {
            Some(Termination::StepLimit)
        } else if collided {
            Some(Termination::Collision)
        } else {
            None
        }
    }

    /// Score one transition
    pub fn reward(
        &self,
        info: &TransitionInfo,
        collided: bool,
        step_limit_exceeded: bool,
    ) -> Reward {
        match self.termination(info, collided, step_limit_exceeded) {
            Some(Termination::Victory) => Reward {
                value: self.victory_reward(),
                done: true,
            },
            Some(Termination::StepLimit | Termination::Collision) => Reward {
                value: self.game_over_penalty(info.snake_size),
                done: true,
            },
            None if info.food_obtained => Reward {
                value: self.food_reward(info.snake_size),
                done: false,
            },
            None => Reward {
                value: self.shaping_reward(info),
                done: false,
            },
        }
    }

    pub fn victory_reward(&self) -> f32 {
        self.max_growth() as f32 * 0.1
    }

    /// Always negative; between `-0.1` (full board) and about
    /// `-0.1 * max_growth` (tiny snake)
    pub fn game_over_penalty(&self, snake_size: usize) -> f32 {
        let max_growth = self.max_growth() as f32;
        let missing = self.grid_size.saturating_sub(snake_size) as f32;
        -max_growth.powf(missing / max_growth) * 0.1
    }

    pub fn food_reward(&self, snake_size: usize) -> f32 {
        snake_size as f32 / self.grid_size as f32
    }

    /// Magnitude of the distance nudge for a snake of `snake_size`
    pub fn shaping_magnitude(&self, snake_size: usize) -> f32 {
        0.1 / snake_size.max(1) as f32
    }

    fn shaping_reward(&self, info: &TransitionInfo) -> f32 {
        let magnitude = self.shaping_magnitude(info.snake_size);
        let before = info.head_before.distance_to(info.food_pos);
        let after = info.head_after.distance_to(info.food_pos);
        if after < before { magnitude } else { -magnitude }
    }
}
