//! Error types raised by the game engine and the RL environment.

use thiserror::Error;

/// Errors surfaced by the engine, the environment and config validation.
///
/// Reaching a terminal state is not an error: `step` reports it through its
/// `done` flag. Only stepping *past* it is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnakeError {
    #[error("invalid action index {index}, expected 0..=3")]
    InvalidAction { index: usize },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("invalid state: {0}")]
    State(String),
}

pub type Result<T> = std::result::Result<T, SnakeError>;
