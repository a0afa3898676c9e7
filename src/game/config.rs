use serde::{Deserialize, Serialize};

use crate::error::{Result, SnakeError};

/// Smallest accepted board. A 3x3 board fits the starting snake, but the
/// victory reward only dominates every food reward from 4x4 up.
pub const MIN_BOARD_SIZE: usize = 4;

/// Length of the snake after a reset
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points awarded per food
pub const FOOD_SCORE: u32 = 10;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board
    pub board_size: usize,
    /// Seed for food placement
    pub seed: u64,
    /// End episodes that go `4 * board_size^2` steps without eating
    pub limit_step: bool,
    /// Side length of the encoded observation frame
    pub observation_size: usize,
    /// Reject action indices outside 0..=3 instead of treating them as
    /// "keep going"
    pub strict_actions: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 12,
            seed: 0,
            limit_step: true,
            observation_size: 84,
            strict_actions: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    ///
    /// The observation frame keeps its default size when the board divides
    /// it, otherwise it is scaled to the nearest multiple of the board.
    pub fn new(board_size: usize) -> Self {
        let default = Self::default();
        let observation_size = if board_size > 0 && default.observation_size % board_size != 0 {
            board_size * (default.observation_size / board_size).max(1)
        } else {
            default.observation_size
        };
        Self {
            board_size,
            observation_size,
            ..default
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(6)
    }

    /// Create a large board
    pub fn large() -> Self {
        Self::new(20)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Total number of cells on the board
    pub fn grid_size(&self) -> usize {
        self.board_size * self.board_size
    }

    /// Steps allowed between two meals, if limited
    pub fn step_limit(&self) -> Option<usize> {
        self.limit_step.then(|| self.grid_size() * 4)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(SnakeError::Configuration(format!(
                "board_size must be at least {}, got {}",
                MIN_BOARD_SIZE, self.board_size
            )));
        }

        if self.observation_size == 0 || self.observation_size % self.board_size != 0 {
            return Err(SnakeError::Configuration(format!(
                "observation_size ({}) must be a positive multiple of board_size ({})",
                self.observation_size, self.board_size
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 12);
        assert_eq!(config.observation_size, 84);
        assert!(config.limit_step);
        assert!(!config.strict_actions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(7);
        assert_eq!(config.board_size, 7);
        assert_eq!(config.observation_size, 84);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_observation_size_follows_board() {
        assert_eq!(GameConfig::small().observation_size, 84);
        assert_eq!(GameConfig::large().observation_size, 80);
        assert_eq!(GameConfig::new(5).observation_size, 80);
        assert!(GameConfig::large().validate().is_ok());
    }

    #[test]
    fn test_board_too_small() {
        for size in 0..MIN_BOARD_SIZE {
            let config = GameConfig {
                board_size: size,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(SnakeError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_observation_size_must_divide() {
        let config = GameConfig {
            board_size: 12,
            observation_size: 90,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_step_limit() {
        assert_eq!(GameConfig::default().step_limit(), Some(576));
        let unlimited = GameConfig {
            limit_step: false,
            ..Default::default()
        };
        assert_eq!(unlimited.step_limit(), None);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: GameConfig = serde_json::from_str(r#"{"board_size": 8, "seed": 5}"#).unwrap();
        assert_eq!(config.board_size, 8);
        assert_eq!(config.seed, 5);
        assert_eq!(config.observation_size, 84);
    }
}
