//! Headless rollout mode
//!
//! Plays whole episodes in a [`SnakeEnvironment`] with a uniformly random
//! policy restricted to the action mask, and reports episode statistics.
//! Useful as a smoke test of the environment and as a random-policy
//! baseline.
//!
//! # Example
//!
//! ```rust
//! use snake_env::game::GameConfig;
//! use snake_env::modes::{RolloutConfig, RolloutMode};
//! use snake_env::rl::{InferenceBackend, default_device};
//!
//! let config = RolloutConfig::new(3, GameConfig::small());
//! let mut rollout = RolloutMode::<InferenceBackend>::new(config, default_device())?;
//! let summary = rollout.run()?;
//! assert_eq!(summary.episodes, 3);
//! # Ok::<(), snake_env::SnakeError>(())
//! ```

use burn::tensor::backend::Backend;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::error::Result;
use crate::game::{ACTION_COUNT, GameConfig};
use crate::metrics::{EpisodeRecord, EpisodeStats, EpisodeSummary};
use crate::rl::SnakeEnvironment;

/// Configuration for rollout mode
#[derive(Debug, Clone)]
pub struct RolloutConfig {
    /// Number of episodes to play
    pub num_episodes: usize,

    /// Log progress every N episodes
    pub log_frequency: usize,

    /// Seed of the policy's own RNG, independent of the food stream
    pub policy_seed: u64,

    pub game_config: GameConfig,
}

impl RolloutConfig {
    pub fn new(num_episodes: usize, game_config: GameConfig) -> Self {
        Self {
            num_episodes,
            log_frequency: 100,
            policy_seed: game_config.seed,
            game_config,
        }
    }
}

pub struct RolloutMode<B: Backend> {
    env: SnakeEnvironment<B>,
    stats: EpisodeStats,
    rng: ChaCha8Rng,
    config: RolloutConfig,
}

impl<B: Backend> RolloutMode<B> {
    pub fn new(config: RolloutConfig, device: B::Device) -> Result<Self> {
        let env = SnakeEnvironment::new(config.game_config.clone(), device)?;
        Ok(Self {
            env,
            // Rolling window over the last 100 episodes
            stats: EpisodeStats::new(100),
            rng: ChaCha8Rng::seed_from_u64(config.policy_seed),
            config,
        })
    }

    /// Play every configured episode and return the aggregate statistics
    pub fn run(&mut self) -> Result<EpisodeSummary> {
        let board_size = self.config.game_config.board_size;
        info!(
            episodes = self.config.num_episodes,
            board_size,
            seed = self.config.game_config.seed,
            "starting rollout"
        );

        for episode in 0..self.config.num_episodes {
            let record = self.run_episode()?;
            debug!(
                episode,
                episode_return = record.episode_return,
                length = record.length,
                score = record.score,
                victory = record.victory,
                "episode done"
            );
            self.stats.record(record);

            let log_frequency = self.config.log_frequency.max(1);
            if (episode + 1) % log_frequency == 0 {
                info!(
                    "[Episode {}/{}] {}",
                    episode + 1,
                    self.config.num_episodes,
                    self.stats.format_summary()
                );
            }
        }

        info!("rollout complete: {}", self.stats.format_summary());
        Ok(self.stats.summary())
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    /// Play one episode from a fresh reset
    fn run_episode(&mut self) -> Result<EpisodeRecord> {
        self.env.reset();
        let mut episode_return = 0.0;
        let mut length = 0;

        loop {
            let action = self.select_action();
            let step = self.env.step(action)?;
            episode_return += step.reward;
            length += 1;

            if step.done {
                let state = self.env.state();
                return Ok(EpisodeRecord {
                    episode_return,
                    length,
                    score: state.score(),
                    snake_size: step.info.snake_size,
                    victory: step.info.is_win(state.board()),
                });
            }
        }
    }

    /// Uniform over the safe actions; any action when none is safe
    fn select_action(&mut self) -> usize {
        let mask = self.env.action_mask();
        let valid: Vec<usize> = (0..ACTION_COUNT).filter(|&a| mask[a]).collect();
        if valid.is_empty() {
            self.rng.gen_range(0..ACTION_COUNT)
        } else {
            valid[self.rng.gen_range(0..valid.len())]
        }
    }
}
