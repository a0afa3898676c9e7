//! Reinforcement learning environment for Snake game
//!
//! Provides:
//! - RGB frame observations (head, fading body, tail, food)
//! - Shaped rewards
//! - Burn-compatible RL environment interface with action masks
//! - Batches of independent environments

pub mod backend;
pub mod environment;
pub mod observation;
pub mod reward;
pub mod vec_env;

pub use backend::{InferenceBackend, default_device};
pub use environment::{EnvStep, SnakeEnvironment};
pub use observation::{Observation, create_observation};
pub use reward::{Reward, RewardModel, Termination};
pub use vec_env::VecSnakeEnvironment;
