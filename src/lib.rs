//! Snake as a reinforcement-learning environment
//!
//! This library provides:
//! - Core game logic with a deterministic, per-instance food stream (game module)
//! - Reward shaping, image observations and batched environments (rl module)
//! - A terminal front end for human play (render, input and modes modules)
//! - Episode statistics for headless rollouts (metrics module)

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;

pub use error::{Result, SnakeError};
