//! A batch of independent Snake environments stepped in lockstep.
//!
//! Each environment owns its engine and food stream; nothing is shared
//! between them, so batches can also be split across threads freely.

use burn::tensor::{Tensor, backend::Backend};
use tracing::debug;

use super::environment::{EnvStep, SnakeEnvironment};
use crate::error::{Result, SnakeError};
use crate::game::{ACTION_COUNT, GameConfig};

pub struct VecSnakeEnvironment<B: Backend> {
    envs: Vec<SnakeEnvironment<B>>,
}

impl<B: Backend> VecSnakeEnvironment<B> {
    /// `count` environments seeded `config.seed`, `config.seed + 1`, ...
    pub fn new(config: GameConfig, count: usize, device: B::Device) -> Result<Self> {
        let seeds: Vec<u64> = (0..count as u64)
            .map(|offset| config.seed.wrapping_add(offset))
            .collect();
        Self::with_seeds(config, &seeds, device)
    }

    /// One environment per seed
    pub fn with_seeds(config: GameConfig, seeds: &[u64], device: B::Device) -> Result<Self> {
        if seeds.is_empty() {
            return Err(SnakeError::Configuration(
                "at least one environment is required".to_string(),
            ));
        }
        let envs = seeds
            .iter()
            .map(|&seed| SnakeEnvironment::new(config.clone().with_seed(seed), device.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { envs })
    }

    pub fn len(&self) -> usize {
        self.envs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    pub fn envs(&self) -> &[SnakeEnvironment<B>] {
        &self.envs
    }

    /// Reset every environment, continuing each food stream
    pub fn reset(&mut self) -> Vec<Tensor<B, 3>> {
        self.envs.iter_mut().map(|env| env.reset()).collect()
    }

    /// Step every environment with its own action index.
    ///
    /// Finished environments are reset right away. The returned step still
    /// carries the terminal observation; the first observation of the next
    /// episode is available from [`observations`](Self::observations).
    pub fn step(&mut self, actions: &[usize]) -> Result<Vec<EnvStep<B>>> {
        if actions.len() != self.envs.len() {
            return Err(SnakeError::State(format!(
                "expected {} actions, got {}",
                self.envs.len(),
                actions.len()
            )));
        }

        self.envs
            .iter_mut()
            .zip(actions)
            .enumerate()
            .map(|(index, (env, &action))| {
                let step = env.step(action)?;
                if step.done {
                    debug!(env = index, reward = step.reward, "auto-reset");
                    env.reset();
                }
                Ok(step)
            })
            .collect()
    }

    /// One mask per environment
    pub fn action_masks(&self) -> Vec<[bool; ACTION_COUNT]> {
        self.envs.iter().map(|env| env.action_mask()).collect()
    }

    pub fn observations(&self) -> Vec<Tensor<B, 3>> {
        self.envs.iter().map(|env| env.observation()).collect()
    }
}
