use super::observation::Observation;
use super::reward::RewardModel;
use crate::error::{Result, SnakeError};
use crate::game::{
    ACTION_COUNT, Action, EventSink, GameConfig, GameEngine, GameEvent, GameState, TransitionInfo,
    action_mask,
};
use burn::tensor::{Tensor, backend::Backend};
use tracing::debug;

/// Result of one environment step
#[derive(Debug, Clone)]
pub struct EnvStep<B: Backend> {
    /// Tensor<B, 3> with shape [size, size, 3]
    pub observation: Tensor<B, 3>,
    pub reward: f32,
    /// Episode finished: collision, full board or step limit
    pub done: bool,
    pub info: TransitionInfo,
}

/// Snake environment for reinforcement learning
///
/// Wraps the game engine and provides a Burn-compatible RL interface with:
/// - Tensor observations (RGB frame, channels last)
/// - Discrete action space (0: Up, 1: Left, 2: Right, 3: Down)
/// - Shaped rewards and an optional step limit between meals
/// - Action masks for masked policies
pub struct SnakeEnvironment<B: Backend> {
    engine: GameEngine,
    rewards: RewardModel,
    device: B::Device,
    steps_since_food: usize,
    done: bool,
    events: Option<Box<dyn EventSink + Send>>,
}

impl<B: Backend> SnakeEnvironment<B> {
    /// Create a new Snake environment, reset with `config.seed`
    pub fn new(config: GameConfig, device: B::Device) -> Result<Self> {
        let rewards = RewardModel::from_config(&config);
        let engine = GameEngine::new(config)?;
        Ok(Self {
            engine,
            rewards,
            device,
            steps_since_food: 0,
            done: false,
            events: None,
        })
    }

    /// Forward food/game-over/victory events to `sink`
    pub fn with_event_sink(mut self, sink: impl EventSink + Send + 'static) -> Self {
        self.events = Some(Box::new(sink));
        self
    }

    /// Start a new episode, continuing the food stream
    pub fn reset(&mut self) -> Tensor<B, 3> {
        self.engine.reset();
        self.begin_episode()
    }

    /// Start a new episode with the food stream reseeded
    pub fn reset_with_seed(&mut self, seed: u64) -> Tensor<B, 3> {
        self.engine.reset_with_seed(seed);
        self.begin_episode()
    }

    fn begin_episode(&mut self) -> Tensor<B, 3> {
        self.steps_since_food = 0;
        self.done = false;
        self.observation()
    }

    /// Step the environment with a discrete action index
    ///
    /// Indices outside 0..=3 keep the current direction, unless the config
    /// asks for strict actions, in which case they are rejected.
    pub fn step(&mut self, action_index: usize) -> Result<EnvStep<B>> {
        let action = Action::from_index(action_index, self.config().strict_actions)?;
        self.step_action(action)
    }

    /// Step the environment with a game action
    pub fn step_action(&mut self, action: Action) -> Result<EnvStep<B>> {
        if self.done {
            return Err(SnakeError::State(
                "episode is over, call reset before stepping".to_string(),
            ));
        }

        let (collided, info) = self.engine.step(action)?;

        self.steps_since_food += 1;
        let limit_exceeded = self
            .config()
            .step_limit()
            .is_some_and(|limit| self.steps_since_food > limit);

        let reward = self.rewards.reward(&info, collided, limit_exceeded);
        if info.food_obtained || reward.done {
            self.steps_since_food = 0;
        }
        self.done = reward.done;

        if let Some(sink) = self.events.as_mut() {
            for event in GameEvent::from_step(reward.done, &info, self.engine.state().board()) {
                sink.notify(event);
            }
        }

        if reward.done {
            debug!(
                score = self.engine.state().score(),
                size = info.snake_size,
                steps = self.engine.state().steps(),
                limit_exceeded,
                "episode finished"
            );
        }

        Ok(EnvStep {
            observation: self.observation(),
            reward: reward.value,
            done: reward.done,
            info,
        })
    }

    /// Which actions would keep the episode alive
    pub fn action_mask(&self) -> [bool; ACTION_COUNT] {
        if self.done {
            [false; ACTION_COUNT]
        } else {
            action_mask(self.engine.state())
        }
    }

    /// Get current observation without stepping
    ///
    /// Returns: Tensor<B, 3> with shape [size, size, 3]
    pub fn observation(&self) -> Tensor<B, 3> {
        self.frame().to_tensor(&self.device)
    }

    /// Current observation as raw RGB bytes
    pub fn frame(&self) -> Observation {
        Observation::encode(self.engine.state(), self.config().observation_size)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn reward_model(&self) -> &RewardModel {
        &self.rewards
    }

    /// Get the device used by this environment
    pub fn device(&self) -> &B::Device {
        &self.device
    }

    /// Read-only view of the current game
    pub fn state(&self) -> &GameState {
        self.engine.state()
    }
}
