//! Rolling episode statistics for headless rollouts
//!
//! Tracks returns, lengths, scores and final snake sizes over a window of
//! recent episodes, plus running totals.

use std::collections::VecDeque;

use serde::Serialize;

/// Outcome of one finished episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EpisodeRecord {
    /// Sum of rewards over the episode
    pub episode_return: f32,
    /// Steps taken
    pub length: usize,
    /// Game score (10 per food)
    pub score: u32,
    /// Snake length when the episode ended
    pub snake_size: usize,
    pub victory: bool,
}

/// Episode statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use snake_env::metrics::{EpisodeRecord, EpisodeStats};
///
/// let mut stats = EpisodeStats::new(100);
/// stats.record(EpisodeRecord {
///     episode_return: 1.5,
///     length: 150,
///     score: 50,
///     snake_size: 8,
///     victory: false,
/// });
///
/// assert_eq!(stats.total_episodes(), 1);
/// assert_eq!(stats.total_steps(), 150);
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    returns: VecDeque<f32>,
    lengths: VecDeque<usize>,
    scores: VecDeque<u32>,
    snake_sizes: VecDeque<usize>,
    total_episodes: usize,
    total_steps: usize,
    victories: usize,
    best_score: u32,
    window_size: usize,
}

/// Aggregate view, suitable for printing as JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub episodes: usize,
    pub steps: usize,
    pub victories: usize,
    pub best_score: u32,
    pub mean_return: f32,
    pub mean_length: f32,
    pub mean_score: f32,
    pub mean_snake_size: f32,
}

impl EpisodeStats {
    /// Create a tracker keeping the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            returns: VecDeque::with_capacity(window_size),
            lengths: VecDeque::with_capacity(window_size),
            scores: VecDeque::with_capacity(window_size),
            snake_sizes: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            victories: 0,
            best_score: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    pub fn record(&mut self, episode: EpisodeRecord) {
        Self::push_deque(&mut self.returns, episode.episode_return, self.window_size);
        Self::push_deque(&mut self.lengths, episode.length, self.window_size);
        Self::push_deque(&mut self.scores, episode.score, self.window_size);
        Self::push_deque(&mut self.snake_sizes, episode.snake_size, self.window_size);
        self.total_episodes += 1;
        self.total_steps += episode.length;
        self.best_score = self.best_score.max(episode.score);
        if episode.victory {
            self.victories += 1;
        }
    }

    pub fn mean_return(&self) -> f32 {
        Self::mean(self.returns.iter().copied())
    }

    pub fn mean_length(&self) -> f32 {
        Self::mean(self.lengths.iter().map(|&length| length as f32))
    }

    pub fn mean_score(&self) -> f32 {
        Self::mean(self.scores.iter().map(|&score| score as f32))
    }

    pub fn mean_snake_size(&self) -> f32 {
        Self::mean(self.snake_sizes.iter().map(|&size| size as f32))
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn victories(&self) -> usize {
        self.victories
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary {
            episodes: self.total_episodes,
            steps: self.total_steps,
            victories: self.victories,
            best_score: self.best_score,
            mean_return: self.mean_return(),
            mean_length: self.mean_length(),
            mean_score: self.mean_score(),
            mean_snake_size: self.mean_snake_size(),
        }
    }

    /// One-line summary of the rolling window
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Return: {:.2} | Score: {:.2} | Len: {:.1} | Size: {:.1} | Best: {} | Wins: {}",
            self.total_episodes,
            self.total_steps,
            self.mean_return(),
            self.mean_score(),
            self.mean_length(),
            self.mean_snake_size(),
            self.best_score,
            self.victories,
        )
    }

    fn mean(values: impl ExactSizeIterator<Item = f32>) -> f32 {
        let count = values.len();
        if count == 0 {
            0.0
        } else {
            values.sum::<f32>() / count as f32
        }
    }

    /// Helper function to push to a deque with size limit
    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
