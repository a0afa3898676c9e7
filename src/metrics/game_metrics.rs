use std::time::{Duration, Instant};

/// Per-session tallies for the TUI header.
///
/// The clock runs from `start_game` until `finish_game` and then stays frozen
/// on the final time until the next game starts.
#[derive(Debug, Clone)]
pub struct GameMetrics {
    running_since: Option<Instant>,
    elapsed: Duration,
    best_score: u32,
    games: u32,
    wins: u32,
}

impl GameMetrics {
    /// Metrics with the first game's clock already running
    pub fn new() -> Self {
        Self {
            running_since: Some(Instant::now()),
            elapsed: Duration::ZERO,
            best_score: 0,
            games: 0,
            wins: 0,
        }
    }

    pub fn start_game(&mut self) {
        self.running_since = Some(Instant::now());
        self.elapsed = Duration::ZERO;
    }

    /// Refresh the displayed time; no-op while the clock is stopped
    pub fn tick(&mut self) {
        if let Some(start) = self.running_since {
            self.elapsed = start.elapsed();
        }
    }

    pub fn finish_game(&mut self, score: u32, won: bool) {
        self.tick();
        self.running_since = None;
        self.games += 1;
        self.wins += u32::from(won);
        self.best_score = self.best_score.max(score);
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Elapsed game time as `MM:SS`
    pub fn clock(&self) -> String {
        let secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
