use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_env::game::GameConfig;
use snake_env::modes::{HumanMode, RolloutConfig, RolloutMode};
use snake_env::rl::{InferenceBackend, default_device};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_env")]
#[command(version, about = "Snake as a reinforcement-learning environment")]
struct Cli {
    /// What to run
    #[arg(long, value_enum, default_value_t = Mode::Human)]
    mode: Mode,

    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square board
    #[arg(long)]
    board_size: Option<usize>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Episodes to play in rollout mode
    #[arg(long, default_value_t = 100)]
    episodes: usize,

    /// Never end an episode for going too long without food
    #[arg(long)]
    no_step_limit: bool,

    /// Reject action indices outside 0..=3
    #[arg(long)]
    strict_actions: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Run random masked-action episodes headless and print statistics
    Rollout,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GameConfig::default(),
        };

        if let Some(board_size) = self.board_size {
            // Let GameConfig pick a matching frame size
            let base = GameConfig::new(board_size);
            config.board_size = base.board_size;
            config.observation_size = base.observation_size;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.no_step_limit {
            config.limit_step = false;
        }
        if self.strict_actions {
            config.strict_actions = true;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse config file {:?}", path))
}

fn init_tracing(mode: Mode) {
    // Keep the alternate screen quiet unless RUST_LOG asks otherwise
    let default_level = match mode {
        Mode::Human => "warn",
        Mode::Rollout => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.mode);

    let config = cli.game_config()?;

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Rollout => {
            let rollout_config = RolloutConfig::new(cli.episodes, config);
            let mut rollout =
                RolloutMode::<InferenceBackend>::new(rollout_config, default_device())?;
            let summary = rollout.run()?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
