//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! It can be used programmatically for both human play and RL training.

pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod events;
pub mod food;
pub mod free_cells;
pub mod oracle;
pub mod state;

// Re-export commonly used types
pub use action::{ACTION_COUNT, Action, Direction};
pub use board::{Board, Cell};
pub use config::GameConfig;
pub use engine::{GameEngine, TransitionInfo};
pub use events::{EventSink, GameEvent, RecordingEventSink, TracingEventSink};
pub use free_cells::FreeCells;
pub use oracle::{action_mask, is_valid};
pub use state::{GameState, Snake};
