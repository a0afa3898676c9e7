//! Discrete game events for fire-and-forget listeners (sound, HUD).

use std::sync::{Arc, Mutex};

use tracing::info;

use super::board::Board;
use super::engine::TransitionInfo;

/// Notable things that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    FoodEaten,
    GameOver,
    Victory,
}

impl GameEvent {
    /// Events raised by one engine step, in the order they happened
    pub fn from_step(done: bool, info: &TransitionInfo, board: Board) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if info.food_obtained {
            events.push(GameEvent::FoodEaten);
        }
        if info.is_win(board) {
            events.push(GameEvent::Victory);
        } else if done {
            events.push(GameEvent::GameOver);
        }
        events
    }
}

/// Receiver of game events. Return values are never consumed.
pub trait EventSink {
    fn notify(&mut self, event: GameEvent);
}

/// Logs every event at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn notify(&mut self, event: GameEvent) {
        info!(?event, "game event");
    }
}

/// Keeps the events it receives; clones share the same log
#[derive(Debug, Default, Clone)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent event, if any
    pub fn last(&self) -> Option<GameEvent> {
        self.events
            .lock()
            .ok()
            .and_then(|events| events.last().copied())
    }

    /// Drain everything recorded so far
    pub fn take(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

impl EventSink for RecordingEventSink {
    fn notify(&mut self, event: GameEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Cell;

    fn info(snake_size: usize, food_obtained: bool) -> TransitionInfo {
        TransitionInfo {
            snake_size,
            head_before: Cell::new(1, 1),
            head_after: Cell::new(2, 1),
            food_pos: Cell::new(0, 0),
            food_obtained,
        }
    }

    #[test]
    fn test_events_from_step() {
        let board = Board::new(4);
        assert!(GameEvent::from_step(false, &info(3, false), board).is_empty());
        assert_eq!(
            GameEvent::from_step(false, &info(4, true), board),
            vec![GameEvent::FoodEaten]
        );
        assert_eq!(
            GameEvent::from_step(true, &info(2, false), board),
            vec![GameEvent::GameOver]
        );
        assert_eq!(
            GameEvent::from_step(false, &info(16, true), board),
            vec![GameEvent::FoodEaten, GameEvent::Victory]
        );
    }

    #[test]
    fn test_recording_sink_shares_log() {
        let sink = RecordingEventSink::new();
        let mut handle = sink.clone();

        handle.notify(GameEvent::FoodEaten);
        handle.notify(GameEvent::GameOver);

        assert_eq!(sink.last(), Some(GameEvent::GameOver));
        assert_eq!(sink.take(), vec![GameEvent::FoodEaten, GameEvent::GameOver]);
        assert_eq!(sink.last(), None);
    }
}
