//! Action validity oracle.
//!
//! Predicts, without touching the state, whether an action would end the
//! game on the next step. Builds the action masks handed to agents, so it
//! must agree exactly with [`GameEngine::step`](super::GameEngine::step).

use super::action::{ACTION_COUNT, Action, Direction};
use super::state::GameState;

/// Would `action` keep the game running?
///
/// Always false once the game is over, since no step is possible then.
pub fn is_valid(state: &GameState, action: Action) -> bool {
    if state.is_over() {
        return false;
    }

    let snake = state.snake();
    let direction = action.resolve(snake.direction);
    let head = snake.head().moved_in_direction(direction);

    if !state.board().contains(head) {
        return false;
    }

    // Without food the tail moves away this step, so it does not block.
    if head == state.food() {
        !state.is_occupied_by_snake(head)
    } else {
        !state.is_occupied_by_snake(head) || head == snake.tail()
    }
}

/// Validity of every discrete action, indexed 0=Up, 1=Left, 2=Right, 3=Down
pub fn action_mask(state: &GameState) -> [bool; ACTION_COUNT] {
    Direction::ALL.map(|direction| is_valid(state, Action::Move(direction)))
}
