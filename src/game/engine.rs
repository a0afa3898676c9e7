use super::{
    action::{Action, Direction},
    board::{Board, Cell},
    config::{FOOD_SCORE, GameConfig, INITIAL_SNAKE_LENGTH},
    food::{FOOD_SENTINEL, FoodSelector},
    state::{GameState, Snake},
};
use crate::error::{Result, SnakeError};
use tracing::debug;

/// Facts about one completed step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionInfo {
    /// Snake length after the step
    pub snake_size: usize,
    /// Head before the move
    pub head_before: Cell,
    /// Cell the head moved into. May lie off the board when the step ended
    /// the game against a wall.
    pub head_after: Cell,
    /// Food position after the step
    pub food_pos: Cell,
    /// Whether the snake ate this step
    pub food_obtained: bool,
}

impl TransitionInfo {
    /// The snake now covers every cell of `board`
    pub fn is_win(&self, board: Board) -> bool {
        self.snake_size == board.cell_count()
    }
}

/// The game engine: owns one game state and its food stream
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    food: FoodSelector,
    state: GameState,
}

impl GameEngine {
    /// Create a new game engine and reset it with `config.seed`
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let mut food = FoodSelector::new(config.seed);
        let state = Self::initial_state(&config, &mut food);
        Ok(Self {
            config,
            food,
            state,
        })
    }

    /// Create an engine that resumes from a prepared state
    pub fn with_state(config: GameConfig, state: GameState) -> Result<Self> {
        config.validate()?;
        if state.board().size() != config.board_size {
            return Err(SnakeError::Configuration(format!(
                "state board size {} does not match configured {}",
                state.board().size(),
                config.board_size
            )));
        }
        if state.snake().is_empty()
            || state
                .snake()
                .cells()
                .any(|cell| !state.board().contains(cell))
        {
            return Err(SnakeError::State(
                "snake must be non-empty and lie on the board".to_string(),
            ));
        }
        // Repeated segments leave more free cells than the board can spare
        if state.free_cells().len() + state.snake().len() != state.board().cell_count() {
            return Err(SnakeError::State(
                "snake segments must be distinct".to_string(),
            ));
        }
        let food_ok = if state.is_won() {
            state.food() == FOOD_SENTINEL
        } else {
            state.free_cells().contains(state.food())
        };
        if !food_ok {
            return Err(SnakeError::State(format!(
                "food at {:?} must lie on a free cell",
                state.food()
            )));
        }
        let food = FoodSelector::new(config.seed);
        Ok(Self {
            config,
            food,
            state,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the current game
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Start a new game, continuing the current food stream
    pub fn reset(&mut self) -> &GameState {
        self.state = Self::initial_state(&self.config, &mut self.food);
        &self.state
    }

    /// Start a new game with the food stream restarted from `seed`
    pub fn reset_with_seed(&mut self, seed: u64) -> &GameState {
        self.food.reseed(seed);
        self.reset()
    }

    fn initial_state(config: &GameConfig, food: &mut FoodSelector) -> GameState {
        let board = Board::new(config.board_size);
        let col = (config.board_size / 2) as i32;
        let top = ((config.board_size - INITIAL_SNAKE_LENGTH) / 2) as i32;

        // Vertical segment heading down, head at the bottom
        let snake = Snake::from_cells(
            (0..INITIAL_SNAKE_LENGTH as i32)
                .rev()
                .map(|offset| Cell::new(top + offset, col)),
            Direction::Down,
        );

        let mut state = GameState::new(board, snake, FOOD_SENTINEL);
        state.food = food.select(&state.free).unwrap_or(FOOD_SENTINEL);
        state
    }

    /// Execute one step of the game
    ///
    /// Returns `done = true` when the head left the board or ran into the
    /// body. Filling the board is reported through the state and the
    /// transition, not through `done`.
    pub fn step(&mut self, action: Action) -> Result<(bool, TransitionInfo)> {
        if self.state.is_over() {
            return Err(SnakeError::State(
                "game is over, reset before stepping again".to_string(),
            ));
        }

        let state = &mut self.state;
        state.snake.direction = action.resolve(state.snake.direction);

        let head_before = state.snake.head();
        let head = head_before.moved_in_direction(state.snake.direction);

        let food_obtained = head == state.food;
        if food_obtained {
            state.score += FOOD_SCORE;
        } else if let Some(tail) = state.snake.pop_tail() {
            state.free.insert(tail);
        }

        // The vacated tail is already free here, so a non-growing snake can
        // follow its own tail.
        let done = !state.board.contains(head) || !state.free.contains(head);

        if done {
            state.collided = true;
            debug!(?head, score = state.score, "snake collided");
        } else {
            state.snake.push_head(head);
            state.free.remove(head);
        }

        state.steps += 1;

        if food_obtained {
            state.food = match self.food.select(&state.free) {
                Some(cell) => cell,
                None => {
                    debug!(score = state.score, "board filled");
                    FOOD_SENTINEL
                }
            };
            debug!(food = ?state.food, size = state.snake.len(), "food eaten");
        }

        Ok((
            done,
            TransitionInfo {
                snake_size: state.snake.len(),
                head_before,
                head_after: head,
                food_pos: state.food,
                food_obtained,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(
        board_size: usize,
        cells: &[(i32, i32)],
        direction: Direction,
        food: (i32, i32),
    ) -> GameEngine {
        let snake = Snake::from_cells(
            cells.iter().map(|&(row, col)| Cell::new(row, col)),
            direction,
        );
        let state = GameState::new(Board::new(board_size), snake, Cell::new(food.0, food.1));
        GameEngine::with_state(GameConfig::new(board_size), state).unwrap()
    }

    fn assert_partition(state: &GameState) {
        let board = state.board();
        assert_eq!(
            state.free_cells().len() + state.snake().len(),
            board.cell_count()
        );
        for cell in board.cells() {
            assert_ne!(state.free_cells().contains(cell), state.snake().contains(cell));
        }
    }

    #[test]
    fn test_reset() {
        let engine = GameEngine::new(GameConfig::default()).unwrap();
        let state = engine.state();

        assert!(!state.is_over());
        assert_eq!(state.score(), 0);
        assert_eq!(state.steps(), 0);
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.direction(), Direction::Down);
        assert!(state.free_cells().contains(state.food()));
        assert_partition(state);
    }

    #[test]
    fn test_initial_snake_on_small_board() {
        let engine = GameEngine::new(GameConfig::new(4)).unwrap();
        let cells: Vec<Cell> = engine.state().snake().cells().collect();
        assert_eq!(cells, vec![Cell::new(2, 2), Cell::new(1, 2), Cell::new(0, 2)]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = GameEngine::new(GameConfig::new(2));
        assert!(matches!(result, Err(SnakeError::Configuration(_))));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::new(GameConfig::small()).unwrap();
        let initial_head = engine.state().snake().head();
        let food_before = engine.state().food();

        let (done, info) = engine.step(Action::Continue).unwrap();

        assert!(!done);
        assert_eq!(info.food_obtained, info.head_after == food_before);
        assert_eq!(info.head_before, initial_head);
        assert_eq!(info.head_after, initial_head.moved_in_direction(Direction::Down));
        assert_eq!(engine.state().snake().head(), info.head_after);
        assert_eq!(engine.state().steps(), 1);
        assert_eq!(info.snake_size, 3 + info.food_obtained as usize);
        assert_partition(engine.state());
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine_with(6, &[(2, 2), (1, 2), (0, 2)], Direction::Down, (3, 2));

        let (done, info) = engine.step(Action::Continue).unwrap();

        assert!(!done);
        assert!(info.food_obtained);
        assert_eq!(engine.state().score(), FOOD_SCORE);
        assert_eq!(info.snake_size, 4);
        // Tail stays in place when growing
        assert_eq!(engine.state().snake().tail(), Cell::new(0, 2));
        assert_ne!(info.food_pos, Cell::new(3, 2));
        assert!(engine.state().free_cells().contains(info.food_pos));
        assert_partition(engine.state());
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine_with(6, &[(0, 3), (1, 3), (2, 3)], Direction::Up, (5, 5));

        let (done, info) = engine.step(Action::Continue).unwrap();

        assert!(done);
        assert!(engine.state().is_collided());
        assert_eq!(info.head_after, Cell::new(-1, 3));
        // Tail popped, head not re-inserted
        assert_eq!(info.snake_size, 2);
        assert_partition(engine.state());
    }

    #[test]
    fn test_self_collision() {
        // Turning up from (2,2) runs into (1,2)
        let mut engine = engine_with(
            6,
            &[(2, 2), (2, 3), (1, 3), (1, 2), (1, 1)],
            Direction::Left,
            (5, 5),
        );

        let (done, _) = engine.step(Action::Move(Direction::Up)).unwrap();
        assert!(done);
    }

    #[test]
    fn test_following_own_tail_is_safe() {
        // A 2x2 loop: head moves into the cell the tail is vacating
        let mut engine = engine_with(
            6,
            &[(1, 1), (1, 2), (2, 2), (2, 1)],
            Direction::Left,
            (5, 5),
        );

        let (done, info) = engine.step(Action::Move(Direction::Down)).unwrap();
        assert!(!done);
        assert_eq!(info.head_after, Cell::new(2, 1));
        assert_partition(engine.state());
    }

    #[test]
    fn test_follow_tail_after_growing() {
        let mut engine = engine_with(
            6,
            &[(1, 2), (2, 2), (2, 1)],
            Direction::Up,
            (1, 1),
        );

        // Eat at (1,1): snake becomes (1,1),(1,2),(2,2),(2,1)
        let (done, info) = engine.step(Action::Move(Direction::Left)).unwrap();
        assert!(!done);
        assert!(info.food_obtained);
        assert_eq!(engine.state().snake().len(), 4);

        // (2,1) is the tail and gets vacated
        let (done, _) = engine.step(Action::Move(Direction::Down)).unwrap();
        assert!(!done);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = GameEngine::new(GameConfig::small()).unwrap();
        let head = engine.state().snake().head();

        let (done, info) = engine.step(Action::Move(Direction::Up)).unwrap();

        assert!(!done);
        assert_eq!(engine.state().direction(), Direction::Down);
        assert_eq!(info.head_after, head.moved_in_direction(Direction::Down));
    }

    #[test]
    fn test_step_after_game_over_fails() {
        let mut engine = engine_with(6, &[(0, 3), (1, 3), (2, 3)], Direction::Up, (5, 5));
        let (done, _) = engine.step(Action::Continue).unwrap();
        assert!(done);

        let steps_before = engine.state().steps();
        let result = engine.step(Action::Continue);

        assert!(matches!(result, Err(SnakeError::State(_))));
        assert_eq!(engine.state().steps(), steps_before);
    }

    #[test]
    fn test_with_state_rejects_inconsistent_states() {
        let prepared = |cells: &[(i32, i32)], food: (i32, i32)| {
            let snake = Snake::from_cells(
                cells.iter().map(|&(row, col)| Cell::new(row, col)),
                Direction::Down,
            );
            let state = GameState::new(Board::new(6), snake, Cell::new(food.0, food.1));
            GameEngine::with_state(GameConfig::new(6), state)
        };

        // Food on the body would score and collide in the same step
        assert!(matches!(
            prepared(&[(2, 2), (1, 2), (0, 2)], (1, 2)),
            Err(SnakeError::State(_))
        ));
        assert!(matches!(
            prepared(&[(2, 2), (1, 2), (2, 2)], (5, 5)),
            Err(SnakeError::State(_))
        ));
        assert!(matches!(
            prepared(&[(2, 2), (1, 2), (0, 2)], (6, 0)),
            Err(SnakeError::State(_))
        ));
        assert!(prepared(&[(2, 2), (1, 2), (0, 2)], (5, 5)).is_ok());
    }

    #[test]
    fn test_final_food_wins_without_new_food() {
        // 4x4 board filled except (0,0), head at (0,1) heading left
        let cells = [
            (0, 1), (0, 2), (0, 3),
            (1, 3), (1, 2), (1, 1), (1, 0),
            (2, 0), (2, 1), (2, 2), (2, 3),
            (3, 3), (3, 2), (3, 1), (3, 0),
        ];
        let mut engine = engine_with(4, &cells, Direction::Left, (0, 0));
        assert_eq!(engine.state().free_cells().len(), 1);

        let (done, info) = engine.step(Action::Continue).unwrap();

        assert!(!done);
        assert!(info.food_obtained);
        assert_eq!(info.snake_size, 16);
        assert!(info.is_win(engine.state().board()));
        assert_eq!(info.food_pos, FOOD_SENTINEL);
        assert!(engine.state().is_won());
        assert!(engine.state().free_cells().is_empty());

        // No stepping past a win
        assert!(engine.step(Action::Continue).is_err());
    }

    #[test]
    fn test_reset_with_seed_is_deterministic() {
        let mut engine = GameEngine::new(GameConfig::default()).unwrap();
        let actions = [
            Action::Move(Direction::Right),
            Action::Continue,
            Action::Move(Direction::Down),
            Action::Move(Direction::Left),
        ];

        let run = |engine: &mut GameEngine| {
            engine.reset_with_seed(99);
            let mut trace = vec![engine.state().food()];
            for action in actions {
                match engine.step(action) {
                    Ok((done, info)) => {
                        trace.push(info.food_pos);
                        if done {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
            trace
        };

        let first = run(&mut engine);
        let second = run(&mut engine);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_continues_stream() {
        let mut engine = GameEngine::new(GameConfig::default().with_seed(5)).unwrap();
        let mut foods = vec![engine.state().food()];
        for _ in 0..20 {
            foods.push(engine.reset().food());
        }

        let mut replay = GameEngine::new(GameConfig::default().with_seed(5)).unwrap();
        let mut replayed = vec![replay.state().food()];
        for _ in 0..20 {
            replayed.push(replay.reset().food());
        }

        assert_eq!(foods, replayed);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn play(seed: u64, actions: &[usize]) -> Vec<(bool, TransitionInfo)> {
            let mut engine = GameEngine::new(GameConfig::new(6)).unwrap();
            engine.reset_with_seed(seed);
            let mut trace = Vec::new();
            for &index in actions {
                if engine.state().is_over() {
                    break;
                }
                let action = Action::from_index(index, false).unwrap();
                trace.push(engine.step(action).unwrap());
            }
            trace
        }

        proptest! {
            #[test]
            fn prop_same_seed_same_transitions(
                seed in any::<u64>(),
                actions in prop::collection::vec(0usize..4, 0..200),
            ) {
                prop_assert_eq!(play(seed, &actions), play(seed, &actions));
            }

            #[test]
            fn prop_board_stays_partitioned(
                seed in any::<u64>(),
                actions in prop::collection::vec(0usize..4, 0..300),
            ) {
                let mut engine = GameEngine::new(GameConfig::new(5).with_seed(seed)).unwrap();

                for index in actions {
                    if engine.state().is_over() {
                        engine.reset();
                    }
                    let before = engine.state().snake().len();
                    let (done, info) = engine
                        .step(Action::from_index(index, false).unwrap())
                        .unwrap();

                    let state = engine.state();
                    if !done {
                        prop_assert_eq!(info.snake_size, before + info.food_obtained as usize);
                    }
                    prop_assert!(info.snake_size <= state.board().cell_count());
                    prop_assert_eq!(
                        state.free_cells().len() + state.snake().len(),
                        state.board().cell_count()
                    );
                    for cell in state.snake().cells() {
                        prop_assert!(!state.free_cells().contains(cell));
                    }
                    if !state.is_won() {
                        prop_assert!(state.free_cells().contains(state.food()));
                    }
                }
            }
        }
    }
}
