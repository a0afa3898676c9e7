use burn::tensor::{Tensor, TensorData, backend::Backend};

use crate::game::{Cell, GameState};

/// Number of color channels in an observation frame
pub const CHANNELS: usize = 3;

const HEAD_COLOR: [u8; CHANNELS] = [0, 255, 0];
const TAIL_COLOR: [u8; CHANNELS] = [255, 0, 0];
const FOOD_COLOR: [u8; CHANNELS] = [0, 0, 255];
const BODY_BRIGHTEST: f64 = 200.0;
const BODY_DIMMEST: f64 = 50.0;

/// RGB image of the board, row-major, channels last (height x width x 3)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    size: usize,
    data: Vec<u8>,
}

impl Observation {
    /// Render `state` into a `size` x `size` frame.
    ///
    /// Each board cell becomes a `size / board_size` square block. Body
    /// cells are gray, fading from head to tail; the head is green, the tail
    /// red and the food blue. Empty cells are black. Food is painted even
    /// when it is the full-board sentinel.
    pub fn encode(state: &GameState, size: usize) -> Self {
        let board_size = state.board().size();
        let base = Self::encode_base(state);

        let scale = size / board_size;
        let mut data = vec![0u8; size * size * CHANNELS];
        for row in 0..board_size * scale {
            for col in 0..board_size * scale {
                let src = ((row / scale) * board_size + col / scale) * CHANNELS;
                let dst = (row * size + col) * CHANNELS;
                data[dst..dst + CHANNELS].copy_from_slice(&base[src..src + CHANNELS]);
            }
        }

        Self { size, data }
    }

    /// One pixel per board cell
    fn encode_base(state: &GameState) -> Vec<u8> {
        let board = state.board();
        let mut base = vec![0u8; board.cell_count() * CHANNELS];
        let mut paint = |cell: Cell, color: [u8; CHANNELS]| {
            if let Some(index) = board.index_of(cell) {
                base[index * CHANNELS..(index + 1) * CHANNELS].copy_from_slice(&color);
            }
        };

        let snake = state.snake();
        for (cell, intensity) in snake.cells().zip(body_intensities(snake.len())) {
            paint(cell, [intensity; CHANNELS]);
        }
        if let Some(head) = snake.cells().next() {
            paint(head, HEAD_COLOR);
        }
        if let Some(tail) = snake.cells().next_back() {
            paint(tail, TAIL_COLOR);
        }
        // Painted last: on a full board the sentinel food covers a body cell
        paint(state.food(), FOOD_COLOR);

        base
    }

    /// Side length in pixels
    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw bytes, `[row][col][channel]`
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; CHANNELS] {
        let start = (row * self.size + col) * CHANNELS;
        let mut pixel = [0u8; CHANNELS];
        pixel.copy_from_slice(&self.data[start..start + CHANNELS]);
        pixel
    }

    /// Convert into a float tensor of shape [size, size, 3] with values in 0..=255
    pub fn to_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 3> {
        let values: Vec<f32> = self.data.iter().map(|&byte| byte as f32).collect();
        let tensor_data = TensorData::new(values, [self.size, self.size, CHANNELS]);

        Tensor::<B, 3>::from_data(tensor_data, device)
    }
}

/// Gray levels from head (brightest) to tail (dimmest), evenly spaced
fn body_intensities(length: usize) -> impl Iterator<Item = u8> {
    let step = if length > 1 {
        (BODY_DIMMEST - BODY_BRIGHTEST) / (length - 1) as f64
    } else {
        0.0
    };
    (0..length).map(move |i| {
        if length > 1 && i == length - 1 {
            BODY_DIMMEST as u8
        } else {
            (BODY_BRIGHTEST + step * i as f64) as u8
        }
    })
}

/// Create the observation tensor for `state`
///
/// Returns: Tensor<B, 3> with shape [size, size, 3]
pub fn create_observation<B: Backend>(
    state: &GameState,
    size: usize,
    device: &B::Device,
) -> Tensor<B, 3> {
    Observation::encode(state, size).to_tensor(device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Direction, Snake};
    use burn::backend::NdArray;
    use burn::backend::ndarray::NdArrayDevice;

    type TestBackend = NdArray<f32>;

    fn sample_state() -> GameState {
        let snake = Snake::from_cells(
            [Cell::new(3, 2), Cell::new(2, 2), Cell::new(1, 2), Cell::new(1, 3)],
            Direction::Down,
        );
        GameState::new(Board::new(12), snake, Cell::new(10, 7))
    }

    #[test]
    fn test_body_intensities() {
        assert_eq!(body_intensities(1).collect::<Vec<_>>(), vec![200]);
        assert_eq!(body_intensities(3).collect::<Vec<_>>(), vec![200, 125, 50]);
        assert_eq!(body_intensities(4).collect::<Vec<_>>(), vec![200, 150, 100, 50]);
        assert_eq!(
            body_intensities(5).collect::<Vec<_>>(),
            vec![200, 162, 125, 87, 50]
        );
    }

    #[test]
    fn test_marker_colors() {
        let obs = Observation::encode(&sample_state(), 84);

        // 7x7 blocks on a 12x12 board
        assert_eq!(obs.pixel(3 * 7, 2 * 7), HEAD_COLOR);
        assert_eq!(obs.pixel(3 * 7 + 6, 2 * 7 + 6), HEAD_COLOR);
        assert_eq!(obs.pixel(7, 3 * 7), TAIL_COLOR);
        assert_eq!(obs.pixel(10 * 7 + 3, 7 * 7 + 3), FOOD_COLOR);
        assert_eq!(obs.pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_body_fades_towards_tail() {
        let obs = Observation::encode(&sample_state(), 84);
        let neck = obs.pixel(2 * 7, 2 * 7);
        let middle = obs.pixel(7, 2 * 7);

        assert_eq!(neck, [150; CHANNELS]);
        assert_eq!(middle, [100; CHANNELS]);
    }

    #[test]
    fn test_won_board_paints_sentinel_food() {
        let board = Board::new(4);
        let cells: Vec<Cell> = (0..4)
            .flat_map(|row| {
                let cols: Vec<i32> = if row % 2 == 0 {
                    (0..4).collect()
                } else {
                    (0..4).rev().collect()
                };
                cols.into_iter().map(move |col| Cell::new(row, col))
            })
            .collect();
        let snake = Snake::from_cells(cells, Direction::Left);
        let state = GameState::new(board, snake, Cell::new(0, 0));
        assert!(state.is_won());

        let obs = Observation::encode(&state, 8);
        // The sentinel sits on the head at (0,0) and wins the pixel
        assert_eq!(obs.pixel(0, 0), FOOD_COLOR);
        assert_eq!(obs.pixel(1, 1), FOOD_COLOR);
        assert_eq!(
            obs.as_bytes()
                .chunks(CHANNELS)
                .filter(|pixel| *pixel == FOOD_COLOR)
                .count(),
            4
        );
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let state = sample_state();
        assert_eq!(Observation::encode(&state, 84), Observation::encode(&state, 84));
    }

    #[test]
    fn test_observation_shape() {
        let device = NdArrayDevice::default();
        let obs = create_observation::<TestBackend>(&sample_state(), 84, &device);

        assert_eq!(obs.shape().dims, [84, 84, 3]);
    }

    #[test]
    fn test_tensor_values_match_bytes() {
        let device = NdArrayDevice::default();
        let obs = Observation::encode(&sample_state(), 84);
        let tensor = obs.to_tensor::<TestBackend>(&device);
        let data = tensor.to_data();
        let values = data.as_slice::<f32>().unwrap();

        assert_eq!(values.len(), 84 * 84 * 3);
        for (value, byte) in values.iter().zip(obs.as_bytes()) {
            assert_eq!(*value, *byte as f32);
        }
    }
}
