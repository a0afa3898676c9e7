use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A cell on the board, addressed as (row, col)
///
/// Coordinates are signed so that a head pushed past the edge can still be
/// represented and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move cell by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }

    /// Euclidean distance to another cell
    pub fn distance_to(&self, other: Cell) -> f32 {
        let d_row = (self.row - other.row) as f32;
        let d_col = (self.col - other.col) as f32;
        (d_row * d_row + d_col * d_col).sqrt()
    }
}

/// Square N x N board geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (the maximum snake length)
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Check if a cell is within the board bounds
    pub fn contains(&self, cell: Cell) -> bool {
        let size = self.size as i32;
        cell.row >= 0 && cell.row < size && cell.col >= 0 && cell.col < size
    }

    /// Row-major index of an in-bounds cell
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row as usize * self.size + cell.col as usize)
        } else {
            None
        }
    }

    /// Cell at a row-major index
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new((index / self.size) as i32, (index % self.size) as i32)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let board = *self;
        (0..self.cell_count()).map(move |index| board.cell_at(index))
    }
}
