use super::board::{Board, Cell};

/// Set of board cells not occupied by the snake.
///
/// Backed by a dense vector of free cell indices plus a reverse lookup, so
/// insert, remove, membership and "the k-th free cell" are all O(1).
/// Iteration order depends only on the sequence of mutations, which keeps
/// seeded food placement reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeCells {
    board: Board,
    cells: Vec<usize>,
    // position of each board index inside `cells`, if free
    slots: Vec<Option<usize>>,
}

impl FreeCells {
    /// All cells of the board are free
    pub fn full(board: Board) -> Self {
        let count = board.cell_count();
        Self {
            board,
            cells: (0..count).collect(),
            slots: (0..count).map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.board
            .index_of(cell)
            .is_some_and(|index| self.slots[index].is_some())
    }

    /// Mark a cell as free. Returns false if it was already free or off-board.
    pub fn insert(&mut self, cell: Cell) -> bool {
        let Some(index) = self.board.index_of(cell) else {
            return false;
        };
        if self.slots[index].is_some() {
            return false;
        }
        self.slots[index] = Some(self.cells.len());
        self.cells.push(index);
        true
    }

    /// Mark a cell as occupied. Returns false if it was not free.
    pub fn remove(&mut self, cell: Cell) -> bool {
        let Some(index) = self.board.index_of(cell) else {
            return false;
        };
        let Some(slot) = self.slots[index].take() else {
            return false;
        };
        self.cells.swap_remove(slot);
        if let Some(&moved) = self.cells.get(slot) {
            self.slots[moved] = Some(slot);
        }
        true
    }

    /// The free cell stored at `position` (0..len)
    pub fn get(&self, position: usize) -> Option<Cell> {
        self.cells
            .get(position)
            .map(|&index| self.board.cell_at(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().map(|&index| self.board.cell_at(index))
    }
}
