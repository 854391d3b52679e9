use rand::seq::IteratorRandom;
use rand::Rng;

use super::board::Board;
use super::snake::{Cell, Snake};

/// Random draws before falling back to scanning the free cells
const MAX_RANDOM_TRIES: usize = 64;

/// The single target cell on the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Apple {
    cell: Option<Cell>,
}

impl Apple {
    /// An apple that has not been placed yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(cell: Cell) -> Self {
        Self { cell: Some(cell) }
    }

    pub fn cell(&self) -> Option<Cell> {
        self.cell
    }

    /// Move the apple to a random cell not covered by the snake.
    ///
    /// Returns `None` and clears the apple when the snake fills the board.
    pub fn place<R: Rng + ?Sized>(&mut self, board: &Board, snake: &Snake, rng: &mut R) -> Option<Cell> {
        self.cell = pick_free_cell(board, snake, rng);
        self.cell
    }
}

fn pick_free_cell<R: Rng + ?Sized>(board: &Board, snake: &Snake, rng: &mut R) -> Option<Cell> {
    for _ in 0..MAX_RANDOM_TRIES {
        let cell = Cell::new(
            rng.gen_range(0..board.height()),
            rng.gen_range(0..board.width()),
        );
        if !snake.contains(cell) {
            return Some(cell);
        }
    }

    board.cells().filter(|cell| !snake.contains(*cell)).choose(rng)
}
