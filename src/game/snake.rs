use std::collections::VecDeque;

use super::action::Direction;
use super::board::Board;

/// A cell on the board, addressed by row and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// What a single step did to the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No heading yet, the snake stays where it is
    Idle,
    /// Moved one cell, length unchanged
    Moved,
    /// Moved onto the apple and grew by one segment
    Ate,
    /// The new head would leave the board; body untouched
    HitWall,
    /// The new head would land on a surviving segment; body untouched
    HitSelf,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Cell>,
    /// Heading of the last completed move
    heading: Option<Direction>,
    /// Latest accepted heading request, applied on the next step
    pending: Option<Direction>,
}

impl Snake {
    /// A single-segment snake that has not started moving
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
            heading: None,
            pending: None,
        }
    }

    /// A snake with an explicit body (head first), or `None` if the body is empty
    pub fn with_body(body: Vec<Cell>, heading: Option<Direction>) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body: body.into(),
            heading,
            pending: None,
        })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake has at least one segment
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Segments from head to tail
    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// The heading the next step will use
    pub fn heading(&self) -> Option<Direction> {
        self.pending.or(self.heading)
    }

    /// Ask the snake to turn. Requests opposite to the heading of the last
    /// completed move or to the pending heading are rejected, so neither the
    /// head nor the visible heading can fold back on itself.
    pub fn request(&mut self, direction: Direction) -> bool {
        let reverses = |heading: Option<Direction>| heading.is_some_and(|h| h.is_opposite(direction));
        if reverses(self.heading) || reverses(self.pending) {
            return false;
        }
        self.pending = Some(direction);
        true
    }

    /// Advance one cell along the current heading.
    ///
    /// The tail is kept when the new head lands on `apple`, otherwise it is
    /// dropped. Moving into the cell the tail is vacating is legal.
    pub fn step(&mut self, board: &Board, apple: Option<Cell>) -> StepOutcome {
        let Some(direction) = self.pending.take().or(self.heading) else {
            return StepOutcome::Idle;
        };

        let new_head = self.head().moved_in_direction(direction);
        if !board.contains(new_head) {
            return StepOutcome::HitWall;
        }

        let ate_apple = apple == Some(new_head);
        let surviving = if ate_apple {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        if self.body.iter().take(surviving).any(|&cell| cell == new_head) {
            return StepOutcome::HitSelf;
        }

        self.body.push_front(new_head);
        if !ate_apple {
            self.body.pop_back();
        }
        self.heading = Some(direction);

        if ate_apple {
            StepOutcome::Ate
        } else {
            StepOutcome::Moved
        }
    }
}
