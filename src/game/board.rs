use super::error::GameError;
use super::snake::{Cell, Snake};

pub const SNAKE_GLYPH: char = '■';
pub const APPLE_GLYPH: char = '@';
pub const EMPTY_GLYPH: char = ' ';

/// Fixed-size play field.
///
/// The board holds no gameplay state: it only knows its bounds and rebuilds a
/// text frame from the snake and apple on every call to [`Board::render_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Result<Self, GameError> {
        validate(width, height)?;
        Ok(Self { width, height })
    }

    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), GameError> {
        validate(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells on the board
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Cell at the middle of the board, rounding towards the top-left
    pub fn center(&self) -> Cell {
        Cell::new((self.height - 1) / 2, (self.width - 1) / 2)
    }

    /// Check if a cell is within the board bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.row < self.height && cell.col >= 0 && cell.col < self.width
    }

    /// Every cell of the board, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Cell::new(row, col)))
    }

    /// Build the text grid for the current snake and apple positions
    pub fn render_frame(&self, snake: &Snake, apple: Option<Cell>) -> Vec<String> {
        let mut grid = vec![vec![EMPTY_GLYPH; self.width as usize]; self.height as usize];

        let occupants = snake
            .segments()
            .map(|cell| (cell, SNAKE_GLYPH))
            .chain(apple.map(|cell| (cell, APPLE_GLYPH)));

        for (cell, glyph) in occupants {
            if self.contains(cell) {
                grid[cell.row as usize][cell.col as usize] = glyph;
            }
        }

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}

fn validate(width: i32, height: i32) -> Result<(), GameError> {
    if width <= 0 || height <= 0 {
        return Err(GameError::InvalidDimension { width, height });
    }
    Ok(())
}
