//! Core game logic module for Snake
//!
//! Everything a single session needs to play: the board, the snake, the apple and
//! the tick-driven engine tying them together. No I/O or rendering dependencies.

pub mod action;
pub mod apple;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod snake;

// Re-export commonly used types
pub use action::{Direction, KeyAction};
pub use apple::Apple;
pub use board::Board;
pub use config::GameConfig;
pub use engine::{Flow, Frame, GameEngine, GameEvent, GameOutcome, GameStatus, View, Viewport};
pub use error::GameError;
pub use snake::{Cell, Snake, StepOutcome};
