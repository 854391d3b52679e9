use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::{Direction, KeyAction},
    apple::Apple,
    board::Board,
    config::GameConfig,
    error::GameError,
    snake::{Cell, Snake, StepOutcome},
};

pub const TOO_SMALL_MESSAGE: &str = "Window is too small";
pub const GAME_OVER_MESSAGE: &str = "Game Over";
pub const BOARD_FILLED_MESSAGE: &str = "You Win";

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The head left the board
    HitWall,
    /// The head ran into the body
    HitSelf,
    /// The snake covers every cell, no apple can be placed
    BoardFilled,
}

impl GameOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            GameOutcome::HitWall | GameOutcome::HitSelf => GAME_OVER_MESSAGE,
            GameOutcome::BoardFilled => BOARD_FILLED_MESSAGE,
        }
    }
}

/// Lifecycle of a session's game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Created, waiting for the first tick to place the apple
    Initializing,
    Running,
    /// Terminal; further events are no-ops
    Over(GameOutcome),
}

/// Events a session feeds into its engine, one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Tick,
    Key(KeyAction),
    Resize { width: u16, height: u16 },
}

/// What the host should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Size of the client's terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    /// Assumed until the client reports its real size
    pub const DEFAULT: Viewport = Viewport {
        width: 80,
        height: 24,
    };

    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Text grid of the board plus where to place it in the viewport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// One string per board row
    pub rows: Vec<String>,
    /// Column of the border's top-left corner that centres the board
    pub left: u16,
    /// Row of the border's top-left corner that centres the board
    pub top: u16,
}

/// What a session shows its client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    TooSmall,
    Over(GameOutcome),
    Board(Frame),
}

/// One session's authoritative game state
pub struct GameEngine<R = StdRng> {
    board: Board,
    snake: Snake,
    apple: Apple,
    status: GameStatus,
    viewport: Viewport,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create an engine seeded from the operating system
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: &GameConfig, rng: R) -> Result<Self, GameError> {
        let board = Board::new(config.board_width, config.board_height)?;

        Ok(Self {
            snake: Snake::new(board.center()),
            board,
            apple: Apple::new(),
            status: GameStatus::Initializing,
            viewport: Viewport::default(),
            rng,
        })
    }

    /// Single entry point for everything that happens to a session
    pub fn handle_event(&mut self, event: GameEvent) -> Flow {
        match event {
            GameEvent::Tick => {
                self.handle_tick();
                Flow::Continue
            }
            GameEvent::Key(key) => self.handle_input(key),
            GameEvent::Resize { width, height } => {
                self.resize_viewport(width, height);
                Flow::Continue
            }
        }
    }

    /// Advance the game by one tick
    pub fn handle_tick(&mut self) {
        match self.status {
            GameStatus::Initializing => {
                if self.apple.place(&self.board, &self.snake, &mut self.rng).is_some() {
                    self.status = GameStatus::Running;
                } else {
                    self.status = GameStatus::Over(GameOutcome::BoardFilled);
                }
            }
            GameStatus::Running if !self.is_paused() => self.step(),
            GameStatus::Running | GameStatus::Over(_) => {}
        }
    }

    /// Apply a key; only the quit key asks the host to end the session
    pub fn handle_input(&mut self, key: KeyAction) -> Flow {
        match key {
            KeyAction::Quit => return Flow::Quit,
            KeyAction::Move(direction) => self.turn(direction),
            KeyAction::None => {}
        }
        Flow::Continue
    }

    pub fn resize_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
    }

    /// Build what the client should see right now
    pub fn render(&self) -> View {
        if self.is_paused() {
            return View::TooSmall;
        }
        if let GameStatus::Over(outcome) = self.status {
            return View::Over(outcome);
        }

        let rows = self.board.render_frame(&self.snake, self.apple.cell());
        let (framed_width, framed_height) = (self.board.width() + 2, self.board.height() + 2);

        View::Board(Frame {
            rows,
            left: centered_offset(self.viewport.width, framed_width),
            top: centered_offset(self.viewport.height, framed_height),
        })
    }

    /// The viewport cannot hold the board; recomputed on every call
    pub fn is_paused(&self) -> bool {
        i32::from(self.viewport.width) < self.board.width()
            || i32::from(self.viewport.height) < self.board.height()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Over(_))
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> Option<Cell> {
        self.apple.cell()
    }

    pub fn heading(&self) -> Option<Direction> {
        self.snake.heading()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn turn(&mut self, direction: Direction) {
        if self.is_over() || self.is_paused() {
            return;
        }
        self.snake.request(direction);
    }

    fn step(&mut self) {
        match self.snake.step(&self.board, self.apple.cell()) {
            StepOutcome::Idle | StepOutcome::Moved => {}
            StepOutcome::Ate => {
                if self.apple.place(&self.board, &self.snake, &mut self.rng).is_none() {
                    self.status = GameStatus::Over(GameOutcome::BoardFilled);
                }
            }
            StepOutcome::HitWall => self.status = GameStatus::Over(GameOutcome::HitWall),
            StepOutcome::HitSelf => self.status = GameStatus::Over(GameOutcome::HitSelf),
        }
    }
}

fn centered_offset(available: u16, needed: i32) -> u16 {
    let spare = (i32::from(available) - needed).max(0);
    (spare / 2) as u16
}
