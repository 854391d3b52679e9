use thiserror::Error;

/// Contract violations of the game core.
///
/// Hitting a wall or the snake's own body is not an error: those end the game
/// and are reported through [`GameOutcome`](super::GameOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid board dimension {width}x{height}: both sides must be positive")]
    InvalidDimension { width: i32, height: i32 },
}
