use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for one game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of columns on the board
    pub board_width: i32,
    /// Number of rows on the board
    pub board_height: i32,
    /// Time between two snake moves, in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 40,
            board_height: 20,
            tick_interval_ms: 220,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom board size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            board_width: width,
            board_height: height,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(5, 5)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_width, 40);
        assert_eq!(config.board_height, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(220));
    }

    #[test]
    fn test_small_config() {
        let config = GameConfig::small();
        assert_eq!((config.board_width, config.board_height), (5, 5));
        assert_eq!(config.tick_interval_ms, GameConfig::default().tick_interval_ms);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 10);
        assert_eq!(config.board_width, 15);
        assert_eq!(config.board_height, 10);
        assert_eq!(config.tick_interval_ms, 220);
    }
}
