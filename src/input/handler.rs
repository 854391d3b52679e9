use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Direction, KeyAction};

/// Maps key presses to the game's symbolic keys
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Move(Direction::Up),
            KeyCode::Down => KeyAction::Move(Direction::Down),
            KeyCode::Left => KeyAction::Move(Direction::Left),
            KeyCode::Right => KeyAction::Move(Direction::Right),

            // Movement - vi keys and WASD
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'k' | 'w' => KeyAction::Move(Direction::Up),
                'j' | 's' => KeyAction::Move(Direction::Down),
                'h' | 'a' => KeyAction::Move(Direction::Left),
                'l' | 'd' => KeyAction::Move(Direction::Right),
                'q' => KeyAction::Quit,
                _ => KeyAction::None,
            },

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
