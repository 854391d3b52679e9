use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crossterm::{
    cursor::{Hide, Show},
    queue,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal, TerminalOptions};

use crate::game::{View, Viewport};
use crate::render::Renderer;

/// In-memory sink the terminal backend writes escape sequences into.
/// Cloned handles share the same bytes.
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl FrameBuffer {
    /// Drain everything written so far
    pub fn take(&self) -> Vec<u8> {
        let mut bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *bytes)
    }
}

impl Write for FrameBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A client's screen, drawn with ratatui into a byte buffer that the session
/// then sends over the connection
pub struct RemoteTerminal {
    terminal: Terminal<CrosstermBackend<FrameBuffer>>,
    buffer: FrameBuffer,
}

impl RemoteTerminal {
    pub fn new(viewport: Viewport) -> io::Result<Self> {
        let buffer = FrameBuffer::default();
        let backend = CrosstermBackend::new(buffer.clone());
        let terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: ratatui::Viewport::Fixed(area(viewport)),
            },
        )?;

        Ok(Self { terminal, buffer })
    }

    /// Switch the client to a clean alternate screen with a hidden cursor
    pub fn enter(&mut self) -> io::Result<Vec<u8>> {
        let mut out = self.buffer.clone();
        queue!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(self.buffer.take())
    }

    /// Give the client its normal screen back
    pub fn leave(&mut self) -> io::Result<Vec<u8>> {
        let mut out = self.buffer.clone();
        queue!(out, Show, LeaveAlternateScreen)?;
        Ok(self.buffer.take())
    }

    pub fn resize(&mut self, viewport: Viewport) -> io::Result<()> {
        self.terminal.resize(area(viewport))
    }

    /// Draw a view and return the bytes that bring the client up to date
    pub fn draw(&mut self, renderer: &Renderer, view: &View) -> io::Result<Vec<u8>> {
        self.terminal.draw(|frame| renderer.render(frame, view))?;
        Ok(self.buffer.take())
    }
}

fn area(viewport: Viewport) -> Rect {
    Rect::new(0, 0, viewport.width, viewport.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameOutcome;

    #[test]
    fn test_frame_buffer_take_drains() {
        let buffer = FrameBuffer::default();
        let mut writer = buffer.clone();
        writer.write_all(b"abc").unwrap();

        assert_eq!(buffer.take(), b"abc");
        assert!(buffer.take().is_empty());
    }

    #[test]
    fn test_enter_and_leave_sequences() {
        let mut terminal = RemoteTerminal::new(Viewport::DEFAULT).unwrap();

        let enter = String::from_utf8(terminal.enter().unwrap()).unwrap();
        assert!(enter.contains("\x1b[?1049h"));
        assert!(enter.contains("\x1b[?25l"));

        let leave = String::from_utf8(terminal.leave().unwrap()).unwrap();
        assert!(leave.contains("\x1b[?1049l"));
        assert!(leave.contains("\x1b[?25h"));
    }

    #[test]
    fn test_draw_only_sends_changes() {
        let mut terminal = RemoteTerminal::new(Viewport::new(30, 5)).unwrap();
        let renderer = Renderer::default();
        let view = View::Over(GameOutcome::HitSelf);

        let first = String::from_utf8(terminal.draw(&renderer, &view).unwrap()).unwrap();
        assert!(first.contains("Game Over"));

        let second = String::from_utf8(terminal.draw(&renderer, &view).unwrap()).unwrap();
        assert!(!second.contains("Game Over"));
    }

    #[test]
    fn test_resize_redraws() {
        let mut terminal = RemoteTerminal::new(Viewport::new(30, 5)).unwrap();
        let renderer = Renderer::default();
        let view = View::Over(GameOutcome::HitSelf);
        terminal.draw(&renderer, &view).unwrap();

        terminal.resize(Viewport::new(40, 9)).unwrap();
        let redrawn = String::from_utf8(terminal.draw(&renderer, &view).unwrap()).unwrap();
        assert!(redrawn.contains("Game Over"));
    }
}
