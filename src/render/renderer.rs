use rand::Rng;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::board::{APPLE_GLYPH, SNAKE_GLYPH};
use crate::game::engine::TOO_SMALL_MESSAGE;
use crate::game::{Frame as BoardFrame, View};

const SNAKE_COLORS: [Color; 10] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::LightRed,
    Color::LightGreen,
    Color::LightBlue,
    Color::LightMagenta,
];

/// Colours used by one session. Each session owns its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStyle {
    pub snake: Vec<Color>,
    pub apple: Color,
    pub border: Color,
}

impl SessionStyle {
    /// The default palette rotated by a random amount, so neighbouring
    /// sessions do not all look the same
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut style = Self::default();
        let shift = rng.gen_range(0..style.snake.len());
        style.snake.rotate_left(shift);
        style
    }

    fn snake_color(&self, row: usize, col: usize) -> Color {
        self.snake[(row + col) % self.snake.len()]
    }
}

impl Default for SessionStyle {
    fn default() -> Self {
        Self {
            snake: SNAKE_COLORS.to_vec(),
            apple: Color::Red,
            border: Color::White,
        }
    }
}

pub struct Renderer {
    style: SessionStyle,
}

impl Renderer {
    pub fn new(style: SessionStyle) -> Self {
        Self { style }
    }

    pub fn render(&self, frame: &mut Frame, view: &View) {
        let area = frame.area();

        match view {
            View::TooSmall => {
                let message = self.render_message(TOO_SMALL_MESSAGE, Color::Yellow);
                frame.render_widget(message, middle_line(area));
            }
            View::Over(outcome) => {
                let message = self.render_message(outcome.message(), Color::Red);
                frame.render_widget(message, middle_line(area));
            }
            View::Board(board) => {
                let board_area = board_area(area, board);
                frame.render_widget(self.render_board(board), board_area);

                // Controls go under the board when there is room for them
                let below = board_area.bottom();
                if below < area.bottom() {
                    let footer = Rect::new(area.x, below, area.width, 1);
                    frame.render_widget(self.render_controls(), footer);
                }
            }
        }
    }

    fn render_board(&self, board: &BoardFrame) -> Paragraph<'_> {
        let lines: Vec<Line> = board
            .rows
            .iter()
            .enumerate()
            .map(|(row, text)| {
                let spans: Vec<Span> = text
                    .chars()
                    .enumerate()
                    .map(|(col, glyph)| match glyph {
                        SNAKE_GLYPH => Span::styled(
                            glyph.to_string(),
                            Style::default().fg(self.style.snake_color(row, col)),
                        ),
                        APPLE_GLYPH => Span::styled(
                            glyph.to_string(),
                            Style::default()
                                .fg(self.style.apple)
                                .add_modifier(Modifier::BOLD),
                        ),
                        _ => Span::raw(glyph.to_string()),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .border_style(Style::default().fg(self.style.border)),
        )
    }

    fn render_message(&self, text: &'static str, color: Color) -> Paragraph<'static> {
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("hjkl", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(SessionStyle::default())
    }
}

/// Bordered board at the engine's centring hint, clipped to the screen
fn board_area(area: Rect, board: &BoardFrame) -> Rect {
    let width = board.rows.first().map_or(0, |row| row.chars().count()) as u16 + 2;
    let height = board.rows.len() as u16 + 2;
    Rect::new(area.x + board.left, area.y + board.top, width, height).intersection(area)
}

fn middle_line(area: Rect) -> Rect {
    Rect::new(area.x, area.y + area.height / 2, area.width, area.height.min(1))
}
