use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CameraMode, Face, GameState, GameStatus, GridPosition};
use crate::metrics::GameMetrics;

/// Faces laid out as an unfolded cube, by (block row, block column)
///
/// Rows grow upwards on every face, so each face is drawn bottom row last.
/// With this net every seam between touching blocks is a real cube edge.
const NET: [(Face, usize, usize); 6] = [
    (Face::Up, 0, 1),
    (Face::Left, 1, 0),
    (Face::Front, 1, 1),
    (Face::Right, 1, 2),
    (Face::Back, 1, 3),
    (Face::Down, 2, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Head,
    Body,
    Apple,
    Stone,
}

impl Cell {
    fn span(self, on_head_face: bool) -> Span<'static> {
        let empty = if on_head_face {
            Color::Gray
        } else {
            Color::DarkGray
        };

        match self {
            Cell::Head => Span::styled(
                "@",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::Body => Span::styled("o", Style::default().fg(Color::Green)),
            Cell::Apple => Span::styled(
                "*",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Cell::Stone => Span::styled("#", Style::default().fg(Color::Yellow)),
            Cell::Empty => Span::styled("·", Style::default().fg(empty)),
        }
    }
}

/// What occupies a cell, head first
pub fn cell_at(state: &GameState, pos: GridPosition) -> Cell {
    if pos == state.snake.head() {
        Cell::Head
    } else if state.is_occupied_by_snake(pos) {
        Cell::Body
    } else if state.apples.contains(&pos) {
        Cell::Apple
    } else if state.stones.contains(&pos) {
        Cell::Stone
    } else {
        Cell::Empty
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Cube net
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);
        frame.render_widget(self.render_net(state), chunks[1]);
        frame.render_widget(self.render_controls(state), chunks[2]);
    }

    /// Text lines of the unfolded cube, one character per cell
    pub fn net_lines(&self, state: &GameState) -> Vec<Line<'static>> {
        let n = state.grid_size;
        let head_face = state.snake.head().face;
        let mut lines = Vec::with_capacity(3 * n);

        for block_row in 0..3 {
            for line in 0..n {
                let row = (n - 1 - line) as i32;
                let mut spans = Vec::with_capacity(4 * n);

                for block_col in 0..4 {
                    let face = NET
                        .iter()
                        .find(|(_, r, c)| *r == block_row && *c == block_col)
                        .map(|(face, _, _)| *face);

                    match face {
                        Some(face) => {
                            for col in 0..n as i32 {
                                let cell = cell_at(state, GridPosition::new(face, row, col));
                                spans.push(cell.span(face == head_face));
                            }
                        }
                        None => spans.push(Span::raw(" ".repeat(n))),
                    }
                }

                lines.push(Line::from(spans));
            }
        }

        lines
    }

    fn render_net(&self, state: &GameState) -> Paragraph<'_> {
        let (title, color) = match state.status {
            GameStatus::Welcome => (" Cube Snake - press Space to start ", Color::White),
            GameStatus::InGame => (" Cube Snake ", Color::White),
            GameStatus::Paused => (" Paused - press Space to resume ", Color::Yellow),
            GameStatus::Win => (" You win! Space to play again ", Color::Green),
            GameStatus::Fail => (" Crashed! Space to try again ", Color::Red),
        };

        Paragraph::new(self.net_lines(state))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let rotation = state.camera.current;
        let camera = match state.camera.mode {
            CameraMode::Overview => "overview",
            CameraMode::FollowSnake => "follow",
            CameraMode::ManualControl => "manual",
        };

        let text = vec![Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.snake.len().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Apples left: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.apples.len().to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{} ms", state.snake.move_period.as_millis()),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.best_length.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Camera: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{camera} {:+.0}°/{:+.0}°", rotation.x, rotation.y),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(" start/pause | "),
        ];
        if state.status != GameStatus::InGame {
            spans.push(Span::styled("drag", Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(" to rotate | "));
        }
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
