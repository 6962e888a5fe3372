use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Cell, CollisionType, GameSnapshot};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &GameSnapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with score and speed
        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = chunks[1];
        let Some(glyph_width) = board_glyph_width(snapshot, game_area) else {
            // Drawing a clipped board would hide the snake
            let (width, height) = required_terminal_size(snapshot);
            frame.render_widget(self.render_too_small(width, height), game_area);
            frame.render_widget(self.render_controls(), chunks[2]);
            return;
        };

        let grid = self.render_grid(snapshot, glyph_width);
        frame.render_widget(grid, game_area);

        // Prompt over the board depending on the session flags
        if let Some(overlay) = self.render_overlay(snapshot) {
            let area = centered_rect(36, 7, game_area);
            frame.render_widget(Clear, area);
            frame.render_widget(overlay, area);
        }

        // Render footer with controls
        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Board with each cell drawn `glyph_width` characters wide
    fn render_grid(&self, snapshot: &GameSnapshot, glyph_width: u16) -> Paragraph<'_> {
        let wide = glyph_width >= 2;
        let size = snapshot.cell_size;
        let head = snapshot.head();
        let rows = snapshot.board_height / size;
        let columns = snapshot.board_width / size;
        let mut lines = Vec::new();

        for row in 0..rows {
            let mut spans = Vec::new();

            for column in 0..columns {
                let cell = Cell::new(column * size, row * size, size);

                let span = if Some(cell) == head {
                    // Snake head - distinct color
                    Span::styled(
                        if wide { "██" } else { "@" },
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.segments.contains(&cell) {
                    // Snake body
                    Span::styled(
                        if wide { "██" } else { "o" },
                        Style::default().fg(Color::LightGreen),
                    )
                } else if cell == snapshot.food {
                    // Food
                    Span::styled(
                        if wide { "()" } else { "*" },
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw(if wide { "  " } else { " " })
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Gray)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Gray)),
            Span::styled(snapshot.speed.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Gray)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Gray)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_too_small(&self, width: u16, height: u16) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("need {}x{}, or pick a smaller board", width, height)),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_overlay(&self, snapshot: &GameSnapshot) -> Option<Paragraph<'_>> {
        let key = |label: &'static str| {
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        };
        let info = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let (lines, border) = if snapshot.ended {
            (
                vec![
                    Line::from(Span::styled("Game Over!", info.fg(Color::Red))),
                    Line::from(Span::styled(
                        match snapshot.collision {
                            Some(CollisionType::Wall) => "You hit the wall",
                            Some(CollisionType::SelfCollision) => "You ran into yourself",
                            None => "",
                        },
                        Style::default().fg(Color::Gray),
                    )),
                    Line::from(vec![
                        Span::styled("Final Score: ", Style::default().fg(Color::Gray)),
                        Span::styled(snapshot.score.to_string(), info),
                    ]),
                    Line::from(vec![
                        Span::raw("Hit "),
                        key("Space"),
                        Span::raw(" to try again"),
                    ]),
                ],
                Color::Red,
            )
        } else if !snapshot.started {
            (
                vec![
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Hit ", info),
                        key("Space"),
                        Span::styled(" to begin", info),
                    ]),
                ],
                Color::White,
            )
        } else if snapshot.paused {
            (
                vec![
                    Line::from(""),
                    Line::from(Span::styled("Game Paused", info)),
                ],
                Color::Yellow,
            )
        } else {
            return None;
        };

        Some(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            ),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" start | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("+/-", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Header, footer and board border rows around the board
const CHROME_ROWS: u16 = 8;

fn board_cells(snapshot: &GameSnapshot) -> (u16, u16) {
    let columns = snapshot.board_width / snapshot.cell_size;
    let rows = snapshot.board_height / snapshot.cell_size;
    (
        u16::try_from(columns).unwrap_or(u16::MAX),
        u16::try_from(rows).unwrap_or(u16::MAX),
    )
}

/// Widest cell glyph (2 or 1 characters) that fits the whole board in `area`
fn board_glyph_width(snapshot: &GameSnapshot, area: Rect) -> Option<u16> {
    let (columns, rows) = board_cells(snapshot);
    if rows.saturating_add(2) > area.height {
        return None;
    }
    [2u16, 1]
        .into_iter()
        .find(|width| columns.saturating_mul(*width).saturating_add(2) <= area.width)
}

/// Smallest terminal that shows the board with one character per cell
fn required_terminal_size(snapshot: &GameSnapshot) -> (u16, u16) {
    let (columns, rows) = board_cells(snapshot);
    (columns.saturating_add(2), rows.saturating_add(CHROME_ROWS))
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
