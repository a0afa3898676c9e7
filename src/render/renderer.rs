use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, GameEvent, GameState};
use crate::metrics::GameMetrics;

/// What occupies a board cell on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Head,
    Body,
    Tail,
    Food,
    Empty,
}

impl Glyph {
    fn of(state: &GameState, cell: Cell) -> Self {
        let snake = state.snake();
        if cell == snake.head() {
            Glyph::Head
        } else if snake.len() > 1 && cell == snake.tail() {
            Glyph::Tail
        } else if state.is_occupied_by_snake(cell) {
            Glyph::Body
        } else if cell == state.food() && !state.is_won() {
            Glyph::Food
        } else {
            Glyph::Empty
        }
    }

    fn span(self) -> Span<'static> {
        match self {
            Glyph::Head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Glyph::Body => Span::styled("□ ", Style::default().fg(Color::Gray)),
            Glyph::Tail => Span::styled("□ ", Style::default().fg(Color::Red)),
            Glyph::Food => Span::styled(
                "O ",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Glyph::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        last_event: Option<GameEvent>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Last event
                Constraint::Length(2), // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.is_over() {
            frame.render_widget(self.render_game_over(state), game_area);
        } else {
            frame.render_widget(self.render_grid(state), game_area);
        }

        frame.render_widget(self.render_event(last_event), chunks[2]);
        frame.render_widget(self.render_controls(), chunks[3]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        let size = state.board().size() as i32;
        let lines: Vec<Line> = (0..size)
            .map(|row| {
                let spans: Vec<Span> = (0..size)
                    .map(|col| Glyph::of(state, Cell::new(row, col)).span())
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(format!(" Snake {size}x{size} ")),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));
        let value = |text: String| Span::styled(text, Style::default().fg(Color::White));

        let text = vec![
            Line::from(vec![
                label("Score: "),
                Span::styled(
                    state.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                label("Length: "),
                value(state.snake().len().to_string()),
                Span::raw("    "),
                label("Steps: "),
                value(state.steps().to_string()),
                Span::raw("    "),
                label("Time: "),
                value(metrics.clock()),
            ]),
            Line::from(vec![
                label("Best: "),
                value(metrics.best_score().to_string()),
                Span::raw("    "),
                label("Games: "),
                value(metrics.games().to_string()),
                Span::raw("    "),
                label("Wins: "),
                value(metrics.wins().to_string()),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'static> {
        let (title, color) = if state.is_won() {
            ("YOU WIN", Color::Green)
        } else {
            ("GAME OVER", Color::Red)
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.snake().len().to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_event(&self, event: Option<GameEvent>) -> Paragraph<'static> {
        let line = match event {
            Some(GameEvent::FoodEaten) => {
                Span::styled("Yum!", Style::default().fg(Color::Blue))
            }
            Some(GameEvent::GameOver) => {
                Span::styled("Crashed", Style::default().fg(Color::Red))
            }
            Some(GameEvent::Victory) => Span::styled(
                "Board filled!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::raw(""),
        };

        Paragraph::new(Line::from(line)).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
