use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CellKind, GameStatus, GameView, GridSnapshot};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame; `message` is the latest event line, if any
    pub fn render(&self, frame: &mut Frame, view: &GameView, message: Option<&str>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Event line
                Constraint::Length(2), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match view.status {
            GameStatus::Running => frame.render_widget(self.render_grid(&view.grid), game_area),
            GameStatus::GameOver => frame.render_widget(self.render_game_over(view), game_area),
        }

        if let Some(message) = message {
            let line = Paragraph::new(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Magenta),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(line, chunks[2]);
        }

        frame.render_widget(self.render_controls(), chunks[3]);
    }

    fn cell_span(kind: CellKind) -> Span<'static> {
        match kind {
            CellKind::Head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            CellKind::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
            CellKind::Food => Span::styled(
                "● ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            CellKind::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }

    fn render_grid(&self, grid: &GridSnapshot) -> Paragraph<'static> {
        let lines: Vec<Line> = grid
            .rows()
            .map(|row| {
                let spans: Vec<Span> = row.iter().map(|&kind| Self::cell_span(kind)).collect();
                Line::from(spans)
            })
            .collect();

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

    fn render_stats(&self, view: &GameView) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(vec![
                Span::styled("Score: ", label),
                Span::styled(view.score.to_string(), value),
                Span::raw("    "),
                Span::styled("High Score: ", label),
                Span::styled(view.high_score.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Difficulty: ", label),
                Span::styled(view.difficulty.to_string(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Walls: ", label),
                Span::styled(view.boundary.to_string(), Style::default().fg(Color::White)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, view: &GameView) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
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
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" restart | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            Line::from(vec![
                Span::styled("1-4", Style::default().fg(Color::Cyan)),
                Span::raw(" easy/normal/hard/special | "),
                Span::styled("Tab", Style::default().fg(Color::Cyan)),
                Span::raw(" next difficulty"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BoundaryPolicy, Cell, Difficulty, GameState, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn view(status: GameStatus) -> GameView {
        let mut state = GameState::new(Snake::initial(3), Some(Cell::new(5, 5)), 10);
        state.status = status;
        GameView {
            grid: GridSnapshot::from_state(&state),
            score: 7,
            high_score: 12,
            status,
            difficulty: Difficulty::Hard,
            boundary: BoundaryPolicy::Wrap,
        }
    }

    fn draw(view: &GameView, message: Option<&str>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, view, message))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_running_frame() {
        let screen = draw(&view(GameStatus::Running), Some("Yum! Score 7"));

        assert!(screen.contains("Score: 7"));
        assert!(screen.contains("High Score: 12"));
        assert!(screen.contains("Difficulty: hard"));
        assert!(screen.contains("Walls: wrap"));
        assert!(screen.contains("Yum! Score 7"));
        assert!(screen.contains("■"));
        assert!(screen.contains("●"));
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_frame() {
        let screen = draw(&view(GameStatus::GameOver), None);

        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Final Score: 7"));
        assert!(!screen.contains("■"));
    }
}
