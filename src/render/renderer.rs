use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::RenderState;
use crate::metrics::SessionMetrics;

/// What occupies a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Apple,
    Body,
    Head,
}

/// Characters standing in for the head, body and apple sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub head: char,
    pub body: char,
    pub apple: char,
    pub empty: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            head: '@',
            body: 'o',
            apple: '*',
            empty: '.',
        }
    }
}

const GAME_OVER_MIN_WIDTH: u16 = 15;
const GAME_OVER_MIN_HEIGHT: u16 = 5;

pub struct Renderer {
    glyphs: Glyphs,
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_glyphs(Glyphs::default())
    }

    pub fn with_glyphs(glyphs: Glyphs) -> Self {
        Self { glyphs }
    }

    pub fn render(&self, frame: &mut Frame, view: &RenderState<'_>, metrics: &SessionMetrics) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(self.render_stats(view, metrics), header);

        let cell = view.cell_size.max(1);
        let width = to_u16(view.board_width / cell + 2);
        let height = to_u16(view.board_height / cell + 2);

        if view.is_alive && (body.width < width || body.height < height) {
            // Header and footer take one line each
            let hint = self.render_too_small(width, height.saturating_add(2));
            frame.render_widget(hint, centered(body, body.width, 2));
        } else if view.is_alive {
            let area = centered(body, width, height);
            frame.render_widget(self.render_board(view), area);
        } else {
            let area = centered(
                body,
                width.max(GAME_OVER_MIN_WIDTH),
                height.max(GAME_OVER_MIN_HEIGHT),
            );
            frame.render_widget(self.render_game_over(area), area);
        }

        frame.render_widget(self.render_controls(), footer);
    }

    /// Classify every cell, row by row. Apple first, then body, head last,
    /// so the head wins when things overlap. Off-board segments are skipped.
    pub fn cell_grid(view: &RenderState<'_>) -> Vec<Vec<CellKind>> {
        let cell = view.cell_size.max(1) as i32;
        let columns = (view.board_width as i32 / cell) as usize;
        let rows = (view.board_height as i32 / cell) as usize;
        let mut grid = vec![vec![CellKind::Empty; columns]; rows];

        let mut put = |x: i32, y: i32, kind: CellKind| {
            if x < 0 || y < 0 {
                return;
            }
            let (c, r) = ((x / cell) as usize, (y / cell) as usize);
            if let Some(slot) = grid.get_mut(r).and_then(|row| row.get_mut(c)) {
                *slot = kind;
            }
        };

        put(view.apple.x, view.apple.y, CellKind::Apple);
        for (i, segment) in view.segments.iter().enumerate() {
            if i != view.head_index {
                put(segment.x, segment.y, CellKind::Body);
            }
        }
        if let Some(head) = view.segments.get(view.head_index) {
            put(head.x, head.y, CellKind::Head);
        }

        grid
    }

    fn render_board(&self, view: &RenderState<'_>) -> Paragraph<'_> {
        let lines: Vec<Line> = Self::cell_grid(view)
            .into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|kind| self.span_for(kind))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn span_for(&self, kind: CellKind) -> Span<'static> {
        match kind {
            CellKind::Head => Span::styled(
                self.glyphs.head.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            CellKind::Body => {
                Span::styled(self.glyphs.body.to_string(), Style::default().fg(Color::Green))
            }
            CellKind::Apple => Span::styled(
                self.glyphs.apple.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            CellKind::Empty => Span::styled(
                self.glyphs.empty.to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        }
    }

    fn render_stats(&self, view: &RenderState<'_>, metrics: &SessionMetrics) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.segments.len().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("Apples: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.apples_eaten.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("   "),
            Span::styled("Ticks: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.ticks.to_string(), Style::default().fg(Color::White)),
            Span::raw("   "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, area: Rect) -> Paragraph<'_> {
        // Vertically centre the single line inside the bordered board
        let padding = area.height.saturating_sub(3) / 2;
        let mut lines = vec![Line::from(""); padding as usize];
        lines.push(Line::from(Span::styled(
            "Game Over",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_too_small(&self, need_width: u16, need_height: u16) -> Paragraph<'static> {
        let text = vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("need {need_width}x{need_height}")),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    board
}

fn to_u16(value: u32) -> u16 {
    value.min(u16::MAX as u32) as u16
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine, Position};
    use ratatui::{backend::TestBackend, Terminal};

    fn view<'a>(segments: &'a [Position], apple: Position, is_alive: bool) -> RenderState<'a> {
        RenderState {
            segments,
            head_index: 0,
            apple,
            is_alive,
            board_width: 50,
            board_height: 30,
            cell_size: 10,
            ticks: 0,
        }
    }

    fn screen_text(view: &RenderState<'_>) -> String {
        screen_text_sized(view, 40, 12)
    }

    fn screen_text_sized(view: &RenderState<'_>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let renderer = Renderer::new();
        let metrics = SessionMetrics::new();

        terminal
            .draw(|frame| renderer.render(frame, view, &metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_cell_grid_marks_head_body_and_apple() {
        let segments = [
            Position::new(20, 10),
            Position::new(10, 10),
            Position::new(0, 10),
        ];
        let grid = Renderer::cell_grid(&view(&segments, Position::new(40, 20), true));

        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0].len(), 5);
        assert_eq!(grid[1][2], CellKind::Head);
        assert_eq!(grid[1][1], CellKind::Body);
        assert_eq!(grid[1][0], CellKind::Body);
        assert_eq!(grid[2][4], CellKind::Apple);
        assert_eq!(grid[0][0], CellKind::Empty);
    }

    #[test]
    fn test_head_drawn_over_apple() {
        let segments = [Position::new(20, 10), Position::new(10, 10)];
        let grid = Renderer::cell_grid(&view(&segments, Position::new(20, 10), true));
        assert_eq!(grid[1][2], CellKind::Head);
    }

    #[test]
    fn test_off_board_head_is_skipped() {
        let segments = [Position::new(50, 10), Position::new(40, 10)];
        let grid = Renderer::cell_grid(&view(&segments, Position::new(0, 0), true));

        assert_eq!(grid[1][4], CellKind::Body);
        assert!(grid.iter().flatten().all(|kind| *kind != CellKind::Head));
    }

    #[test]
    fn test_renders_board_glyphs() {
        let segments = [Position::new(20, 10), Position::new(10, 10)];
        let text = screen_text(&view(&segments, Position::new(40, 20), true));

        assert!(text.contains(".o@.."));
        assert!(text.contains('*'));
        assert!(!text.contains("Game Over"));
    }

    #[test]
    fn test_renders_game_over() {
        let segments = [Position::new(20, 10)];
        let text = screen_text(&view(&segments, Position::new(40, 20), false));

        assert!(text.contains("Game Over"));
        assert!(!text.contains('@'));
    }

    #[test]
    fn test_header_shows_length_and_ticks() {
        let segments = [Position::new(20, 10), Position::new(10, 10)];
        let mut view = view(&segments, Position::new(40, 20), true);
        view.ticks = 17;
        let text = screen_text_sized(&view, 80, 12);

        assert!(text.contains("Length: 2"));
        assert!(text.contains("Ticks: 17"));
        assert!(text.contains("Time: 00:00"));
    }

    #[test]
    fn test_default_board_on_small_terminal_asks_for_more_room() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 5);
        let mut state = engine.new_game();
        state.apple = Position::new(100, 500);

        let text = screen_text_sized(&state.render_state(), 80, 24);

        assert!(text.contains("Terminal too small"));
        assert!(text.contains("need 62x64"));
        assert!(!text.contains('@'));
    }

    #[test]
    fn test_default_board_fits_large_terminal() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 5);
        let mut state = engine.new_game();
        state.snake.body[0] = Position::new(300, 400);
        state.apple = Position::new(100, 500);

        let text = screen_text_sized(&state.render_state(), 70, 70);

        assert!(!text.contains("Terminal too small"));
        assert!(text.contains('@'));
        assert!(text.contains('*'));
    }
}
