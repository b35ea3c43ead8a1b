pub mod announcement;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::game::{Ball, GameSession, GameState, Paddle, Side};

const COURT_BG: Color = Color::Rgb(10, 30, 20);
const LINE_FG: Color = Color::Rgb(60, 110, 80);

fn frame_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 200, 120)))
        .title(" 🎾 Tennis ")
        .title_style(Style::default().fg(Color::Rgb(120, 255, 160)).add_modifier(Modifier::BOLD))
}

/// Status bar, court, help bar.
fn split(area: Rect) -> [Rect; 3] {
    let inner = frame_block().inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);
    [chunks[0], chunks[1], chunks[2]]
}

/// The cells the playing field occupies for a terminal of `area`.
/// One field unit is one cell.
pub fn court_area(area: Rect) -> Rect {
    split(area)[1]
}

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(frame_block(), area);
    let [status, court, help] = split(area);

    frame.render_widget(Paragraph::new(status_line(&app.session)), status);

    let lines = render_court(&app.session, court.width as usize, court.height as usize);
    frame.render_widget(Paragraph::new(lines), court);

    frame.render_widget(Paragraph::new(help_line(app.session.state())), help);

    if let Some(message) = &app.announcement {
        announcement::render(frame, area, message);
    }
}

fn status_line(session: &GameSession) -> Line<'static> {
    let score = session.score();
    let speed = session.ball().speed / session.config().initial_speed;
    let (state, state_color) = match session.state() {
        GameState::Playing => ("▶ Rally", Color::Rgb(120, 255, 160)),
        GameState::Stopped => match session.last_failed_side() {
            Some(Side::Left) => ("⏸ Left serves", Color::Yellow),
            Some(Side::Right) => ("⏸ Right serves", Color::Yellow),
            None => ("⏸ Serve", Color::Yellow),
        },
        GameState::Goal => ("Goal!", Color::Rgb(255, 120, 80)),
        GameState::Finished => ("Game over", Color::Rgb(255, 120, 80)),
    };
    Line::from(vec![
        Span::styled(
            format!(" Left {} ", score.get(Side::Left)),
            Style::default().fg(Color::Rgb(100, 180, 255)).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Right {} ", score.get(Side::Right)),
            Style::default().fg(Color::Rgb(255, 160, 60)).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("First to {} ", session.config().max_score),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("Speed ×{speed:.2} "), Style::default().fg(Color::Cyan)),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(state, Style::default().fg(state_color).add_modifier(Modifier::BOLD)),
    ])
}

fn help_line(state: GameState) -> Line<'static> {
    let sep = || Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60)));
    let mut spans = vec![
        Span::styled(" W/S Left paddle ", Style::default().fg(Color::DarkGray)),
        sep(),
        Span::styled("↑/↓ Right paddle ", Style::default().fg(Color::DarkGray)),
        sep(),
        Span::styled("Q Quit ", Style::default().fg(Color::DarkGray)),
    ];
    if state == GameState::Stopped {
        spans.push(sep());
        spans.push(Span::styled(
            "Move a paddle to serve",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

type Grid = Vec<Vec<(char, Style)>>;

/// Cells covered by `[start, start + len)`, clipped to `limit`.
fn cell_span(start: f32, len: f32, limit: usize) -> std::ops::Range<usize> {
    let from = start.max(0.0).floor() as usize;
    let to = ((start + len).max(0.0).ceil() as usize).min(limit);
    from.min(to)..to
}

fn fill(grid: &mut Grid, left: f32, top: f32, width: f32, height: f32, cell: (char, Style)) {
    let h = grid.len();
    let w = grid.first().map_or(0, |row| row.len());
    for y in cell_span(top, height, h) {
        for x in cell_span(left, width, w) {
            grid[y][x] = cell;
        }
    }
}

fn draw_paddle(grid: &mut Grid, paddle: &Paddle, color: Color) {
    let style = Style::default().fg(color).bg(COURT_BG);
    fill(grid, paddle.left, paddle.top, paddle.width, paddle.height, ('█', style));
}

fn draw_ball(grid: &mut Grid, ball: &Ball) {
    let style = Style::default()
        .fg(Color::Rgb(230, 255, 120))
        .bg(COURT_BG)
        .add_modifier(Modifier::BOLD);
    fill(grid, ball.left, ball.top, ball.size, ball.size, ('●', style));
}

fn render_court(session: &GameSession, width: usize, height: usize) -> Vec<Line<'static>> {
    let bg = Style::default().bg(COURT_BG);
    let mut grid: Grid = vec![vec![(' ', bg); width]; height];

    // Net
    if width > 0 {
        let net = width / 2;
        for (y, row) in grid.iter_mut().enumerate() {
            if y % 2 == 0 {
                row[net] = ('┊', Style::default().fg(LINE_FG).bg(COURT_BG));
            }
        }
    }

    draw_paddle(&mut grid, session.paddle(Side::Left), Color::Rgb(100, 180, 255));
    draw_paddle(&mut grid, session.paddle(Side::Right), Color::Rgb(255, 160, 60));
    draw_ball(&mut grid, session.ball());

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}
