//! First-run intro screen

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

const POINTS: [(&str, &str); 3] = [
    (
        "Track Expenses",
        "Record what you spend and see it grouped by day.",
    ),
    (
        "Categories",
        "File expenses under categories ordered by how much you use them.",
    ),
    (
        "Search",
        "Find any expense by typing part of its title.",
    ),
];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let area = centered_rect_fixed(64, 18, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Welcome
            Constraint::Min(6),    // Points
            Constraint::Length(2), // Button
        ])
        .split(inner);

    let welcome = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Welcome to", theme.heading())),
        Line::from(Span::styled(
            "TripSpent",
            theme.title().add_modifier(Modifier::UNDERLINED),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(welcome, chunks[0]);

    let mut lines = Vec::new();
    for (title, subtitle) in POINTS {
        lines.push(Line::from(Span::styled(
            format!("  {}", title),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(format!("  {}", subtitle), theme.muted())));
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines), chunks[1]);

    let button = Paragraph::new(Line::from(vec![
        Span::styled(" Get Started ", theme.selected()),
        Span::styled("  (Enter)", theme.muted()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(button, chunks[2]);
}
