//! Help dialog
//!
//! Shows keyboard shortcuts for the active tab

use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{App, Tab};
use crate::tui::layout::centered_rect;
use crate::tui::theme::Theme;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.theme();
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());

    let paragraph = Paragraph::new(help_lines(app.active_tab, &theme))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines(tab: Tab, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Global Keys", theme.heading())),
        Line::from(""),
        key_line(theme, "q", "Quit application"),
        key_line(theme, "?", "Show/hide help"),
        key_line(theme, "Tab/1-3", "Switch tab"),
        key_line(theme, "j/k", "Move selection down/up"),
        Line::from(""),
    ];

    lines.push(Line::from(Span::styled(tab.title(), theme.heading())));
    lines.push(Line::from(""));
    match tab {
        Tab::Expenses => {
            lines.push(key_line(theme, "a", "Add expense"));
            lines.push(key_line(theme, "d/Del", "Delete selected expense"));
            lines.push(key_line(theme, "/", "Search titles"));
            lines.push(key_line(theme, "Esc", "Clear search"));
        }
        Tab::Categories => {
            lines.push(key_line(theme, "Enter", "Show/hide expenses"));
            lines.push(key_line(theme, "a", "Add category"));
            lines.push(key_line(theme, "d/Del", "Delete category and its expenses"));
        }
        Tab::Settings => {
            lines.push(key_line(theme, "Enter/Space", "Change selected setting"));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        theme.muted(),
    )));

    lines
}

fn key_line(theme: &Theme, key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), theme.accent()),
        Span::raw("  "),
        Span::raw(description.to_string()),
    ])
}
