//! Confirmation dialog
//!
//! Destructive yes/no prompt. Only an explicit `y` confirms.

use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect_fixed;
use crate::tui::theme::Theme;

/// Render a confirmation dialog
pub fn render(frame: &mut Frame, theme: &Theme, title: &str, message: &str) {
    let area = centered_rect_fixed(56, 9, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.danger())
        .borders(Borders::ALL)
        .border_style(theme.danger())
        .style(theme.base());

    let lines = vec![
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", theme.danger()),
            Span::raw(" Delete  "),
            Span::styled("[N]", theme.accent()),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
