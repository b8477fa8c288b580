//! Status bar view
//!
//! Shows the visible total, the last status message and key hints

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::display::format_currency;
use crate::models::Money;
use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let total = app
        .feed
        .groups()
        .iter()
        .fold(Money::zero(), |acc, group| acc + group.total());

    let mut spans = vec![
        Span::styled(
            format!(" {} expense(s)", app.feed.visible_count()),
            theme.muted(),
        ),
        Span::raw(" │ "),
        Span::styled(format_currency(total, &app.locale), theme.amount()),
    ];

    if !app.feed.query().is_empty() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("search: \"{}\"", app.feed.query()),
            theme.accent(),
        ));
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(message.as_str(), theme.heading()));
    }

    // Key hints (right-aligned)
    let hints = " q:Quit  ?:Help ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, theme.muted()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
