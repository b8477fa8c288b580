//! Categories tab
//!
//! Categories ordered by expense count. The expanded category lists its
//! expenses underneath, or a "No Expenses" note.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::display::{fit, format_currency};
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let block = Block::default()
        .title(" Categories ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.muted());

    let usages = app.category_usages();
    if usages.is_empty() {
        frame.render_widget(
            Paragraph::new("No categories. Press 'a' to add one.")
                .block(block)
                .style(theme.muted()),
            area,
        );
        return;
    }

    let mut items = Vec::new();
    let mut selected_row = None;

    for (i, usage) in usages.iter().enumerate() {
        if i == app.selected_category_index {
            selected_row = Some(items.len());
        }

        let expanded = app.expanded_category == Some(usage.category.id);
        let marker = if expanded { "▾" } else { "▸" };
        items.push(ListItem::new(Line::from(vec![
            Span::raw(format!("{} ", marker)),
            Span::styled(usage.category.name.clone(), theme.heading()),
            Span::styled(format!("  ({})", usage.expense_count()), theme.muted()),
        ])));

        if !expanded {
            continue;
        }

        if usage.expenses.is_empty() {
            items.push(ListItem::new(Span::styled("    No Expenses", theme.muted())));
            continue;
        }

        for expense in &usage.expenses {
            items.push(ListItem::new(Line::from(vec![
                Span::raw("    "),
                Span::raw(fit(&expense.title, 24)),
                Span::raw(" "),
                Span::styled(fit(&expense.subtitle, 20), theme.muted()),
                Span::styled(
                    format!("{:>14}", format_currency(expense.amount, &app.locale)),
                    theme.amount(),
                ),
            ])));
        }
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected());

    let mut state = ListState::default();
    state.select(selected_row);
    frame.render_stateful_widget(list, area, &mut state);
}
