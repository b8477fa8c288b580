//! Expenses tab
//!
//! Day groups newest first, each under a "Today"/"Yesterday"/date heading
//! with its subtotal. Headings are not selectable; the selection index
//! counts expenses only.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::display::{fit, format_currency};
use crate::tui::app::{App, InputMode};
use crate::tui::layout::ExpensesLayout;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let searching = app.input_mode == InputMode::Search || !app.search_input.is_empty();
    let layout = ExpensesLayout::new(area, searching);

    if searching {
        render_search(frame, app, layout.search);
    }
    render_list(frame, app, layout.list);
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let border = if app.input_mode == InputMode::Search {
        theme.accent()
    } else {
        theme.muted()
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(app.search_input.clone().accent(theme.accent), inner);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let title = if app.feed.is_busy() {
        " Expenses (updating...) "
    } else {
        " Expenses "
    };
    let block = Block::default()
        .title(title)
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.muted());

    let groups = app.feed.groups();
    if groups.is_empty() {
        let message = if app.feed.query().is_empty() {
            "No expenses yet. Press 'a' to add one."
        } else {
            "No expenses match your search."
        };
        frame.render_widget(Paragraph::new(message).block(block).style(theme.muted()), area);
        return;
    }

    let names = app.category_names();
    let today = app.feed.calendar().today();
    let title_width = (area.width as usize).saturating_sub(50).clamp(12, 40);

    let mut items = Vec::new();
    let mut selected_row = None;
    let mut expense_index = 0;

    for group in groups {
        items.push(ListItem::new(Line::from(vec![
            Span::styled(group.title(today), theme.heading()),
            Span::styled(
                format!("  {}", format_currency(group.total(), &app.locale)),
                theme.muted(),
            ),
        ])));

        for expense in &group.expenses {
            if expense_index == app.selected_expense_index {
                selected_row = Some(items.len());
            }
            expense_index += 1;

            let category = expense
                .category_id
                .and_then(|id| names.get(&id))
                .map(String::as_str)
                .unwrap_or("");

            items.push(ListItem::new(Line::from(vec![
                Span::raw("  "),
                Span::raw(fit(&expense.title, title_width)),
                Span::raw(" "),
                Span::styled(fit(&expense.subtitle, 20), theme.muted()),
                Span::raw(" "),
                Span::styled(fit(category, 12), theme.accent()),
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
