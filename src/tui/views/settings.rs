//! Settings tab

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::display::fit;
use crate::tui::app::{App, SettingItem};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let block = Block::default()
        .title(" Settings ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.muted());

    let items: Vec<ListItem> = SettingItem::ALL
        .iter()
        .map(|item| {
            let value = match item {
                SettingItem::DarkMode => checkbox(app.settings.dark_mode_enabled),
                SettingItem::Locale => app.locale.clone(),
                SettingItem::ReplayIntro => checkbox(!app.settings.first_run_completed),
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("  {}", fit(item.label(), 28))),
                Span::styled(value, theme.accent()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected());

    let mut state = ListState::default();
    state.select(Some(app.selected_setting_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn checkbox(checked: bool) -> String {
    let mark = if checked { "[x]" } else { "[ ]" };
    mark.to_string()
}
