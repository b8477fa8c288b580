//! Tab bar

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::tui::app::{App, Tab};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" TripSpent ")
                .title_style(theme.title())
                .borders(Borders::ALL)
                .border_style(theme.muted()),
        )
        .select(app.active_tab.index())
        .style(theme.base())
        .highlight_style(theme.selected())
        .divider(" │ ");

    frame.render_widget(tabs, area);
}
