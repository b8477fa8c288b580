//! TUI Views module
//!
//! One view per tab, plus the tab bar, the status bar and the first-run
//! intro screen.

pub mod categories;
pub mod expenses;
pub mod intro;
pub mod settings;
pub mod status_bar;
pub mod tabs;

use ratatui::{widgets::Block, Frame};

use super::app::{ActiveDialog, App, Tab};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let theme = app.theme();
    let area = frame.area();
    frame.render_widget(Block::default().style(theme.base()), area);

    if app.show_intro() {
        intro::render(frame, app, area);
        return;
    }

    let layout = AppLayout::new(area);

    tabs::render(frame, app, layout.tabs);

    match app.active_tab {
        Tab::Expenses => expenses::render(frame, app, layout.main),
        Tab::Categories => categories::render(frame, app, layout.main),
        Tab::Settings => settings::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

fn render_dialog(frame: &mut Frame, app: &App) {
    match &app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::AddExpense => dialogs::add_expense::render(frame, app),
        ActiveDialog::AddCategory => dialogs::add_category::render(frame, app),
        ActiveDialog::ConfirmCategoryDelete(_) => {
            dialogs::confirm::render(frame, &app.theme(), "Delete Category", app.delete_warning())
        }
        ActiveDialog::None => {}
    }
}
