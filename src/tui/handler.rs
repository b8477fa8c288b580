//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the current
//! application state: intro screen, dialog, search input, then the active
//! tab.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, App, InputMode, Tab};
use super::dialogs;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick | Event::Resize(_, _) => Ok(()),
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    if app.show_intro() {
        handle_intro_key(app, key);
        return Ok(());
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return Ok(());
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => handle_search_key(app, key),
    }
    Ok(())
}

fn handle_intro_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.complete_intro(),
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        _ => {}
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    // Global keys
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return;
        }
        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return;
        }
        KeyCode::Tab => {
            app.switch_tab(app.active_tab.next());
            return;
        }
        KeyCode::BackTab => {
            app.switch_tab(app.active_tab.prev());
            return;
        }
        KeyCode::Char('1') => {
            app.switch_tab(Tab::Expenses);
            return;
        }
        KeyCode::Char('2') => {
            app.switch_tab(Tab::Categories);
            return;
        }
        KeyCode::Char('3') => {
            app.switch_tab(Tab::Settings);
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            return;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            return;
        }
        _ => {}
    }

    match app.active_tab {
        Tab::Expenses => handle_expenses_key(app, key),
        Tab::Categories => handle_categories_key(app, key),
        Tab::Settings => handle_settings_key(app, key),
    }
}

fn handle_expenses_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_dialog(ActiveDialog::AddExpense),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_expense(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Esc => {
            if app.search_input.is_empty() {
                app.clear_status();
            } else {
                app.end_search(false);
            }
        }
        _ => {}
    }
}

fn handle_categories_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_expanded_category(),
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_dialog(ActiveDialog::AddCategory),
        KeyCode::Char('d') | KeyCode::Delete => app.request_category_delete(),
        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_setting(),
        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
}

/// Keys while the search field has focus; every edit re-filters
fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.end_search(false);
            return;
        }
        KeyCode::Enter | KeyCode::Down => {
            app.end_search(true);
            return;
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.insert(c)
        }
        KeyCode::Backspace => app.search_input.backspace(),
        KeyCode::Delete => app.search_input.delete(),
        KeyCode::Left => {
            app.search_input.move_left();
            return;
        }
        KeyCode::Right => {
            app.search_input.move_right();
            return;
        }
        _ => return,
    }
    app.apply_search();
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog.clone() {
        ActiveDialog::Help => {
            // Close help on any key
            app.close_dialog();
        }
        ActiveDialog::AddExpense => dialogs::add_expense::handle_key(app, key),
        ActiveDialog::AddCategory => dialogs::add_category::handle_key(app, key),
        ActiveDialog::ConfirmCategoryDelete(id) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_category_delete(id),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.close_dialog();
                app.set_status("Cancelled");
            }
            _ => {}
        },
        ActiveDialog::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, TrackerPaths};
    use crate::models::Category;
    use crate::storage::Storage;
    use std::time::Duration;
    use tempfile::TempDir;

    fn setup() -> (TempDir, TrackerPaths, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        (temp_dir, paths, storage)
    }

    fn seen_intro() -> Settings {
        let mut settings = Settings::default();
        settings.complete_first_run();
        settings
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn settle(app: &mut App) {
        app.sync_feed();
        assert!(app.feed.wait_idle(Duration::from_secs(5)));
    }

    #[test]
    fn test_intro_gates_the_app() {
        let (_temp_dir, paths, storage) = setup();
        let mut app = App::new(&storage, Settings::default(), &paths).unwrap();

        // Tab keys do nothing until the intro is dismissed
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_tab, Tab::Expenses);

        press(&mut app, KeyCode::Enter);
        assert!(!app.show_intro());
        assert!(Settings::load_or_create(&paths).unwrap().first_run_completed);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_tab, Tab::Categories);
    }

    #[test]
    fn test_add_expense_through_dialog() {
        let (_temp_dir, paths, storage) = setup();
        let mut app = App::new(&storage, seen_intro(), &paths).unwrap();

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.active_dialog, ActiveDialog::AddExpense);

        type_text(&mut app, "Coffee");
        // Incomplete: Enter is ignored
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.active_dialog, ActiveDialog::AddExpense);

        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Flat white");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "4.50");
        press(&mut app, KeyCode::Enter);

        assert!(!app.has_dialog());
        settle(&mut app);
        assert_eq!(app.feed.visible_count(), 1);
        assert_eq!(app.selected_expense().unwrap().title, "Coffee");
    }

    #[test]
    fn test_search_filters_and_escape_restores() {
        let (_temp_dir, paths, storage) = setup();
        let service = crate::services::ExpenseService::new(&storage);
        for title in ["Coffee", "Taxi", "Coffee Maker"] {
            let mut draft = crate::models::ExpenseDraft::new();
            draft.title = title.into();
            draft.subtitle = "desc".into();
            draft.amount = crate::models::Money::from_cents(100);
            service.create(draft).unwrap();
        }
        let mut app = App::new(&storage, seen_intro(), &paths).unwrap();
        settle(&mut app);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "coffee");
        settle(&mut app);
        assert_eq!(app.feed.visible_count(), 2);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.feed.visible_count(), 3);
    }

    #[test]
    fn test_category_delete_needs_y() {
        let (_temp_dir, paths, storage) = setup();
        storage.categories.upsert(Category::new("Travel")).unwrap();
        let mut app = App::new(&storage, seen_intro(), &paths).unwrap();

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(
            app.active_dialog,
            ActiveDialog::ConfirmCategoryDelete(_)
        ));

        // Enter does not confirm a destructive delete
        press(&mut app, KeyCode::Enter);
        assert_eq!(storage.categories.count().unwrap(), 1);

        press(&mut app, KeyCode::Char('n'));
        assert!(!app.has_dialog());
        assert_eq!(storage.categories.count().unwrap(), 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(storage.categories.count().unwrap(), 0);
    }

    #[test]
    fn test_quit_keys() {
        let (_temp_dir, paths, storage) = setup();
        let mut app = App::new(&storage, seen_intro(), &paths).unwrap();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
