//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! It owns a copy of the settings (saved whenever the user changes one) and
//! the expense feed, which it keeps in step with the expense repository
//! through a change subscription.

use std::collections::HashMap;
use std::sync::mpsc::Receiver;

use crate::config::{Settings, TrackerPaths};
use crate::display::currency::{normalize_locale, supported_locales};
use crate::error::TrackerResult;
use crate::feed::ExpenseFeed;
use crate::models::{CategoryId, CategoryUsage, Expense};
use crate::services::{CategoryService, ExpenseService, CATEGORY_DELETE_WARNING};
use crate::storage::Storage;

use super::dialogs::add_category::CategoryFormState;
use super::dialogs::add_expense::ExpenseFormState;
use super::theme::Theme;
use super::widgets::TextInput;

/// Top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Expenses,
    Categories,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Expenses, Tab::Categories, Tab::Settings];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Expenses => "Expenses",
            Tab::Categories => "Categories",
            Tab::Settings => "Settings",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Expenses => 0,
            Tab::Categories => 1,
            Tab::Settings => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Rows of the settings tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingItem {
    DarkMode,
    Locale,
    ReplayIntro,
}

impl SettingItem {
    pub const ALL: [SettingItem; 3] = [
        SettingItem::DarkMode,
        SettingItem::Locale,
        SettingItem::ReplayIntro,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingItem::DarkMode => "Dark Mode",
            SettingItem::Locale => "Currency Locale",
            SettingItem::ReplayIntro => "Show Intro on Next Launch",
        }
    }
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Keys edit the search query
    Search,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    AddExpense,
    AddCategory,
    ConfirmCategoryDelete(CategoryId),
}

/// Main application state
pub struct App<'a> {
    pub storage: &'a Storage,
    pub paths: &'a TrackerPaths,
    pub settings: Settings,

    /// Locale used for every amount on screen
    pub locale: String,

    pub should_quit: bool,
    pub active_tab: Tab,
    pub input_mode: InputMode,
    pub active_dialog: ActiveDialog,

    /// Grouped, searchable expense list for the Expenses tab
    pub feed: ExpenseFeed,
    updates: Receiver<Vec<Expense>>,

    pub search_input: TextInput,

    /// Selection in the flattened list of visible expenses
    pub selected_expense_index: usize,

    /// Selection in the usage-ordered category list
    pub selected_category_index: usize,

    /// Category whose expenses are shown inline
    pub expanded_category: Option<CategoryId>,

    pub selected_setting_index: usize,

    pub expense_form: ExpenseFormState,
    pub category_form: CategoryFormState,

    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    /// Create the app and issue the first grouping
    pub fn new(
        storage: &'a Storage,
        settings: Settings,
        paths: &'a TrackerPaths,
    ) -> TrackerResult<Self> {
        let updates = storage.expenses.subscribe()?;
        let mut feed = ExpenseFeed::default();
        feed.on_expenses_changed(storage.expenses.get_all()?, false);

        let locale = settings.effective_locale();

        Ok(Self {
            storage,
            paths,
            settings,
            locale,
            should_quit: false,
            active_tab: Tab::default(),
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            feed,
            updates,
            search_input: TextInput::new().label("Search").placeholder("Search by title"),
            selected_expense_index: 0,
            selected_category_index: 0,
            expanded_category: None,
            selected_setting_index: 0,
            expense_form: ExpenseFormState::default(),
            category_form: CategoryFormState::default(),
            status_message: None,
        })
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn theme(&self) -> Theme {
        Theme::for_appearance(self.settings.appearance())
    }

    /// Whether the first-run intro is still to be dismissed
    pub fn show_intro(&self) -> bool {
        !self.settings.first_run_completed
    }

    /// Pull pending store changes into the feed and apply finished work
    ///
    /// Only the newest snapshot matters, so intermediate ones are skipped.
    /// While the Categories tab is showing, every change forces a regroup so
    /// cascade deletes are reflected even though the list shrank.
    pub fn sync_feed(&mut self) {
        if let Some(latest) = self.updates.try_iter().last() {
            let force = self.active_tab == Tab::Categories;
            self.feed.on_expenses_changed(latest, force);
        }

        if self.feed.poll() {
            self.clamp_expense_selection();
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.input_mode = InputMode::Normal;
        if tab == Tab::Categories {
            self.selected_category_index = 0;
        }
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match &dialog {
            ActiveDialog::AddExpense => {
                let categories = self
                    .storage
                    .categories
                    .get_all()
                    .unwrap_or_default()
                    .into_iter()
                    .map(|c| (c.id, c.name))
                    .collect();
                self.expense_form = ExpenseFormState::new(categories);
            }
            ActiveDialog::AddCategory => {
                self.category_form = CategoryFormState::new();
            }
            _ => {}
        }
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// Visible expenses in display order, flattened across day groups
    pub fn visible_expenses(&self) -> Vec<&Expense> {
        self.feed
            .groups()
            .iter()
            .flat_map(|group| group.expenses.iter())
            .collect()
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.visible_expenses()
            .get(self.selected_expense_index)
            .copied()
    }

    /// Categories with their expenses, most-used first
    pub fn category_usages(&self) -> Vec<CategoryUsage> {
        CategoryService::new(self.storage)
            .list_by_usage()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to list categories");
                Vec::new()
            })
    }

    pub fn category_names(&self) -> HashMap<CategoryId, String> {
        self.storage
            .categories
            .get_all()
            .unwrap_or_default()
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect()
    }

    pub fn move_up(&mut self) {
        let index = match self.active_tab {
            Tab::Expenses => &mut self.selected_expense_index,
            Tab::Categories => &mut self.selected_category_index,
            Tab::Settings => &mut self.selected_setting_index,
        };
        *index = index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let max = match self.active_tab {
            Tab::Expenses => self.feed.visible_count(),
            Tab::Categories => self.storage.categories.count().unwrap_or(0),
            Tab::Settings => SettingItem::ALL.len(),
        };
        let index = match self.active_tab {
            Tab::Expenses => &mut self.selected_expense_index,
            Tab::Categories => &mut self.selected_category_index,
            Tab::Settings => &mut self.selected_setting_index,
        };
        if *index + 1 < max {
            *index += 1;
        }
    }

    fn clamp_expense_selection(&mut self) {
        let count = self.feed.visible_count();
        if self.selected_expense_index >= count {
            self.selected_expense_index = count.saturating_sub(1);
        }
    }

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.search_input.focused = true;
    }

    /// Leave search mode, keeping the query when `keep` is set
    pub fn end_search(&mut self, keep: bool) {
        self.input_mode = InputMode::Normal;
        self.search_input.focused = false;
        if !keep {
            self.search_input.clear();
            self.feed.set_query("");
            self.selected_expense_index = 0;
        }
    }

    /// Push the search field's text to the feed
    pub fn apply_search(&mut self) {
        self.feed.set_query(self.search_input.value());
        self.selected_expense_index = 0;
    }

    /// Delete the highlighted expense without confirmation
    pub fn delete_selected_expense(&mut self) {
        let Some(expense) = self.selected_expense().cloned() else {
            return;
        };

        self.feed.remove_expense(expense.id);
        self.clamp_expense_selection();

        match ExpenseService::new(self.storage).delete(expense.id) {
            Ok(_) => self.set_status(format!("Deleted '{}'", expense.title)),
            Err(e) => {
                tracing::error!(error = %e, id = %expense.id, "expense delete failed");
                self.set_status(format!("Failed to delete: {}", e));
                // The feed dropped the row already; rebuild it from the store
                if let Ok(all) = self.storage.expenses.get_all() {
                    self.feed.on_expenses_changed(all, true);
                }
            }
        }
    }

    /// Create an expense from the dialog, if the form allows it
    pub fn submit_expense_form(&mut self) {
        let Some(draft) = self.expense_form.draft() else {
            return;
        };
        if !draft.is_submittable() {
            return;
        }

        match ExpenseService::new(self.storage).create(draft) {
            Ok(expense) => {
                self.close_dialog();
                self.set_status(format!("Added '{}'", expense.title));
            }
            Err(e) => self.expense_form.set_error(e.to_string()),
        }
    }

    /// Create a category from the dialog, if the name is not blank
    pub fn submit_category_form(&mut self) {
        if !self.category_form.can_submit() {
            return;
        }

        let name = self.category_form.name_input.value().to_string();
        match CategoryService::new(self.storage).create(&name) {
            Ok(category) => {
                self.close_dialog();
                self.set_status(format!("Added category '{}'", category.name));
            }
            Err(e) => self.category_form.error_message = Some(e.to_string()),
        }
    }

    /// Ask for confirmation before deleting the highlighted category
    pub fn request_category_delete(&mut self) {
        let usages = self.category_usages();
        if let Some(usage) = usages.get(self.selected_category_index) {
            self.open_dialog(ActiveDialog::ConfirmCategoryDelete(usage.category.id));
        }
    }

    /// Warning text for the pending category delete
    pub fn delete_warning(&self) -> &'static str {
        CATEGORY_DELETE_WARNING
    }

    /// Run a category delete the user has confirmed
    pub fn confirm_category_delete(&mut self, id: CategoryId) {
        self.close_dialog();

        match CategoryService::new(self.storage).delete(id, true) {
            Ok(deletion) => {
                if self.expanded_category == Some(id) {
                    self.expanded_category = None;
                }
                let count = self.storage.categories.count().unwrap_or(0);
                if self.selected_category_index >= count {
                    self.selected_category_index = count.saturating_sub(1);
                }
                self.set_status(format!(
                    "Deleted '{}' and {} expense(s)",
                    deletion.category.name,
                    deletion.removed_expenses.len()
                ));
            }
            Err(e) => {
                tracing::error!(error = %e, id = %id, "category delete failed");
                self.set_status(format!("Failed to delete: {}", e));
            }
        }
    }

    /// Show or hide the highlighted category's expenses
    pub fn toggle_expanded_category(&mut self) {
        let usages = self.category_usages();
        if let Some(usage) = usages.get(self.selected_category_index) {
            let id = usage.category.id;
            self.expanded_category = if self.expanded_category == Some(id) {
                None
            } else {
                Some(id)
            };
        }
    }

    /// Dismiss the intro screen for good
    pub fn complete_intro(&mut self) {
        self.settings.complete_first_run();
        self.save_settings();
    }

    /// Change the highlighted setting
    pub fn activate_setting(&mut self) {
        match SettingItem::ALL.get(self.selected_setting_index) {
            Some(SettingItem::DarkMode) => {
                let enabled = self.settings.toggle_dark_mode();
                self.save_settings();
                self.set_status(if enabled {
                    "Dark mode on"
                } else {
                    "Dark mode off"
                });
            }
            Some(SettingItem::Locale) => {
                self.locale = next_locale(&self.locale);
                self.settings.locale = Some(self.locale.clone());
                self.save_settings();
                self.set_status(format!("Currency locale: {}", self.locale));
            }
            Some(SettingItem::ReplayIntro) => {
                self.settings.first_run_completed = false;
                self.save_settings();
                self.set_status("Intro will show on next launch");
            }
            None => {}
        }
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(self.paths) {
            tracing::error!(error = %e, "failed to save settings");
            self.set_status(format!("Failed to save settings: {}", e));
        }
    }
}

/// The supported locale after `current`, wrapping around
fn next_locale(current: &str) -> String {
    let current = normalize_locale(current);
    let locales: Vec<&str> = supported_locales().collect();
    let next = locales
        .iter()
        .position(|l| *l == current)
        .map(|i| (i + 1) % locales.len())
        .unwrap_or(0);
    locales[next].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseDraft, Money};
    use chrono::Utc;
    use std::time::Duration;
    use tempfile::TempDir;

    const WAIT: Duration = Duration::from_secs(5);

    fn setup() -> (TempDir, TrackerPaths, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        (temp_dir, paths, storage)
    }

    fn settle(app: &mut App) {
        app.sync_feed();
        assert!(app.feed.wait_idle(WAIT));
    }

    fn add(storage: &Storage, title: &str, category: Option<CategoryId>) -> Expense {
        ExpenseService::new(storage)
            .create(ExpenseDraft {
                title: title.into(),
                subtitle: "desc".into(),
                amount: Money::from_cents(500),
                date: Utc::now(),
                category_id: category,
            })
            .unwrap()
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Expenses.next(), Tab::Categories);
        assert_eq!(Tab::Settings.next(), Tab::Expenses);
        assert_eq!(Tab::Expenses.prev(), Tab::Settings);
    }

    #[test]
    fn test_feed_follows_store() {
        let (_temp_dir, paths, storage) = setup();
        let mut app = App::new(&storage, Settings::default(), &paths).unwrap();
        settle(&mut app);
        assert_eq!(app.feed.visible_count(), 0);

        add(&storage, "Coffee", None);
        add(&storage, "Taxi", None);
        settle(&mut app);

        assert_eq!(app.feed.visible_count(), 2);
    }

    #[test]
    fn test_delete_selected_expense() {
        let (_temp_dir, paths, storage) = setup();
        add(&storage, "Coffee", None);
        let mut app = App::new(&storage, Settings::default(), &paths).unwrap();
        settle(&mut app);

        app.delete_selected_expense();
        settle(&mut app);

        assert_eq!(app.feed.visible_count(), 0);
        assert_eq!(storage.expenses.count().unwrap(), 0);
        assert_eq!(app.status_message.as_deref(), Some("Deleted 'Coffee'"));
    }

    #[test]
    fn test_cascade_delete_refreshes_feed() {
        let (_temp_dir, paths, storage) = setup();
        let travel = Category::new("Travel");
        storage.categories.upsert(travel.clone()).unwrap();
        add(&storage, "Flight", Some(travel.id));
        add(&storage, "Coffee", None);

        let mut app = App::new(&storage, Settings::default(), &paths).unwrap();
        settle(&mut app);
        app.switch_tab(Tab::Categories);

        app.request_category_delete();
        assert_eq!(
            app.active_dialog,
            ActiveDialog::ConfirmCategoryDelete(travel.id)
        );
        app.confirm_category_delete(travel.id);
        settle(&mut app);

        assert!(!app.has_dialog());
        let titles: Vec<_> = app.visible_expenses().iter().map(|e| e.title.clone()).collect();
        assert_eq!(titles, vec!["Coffee"]);
    }

    #[test]
    fn test_settings_changes_are_saved() {
        let (_temp_dir, paths, storage) = setup();
        let mut app = App::new(&storage, Settings::default(), &paths).unwrap();
        assert!(app.show_intro());

        app.complete_intro();
        assert!(!app.show_intro());

        app.switch_tab(Tab::Settings);
        app.activate_setting();
        assert_eq!(app.theme(), Theme::DARK);

        let saved = Settings::load_or_create(&paths).unwrap();
        assert!(saved.first_run_completed);
        assert!(saved.dark_mode_enabled);
    }

    #[test]
    fn test_next_locale_wraps() {
        let all: Vec<&str> = supported_locales().collect();
        assert_eq!(next_locale(all[0]), all[1]);
        assert_eq!(next_locale(all[all.len() - 1]), all[0]);
        assert_eq!(next_locale("xx_YY"), all[0]);
    }
}
