//! Add expense dialog
//!
//! Modal form with title, description, amount, date and an optional
//! category. The Add action stays disabled until the draft is submittable.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::cli::expense::parse_expense_date;
use crate::models::{CategoryId, ExpenseDraft, Money};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::theme::Theme;
use crate::tui::widgets::TextInput;

/// Which field is currently focused in the expense form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseField {
    #[default]
    Title,
    Description,
    Amount,
    Date,
    Category,
}

impl ExpenseField {
    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Amount,
            Self::Amount => Self::Date,
            Self::Date => Self::Category,
            Self::Category => Self::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Category,
            Self::Description => Self::Title,
            Self::Amount => Self::Description,
            Self::Date => Self::Amount,
            Self::Category => Self::Date,
        }
    }
}

/// State for the add expense dialog
#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    pub focused_field: ExpenseField,
    pub title_input: TextInput,
    pub description_input: TextInput,
    pub amount_input: TextInput,
    pub date_input: TextInput,
    /// Categories offered by the picker, in creation order
    pub categories: Vec<(CategoryId, String)>,
    /// Index into `categories`; `None` files the expense uncategorized
    pub category_index: Option<usize>,
    pub error_message: Option<String>,
}

impl Default for ExpenseFormState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ExpenseFormState {
    pub fn new(categories: Vec<(CategoryId, String)>) -> Self {
        let today = Local::now().date_naive();
        let mut state = Self {
            focused_field: ExpenseField::Title,
            title_input: TextInput::new()
                .label("Title")
                .placeholder("e.g. Magic Keyboard"),
            description_input: TextInput::new()
                .label("Description")
                .placeholder("e.g. Bought a keyboard at the store"),
            amount_input: TextInput::new().label("Amount").placeholder("0.00"),
            date_input: TextInput::new()
                .label("Date")
                .content(today.format("%Y-%m-%d").to_string()),
            categories,
            category_index: None,
            error_message: None,
        };
        state.update_focus();
        state
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.update_focus();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.title_input.focused = self.focused_field == ExpenseField::Title;
        self.description_input.focused = self.focused_field == ExpenseField::Description;
        self.amount_input.focused = self.focused_field == ExpenseField::Amount;
        self.date_input.focused = self.focused_field == ExpenseField::Date;
    }

    /// The focused text input; the category picker has none
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            ExpenseField::Title => Some(&mut self.title_input),
            ExpenseField::Description => Some(&mut self.description_input),
            ExpenseField::Amount => Some(&mut self.amount_input),
            ExpenseField::Date => Some(&mut self.date_input),
            ExpenseField::Category => None,
        }
    }

    /// Step through None, then each category, wrapping around
    pub fn cycle_category(&mut self, forward: bool) {
        let len = self.categories.len();
        if len == 0 {
            return;
        }
        self.category_index = match (self.category_index, forward) {
            (None, true) => Some(0),
            (None, false) => Some(len - 1),
            (Some(i), true) if i + 1 < len => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            (Some(_), _) => None,
        };
    }

    pub fn selected_category(&self) -> Option<&(CategoryId, String)> {
        self.category_index.and_then(|i| self.categories.get(i))
    }

    /// The draft described by the form, or `None` while the date is unreadable
    ///
    /// An unparseable amount counts as zero, which keeps the draft
    /// unsubmittable.
    pub fn draft(&self) -> Option<ExpenseDraft> {
        let date = parse_expense_date(self.date_input.value()).ok()?;
        let amount = Money::parse(self.amount_input.value()).unwrap_or(Money::zero());

        Some(ExpenseDraft {
            title: self.title_input.value().to_string(),
            subtitle: self.description_input.value().to_string(),
            amount,
            date,
            category_id: self.selected_category().map(|(id, _)| *id),
        })
    }

    /// Whether the Add action is enabled
    pub fn can_submit(&self) -> bool {
        self.draft().is_some_and(|draft| draft.is_submittable())
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// Handle key input for the add expense dialog
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => app.submit_expense_form(),
        KeyCode::Tab | KeyCode::Down => app.expense_form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.expense_form.prev_field(),
        _ => {
            let form = &mut app.expense_form;
            form.clear_error();

            if form.focused_field == ExpenseField::Category {
                match key.code {
                    KeyCode::Left | KeyCode::Char('h') => form.cycle_category(false),
                    KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                        form.cycle_category(true)
                    }
                    _ => {}
                }
                return;
            }

            if let Some(input) = form.focused_input() {
                match key.code {
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        input.insert(c)
                    }
                    KeyCode::Backspace => input.backspace(),
                    KeyCode::Delete => input.delete(),
                    KeyCode::Left => input.move_left(),
                    KeyCode::Right => input.move_right(),
                    KeyCode::Home => input.move_start(),
                    KeyCode::End => input.move_end(),
                    _ => {}
                }
            }
        }
    }
}

/// Render the add expense dialog
pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.theme();
    let form = &app.expense_form;
    let area = centered_rect_fixed(64, 14, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Add Expense ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Description
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Date
            Constraint::Length(1), // Category
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Error
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

    for (input, row) in [
        (&form.title_input, chunks[0]),
        (&form.description_input, chunks[1]),
        (&form.amount_input, chunks[2]),
        (&form.date_input, chunks[3]),
    ] {
        frame.render_widget(input.clone().accent(theme.accent), row);
    }

    render_category_picker(frame, form, &theme, chunks[4]);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(theme.danger()),
            chunks[6],
        );
    } else if form.draft().is_none() {
        frame.render_widget(
            Paragraph::new("Date must be YYYY-MM-DD").style(theme.muted()),
            chunks[6],
        );
    }

    let add_style = if form.can_submit() {
        theme.accent().add_modifier(Modifier::BOLD)
    } else {
        theme.muted()
    };
    let buttons = Line::from(vec![
        Span::styled("[Enter]", add_style),
        Span::styled(" Add   ", add_style),
        Span::styled("[Tab]", theme.accent()),
        Span::raw(" Next field   "),
        Span::styled("[Esc]", theme.danger()),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(buttons), chunks[8]);
}

fn render_category_picker(frame: &mut Frame, form: &ExpenseFormState, theme: &Theme, area: Rect) {
    let focused = form.focused_field == ExpenseField::Category;
    let value = match form.selected_category() {
        Some((_, name)) => Span::raw(name.clone()),
        None if form.categories.is_empty() => {
            Span::styled("No categories yet", theme.muted())
        }
        None => Span::styled("None", theme.muted()),
    };

    let mut spans = vec![
        Span::styled("Category", Style::default().fg(theme.accent)),
        Span::raw(": "),
        value,
    ];
    if focused && !form.categories.is_empty() {
        spans.push(Span::styled("  ←/→ to choose", theme.muted()));
    }

    let line = Line::from(spans);
    let style = if focused {
        Style::default().add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default()
    };
    frame.render_widget(Paragraph::new(line).style(style), area);
}
