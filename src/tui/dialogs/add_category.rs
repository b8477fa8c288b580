//! New category dialog

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

#[derive(Debug, Clone)]
pub struct CategoryFormState {
    pub name_input: TextInput,
    pub error_message: Option<String>,
}

impl Default for CategoryFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryFormState {
    pub fn new() -> Self {
        Self {
            name_input: TextInput::new()
                .label("Name")
                .placeholder("e.g. Travel")
                .focused(true),
            error_message: None,
        }
    }

    /// Add is disabled while the name is blank
    pub fn can_submit(&self) -> bool {
        !self.name_input.value().trim().is_empty()
    }
}

/// Handle key input for the new category dialog
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => app.submit_category_form(),
        _ => {
            let form = &mut app.category_form;
            form.error_message = None;
            let input = &mut form.name_input;
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

/// Render the new category dialog
pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.theme();
    let form = &app.category_form;
    let area = centered_rect_fixed(50, 8, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" New Category ")
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
            Constraint::Length(1), // Name
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Error
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(form.name_input.clone().accent(theme.accent), chunks[0]);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(theme.danger()),
            chunks[2],
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
        Span::styled("[Esc]", theme.danger()),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(buttons), chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_cannot_submit() {
        let mut form = CategoryFormState::new();
        assert!(!form.can_submit());
        form.name_input.set_value("   ");
        assert!(!form.can_submit());
        form.name_input.set_value("Travel");
        assert!(form.can_submit());
    }
}
