//! Modal dialogs for the TUI

pub mod add_category;
pub mod add_expense;
pub mod confirm;
pub mod help;
