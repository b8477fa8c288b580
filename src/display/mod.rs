//! Display formatting for terminal output
//!
//! Plain-text renderings of expenses, day groups and categories for the CLI,
//! plus the locale-aware currency formatter shared with the TUI.

pub mod category;
pub mod currency;
pub mod expense;

pub use category::{format_category_details, format_category_usage};
pub use currency::{format_currency, locale_from_env};
pub use expense::{
    format_expense_details, format_expense_groups, format_expense_list, format_expense_row,
};

/// Pad or cut `s` to exactly `width` characters, marking cuts with "..."
pub(crate) fn fit(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len <= width {
        format!("{:width$}", s, width = width)
    } else if width <= 3 {
        s.chars().take(width).collect()
    } else {
        let kept: String = s.chars().take(width - 3).collect();
        format!("{}...", kept)
    }
}
