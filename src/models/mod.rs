//! Core data models for TripSpent
//!
//! Expenses and categories are the only persisted records. Grouped views are
//! derived from them in `services`.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{Category, CategoryUsage, CategoryValidationError};
pub use expense::{Expense, ExpenseDraft, ExpenseValidationError};
pub use ids::{CategoryId, ExpenseId};
pub use money::{Money, MoneyParseError};
