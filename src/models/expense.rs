//! Expense model
//!
//! An expense is a single recorded purchase: what it was, a short
//! description, how much it cost, when it happened and, optionally, which
//! category it belongs to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What was bought
    pub title: String,

    /// Free-form description
    pub subtitle: String,

    /// Amount spent (always positive)
    pub amount: Money,

    /// When the expense happened
    pub date: DateTime<Utc>,

    /// Category this expense is filed under, if any
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new uncategorized expense
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        amount: Money,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            title: title.into(),
            subtitle: subtitle.into(),
            amount,
            date,
            category_id: None,
            created_at: Utc::now(),
        }
    }

    /// Builder-style category assignment
    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Case-insensitive substring match against the title
    ///
    /// `needle` must already be lowercased; callers filtering many expenses
    /// lowercase the query once.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.title.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }
        if self.subtitle.trim().is_empty() {
            return Err(ExpenseValidationError::EmptySubtitle);
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.title,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyTitle,
    EmptySubtitle,
    NonPositiveAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Expense title cannot be empty"),
            Self::EmptySubtitle => write!(f, "Expense description cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be greater than zero (got {})", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Input-boundary state for a new expense
///
/// Front ends keep the submit action disabled until `is_submittable` holds,
/// so invalid input never reaches the service layer in normal use.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub subtitle: String,
    pub amount: Money,
    pub date: DateTime<Utc>,
    pub category_id: Option<CategoryId>,
}

impl ExpenseDraft {
    /// An empty draft dated now
    pub fn new() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            amount: Money::zero(),
            date: Utc::now(),
            category_id: None,
        }
    }

    /// Whether the submit action should be enabled
    pub fn is_submittable(&self) -> bool {
        !self.title.is_empty() && !self.subtitle.is_empty() && !self.amount.is_zero()
    }

    /// Turn the draft into a fresh expense with a new identity
    pub fn into_expense(self) -> Expense {
        Expense::new(self.title, self.subtitle, self.amount, self.date)
            .with_category(self.category_id)
    }
}

impl Default for ExpenseDraft {
    fn default() -> Self {
        Self::new()
    }
}
