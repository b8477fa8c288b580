//! Service layer for TripSpent
//!
//! Business logic on top of the storage layer: validation, audit logging,
//! cascade deletes, and the pure grouping/search/usage computations that the
//! front ends render.

pub mod category;
pub mod expense;
pub mod grouping;
pub mod search;

pub use category::{order_by_usage, CategoryDeletion, CategoryService, CATEGORY_DELETE_WARNING};
pub use expense::ExpenseService;
pub use grouping::{
    group_expenses, group_expenses_in, remove_from_groups, GroupedExpenses, GroupingCalendar,
};
pub use search::filter_groups;
