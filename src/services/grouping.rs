//! Expense grouping by calendar day
//!
//! Turns a flat expense list into day buckets ordered newest-first. The
//! feed runs this off the consumer thread and keeps the result as the
//! unfiltered snapshot that search works from.

use std::collections::HashMap;

use chrono::{Duration, FixedOffset, Local, NaiveDate};

use crate::models::{Expense, ExpenseId, Money};

/// Calendar used to decide which day an expense falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingCalendar {
    /// The machine's local time zone
    #[default]
    Local,
    /// A fixed UTC offset
    Fixed(FixedOffset),
}

impl GroupingCalendar {
    /// Calendar day of an expense under this calendar
    pub fn day_of(&self, expense: &Expense) -> NaiveDate {
        match self {
            GroupingCalendar::Local => expense.date.with_timezone(&Local).date_naive(),
            GroupingCalendar::Fixed(offset) => expense.date.with_timezone(offset).date_naive(),
        }
    }

    /// Today's date under this calendar
    pub fn today(&self) -> NaiveDate {
        match self {
            GroupingCalendar::Local => Local::now().date_naive(),
            GroupingCalendar::Fixed(offset) => chrono::Utc::now().with_timezone(offset).date_naive(),
        }
    }
}

/// The expenses that share one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedExpenses {
    pub date: NaiveDate,
    pub expenses: Vec<Expense>,
}

impl GroupedExpenses {
    pub fn new(date: NaiveDate, expenses: Vec<Expense>) -> Self {
        Self { date, expenses }
    }

    /// Sum of the group's amounts
    pub fn total(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Section heading relative to `today`
    pub fn title(&self, today: NaiveDate) -> String {
        if self.date == today {
            "Today".to_string()
        } else if Some(self.date) == today.checked_sub_signed(Duration::days(1)) {
            "Yesterday".to_string()
        } else {
            self.date.format("%a, %b %-d, %Y").to_string()
        }
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

/// Group expenses by local calendar day
pub fn group_expenses(expenses: &[Expense]) -> Vec<GroupedExpenses> {
    group_expenses_in(expenses, GroupingCalendar::Local)
}

/// Group expenses by calendar day under `calendar`
///
/// Every input expense lands in exactly one group. Groups come out newest day
/// first; inside a group the input order is kept.
pub fn group_expenses_in(expenses: &[Expense], calendar: GroupingCalendar) -> Vec<GroupedExpenses> {
    let mut slots: HashMap<NaiveDate, usize> = HashMap::new();
    let mut groups: Vec<GroupedExpenses> = Vec::new();

    for expense in expenses {
        let day = calendar.day_of(expense);
        let slot = *slots.entry(day).or_insert_with(|| {
            groups.push(GroupedExpenses::new(day, Vec::new()));
            groups.len() - 1
        });
        groups[slot].expenses.push(expense.clone());
    }

    // Dates are unique per group, so stability only matters for readability
    groups.sort_by(|a, b| b.date.cmp(&a.date));
    groups
}

/// Remove one expense from already-grouped data
///
/// The group that held it loses that member; a group left empty is dropped.
/// Returns whether anything was removed.
pub fn remove_from_groups(groups: &mut Vec<GroupedExpenses>, id: ExpenseId) -> bool {
    let Some(group_index) = groups
        .iter()
        .position(|g| g.expenses.iter().any(|e| e.id == id))
    else {
        return false;
    };

    let group = &mut groups[group_index];
    group.expenses.retain(|e| e.id != id);
    if group.expenses.is_empty() {
        groups.remove(group_index);
    }
    true
}

/// Total number of expenses across groups
pub fn expense_count(groups: &[GroupedExpenses]) -> usize {
    groups.iter().map(GroupedExpenses::len).sum()
}
