//! Expense display formatting

use std::collections::HashMap;

use chrono::{Local, NaiveDate};

use super::currency::format_currency;
use super::fit;
use crate::models::{CategoryId, Expense, Money};
use crate::services::grouping::GroupedExpenses;

/// One line of an expense listing
pub fn format_expense_row(expense: &Expense, category: Option<&str>, locale: &str) -> String {
    format!(
        "  {}  {} {} {:>14}",
        expense.id,
        fit(&expense.title, 24),
        fit(category.unwrap_or("-"), 14),
        format_currency(expense.amount, locale)
    )
}

/// Day-grouped listing with a heading and subtotal per day
pub fn format_expense_groups(
    groups: &[GroupedExpenses],
    category_names: &HashMap<CategoryId, String>,
    today: NaiveDate,
    locale: &str,
) -> String {
    if groups.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    for (i, group) in groups.iter().enumerate() {
        output.push_str(&format!(
            "{} ({})  {}\n",
            group.title(today),
            group.len(),
            format_currency(group.total(), locale)
        ));

        for expense in &group.expenses {
            let category = expense
                .category_id
                .and_then(|id| category_names.get(&id))
                .map(String::as_str);
            output.push_str(&format_expense_row(expense, category, locale));
            output.push('\n');
        }

        if i < groups.len() - 1 {
            output.push('\n');
        }
    }

    output
}

/// Flat listing in the order given, with a date column and a grand total
pub fn format_expense_list(
    expenses: &[Expense],
    category_names: &HashMap<CategoryId, String>,
    locale: &str,
    date_format: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    for expense in expenses {
        let category = expense
            .category_id
            .and_then(|id| category_names.get(&id))
            .map(String::as_str);
        output.push_str(&format!(
            "  {}{}\n",
            expense.date.with_timezone(&Local).format(date_format),
            format_expense_row(expense, category, locale)
        ));
    }

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&format!(
        "\nTotal ({}): {}\n",
        expenses.len(),
        format_currency(total, locale)
    ));

    output
}

/// Full details of one expense
pub fn format_expense_details(
    expense: &Expense,
    category: Option<&str>,
    locale: &str,
    date_format: &str,
) -> String {
    let local = expense.date.with_timezone(&Local);
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Title:       {}\n", expense.title));
    output.push_str(&format!("Description: {}\n", expense.subtitle));
    output.push_str(&format!(
        "Amount:      {}\n",
        format_currency(expense.amount, locale)
    ));
    output.push_str(&format!(
        "Date:        {} {}\n",
        local.format(date_format),
        local.format("%H:%M")
    ));
    output.push_str(&format!(
        "Category:    {}\n",
        category.unwrap_or("(uncategorized)")
    ));

    output
}
