//! Category display formatting

use super::currency::format_currency;
use super::expense::format_expense_row;
use crate::models::{CategoryUsage, Money};

/// Categories ordered by usage, optionally with their expenses listed
pub fn format_category_usage(usages: &[CategoryUsage], with_expenses: bool, locale: &str) -> String {
    if usages.is_empty() {
        return "No categories found.\n\nRun 'tripspent category add <NAME>' to create one.\n"
            .to_string();
    }

    let name_width = usages
        .iter()
        .map(|u| u.category.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:12}  {:width$}  {:>8}  {:>14}\n",
        "ID",
        "Name",
        "Expenses",
        "Total",
        width = name_width
    ));
    output.push_str(&"-".repeat(12 + 2 + name_width + 2 + 8 + 2 + 14));
    output.push('\n');

    for usage in usages {
        let total: Money = usage.expenses.iter().map(|e| e.amount).sum();
        output.push_str(&format!(
            "{:12}  {:width$}  {:>8}  {:>14}\n",
            usage.category.id.to_string(),
            usage.category.name,
            usage.expense_count(),
            format_currency(total, locale),
            width = name_width
        ));

        if with_expenses {
            for expense in &usage.expenses {
                output.push_str(&format_expense_row(expense, None, locale));
                output.push('\n');
            }
        }
    }

    output
}

/// A single category with its expenses
pub fn format_category_details(usage: &CategoryUsage, locale: &str) -> String {
    let total: Money = usage.expenses.iter().map(|e| e.amount).sum();
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", usage.category.name));
    output.push_str(&format!("ID:       {}\n", usage.category.id));
    output.push_str(&format!(
        "Created:  {}\n",
        usage.category.created_at.format("%Y-%m-%d")
    ));
    output.push_str(&format!("Expenses: {}\n", usage.expense_count()));
    output.push_str(&format!("Total:    {}\n", format_currency(total, locale)));

    if !usage.expenses.is_empty() {
        output.push('\n');
        for expense in &usage.expenses {
            output.push_str(&format!(
                "{}  {}\n",
                expense.date.format("%Y-%m-%d"),
                format_expense_row(expense, None, locale).trim_start()
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Expense};
    use chrono::Utc;

    fn usage(name: &str, amounts: &[i64]) -> CategoryUsage {
        let expenses = amounts
            .iter()
            .map(|c| Expense::new("Item", "desc", Money::from_cents(*c), Utc::now()))
            .collect();
        CategoryUsage::new(Category::new(name), expenses)
    }

    #[test]
    fn test_usage_table() {
        let output = format_category_usage(&[usage("Travel", &[1000, 2000]), usage("Food", &[])], false, "en_US");
        assert!(output.contains("Travel"));
        assert!(output.contains("$30.00"));
        assert!(output.contains("Food"));
        assert!(!output.contains("Item"));
    }

    #[test]
    fn test_usage_table_with_expenses() {
        let output = format_category_usage(&[usage("Travel", &[1000])], true, "en_US");
        assert!(output.contains("Item"));
    }

    #[test]
    fn test_empty() {
        assert!(format_category_usage(&[], false, "en_US").starts_with("No categories found."));
    }

    #[test]
    fn test_details() {
        let output = format_category_details(&usage("Travel", &[1250]), "en_US");
        assert!(output.contains("Category: Travel"));
        assert!(output.contains("Expenses: 1"));
        assert!(output.contains("Total:    $12.50"));
    }
}
