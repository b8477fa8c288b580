//! Expense CLI commands

use std::collections::HashMap;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::display::expense::{format_expense_details, format_expense_groups, format_expense_list};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{ExpenseDraft, Money};
use crate::services::{CategoryService, ExpenseService, GroupingCalendar};
use crate::storage::{ExpenseSort, ExpenseSortField, SortOrder, Storage};

/// Key of a flat, sorted listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Date,
    Title,
    Amount,
}

impl From<SortKey> for ExpenseSortField {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Date => ExpenseSortField::Date,
            SortKey::Title => ExpenseSortField::Title,
            SortKey::Amount => ExpenseSortField::Amount,
        }
    }
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What was bought
        title: String,
        /// Short description
        description: String,
        /// Amount (e.g. "12.50")
        amount: String,
        /// Date of the expense (YYYY-MM-DD); defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List expenses grouped by day, or as one sorted list with --sort
    List {
        /// Only show expenses whose title contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Show a flat list sorted by this field instead of day groups
        #[arg(long, value_enum)]
        sort: Option<SortKey>,

        /// Sort ascending (default is descending)
        #[arg(long, requires = "sort")]
        asc: bool,
    },

    /// Show expense details
    Show {
        /// Expense ID
        expense: String,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        expense: String,
    },
}

/// Parse a `YYYY-MM-DD` date and place it at the current local time of day
pub fn parse_expense_date(input: &str) -> TrackerResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        TrackerError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", input))
    })?;

    let naive = date.and_time(Local::now().time());
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| TrackerError::Validation(format!("Date '{}' does not exist locally", input)))
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    let service = ExpenseService::new(storage);
    let categories = CategoryService::new(storage);
    let locale = settings.effective_locale();

    match cmd {
        ExpenseCommands::Add {
            title,
            description,
            amount,
            date,
            category,
        } => {
            let amount = Money::parse(&amount)
                .map_err(|e| TrackerError::Validation(format!("Invalid amount: {}", e)))?;

            let date = match date {
                Some(d) => parse_expense_date(&d)?,
                None => Utc::now(),
            };

            let category = match category {
                Some(c) => Some(
                    categories
                        .find(&c)?
                        .ok_or_else(|| TrackerError::category_not_found(&c))?,
                ),
                None => None,
            };

            let expense = service.create(ExpenseDraft {
                title,
                subtitle: description,
                amount,
                date,
                category_id: category.as_ref().map(|c| c.id),
            })?;

            println!("Added expense: {}", expense.title);
            println!(
                "  Amount: {}",
                crate::display::format_currency(expense.amount, &locale)
            );
            if let Some(category) = category {
                println!("  Category: {}", category.name);
            }
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { search, sort, asc } => {
            let names: HashMap<_, _> = categories
                .list()?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect();

            match sort {
                Some(key) => {
                    let order = if asc {
                        SortOrder::Ascending
                    } else {
                        SortOrder::Descending
                    };
                    let mut expenses = service.list_sorted(ExpenseSort::new(key.into(), order))?;
                    if let Some(query) = search {
                        let needle = query.to_lowercase();
                        expenses.retain(|e| e.title_contains(&needle));
                    }
                    print!(
                        "{}",
                        format_expense_list(&expenses, &names, &locale, &settings.date_format)
                    );
                }
                None => {
                    let groups = service.list_grouped(search.as_deref())?;
                    let today = GroupingCalendar::Local.today();
                    print!("{}", format_expense_groups(&groups, &names, today, &locale));
                }
            }
        }

        ExpenseCommands::Show { expense } => {
            let found = service
                .find(&expense)?
                .ok_or_else(|| TrackerError::expense_not_found(&expense))?;

            let category = match found.category_id {
                Some(id) => categories.get(id)?.map(|c| c.name),
                None => None,
            };

            print!(
                "{}",
                format_expense_details(&found, category.as_deref(), &locale, &settings.date_format)
            );
        }

        ExpenseCommands::Delete { expense } => {
            let found = service
                .find(&expense)?
                .ok_or_else(|| TrackerError::expense_not_found(&expense))?;

            service.delete(found.id)?;
            println!("Deleted expense: {}", found.title);
        }
    }

    Ok(())
}
