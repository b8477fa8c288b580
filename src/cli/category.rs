//! Category CLI commands

use std::io::{self, BufRead, Write};

use clap::Subcommand;

use crate::config::Settings;
use crate::display::category::{format_category_details, format_category_usage};
use crate::error::{TrackerError, TrackerResult};
use crate::models::CategoryUsage;
use crate::services::{CategoryService, CATEGORY_DELETE_WARNING};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Add {
        /// Category name
        name: String,
    },

    /// List categories, most used first
    List {
        /// Also list each category's expenses
        #[arg(long)]
        expenses: bool,
    },

    /// Show a category and its expenses
    Show {
        /// Category name or ID
        category: String,
    },

    /// Delete a category and every expense in it
    Delete {
        /// Category name or ID
        category: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> TrackerResult<()> {
    let service = CategoryService::new(storage);
    let locale = settings.effective_locale();

    match cmd {
        CategoryCommands::Add { name } => {
            let category = service.create(&name)?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List { expenses } => {
            let usages = service.list_by_usage()?;
            print!("{}", format_category_usage(&usages, expenses, &locale));
        }

        CategoryCommands::Show { category } => {
            let cat = service
                .find(&category)?
                .ok_or_else(|| TrackerError::category_not_found(&category))?;

            let expenses = service.expenses_for(cat.id)?;
            print!(
                "{}",
                format_category_details(&CategoryUsage::new(cat, expenses), &locale)
            );
        }

        CategoryCommands::Delete { category, yes } => {
            let cat = service
                .find(&category)?
                .ok_or_else(|| TrackerError::category_not_found(&category))?;

            let confirmed = yes || confirm_on_stdin(&cat.name)?;
            if !confirmed {
                println!("Cancelled.");
                return Ok(());
            }

            let deletion = service.delete(cat.id, true)?;
            println!("Deleted category: {}", deletion.category.name);
            println!("  Removed {} expense(s)", deletion.removed_expenses.len());
        }
    }

    Ok(())
}

fn confirm_on_stdin(name: &str) -> TrackerResult<bool> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    prompt_confirmation(name, &mut stdin.lock(), &mut stdout)
}

/// Print the delete warning and read a yes/no answer
fn prompt_confirmation<R: BufRead, W: Write>(
    name: &str,
    input: &mut R,
    output: &mut W,
) -> TrackerResult<bool> {
    writeln!(output, "Delete category '{}'?", name)?;
    writeln!(output, "{}", CATEGORY_DELETE_WARNING)?;
    write!(output, "Continue? [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_accepts_yes() {
        let mut out = Vec::new();
        assert!(prompt_confirmation("Travel", &mut Cursor::new("y\n"), &mut out).unwrap());
        assert!(prompt_confirmation("Travel", &mut Cursor::new("YES\n"), &mut out).unwrap());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(CATEGORY_DELETE_WARNING));
    }

    #[test]
    fn test_prompt_defaults_to_no() {
        let mut out = Vec::new();
        assert!(!prompt_confirmation("Travel", &mut Cursor::new("\n"), &mut out).unwrap());
        assert!(!prompt_confirmation("Travel", &mut Cursor::new(""), &mut out).unwrap());
        assert!(!prompt_confirmation("Travel", &mut Cursor::new("nope\n"), &mut out).unwrap());
    }
}
