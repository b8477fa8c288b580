//! CSV export of expenses

use std::collections::HashMap;
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::storage::Storage;

/// Write every expense, newest first, as CSV
///
/// Columns: ID, Date (local, `YYYY-MM-DD HH:MM`), Title, Description,
/// Category name (empty when uncategorized) and Amount in major units.
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: W) -> TrackerResult<usize> {
    let category_names: HashMap<_, _> = storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let mut csv_writer = ::csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["ID", "Date", "Title", "Description", "Category", "Amount"])
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    let expenses = storage.expenses.get_all()?;
    for expense in &expenses {
        let category = expense
            .category_id
            .and_then(|id| category_names.get(&id))
            .map(String::as_str)
            .unwrap_or("");

        let date = expense
            .date
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        let amount = expense.amount.to_decimal_string();

        csv_writer
            .write_record([
                expense.id.to_string().as_str(),
                date.as_str(),
                expense.title.as_str(),
                expense.subtitle.as_str(),
                category,
                amount.as_str(),
            ])
            .map_err(|e| TrackerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(expenses.len())
}
