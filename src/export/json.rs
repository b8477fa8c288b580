//! JSON export of the full record set

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, Expense};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything TripSpent stores, in one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Version of the application that wrote the export
    pub app_version: String,

    /// Categories in creation order
    pub categories: Vec<Category>,

    /// Expenses, newest first
    pub expenses: Vec<Expense>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> TrackerResult<Self> {
        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories: storage.categories.get_all()?,
            expenses: storage.expenses.get_all()?,
        })
    }

    /// Check the schema version and that every expense's category exists
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let category_ids: HashSet<_> = self.categories.iter().map(|c| c.id).collect();
        for expense in &self.expenses {
            if let Some(cat_id) = expense.category_id {
                if !category_ids.contains(&cat_id) {
                    return Err(format!(
                        "Expense {} references unknown category {}",
                        expense.id, cat_id
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Write the full export as pretty-printed JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: W) -> TrackerResult<FullExport> {
    let export = FullExport::from_storage(storage)?;

    serde_json::to_writer_pretty(writer, &export)
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(export)
}
