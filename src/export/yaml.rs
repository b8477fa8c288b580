//! YAML export of the full record set

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Write the full export as YAML behind a short comment header
pub fn export_full_yaml<W: Write>(storage: &Storage, mut writer: W) -> TrackerResult<FullExport> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# TripSpent export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::models::{Category, Expense, Money};
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(TrackerPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        storage.categories.upsert(Category::new("Food")).unwrap();
        storage
            .expenses
            .upsert(Expense::new("Lunch", "Sandwich", Money::from_cents(850), Utc::now()))
            .unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# TripSpent export"));
        let parsed: FullExport = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.categories[0].name, "Food");
        assert_eq!(parsed.expenses[0].amount.cents(), 850);
        assert!(parsed.validate().is_ok());
    }
}
