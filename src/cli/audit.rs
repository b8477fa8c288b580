//! Audit trail listing

use crate::error::TrackerResult;
use crate::storage::Storage;

/// Print the most recent `limit` audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, limit: usize) -> TrackerResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
