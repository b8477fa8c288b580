//! Audit trail for TripSpent
//!
//! Every expense or category that is created or deleted leaves one JSON line
//! in `audit.log`. The trail is append-only; nothing in the application reads
//! it back except the `audit` CLI listing.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
