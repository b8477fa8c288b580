//! Data export
//!
//! - CSV: one row per expense, for spreadsheets
//! - JSON / YAML: the full record set with schema and app versions

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
