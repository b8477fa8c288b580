//! Export command

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_expenses_csv, export_full_json, export_full_yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV (expenses only)
    Csv,
    /// JSON (categories and expenses)
    Json,
    /// YAML (categories and expenses, human-readable)
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to JSON
    pub fn from_path(path: &std::path::Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("csv") => ExportFormat::Csv,
            Some("yaml") | Some("yml") => ExportFormat::Yaml,
            _ => ExportFormat::Json,
        }
    }
}

/// Arguments of `tripspent export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path
    pub output: PathBuf,

    /// Export format (inferred from the file extension when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> TrackerResult<()> {
    let format = args
        .format
        .unwrap_or_else(|| ExportFormat::from_path(&args.output));

    let file = File::create(&args.output).map_err(|e| {
        TrackerError::Export(format!(
            "Failed to create file {}: {}",
            args.output.display(),
            e
        ))
    })?;
    let writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => {
            let rows = export_expenses_csv(storage, writer)?;
            println!("Exported {} expense(s) to: {}", rows, args.output.display());
        }
        ExportFormat::Json => {
            let export = export_full_json(storage, writer)?;
            println!(
                "Exported {} categories and {} expenses to: {}",
                export.categories.len(),
                export.expenses.len(),
                args.output.display()
            );
        }
        ExportFormat::Yaml => {
            let export = export_full_yaml(storage, writer)?;
            println!(
                "Exported {} categories and {} expenses to: {}",
                export.categories.len(),
                export.expenses.len(),
                args.output.display()
            );
        }
    }

    tracing::info!(path = %args.output.display(), ?format, "export written");
    Ok(())
}
