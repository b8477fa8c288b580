use anyhow::Result;
use clap::{Parser, Subcommand};

use tripspent::cli::{
    format_settings, handle_audit_command, handle_category_command, handle_expense_command,
    handle_export_command, handle_settings_command, CategoryCommands, ExpenseCommands, ExportArgs,
    SettingsCommands,
};
use tripspent::config::{Settings, TrackerPaths};
use tripspent::logging::init_logging;
use tripspent::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tripspent",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "TripSpent records what you spend, files it under categories and \
                  shows it grouped by day. Use the subcommands for scripting or \
                  'tripspent tui' for the interactive interface."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Preferences (appearance, locale, intro screen)
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Export expenses and categories to a file
    Export(ExportArgs),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TrackerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    if let Err(e) = init_logging(&paths, &settings) {
        eprintln!("Warning: diagnostic logging disabled: {}", e);
    }

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Tui) => {
            tripspent::tui::run_tui(&storage, &settings, &paths)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&paths, &mut settings, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, args)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Config) => {
            println!("TripSpent Configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("Diagnostic log:  {}", paths.diagnostic_log().display());
            println!();
            println!("Settings:");
            for line in format_settings(&settings).lines() {
                println!("  {}", line);
            }
        }
        None => {
            println!("TripSpent - Terminal-based personal expense tracker");
            println!();
            println!("Run 'tripspent --help' for usage information.");
            println!("Run 'tripspent tui' to launch the interactive interface.");
        }
    }

    Ok(())
}
