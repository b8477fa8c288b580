//! Settings CLI commands

use clap::{Subcommand, ValueEnum};

use crate::config::{Settings, TrackerPaths};
use crate::display::currency::{is_supported, normalize_locale, supported_locales};
use crate::error::{TrackerError, TrackerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current preferences
    Show,

    /// Turn the dark appearance on or off
    #[command(name = "dark-mode")]
    DarkMode {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Set the currency locale (e.g. en_US, de_DE)
    Locale {
        locale: String,
    },

    /// Show the intro screen again on next TUI launch
    #[command(name = "reset-intro")]
    ResetIntro,
}

/// Handle a settings command
pub fn handle_settings_command(
    paths: &TrackerPaths,
    settings: &mut Settings,
    cmd: SettingsCommands,
) -> TrackerResult<()> {
    match cmd {
        SettingsCommands::Show => {
            print!("{}", format_settings(settings));
        }

        SettingsCommands::DarkMode { state } => {
            settings.dark_mode_enabled = state == Toggle::On;
            settings.save(paths)?;
            println!(
                "Dark mode {}",
                if settings.dark_mode_enabled { "enabled" } else { "disabled" }
            );
        }

        SettingsCommands::Locale { locale } => {
            if !is_supported(&locale) {
                let known: Vec<_> = supported_locales().collect();
                return Err(TrackerError::Validation(format!(
                    "Unsupported locale '{}'. Supported: {}",
                    locale,
                    known.join(", ")
                )));
            }
            let locale = normalize_locale(&locale);
            settings.locale = Some(locale.clone());
            settings.save(paths)?;
            println!("Locale set to {}", locale);
        }

        SettingsCommands::ResetIntro => {
            settings.first_run_completed = false;
            settings.save(paths)?;
            println!("The intro screen will be shown on next launch.");
        }
    }

    Ok(())
}

/// Human-readable listing of the preferences
pub fn format_settings(settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "First run completed: {}\n",
        settings.first_run_completed
    ));
    output.push_str(&format!("Dark mode:           {}\n", settings.dark_mode_enabled));
    output.push_str(&format!(
        "Locale:              {}{}\n",
        settings.effective_locale(),
        if settings.locale.is_none() { " (from environment)" } else { "" }
    ));
    output.push_str(&format!("Date format:         {}\n", settings.date_format));
    output.push_str(&format!("Log level:           {}\n", settings.log_level));
    output
}
