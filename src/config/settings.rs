//! User settings for TripSpent
//!
//! Settings are loaded once at start-up and handed by reference to whatever
//! needs them: the TUI reads the first-run and appearance flags, the display
//! layer reads the locale and date format.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;

/// Colour scheme derived from the dark-mode flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

/// User settings for TripSpent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Whether the intro screen has been dismissed
    #[serde(default)]
    pub first_run_completed: bool,

    /// Whether the dark appearance is enabled
    #[serde(default)]
    pub dark_mode_enabled: bool,

    /// Locale used for currency formatting (e.g. "en_US"); falls back to the
    /// environment when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Diagnostic log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            first_run_completed: false,
            dark_mode_enabled: false,
            locale: None,
            date_format: default_date_format(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TrackerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TrackerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TrackerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    pub fn appearance(&self) -> Appearance {
        if self.dark_mode_enabled {
            Appearance::Dark
        } else {
            Appearance::Light
        }
    }

    /// Mark the intro screen as seen
    pub fn complete_first_run(&mut self) {
        self.first_run_completed = true;
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode_enabled = !self.dark_mode_enabled;
        self.dark_mode_enabled
    }

    /// Locale for currency display: the configured one, else the environment
    pub fn effective_locale(&self) -> String {
        self.locale
            .clone()
            .unwrap_or_else(crate::display::currency::locale_from_env)
    }
}
