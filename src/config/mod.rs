//! Configuration module for TripSpent
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Persisted user preferences (first-run flag, appearance, locale)

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::{Appearance, Settings};
