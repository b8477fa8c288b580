//! TripSpent - Terminal-based personal expense tracker
//!
//! This library provides the core functionality for TripSpent: recording
//! expenses, filing them under categories, and browsing them grouped by day
//! with title search, from either the command line or a terminal UI.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and persisted preferences
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, money)
//! - `storage`: JSON file storage with change notification
//! - `services`: Business logic, day grouping and search
//! - `feed`: Background grouping and filtering for the expense list
//! - `audit`: Audit logging of creates and deletes
//! - `display`: Plain-text and currency formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers
//! - `tui`: Terminal user interface
//!
//! # Example
//!
//! ```rust,ignore
//! use tripspent::config::{TrackerPaths, Settings};
//! use tripspent::storage::Storage;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod feed;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{TrackerError, TrackerResult};
