//! Terminal User Interface module
//!
//! A ratatui front end with Expenses, Categories and Settings tabs and a
//! first-run intro screen. The expense list is fed by [`crate::feed`], so
//! grouping and search run off the event loop.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;
pub mod theme;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
