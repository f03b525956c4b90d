// Flashdeck - French/Spanish vocabulary flashcards with a quiz mode
//
// This is the library crate containing the session engine and its collaborators.
// The binary crate (main.rs) provides the terminal entry point.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::{ConfigManager, PreferenceStore};
pub use metrics::SessionMetrics;
pub use models::{Entry, Mode, Preferences, Screen, Settings, Theme};
pub use services::{VocabularySet, VocabularyStore};
pub use state::{Effect, Session};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
