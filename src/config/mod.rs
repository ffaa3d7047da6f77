//! Configuration management for the pairing tool
//!
//! This module handles configuration loading from TOML files and
//! environment variables, validation, and default values. Only the
//! loaders and the application layer read it; the roster model and the
//! matcher take plain values.

pub mod app;
pub mod roster;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, FileSettings, MatchingSettings, ServiceSettings};
pub use roster::RosterColumns;
