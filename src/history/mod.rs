//! Match history: append-only, versioned batches of past pairs
//!
//! This module defines the storage interface, an in-memory implementation,
//! and the CSV file implementation used by the command line tool.

pub mod csv_store;
pub mod store;

// Re-export commonly used types
pub use csv_store::CsvHistoryStore;
pub use store::{HistorySnapshot, HistoryStore, InMemoryHistoryStore};
