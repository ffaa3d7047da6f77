//! Coffee Pairs - randomized coffee chat pairing
//!
//! This crate pairs roster members for coffee chats while avoiding repeat
//! pairings recorded in history, pairs from the same department, and pairs
//! of two executives. Each run appends its pairs as a new history version
//! and rewrites a readable report.

pub mod config;
pub mod error;
pub mod history;
pub mod matching;
pub mod report;
pub mod roster;
pub mod service;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{CoffeePairsError, Result};
pub use types::*;

// Re-export key components
pub use history::{CsvHistoryStore, HistoryStore, InMemoryHistoryStore};
pub use matching::{GreedyPairMatcher, PairMatcher};
pub use report::{MatchReport, ReportSink, TextReportWriter};
pub use roster::{Roster, RosterRecord};
pub use service::CoffeePairsApp;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
