//! Error types for the pairing tool
//!
//! Loading failures and persistence failures are separate variants so a
//! caller can tell a bad input file apart from a failed write.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Stage of persistence that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStage {
    History,
    Report,
}

impl std::fmt::Display for PersistStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistStage::History => write!(f, "match history"),
            PersistStage::Report => write!(f, "current matches report"),
        }
    }
}

/// Custom error types for specific pairing scenarios
#[derive(Debug, thiserror::Error)]
pub enum CoffeePairsError {
    #[error("Missing required columns: {} (available columns: {})", missing.join(", "), available.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("Missing value for column '{column}' on row {row}")]
    MissingField { row: usize, column: String },

    #[error("Duplicate names found: {}", names.join(", "))]
    DuplicateNames { names: Vec<String> },

    #[error("Malformed history entry in '{path}' at row {row}: {reason}")]
    MalformedHistoryEntry {
        path: String,
        row: usize,
        reason: String,
    },

    #[error("History version {version} already exists at '{path}'")]
    HistoryVersionExists { version: u64, path: String },

    #[error("History version {version} in '{path}' is out of range")]
    HistoryVersionOutOfRange { version: String, path: String },

    #[error("Failed to save {stage}: {message}")]
    Persistence { stage: PersistStage, message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
