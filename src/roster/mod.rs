//! Roster loading and the participant constraint model

pub mod loader;
pub mod model;

// Re-export commonly used types
pub use loader::{load_roster, parse_roster};
pub use model::{PairingViolation, Roster, RosterRecord};
