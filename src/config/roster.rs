//! Roster sheet configuration

use crate::types::EXECUTIVE_LABEL;
use serde::{Deserialize, Serialize};

/// Header names of the required roster columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterColumns {
    pub full_name: String,
    pub department: String,
    pub tier: String,
    /// Tier cell value that marks an executive
    pub executive_label: String,
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            full_name: "Full Name".to_string(),
            department: "Department".to_string(),
            tier: "Exec or Assoc".to_string(),
            executive_label: EXECUTIVE_LABEL.to_string(),
        }
    }
}

impl RosterColumns {
    pub fn as_array(&self) -> [&str; 3] {
        [&self.full_name, &self.department, &self.tier]
    }
}
