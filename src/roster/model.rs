//! Roster model and the pairing constraint predicate
//!
//! A `Roster` is built once per run from cleaned records and is read-only
//! afterwards. Compatibility between two participants is a conjunction of
//! hard vetoes; there is no scoring.

use crate::error::CoffeePairsError;
use crate::types::{HistorySet, PairKey, Participant, ParticipantId, Tier};
use std::collections::HashMap;

/// A cleaned roster row, before ids are assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRecord {
    pub full_name: String,
    pub department: String,
    pub tier: Tier,
}

impl RosterRecord {
    pub fn new(full_name: &str, department: &str, tier: Tier) -> Self {
        Self {
            full_name: full_name.to_string(),
            department: department.to_string(),
            tier,
        }
    }

    fn trimmed(self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            department: self.department.trim().to_string(),
            tier: self.tier,
        }
    }
}

/// Rule that rejected a candidate pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingViolation {
    AlreadyPaired,
    SameDepartment,
    BothExecutive,
    UnknownParticipant,
}

impl std::fmt::Display for PairingViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingViolation::AlreadyPaired => write!(f, "already paired in a previous run"),
            PairingViolation::SameDepartment => write!(f, "same department"),
            PairingViolation::BothExecutive => write!(f, "both executive"),
            PairingViolation::UnknownParticipant => write!(f, "unknown participant"),
        }
    }
}

/// The full set of eligible participants for a run
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Build a roster, assigning ids in record order.
    ///
    /// Names and departments are trimmed first. Rejects the whole roster
    /// if any record lacks a name, department or tier, or if any full name
    /// appears more than once.
    pub fn new(records: Vec<RosterRecord>) -> Result<Self, CoffeePairsError> {
        let records: Vec<RosterRecord> = records.into_iter().map(RosterRecord::trimmed).collect();

        for (index, record) in records.iter().enumerate() {
            let row = index + 1;
            if record.full_name.trim().is_empty() {
                return Err(CoffeePairsError::MissingField {
                    row,
                    column: "full name".to_string(),
                });
            }
            if record.department.trim().is_empty() {
                return Err(CoffeePairsError::MissingField {
                    row,
                    column: "department".to_string(),
                });
            }
            if record.tier.label().trim().is_empty() {
                return Err(CoffeePairsError::MissingField {
                    row,
                    column: "tier".to_string(),
                });
            }
        }

        let duplicates = duplicate_names(&records);
        if !duplicates.is_empty() {
            return Err(CoffeePairsError::DuplicateNames { names: duplicates });
        }

        let participants = records
            .into_iter()
            .enumerate()
            .map(|(id, record)| Participant {
                id,
                full_name: record.full_name,
                department: record.department,
                tier: record.tier,
            })
            .collect();

        Ok(Self { participants })
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(id)
    }

    pub fn name(&self, id: ParticipantId) -> Option<&str> {
        self.get(id).map(|p| p.full_name.as_str())
    }

    /// All ids in load order
    pub fn ids(&self) -> Vec<ParticipantId> {
        (0..self.participants.len()).collect()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// History key for two participants, if both exist
    pub fn pair_key(&self, a: ParticipantId, b: ParticipantId) -> Option<PairKey> {
        Some(PairKey::new(self.name(a)?, self.name(b)?))
    }

    /// First rule that forbids pairing `a` with `b`, if any
    pub fn violation(
        &self,
        a: ParticipantId,
        b: ParticipantId,
        history: &HistorySet,
    ) -> Option<PairingViolation> {
        let (Some(first), Some(second)) = (self.get(a), self.get(b)) else {
            return Some(PairingViolation::UnknownParticipant);
        };

        if history.contains(&PairKey::new(first.full_name.as_str(), second.full_name.as_str())) {
            return Some(PairingViolation::AlreadyPaired);
        }

        if first.department == second.department {
            return Some(PairingViolation::SameDepartment);
        }

        if first.tier.is_executive() && second.tier.is_executive() {
            return Some(PairingViolation::BothExecutive);
        }

        None
    }

    /// Whether `a` and `b` may be paired given the history
    pub fn is_compatible(&self, a: ParticipantId, b: ParticipantId, history: &HistorySet) -> bool {
        self.violation(a, b, history).is_none()
    }
}

/// Names occurring more than once, each listed once in first-seen order
fn duplicate_names(records: &[RosterRecord]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for record in records {
        let count = seen.entry(record.full_name.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            duplicates.push(record.full_name.clone());
        }
    }

    duplicates
}
