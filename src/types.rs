//! Common types used throughout the pairing tool

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identifier for a participant: its position in roster load order
pub type ParticipantId = usize;

/// Every pairing produced by a previous run
pub type HistorySet = HashSet<PairKey>;

/// Default tier label of an executive
pub const EXECUTIVE_LABEL: &str = "Executive";

/// Seniority tier of a participant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Executive,
    Associate,
    /// Any other label; treated as non-executive
    Other(String),
}

impl Tier {
    /// Parse a tier label. Matching is exact on the trimmed label.
    pub fn parse(label: &str) -> Self {
        Self::parse_with(label, EXECUTIVE_LABEL)
    }

    /// Parse a tier label where `executive_label` marks an executive
    pub fn parse_with(label: &str, executive_label: &str) -> Self {
        let label = label.trim();
        if label == executive_label.trim() {
            return Tier::Executive;
        }

        match label {
            "Associate" => Tier::Associate,
            other => Tier::Other(other.to_string()),
        }
    }

    pub fn is_executive(&self) -> bool {
        matches!(self, Tier::Executive)
    }

    pub fn label(&self) -> &str {
        match self {
            Tier::Executive => EXECUTIVE_LABEL,
            Tier::Associate => "Associate",
            Tier::Other(label) => label,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A roster member, immutable for the duration of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub full_name: String,
    pub department: String,
    pub tier: Tier,
}

/// Order-independent identity of a pairing.
///
/// The two names are stored sorted, so `PairKey::new(a, b)` and
/// `PairKey::new(b, a)` compare and hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    first: String,
    second: String,
}

impl PairKey {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn contains(&self, name: &str) -> bool {
        self.first == name || self.second == name
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <--> {}", self.first, self.second)
    }
}

/// A new pairing formed during a run, in the order it was formed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedPair {
    /// Participant whose turn it was
    pub anchor: ParticipantId,
    /// First compatible candidate found for the anchor
    pub partner: ParticipantId,
}

/// Output of a matching pass.
///
/// Every input id appears exactly once, either in one pair or in `unmatched`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub pairs: Vec<MatchedPair>,
    pub unmatched: Vec<ParticipantId>,
}

impl MatchResult {
    /// Number of participants accounted for by this result
    pub fn participant_count(&self) -> usize {
        self.pairs.len() * 2 + self.unmatched.len()
    }

    /// All ids in the result: pair members in order, then unmatched
    pub fn participant_ids(&self) -> Vec<ParticipantId> {
        self.pairs
            .iter()
            .flat_map(|pair| [pair.anchor, pair.partner])
            .chain(self.unmatched.iter().copied())
            .collect()
    }
}
