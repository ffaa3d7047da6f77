//! Greedy first-fit pairing
//!
//! Each anchor taken from the front of the queue is paired with the first
//! compatible candidate still waiting. There is no backtracking: an anchor
//! that finds nobody is unmatched even if an earlier choice could have
//! freed a partner for it.

use crate::roster::Roster;
use crate::types::{HistorySet, MatchResult, MatchedPair, ParticipantId};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Trait for pairing algorithms
pub trait PairMatcher: Send + Sync {
    /// Pair participants taken in the given order.
    ///
    /// `history` is consulted as-is; pairs formed during the call are not
    /// added to it.
    fn match_participants(
        &self,
        order: &[ParticipantId],
        roster: &Roster,
        history: &HistorySet,
    ) -> MatchResult;
}

/// One-pass first-fit matcher, deterministic for a fixed input order
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyPairMatcher;

impl GreedyPairMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl PairMatcher for GreedyPairMatcher {
    fn match_participants(
        &self,
        order: &[ParticipantId],
        roster: &Roster,
        history: &HistorySet,
    ) -> MatchResult {
        let mut queue: VecDeque<ParticipantId> = order.iter().copied().collect();
        let mut result = MatchResult::default();

        while queue.len() > 1 {
            let Some(anchor) = queue.pop_front() else {
                break;
            };

            let partner_index = queue.iter().position(|&candidate| {
                match roster.violation(anchor, candidate, history) {
                    None => true,
                    Some(violation) => {
                        trace!(anchor, candidate, %violation, "Candidate rejected");
                        false
                    }
                }
            });

            match partner_index.and_then(|index| queue.remove(index)) {
                Some(partner) => {
                    trace!(anchor, partner, "Pair formed");
                    result.pairs.push(MatchedPair { anchor, partner });
                }
                None => {
                    debug!(anchor, "No compatible partner left for anchor");
                    result.unmatched.push(anchor);
                }
            }
        }

        result.unmatched.extend(queue);

        debug!(
            "Matched {} pairs, {} unmatched out of {} participants",
            result.pairs.len(),
            result.unmatched.len(),
            order.len()
        );

        result
    }
}
