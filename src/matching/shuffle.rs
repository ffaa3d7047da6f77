//! Randomized participant ordering

use crate::roster::Roster;
use crate::types::ParticipantId;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Roster ids in a random order
pub fn shuffled_order<R: Rng + ?Sized>(roster: &Roster, rng: &mut R) -> Vec<ParticipantId> {
    let mut ids = roster.ids();
    ids.shuffle(rng);
    ids
}

/// Seeded generator for reproducible runs, or an entropy-seeded one
pub fn run_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
