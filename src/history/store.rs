//! History storage interface and the in-memory implementation
//!
//! History is a sequence of immutable, numbered batches. A run reads the
//! union of all batches and appends exactly one new batch.

use crate::error::{CoffeePairsError, Result};
use crate::types::{HistorySet, PairKey};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Everything loaded from history at the start of a run
#[derive(Debug, Default)]
pub struct HistorySnapshot {
    /// Union of all stored pairs
    pub pairs: HistorySet,
    /// Highest version observed, 0 when there is no history
    pub max_version: u64,
    /// Number of batches that contributed pairs
    pub batches_loaded: usize,
    /// Records that were skipped because they could not be used
    pub malformed: Vec<CoffeePairsError>,
}

impl HistorySnapshot {
    /// Version the next run must write
    pub fn next_version(&self) -> Result<u64> {
        self.max_version
            .checked_add(1)
            .ok_or_else(|| anyhow::anyhow!("History version {} has no successor", self.max_version))
    }

    pub fn contains(&self, key: &PairKey) -> bool {
        self.pairs.contains(key)
    }
}

/// Trait for history storage operations
pub trait HistoryStore {
    /// Read every stored batch
    fn load(&self) -> Result<HistorySnapshot>;

    /// Store `pairs` as batch `version`. Existing batches are never replaced.
    ///
    /// Returns a description of where the batch was written.
    fn append(&self, version: u64, pairs: &[PairKey]) -> Result<String>;
}

/// In-memory history storage, used for tests and dry runs
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    batches: RwLock<BTreeMap<u64, Vec<PairKey>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with batches
    pub fn with_batches(batches: impl IntoIterator<Item = (u64, Vec<PairKey>)>) -> Self {
        Self {
            batches: RwLock::new(batches.into_iter().collect()),
        }
    }

    /// Copy of all stored batches, by version
    pub fn batches(&self) -> Result<BTreeMap<u64, Vec<PairKey>>> {
        let batches = self
            .batches
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire history read lock"))?;
        Ok(batches.clone())
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn load(&self) -> Result<HistorySnapshot> {
        let batches = self
            .batches
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire history read lock"))?;

        let mut snapshot = HistorySnapshot::default();
        for (version, pairs) in batches.iter() {
            snapshot.max_version = snapshot.max_version.max(*version);
            snapshot.pairs.extend(pairs.iter().cloned());
            snapshot.batches_loaded += 1;
        }

        Ok(snapshot)
    }

    fn append(&self, version: u64, pairs: &[PairKey]) -> Result<String> {
        let mut batches = self
            .batches
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire history write lock"))?;

        let location = format!("memory:{}", version);
        if batches.contains_key(&version) {
            return Err(CoffeePairsError::HistoryVersionExists {
                version,
                path: location,
            }
            .into());
        }

        batches.insert(version, pairs.to_vec());
        Ok(location)
    }
}
