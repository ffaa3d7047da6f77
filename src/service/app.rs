//! Run pipeline: load, match, persist
//!
//! Planning reads the roster and history and computes the pairs without
//! touching disk. Persisting writes the new history version and then the
//! report. A failure while persisting is reported as
//! `CoffeePairsError::Persistence` and leaves the plan untouched.

use crate::config::AppConfig;
use crate::error::{CoffeePairsError, PersistStage, Result};
use crate::history::{CsvHistoryStore, HistorySnapshot, HistoryStore};
use crate::matching::{shuffled_order, GreedyPairMatcher, PairMatcher};
use crate::report::{MatchReport, ReportSink, TextReportWriter};
use crate::roster::{load_roster, Roster};
use crate::types::{MatchResult, PairKey, ParticipantId};
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{info, warn};

/// Everything computed for a run, before anything is written
#[derive(Debug)]
pub struct RunPlan {
    pub roster: Roster,
    pub history: HistorySnapshot,
    /// Shuffled order the matcher consumed
    pub order: Vec<ParticipantId>,
    pub result: MatchResult,
    pub planned_at: DateTime<Utc>,
    version: u64,
}

impl RunPlan {
    /// History version this run writes
    pub fn version(&self) -> u64 {
        self.version
    }

    /// New pairs as history keys, in formation order
    pub fn new_pair_keys(&self) -> Vec<PairKey> {
        self.result
            .pairs
            .iter()
            .filter_map(|pair| self.roster.pair_key(pair.anchor, pair.partner))
            .collect()
    }

    pub fn report(&self) -> MatchReport {
        MatchReport::from_result(&self.result, &self.roster, self.version(), self.planned_at)
    }
}

/// Where a run's output was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistOutcome {
    pub version: u64,
    pub history_location: String,
    pub report_location: String,
}

/// The pairing application, wired to its storage collaborators
pub struct CoffeePairsApp {
    config: AppConfig,
    matcher: Box<dyn PairMatcher>,
    history: Box<dyn HistoryStore>,
    report: Box<dyn ReportSink>,
}

impl CoffeePairsApp {
    pub fn new(
        config: AppConfig,
        history: Box<dyn HistoryStore>,
        report: Box<dyn ReportSink>,
    ) -> Self {
        Self {
            config,
            matcher: Box::new(GreedyPairMatcher::new()),
            history,
            report,
        }
    }

    /// Build the app with file-backed history and report from `config`
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let history = CsvHistoryStore::new(
            &config.files.history_dir,
            &config.files.history_prefix,
            &config.files.history_suffix,
        )?;
        let report = TextReportWriter::new(&config.files.report_path);
        Ok(Self::new(config, Box::new(history), Box::new(report)))
    }

    pub fn with_matcher(mut self, matcher: Box<dyn PairMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load the configured roster and compute this run's pairs
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RunPlan> {
        let path = self.config.roster_path()?;
        let roster = load_roster(path, &self.config.roster)?;
        self.plan_for(roster, rng)
    }

    /// Compute this run's pairs for an already loaded roster
    pub fn plan_for<R: Rng + ?Sized>(&self, roster: Roster, rng: &mut R) -> Result<RunPlan> {
        let history = self.history.load()?;
        let version = history.next_version()?;
        if !history.malformed.is_empty() {
            warn!(
                "Ignored {} malformed history entries",
                history.malformed.len()
            );
        }

        let order = shuffled_order(&roster, rng);
        info!("Starting with {} people...", order.len());

        let result = self
            .matcher
            .match_participants(&order, &roster, &history.pairs);

        info!(
            "Formed {} new pairs, {} unmatched",
            result.pairs.len(),
            result.unmatched.len()
        );

        Ok(RunPlan {
            roster,
            history,
            order,
            result,
            planned_at: current_timestamp(),
            version,
        })
    }

    /// Write the plan's pairs as a new history version, then the report
    pub fn persist(&self, plan: &RunPlan) -> std::result::Result<PersistOutcome, CoffeePairsError> {
        let version = plan.version();

        let history_location = self
            .history
            .append(version, &plan.new_pair_keys())
            .map_err(|e| CoffeePairsError::Persistence {
                stage: PersistStage::History,
                message: format!("{:#}", e),
            })?;

        let report_location =
            self.report
                .publish(&plan.report())
                .map_err(|e| CoffeePairsError::Persistence {
                    stage: PersistStage::Report,
                    message: format!("{:#}", e),
                })?;

        Ok(PersistOutcome {
            version,
            history_location,
            report_location,
        })
    }

    /// Plan and persist a full run
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(RunPlan, PersistOutcome)> {
        let plan = self.plan(rng)?;
        let outcome = self.persist(&plan)?;
        Ok((plan, outcome))
    }
}
