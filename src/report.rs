//! Human-readable match reports
//!
//! The report lists the new pairs in the order they were formed followed
//! by anyone left unmatched. The text file is overwritten on every run.

use crate::error::Result;
use crate::roster::Roster;
use crate::types::{MatchResult, ParticipantId};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub const PAIRS_HEADING: &str = "--- New Coffee Chat Pairs ---";
pub const UNMATCHED_HEADING: &str = "--- Unmatched People (Odd one out) ---";

/// A pair of names as presented to people
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPair {
    pub person1: String,
    pub person2: String,
}

/// Presentation of one run's outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub generated_at: DateTime<Utc>,
    /// History version the pairs were stored under
    pub history_version: u64,
    pub pairs: Vec<NamedPair>,
    pub unmatched: Vec<String>,
}

impl MatchReport {
    pub fn from_result(
        result: &MatchResult,
        roster: &Roster,
        history_version: u64,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let name = |id: ParticipantId| roster.name(id).unwrap_or_default().to_string();

        Self {
            generated_at,
            history_version,
            pairs: result
                .pairs
                .iter()
                .map(|pair| NamedPair {
                    person1: name(pair.anchor),
                    person2: name(pair.partner),
                })
                .collect(),
            unmatched: result.unmatched.iter().map(|&id| name(id)).collect(),
        }
    }

    /// Contents of the current matches file
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(PAIRS_HEADING);
        out.push('\n');
        for pair in &self.pairs {
            out.push_str(&format!("{} <--> {}\n", pair.person1, pair.person2));
        }

        if !self.unmatched.is_empty() {
            out.push('\n');
            out.push_str(UNMATCHED_HEADING);
            out.push('\n');
            for name in &self.unmatched {
                out.push_str(name);
                out.push('\n');
            }
        }

        out
    }

    /// Listing printed to the terminal
    pub fn render_console(&self) -> String {
        let mut out = String::new();
        out.push_str(PAIRS_HEADING);
        out.push('\n');
        for pair in &self.pairs {
            out.push_str(&format!("{}  <-->  {}\n", pair.person1, pair.person2));
        }
        out.push('\n');
        out.push_str(UNMATCHED_HEADING);
        out.push('\n');
        for name in &self.unmatched {
            out.push_str(name);
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize match report")
    }
}

/// Trait for publishing a run's report
pub trait ReportSink {
    /// Publish the report, replacing any previous one.
    ///
    /// Returns a description of where it was published.
    fn publish(&self, report: &MatchReport) -> Result<String>;
}

/// Writes the report as plain text, overwriting the file each run
#[derive(Debug, Clone)]
pub struct TextReportWriter {
    path: PathBuf,
}

impl TextReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for TextReportWriter {
    fn publish(&self, report: &MatchReport) -> Result<String> {
        let location = self.path.display().to_string();
        fs::write(&self.path, report.render_text())
            .with_context(|| format!("Failed to write '{}'", location))?;

        info!("Saved current matches to readable file: {}", location);
        Ok(location)
    }
}
