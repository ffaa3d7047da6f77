//! Versioned CSV history files
//!
//! Each run writes `<prefix><version><suffix>` (by default
//! `past_matches_<n>.csv`) with a `Person1,Person2` header. Loading reads
//! every file in the directory that matches that pattern. Version numbers
//! may have gaps; only the maximum matters.

use crate::error::{CoffeePairsError, Result};
use crate::history::store::{HistorySnapshot, HistoryStore};
use crate::types::PairKey;
use crate::utils::{clean_cell, column_positions};
use anyhow::Context;
use regex::Regex;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const PERSON1_COLUMN: &str = "Person1";
pub const PERSON2_COLUMN: &str = "Person2";

/// Outcome of reading one history file
enum FileLoad {
    Loaded,
    Skipped,
}

/// History stored as one CSV file per version in a directory
#[derive(Debug, Clone)]
pub struct CsvHistoryStore {
    dir: PathBuf,
    prefix: String,
    suffix: String,
    pattern: Regex,
}

impl CsvHistoryStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: &str, suffix: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"^{}(\d+){}$",
            regex::escape(prefix),
            regex::escape(suffix)
        ))
        .context("Failed to build history file name pattern")?;

        Ok(Self {
            dir: dir.into(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            pattern,
        })
    }

    /// Store using the default `past_matches_<n>.csv` naming
    pub fn in_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::new(dir, "past_matches_", ".csv")
    }

    /// Path of the file holding `version`
    pub fn version_path(&self, version: u64) -> PathBuf {
        self.dir
            .join(format!("{}{}{}", self.prefix, version, self.suffix))
    }

    /// Version encoded in a file name.
    ///
    /// `None` when the name does not follow the naming scheme. A name that
    /// does but carries a number too large to use is an error naming the file.
    pub fn parse_version(&self, path: &Path) -> Option<Result<u64>> {
        let file_name = path.file_name()?.to_str()?;
        let digits = self.pattern.captures(file_name)?.get(1)?.as_str();

        let version: Result<u64> = digits
            .parse::<u64>()
            .ok()
            .filter(|version| *version < u64::MAX)
            .ok_or_else(|| {
                CoffeePairsError::HistoryVersionOutOfRange {
                    version: digits.to_string(),
                    path: path.display().to_string(),
                }
                .into()
            });
        Some(version)
    }

    /// History files in the directory, sorted by version
    fn history_files(&self) -> Result<Vec<(u64, PathBuf)>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to list history directory '{}'", self.dir.display())
                })
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| {
                format!("Failed to list history directory '{}'", self.dir.display())
            })?;
            let file_name = entry.file_name().to_string_lossy().into_owned();

            if !file_name.starts_with(&self.prefix) || !file_name.ends_with(&self.suffix) {
                continue;
            }

            let path = entry.path();
            match self.parse_version(&path) {
                Some(version) => files.push((version?, path)),
                None => info!("Skipping file with unexpected name: {}", path.display()),
            }
        }

        files.sort();
        Ok(files)
    }

    fn load_file(&self, path: &Path, snapshot: &mut HistorySnapshot) -> Result<FileLoad> {
        let location = path.display().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Failed to open history file '{}'", location))?;

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read header of '{}'", location))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let Ok(positions) = column_positions(&headers, &[PERSON1_COLUMN, PERSON2_COLUMN]) else {
            warn!(
                "Skipping history file {}, missing '{}' or '{}' column",
                location, PERSON1_COLUMN, PERSON2_COLUMN
            );
            return Ok(FileLoad::Skipped);
        };

        for (index, row) in reader.records().enumerate() {
            let line = index + 2;
            let entry = row
                .map_err(|e| e.to_string())
                .and_then(|row| {
                    match (
                        clean_cell(row.get(positions[0])),
                        clean_cell(row.get(positions[1])),
                    ) {
                        (Some(first), Some(second)) => Ok(PairKey::new(first, second)),
                        _ => Err("blank participant name".to_string()),
                    }
                });

            match entry {
                Ok(key) => {
                    snapshot.pairs.insert(key);
                }
                Err(reason) => {
                    let malformed = CoffeePairsError::MalformedHistoryEntry {
                        path: location.clone(),
                        row: line,
                        reason,
                    };
                    warn!("{}", malformed);
                    snapshot.malformed.push(malformed);
                }
            }
        }

        Ok(FileLoad::Loaded)
    }
}

impl HistoryStore for CsvHistoryStore {
    fn load(&self) -> Result<HistorySnapshot> {
        let files = self.history_files()?;
        let mut snapshot = HistorySnapshot::default();

        if files.is_empty() {
            info!("No history files found. Starting new history.");
        } else {
            info!("Found {} history file(s)...", files.len());
        }

        for (version, path) in files {
            // A file that cannot be read still reserves its version number
            snapshot.max_version = snapshot.max_version.max(version);

            match self.load_file(&path, &mut snapshot) {
                Ok(FileLoad::Loaded) => {
                    debug!("Loaded history version {} from {}", version, path.display());
                    snapshot.batches_loaded += 1;
                }
                Ok(FileLoad::Skipped) => {}
                Err(e) => warn!("Error reading history file {}: {:#}", path.display(), e),
            }
        }

        info!("Total {} unique past pairs loaded.", snapshot.pairs.len());
        let next = snapshot.next_version()?;
        info!(
            "Next file version will be: {} ({})",
            next,
            self.version_path(next).display()
        );

        Ok(snapshot)
    }

    fn append(&self, version: u64, pairs: &[PairKey]) -> Result<String> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create history directory '{}'", self.dir.display())
        })?;

        let path = self.version_path(version);
        let location = path.display().to_string();

        let file: File = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(CoffeePairsError::HistoryVersionExists {
                    version,
                    path: location,
                }
                .into())
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create '{}'", location));
            }
        };

        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record([PERSON1_COLUMN, PERSON2_COLUMN])
            .with_context(|| format!("Failed to write '{}'", location))?;
        for pair in pairs {
            writer
                .write_record([pair.first(), pair.second()])
                .with_context(|| format!("Failed to write '{}'", location))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write '{}'", location))?;

        info!("Saved {} new pairs to history file: {}", pairs.len(), location);
        Ok(location)
    }
}
