//! Test fixtures and mock implementations for integration testing

#![allow(dead_code)]

use coffee_pairs::config::AppConfig;
use coffee_pairs::error::Result;
use coffee_pairs::history::{HistorySnapshot, HistoryStore};
use coffee_pairs::report::{MatchReport, ReportSink};
use coffee_pairs::types::PairKey;
use mockall::mock;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

mock! {
    pub History {}

    impl HistoryStore for History {
        fn load(&self) -> Result<HistorySnapshot>;
        fn append(&self, version: u64, pairs: &[PairKey]) -> Result<String>;
    }
}

mock! {
    pub Report {}

    impl ReportSink for Report {
        fn publish(&self, report: &MatchReport) -> Result<String>;
    }
}

pub const ROSTER_HEADER: &str = "Full Name,Department,Exec or Assoc";

/// A realistic roster spread over a handful of departments
pub const SAMPLE_ROSTER: &[(&str, &str, &str)] = &[
    ("Amara Okafor", "Engineering", "Executive"),
    ("Ben Carter", "Engineering", "Associate"),
    ("Chloe Dubois", "Finance", "Executive"),
    ("Diego Ramos", "Finance", "Associate"),
    ("Elif Yilmaz", "Legal", "Associate"),
    ("Farah Haddad", "Legal", "Executive"),
    ("Gus Lindqvist", "Marketing", "Associate"),
    ("Hana Sato", "Marketing", "Associate"),
    ("Ivan Petrov", "Operations", "Executive"),
    ("Jade Nguyen", "Operations", "Associate"),
    ("Kofi Mensah", "Sales", "Associate"),
];

/// Scratch directory holding a roster file and the tool's outputs
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name)).expect("read output")
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path().join(name).exists()
    }

    pub fn write_roster(&self, rows: &[(&str, &str, &str)]) -> PathBuf {
        let mut contents = String::from(ROSTER_HEADER);
        contents.push('\n');
        for (name, department, tier) in rows {
            contents.push_str(&format!("{},{},{}\n", name, department, tier));
        }
        self.write("members.csv", &contents)
    }

    /// Config pointing every file at this workspace
    pub fn config(&self, roster: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.files.roster_path = Some(roster.to_path_buf());
        config.files.history_dir = self.path().to_path_buf();
        config.files.report_path = self.path().join("current_matches.txt");
        config
    }
}

/// Reads the `Person1,Person2` rows of a history file
pub fn history_pairs(contents: &str) -> Vec<PairKey> {
    contents
        .lines()
        .skip(1)
        .filter_map(|line| line.split_once(','))
        .map(|(a, b)| PairKey::new(a, b))
        .collect()
}
