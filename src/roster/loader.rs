//! Roster source: reads the member sheet exported as CSV
//!
//! Header cells and values are trimmed. Rows without a full name are
//! dropped; any other missing value, a missing column, or a duplicated
//! name rejects the whole file.

use crate::config::RosterColumns;
use crate::error::{CoffeePairsError, Result};
use crate::roster::model::{Roster, RosterRecord};
use crate::types::Tier;
use crate::utils::{clean_cell, column_positions};
use anyhow::Context;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Load and validate the roster file at `path`
pub fn load_roster(path: &Path, columns: &RosterColumns) -> Result<Roster> {
    let file = File::open(path)
        .with_context(|| format!("Could not open member file '{}'", path.display()))?;

    let roster = parse_roster(file, columns)
        .with_context(|| format!("Invalid member file '{}'", path.display()))?;

    info!(
        "Loaded {} participants from {}",
        roster.len(),
        path.display()
    );
    Ok(roster)
}

/// Parse roster CSV from any reader
pub fn parse_roster<R: Read>(reader: R, columns: &RosterColumns) -> Result<Roster> {
    let records = read_records(reader, columns)?;
    Ok(Roster::new(records)?)
}

fn read_records<R: Read>(reader: R, columns: &RosterColumns) -> Result<Vec<RosterRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("Failed to read header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let wanted = columns.as_array();
    let positions = column_positions(&headers, &wanted).map_err(|missing| {
        CoffeePairsError::MissingColumns {
            missing,
            available: headers.clone(),
        }
    })?;
    let (name_idx, dept_idx, tier_idx) = (positions[0], positions[1], positions[2]);

    let mut records = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        // Header is line 1
        let line = index + 2;
        let row = row.with_context(|| format!("Failed to parse row {}", line))?;

        let Some(full_name) = clean_cell(row.get(name_idx)) else {
            debug!("Skipping row {} without a full name", line);
            continue;
        };

        let department =
            clean_cell(row.get(dept_idx)).ok_or_else(|| CoffeePairsError::MissingField {
                row: line,
                column: columns.department.clone(),
            })?;

        let tier = clean_cell(row.get(tier_idx)).ok_or_else(|| CoffeePairsError::MissingField {
            row: line,
            column: columns.tier.clone(),
        })?;

        records.push(RosterRecord {
            full_name,
            department,
            tier: Tier::parse_with(&tier, &columns.executive_label),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(csv: &str) -> Result<Roster> {
        parse_roster(csv.as_bytes(), &RosterColumns::default())
    }

    #[test]
    fn test_parse_trims_headers_and_values() {
        let roster = parse(
            "Full Name ,Department, Exec or Assoc \n\
             \x20Ada Lovelace , Engineering ,Executive\n\
             Ben Okri,Finance, Associate \n",
        )
        .unwrap();

        assert_eq!(roster.len(), 2);
        let ada = roster.get(0).unwrap();
        assert_eq!(ada.full_name, "Ada Lovelace");
        assert_eq!(ada.department, "Engineering");
        assert_eq!(ada.tier, Tier::Executive);
        assert_eq!(roster.get(1).unwrap().tier, Tier::Associate);
    }

    #[test]
    fn test_rows_without_names_are_dropped() {
        let roster = parse(
            "Full Name,Department,Exec or Assoc\n\
             Ada,Engineering,Executive\n\
             ,,\n\
             \x20  ,Finance,Associate\n\
             Ben,Finance,Associate\n",
        )
        .unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.name(1), Some("Ben"));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let roster = parse(
            "Email,Full Name,Department,Exec or Assoc,Notes\n\
             ada@example.com,Ada,Engineering,Executive,\n",
        )
        .unwrap();
        assert_eq!(roster.name(0), Some("Ada"));
    }

    #[test]
    fn test_missing_columns_are_fatal() {
        let err = parse("Full Name,Team\nAda,Engineering\n").unwrap_err();
        match err.downcast_ref::<CoffeePairsError>() {
            Some(CoffeePairsError::MissingColumns { missing, available }) => {
                assert_eq!(missing, &vec!["Department".to_string(), "Exec or Assoc".to_string()]);
                assert_eq!(available, &vec!["Full Name".to_string(), "Team".to_string()]);
            }
            other => panic!("expected missing columns error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_department_is_fatal() {
        let err = parse(
            "Full Name,Department,Exec or Assoc\n\
             Ada,Engineering,Executive\n\
             Ben,,Associate\n",
        )
        .unwrap_err();
        match err.downcast_ref::<CoffeePairsError>() {
            Some(CoffeePairsError::MissingField { row, column }) => {
                assert_eq!(*row, 3);
                assert_eq!(column, "Department");
            }
            other => panic!("expected missing field error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_names_after_trimming_are_fatal() {
        let err = parse(
            "Full Name,Department,Exec or Assoc\n\
             Ada,Engineering,Executive\n\
             Ada ,Finance,Associate\n",
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoffeePairsError>(),
            Some(CoffeePairsError::DuplicateNames { names }) if names == &vec!["Ada".to_string()]
        ));
    }

    #[test]
    fn test_custom_column_names() {
        let columns = RosterColumns {
            full_name: "Name".to_string(),
            department: "Dept".to_string(),
            tier: "Level".to_string(),
            executive_label: "Exec".to_string(),
        };
        let roster = parse_roster(
            "Name,Dept,Level\nAda,Eng,Exec\nBen,Ops,Executive\n".as_bytes(),
            &columns,
        )
        .unwrap();
        assert_eq!(roster.get(0).unwrap().department, "Eng");
        assert_eq!(roster.get(0).unwrap().tier, Tier::Executive);
        assert!(!roster.get(1).unwrap().tier.is_executive());
    }

    #[test]
    fn test_load_roster_error_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Full Name,Department,Exec or Assoc").unwrap();
        writeln!(file, "Ada,Engineering,Executive").unwrap();
        writeln!(file, "Ada,Finance,Associate").unwrap();

        let err = load_roster(file.path(), &RosterColumns::default()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains(&file.path().display().to_string()));
        assert!(message.contains("Duplicate names found: Ada"));
    }

    #[test]
    fn test_load_roster_missing_file() {
        let err = load_roster(Path::new("/nonexistent/members.csv"), &RosterColumns::default())
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/members.csv"));
    }
}
