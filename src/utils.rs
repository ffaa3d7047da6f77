//! Utility functions shared by the loaders and reports

use chrono::{DateTime, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Trimmed cell value, or `None` when the cell is blank
pub fn clean_cell(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Position of each wanted column in a trimmed header row
pub fn column_positions(headers: &[String], wanted: &[&str]) -> Result<Vec<usize>, Vec<String>> {
    let mut positions = Vec::with_capacity(wanted.len());
    let mut missing = Vec::new();

    for column in wanted {
        match headers.iter().position(|h| h == column) {
            Some(index) => positions.push(index),
            None => missing.push(column.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(positions)
    } else {
        Err(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_cell() {
        assert_eq!(clean_cell(Some("  Ada ")), Some("Ada".to_string()));
        assert_eq!(clean_cell(Some("   ")), None);
        assert_eq!(clean_cell(None), None);
    }

    #[test]
    fn test_column_positions() {
        let headers = vec!["Full Name".to_string(), "Team".to_string(), "Department".to_string()];
        assert_eq!(
            column_positions(&headers, &["Department", "Full Name"]),
            Ok(vec![2, 0])
        );
        assert_eq!(
            column_positions(&headers, &["Full Name", "Exec or Assoc"]),
            Err(vec!["Exec or Assoc".to_string()])
        );
    }
}
